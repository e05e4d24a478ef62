//! Enum-like labels shared by the store and the back-office.
//!
//! Serialized labels are the Spanish strings the services and the stored
//! snapshots use.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a label does not match any known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownLabel {
    kind: &'static str,
    value: String,
}

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    /// Gym memberships and classes.
    #[serde(rename = "Membresías")]
    Memberships,
    #[default]
    #[serde(rename = "Suplementos")]
    Supplements,
    #[serde(rename = "Ropa")]
    Clothing,
    #[serde(rename = "Equipamiento")]
    Equipment,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Self; 4] = [
        Self::Memberships,
        Self::Supplements,
        Self::Clothing,
        Self::Equipment,
    ];

    /// The label shown to shoppers and stored by the services.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Memberships => "Membresías",
            Self::Supplements => "Suplementos",
            Self::Clothing => "Ropa",
            Self::Equipment => "Equipamiento",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.label().to_lowercase() == wanted)
            .ok_or_else(|| UnknownLabel {
                kind: "category",
                value: s.to_owned(),
            })
    }
}

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Role {
    /// Back-office access.
    Admin,
    /// Shopper.
    #[default]
    #[serde(rename = "Cliente")]
    Customer,
}

impl Role {
    /// Map the role string the user service returns. Anything other than
    /// `admin` (any case) is a customer.
    #[must_use]
    pub fn from_backend(value: Option<&str>) -> Self {
        match value {
            Some(role) if role.eq_ignore_ascii_case("admin") => Self::Admin,
            _ => Self::Customer,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => f.write_str("Admin"),
            Self::Customer => f.write_str("Cliente"),
        }
    }
}

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "Completado")]
    Completed,
    #[serde(rename = "Pendiente")]
    Pending,
    #[serde(rename = "Cancelado")]
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => f.write_str("Completado"),
            Self::Pending => f.write_str("Pendiente"),
            Self::Cancelled => f.write_str("Cancelado"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_ignores_case() {
        assert_eq!("ropa".parse::<Category>().unwrap(), Category::Clothing);
        assert_eq!(
            "MEMBRESÍAS".parse::<Category>().unwrap(),
            Category::Memberships
        );
        assert!("Zapatos".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serializes_label() {
        let json = serde_json::to_string(&Category::Memberships).unwrap();
        assert_eq!(json, "\"Membresías\"");
    }

    #[test]
    fn test_role_from_backend() {
        assert_eq!(Role::from_backend(Some("ADMIN")), Role::Admin);
        assert_eq!(Role::from_backend(Some("socio")), Role::Customer);
        assert_eq!(Role::from_backend(None), Role::Customer);
    }

    #[test]
    fn test_role_serializes_label() {
        assert_eq!(serde_json::to_string(&Role::Customer).unwrap(), "\"Cliente\"");
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"Admin\"");
    }
}
