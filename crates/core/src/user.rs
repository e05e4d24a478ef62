//! Store accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Email, Role, UserId};

/// A store account as held in the local session.
///
/// The user service keys accounts by email and does not expose numeric ids,
/// so `id` is `0` for accounts that came from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: UserId,
    pub name: String,
    pub email: Email,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_uri: Option<String>,
    /// Membership expiry as epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_end_millis: Option<i64>,
}

impl User {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Membership expiry, if the account has a plan.
    #[must_use]
    pub fn plan_end(&self) -> Option<DateTime<Utc>> {
        self.plan_end_millis.and_then(DateTime::from_timestamp_millis)
    }

    /// Whether the membership is still running at `now`.
    #[must_use]
    pub fn has_active_plan(&self, now: DateTime<Utc>) -> bool {
        self.plan_end().is_some_and(|end| end > now)
    }
}
