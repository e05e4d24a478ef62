//! Mapping between backend wire records and the core domain types.

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::debug;

use gymtastic_core::{
    CartLine, Category, CustomerDetails, Email, Order, OrderId, OrderStatus, Price, Product,
    ProductId, Role, Stock, User, UserId,
};

use super::ApiError;
use super::types::{
    BackendOrder, BackendProduct, BackendUser, NewProduct, ProductPayload, ProductUpdate,
};

/// Shown for products whose image is not a URL or site path.
pub(super) const FALLBACK_IMAGE: &str = "https://source.unsplash.com/random?gym";

/// Image of the placeholder line that stands in for a listed order's items.
const ORDER_ITEM_IMAGE: &str = "https://source.unsplash.com/50x50/?gym";

/// The catalog service has no "unlimited"; this many units stands in.
pub(super) const UNLIMITED_STOCK_UNITS: u32 = 9999;

// =============================================================================
// Products
// =============================================================================

pub(super) fn product_from_backend(data: BackendProduct) -> Product {
    let price = data.price_or_zero();
    let (category, description) =
        split_category(data.descripcion.as_deref().unwrap_or_default(), data.tipo.as_deref());

    let image = data
        .img
        .filter(|img| img.starts_with("http") || img.starts_with('/'))
        .unwrap_or_else(|| FALLBACK_IMAGE.to_owned());

    Product {
        id: data.id,
        name: data.nombre,
        description,
        image,
        price,
        stock: Stock::from(data.stock),
        category,
    }
}

impl BackendProduct {
    fn price_or_zero(&self) -> Price {
        if self.precio.is_negative() {
            Price::ZERO
        } else {
            self.precio
        }
    }
}

/// Work out the category of a backend description and strip its tag.
///
/// Descriptions written by the back-office start with `[Category]`. Older
/// records have no tag and are classified from `tipo` and keywords.
fn split_category(description: &str, tipo: Option<&str>) -> (Category, String) {
    for category in Category::ALL {
        let tag = format!("[{}]", category.label());
        if let Some(rest) = description.strip_prefix(&tag) {
            return (category, rest.trim().to_owned());
        }
    }

    let lower = description.to_lowercase();
    let category = if tipo.is_some_and(|t| t.eq_ignore_ascii_case("plan")) {
        Category::Memberships
    } else if lower.contains("ropa") || lower.contains("polera") {
        Category::Clothing
    } else if lower.contains("mancuerna") || lower.contains("peso") {
        Category::Equipment
    } else {
        Category::Supplements
    };
    (category, description.to_owned())
}

fn tagged_description(category: Category, description: &str) -> String {
    format!("[{}] {description}", category.label())
}

/// Backend `tipo` for a category.
pub(super) const fn product_kind(category: Category) -> &'static str {
    match category {
        Category::Memberships => "plan",
        _ => "merch",
    }
}

pub(super) fn stock_to_backend(stock: Stock) -> u32 {
    stock.available().unwrap_or(UNLIMITED_STOCK_UNITS)
}

pub(super) fn new_product_payload(product: &NewProduct) -> ProductPayload {
    ProductPayload {
        nombre: Some(product.name.clone()),
        descripcion: Some(tagged_description(product.category, &product.description)),
        precio: Some(product.price),
        stock: Some(stock_to_backend(product.stock)),
        img: Some(product.image.clone()),
        tipo: Some(product_kind(product.category)),
    }
}

/// Only the fields present in `update` are sent. A new category rewrites
/// the description tag, so the description is resent along with it.
pub(super) fn update_payload(update: &ProductUpdate) -> ProductPayload {
    let descripcion = match (&update.description, update.category) {
        (None, None) => None,
        (description, Some(category)) => Some(tagged_description(
            category,
            description.as_deref().unwrap_or_default(),
        )),
        (Some(description), None) => Some(description.clone()),
    };

    ProductPayload {
        nombre: update.name.clone(),
        descripcion,
        precio: update.price,
        stock: update.stock.map(stock_to_backend),
        img: update.image.clone(),
        tipo: update.category.map(product_kind),
    }
}

// =============================================================================
// Users
// =============================================================================

/// The user service has no numeric ids; accounts are keyed by email.
pub(super) fn user_from_backend(data: BackendUser) -> Result<User, ApiError> {
    let email = Email::parse(&data.email)
        .map_err(|e| ApiError::Parse(format!("user record has a bad email: {e}")))?;

    Ok(User {
        id: UserId::default(),
        name: data.nombre,
        email,
        role: Role::from_backend(data.rol.as_deref()),
        phone: data.fono,
        avatar_uri: data.avatar_uri,
        plan_end_millis: data.plan_end_millis,
    })
}

// =============================================================================
// Orders
// =============================================================================

/// The order listing only carries a summary, so the items become a single
/// placeholder line named after the order description.
pub(super) fn order_from_backend(data: BackendOrder) -> Order {
    let date = parse_order_date(data.date.as_deref());
    let quantity = data.items_count.filter(|&n| n > 0).unwrap_or(1);

    let placeholder = Product {
        id: ProductId::default(),
        name: data
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| "Items Varios".to_owned()),
        description: String::new(),
        image: ORDER_ITEM_IMAGE.to_owned(),
        price: Price::ZERO,
        stock: Stock::Limited(0),
        category: Category::Equipment,
    };

    Order {
        id: OrderId::new(data.id.to_string()),
        date,
        customer: CustomerDetails {
            first_name: "Cliente".to_owned(),
            email: data.user_email,
            street: "Dirección registrada".to_owned(),
            ..CustomerDetails::default()
        },
        items: vec![CartLine {
            product: placeholder,
            quantity,
        }],
        total: data.total_amount,
        status: OrderStatus::Completed,
    }
}

/// Accepts RFC 3339 and zone-less ISO timestamps (read as UTC). Anything
/// else maps to the epoch.
fn parse_order_date(raw: Option<&str>) -> DateTime<Utc> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return DateTime::<Utc>::default();
    };

    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return date.with_timezone(&Utc);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.and_utc();
    }

    debug!(date = raw, "Unrecognized order date");
    DateTime::<Utc>::default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::types::BackendOrderId;

    fn backend(descripcion: Option<&str>, tipo: Option<&str>) -> BackendProduct {
        BackendProduct {
            id: ProductId::new(1),
            nombre: "Test".to_owned(),
            descripcion: descripcion.map(str::to_owned),
            precio: Price::from_pesos(1000),
            stock: Some(10),
            img: Some("/img/test.jpg".to_owned()),
            tipo: tipo.map(str::to_owned),
        }
    }

    #[test]
    fn test_tag_sets_category_and_is_stripped() {
        let product = product_from_backend(backend(Some("[Ropa] Polera dry-fit"), Some("merch")));
        assert_eq!(product.category, Category::Clothing);
        assert_eq!(product.description, "Polera dry-fit");

        let product = product_from_backend(backend(Some("[Membresías]  Plan anual "), None));
        assert_eq!(product.category, Category::Memberships);
        assert_eq!(product.description, "Plan anual");
    }

    #[test]
    fn test_legacy_heuristics() {
        let cases = [
            (Some("Acceso total"), Some("PLAN"), Category::Memberships),
            (Some("Ropa deportiva"), None, Category::Clothing),
            (Some("Mancuernas de 10kg"), None, Category::Equipment),
            (Some("Disco de peso olímpico"), None, Category::Equipment),
            (Some("Whey 2kg"), Some("merch"), Category::Supplements),
            (None, None, Category::Supplements),
        ];
        for (descripcion, tipo, expected) in cases {
            let product = product_from_backend(backend(descripcion, tipo));
            assert_eq!(product.category, expected, "{descripcion:?} / {tipo:?}");
        }
    }

    #[test]
    fn test_image_fallback() {
        let mut data = backend(None, None);
        data.img = Some("https://cdn.gym.cl/a.png".to_owned());
        assert_eq!(product_from_backend(data.clone()).image, "https://cdn.gym.cl/a.png");

        data.img = Some("foto.png".to_owned());
        assert_eq!(product_from_backend(data.clone()).image, FALLBACK_IMAGE);

        data.img = None;
        assert_eq!(product_from_backend(data).image, FALLBACK_IMAGE);
    }

    #[test]
    fn test_negative_price_maps_to_zero() {
        let mut data = backend(Some("[Ropa] Polera"), None);
        data.precio = Price::from_pesos(-5000);

        let product = product_from_backend(data);
        assert_eq!(product.price, Price::ZERO);
        assert_eq!(product.name, "Test");
        assert_eq!(product.image, "/img/test.jpg");
        assert_eq!(product.category, Category::Clothing);
    }

    #[test]
    fn test_stock_mapping() {
        let mut data = backend(None, None);
        data.stock = None;
        assert_eq!(product_from_backend(data.clone()).stock, Stock::Unlimited);

        data.stock = Some(-3);
        assert_eq!(product_from_backend(data.clone()).stock, Stock::Limited(0));

        data.stock = Some(25);
        assert_eq!(product_from_backend(data).stock, Stock::Limited(25));
    }

    #[test]
    fn test_new_product_payload() {
        let payload = new_product_payload(&NewProduct {
            name: "Pase Mensual".to_owned(),
            description: "Acceso ilimitado".to_owned(),
            image: "/img/pase.jpg".to_owned(),
            price: Price::from_pesos(25000),
            stock: Stock::Unlimited,
            category: Category::Memberships,
        });

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "nombre": "Pase Mensual",
                "descripcion": "[Membresías] Acceso ilimitado",
                "precio": 25000.0,
                "stock": 9999,
                "img": "/img/pase.jpg",
                "tipo": "plan"
            })
        );
    }

    #[test]
    fn test_update_payload_only_sends_present_fields() {
        let payload = update_payload(&ProductUpdate {
            price: Some(Price::from_pesos(15000)),
            ..ProductUpdate::default()
        });
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, serde_json::json!({ "precio": 15000.0 }));
    }

    #[test]
    fn test_update_payload_retags_description() {
        let payload = update_payload(&ProductUpdate {
            description: Some("Botella 1L".to_owned()),
            category: Some(Category::Equipment),
            ..ProductUpdate::default()
        });
        assert_eq!(payload.descripcion.as_deref(), Some("[Equipamiento] Botella 1L"));
        assert_eq!(payload.tipo, Some("merch"));

        let payload = update_payload(&ProductUpdate {
            description: Some("Sin etiqueta".to_owned()),
            ..ProductUpdate::default()
        });
        assert_eq!(payload.descripcion.as_deref(), Some("Sin etiqueta"));
        assert_eq!(payload.tipo, None);
    }

    #[test]
    fn test_user_from_backend() {
        let user = user_from_backend(BackendUser {
            email: "admin@gym.com".to_owned(),
            nombre: "Admin".to_owned(),
            rol: Some("ADMIN".to_owned()),
            fono: Some("+56911112222".to_owned()),
            avatar_uri: None,
            plan_end_millis: Some(1_800_000_000_000),
        })
        .unwrap();
        assert_eq!(user.id, UserId::default());
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.phone.as_deref(), Some("+56911112222"));

        let customer = user_from_backend(BackendUser {
            email: "socio@gym.com".to_owned(),
            nombre: "Socio".to_owned(),
            rol: None,
            fono: None,
            avatar_uri: None,
            plan_end_millis: None,
        })
        .unwrap();
        assert_eq!(customer.role, Role::Customer);
    }

    #[test]
    fn test_user_with_bad_email_is_rejected() {
        let result = user_from_backend(BackendUser {
            email: "sin-arroba".to_owned(),
            nombre: "X".to_owned(),
            rol: None,
            fono: None,
            avatar_uri: None,
            plan_end_millis: None,
        });
        assert!(matches!(result, Err(ApiError::Parse(_))));
    }

    #[test]
    fn test_order_from_backend() {
        let order = order_from_backend(BackendOrder {
            id: BackendOrderId::Number(42),
            date: Some("2024-07-05T10:30:00".to_owned()),
            total_amount: Price::from_pesos(45000),
            user_email: "socio@gym.com".to_owned(),
            description: Some("Creatina x2".to_owned()),
            items_count: Some(2),
        });

        assert_eq!(order.id.as_str(), "42");
        assert_eq!(order.date.timestamp(), 1_720_175_400);
        assert_eq!(order.total, Price::from_pesos(45000));
        assert_eq!(order.status, OrderStatus::Completed);
        assert_eq!(order.customer.email, "socio@gym.com");
        assert_eq!(order.item_count(), 2);
        assert_eq!(order.items[0].product.name, "Creatina x2");
    }

    #[test]
    fn test_order_without_summary_fields() {
        let order = order_from_backend(BackendOrder {
            id: BackendOrderId::Text("abc".to_owned()),
            date: Some("ayer".to_owned()),
            total_amount: Price::ZERO,
            user_email: String::new(),
            description: None,
            items_count: Some(0),
        });
        assert_eq!(order.date, DateTime::<Utc>::default());
        assert_eq!(order.item_count(), 1);
        assert_eq!(order.items[0].product.name, "Items Varios");
    }

    #[test]
    fn test_parse_order_date_rfc3339() {
        let date = parse_order_date(Some("2024-07-05T10:30:00-04:00"));
        assert_eq!(date.timestamp(), 1_720_189_800);
    }
}
