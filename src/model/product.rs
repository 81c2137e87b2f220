use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

/// Represents a product in the catalog.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](actor_framework::ResourceActor).
///
/// See [`impl ActorEntity for Product`](#impl-ActorEntity-for-Product) for details on:
/// - Creation parameters ([`ProductCreate`])
/// - Update parameters ([`ProductUpdate`], applied field by field)
/// - Custom actions ([`ProductAction`](crate::product_actor::ProductAction))
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub sku: String,
    pub stock: u32,
    pub category: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a new product.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub sku: String,
    pub stock: u32,
    pub category: String,
    pub image_url: Option<String>,
}

/// Field-wise product edit. `None` keeps the stored value.
///
/// The product actor applies it to the row it holds, so a field the caller did not set
/// is never rewritten from an older read. Stock in particular only changes here when
/// explicitly given; reservations and releases go through actions.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub sku: Option<String>,
    pub stock: Option<u32>,
    pub category: Option<String>,
    pub image_url: Option<String>,
}

impl ProductUpdate {
    /// Writes the set fields onto `product`.
    pub fn apply_to(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(sku) = self.sku {
            product.sku = sku;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(image_url) = self.image_url {
            product.image_url = Some(image_url);
        }
    }
}

/// Catalog listing filter. Fields are AND-combined; `None`, an empty name and a zero
/// price bound are all no-ops. The name match is a case-sensitive substring match.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductFilter {
    pub name: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl ProductFilter {
    pub fn accepts(&self, product: &Product) -> bool {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            if !product.name.contains(name) {
                return false;
            }
        }
        if let Some(min) = self.min_price.filter(|p| !p.is_zero()) {
            if product.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price.filter(|p| !p.is_zero()) {
            if product.price > max {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn widget(name: &str, price: Decimal) -> Product {
        Product {
            id: ProductId(1),
            name: name.into(),
            description: String::new(),
            price,
            sku: "W-1".into(),
            stock: 3,
            category: "tools".into(),
            image_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(ProductFilter::default().accepts(&widget("Anything", dec("0"))));

        let zeroed = ProductFilter {
            name: Some(String::new()),
            min_price: Some(Decimal::ZERO),
            max_price: Some(Decimal::ZERO),
        };
        assert!(zeroed.accepts(&widget("Anything", dec("99.99"))));
    }

    #[test]
    fn test_filter_fields_are_and_combined() {
        let filter = ProductFilter {
            name: Some("Lamp".into()),
            min_price: Some(dec("10")),
            max_price: Some(dec("20")),
        };
        assert!(filter.accepts(&widget("Desk Lamp", dec("15"))));
        assert!(!filter.accepts(&widget("Desk Lamp", dec("25"))));
        assert!(!filter.accepts(&widget("Desk Lamp", dec("5"))));
        assert!(!filter.accepts(&widget("Desk Fan", dec("15"))));
    }

    #[test]
    fn test_name_filter_is_case_sensitive() {
        let filter = ProductFilter {
            name: Some("lamp".into()),
            ..Default::default()
        };
        assert!(!filter.accepts(&widget("Desk Lamp", dec("15"))));
    }

    #[test]
    fn test_update_keeps_unset_fields() {
        let mut product = widget("Desk Lamp", dec("15"));
        ProductUpdate {
            price: Some(dec("12.50")),
            ..Default::default()
        }
        .apply_to(&mut product);

        assert_eq!(product.price, dec("12.50"));
        assert_eq!(product.name, "Desk Lamp");
        assert_eq!(product.stock, 3);
        assert_eq!(product.sku, "W-1");
    }
}
