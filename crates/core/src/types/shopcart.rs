//! Shopcart records as returned by the shopcart service.
//!
//! Both entities are owned by the remote service. The console never caches
//! them: every render is built from the latest response and dropped on the
//! next action.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{ItemId, ProductId, ShopcartId};

/// A shopcart and its line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shopcart {
    pub id: ShopcartId,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    /// Line items; omitted by some responses.
    #[serde(default)]
    pub items: Vec<ShopcartItem>,
}

impl Shopcart {
    /// Number of table rows this shopcart occupies when rendered.
    ///
    /// A shopcart with no items still takes one row.
    #[must_use]
    pub fn row_span(&self) -> usize {
        self.items.len().max(1)
    }
}

/// One product line within a shopcart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopcartItem {
    pub id: ItemId,
    pub shopcart_id: ShopcartId,
    /// Stored as sent; the service accepts `null`.
    #[serde(default)]
    pub product_id: Option<ProductId>,
    /// Stored as sent; the service accepts `null`.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: i32,
}

impl ShopcartItem {
    /// Product id as shown in a field or cell; blank when absent.
    #[must_use]
    pub fn product_id_text(&self) -> String {
        self.product_id.map(|id| id.to_string()).unwrap_or_default()
    }

    /// Name as shown in a field or cell; blank when absent.
    #[must_use]
    pub fn name_text(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

/// Response body of the checkout endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutReceipt {
    pub id: ShopcartId,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_shopcart_without_items_field() {
        let cart: Shopcart = serde_json::from_str(r#"{"id":7,"total_price":19.99}"#).unwrap();
        assert_eq!(cart.id, ShopcartId::new(7));
        assert_eq!(cart.total_price, Decimal::from_str("19.99").unwrap());
        assert!(cart.items.is_empty());
        assert_eq!(cart.row_span(), 1);
    }

    #[test]
    fn test_shopcart_with_items() {
        let cart: Shopcart = serde_json::from_str(
            r#"{"id":1,"total_price":7.5,"items":[
                {"id":3,"shopcart_id":1,"product_id":10,"name":"apple","price":2.5,"quantity":2},
                {"id":4,"shopcart_id":1,"product_id":11,"name":"pear","price":2.5,"quantity":1}
            ]}"#,
        )
        .unwrap();

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.row_span(), 2);
        let first = cart.items.first().unwrap();
        assert_eq!(first.name_text(), "apple");
        assert_eq!(first.product_id, Some(ProductId::new(10)));
        assert_eq!(first.quantity, 2);
    }

    #[test]
    fn test_item_with_null_product_and_name() {
        let item: ShopcartItem = serde_json::from_str(
            r#"{"id":1,"shopcart_id":7,"product_id":null,"name":null,"price":1.5,"quantity":2}"#,
        )
        .unwrap();

        assert_eq!(item.product_id, None);
        assert_eq!(item.name, None);
        assert_eq!(item.product_id_text(), "");
        assert_eq!(item.name_text(), "");
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn test_total_price_serializes_as_number() {
        let receipt = CheckoutReceipt {
            id: ShopcartId::new(7),
            total_price: Decimal::from_str("19.99").unwrap(),
        };
        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json, serde_json::json!({"id": 7, "total_price": 19.99}));
    }
}
