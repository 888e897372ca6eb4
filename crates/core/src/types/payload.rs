//! Request payloads sent to the shopcart service.
//!
//! Payload fields are built from raw form input. Numeric fields that fail to
//! parse are kept as `None` and serialized as JSON `null`; the service is the
//! only validator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{ProductId, ShopcartId};

/// Body for creating or updating a shopcart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopcartPayload {
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total_price: Option<Decimal>,
}

/// Body for creating or updating a shopcart item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPayload {
    #[serde(default)]
    pub shopcart_id: Option<ShopcartId>,
    #[serde(default)]
    pub product_id: Option<ProductId>,
    #[serde(default)]
    pub name: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub quantity: Option<i32>,
}

/// Search filter for shopcarts or items.
///
/// Blank values are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SearchQuery {
    /// Build a query from raw input, dropping blank values.
    #[must_use]
    pub fn new(product_id: &str, name: &str) -> Self {
        Self {
            product_id: non_blank(product_id),
            name: non_blank(name),
        }
    }

    /// Drop blank values from a query that was deserialized as-is.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self::new(
            self.product_id.as_deref().unwrap_or_default(),
            self.name.as_deref().unwrap_or_default(),
        )
    }

    /// True when neither filter is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.product_id.is_none() && self.name.is_none()
    }

    /// Query-string pairs for the filters that are present.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(product_id) = &self.product_id {
            pairs.push(("product_id", product_id.as_str()));
        }
        if let Some(name) = &self.name {
            pairs.push(("name", name.as_str()));
        }
        pairs
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
