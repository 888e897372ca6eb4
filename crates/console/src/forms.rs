//! Form view-models for the shopcart and item panels.
//!
//! Each form holds the raw text of its input fields, keyed by the same ids the
//! console page uses (`shopcart_id`, `item_price`, ...). Reading a form turns
//! that text into a request payload without validating it; writing a form
//! replaces every field it owns from a service record.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shopcart_core::{
    CheckoutReceipt, ItemPayload, SearchQuery, Shopcart, ShopcartId, ShopcartItem,
    ShopcartPayload,
};

/// Fields of the shopcart panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopcartForm {
    #[serde(default)]
    pub shopcart_id: String,
    #[serde(default)]
    pub shopcart_total_price: String,
    /// Search filter: product id of an item in the shopcart.
    #[serde(default)]
    pub shopcart_item_product_id: String,
    /// Search filter: name of an item in the shopcart.
    #[serde(default)]
    pub shopcart_item_name: String,
}

impl ShopcartForm {
    /// Payload for create/update.
    #[must_use]
    pub fn read(&self) -> ShopcartPayload {
        ShopcartPayload {
            total_price: parse_decimal(&self.shopcart_total_price),
        }
    }

    /// Shopcart id as typed, for use as a path segment.
    #[must_use]
    pub fn id(&self) -> &str {
        self.shopcart_id.trim()
    }

    /// Search filters from the panel.
    #[must_use]
    pub fn search_query(&self) -> SearchQuery {
        SearchQuery::new(&self.shopcart_item_product_id, &self.shopcart_item_name)
    }

    /// Copy a shopcart into the form, replacing every field.
    ///
    /// Records carry no search filters, so those fields are emptied.
    pub fn write(&mut self, shopcart: &Shopcart) {
        self.fill(shopcart.id, shopcart.total_price);
    }

    /// Copy a checkout receipt into the form, replacing every field.
    pub fn write_receipt(&mut self, receipt: &CheckoutReceipt) {
        self.fill(receipt.id, receipt.total_price);
    }

    fn fill(&mut self, id: ShopcartId, total_price: Decimal) {
        *self = Self {
            shopcart_id: id.to_string(),
            shopcart_total_price: total_price.to_string(),
            ..Self::default()
        };
    }

    /// Empty every field.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Fields of the shopcart item panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemForm {
    #[serde(default)]
    pub item_id: String,
    #[serde(default)]
    pub item_shopcart_id: String,
    #[serde(default)]
    pub item_product_id: String,
    #[serde(default)]
    pub item_name: String,
    #[serde(default)]
    pub item_price: String,
    #[serde(default)]
    pub item_quantity: String,
}

impl ItemForm {
    /// Payload for create/update.
    #[must_use]
    pub fn read(&self) -> ItemPayload {
        ItemPayload {
            shopcart_id: parse_number(&self.item_shopcart_id),
            product_id: parse_number(&self.item_product_id),
            name: self.item_name.clone(),
            price: parse_decimal(&self.item_price),
            quantity: parse_number(&self.item_quantity),
        }
    }

    /// Owning shopcart id as typed, for use as a path segment.
    #[must_use]
    pub fn shopcart_id(&self) -> &str {
        self.item_shopcart_id.trim()
    }

    /// Item id as typed, for use as a path segment.
    #[must_use]
    pub fn id(&self) -> &str {
        self.item_id.trim()
    }

    /// Search filters from the panel.
    #[must_use]
    pub fn search_query(&self) -> SearchQuery {
        SearchQuery::new(&self.item_product_id, &self.item_name)
    }

    /// Copy an item into the form, replacing every field.
    pub fn write(&mut self, item: &ShopcartItem) {
        self.item_id = item.id.to_string();
        self.item_shopcart_id = item.shopcart_id.to_string();
        self.item_product_id = item.product_id_text();
        self.item_name = item.name_text().to_string();
        self.item_price = item.price.to_string();
        self.item_quantity = item.quantity.to_string();
    }

    /// Empty every field.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw.trim()).ok()
}

fn parse_number<T: FromStr>(raw: &str) -> Option<T> {
    raw.trim().parse().ok()
}
