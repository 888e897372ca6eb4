//! Result table component types.
//!
//! These types define the column layout of the tables the console renders
//! under its shopcart and item panels.

use serde::Serialize;

/// Column definition for a result table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableColumn {
    /// Unique key for the column.
    pub key: &'static str,
    /// Display label for the column header.
    pub label: &'static str,
    /// Whether the cell spans every row of its shopcart.
    pub grouped: bool,
}

impl TableColumn {
    /// Create a new column.
    #[must_use]
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            grouped: false,
        }
    }

    /// Mark the column as spanning every row of its shopcart.
    #[must_use]
    pub const fn grouped(mut self) -> Self {
        self.grouped = true;
        self
    }
}

/// Configuration for a result table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultTableConfig {
    /// Id of the element the table is attached to.
    pub target_id: &'static str,
    /// Column definitions, in display order.
    pub columns: Vec<TableColumn>,
}

impl ResultTableConfig {
    /// Create a new table configuration.
    #[must_use]
    pub const fn new(target_id: &'static str) -> Self {
        Self {
            target_id,
            columns: Vec::new(),
        }
    }

    /// Add a column.
    #[must_use]
    pub fn column(mut self, column: TableColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Header labels in display order.
    #[must_use]
    pub fn labels(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.label).collect()
    }
}

/// Element id that shopcart results attach to.
pub const SHOPCART_RESULTS_ID: &str = "shopcart_search_results";

/// Element id that item results attach to.
pub const ITEM_RESULTS_ID: &str = "item_search_results";

/// Shopcarts with their items, one row per item.
#[must_use]
pub fn shopcart_table_config() -> ResultTableConfig {
    ResultTableConfig::new(SHOPCART_RESULTS_ID)
        .column(TableColumn::new("shopcart_id", "ID").grouped())
        .column(TableColumn::new("total_price", "Total Price").grouped())
        .column(TableColumn::new("item_id", "Item ID"))
        .column(TableColumn::new("item_product_id", "Product ID"))
        .column(TableColumn::new("item_name", "Name"))
        .column(TableColumn::new("item_quantity", "Quantity"))
        .column(TableColumn::new("item_price", "Price"))
}

/// Shopcart items.
#[must_use]
pub fn item_table_config() -> ResultTableConfig {
    ResultTableConfig::new(ITEM_RESULTS_ID)
        .column(TableColumn::new("id", "ID"))
        .column(TableColumn::new("shopcart_id", "Shopcart ID"))
        .column(TableColumn::new("product_id", "Product ID"))
        .column(TableColumn::new("name", "Name"))
        .column(TableColumn::new("quantity", "Quantity"))
        .column(TableColumn::new("price", "Price"))
}

/// Checkout receipt.
#[must_use]
pub fn checkout_table_config() -> ResultTableConfig {
    ResultTableConfig::new(SHOPCART_RESULTS_ID)
        .column(TableColumn::new("id", "ID"))
        .column(TableColumn::new("total_price", "Total Price"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shopcart_table_groups_cart_columns() {
        let config = shopcart_table_config();
        assert_eq!(config.columns.len(), 7);
        let grouped: Vec<_> = config
            .columns
            .iter()
            .filter(|c| c.grouped)
            .map(|c| c.key)
            .collect();
        assert_eq!(grouped, vec!["shopcart_id", "total_price"]);
    }

    #[test]
    fn test_item_and_checkout_tables() {
        assert_eq!(item_table_config().columns.len(), 6);
        assert_eq!(item_table_config().target_id, ITEM_RESULTS_ID);
        assert_eq!(checkout_table_config().labels(), vec!["ID", "Total Price"]);
    }
}
