//! Response payloads to table rows.
//!
//! Row builders are pure: they take service records and return structured
//! rows with every cell already formatted. Attaching rows to the page (or to
//! a terminal) is left to the template and the CLI.

use shopcart_core::{CheckoutReceipt, Shopcart, ShopcartItem};

use crate::components::{
    ResultTableConfig, checkout_table_config, item_table_config, shopcart_table_config,
};

/// One cell of a page table. Grouped cells carry the rows they span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub key: &'static str,
    pub text: String,
    pub rowspan: Option<usize>,
}

/// A result table laid out for the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    /// Id of the element the table belongs under.
    pub target_id: &'static str,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<CellView>>,
}

/// One rendered row of the shopcart table.
///
/// The first row of each shopcart carries `span`, the number of rows its id
/// and total price cells cover. Following rows of the same shopcart leave
/// those cells to the span and carry `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShopcartRow {
    pub span: Option<usize>,
    pub shopcart_id: String,
    pub total_price: String,
    pub item_id: String,
    pub item_product_id: String,
    pub item_name: String,
    pub item_quantity: String,
    pub item_price: String,
}

/// One rendered row of the item table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub id: String,
    pub shopcart_id: String,
    pub product_id: String,
    pub name: String,
    pub quantity: String,
    pub price: String,
}

/// The single row of a checkout table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRow {
    pub id: String,
    pub total_price: String,
}

/// Build the shopcart table. Produces `Σ max(items, 1)` rows.
#[must_use]
pub fn shopcart_rows(shopcarts: &[Shopcart]) -> Vec<ShopcartRow> {
    let mut rows = Vec::with_capacity(shopcarts.iter().map(Shopcart::row_span).sum());

    for cart in shopcarts {
        let head = ShopcartRow {
            span: Some(cart.row_span()),
            shopcart_id: cart.id.to_string(),
            total_price: cart.total_price.to_string(),
            ..ShopcartRow::default()
        };

        if cart.items.is_empty() {
            rows.push(head);
            continue;
        }

        for (index, item) in cart.items.iter().enumerate() {
            let base = if index == 0 {
                head.clone()
            } else {
                ShopcartRow {
                    shopcart_id: head.shopcart_id.clone(),
                    total_price: head.total_price.clone(),
                    ..ShopcartRow::default()
                }
            };
            rows.push(ShopcartRow {
                item_id: item.id.to_string(),
                item_product_id: item.product_id_text(),
                item_name: item.name_text().to_string(),
                item_quantity: item.quantity.to_string(),
                item_price: item.price.to_string(),
                ..base
            });
        }
    }

    rows
}

/// Build the item table, one row per item.
#[must_use]
pub fn item_rows(items: &[ShopcartItem]) -> Vec<ItemRow> {
    items
        .iter()
        .map(|item| ItemRow {
            id: item.id.to_string(),
            shopcart_id: item.shopcart_id.to_string(),
            product_id: item.product_id_text(),
            name: item.name_text().to_string(),
            quantity: item.quantity.to_string(),
            price: item.price.to_string(),
        })
        .collect()
}

/// Build the two-column checkout table.
#[must_use]
pub fn checkout_rows(receipt: &CheckoutReceipt) -> Vec<CheckoutRow> {
    vec![CheckoutRow {
        id: receipt.id.to_string(),
        total_price: receipt.total_price.to_string(),
    }]
}

/// Whatever the last action left in the results area.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResultPanel {
    #[default]
    Empty,
    Shopcarts(Vec<ShopcartRow>),
    Items(Vec<ItemRow>),
    Checkout(Vec<CheckoutRow>),
}

impl ResultPanel {
    /// Panel for a list of shopcarts.
    #[must_use]
    pub fn shopcarts(shopcarts: &[Shopcart]) -> Self {
        Self::Shopcarts(shopcart_rows(shopcarts))
    }

    /// Panel for a list of items.
    #[must_use]
    pub fn items(items: &[ShopcartItem]) -> Self {
        Self::Items(item_rows(items))
    }

    /// Panel for a checkout receipt.
    #[must_use]
    pub fn checkout(receipt: &CheckoutReceipt) -> Self {
        Self::Checkout(checkout_rows(receipt))
    }

    /// Column layout, or `None` for an empty panel.
    #[must_use]
    pub fn table(&self) -> Option<ResultTableConfig> {
        match self {
            Self::Empty => None,
            Self::Shopcarts(_) => Some(shopcart_table_config()),
            Self::Items(_) => Some(item_table_config()),
            Self::Checkout(_) => Some(checkout_table_config()),
        }
    }

    /// Number of table rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Shopcarts(rows) => rows.len(),
            Self::Items(rows) => rows.len(),
            Self::Checkout(rows) => rows.len(),
        }
    }

    /// True when nothing is shown.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Every row as plain cells, in column order.
    ///
    /// Cells covered by a shopcart span are blank.
    #[must_use]
    pub fn cells(&self) -> Vec<Vec<String>> {
        match self {
            Self::Empty => Vec::new(),
            Self::Shopcarts(rows) => rows
                .iter()
                .map(|row| {
                    let (id, total) = if row.span.is_some() {
                        (row.shopcart_id.clone(), row.total_price.clone())
                    } else {
                        (String::new(), String::new())
                    };
                    vec![
                        id,
                        total,
                        row.item_id.clone(),
                        row.item_product_id.clone(),
                        row.item_name.clone(),
                        row.item_quantity.clone(),
                        row.item_price.clone(),
                    ]
                })
                .collect(),
            Self::Items(rows) => rows
                .iter()
                .map(|row| {
                    vec![
                        row.id.clone(),
                        row.shopcart_id.clone(),
                        row.product_id.clone(),
                        row.name.clone(),
                        row.quantity.clone(),
                        row.price.clone(),
                    ]
                })
                .collect(),
            Self::Checkout(rows) => rows
                .iter()
                .map(|row| vec![row.id.clone(), row.total_price.clone()])
                .collect(),
        }
    }

    /// Lay the panel out for the page, or `None` for an empty panel.
    ///
    /// Grouped columns appear only on the first row of their group, with a
    /// rowspan covering the rest.
    #[must_use]
    pub fn view(&self) -> Option<TableView> {
        let table = self.table()?;
        let spans: Vec<Option<usize>> = match self {
            Self::Shopcarts(rows) => rows.iter().map(|row| row.span).collect(),
            _ => vec![Some(1); self.row_count()],
        };

        let rows = self
            .cells()
            .into_iter()
            .zip(spans)
            .map(|(cells, span)| {
                table
                    .columns
                    .iter()
                    .zip(cells)
                    .filter_map(|(column, text)| {
                        let rowspan = match (column.grouped, span) {
                            (true, None) => return None,
                            (true, Some(n)) => Some(n),
                            (false, _) => None,
                        };
                        Some(CellView {
                            key: column.key,
                            text,
                            rowspan,
                        })
                    })
                    .collect()
            })
            .collect();

        Some(TableView {
            target_id: table.target_id,
            headers: table.labels(),
            rows,
        })
    }

    /// Plain-text table with padded columns, for terminals.
    #[must_use]
    pub fn to_text(&self) -> String {
        let Some(table) = self.table() else {
            return String::new();
        };
        let header: Vec<String> = table.labels().into_iter().map(str::to_string).collect();
        let body = self.cells();

        let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
        for row in &body {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let format_line = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut lines = Vec::with_capacity(body.len() + 2);
        lines.push(format_line(&header));
        lines.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("  "),
        );
        lines.extend(body.iter().map(|row| format_line(row)));
        lines.join("\n")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use shopcart_core::{ItemId, ProductId, ShopcartId};

    use super::*;
    use crate::components::{ITEM_RESULTS_ID, SHOPCART_RESULTS_ID};

    fn item(id: i32, cart: i32, name: &str) -> ShopcartItem {
        ShopcartItem {
            id: ItemId::new(id),
            shopcart_id: ShopcartId::new(cart),
            product_id: Some(ProductId::new(100 + id)),
            name: Some(name.to_string()),
            price: Decimal::from_str("1.25").unwrap(),
            quantity: 2,
        }
    }

    fn cart(id: i32, items: Vec<ShopcartItem>) -> Shopcart {
        Shopcart {
            id: ShopcartId::new(id),
            total_price: Decimal::from_str("19.99").unwrap(),
            items,
        }
    }

    #[test]
    fn test_row_count_is_sum_of_max_items_one() {
        let carts = vec![
            cart(1, vec![]),
            cart(2, vec![item(1, 2, "a"), item(2, 2, "b"), item(3, 2, "c")]),
            cart(3, vec![item(4, 3, "d")]),
        ];
        let rows = shopcart_rows(&carts);
        assert_eq!(rows.len(), 1 + 3 + 1);

        let spans: Vec<_> = rows.iter().map(|r| r.span).collect();
        assert_eq!(spans, vec![Some(1), Some(3), None, None, Some(1)]);
    }

    #[test]
    fn test_empty_cart_has_blank_item_cells() {
        let rows = shopcart_rows(&[cart(7, vec![])]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].shopcart_id, "7");
        assert_eq!(rows[0].total_price, "19.99");
        assert!(rows[0].item_id.is_empty());
        assert!(rows[0].item_name.is_empty());
        assert!(rows[0].item_price.is_empty());
    }

    #[test]
    fn test_item_cells_follow_items() {
        let rows = shopcart_rows(&[cart(2, vec![item(1, 2, "apple"), item(2, 2, "pear")])]);
        assert_eq!(rows[0].item_name, "apple");
        assert_eq!(rows[1].item_name, "pear");
        assert_eq!(rows[1].item_product_id, "102");
        assert_eq!(rows[1].item_quantity, "2");
        assert_eq!(rows[1].item_price, "1.25");
    }

    #[test]
    fn test_no_shopcarts_no_rows() {
        assert!(shopcart_rows(&[]).is_empty());
        assert_eq!(ResultPanel::shopcarts(&[]).row_count(), 0);
    }

    #[test]
    fn test_item_rows() {
        let rows = item_rows(&[item(3, 7, "apple")]);
        assert_eq!(
            rows,
            vec![ItemRow {
                id: "3".to_string(),
                shopcart_id: "7".to_string(),
                product_id: "103".to_string(),
                name: "apple".to_string(),
                quantity: "2".to_string(),
                price: "1.25".to_string(),
            }]
        );
    }

    #[test]
    fn test_null_product_and_name_render_blank() {
        let bare = ShopcartItem {
            product_id: None,
            name: None,
            ..item(1, 7, "")
        };
        let rows = item_rows(std::slice::from_ref(&bare));
        assert!(rows[0].product_id.is_empty());
        assert!(rows[0].name.is_empty());
        assert_eq!(rows[0].quantity, "2");

        let rows = shopcart_rows(&[cart(7, vec![bare])]);
        assert!(rows[0].item_product_id.is_empty());
        assert_eq!(rows[0].item_id, "1");
    }

    #[test]
    fn test_checkout_panel_is_two_columns_one_row() {
        let receipt = CheckoutReceipt {
            id: ShopcartId::new(7),
            total_price: Decimal::from_str("19.99").unwrap(),
        };
        let panel = ResultPanel::checkout(&receipt);
        assert_eq!(panel.row_count(), 1);
        assert_eq!(panel.table().unwrap().columns.len(), 2);
        assert_eq!(panel.cells(), vec![vec!["7".to_string(), "19.99".to_string()]]);
        assert_eq!(panel.view().unwrap().target_id, SHOPCART_RESULTS_ID);
    }

    #[test]
    fn test_view_spans_grouped_columns() {
        let panel = ResultPanel::shopcarts(&[
            cart(2, vec![item(1, 2, "a"), item(2, 2, "b")]),
            cart(3, vec![]),
        ]);
        let view = panel.view().unwrap();
        assert_eq!(view.target_id, SHOPCART_RESULTS_ID);
        assert_eq!(view.headers.len(), 7);
        assert_eq!(view.rows.len(), 3);

        assert_eq!(view.rows[0].len(), 7);
        assert_eq!(view.rows[0][0].key, "shopcart_id");
        assert_eq!(view.rows[0][0].rowspan, Some(2));
        assert_eq!(view.rows[0][1].rowspan, Some(2));
        assert_eq!(view.rows[0][2].rowspan, None);

        // Covered by the span above.
        assert_eq!(view.rows[1].len(), 5);
        assert_eq!(view.rows[1][0].key, "item_id");
        assert_eq!(view.rows[1][2].text, "b");

        assert_eq!(view.rows[2][0].text, "3");
        assert_eq!(view.rows[2][0].rowspan, Some(1));
    }

    #[test]
    fn test_item_view_targets_item_results() {
        let view = ResultPanel::items(&[item(3, 7, "apple")]).view().unwrap();
        assert_eq!(view.target_id, ITEM_RESULTS_ID);
        assert!(view.rows[0].iter().all(|cell| cell.rowspan.is_none()));
        assert_eq!(view.rows[0][3].text, "apple");
        assert!(ResultPanel::Empty.view().is_none());
    }

    #[test]
    fn test_cells_blank_spanned_cells() {
        let panel = ResultPanel::shopcarts(&[cart(2, vec![item(1, 2, "a"), item(2, 2, "b")])]);
        let cells = panel.cells();
        assert_eq!(cells[0][0], "2");
        assert_eq!(cells[1][0], "");
        assert_eq!(cells[1][4], "b");
    }

    #[test]
    fn test_to_text() {
        let panel = ResultPanel::items(&[item(3, 7, "apple")]);
        let text = panel.to_text();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID  Shopcart ID  Product ID"));
        assert!(lines[2].contains("apple"));
        assert_eq!(ResultPanel::Empty.to_text(), "");
    }
}
