//! Console page handlers.

use askama::Template;
use axum::{
    Form,
    extract::{Path, State},
    response::Html,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    action::Action,
    components::{ITEM_RESULTS_ID, SHOPCART_RESULTS_ID},
    controller::Console,
    error::AppError,
    forms::{ItemForm, ShopcartForm},
    render::TableView,
    state::AppState,
};

/// Every input field of the page, as submitted by any button.
#[derive(Debug, Default, Deserialize)]
pub struct ConsoleFields {
    #[serde(flatten)]
    pub shopcart: ShopcartForm,
    #[serde(flatten)]
    pub item: ItemForm,
}

/// A button for templates.
#[derive(Debug, Clone)]
pub struct ButtonView {
    pub id: String,
    pub slug: &'static str,
    pub label: &'static str,
    pub class: &'static str,
}

impl From<Action> for ButtonView {
    fn from(action: Action) -> Self {
        let class = if action.is_destructive() {
            "btn btn-danger"
        } else if action.is_local() {
            "btn btn-secondary"
        } else {
            "btn btn-primary"
        };
        Self {
            id: action.button_id(),
            slug: action.slug(),
            label: action.label(),
            class,
        }
    }
}

/// Console page template.
#[derive(Template)]
#[template(path = "console.html")]
pub struct ConsoleTemplate {
    pub console: Console,
    pub shopcart_buttons: Vec<ButtonView>,
    pub item_buttons: Vec<ButtonView>,
    pub shopcart_results_id: &'static str,
    pub item_results_id: &'static str,
    /// Results table under the shopcart form, if the last action left one there.
    pub shopcart_table: Option<TableView>,
    /// Results table under the item form.
    pub item_table: Option<TableView>,
    pub flash_class: &'static str,
}

impl ConsoleTemplate {
    /// Page for the given console state.
    #[must_use]
    pub fn new(console: Console) -> Self {
        let (shopcart_table, item_table) = match console.results.view() {
            Some(table) if table.target_id == ITEM_RESULTS_ID => (None, Some(table)),
            Some(table) => (Some(table), None),
            None => (None, None),
        };
        let flash_class = console
            .flash
            .message()
            .map_or("", |m| m.kind.css_class());

        Self {
            console,
            shopcart_buttons: Action::SHOPCART.into_iter().map(ButtonView::from).collect(),
            item_buttons: Action::ITEM.into_iter().map(ButtonView::from).collect(),
            shopcart_results_id: SHOPCART_RESULTS_ID,
            item_results_id: ITEM_RESULTS_ID,
            shopcart_table,
            item_table,
            flash_class,
        }
    }

    fn into_html(self) -> Result<Html<String>, AppError> {
        Ok(Html(self.render()?))
    }
}

/// Console page with empty forms.
#[instrument]
pub async fn index() -> Result<Html<String>, AppError> {
    ConsoleTemplate::new(Console::default()).into_html()
}

/// Run one action against the submitted forms and re-render the page.
#[instrument(skip(state, fields))]
pub async fn perform(
    State(state): State<AppState>,
    Path(action): Path<String>,
    Form(fields): Form<ConsoleFields>,
) -> Result<Html<String>, AppError> {
    let action: Action = action.parse()?;

    let mut console = Console::new(fields.shopcart, fields.item);
    console.dispatch(state.api(), action).await;

    ConsoleTemplate::new(console).into_html()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use shopcart_core::{ItemId, Shopcart, ShopcartId, ShopcartItem};

    use super::*;
    use crate::{flash::Flash, render::ResultPanel};

    #[test]
    fn test_index_page_has_every_button_and_field() {
        let html = ConsoleTemplate::new(Console::default()).render().unwrap();

        for action in Action::SHOPCART.into_iter().chain(Action::ITEM) {
            assert!(
                html.contains(&format!("id=\"{}\"", action.button_id())),
                "missing button {action}"
            );
        }
        for field in [
            "shopcart_id",
            "shopcart_total_price",
            "shopcart_item_product_id",
            "shopcart_item_name",
            "item_id",
            "item_shopcart_id",
            "item_product_id",
            "item_name",
            "item_price",
            "item_quantity",
            "flash_message",
            "default-submit-btn",
            "shopcart_search_results",
            "item_search_results",
        ] {
            assert!(html.contains(&format!("id=\"{field}\"")), "missing {field}");
        }
    }

    #[test]
    fn test_enter_key_submits_nothing() {
        let html = ConsoleTemplate::new(Console::default()).render().unwrap();

        // Implicit submission uses the form's first submit button.
        let first = html.split("<button").nth(1).unwrap();
        assert!(first.contains("id=\"default-submit-btn\""));
        assert!(first.contains(" disabled"));
        assert!(!first.contains("formaction"));

        let default = html.find("default-submit-btn").unwrap();
        let create = html.find("shopcart-create-btn").unwrap();
        assert!(default < create);
        assert!(!html.contains("<form method=\"post\" action="));
    }

    #[test]
    fn test_results_render_under_their_form() {
        let item = ShopcartItem {
            id: ItemId::new(3),
            shopcart_id: ShopcartId::new(7),
            product_id: None,
            name: Some("apple".to_string()),
            price: Decimal::ONE,
            quantity: 2,
        };

        let console = Console {
            results: ResultPanel::items(std::slice::from_ref(&item)),
            ..Console::default()
        };
        let template = ConsoleTemplate::new(console);
        assert!(template.shopcart_table.is_none());
        let html = template.render().unwrap();
        let (shopcart_part, item_part) = html.split_once("id=\"item_search_results\"").unwrap();
        assert!(!shopcart_part.contains("<table>"));
        assert!(item_part.contains("<td class=\"col-name\">apple</td>"));

        let cart = Shopcart {
            id: ShopcartId::new(7),
            total_price: Decimal::ONE,
            items: vec![item.clone(), ShopcartItem { id: ItemId::new(4), ..item }],
        };
        let console = Console {
            results: ResultPanel::shopcarts(&[cart]),
            ..Console::default()
        };
        let html = ConsoleTemplate::new(console).render().unwrap();
        let (shopcart_part, item_part) = html.split_once("id=\"item_search_results\"").unwrap();
        assert!(shopcart_part.contains("<td class=\"col-shopcart_id\" rowspan=\"2\">7</td>"));
        assert_eq!(shopcart_part.matches("col-shopcart_id").count(), 1);
        assert!(!item_part.contains("<table>"));
    }

    #[test]
    fn test_page_escapes_server_text() {
        let mut flash = Flash::default();
        flash.error("<script>alert(1)</script>");
        let console = Console {
            flash,
            ..Console::default()
        };
        let html = ConsoleTemplate::new(console).render().unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("flash-error"));
    }
}
