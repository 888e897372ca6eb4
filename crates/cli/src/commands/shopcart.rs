//! `shopcart shopcart ...` subcommands.

use clap::Subcommand;
use shopcart_console::{
    action::Action,
    api::ShopcartApi,
    controller::Console,
    forms::{ItemForm, ShopcartForm},
};

#[derive(Subcommand)]
pub enum ShopcartCommand {
    /// Create a shopcart
    Create {
        /// Total price, e.g. 19.99
        #[arg(long, default_value = "")]
        total_price: String,
    },
    /// Show one shopcart with its items
    Retrieve {
        /// Shopcart id
        id: String,
    },
    /// Replace a shopcart's total price
    Update {
        /// Shopcart id
        id: String,
        /// New total price
        #[arg(long, default_value = "")]
        total_price: String,
    },
    /// Delete a shopcart
    Delete {
        /// Shopcart id
        id: String,
    },
    /// List every shopcart
    List,
    /// Find shopcarts holding a matching item
    Search {
        /// Item product id
        #[arg(long, default_value = "")]
        product_id: String,
        /// Item name
        #[arg(long, default_value = "")]
        name: String,
    },
    /// Remove every item from a shopcart
    Clear {
        /// Shopcart id
        id: String,
    },
    /// Check a shopcart out
    Checkout {
        /// Shopcart id
        id: String,
    },
}

impl ShopcartCommand {
    /// Fill the shopcart form and run the matching action.
    pub async fn run(self, api: &ShopcartApi) -> Console {
        let (action, form) = self.into_form();
        let mut console = Console::new(form, ItemForm::default());
        console.dispatch(api, action).await;
        console
    }

    fn into_form(self) -> (Action, ShopcartForm) {
        let by_id = |shopcart_id: String| ShopcartForm {
            shopcart_id,
            ..ShopcartForm::default()
        };

        match self {
            Self::Create { total_price } => (
                Action::CreateShopcart,
                ShopcartForm {
                    shopcart_total_price: total_price,
                    ..ShopcartForm::default()
                },
            ),
            Self::Retrieve { id } => (Action::RetrieveShopcart, by_id(id)),
            Self::Update { id, total_price } => (
                Action::UpdateShopcart,
                ShopcartForm {
                    shopcart_id: id,
                    shopcart_total_price: total_price,
                    ..ShopcartForm::default()
                },
            ),
            Self::Delete { id } => (Action::DeleteShopcart, by_id(id)),
            Self::List => (Action::ListShopcarts, ShopcartForm::default()),
            Self::Search { product_id, name } => (
                Action::SearchShopcarts,
                ShopcartForm {
                    shopcart_item_product_id: product_id,
                    shopcart_item_name: name,
                    ..ShopcartForm::default()
                },
            ),
            Self::Clear { id } => (Action::ClearShopcart, by_id(id)),
            Self::Checkout { id } => (Action::CheckoutShopcart, by_id(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_fills_id_and_price() {
        let (action, form) = ShopcartCommand::Update {
            id: "7".to_string(),
            total_price: "5.00".to_string(),
        }
        .into_form();

        assert_eq!(action, Action::UpdateShopcart);
        assert_eq!(form.shopcart_id, "7");
        assert_eq!(form.shopcart_total_price, "5.00");
    }

    #[test]
    fn test_search_fills_filters_only() {
        let (action, form) = ShopcartCommand::Search {
            product_id: String::new(),
            name: "apple".to_string(),
        }
        .into_form();

        assert_eq!(action, Action::SearchShopcarts);
        assert_eq!(form.shopcart_item_name, "apple");
        assert!(form.shopcart_id.is_empty());
    }
}
