//! `shopcart item ...` subcommands.

use clap::{Args, Subcommand};
use shopcart_console::{
    action::Action,
    api::ShopcartApi,
    controller::Console,
    forms::{ItemForm, ShopcartForm},
};

/// Item fields sent on create/update. Omitted fields are sent as null.
#[derive(Args, Default)]
pub struct ItemFields {
    /// Product id
    #[arg(long, default_value = "")]
    product_id: String,
    /// Item name
    #[arg(long, default_value = "")]
    name: String,
    /// Unit price, e.g. 1.25
    #[arg(long, default_value = "")]
    price: String,
    /// Quantity
    #[arg(long, default_value = "")]
    quantity: String,
}

#[derive(Subcommand)]
pub enum ItemCommand {
    /// Add an item to a shopcart
    Create {
        /// Shopcart id
        shopcart_id: String,
        #[command(flatten)]
        fields: ItemFields,
    },
    /// Show one item
    Retrieve {
        /// Shopcart id
        shopcart_id: String,
        /// Item id
        item_id: String,
    },
    /// Replace an item
    Update {
        /// Shopcart id
        shopcart_id: String,
        /// Item id
        item_id: String,
        #[command(flatten)]
        fields: ItemFields,
    },
    /// Remove an item
    Delete {
        /// Shopcart id
        shopcart_id: String,
        /// Item id
        item_id: String,
    },
    /// List the items of a shopcart
    List {
        /// Shopcart id
        shopcart_id: String,
    },
    /// Find items of a shopcart by product id or name
    Search {
        /// Shopcart id
        shopcart_id: String,
        /// Product id
        #[arg(long, default_value = "")]
        product_id: String,
        /// Item name
        #[arg(long, default_value = "")]
        name: String,
    },
}

impl ItemCommand {
    /// Fill the item form and run the matching action.
    pub async fn run(self, api: &ShopcartApi) -> Console {
        let (action, form) = self.into_form();
        let mut console = Console::new(ShopcartForm::default(), form);
        console.dispatch(api, action).await;
        console
    }

    fn into_form(self) -> (Action, ItemForm) {
        let with_fields = |item_shopcart_id: String, item_id: String, fields: ItemFields| ItemForm {
            item_id,
            item_shopcart_id,
            item_product_id: fields.product_id,
            item_name: fields.name,
            item_price: fields.price,
            item_quantity: fields.quantity,
        };
        let by_id = |item_shopcart_id: String, item_id: String| ItemForm {
            item_id,
            item_shopcart_id,
            ..ItemForm::default()
        };

        match self {
            Self::Create {
                shopcart_id,
                fields,
            } => (
                Action::CreateItem,
                with_fields(shopcart_id, String::new(), fields),
            ),
            Self::Retrieve {
                shopcart_id,
                item_id,
            } => (Action::RetrieveItem, by_id(shopcart_id, item_id)),
            Self::Update {
                shopcart_id,
                item_id,
                fields,
            } => (Action::UpdateItem, with_fields(shopcart_id, item_id, fields)),
            Self::Delete {
                shopcart_id,
                item_id,
            } => (Action::DeleteItem, by_id(shopcart_id, item_id)),
            Self::List { shopcart_id } => (Action::ListItems, by_id(shopcart_id, String::new())),
            Self::Search {
                shopcart_id,
                product_id,
                name,
            } => (
                Action::SearchItems,
                with_fields(
                    shopcart_id,
                    String::new(),
                    ItemFields {
                        product_id,
                        name,
                        ..ItemFields::default()
                    },
                ),
            ),
        }
    }
}
