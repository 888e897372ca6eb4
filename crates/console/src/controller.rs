//! The console view-model and its action dispatcher.
//!
//! A [`Console`] owns both forms, the flash slot and the result panel. Each
//! call to [`Console::dispatch`] performs one action end to end: clear the
//! flash, read a form, send at most one request, then render the response
//! and write the form back, or flash the failure. Nothing is retried.

use shopcart_core::{Shopcart, ShopcartItem};
use tracing::instrument;

use crate::action::Action;
use crate::api::{ApiError, ShopcartApi};
use crate::flash::Flash;
use crate::forms::{ItemForm, ShopcartForm};
use crate::render::ResultPanel;

pub const SHOPCART_CREATED: &str = "Shopcart has been Created!";
pub const SHOPCART_UPDATED: &str = "Shopcart has been Updated!";
pub const SHOPCART_DELETED: &str = "Shopcart has been Deleted!";
pub const SHOPCART_CLEARED: &str = "Shopcart has been Cleared!";
pub const SHOPCART_CHECKED_OUT: &str = "Shopcart has been Checked Out!";
pub const ITEM_CREATED: &str = "Item has been Created!";
pub const ITEM_UPDATED: &str = "Item has been Updated!";
pub const ITEM_DELETED: &str = "Item has been Deleted!";
pub const SUCCESS: &str = "Success";

/// Console state for one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Console {
    pub shopcart_form: ShopcartForm,
    pub item_form: ItemForm,
    pub flash: Flash,
    pub results: ResultPanel,
}

impl Console {
    /// Console with the given form contents, an empty flash and no results.
    #[must_use]
    pub fn new(shopcart_form: ShopcartForm, item_form: ItemForm) -> Self {
        Self {
            shopcart_form,
            item_form,
            ..Self::default()
        }
    }

    /// Perform one action.
    ///
    /// Always leaves exactly one flash message, except for the form-clearing
    /// actions which leave the flash empty.
    #[instrument(skip_all, fields(action = %action))]
    pub async fn dispatch(&mut self, api: &ShopcartApi, action: Action) {
        self.flash.clear();

        match self.run(api, action).await {
            Ok(()) => tracing::info!("console action succeeded"),
            Err(ApiError::MissingQuery) => {
                tracing::info!("search without query, nothing sent");
                self.flash.info(ApiError::MissingQuery.flash_text());
            }
            Err(error) => {
                tracing::warn!(
                    status = ?error.status(),
                    error = %error,
                    "console action failed"
                );
                match action {
                    Action::RetrieveShopcart => self.shopcart_form.clear(),
                    Action::RetrieveItem => self.item_form.clear(),
                    _ => {}
                }
                self.flash.error(error.flash_text());
            }
        }
    }

    async fn run(&mut self, api: &ShopcartApi, action: Action) -> Result<(), ApiError> {
        match action {
            Action::CreateShopcart => {
                let cart = api.create_shopcart(&self.shopcart_form.read()).await?;
                self.show_shopcart(&cart);
                self.flash.success(SHOPCART_CREATED);
            }
            Action::RetrieveShopcart => {
                let cart = api.get_shopcart(self.shopcart_form.id()).await?;
                self.show_shopcart(&cart);
                self.flash.success(SUCCESS);
            }
            Action::UpdateShopcart => {
                let cart = api
                    .update_shopcart(self.shopcart_form.id(), &self.shopcart_form.read())
                    .await?;
                self.show_shopcart(&cart);
                self.flash.success(SHOPCART_UPDATED);
            }
            Action::DeleteShopcart => {
                api.delete_shopcart(self.shopcart_form.id()).await?;
                self.shopcart_form.clear();
                self.flash.success(SHOPCART_DELETED);
            }
            Action::ListShopcarts => {
                let carts = api.list_shopcarts().await?;
                self.show_shopcarts(&carts);
                self.flash.success(SUCCESS);
            }
            Action::SearchShopcarts => {
                let carts = api
                    .search_shopcarts(&self.shopcart_form.search_query())
                    .await?;
                self.show_shopcarts(&carts);
                self.flash.success(SUCCESS);
            }
            Action::ClearShopcart => {
                api.clear_shopcart(self.shopcart_form.id()).await?;
                self.flash.success(SHOPCART_CLEARED);
            }
            Action::CheckoutShopcart => {
                let receipt = api.checkout(self.shopcart_form.id()).await?;
                self.results = ResultPanel::checkout(&receipt);
                self.shopcart_form.write_receipt(&receipt);
                self.flash.success(SHOPCART_CHECKED_OUT);
            }
            Action::ClearShopcartForm => self.shopcart_form.clear(),
            Action::CreateItem => {
                let item = api
                    .create_item(self.item_form.shopcart_id(), &self.item_form.read())
                    .await?;
                self.show_item(&item);
                self.flash.success(ITEM_CREATED);
            }
            Action::RetrieveItem => {
                let item = api
                    .get_item(self.item_form.shopcart_id(), self.item_form.id())
                    .await?;
                self.show_item(&item);
                self.flash.success(SUCCESS);
            }
            Action::UpdateItem => {
                let item = api
                    .update_item(
                        self.item_form.shopcart_id(),
                        self.item_form.id(),
                        &self.item_form.read(),
                    )
                    .await?;
                self.show_item(&item);
                self.flash.success(ITEM_UPDATED);
            }
            Action::DeleteItem => {
                api.delete_item(self.item_form.shopcart_id(), self.item_form.id())
                    .await?;
                self.item_form.clear();
                self.flash.success(ITEM_DELETED);
            }
            Action::ListItems => {
                let items = api.list_items(self.item_form.shopcart_id()).await?;
                self.show_items(&items);
                self.flash.success(SUCCESS);
            }
            Action::SearchItems => {
                let items = api
                    .search_items(self.item_form.shopcart_id(), &self.item_form.search_query())
                    .await?;
                self.show_items(&items);
                self.flash.success(SUCCESS);
            }
            Action::ClearItemForm => self.item_form.clear(),
        }
        Ok(())
    }

    fn show_shopcart(&mut self, cart: &Shopcart) {
        self.results = ResultPanel::shopcarts(std::slice::from_ref(cart));
        self.shopcart_form.write(cart);
    }

    fn show_shopcarts(&mut self, carts: &[Shopcart]) {
        self.results = ResultPanel::shopcarts(carts);
        if let Some(first) = carts.first() {
            self.shopcart_form.write(first);
        }
    }

    fn show_item(&mut self, item: &ShopcartItem) {
        self.results = ResultPanel::items(std::slice::from_ref(item));
        self.item_form.write(item);
    }

    fn show_items(&mut self, items: &[ShopcartItem]) {
        self.results = ResultPanel::items(items);
        if let Some(first) = items.first() {
            self.item_form.write(first);
        }
    }
}
