//! Console actions, one per button.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Unknown action slug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown console action: {0}")]
pub struct ActionParseError(pub String);

/// Every button on the console page.
///
/// The slug (`Display`/`FromStr`) is the button id without its `-btn`
/// suffix, e.g. `shopcart-create` for `#shopcart-create-btn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    CreateShopcart,
    RetrieveShopcart,
    UpdateShopcart,
    DeleteShopcart,
    ListShopcarts,
    SearchShopcarts,
    ClearShopcart,
    CheckoutShopcart,
    ClearShopcartForm,
    CreateItem,
    RetrieveItem,
    UpdateItem,
    DeleteItem,
    ListItems,
    SearchItems,
    ClearItemForm,
}

impl Action {
    /// Shopcart panel buttons, in page order.
    pub const SHOPCART: [Self; 9] = [
        Self::CreateShopcart,
        Self::RetrieveShopcart,
        Self::UpdateShopcart,
        Self::DeleteShopcart,
        Self::ListShopcarts,
        Self::SearchShopcarts,
        Self::ClearShopcart,
        Self::CheckoutShopcart,
        Self::ClearShopcartForm,
    ];

    /// Item panel buttons, in page order.
    pub const ITEM: [Self; 7] = [
        Self::CreateItem,
        Self::RetrieveItem,
        Self::UpdateItem,
        Self::DeleteItem,
        Self::ListItems,
        Self::SearchItems,
        Self::ClearItemForm,
    ];

    /// Slug used in URLs and button ids.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::CreateShopcart => "shopcart-create",
            Self::RetrieveShopcart => "shopcart-retrieve",
            Self::UpdateShopcart => "shopcart-update",
            Self::DeleteShopcart => "shopcart-delete",
            Self::ListShopcarts => "shopcart-list",
            Self::SearchShopcarts => "shopcart-search",
            Self::ClearShopcart => "shopcart-clear",
            Self::CheckoutShopcart => "shopcart-checkout",
            Self::ClearShopcartForm => "shopcart-form-clear",
            Self::CreateItem => "item-create",
            Self::RetrieveItem => "item-retrieve",
            Self::UpdateItem => "item-update",
            Self::DeleteItem => "item-delete",
            Self::ListItems => "item-list",
            Self::SearchItems => "item-search",
            Self::ClearItemForm => "item-form-clear",
        }
    }

    /// Button text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CreateShopcart | Self::CreateItem => "Create",
            Self::RetrieveShopcart | Self::RetrieveItem => "Retrieve",
            Self::UpdateShopcart | Self::UpdateItem => "Update",
            Self::DeleteShopcart | Self::DeleteItem => "Delete",
            Self::ListShopcarts | Self::ListItems => "List",
            Self::SearchShopcarts | Self::SearchItems => "Search",
            Self::ClearShopcart => "Clear Cart",
            Self::CheckoutShopcart => "Checkout",
            Self::ClearShopcartForm | Self::ClearItemForm => "Clear Form",
        }
    }

    /// Id of the button element.
    #[must_use]
    pub fn button_id(self) -> String {
        format!("{}-btn", self.slug())
    }

    /// True for actions that only reset a form and send nothing.
    #[must_use]
    pub const fn is_local(self) -> bool {
        matches!(self, Self::ClearShopcartForm | Self::ClearItemForm)
    }

    /// True for destructive actions.
    #[must_use]
    pub const fn is_destructive(self) -> bool {
        matches!(
            self,
            Self::DeleteShopcart | Self::ClearShopcart | Self::DeleteItem
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let slug = s.trim().trim_end_matches("-btn");
        Self::SHOPCART
            .into_iter()
            .chain(Self::ITEM)
            .find(|action| action.slug() == slug)
            .ok_or_else(|| ActionParseError(s.to_string()))
    }
}
