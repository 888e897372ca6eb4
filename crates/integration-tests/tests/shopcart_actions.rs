//! Shopcart panel actions against the in-memory shopcart service.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::str::FromStr;

use rust_decimal::Decimal;
use shopcart_console::{
    action::Action,
    api::MISSING_QUERY,
    controller::{
        Console, SHOPCART_CHECKED_OUT, SHOPCART_CLEARED, SHOPCART_CREATED, SHOPCART_DELETED,
        SHOPCART_UPDATED, SUCCESS,
    },
    flash::FlashKind,
    forms::{ItemForm, ShopcartForm},
    render::ResultPanel,
};
use shopcart_integration_tests::FakeShopcartService;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn console_with(form: ShopcartForm) -> Console {
    Console::new(form, ItemForm::default())
}

fn by_id(id: impl ToString) -> ShopcartForm {
    ShopcartForm {
        shopcart_id: id.to_string(),
        ..ShopcartForm::default()
    }
}

#[tokio::test]
async fn test_create_shopcart_writes_id_back() {
    let service = FakeShopcartService::spawn().await;
    let mut console = console_with(ShopcartForm {
        shopcart_total_price: "19.99".to_string(),
        ..ShopcartForm::default()
    });

    console.dispatch(&service.api(), Action::CreateShopcart).await;

    assert_eq!(console.flash.text(), SHOPCART_CREATED);
    assert_eq!(console.shopcart_form.shopcart_id, "1");
    assert_eq!(console.results.row_count(), 1);
    let stored = service.shopcart(1.into()).unwrap();
    assert_eq!(stored.total_price, dec("19.99"));
}

#[tokio::test]
async fn test_create_shopcart_without_price_shows_server_message() {
    let service = FakeShopcartService::spawn().await;
    let mut console = Console::default();

    console.dispatch(&service.api(), Action::CreateShopcart).await;

    assert!(console.flash.is_error());
    assert_eq!(
        console.flash.text(),
        "Invalid Shopcart: body of request contained bad or no data \
         Invalid type for int/float [total_price]: <class 'NoneType'>"
    );
    assert!(console.results.is_empty());
}

#[tokio::test]
async fn test_retrieve_and_update_shopcart() {
    let service = FakeShopcartService::spawn().await;
    let cart = service.seed_shopcart(dec("5.00"));

    let mut console = console_with(by_id(cart.id));
    console.dispatch(&service.api(), Action::RetrieveShopcart).await;
    assert_eq!(console.flash.text(), SUCCESS);
    assert_eq!(console.shopcart_form.shopcart_total_price, "5");

    console.shopcart_form.shopcart_total_price = "12.50".to_string();
    console.dispatch(&service.api(), Action::UpdateShopcart).await;
    assert_eq!(console.flash.text(), SHOPCART_UPDATED);
    assert_eq!(service.shopcart(cart.id).unwrap().total_price, dec("12.5"));
}

#[tokio::test]
async fn test_retrieve_missing_shopcart_clears_form() {
    let service = FakeShopcartService::spawn().await;
    let mut console = console_with(ShopcartForm {
        shopcart_id: "42".to_string(),
        shopcart_total_price: "3.00".to_string(),
        ..ShopcartForm::default()
    });

    console.dispatch(&service.api(), Action::RetrieveShopcart).await;

    assert_eq!(console.flash.message().unwrap().kind, FlashKind::Error);
    assert_eq!(console.flash.text(), "Shopcart with id '42' was not found.");
    assert_eq!(console.shopcart_form, ShopcartForm::default());
}

#[tokio::test]
async fn test_delete_then_retrieve_fails() {
    let service = FakeShopcartService::spawn().await;
    let cart = service.seed_shopcart(dec("1.00"));
    let mut console = console_with(by_id(cart.id));

    console.dispatch(&service.api(), Action::DeleteShopcart).await;
    assert_eq!(console.flash.text(), SHOPCART_DELETED);
    assert_eq!(console.shopcart_form, ShopcartForm::default());

    console.shopcart_form.shopcart_id = cart.id.to_string();
    console.dispatch(&service.api(), Action::RetrieveShopcart).await;
    assert!(console.flash.is_error());
    assert!(service.shopcart(cart.id).is_none());
}

#[tokio::test]
async fn test_list_renders_one_row_per_item_or_empty_cart() {
    let service = FakeShopcartService::spawn().await;
    let first = service.seed_shopcart(dec("0"));
    let _ = service.seed_item(first.id, 10, "apple", dec("1.25"), 2);
    let _ = service.seed_item(first.id, 11, "pear", dec("2.00"), 1);
    let _ = service.seed_item(first.id, 12, "plum", dec("0.50"), 4);
    let _ = service.seed_shopcart(dec("0"));
    let third = service.seed_shopcart(dec("0"));
    let _ = service.seed_item(third.id, 10, "apple", dec("1.25"), 1);

    let mut console = Console::default();
    console.dispatch(&service.api(), Action::ListShopcarts).await;

    assert_eq!(console.flash.text(), SUCCESS);
    // 3 items + 1 empty cart + 1 item
    assert_eq!(console.results.row_count(), 5);

    let view = console.results.view().unwrap();
    let spans: Vec<_> = view.rows.iter().map(|row| row[0].rowspan).collect();
    assert_eq!(spans, vec![Some(3), None, None, Some(1), Some(1)]);
    // The empty cart's item cells are blank
    assert!(view.rows[3][2].text.is_empty());

    // First shopcart is written back into the form
    assert_eq!(console.shopcart_form.shopcart_id, first.id.to_string());
}

#[tokio::test]
async fn test_list_with_no_shopcarts_keeps_form() {
    let service = FakeShopcartService::spawn().await;
    let mut console = console_with(by_id("9"));

    console.dispatch(&service.api(), Action::ListShopcarts).await;

    assert_eq!(console.flash.text(), SUCCESS);
    assert_eq!(console.results, ResultPanel::Shopcarts(Vec::new()));
    assert_eq!(console.shopcart_form.shopcart_id, "9");
}

#[tokio::test]
async fn test_search_without_query_sends_no_request() {
    let service = FakeShopcartService::spawn().await;
    let mut console = Console::default();

    console.dispatch(&service.api(), Action::SearchShopcarts).await;

    assert_eq!(console.flash.message().unwrap().kind, FlashKind::Info);
    assert_eq!(console.flash.text(), MISSING_QUERY);
    assert_eq!(service.request_count(), 0);
}

#[tokio::test]
async fn test_search_by_item_name() {
    let service = FakeShopcartService::spawn().await;
    let with_apple = service.seed_shopcart(dec("0"));
    let _ = service.seed_item(with_apple.id, 10, "big apple", dec("1.00"), 1);
    let other = service.seed_shopcart(dec("0"));
    let _ = service.seed_item(other.id, 11, "pear", dec("1.00"), 1);

    let mut console = console_with(ShopcartForm {
        shopcart_item_name: "big apple".to_string(),
        ..ShopcartForm::default()
    });
    console.dispatch(&service.api(), Action::SearchShopcarts).await;

    assert_eq!(console.flash.text(), SUCCESS);
    assert_eq!(console.results.row_count(), 1);
    assert_eq!(console.shopcart_form.shopcart_id, with_apple.id.to_string());
    // Written back from the record, which carries no search filters
    assert!(console.shopcart_form.shopcart_item_name.is_empty());
    assert_eq!(service.request_count(), 1);
}

#[tokio::test]
async fn test_clear_cart_removes_items() {
    let service = FakeShopcartService::spawn().await;
    let cart = service.seed_shopcart(dec("0"));
    let _ = service.seed_item(cart.id, 10, "apple", dec("1.00"), 3);
    let mut console = console_with(by_id(cart.id));

    console.dispatch(&service.api(), Action::ClearShopcart).await;

    assert_eq!(console.flash.text(), SHOPCART_CLEARED);
    let stored = service.shopcart(cart.id).unwrap();
    assert!(stored.items.is_empty());
    assert_eq!(stored.total_price, Decimal::ZERO);
}

#[tokio::test]
async fn test_checkout_renders_receipt() {
    let service = FakeShopcartService::spawn().await;
    let cart = service.seed_shopcart(dec("19.99"));
    let mut console = console_with(by_id(cart.id));

    console.dispatch(&service.api(), Action::CheckoutShopcart).await;

    assert_eq!(console.flash.text(), SHOPCART_CHECKED_OUT);
    assert_eq!(
        console.results.cells(),
        vec![vec![cart.id.to_string(), "19.99".to_string()]]
    );
    assert_eq!(console.results.table().unwrap().columns.len(), 2);
}

#[tokio::test]
async fn test_checkout_unknown_shopcart() {
    let service = FakeShopcartService::spawn().await;
    let mut console = console_with(by_id("7"));

    console.dispatch(&service.api(), Action::CheckoutShopcart).await;

    assert_eq!(console.flash.text(), "Shopcart with id '7' was not found.");
    assert!(console.results.is_empty());
}
