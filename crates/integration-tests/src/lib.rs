//! Integration test support for the shopcart console.
//!
//! Spawns an in-memory fake of the shopcart REST service on an ephemeral
//! port, plus the console web server pointed at it. Both run inside the test
//! process, so the tests need no external services.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopcart-integration-tests
//! ```
//!
//! The fake mirrors the real service's routes and its error body
//! `{"status": 404, "error": "Not Found", "message": "..."}`, and counts
//! every request it receives.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use shopcart_console::{api::ShopcartApi, config::ConsoleConfig, routes, state::AppState};
use shopcart_core::{
    CheckoutReceipt, ItemId, ProductId, SearchQuery, ServerMessage, Shopcart, ShopcartId,
    ShopcartItem,
};
use tokio::net::TcpListener;
use url::Url;

// ============================================================================
// Fake service state
// ============================================================================

#[derive(Default)]
struct Store {
    carts: Mutex<Carts>,
    requests: AtomicUsize,
}

#[derive(Default)]
struct Carts {
    last_cart_id: i32,
    last_item_id: i32,
    by_id: BTreeMap<i32, Shopcart>,
}

impl Carts {
    fn get(&self, id: i32) -> Result<&Shopcart, FakeError> {
        self.by_id.get(&id).ok_or_else(|| shopcart_not_found(id))
    }

    fn get_mut(&mut self, id: i32) -> Result<&mut Shopcart, FakeError> {
        self.by_id.get_mut(&id).ok_or_else(|| shopcart_not_found(id))
    }

    fn insert_cart(&mut self, total_price: Decimal) -> Shopcart {
        self.last_cart_id += 1;
        let cart = Shopcart {
            id: ShopcartId::new(self.last_cart_id),
            total_price,
            items: Vec::new(),
        };
        self.by_id.insert(self.last_cart_id, cart.clone());
        cart
    }

    fn insert_item(&mut self, shopcart_id: i32, fields: ItemFields) -> Result<ShopcartItem, FakeError> {
        let next_id = self.last_item_id + 1;
        let cart = self.get_mut(shopcart_id)?;
        let item = fields.into_item(ItemId::new(next_id), cart.id);
        cart.items.push(item.clone());
        recalculate(cart);
        self.last_item_id = next_id;
        Ok(item)
    }
}

/// Total price follows the items once any item changes.
fn recalculate(cart: &mut Shopcart) {
    cart.total_price = cart
        .items
        .iter()
        .map(|item| item.price * Decimal::from(item.quantity))
        .sum();
}

/// Validated item fields from a request body.
struct ItemFields {
    product_id: Option<ProductId>,
    name: Option<String>,
    price: Decimal,
    quantity: i32,
}

impl ItemFields {
    fn into_item(self, id: ItemId, shopcart_id: ShopcartId) -> ShopcartItem {
        ShopcartItem {
            id,
            shopcart_id,
            product_id: self.product_id,
            name: self.name,
            price: self.price,
            quantity: self.quantity,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Error response in the service's `{status, error, message}` shape.
#[derive(Debug)]
struct FakeError {
    status: StatusCode,
    message: String,
}

impl FakeError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl IntoResponse for FakeError {
    fn into_response(self) -> Response {
        let body = ServerMessage::new(
            self.status.as_u16(),
            self.status.canonical_reason().unwrap_or("Error"),
            self.message,
        );
        (self.status, Json(body)).into_response()
    }
}

fn shopcart_not_found(id: i32) -> FakeError {
    FakeError::new(
        StatusCode::NOT_FOUND,
        format!("Shopcart with id '{id}' was not found."),
    )
}

fn item_not_found(shopcart_id: i32, item_id: i32) -> FakeError {
    FakeError::new(
        StatusCode::NOT_FOUND,
        format!("Item with id '{item_id}' was not found in Shopcart '{shopcart_id}'."),
    )
}

/// Path ids are integers; anything else matches no route.
fn path_id(raw: &str) -> Result<i32, FakeError> {
    raw.parse().map_err(|_| {
        FakeError::new(
            StatusCode::NOT_FOUND,
            "The requested URL was not found on the server.",
        )
    })
}

/// Python type name of a JSON value, as the service reports it.
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "<class 'NoneType'>",
        Value::Bool(_) => "<class 'bool'>",
        Value::Number(n) if n.is_i64() || n.is_u64() => "<class 'int'>",
        Value::Number(_) => "<class 'float'>",
        Value::String(_) => "<class 'str'>",
        Value::Array(_) => "<class 'list'>",
        Value::Object(_) => "<class 'dict'>",
    }
}

/// Body fields are required keys; only their types are checked.
struct RequestBody {
    entity: &'static str,
    fields: Map<String, Value>,
}

impl RequestBody {
    fn parse(entity: &'static str, raw: &[u8]) -> Result<Self, FakeError> {
        match serde_json::from_slice(raw) {
            Ok(Value::Object(fields)) => Ok(Self { entity, fields }),
            _ => Err(FakeError::bad_request(format!(
                "Invalid {entity}: body of request contained bad or no data"
            ))),
        }
    }

    fn field(&self, key: &str) -> Result<&Value, FakeError> {
        self.fields.get(key).ok_or_else(|| {
            FakeError::bad_request(format!("Invalid {}: missing {key}", self.entity))
        })
    }

    fn bad_data(&self, detail: &str) -> FakeError {
        FakeError::bad_request(format!(
            "Invalid {}: body of request contained bad or no data {detail}",
            self.entity
        ))
    }

    /// A JSON int or float, as a decimal.
    fn number(&self, key: &str) -> Result<Decimal, FakeError> {
        let value = self.field(key)?;
        value
            .as_f64()
            .and_then(|f| Decimal::from_str(&f.to_string()).ok())
            .ok_or_else(|| {
                self.bad_data(&format!(
                    "Invalid type for int/float [{key}]: {}",
                    type_name(value)
                ))
            })
    }

    /// A JSON int.
    fn int(&self, key: &str) -> Result<i32, FakeError> {
        let value = self.field(key)?;
        value
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| {
                self.bad_data(&format!("Invalid type for int [{key}]: {}", type_name(value)))
            })
    }

    /// Any value; `null` and non-matching types are stored as absent.
    fn optional<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, FakeError> {
        let value = self.field(key)?;
        Ok(serde_json::from_value(value.clone()).ok())
    }
}

fn parse_shopcart(raw: &[u8]) -> Result<Decimal, FakeError> {
    let body = RequestBody::parse("Shopcart", raw)?;
    let total_price = body.number("total_price")?;
    if total_price.is_sign_negative() {
        return Err(body.bad_data(&format!(
            "Invalid value for [total_price], must be non-negative: {total_price}"
        )));
    }
    Ok(total_price)
}

fn parse_item(raw: &[u8]) -> Result<ItemFields, FakeError> {
    let body = RequestBody::parse("ShopcartItem", raw)?;
    body.field("shopcart_id")?;
    let name = body.optional("name")?;
    let product_id = body.optional("product_id")?;
    let quantity = body.int("quantity")?;
    let price = body.number("price")?;

    Ok(ItemFields {
        product_id,
        name,
        price,
        quantity,
    })
}

fn matches(item: &ShopcartItem, query: &SearchQuery) -> bool {
    query
        .product_id
        .as_deref()
        .is_none_or(|p| p.trim() == item.product_id_text())
        && query
            .name
            .as_deref()
            .is_none_or(|n| item.name.as_deref() == Some(n))
}

// ============================================================================
// Handlers
// ============================================================================

type Shared = State<Arc<Store>>;

fn lock(store: &Store) -> MutexGuard<'_, Carts> {
    store.carts.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn count_requests(State(store): Shared, request: Request, next: Next) -> Response {
    store.requests.fetch_add(1, Ordering::SeqCst);
    next.run(request).await
}

async fn list_shopcarts(
    State(store): Shared,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Shopcart>> {
    let query = query.normalized();
    let carts = lock(&store);
    let found = carts
        .by_id
        .values()
        .filter(|cart| query.is_empty() || cart.items.iter().any(|item| matches(item, &query)))
        .cloned()
        .collect();
    Json(found)
}

async fn create_shopcart(
    State(store): Shared,
    body: Bytes,
) -> Result<(StatusCode, Json<Shopcart>), FakeError> {
    let total_price = parse_shopcart(&body)?;
    let cart = lock(&store).insert_cart(total_price);
    Ok((StatusCode::CREATED, Json(cart)))
}

async fn get_shopcart(
    State(store): Shared,
    Path(id): Path<String>,
) -> Result<Json<Shopcart>, FakeError> {
    let id = path_id(&id)?;
    Ok(Json(lock(&store).get(id)?.clone()))
}

async fn update_shopcart(
    State(store): Shared,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Shopcart>, FakeError> {
    let id = path_id(&id)?;
    let mut carts = lock(&store);
    let cart = carts.get_mut(id)?;
    cart.total_price = parse_shopcart(&body)?;
    Ok(Json(cart.clone()))
}

async fn delete_shopcart(
    State(store): Shared,
    Path(id): Path<String>,
) -> Result<StatusCode, FakeError> {
    let id = path_id(&id)?;
    lock(&store).by_id.remove(&id);
    Ok(StatusCode::NO_CONTENT)
}

async fn checkout(
    State(store): Shared,
    Path(id): Path<String>,
) -> Result<Json<CheckoutReceipt>, FakeError> {
    let id = path_id(&id)?;
    let carts = lock(&store);
    let cart = carts.get(id)?;
    Ok(Json(CheckoutReceipt {
        id: cart.id,
        total_price: cart.total_price,
    }))
}

async fn list_items(
    State(store): Shared,
    Path(id): Path<String>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ShopcartItem>>, FakeError> {
    let id = path_id(&id)?;
    let query = query.normalized();
    let carts = lock(&store);
    let found = carts
        .get(id)?
        .items
        .iter()
        .filter(|item| query.is_empty() || matches(item, &query))
        .cloned()
        .collect();
    Ok(Json(found))
}

async fn create_item(
    State(store): Shared,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<ShopcartItem>), FakeError> {
    let id = path_id(&id)?;
    let fields = parse_item(&body)?;
    let item = lock(&store).insert_item(id, fields)?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn clear_items(
    State(store): Shared,
    Path(id): Path<String>,
) -> Result<StatusCode, FakeError> {
    let id = path_id(&id)?;
    let mut carts = lock(&store);
    let cart = carts.get_mut(id)?;
    cart.items.clear();
    recalculate(cart);
    Ok(StatusCode::NO_CONTENT)
}

async fn get_item(
    State(store): Shared,
    Path((id, item_id)): Path<(String, String)>,
) -> Result<Json<ShopcartItem>, FakeError> {
    let (id, item_id) = (path_id(&id)?, path_id(&item_id)?);
    let carts = lock(&store);
    carts
        .get(id)?
        .items
        .iter()
        .find(|item| item.id.as_i32() == item_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| item_not_found(id, item_id))
}

async fn update_item(
    State(store): Shared,
    Path((id, item_id)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<ShopcartItem>, FakeError> {
    let (id, item_id) = (path_id(&id)?, path_id(&item_id)?);
    let fields = parse_item(&body)?;
    let mut carts = lock(&store);
    let cart = carts.get_mut(id)?;
    let slot = cart
        .items
        .iter_mut()
        .find(|item| item.id.as_i32() == item_id)
        .ok_or_else(|| item_not_found(id, item_id))?;
    *slot = fields.into_item(slot.id, slot.shopcart_id);
    let item = slot.clone();
    recalculate(cart);
    Ok(Json(item))
}

async fn delete_item(
    State(store): Shared,
    Path((id, item_id)): Path<(String, String)>,
) -> Result<StatusCode, FakeError> {
    let (id, item_id) = (path_id(&id)?, path_id(&item_id)?);
    let mut carts = lock(&store);
    let cart = carts.get_mut(id)?;
    cart.items.retain(|item| item.id.as_i32() != item_id);
    recalculate(cart);
    Ok(StatusCode::NO_CONTENT)
}

fn service_router(store: Arc<Store>) -> Router {
    Router::new()
        .route("/api/shopcarts", get(list_shopcarts).post(create_shopcart))
        .route(
            "/api/shopcarts/{id}",
            get(get_shopcart).put(update_shopcart).delete(delete_shopcart),
        )
        .route("/api/shopcarts/{id}/checkout", get(checkout))
        .route(
            "/api/shopcarts/{id}/items",
            get(list_items).post(create_item).delete(clear_items),
        )
        .route(
            "/api/shopcarts/{id}/items/{item_id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .layer(middleware::from_fn_with_state(store.clone(), count_requests))
        .with_state(store)
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap_or_else(|e| panic!("Failed to bind test listener: {e}"));
    let addr = listener
        .local_addr()
        .unwrap_or_else(|e| panic!("Failed to read test listener address: {e}"));

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "test server stopped");
        }
    });

    addr
}

fn http_url(addr: SocketAddr) -> Url {
    Url::parse(&format!("http://{addr}"))
        .unwrap_or_else(|e| panic!("Invalid test server address {addr}: {e}"))
}

// ============================================================================
// Public test helpers
// ============================================================================

/// A running in-memory shopcart service.
pub struct FakeShopcartService {
    addr: SocketAddr,
    store: Arc<Store>,
}

impl FakeShopcartService {
    /// Start the service on an ephemeral localhost port.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn spawn() -> Self {
        let store = Arc::new(Store::default());
        let addr = serve(service_router(store.clone())).await;
        Self { addr, store }
    }

    /// Base URL to hand to the console.
    #[must_use]
    pub fn base_url(&self) -> Url {
        http_url(self.addr)
    }

    /// API client pointed at this service.
    #[must_use]
    pub fn api(&self) -> ShopcartApi {
        ShopcartApi::new(self.base_url())
            .unwrap_or_else(|e| panic!("Failed to build API client: {e}"))
    }

    /// Number of requests received so far.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.store.requests.load(Ordering::SeqCst)
    }

    /// Insert a shopcart directly, without counting a request.
    #[must_use]
    pub fn seed_shopcart(&self, total_price: Decimal) -> Shopcart {
        lock(&self.store).insert_cart(total_price)
    }

    /// Insert an item directly, without counting a request.
    ///
    /// # Panics
    ///
    /// Panics if the shopcart does not exist.
    #[must_use]
    pub fn seed_item(
        &self,
        shopcart_id: ShopcartId,
        product_id: i32,
        name: &str,
        price: Decimal,
        quantity: i32,
    ) -> ShopcartItem {
        self.insert_seed(
            shopcart_id,
            ItemFields {
                product_id: Some(ProductId::new(product_id)),
                name: Some(name.to_string()),
                price,
                quantity,
            },
        )
    }

    /// Insert an item stored with `null` product id and name.
    ///
    /// # Panics
    ///
    /// Panics if the shopcart does not exist.
    #[must_use]
    pub fn seed_unnamed_item(
        &self,
        shopcart_id: ShopcartId,
        price: Decimal,
        quantity: i32,
    ) -> ShopcartItem {
        self.insert_seed(
            shopcart_id,
            ItemFields {
                product_id: None,
                name: None,
                price,
                quantity,
            },
        )
    }

    fn insert_seed(&self, shopcart_id: ShopcartId, fields: ItemFields) -> ShopcartItem {
        lock(&self.store)
            .insert_item(shopcart_id.as_i32(), fields)
            .unwrap_or_else(|e| panic!("Failed to seed item: {}", e.message))
    }

    /// Current state of a shopcart, if it exists.
    #[must_use]
    pub fn shopcart(&self, id: ShopcartId) -> Option<Shopcart> {
        lock(&self.store).by_id.get(&id.as_i32()).cloned()
    }
}

/// Start the console web server against the given service.
///
/// Returns the console's base URL.
///
/// # Panics
///
/// Panics if no local port can be bound.
pub async fn spawn_console(api_url: Url) -> Url {
    let state = AppState::new(ConsoleConfig::for_api(api_url))
        .unwrap_or_else(|e| panic!("Failed to build console state: {e}"));
    let addr = serve(routes::routes().with_state(state)).await;
    http_url(addr)
}
