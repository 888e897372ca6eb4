//! HTTP route handlers for the console.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /                       - Console page with empty forms
//! POST /actions/{action}       - Run one action against the submitted forms
//! ```
//!
//! `{action}` is a button slug such as `shopcart-create` or `item-search`.

pub mod console;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Build the console router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/", get(console::index))
        .route("/actions/{action}", post(console::perform))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the shopcart service.
async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use tower::ServiceExt;
    use url::Url;

    use super::*;
    use crate::config::ConsoleConfig;

    fn app() -> Router {
        let config = ConsoleConfig::for_api(Url::parse("http://127.0.0.1:9").unwrap());
        routes().with_state(AppState::new(config).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_action_is_not_found() {
        let request = Request::post("/actions/shopcart-explode")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("shopcart_id=1"))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_local_action_renders_without_service() {
        let request = Request::post("/actions/shopcart-form-clear")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("shopcart_id=7&item_name=apple"))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
