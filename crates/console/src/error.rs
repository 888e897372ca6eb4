//! Unified error handling for the console server.
//!
//! Failures of the shopcart service are not errors here: they are rendered
//! into the flash area. `AppError` covers requests the console itself cannot
//! serve.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::action::ActionParseError;

/// Application-level error type for the console.
#[derive(Debug, Error)]
pub enum AppError {
    /// Posted to an action that does not exist.
    #[error("Not found: {0}")]
    UnknownAction(#[from] ActionParseError),

    /// Page template failed to render.
    #[error("Template error: {0}")]
    Render(#[from] askama::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Render(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Console request error"
            );
        }

        let (status, message) = match &self {
            Self::UnknownAction(_) => (StatusCode::NOT_FOUND, self.to_string()),
            // Don't expose internal error details to clients
            Self::Render(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::from(ActionParseError("shopcart-explode".to_string()));
        assert_eq!(
            err.to_string(),
            "Not found: Unknown console action: shopcart-explode"
        );
    }

    #[test]
    fn test_app_error_status_codes() {
        let response = AppError::from(ActionParseError("nope".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
