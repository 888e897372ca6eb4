//! Error bodies returned by the shopcart service.

use serde::{Deserialize, Serialize};

/// Body of a failed request.
///
/// The service answers errors with `{"status": 404, "error": "Not Found",
/// "message": "..."}`. Every field is optional so that partial bodies from
/// proxies still decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerMessage {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ServerMessage {
    /// Build the body the service sends for a failed request.
    #[must_use]
    pub fn new(status: u16, error: &str, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            error: Some(error.to_owned()),
            message: Some(message.into()),
        }
    }
}
