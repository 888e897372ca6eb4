//! Application state shared across handlers.

use std::sync::Arc;

use crate::api::{ApiError, ShopcartApi};
use crate::config::ConsoleConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Holds nothing mutable: every request builds
/// its own console view-model from the submitted form.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ConsoleConfig,
    api: ShopcartApi,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the shopcart API client cannot be built.
    pub fn new(config: ConsoleConfig) -> Result<Self, ApiError> {
        let api = ShopcartApi::new(config.api_url.clone())?;

        Ok(Self {
            inner: Arc::new(AppStateInner { config, api }),
        })
    }

    /// Get a reference to the console configuration.
    #[must_use]
    pub fn config(&self) -> &ConsoleConfig {
        &self.inner.config
    }

    /// Get a reference to the shopcart API client.
    #[must_use]
    pub fn api(&self) -> &ShopcartApi {
        &self.inner.api
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::parse_api_url;

    #[test]
    fn test_state_shares_config_and_client() {
        let url = parse_api_url("http://shopcarts.internal:8080/").unwrap();
        let state = AppState::new(ConsoleConfig::for_api(url.clone())).unwrap();
        let clone = state.clone();

        assert_eq!(clone.config().socket_addr().to_string(), "127.0.0.1:3001");
        assert_eq!(clone.api().base_url(), &url);
        assert_eq!(
            clone.api().endpoint(&["1"]).as_str(),
            "http://shopcarts.internal:8080/api/shopcarts/1"
        );
    }
}
