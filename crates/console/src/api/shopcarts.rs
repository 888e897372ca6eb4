//! Shopcart endpoints.

use shopcart_core::{CheckoutReceipt, SearchQuery, Shopcart, ShopcartPayload};
use tracing::instrument;

use super::{ApiError, ShopcartApi};

impl ShopcartApi {
    /// Create a shopcart (`POST /api/shopcarts`).
    ///
    /// # Errors
    ///
    /// Returns the service's rejection or a transport failure.
    #[instrument(skip(self))]
    pub async fn create_shopcart(&self, payload: &ShopcartPayload) -> Result<Shopcart, ApiError> {
        let url = self.endpoint(&[]);
        Self::send_json(self.client().post(url).json(payload)).await
    }

    /// Retrieve a shopcart (`GET /api/shopcarts/{id}`).
    ///
    /// # Errors
    ///
    /// Returns the service's rejection or a transport failure.
    #[instrument(skip(self))]
    pub async fn get_shopcart(&self, shopcart_id: &str) -> Result<Shopcart, ApiError> {
        let url = self.endpoint(&[shopcart_id]);
        Self::send_json(self.client().get(url)).await
    }

    /// Update a shopcart (`PUT /api/shopcarts/{id}`).
    ///
    /// # Errors
    ///
    /// Returns the service's rejection or a transport failure.
    #[instrument(skip(self))]
    pub async fn update_shopcart(
        &self,
        shopcart_id: &str,
        payload: &ShopcartPayload,
    ) -> Result<Shopcart, ApiError> {
        let url = self.endpoint(&[shopcart_id]);
        Self::send_json(self.client().put(url).json(payload)).await
    }

    /// Delete a shopcart (`DELETE /api/shopcarts/{id}`).
    ///
    /// # Errors
    ///
    /// Returns the service's rejection or a transport failure.
    #[instrument(skip(self))]
    pub async fn delete_shopcart(&self, shopcart_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&[shopcart_id]);
        Self::send_empty(self.client().delete(url)).await
    }

    /// List every shopcart (`GET /api/shopcarts`).
    ///
    /// # Errors
    ///
    /// Returns the service's rejection or a transport failure.
    #[instrument(skip(self))]
    pub async fn list_shopcarts(&self) -> Result<Vec<Shopcart>, ApiError> {
        let url = self.endpoint(&[]);
        Self::send_json(self.client().get(url)).await
    }

    /// Search shopcarts by item product id and/or name.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::MissingQuery` without sending anything when the
    /// query is empty; otherwise the service's rejection or a transport
    /// failure.
    #[instrument(skip(self))]
    pub async fn search_shopcarts(&self, query: &SearchQuery) -> Result<Vec<Shopcart>, ApiError> {
        if query.is_empty() {
            return Err(ApiError::MissingQuery);
        }
        let url = self.endpoint_with_query(&[], &query.pairs());
        Self::send_json(self.client().get(url)).await
    }

    /// Remove every item from a shopcart (`DELETE /api/shopcarts/{id}/items`).
    ///
    /// # Errors
    ///
    /// Returns the service's rejection or a transport failure.
    #[instrument(skip(self))]
    pub async fn clear_shopcart(&self, shopcart_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&[shopcart_id, "items"]);
        Self::send_empty(self.client().delete(url)).await
    }

    /// Check out a shopcart (`GET /api/shopcarts/{id}/checkout`).
    ///
    /// # Errors
    ///
    /// Returns the service's rejection or a transport failure.
    #[instrument(skip(self))]
    pub async fn checkout(&self, shopcart_id: &str) -> Result<CheckoutReceipt, ApiError> {
        let url = self.endpoint(&[shopcart_id, "checkout"]);
        Self::send_json(self.client().get(url)).await
    }
}
