//! Shopcart item endpoints, nested under `/api/shopcarts/{id}/items`.

use shopcart_core::{ItemPayload, SearchQuery, ShopcartItem};
use tracing::instrument;

use super::{ApiError, ShopcartApi};

impl ShopcartApi {
    /// Add an item to a shopcart.
    ///
    /// # Errors
    ///
    /// Returns the service's rejection or a transport failure.
    #[instrument(skip(self))]
    pub async fn create_item(
        &self,
        shopcart_id: &str,
        payload: &ItemPayload,
    ) -> Result<ShopcartItem, ApiError> {
        let url = self.endpoint(&[shopcart_id, "items"]);
        Self::send_json(self.client().post(url).json(payload)).await
    }

    /// Retrieve one item of a shopcart.
    ///
    /// # Errors
    ///
    /// Returns the service's rejection or a transport failure.
    #[instrument(skip(self))]
    pub async fn get_item(&self, shopcart_id: &str, item_id: &str) -> Result<ShopcartItem, ApiError> {
        let url = self.endpoint(&[shopcart_id, "items", item_id]);
        Self::send_json(self.client().get(url)).await
    }

    /// Update one item of a shopcart.
    ///
    /// # Errors
    ///
    /// Returns the service's rejection or a transport failure.
    #[instrument(skip(self))]
    pub async fn update_item(
        &self,
        shopcart_id: &str,
        item_id: &str,
        payload: &ItemPayload,
    ) -> Result<ShopcartItem, ApiError> {
        let url = self.endpoint(&[shopcart_id, "items", item_id]);
        Self::send_json(self.client().put(url).json(payload)).await
    }

    /// Delete one item of a shopcart.
    ///
    /// # Errors
    ///
    /// Returns the service's rejection or a transport failure.
    #[instrument(skip(self))]
    pub async fn delete_item(&self, shopcart_id: &str, item_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&[shopcart_id, "items", item_id]);
        Self::send_empty(self.client().delete(url)).await
    }

    /// List the items of a shopcart.
    ///
    /// # Errors
    ///
    /// Returns the service's rejection or a transport failure.
    #[instrument(skip(self))]
    pub async fn list_items(&self, shopcart_id: &str) -> Result<Vec<ShopcartItem>, ApiError> {
        let url = self.endpoint(&[shopcart_id, "items"]);
        Self::send_json(self.client().get(url)).await
    }

    /// Search the items of a shopcart by product id and/or name.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::MissingQuery` without sending anything when the
    /// query is empty; otherwise the service's rejection or a transport
    /// failure.
    #[instrument(skip(self))]
    pub async fn search_items(
        &self,
        shopcart_id: &str,
        query: &SearchQuery,
    ) -> Result<Vec<ShopcartItem>, ApiError> {
        if query.is_empty() {
            return Err(ApiError::MissingQuery);
        }
        let url = self.endpoint_with_query(&[shopcart_id, "items"], &query.pairs());
        Self::send_json(self.client().get(url)).await
    }
}
