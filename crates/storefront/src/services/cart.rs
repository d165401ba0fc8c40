use serde::Serialize;
use tracing::instrument;

use shopverse_core::{Cart, ProductId, UserId};

use crate::api::ApiClient;
use crate::error::Result;

#[derive(Serialize)]
struct AddToCartRequest<'a> {
    product_id: &'a ProductId,
    quantity: u32,
}

/// `/cart/{userId}` resource.
#[derive(Clone, Copy)]
pub struct CartService<'a> {
    api: &'a ApiClient,
}

impl<'a> CartService<'a> {
    #[must_use]
    pub const fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// `GET /cart/{userId}`. A user without a cart gets an empty one with
    /// no `id`.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn get(&self, user_id: &UserId) -> Result<Cart> {
        self.api.get(&["cart", user_id.as_str()]).await
    }

    /// `POST /cart/{userId}`. Adding a product already in the cart raises
    /// its quantity; the backend enforces stock.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error.
    #[instrument(skip(self), fields(user_id = %user_id, product_id = %product_id))]
    pub async fn add(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<Cart> {
        let body = AddToCartRequest {
            product_id,
            quantity,
        };
        self.api.post(&["cart", user_id.as_str()], &body).await
    }

    /// `DELETE /cart/{userId}/{productId}`
    ///
    /// # Errors
    ///
    /// Returns the normalized API error.
    #[instrument(skip(self), fields(user_id = %user_id, product_id = %product_id))]
    pub async fn remove(&self, user_id: &UserId, product_id: &ProductId) -> Result<()> {
        self.api
            .delete_unit(&["cart", user_id.as_str(), product_id.as_str()])
            .await
    }
}
