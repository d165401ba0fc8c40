use serde::Serialize;
use tracing::instrument;

use shopverse_core::{CartId, Order, UserId};

use crate::api::ApiClient;
use crate::error::Result;

#[derive(Serialize)]
struct CreateOrderRequest<'a> {
    cart_id: &'a CartId,
}

/// `/orders` resource.
#[derive(Clone, Copy)]
pub struct OrderService<'a> {
    api: &'a ApiClient,
}

impl<'a> OrderService<'a> {
    #[must_use]
    pub const fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// `POST /orders`. The backend turns the whole cart into an order and
    /// empties it.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error.
    #[instrument(skip(self), fields(cart_id = %cart_id))]
    pub async fn create(&self, cart_id: &CartId) -> Result<Order> {
        self.api
            .post(&["orders"], &CreateOrderRequest { cart_id })
            .await
    }

    /// `GET /orders/{userId}`
    ///
    /// # Errors
    ///
    /// Returns the normalized API error.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Order>> {
        self.api.get(&["orders", user_id.as_str()]).await
    }
}
