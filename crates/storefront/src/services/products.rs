use tracing::instrument;

use shopverse_core::{Product, ProductId, ProductInput};

use crate::api::{ApiClient, MessageResponse};
use crate::error::Result;

/// `/products` resource.
#[derive(Clone, Copy)]
pub struct ProductService<'a> {
    api: &'a ApiClient,
}

impl<'a> ProductService<'a> {
    #[must_use]
    pub const fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// `GET /products`
    ///
    /// # Errors
    ///
    /// Returns the normalized API error.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>> {
        self.api.get(&["products"]).await
    }

    /// `GET /products/{id}`
    ///
    /// # Errors
    ///
    /// Returns the normalized API error.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get(&self, id: &ProductId) -> Result<Product> {
        self.api.get(&["products", id.as_str()]).await
    }

    /// `POST /products` with the full record.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: &ProductInput) -> Result<Product> {
        self.api.post(&["products"], input).await
    }

    /// `PUT /products/{id}` with the full record.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error.
    #[instrument(skip(self, input), fields(product_id = %id))]
    pub async fn update(&self, id: &ProductId, input: &ProductInput) -> Result<Product> {
        self.api.put(&["products", id.as_str()], input).await
    }

    /// `DELETE /products/{id}`
    ///
    /// # Errors
    ///
    /// Returns the normalized API error.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete(&self, id: &ProductId) -> Result<MessageResponse> {
        self.api.delete(&["products", id.as_str()]).await
    }
}
