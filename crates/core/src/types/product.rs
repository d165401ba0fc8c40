//! Product catalogue types.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;
use super::status::StockStatus;

/// Image shown when a product has no usable image URL.
pub const DEFAULT_PRODUCT_IMAGE: &str = "/images/default-product.jpg";

/// A product as returned by `GET /products`.
///
/// Missing or `null` fields fall back to their defaults so that one malformed record
/// never breaks a whole listing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    #[serde(deserialize_with = "super::null_as_default")]
    pub id: ProductId,
    #[serde(deserialize_with = "super::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub price: Price,
    #[serde(deserialize_with = "super::null_as_default")]
    pub image_url: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub stock: u32,
}

impl Product {
    /// Returns `true` if at least one unit is available.
    #[must_use]
    pub const fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Stock bucket for display.
    #[must_use]
    pub const fn stock_status(&self) -> StockStatus {
        StockStatus::from_stock(self.stock)
    }

    /// The product image URL, or [`DEFAULT_PRODUCT_IMAGE`] when blank.
    #[must_use]
    pub fn image_or_default(&self) -> &str {
        if self.image_url.trim().is_empty() {
            DEFAULT_PRODUCT_IMAGE
        } else {
            &self.image_url
        }
    }

    /// Returns `true` if `term` appears in the name or description,
    /// ignoring case.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term) || self.description.to_lowercase().contains(&term)
    }
}

/// Full product record sent on create and update.
///
/// The admin form always round-trips every field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image_url: String,
    pub stock: u32,
}

impl From<&Product> for ProductInput {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
            stock: product.stock,
        }
    }
}

/// Stock counts across the catalogue for the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InventorySummary {
    pub total: usize,
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
}

impl InventorySummary {
    /// Tally products by stock bucket.
    ///
    /// `in_stock` counts every product with stock above zero, so low-stock
    /// products are included in it.
    #[must_use]
    pub fn from_products(products: &[Product]) -> Self {
        products.iter().fold(
            Self {
                total: products.len(),
                ..Self::default()
            },
            |mut summary, product| {
                match product.stock_status() {
                    StockStatus::OutOfStock => summary.out_of_stock += 1,
                    StockStatus::LowStock => {
                        summary.low_stock += 1;
                        summary.in_stock += 1;
                    }
                    StockStatus::InStock => summary.in_stock += 1,
                }
                summary
            },
        )
    }

    /// Share of products with stock, as a percentage in `0..=100`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Catalogue size will never exceed f64 precision
    pub fn in_stock_percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.in_stock as f64 / self.total as f64 * 100.0
    }
}
