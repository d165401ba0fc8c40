//! Core types for Shopverse.
//!
//! This module provides type-safe wrappers for the storefront's domain
//! concepts. Every entity is a transient projection of a backend response.

pub mod cart;
pub mod email;
pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod session;
pub mod status;

pub use cart::{Cart, CartItem};
pub use email::{Email, EmailError, is_valid_email, validate_email};
pub use id::*;
pub use order::{Order, OrderItem, Payment};
pub use price::{CURRENCY_SYMBOL, Price};
pub use product::{DEFAULT_PRODUCT_IMAGE, InventorySummary, Product, ProductInput};
pub use session::{ADMIN_ROLE, Role, RoleNames, Session};
pub use status::*;

use serde::{Deserialize, Deserializer};

/// Deserialize a field, reading an explicit `null` as the type's default.
///
/// Pairs with `#[serde(default)]`, which only covers absent keys.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
