//! Cart projection fetched from `GET /cart/{userId}`.
//!
//! Carts are never cached client-side and totals are always recomputed
//! from the items, never stored.

use serde::{Deserialize, Serialize};

use super::id::{CartId, UserId};
use super::price::Price;
use super::product::Product;

/// A user's cart.
///
/// `id` is `None` when the user has never added anything.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Cart {
    pub id: Option<CartId>,
    pub user: Option<UserId>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Returns `true` if the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of `price * quantity` over all items.
    #[must_use]
    pub fn total(&self) -> Price {
        crate::format::calculate_cart_total(&self.items)
    }

    /// Sum of item quantities.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        crate::format::calculate_cart_items_count(&self.items)
    }
}

/// One line in a cart.
///
/// Both fields are optional on the wire: a line whose product reference
/// broke on the backend still deserializes and simply contributes zero.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CartItem {
    pub product: Option<Product>,
    pub quantity: Option<u32>,
}

impl CartItem {
    /// Line subtotal, treating a missing product or quantity as zero.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        let price = self.product.as_ref().map_or(Price::ZERO, |p| p.price);
        price * self.quantity.unwrap_or(0)
    }
}
