//! Orders and payments.
//!
//! Both are immutable from the client's point of view once created.

use serde::{Deserialize, Serialize};

use super::id::{OrderId, PaymentId, UserId};
use super::price::Price;
use super::product::Product;
use super::status::OrderStatus;

/// An order as returned by `POST /orders` and `GET /orders/{userId}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Order {
    #[serde(deserialize_with = "super::null_as_default")]
    pub id: OrderId,
    pub user: Option<UserId>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub items: Vec<OrderItem>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub total_amount: Price,
    #[serde(deserialize_with = "super::null_as_default")]
    pub status: OrderStatus,
}

impl Order {
    /// Sum of item quantities.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

/// One line of an order, priced at the time the order was placed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderItem {
    pub product: Option<Product>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub quantity: u32,
    #[serde(deserialize_with = "super::null_as_default")]
    pub price: Price,
    #[serde(deserialize_with = "super::null_as_default")]
    pub subtotal: Price,
}

/// Payment record returned by `POST /payment`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Payment {
    #[serde(deserialize_with = "super::null_as_default")]
    pub id: PaymentId,
    #[serde(deserialize_with = "super::null_as_default")]
    pub order: OrderId,
    #[serde(deserialize_with = "super::null_as_default")]
    pub amount: Price,
    #[serde(deserialize_with = "super::null_as_default")]
    pub payment_method: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub status: String,
}
