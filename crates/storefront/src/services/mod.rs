//! Typed wrappers around each backend resource.
//!
//! Services hold a borrowed [`ApiClient`](crate::ApiClient) and do nothing
//! but map arguments to requests and responses to core types. Errors pass
//! through unchanged, already normalized by the client.
//!
//! # Services
//!
//! - `products` - Catalog reads and admin writes
//! - `cart` - Per-user cart
//! - `orders` - Order creation and history
//! - `payment` - Paying for an order
//! - `auth` - Login and registration

mod auth;
mod cart;
mod orders;
mod payment;
mod products;

pub use auth::AuthService;
pub use cart::CartService;
pub use orders::OrderService;
pub use payment::PaymentService;
pub use products::ProductService;
