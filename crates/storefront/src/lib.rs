//! Shopverse Storefront library.
//!
//! Everything between the view layer and the REST backend:
//!
//! - [`config`] - Environment configuration
//! - [`error`] - The user-facing error taxonomy and Sentry reporting
//! - [`api`] - The single HTTP gateway and its error normalization
//! - [`services`] - One typed wrapper per backend resource
//! - [`session`] - The locally persisted login session
//! - [`state`] - The [`Storefront`] context tying the above together
//! - [`search`] - Debounced product search
//! - [`image`] - Loading product images from disk
//!
//! Validation and formatting live in `shopverse-core`; this crate only
//! calls them before touching the network.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod image;
pub mod search;
pub mod services;
pub mod session;
pub mod state;

pub use api::ApiClient;
pub use config::StorefrontConfig;
pub use error::{AppError, Result};
pub use session::{FileStorage, MemoryStorage, SessionStorage, SessionStore};
pub use state::{CheckoutReceipt, Storefront};
