//! Shopverse Core - Shared types library.
//!
//! This crate provides the client-side domain layer used by every Shopverse
//! component:
//! - `storefront` - API client, domain services and session store
//! - `cli` - Command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! storage access, no HTTP clients. Every validator and formatter returns
//! data; presenting it is the caller's job.
//!
//! # Modules
//!
//! - [`types`] - IDs, emails, roles, sessions, products, carts and orders
//! - [`validation`] - Password, phone and image validators
//! - [`format`] - Display projections for prices, dates, statuses and carts
//! - [`forms`] - Form-level validation composed from the validators

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod format;
pub mod forms;
pub mod types;
pub mod validation;

pub use types::*;
pub use validation::ValidationResult;
