//! Command handlers. Each one drives the storefront and writes plain text.

pub mod account;
pub mod admin;
pub mod cart;
pub mod catalog;
