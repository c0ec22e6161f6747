//! Go Marketplace Core - Shared types library.
//!
//! This crate provides common types used across all Go Marketplace components:
//! - `cart` - Cart store with local persistence
//! - `cli` - Command-line front end over the cart store
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
