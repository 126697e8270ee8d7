//! Basket Core - Shared cart domain types.
//!
//! This crate provides the types shared by every Basket component:
//! - `cart` - The cart state engine (store, totals publisher, persistence)
//! - `cli` - Command-line storefront driving the engine
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no storage
//! access, no logging. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, line items, aggregate totals, and order drafts

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
