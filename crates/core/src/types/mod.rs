//! Core types for Basket.
//!
//! This module provides type-safe wrappers for the cart domain.

pub mod id;
pub mod line_item;
pub mod order;
pub mod price;
pub mod totals;

pub use id::*;
pub use line_item::LineItem;
pub use order::{OrderDraft, OrderItem};
pub use price::format_price;
pub use totals::Totals;
