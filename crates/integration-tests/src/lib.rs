//! Integration tests for Basket.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p basket-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_restart` - Rehydrating a cart from the file store across restarts
//! - `cart_views` - Several views following one cart through a shopping session
//!
//! Helpers shared by the test files live here.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;

use basket_cart::{AddPolicy, CartPersistence, CartStore, FileStore};
use basket_core::{LineItem, ProductId};
use rust_decimal::Decimal;

/// Open a cart backed by a file store in `dir`, as the application does at startup.
///
/// # Panics
///
/// Panics if the store directory cannot be created.
#[must_use]
pub fn open_cart(dir: &Path) -> CartStore<FileStore> {
    let store = FileStore::open(dir).expect("Failed to open file store");
    CartStore::new(CartPersistence::new(store), AddPolicy::IncrementByOne)
}

/// A single unit of a catalog product.
#[must_use]
pub fn product(id: i32, name: &str, cents: i64) -> LineItem {
    LineItem::new(
        ProductId::new(id),
        name,
        Decimal::new(cents, 2),
        format!("assets/images/products/{id}.png"),
    )
}
