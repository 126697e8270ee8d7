//! Basket Cart - Client-side shopping cart state engine.
//!
//! Tracks the products a shopper has selected, derives the aggregate totals,
//! broadcasts them to interested views, and keeps the cart durable across
//! restarts.
//!
//! # Architecture
//!
//! - [`store::CartStore`] - Owns the line items; every mutation recomputes,
//!   publishes, and persists before returning
//! - [`publisher::TotalsPublisher`] - Two replaying broadcast channels (total
//!   price, total quantity)
//! - [`persistence::CartPersistence`] - JSON round-trip of the items under one
//!   key of a [`storage::KeyValueStore`]
//!
//! Everything is single-threaded and synchronous.
//!
//! # Example
//!
//! ```rust
//! use basket_cart::{AddPolicy, CartPersistence, CartStore, MemoryStore};
//! use basket_core::{LineItem, ProductId};
//! use rust_decimal::Decimal;
//!
//! let mut cart = CartStore::new(CartPersistence::new(MemoryStore::new()), AddPolicy::default());
//! let _badge = cart.publisher().subscribe_quantity(|quantity| {
//!     let _ = quantity;
//! });
//!
//! cart.add(LineItem::new(ProductId::new(1), "Widget", Decimal::from(10), "widget.png"));
//! cart.add(LineItem::new(ProductId::new(1), "Widget", Decimal::from(10), "widget.png"));
//! assert_eq!(cart.totals().quantity, 2);
//! assert_eq!(cart.totals().price, Decimal::from(20));
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod persistence;
pub mod publisher;
pub mod storage;
pub mod store;

pub use config::{AddPolicy, CartConfig, ConfigError};
pub use error::{CartError, PersistenceError, StorageError};
pub use persistence::{CartPersistence, DEFAULT_STORAGE_KEY};
pub use publisher::{Subscription, TotalsPublisher, ValueCell};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::CartStore;
