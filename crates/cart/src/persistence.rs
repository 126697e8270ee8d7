//! Durable round-trip of the cart contents.
//!
//! The whole ordered item list is written as one JSON array under a single
//! key. Durability is best-effort: the cart store logs save failures and keeps
//! going, and [`CartPersistence::load`] turns any read or decode failure into
//! an empty cart.

use std::collections::HashSet;

use basket_core::{LineItem, Totals};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::PersistenceError;
use crate::storage::KeyValueStore;

/// Key the cart record is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "cartItems";

/// Reads and writes the cart record in a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct CartPersistence<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> CartPersistence<S> {
    /// Persist under [`DEFAULT_STORAGE_KEY`].
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    /// Persist under a custom key.
    #[must_use]
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Key the record is stored under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Give back the underlying store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Overwrite the record with `items`.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if encoding fails or the store rejects the write.
    pub fn save(&mut self, items: &[LineItem]) -> Result<(), PersistenceError> {
        let record = serde_json::to_string(items)?;
        self.store.set_item(&self.key, &record)?;
        debug!(key = %self.key, items = items.len(), bytes = record.len(), "Saved cart");
        Ok(())
    }

    /// Read the record, distinguishing "absent" from failures.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if the store cannot be read, the record is
    /// not a JSON array of line items, or the items break cart invariants.
    pub fn try_load(&self) -> Result<Option<Vec<LineItem>>, PersistenceError> {
        let Some(record) = self.store.get_item(&self.key)? else {
            return Ok(None);
        };
        let items: Vec<LineItem> = serde_json::from_str(&record)?;
        validate_items(&items)?;
        Ok(Some(items))
    }

    /// Read the record, falling back to an empty cart on any failure.
    #[must_use]
    pub fn load(&self) -> Vec<LineItem> {
        match self.try_load() {
            Ok(Some(items)) => items,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Discarding unreadable cart record");
                Vec::new()
            }
        }
    }
}

fn validate_items(items: &[LineItem]) -> Result<(), PersistenceError> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if item.quantity == 0 {
            return Err(PersistenceError::InvalidRecord(format!(
                "item {} has zero quantity",
                item.id
            )));
        }
        if item.unit_price < Decimal::ZERO {
            return Err(PersistenceError::InvalidRecord(format!(
                "item {} has negative unit price",
                item.id
            )));
        }
        if !seen.insert(item.id) {
            return Err(PersistenceError::InvalidRecord(format!(
                "item {} appears more than once",
                item.id
            )));
        }
    }
    if Totals::from_items(items).is_none() {
        return Err(PersistenceError::InvalidRecord(
            "cart totals exceed the representable range".to_string(),
        ));
    }
    Ok(())
}
