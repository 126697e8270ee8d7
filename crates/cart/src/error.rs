//! Error types for the cart engine.
//!
//! Mutation operations on the cart never fail; these errors surface only from
//! the storage layer (where the cart logs and swallows them), from
//! configuration loading, and from checkout.

use thiserror::Error;

/// Durable key-value store failures.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Storage is disabled or cannot be reached.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Writing the value would exceed the store's quota.
    #[error("Storage quota exceeded writing {key}: {needed} bytes needed, quota is {quota}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },

    /// The key cannot be used with this store.
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// Underlying filesystem error.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures saving or loading the cart record.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The durable store rejected the operation.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The record could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The record decoded but breaks line item invariants.
    #[error("Invalid cart record: {0}")]
    InvalidRecord(String),
}

/// Checkout failures.
#[derive(Debug, Error)]
pub enum CartError {
    /// There is nothing to order.
    #[error("Cannot place an order for an empty cart")]
    EmptyCart,

    /// The external order service rejected the draft.
    #[error("Order submission failed: {0}")]
    Submit(#[source] Box<dyn std::error::Error + Send + Sync>),
}
