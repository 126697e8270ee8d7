//! Command implementations.

pub mod cart;
pub mod checkout;

use basket_cart::{
    CartConfig, CartError, CartStore, ConfigError, FileStore, StorageError, Subscription,
};
use basket_core::ProductId;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The cart store could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Checkout failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// The product is not in the cart.
    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),
}

/// Open the file store named in `config` and rehydrate the cart from it.
///
/// # Errors
///
/// Returns `StorageError` if the store directory cannot be created.
pub fn open_cart(config: &CartConfig) -> Result<CartStore<FileStore>, StorageError> {
    let mut store = FileStore::open(&config.storage_dir)?;
    if let Some(quota) = config.storage_quota_bytes {
        store = store.with_quota(quota);
    }
    Ok(CartStore::with_config(store, config))
}

/// Follow the total quantity the way a cart badge does.
pub fn watch_badge(cart: &CartStore<FileStore>) -> Subscription {
    cart.publisher()
        .subscribe_quantity(|quantity| debug!(quantity, "Cart badge updated"))
}
