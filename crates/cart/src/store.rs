//! The cart store: sole owner and mutator of the cart's line items.
//!
//! Every mutation runs the same sequence before returning:
//!
//! 1. update the item list
//! 2. recompute the totals by folding over the whole list
//! 3. publish the totals to subscribers
//! 4. persist the list
//!
//! Callers therefore never observe totals or storage that lag behind the
//! in-memory items. Persistence failures are logged and swallowed; the
//! in-memory cart stays authoritative for the session.

use basket_core::{LineItem, OrderDraft, ProductId, Totals, format_price};
use tracing::{debug, error, info, warn};

use crate::config::{AddPolicy, CartConfig};
use crate::error::CartError;
use crate::persistence::CartPersistence;
use crate::publisher::TotalsPublisher;
use crate::storage::KeyValueStore;

/// Cart state engine.
///
/// Construct one per session and hand it (or [`CartStore::publisher`]
/// handles) to the views that need it.
#[derive(Debug)]
pub struct CartStore<S> {
    items: Vec<LineItem>,
    totals: TotalsPublisher,
    persistence: CartPersistence<S>,
    add_policy: AddPolicy,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Rehydrate a cart from `persistence`.
    ///
    /// A non-empty stored cart is followed by one totals pass so subscribers
    /// see the restored aggregates without any mutation.
    #[must_use]
    pub fn new(persistence: CartPersistence<S>, add_policy: AddPolicy) -> Self {
        let items = persistence.load();
        let mut cart = Self {
            items,
            totals: TotalsPublisher::new(),
            persistence,
            add_policy,
        };
        if !cart.items.is_empty() {
            info!(items = cart.items.len(), "Restored cart from storage");
            cart.compute_totals();
        }
        cart
    }

    /// Rehydrate a cart from `store` using the key and add policy in `config`.
    #[must_use]
    pub fn with_config(store: S, config: &CartConfig) -> Self {
        Self::new(
            CartPersistence::with_key(store, config.storage_key.clone()),
            config.add_policy,
        )
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add a product to the cart.
    ///
    /// A product already present grows according to the [`AddPolicy`];
    /// otherwise the item is appended, keeping its quantity (zero counts as one).
    ///
    /// The add is ignored, leaving the cart as it was, when the item has a
    /// negative unit price or when the resulting totals would not fit in a
    /// `Decimal` price and a `u32` quantity.
    pub fn add(&mut self, item: LineItem) {
        let id = item.id;
        if item.unit_price.is_sign_negative() && !item.unit_price.is_zero() {
            warn!(product_id = %id, unit_price = %item.unit_price, "Rejected item with negative unit price");
            return;
        }

        let mut candidate = self.items.clone();
        if let Some(existing) = candidate.iter_mut().find(|existing| existing.id == id) {
            let step = match self.add_policy {
                AddPolicy::IncrementByOne => 1,
                AddPolicy::MergeQuantity => item.quantity.max(1),
            };
            let Some(quantity) = existing.quantity.checked_add(step) else {
                warn!(product_id = %id, "Rejected add: item quantity would overflow");
                return;
            };
            existing.quantity = quantity;
            debug!(product_id = %id, quantity, "Increased cart item");
        } else {
            let quantity = item.quantity.max(1);
            debug!(product_id = %id, quantity, "Appended cart item");
            candidate.push(item.with_quantity(quantity));
        }

        let Some(totals) = Totals::from_items(&candidate) else {
            warn!(product_id = %id, "Rejected add: cart totals would overflow");
            return;
        };
        self.items = candidate;
        self.commit(totals);
    }

    /// Add one more unit of `item`.
    pub fn increment_quantity(&mut self, item: &LineItem) {
        self.add(item.clone().with_quantity(1));
    }

    /// Take one unit of the product away, removing it at zero.
    ///
    /// Unknown products are ignored.
    pub fn decrement_quantity(&mut self, id: ProductId) {
        let Some(existing) = self.find_mut(id) else {
            debug!(product_id = %id, "Decrement of product not in cart ignored");
            return;
        };
        existing.quantity = existing.quantity.saturating_sub(1);
        if existing.quantity == 0 {
            self.remove(id);
        } else {
            debug!(product_id = %id, quantity = existing.quantity, "Decreased cart item");
            self.compute_totals();
        }
    }

    /// Remove the product's entry. Unknown products are ignored.
    pub fn remove(&mut self, id: ProductId) {
        let Some(index) = self.position(id) else {
            debug!(product_id = %id, "Removal of product not in cart ignored");
            return;
        };
        self.items.remove(index);
        debug!(product_id = %id, "Removed cart item");
        self.compute_totals();
    }

    /// Empty the cart and force both totals to zero.
    pub fn reset(&mut self) {
        self.items.clear();
        self.totals.publish(Totals::ZERO);
        info!("Cart reset");
        self.persist();
    }

    /// Recompute the totals from the items, publish them, and persist.
    pub fn compute_totals(&mut self) {
        // Items only enter through `add` or a validated load, both of which
        // keep the totals representable; removals only shrink them.
        match Totals::from_items(&self.items) {
            Some(totals) => self.commit(totals),
            None => {
                error!(items = self.items.len(), "Cart totals out of range, not published");
                self.persist();
            }
        }
    }

    /// Submit the cart to an external order service, emptying it on success.
    ///
    /// The cart is left untouched when `submit` fails.
    ///
    /// # Errors
    ///
    /// Returns `CartError::EmptyCart` without calling `submit` when there is
    /// nothing to order, or `CartError::Submit` wrapping the service's error.
    pub fn place_order<F, R, E>(&mut self, submit: F) -> Result<R, CartError>
    where
        F: FnOnce(&OrderDraft) -> Result<R, E>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        if self.items.is_empty() {
            return Err(CartError::EmptyCart);
        }
        let draft = self.order_draft();
        let receipt = submit(&draft).map_err(|e| {
            let error = e.into();
            warn!(error = %error, "Order submission failed, keeping cart");
            CartError::Submit(error)
        })?;
        info!(
            total_quantity = draft.total_quantity,
            total_price = %format_price(draft.total_price),
            "Order placed"
        );
        self.reset();
        Ok(receipt)
    }

    // =========================================================================
    // Read-only views
    // =========================================================================

    /// Items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Owned copy of the items.
    #[must_use]
    pub fn snapshot(&self) -> Vec<LineItem> {
        self.items.clone()
    }

    /// Look up the live entry for a product.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The most recently published totals.
    #[must_use]
    pub fn totals(&self) -> Totals {
        self.totals.current()
    }

    /// Read-only handle for subscribing to the totals.
    #[must_use]
    pub fn publisher(&self) -> TotalsPublisher {
        self.totals.clone()
    }

    /// Order draft for the current contents.
    #[must_use]
    pub fn order_draft(&self) -> OrderDraft {
        OrderDraft::new(&self.items, self.totals.current())
    }

    /// The persistence adapter.
    #[must_use]
    pub const fn persistence(&self) -> &CartPersistence<S> {
        &self.persistence
    }

    /// Shut the cart down, giving back the persistence adapter.
    #[must_use]
    pub fn into_persistence(self) -> CartPersistence<S> {
        self.persistence
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn position(&self, id: ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    fn find_mut(&mut self, id: ProductId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    fn commit(&mut self, totals: Totals) {
        self.totals.publish(totals);
        self.log_contents(totals);
        self.persist();
    }

    fn persist(&mut self) {
        if let Err(e) = self.persistence.save(&self.items) {
            warn!(error = %e, "Failed to persist cart, continuing in memory");
        }
    }

    fn log_contents(&self, totals: Totals) {
        for item in &self.items {
            debug!(
                name = %item.name,
                quantity = item.quantity,
                subtotal = %item.line_total().map_or_else(|| "out of range".to_string(), format_price),
                "Cart line"
            );
        }
        info!(
            total_price = %format_price(totals.price),
            total_quantity = totals.quantity,
            "Cart totals"
        );
    }
}
