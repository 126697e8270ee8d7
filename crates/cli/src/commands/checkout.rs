//! Checkout commands.
//!
//! Orders are handed to an offline order service that only issues a tracking
//! number; the cart is emptied once the order is accepted.

use basket_cart::{CartStore, KeyValueStore};
use basket_core::{OrderDraft, format_price};
use tracing::info;
use uuid::Uuid;

use super::CommandError;

/// Order service that accepts every draft and issues a random tracking number.
fn submit_offline(draft: &OrderDraft) -> Result<String, std::convert::Infallible> {
    info!(
        items = draft.order_items.len(),
        total_quantity = draft.total_quantity,
        total_price = %format_price(draft.total_price),
        "Submitting order"
    );
    Ok(Uuid::new_v4().to_string())
}

/// Place an order for the cart contents and empty the cart.
///
/// # Errors
///
/// Returns `CommandError::Cart` if the cart is empty.
pub fn checkout<S: KeyValueStore>(cart: &mut CartStore<S>) -> Result<(), CommandError> {
    let tracking_number = cart.place_order(submit_offline)?;
    info!("Your order has been received. Order tracking number: {tracking_number}");
    Ok(())
}

/// Empty the cart.
pub fn reset<S: KeyValueStore>(cart: &mut CartStore<S>) {
    cart.reset();
    info!("Cart emptied");
}

#[cfg(test)]
mod tests {
    use basket_cart::{AddPolicy, CartError, CartPersistence, MemoryStore};
    use basket_core::{LineItem, ProductId};
    use rust_decimal::Decimal;

    use super::*;

    fn cart() -> CartStore<MemoryStore> {
        CartStore::new(CartPersistence::new(MemoryStore::new()), AddPolicy::default())
    }

    #[test]
    fn test_checkout_empties_cart() {
        let mut cart = cart();
        cart.add(LineItem::new(ProductId::new(1), "Mug", Decimal::from(9), ""));
        assert!(checkout(&mut cart).is_ok());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_checkout_of_empty_cart_fails() {
        let mut cart = cart();
        assert!(matches!(
            checkout(&mut cart),
            Err(CommandError::Cart(CartError::EmptyCart))
        ));
    }

    #[test]
    fn test_reset() {
        let mut cart = cart();
        cart.add(LineItem::new(ProductId::new(1), "Mug", Decimal::from(9), ""));
        reset(&mut cart);
        assert!(cart.is_empty());
    }
}
