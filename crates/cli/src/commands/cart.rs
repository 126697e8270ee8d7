//! Cart mutation and inspection commands.
//!
//! # Usage
//!
//! ```bash
//! basket add --id 1 --name "Coffee Mug" --price 18.99
//! basket increment --id 1
//! basket decrement --id 1
//! basket remove --id 1
//! basket show
//! ```

use basket_cart::{CartStore, KeyValueStore};
use basket_core::{LineItem, ProductId, format_price};
use rust_decimal::Decimal;
use tracing::{info, warn};

use super::CommandError;

/// Parse a non-negative unit price.
///
/// # Errors
///
/// Returns a message if the value is not a decimal number or is negative.
pub fn parse_price(value: &str) -> Result<Decimal, String> {
    let price: Decimal = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid price '{value}': {e}"))?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(format!("price must not be negative (got {value})"));
    }
    Ok(price)
}

/// Add `quantity` units of a product.
pub fn add<S: KeyValueStore>(
    cart: &mut CartStore<S>,
    id: ProductId,
    name: String,
    price: Decimal,
    quantity: u32,
    image: String,
) {
    let item = LineItem::new(id, name, price, image).with_quantity(quantity);
    cart.add(item);
    show(cart);
}

/// Add one more unit of a product already in the cart.
///
/// # Errors
///
/// Returns `CommandError::NotInCart` if the product is not in the cart.
pub fn increment<S: KeyValueStore>(
    cart: &mut CartStore<S>,
    id: ProductId,
) -> Result<(), CommandError> {
    let item = cart.find(id).cloned().ok_or(CommandError::NotInCart(id))?;
    cart.increment_quantity(&item);
    show(cart);
    Ok(())
}

/// Take one unit of a product away.
pub fn decrement<S: KeyValueStore>(cart: &mut CartStore<S>, id: ProductId) {
    if cart.find(id).is_none() {
        warn!(product_id = %id, "Product is not in the cart");
    }
    cart.decrement_quantity(id);
    show(cart);
}

/// Remove a product entirely.
pub fn remove<S: KeyValueStore>(cart: &mut CartStore<S>, id: ProductId) {
    if cart.find(id).is_none() {
        warn!(product_id = %id, "Product is not in the cart");
    }
    cart.remove(id);
    show(cart);
}

/// Log the cart contents and totals.
pub fn show<S: KeyValueStore>(cart: &CartStore<S>) {
    if cart.is_empty() {
        info!("Your shopping cart is empty");
        return;
    }

    info!("Contents of the cart");
    for item in cart.items() {
        info!(
            "  [{}] {} x{} @ {} = {}",
            item.id,
            item.name,
            item.quantity,
            format_price(item.unit_price),
            item.line_total()
                .map_or_else(|| "out of range".to_string(), format_price)
        );
    }
    let totals = cart.totals();
    info!(
        "Total: {} ({} item{})",
        format_price(totals.price),
        totals.quantity,
        if totals.quantity == 1 { "" } else { "s" }
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use basket_cart::{AddPolicy, CartPersistence, MemoryStore};

    use super::*;

    fn cart() -> CartStore<MemoryStore> {
        CartStore::new(CartPersistence::new(MemoryStore::new()), AddPolicy::default())
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("18.99").unwrap(), Decimal::new(1899, 2));
        assert_eq!(parse_price(" 0 ").unwrap(), Decimal::ZERO);
        assert!(parse_price("-1").is_err());
        assert!(parse_price("cheap").is_err());
    }

    #[test]
    fn test_increment_requires_product_in_cart() {
        let mut cart = cart();
        let result = increment(&mut cart, ProductId::new(1));
        assert!(matches!(result, Err(CommandError::NotInCart(_))));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_then_increment() {
        let mut cart = cart();
        add(
            &mut cart,
            ProductId::new(1),
            "Mug".to_string(),
            Decimal::new(1899, 2),
            1,
            String::new(),
        );
        increment(&mut cart, ProductId::new(1)).unwrap();
        assert_eq!(cart.totals().quantity, 2);
        assert_eq!(cart.totals().price, Decimal::new(3798, 2));
    }

    #[test]
    fn test_decrement_and_remove_unknown_products_are_harmless() {
        let mut cart = cart();
        decrement(&mut cart, ProductId::new(5));
        remove(&mut cart, ProductId::new(5));
        assert!(cart.is_empty());
    }
}
