//! Aggregate cart totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::line_item::LineItem;

/// Total price and total quantity derived from a set of line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of `quantity * unit_price` over all items.
    pub price: Decimal,
    /// Sum of `quantity` over all items.
    pub quantity: u32,
}

impl Totals {
    /// Totals of an empty cart.
    pub const ZERO: Self = Self {
        price: Decimal::ZERO,
        quantity: 0,
    };

    /// Fold the totals over `items`.
    ///
    /// Returns `None` if the price exceeds the decimal range or the quantity
    /// exceeds `u32::MAX`; totals are never clamped.
    #[must_use]
    pub fn from_items(items: &[LineItem]) -> Option<Self> {
        items.iter().try_fold(Self::ZERO, |acc, item| {
            Some(Self {
                price: acc.price.checked_add(item.line_total()?)?,
                quantity: acc.quantity.checked_add(item.quantity)?,
            })
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::types::ProductId;

    #[test]
    fn test_empty_items_are_zero() {
        assert_eq!(Totals::from_items(&[]), Some(Totals::ZERO));
        assert_eq!(Totals::default(), Totals::ZERO);
    }

    #[test]
    fn test_fold_over_items() {
        let items = vec![
            LineItem::new(ProductId::new(1), "Widget", Decimal::from(10), "").with_quantity(2),
            LineItem::new(
                ProductId::new(2),
                "Gadget",
                Decimal::from_str("2.50").unwrap(),
                "",
            )
            .with_quantity(3),
        ];
        let totals = Totals::from_items(&items).unwrap();
        assert_eq!(totals.price, Decimal::from_str("27.50").unwrap());
        assert_eq!(totals.quantity, 5);
    }

    #[test]
    fn test_price_overflow_is_none() {
        let items = vec![
            LineItem::new(ProductId::new(1), "Big", Decimal::MAX, ""),
            LineItem::new(ProductId::new(2), "Also big", Decimal::MAX, ""),
        ];
        assert_eq!(Totals::from_items(&items), None);
    }

    #[test]
    fn test_quantity_overflow_is_none() {
        let items = vec![
            LineItem::new(ProductId::new(1), "A", Decimal::ZERO, "").with_quantity(u32::MAX),
            LineItem::new(ProductId::new(2), "B", Decimal::ZERO, ""),
        ];
        assert_eq!(Totals::from_items(&items), None);
    }
}
