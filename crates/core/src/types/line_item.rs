//! Cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// One distinct product in the cart together with its quantity.
///
/// The serialized form is the durable record layout:
/// `{"id": 1, "name": "Widget", "unitPrice": 10.00, "quantity": 1, "imageUrl": "..."}`.
/// `unitPrice` is written as a JSON number carrying every digit of the decimal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product identifier, unique within a cart.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Price of a single unit, never negative.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub unit_price: Decimal,
    /// Number of units, at least 1 while the item is in a cart.
    pub quantity: u32,
    /// Product image reference.
    #[serde(default)]
    pub image_url: String,
}

impl LineItem {
    /// Create a line item for a single unit of a product.
    #[must_use]
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        unit_price: Decimal,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            unit_price,
            quantity: 1,
            image_url: image_url.into(),
        }
    }

    /// Replace the quantity.
    #[must_use]
    pub const fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Quantity multiplied by unit price, or `None` if the product overflows.
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity))
    }
}
