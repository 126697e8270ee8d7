//! Order drafts handed to the external order service at checkout.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::line_item::LineItem;
use super::totals::Totals;

/// One purchased product in an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub image_url: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl From<&LineItem> for OrderItem {
    fn from(item: &LineItem) -> Self {
        Self {
            product_id: item.id,
            image_url: item.image_url.clone(),
            unit_price: item.unit_price,
            quantity: item.quantity,
        }
    }
}

/// Snapshot of a cart prepared for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_price: Decimal,
    pub total_quantity: u32,
    pub order_items: Vec<OrderItem>,
}

impl OrderDraft {
    /// Build a draft from line items and the totals published for them.
    #[must_use]
    pub fn new(items: &[LineItem], totals: Totals) -> Self {
        Self {
            total_price: totals.price,
            total_quantity: totals.quantity,
            order_items: items.iter().map(OrderItem::from).collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_keeps_item_order_and_totals() {
        let items = vec![
            LineItem::new(ProductId::new(2), "Gadget", Decimal::from(5), "g.png"),
            LineItem::new(ProductId::new(1), "Widget", Decimal::from(10), "w.png").with_quantity(2),
        ];
        let draft = OrderDraft::new(&items, Totals::from_items(&items).unwrap());

        assert_eq!(draft.total_price, Decimal::from(25));
        assert_eq!(draft.total_quantity, 3);
        let ids: Vec<_> = draft.order_items.iter().map(|i| i.product_id).collect();
        assert_eq!(ids, vec![ProductId::new(2), ProductId::new(1)]);
        assert_eq!(draft.order_items[1].image_url, "w.png");
    }
}
