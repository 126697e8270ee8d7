//! Integration tests for views following a shared cart.
//!
//! Models the cart badge, cart details, and checkout summary each holding a
//! publisher handle while the shopper edits the cart.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use basket_core::{ProductId, Totals};
use basket_integration_tests::{open_cart, product};
use rust_decimal::Decimal;

#[derive(Default)]
struct SummaryView {
    price: Cell<Decimal>,
    quantity: Cell<u32>,
}

#[test]
fn test_views_stay_in_sync_through_session() {
    let dir = tempfile::tempdir().unwrap();
    let mut cart = open_cart(dir.path());
    let publisher = cart.publisher();

    let badge = Rc::new(Cell::new(0_u32));
    let badge_sink = Rc::clone(&badge);
    let _badge = publisher.subscribe_quantity(move |q| badge_sink.set(*q));

    cart.add(product(1, "Widget", 1000));
    cart.add(product(2, "Gadget", 250));

    // A view created later still sees the current totals at once.
    let summary = Rc::new(SummaryView::default());
    let price_view = Rc::clone(&summary);
    let quantity_view = Rc::clone(&summary);
    let _price = publisher.subscribe_price(move |p| price_view.price.set(*p));
    let _quantity = publisher.subscribe_quantity(move |q| quantity_view.quantity.set(*q));
    assert_eq!(summary.price.get(), Decimal::new(1250, 2));
    assert_eq!(summary.quantity.get(), 2);

    cart.increment_quantity(&product(2, "Gadget", 250));
    cart.remove(ProductId::new(1));

    assert_eq!(badge.get(), 2);
    assert_eq!(summary.price.get(), Decimal::from(5));
    assert_eq!(summary.quantity.get(), 2);
    assert_eq!(
        cart.totals(),
        Totals {
            price: Decimal::from(5),
            quantity: 2,
        }
    );
}

#[test]
fn test_every_published_value_matches_items_at_that_time() {
    let dir = tempfile::tempdir().unwrap();
    let mut cart = open_cart(dir.path());
    let history = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&history);
    let _sub = cart
        .publisher()
        .subscribe_quantity(move |q| sink.borrow_mut().push(*q));

    cart.add(product(1, "Widget", 1000));
    cart.add(product(1, "Widget", 1000));
    cart.add(product(2, "Gadget", 250));
    cart.decrement_quantity(ProductId::new(1));
    cart.decrement_quantity(ProductId::new(1));
    cart.decrement_quantity(ProductId::new(2));

    assert_eq!(*history.borrow(), vec![0, 1, 2, 3, 2, 1, 0]);
}

#[test]
fn test_dropped_view_stops_receiving() {
    let dir = tempfile::tempdir().unwrap();
    let mut cart = open_cart(dir.path());
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let subscription = cart
        .publisher()
        .subscribe_price(move |_| counter.set(counter.get() + 1));

    cart.add(product(1, "Widget", 1000));
    drop(subscription);
    cart.add(product(1, "Widget", 1000));

    assert_eq!(calls.get(), 2);
}
