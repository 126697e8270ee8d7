//! Reactive broadcast of the cart's aggregate totals.
//!
//! [`ValueCell`] is a single-threaded publish/subscribe value holder:
//!
//! - It always holds the most recently published value.
//! - A new subscriber is called immediately with that value, then with every
//!   later publish.
//! - Publishing is synchronous: every current subscriber has been called
//!   before `publish` returns.
//! - Subscribers are called in registration order.
//! - A publish made from inside a callback is queued and delivered after the
//!   current value has reached every subscriber, so all subscribers see the
//!   values in publish order.
//! - Dropping the [`Subscription`] guard unsubscribes.
//!
//! [`TotalsPublisher`] bundles one cell for the total price and one for the
//! total quantity. The two channels are independent; no ordering is promised
//! between them.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::rc::{Rc, Weak};

use basket_core::Totals;
use rust_decimal::Decimal;

type Callback<T> = Rc<dyn Fn(&T)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct SubscriberId(u64);

struct CellInner<T> {
    value: T,
    next_id: u64,
    subscribers: BTreeMap<SubscriberId, Callback<T>>,
    delivering: bool,
    pending: VecDeque<T>,
}

/// Clears the delivery state even if a callback panics.
struct Delivery<'a, T> {
    inner: &'a RefCell<CellInner<T>>,
}

impl<T> Drop for Delivery<'_, T> {
    fn drop(&mut self) {
        let mut inner = self.inner.borrow_mut();
        inner.delivering = false;
        inner.pending.clear();
    }
}

/// Broadcast value cell that replays its current value to new subscribers.
///
/// Clones share the same value and subscriber set.
pub struct ValueCell<T> {
    inner: Rc<RefCell<CellInner<T>>>,
}

impl<T> Clone for ValueCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ValueCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ValueCell")
            .field("value", &inner.value)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + 'static> ValueCell<T> {
    /// Create a cell holding `initial`.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(CellInner {
                value: initial,
                next_id: 0,
                subscribers: BTreeMap::new(),
                delivering: false,
                pending: VecDeque::new(),
            })),
        }
    }

    /// The most recently published value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Store `value` and deliver it to every current subscriber.
    ///
    /// The cell is not borrowed while callbacks run, so a callback may read
    /// the cell, subscribe, drop subscriptions, or publish. A publish from
    /// inside a callback only stores the value and queues it; the outermost
    /// `publish` delivers queued values in order once the current one has
    /// reached every subscriber.
    pub fn publish(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.value = value.clone();
            if inner.delivering {
                inner.pending.push_back(value);
                return;
            }
            inner.delivering = true;
        }

        let _delivery = Delivery { inner: &self.inner };
        let mut next = Some(value);
        while let Some(value) = next {
            let subscribers: Vec<Callback<T>> =
                self.inner.borrow().subscribers.values().cloned().collect();
            for callback in subscribers {
                callback(&value);
            }
            next = self.inner.borrow_mut().pending.pop_front();
        }
    }

    /// Register `callback`, calling it at once with the current value.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        let callback: Callback<T> = Rc::new(callback);
        let (id, current) = {
            let mut inner = self.inner.borrow_mut();
            let id = SubscriberId(inner.next_id);
            inner.next_id += 1;
            inner.subscribers.insert(id, Rc::clone(&callback));
            (id, inner.value.clone())
        };
        callback(&current);

        let weak: Weak<RefCell<CellInner<T>>> = Rc::downgrade(&self.inner);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().subscribers.remove(&id);
                }
            })),
        }
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

/// Guard for a [`ValueCell`] subscription. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Keep the callback registered for as long as the cell lives.
    pub fn detach(mut self) {
        self.unsubscribe = None;
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

/// Publishes total price and total quantity on two independent channels.
///
/// Clones are read-only handles onto the same channels, suitable for handing
/// to views. Only the cart store publishes.
#[derive(Debug, Clone)]
pub struct TotalsPublisher {
    price: ValueCell<Decimal>,
    quantity: ValueCell<u32>,
}

impl Default for TotalsPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl TotalsPublisher {
    /// Create a publisher holding zero totals.
    #[must_use]
    pub fn new() -> Self {
        Self {
            price: ValueCell::new(Decimal::ZERO),
            quantity: ValueCell::new(0),
        }
    }

    /// Subscribe to total price changes.
    pub fn subscribe_price<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Decimal) + 'static,
    {
        self.price.subscribe(callback)
    }

    /// Subscribe to total quantity changes.
    pub fn subscribe_quantity<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&u32) + 'static,
    {
        self.quantity.subscribe(callback)
    }

    /// The most recently published totals.
    #[must_use]
    pub fn current(&self) -> Totals {
        Totals {
            price: self.price.get(),
            quantity: self.quantity.get(),
        }
    }

    pub(crate) fn publish(&self, totals: Totals) {
        self.price.publish(totals.price);
        self.quantity.publish(totals.quantity);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, impl Fn(&T) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |value: &T| sink.borrow_mut().push(value.clone()))
    }

    #[test]
    fn test_new_subscriber_receives_current_value() {
        let cell = ValueCell::new(5_u32);
        cell.publish(7);

        let (seen, callback) = recorder();
        let _subscription = cell.subscribe(callback);

        assert_eq!(*seen.borrow(), vec![7]);
    }

    #[test]
    fn test_publish_reaches_all_subscribers_in_order() {
        let cell = ValueCell::new(0_u32);
        let log = Rc::new(RefCell::new(Vec::new()));

        let first_log = Rc::clone(&log);
        let _first = cell.subscribe(move |v| first_log.borrow_mut().push(("first", *v)));
        let second_log = Rc::clone(&log);
        let _second = cell.subscribe(move |v| second_log.borrow_mut().push(("second", *v)));

        cell.publish(1);
        cell.publish(2);

        assert_eq!(
            *log.borrow(),
            vec![
                ("first", 0),
                ("second", 0),
                ("first", 1),
                ("second", 1),
                ("first", 2),
                ("second", 2),
            ]
        );
    }

    #[test]
    fn test_dropping_subscription_unsubscribes() {
        let cell = ValueCell::new(0_u32);
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let subscription = cell.subscribe(move |_| counter.set(counter.get() + 1));
        assert_eq!(cell.subscriber_count(), 1);

        drop(subscription);
        cell.publish(3);

        assert_eq!(cell.subscriber_count(), 0);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_detached_subscription_stays_registered() {
        let cell = ValueCell::new(0_u32);
        let (seen, callback) = recorder();
        cell.subscribe(callback).detach();

        cell.publish(9);

        assert_eq!(cell.subscriber_count(), 1);
        assert_eq!(*seen.borrow(), vec![0, 9]);
    }

    #[test]
    fn test_callback_can_read_cell_during_publish() {
        let cell = ValueCell::new(0_u32);
        let reader = cell.clone();
        let (seen, sink) = recorder();
        let _subscription = cell.subscribe(move |_| sink(&reader.get()));

        cell.publish(4);

        assert_eq!(*seen.borrow(), vec![0, 4]);
    }

    #[test]
    fn test_publish_from_callback_is_delivered_in_order() {
        let cell = ValueCell::new(0_u32);
        let republisher = cell.clone();
        let (first_seen, first_sink) = recorder();
        let _first = cell.subscribe(move |v: &u32| {
            first_sink(v);
            if *v == 1 {
                republisher.publish(2);
            }
        });
        let (later_seen, later_sink) = recorder();
        let _later = cell.subscribe(later_sink);

        cell.publish(1);

        assert_eq!(*first_seen.borrow(), vec![0, 1, 2]);
        assert_eq!(*later_seen.borrow(), vec![0, 1, 2]);
        assert_eq!(cell.get(), 2);
    }

    #[test]
    fn test_panicking_callback_does_not_wedge_cell() {
        let cell = ValueCell::new(0_u32);
        let _panicky = cell.subscribe(|v: &u32| assert_ne!(*v, 1));
        let (seen, sink) = recorder();
        let _later = cell.subscribe(sink);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| cell.publish(1)));
        assert!(result.is_err());
        cell.publish(2);

        assert_eq!(*seen.borrow(), vec![0, 2]);
    }

    #[test]
    fn test_same_value_is_still_delivered() {
        let cell = ValueCell::new(1_u32);
        let (seen, callback) = recorder();
        let _subscription = cell.subscribe(callback);

        cell.publish(1);

        assert_eq!(*seen.borrow(), vec![1, 1]);
    }

    #[test]
    fn test_subscription_outliving_cell_drops_cleanly() {
        let cell = ValueCell::new(0_u32);
        let subscription = cell.subscribe(|_| {});
        drop(cell);
        drop(subscription);
    }

    #[test]
    fn test_totals_publisher_channels() {
        let publisher = TotalsPublisher::new();
        let (prices, price_cb) = recorder();
        let (quantities, quantity_cb) = recorder();
        let _price = publisher.subscribe_price(price_cb);
        let _quantity = publisher.subscribe_quantity(quantity_cb);

        publisher.publish(Totals {
            price: Decimal::from(20),
            quantity: 2,
        });

        assert_eq!(*prices.borrow(), vec![Decimal::ZERO, Decimal::from(20)]);
        assert_eq!(*quantities.borrow(), vec![0, 2]);
        assert_eq!(publisher.current().quantity, 2);
    }

    #[test]
    fn test_cloned_publisher_shares_channels() {
        let publisher = TotalsPublisher::new();
        let handle = publisher.clone();

        publisher.publish(Totals {
            price: Decimal::from(5),
            quantity: 1,
        });

        assert_eq!(handle.current().price, Decimal::from(5));
    }
}
