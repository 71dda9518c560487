//! # Refresh bus — cross-view synchronization
//!
//! [`RefreshBus`] is the one channel through which independent views agree
//! that the leave-request collection changed on the server. The form
//! publishes after a successful create/update; list views subscribe and
//! re-fetch. Neither side holds a reference to the other.
//!
//! The event carries no payload and no backlog: a publish with nobody
//! subscribed is simply lost, which is fine because the only producers are
//! user actions that can't happen before a list view is mounted.
//!
//! Delivery is synchronous, in-process, in subscription order. A handler
//! unsubscribed before a publish is never invoked by it; handlers added
//! while a dispatch is running are not invoked until the next one.
//!
//! The bus is constructed once at application start and handed down through
//! context ([`use_refresh`] pairs subscribe-on-mount with
//! unsubscribe-on-drop so torn-down views never leak a handler).

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Handler = Rc<RefCell<dyn FnMut()>>;

#[derive(Default)]
struct Inner {
    next_id: u64,
    subscribers: Vec<(u64, Handler)>,
}

/// Single-event publish/subscribe channel. Cheap to clone; all clones share
/// the same subscriber list.
#[derive(Clone, Default)]
pub struct RefreshBus {
    inner: Rc<RefCell<Inner>>,
}

impl RefreshBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. Keep the returned [`Subscription`] and call
    /// [`Subscription::unsubscribe`] when the subscribing view goes away.
    pub fn subscribe(&self, handler: impl FnMut() + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push((id, Rc::new(RefCell::new(handler))));
        Subscription {
            id,
            bus: Rc::downgrade(&self.inner),
        }
    }

    /// Notify every currently-subscribed handler, in subscription order.
    pub fn publish(&self) {
        // snapshot the ids, then re-check membership before each call so a
        // handler unsubscribed mid-dispatch is skipped
        let ids: Vec<u64> = {
            let inner = self.inner.borrow();
            inner.subscribers.iter().map(|(id, _)| *id).collect()
        };
        for id in ids {
            let handler = {
                let inner = self.inner.borrow();
                inner
                    .subscribers
                    .iter()
                    .find(|(sid, _)| *sid == id)
                    .map(|(_, h)| h.clone())
            };
            if let Some(handler) = handler {
                (handler.borrow_mut())();
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

/// Token for an active subscription.
pub struct Subscription {
    id: u64,
    bus: Weak<RefCell<Inner>>,
}

impl Subscription {
    /// Remove the handler. It receives no publish after this returns.
    pub fn unsubscribe(self) {
        if let Some(inner) = self.bus.upgrade() {
            inner
                .borrow_mut()
                .subscribers
                .retain(|(id, _)| *id != self.id);
        }
    }
}

/// Subscribe `on_refresh` to the bus in context for the lifetime of the
/// calling component.
pub fn use_refresh(on_refresh: impl FnMut() + 'static) {
    use dioxus::prelude::*;

    let bus = use_context::<RefreshBus>();
    let subscription = use_hook(|| Rc::new(RefCell::new(Some(bus.subscribe(on_refresh)))));
    use_drop(move || {
        if let Some(subscription) = subscription.borrow_mut().take() {
            subscription.unsubscribe();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_with_zero_subscribers_is_a_noop() {
        let bus = RefreshBus::new();
        assert_eq!(bus.subscriber_count(), 0);
        bus.publish();
    }

    #[test]
    fn handlers_run_once_each_in_subscription_order() {
        let bus = RefreshBus::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let _first = bus.subscribe({
            let order = order.clone();
            move || order.borrow_mut().push("first")
        });
        let _second = bus.subscribe({
            let order = order.clone();
            move || order.borrow_mut().push("second")
        });

        bus.publish();
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn two_subscribers_both_fire_on_one_publish() {
        let bus = RefreshBus::new();
        let own_view = Rc::new(RefCell::new(0));
        let admin_view = Rc::new(RefCell::new(0));

        let _a = bus.subscribe({
            let count = own_view.clone();
            move || *count.borrow_mut() += 1
        });
        let _b = bus.subscribe({
            let count = admin_view.clone();
            move || *count.borrow_mut() += 1
        });

        bus.publish();
        assert_eq!(*own_view.borrow(), 1);
        assert_eq!(*admin_view.borrow(), 1);
    }

    #[test]
    fn unsubscribed_handler_receives_nothing_further() {
        let bus = RefreshBus::new();
        let count = Rc::new(RefCell::new(0));

        let subscription = bus.subscribe({
            let count = count.clone();
            move || *count.borrow_mut() += 1
        });

        bus.publish();
        assert_eq!(*count.borrow(), 1);

        subscription.unsubscribe();
        assert_eq!(bus.subscriber_count(), 0);

        bus.publish();
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn handler_unsubscribed_mid_dispatch_is_skipped() {
        let bus = RefreshBus::new();
        let second_fired = Rc::new(RefCell::new(false));
        let pending: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let _first = bus.subscribe({
            let pending = pending.clone();
            move || {
                if let Some(subscription) = pending.borrow_mut().take() {
                    subscription.unsubscribe();
                }
            }
        });
        let second = bus.subscribe({
            let fired = second_fired.clone();
            move || *fired.borrow_mut() = true
        });
        *pending.borrow_mut() = Some(second);

        bus.publish();
        assert!(!*second_fired.borrow());
    }

    #[test]
    fn unsubscribe_after_bus_is_gone_is_harmless() {
        let bus = RefreshBus::new();
        let subscription = bus.subscribe(|| {});
        drop(bus);
        subscription.unsubscribe();
    }
}
