//! Notification Registry
//!
//! Synchronous observer list shared by items and collections.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Handle returned by `subscribe`, used to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler<E> = Rc<dyn Fn(&E)>;

/// Ordered list of subscribers for one event type.
///
/// Delivery is synchronous and follows registration order. The subscriber
/// list is snapshotted when an emission starts, so handlers may subscribe,
/// unsubscribe or emit again without invalidating the loop. A handler removed
/// mid-emission is skipped if it has not run yet.
pub struct Emitter<E> {
    next_id: Cell<u64>,
    handlers: RefCell<Vec<(SubscriptionId, Handler<E>)>>,
}

impl<E> Default for Emitter<E> {
    fn default() -> Self {
        Self {
            next_id: Cell::new(0),
            handlers: RefCell::new(Vec::new()),
        }
    }
}

impl<E> Emitter<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: impl Fn(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.handlers.borrow_mut().push((id, Rc::new(handler)));
        id
    }

    /// Returns false if the id was not (or no longer) subscribed
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(sid, _)| *sid != id);
        handlers.len() != before
    }

    pub fn clear(&self) {
        self.handlers.borrow_mut().clear();
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub fn emit(&self, event: &E) {
        let snapshot: Vec<(SubscriptionId, Handler<E>)> = self.handlers.borrow().clone();
        for (id, handler) in snapshot {
            let still_subscribed = self.handlers.borrow().iter().any(|(sid, _)| *sid == id);
            if still_subscribed {
                handler(event);
            }
        }
    }
}
