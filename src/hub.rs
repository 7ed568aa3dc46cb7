//! Publish/subscribe primitive embedded by every stateful entity.
//!
//! A [`Hub`] is keyed by a closed event enumeration `E` and carries payloads
//! of type `P`. Dispatch is synchronous: `notify` runs every handler for the
//! event, in subscription order, before it returns. Handlers receive the
//! payload by reference; whatever context they need (the emitting entity's
//! coordinates, a weak handle to a peer) is carried by the payload or captured
//! by the closure.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Shared, reference-counted event handler.
pub type Handler<P> = Rc<dyn Fn(&P)>;

/// Token returned by [`Hub::subscribe`], used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Entry<E, P> {
    event: E,
    id: SubscriptionId,
    handler: Handler<P>,
}

/// Event hub generic over event kind and payload shape.
pub struct Hub<E, P> {
    entries: RefCell<Vec<Entry<E, P>>>,
    next_id: Cell<u64>,
}

impl<E, P> Hub<E, P>
where
    E: Copy + PartialEq,
{
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Register `handler` for future notifications of `event`.
    pub fn subscribe<F>(&self, event: E, handler: F) -> SubscriptionId
    where
        F: Fn(&P) + 'static,
    {
        self.subscribe_shared(event, Rc::new(handler))
    }

    /// Register an already shared handler. The same handler may be
    /// subscribed to several hubs.
    pub fn subscribe_shared(&self, event: E, handler: Handler<P>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.entries.borrow_mut().push(Entry { event, id, handler });
        id
    }

    /// Remove a subscription. Unknown ids are ignored.
    pub fn unsubscribe(&self, event: E, id: SubscriptionId) {
        self.entries
            .borrow_mut()
            .retain(|entry| !(entry.event == event && entry.id == id));
    }

    /// Invoke every handler currently registered for `event`.
    ///
    /// The handler list is snapshotted first, so handlers may subscribe or
    /// unsubscribe on this hub without invalidating the dispatch.
    pub fn notify(&self, event: E, payload: &P) {
        let handlers: Vec<Handler<P>> = self
            .entries
            .borrow()
            .iter()
            .filter(|entry| entry.event == event)
            .map(|entry| Rc::clone(&entry.handler))
            .collect();
        for handler in handlers {
            handler(payload);
        }
    }

    /// Drop every subscription, for every event.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    /// Number of handlers registered for `event`.
    pub fn subscriber_count(&self, event: E) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|entry| entry.event == event)
            .count()
    }
}

impl<E, P> Default for Hub<E, P>
where
    E: Copy + PartialEq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E, P> fmt::Debug for Hub<E, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hub {{ subscribers: {} }}", self.entries.borrow().len())
    }
}
