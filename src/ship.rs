//! Ships: a size, remaining lives and a one-way sunk flag.

use std::cell::Cell;
use std::rc::Rc;

use crate::cell::CellUpdate;
use crate::hub::{Handler, Hub, SubscriptionId};

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn rotated(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// Row/column step between consecutive segments.
    pub(crate) fn step(self) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (0, 1),
            Orientation::Vertical => (1, 0),
        }
    }
}

/// Events a ship publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipEvent {
    Sunk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipUpdate {
    pub size: usize,
    pub sunk: bool,
}

/// A ship of fixed size. Cells are associated with it only through
/// subscriptions set up by the board at placement time.
#[derive(Debug)]
pub struct Ship {
    size: usize,
    lives: Cell<usize>,
    sunk: Cell<bool>,
    hub: Hub<ShipEvent, ShipUpdate>,
}

impl Ship {
    /// Returns `None` for a zero-sized ship.
    pub fn new(size: usize) -> Option<Rc<Self>> {
        if size == 0 {
            return None;
        }
        Some(Rc::new(Self {
            size,
            lives: Cell::new(size),
            sunk: Cell::new(false),
            hub: Hub::new(),
        }))
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn lives_remaining(&self) -> usize {
        self.lives.get()
    }

    pub fn is_sunk(&self) -> bool {
        self.sunk.get()
    }

    /// Take one hit. The hit that exhausts the last life sinks the ship and
    /// notifies `ShipEvent::Sunk`; hits on a sunk ship are ignored.
    pub fn apply_hit(&self) {
        if self.sunk.get() {
            return;
        }
        let lives = self.lives.get().saturating_sub(1);
        self.lives.set(lives);
        if lives == 0 {
            self.sunk.set(true);
            log::debug!("ship of size {} sunk", self.size);
            self.hub.notify(
                ShipEvent::Sunk,
                &ShipUpdate {
                    size: self.size,
                    sunk: true,
                },
            );
        }
    }

    /// Handler to subscribe on each occupied cell's `CellEvent::Hit`.
    /// Holds the ship weakly so a discarded fleet is not kept alive by
    /// stale cell subscriptions.
    pub fn hit_handler(self: &Rc<Self>) -> Handler<CellUpdate> {
        let ship = Rc::downgrade(self);
        Rc::new(move |_update: &CellUpdate| {
            if let Some(ship) = ship.upgrade() {
                ship.apply_hit();
            }
        })
    }

    pub fn subscribe<F>(&self, event: ShipEvent, handler: F) -> SubscriptionId
    where
        F: Fn(&ShipUpdate) + 'static,
    {
        self.hub.subscribe(event, handler)
    }

    pub fn unsubscribe(&self, event: ShipEvent, id: SubscriptionId) {
        self.hub.unsubscribe(event, id)
    }

    pub fn subscriber_count(&self, event: ShipEvent) -> usize {
        self.hub.subscriber_count(event)
    }
}
