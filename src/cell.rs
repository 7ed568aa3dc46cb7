//! Smallest unit of board state.

use std::fmt;
use std::rc::{Rc, Weak};

use crate::hub::{Handler, Hub, SubscriptionId};

/// Zero-based (row, col) position on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Events a cell publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellEvent {
    /// The cell was fired upon.
    Hit,
    /// The ship occupying the cell has been sunk.
    Sunk,
}

/// Payload delivered with every [`CellEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellUpdate {
    pub coord: Coord,
    pub ship_present: bool,
}

pub type CellHub = Hub<CellEvent, CellUpdate>;

/// One grid square: occupancy, availability and hit status.
#[derive(Debug)]
pub struct Cell {
    coord: Coord,
    occupies_ship: bool,
    available: bool,
    hit: bool,
    hub: Rc<CellHub>,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self {
            coord: Coord::new(row, col),
            occupies_ship: false,
            available: true,
            hit: false,
            hub: Rc::new(Hub::new()),
        }
    }

    pub fn row(&self) -> usize {
        self.coord.row
    }

    pub fn col(&self) -> usize {
        self.coord.col
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn occupies_ship(&self) -> bool {
        self.occupies_ship
    }

    pub fn available(&self) -> bool {
        self.available
    }

    pub fn hit(&self) -> bool {
        self.hit
    }

    /// Mark the cell as fired upon and notify `CellEvent::Hit` subscribers.
    ///
    /// Returns `false` without notifying when the cell was already hit.
    pub fn set_hit(&mut self) -> bool {
        if self.hit {
            return false;
        }
        self.hit = true;
        let update = CellUpdate {
            coord: self.coord,
            ship_present: self.occupies_ship,
        };
        self.hub.notify(CellEvent::Hit, &update);
        true
    }

    pub(crate) fn set_occupied(&mut self, occupied: bool) {
        self.occupies_ship = occupied;
    }

    pub(crate) fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Restore the initial state and drop every subscription.
    pub fn reset(&mut self) {
        self.available = true;
        self.occupies_ship = false;
        self.hit = false;
        self.hub.clear();
    }

    pub fn subscribe<F>(&self, event: CellEvent, handler: F) -> SubscriptionId
    where
        F: Fn(&CellUpdate) + 'static,
    {
        self.hub.subscribe(event, handler)
    }

    pub fn subscribe_shared(&self, event: CellEvent, handler: Handler<CellUpdate>) -> SubscriptionId {
        self.hub.subscribe_shared(event, handler)
    }

    pub fn unsubscribe(&self, event: CellEvent, id: SubscriptionId) {
        self.hub.unsubscribe(event, id)
    }

    /// Non-owning handle to this cell's hub, for peers that forward
    /// notifications to the cell (a ship announcing it sank).
    pub(crate) fn hub_handle(&self) -> Weak<CellHub> {
        Rc::downgrade(&self.hub)
    }

    pub(crate) fn hub(&self) -> &CellHub {
        &self.hub
    }
}
