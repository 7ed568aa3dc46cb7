//! Grid of cells with ship placement, exclusion zones and firing.

use std::fmt;
use std::rc::{Rc, Weak};

use rand::Rng;

use crate::cell::{Cell, CellEvent, CellUpdate, Coord};
use crate::error::BoardError;
use crate::fleet::Fleet;
use crate::hub::{Handler, SubscriptionId};
use crate::ship::{Orientation, Ship, ShipEvent};

/// Result of firing at a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    Miss,
    Hit,
    /// The shot sank a ship of the given size.
    Sunk { size: usize },
}

/// Links established when a ship is placed, kept so removal can undo them.
struct Placement {
    ship: Weak<Ship>,
    cells: Vec<Coord>,
    hit_links: Vec<SubscriptionId>,
    sunk_links: Vec<SubscriptionId>,
}

impl Placement {
    fn is_for(&self, ship: &Rc<Ship>) -> bool {
        std::ptr::eq(self.ship.as_ptr(), Rc::as_ptr(ship))
    }
}

pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    placements: Vec<Placement>,
    cell_observers: Vec<(CellEvent, Handler<CellUpdate>)>,
}

impl Board {
    /// Create an empty `rows`×`cols` board.
    pub fn new(rows: usize, cols: usize) -> Self {
        let cells = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Cell::new(row, col)))
            .collect();
        Board {
            rows,
            cols,
            cells,
            placements: Vec::new(),
            cell_observers: Vec::new(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.index(row, col).map(|i| &self.cells[i])
    }

    fn cell_mut(&mut self, coord: Coord) -> Option<&mut Cell> {
        self.index(coord.row, coord.col).map(move |i| &mut self.cells[i])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn is_hit(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).map_or(false, Cell::hit)
    }

    /// Number of cells not yet fired upon.
    pub fn unhit_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.hit()).count()
    }

    /// Walk `size` cells from (`row`, `col`) and return them in order when
    /// every one is inside the grid and available.
    pub fn can_place(
        &self,
        row: usize,
        col: usize,
        size: usize,
        orientation: Orientation,
    ) -> Result<Vec<Coord>, BoardError> {
        let invalid = BoardError::InvalidPlacement {
            row,
            col,
            size,
            orientation,
        };
        let (dr, dc) = orientation.step();
        let mut coords = Vec::with_capacity(size);
        for i in 0..size {
            let r = row.checked_add(dr * i).ok_or_else(|| invalid.clone())?;
            let c = col.checked_add(dc * i).ok_or_else(|| invalid.clone())?;
            match self.cell(r, c) {
                Some(cell) if cell.available() => coords.push(cell.coord()),
                _ => return Err(invalid),
            }
        }
        Ok(coords)
    }

    /// Place `ship` on `cells` (normally the result of [`Board::can_place`]).
    ///
    /// Subscribes the ship to each cell's hit event, forwards the ship's sunk
    /// event to each cell, and marks the cells and their 8-neighborhood
    /// unavailable.
    pub fn place(&mut self, ship: &Rc<Ship>, cells: &[Coord]) -> Result<(), BoardError> {
        if self.is_placed(ship) {
            return Err(BoardError::ShipAlreadyPlaced);
        }
        // cells must be exactly what can_place yields from their origin:
        // distinct, contiguous, in line and available
        let origin = cells.first().copied().unwrap_or(Coord::new(0, 0));
        let orientation = orientation_of(cells);
        match self.can_place(origin.row, origin.col, ship.size(), orientation) {
            Ok(expected) if expected == cells => {}
            _ => {
                return Err(BoardError::InvalidPlacement {
                    row: origin.row,
                    col: origin.col,
                    size: ship.size(),
                    orientation,
                })
            }
        }

        let on_hit = ship.hit_handler();
        let mut hit_links = Vec::with_capacity(cells.len());
        let mut sunk_links = Vec::with_capacity(cells.len());
        for &coord in cells {
            let cell = &self.cells[coord.row * self.cols + coord.col];
            hit_links.push(cell.subscribe_shared(CellEvent::Hit, Rc::clone(&on_hit)));

            let hub = cell.hub_handle();
            sunk_links.push(ship.subscribe(ShipEvent::Sunk, move |_| {
                if let Some(hub) = hub.upgrade() {
                    hub.notify(
                        CellEvent::Sunk,
                        &CellUpdate {
                            coord,
                            ship_present: true,
                        },
                    );
                }
            }));
            self.mark(coord, false);
        }
        log::debug!(
            "placed ship of size {} at {}",
            ship.size(),
            cells.first().copied().unwrap_or(Coord::new(0, 0))
        );
        self.placements.push(Placement {
            ship: Rc::downgrade(ship),
            cells: cells.to_vec(),
            hit_links,
            sunk_links,
        });
        Ok(())
    }

    /// Undo [`Board::place`]: drop the subscriptions, free the ship's cells
    /// and neighborhood, then re-mark the exclusion zones of the ships that
    /// remain. Returns the cells the ship occupied.
    pub fn remove(&mut self, ship: &Rc<Ship>) -> Result<Vec<Coord>, BoardError> {
        let index = self
            .placements
            .iter()
            .position(|p| p.is_for(ship))
            .ok_or(BoardError::ShipNotPlaced)?;
        let placement = self.placements.remove(index);

        for (coord, link) in placement.cells.iter().zip(&placement.hit_links) {
            self.cells[coord.row * self.cols + coord.col].unsubscribe(CellEvent::Hit, *link);
        }
        for link in &placement.sunk_links {
            ship.unsubscribe(ShipEvent::Sunk, *link);
        }
        for &coord in &placement.cells {
            self.mark(coord, true);
        }
        self.remark_exclusion_zones();
        log::debug!("removed ship of size {}", ship.size());
        Ok(placement.cells)
    }

    /// Cells currently occupied by `ship`, if it is placed on this board.
    pub fn placement_of(&self, ship: &Rc<Ship>) -> Option<&[Coord]> {
        self.placements
            .iter()
            .find(|p| p.is_for(ship))
            .map(|p| p.cells.as_slice())
    }

    pub fn is_placed(&self, ship: &Rc<Ship>) -> bool {
        self.placements.iter().any(|p| p.is_for(ship))
    }

    /// Place every ship of `fleet`, in roster order, at uniformly random
    /// positions. Each ship gets `attempts` tries; there is no backtracking.
    pub fn place_randomly<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        fleet: &Fleet,
        attempts: usize,
    ) -> Result<(), BoardError> {
        for ship in fleet.ships() {
            self.place_ship_randomly(rng, ship, attempts)?;
        }
        Ok(())
    }

    pub fn place_ship_randomly<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        ship: &Rc<Ship>,
        attempts: usize,
    ) -> Result<Vec<Coord>, BoardError> {
        for _ in 0..attempts {
            let row = rng.random_range(0..self.rows);
            let col = rng.random_range(0..self.cols);
            let orientation = if rng.random() {
                Orientation::Vertical
            } else {
                Orientation::Horizontal
            };
            if let Ok(cells) = self.can_place(row, col, ship.size(), orientation) {
                self.place(ship, &cells)?;
                return Ok(cells);
            }
        }
        log::warn!(
            "gave up placing ship of size {} after {} attempts",
            ship.size(),
            attempts
        );
        Err(BoardError::RosterUnplaceable {
            size: ship.size(),
            attempts,
        })
    }

    /// Fire at (`row`, `col`). The hit propagates synchronously through the
    /// cell, the occupying ship and its fleet before this returns.
    pub fn fire(&mut self, row: usize, col: usize) -> Result<ShotOutcome, BoardError> {
        let cell = self
            .cell_mut(Coord::new(row, col))
            .ok_or(BoardError::OutOfBounds { row, col })?;
        if !cell.set_hit() {
            return Err(BoardError::DoubleHit { row, col });
        }
        if !cell.occupies_ship() {
            return Ok(ShotOutcome::Miss);
        }
        let coord = Coord::new(row, col);
        let ship = self
            .placements
            .iter()
            .find(|p| p.cells.contains(&coord))
            .and_then(|p| p.ship.upgrade());
        Ok(match ship {
            Some(ship) if ship.is_sunk() => ShotOutcome::Sunk { size: ship.size() },
            _ => ShotOutcome::Hit,
        })
    }

    /// Reset every cell and forget all placements. Board-level cell
    /// observers are re-attached afterwards.
    pub fn clear(&mut self) {
        for placement in self.placements.drain(..) {
            if let Some(ship) = placement.ship.upgrade() {
                for link in placement.sunk_links {
                    ship.unsubscribe(ShipEvent::Sunk, link);
                }
            }
        }
        for cell in &mut self.cells {
            cell.reset();
        }
        for (event, handler) in &self.cell_observers {
            for cell in &self.cells {
                cell.subscribe_shared(*event, Rc::clone(handler));
            }
        }
    }

    /// Subscribe `handler` to `event` on every cell, now and after each
    /// [`Board::clear`].
    pub fn observe_cells<F>(&mut self, event: CellEvent, handler: F)
    where
        F: Fn(&CellUpdate) + 'static,
    {
        let handler: Handler<CellUpdate> = Rc::new(handler);
        for cell in &self.cells {
            cell.subscribe_shared(event, Rc::clone(&handler));
        }
        self.cell_observers.push((event, handler));
    }

    /// Set `coord` as occupied (or free) and its neighborhood unavailable
    /// (or available).
    fn mark(&mut self, coord: Coord, free: bool) {
        if let Some(cell) = self.cell_mut(coord) {
            cell.set_occupied(!free);
        }
        for n in self.neighborhood(coord) {
            if let Some(cell) = self.cell_mut(n) {
                cell.set_available(free);
            }
        }
    }

    fn remark_exclusion_zones(&mut self) {
        let occupied: Vec<Coord> = self
            .cells
            .iter()
            .filter(|c| c.occupies_ship())
            .map(Cell::coord)
            .collect();
        for coord in occupied {
            self.mark(coord, false);
        }
    }

    /// `coord` and every cell within Chebyshev distance 1, clipped to the grid.
    fn neighborhood(&self, coord: Coord) -> Vec<Coord> {
        let rows = coord.row.saturating_sub(1)..=(coord.row + 1).min(self.rows - 1);
        let cols = coord.col.saturating_sub(1)..=(coord.col + 1).min(self.cols - 1);
        rows.flat_map(|r| cols.clone().map(move |c| Coord::new(r, c)))
            .collect()
    }
}

fn orientation_of(cells: &[Coord]) -> Orientation {
    match cells {
        [a, b, ..] if b.row > a.row => Orientation::Vertical,
        _ => Orientation::Horizontal,
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Board {{ rows: {}, cols: {}, ships: {}, unhit: {} }}",
            self.rows,
            self.cols,
            self.placements.len(),
            self.unhit_count()
        )
    }
}
