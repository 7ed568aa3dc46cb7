//! Text presentation of a board, driven by cell notifications.

use std::cell::RefCell;
use std::fmt::{self, Write};
use std::rc::Rc;

use crate::board::Board;
use crate::cell::{CellEvent, Coord};

/// Visual state of a single cell, as learned from notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Unknown,
    Water,
    Hit,
    Sunk,
}

/// Observer of one board. Ships are drawn only when `reveal_ships` is set
/// (the player's own board); the ship-preview overlay belongs to whoever is
/// dragging and is passed in at render time.
pub struct BoardView {
    cols: usize,
    marks: Rc<RefCell<Vec<Mark>>>,
    reveal_ships: bool,
}

impl BoardView {
    pub fn attach(board: &mut Board, reveal_ships: bool) -> Self {
        let cols = board.cols();
        let marks = Rc::new(RefCell::new(vec![Mark::Unknown; board.rows() * cols]));

        let on_hit = Rc::clone(&marks);
        board.observe_cells(CellEvent::Hit, move |update| {
            let mark = if update.ship_present { Mark::Hit } else { Mark::Water };
            let slot = &mut on_hit.borrow_mut()[update.coord.row * cols + update.coord.col];
            // the sunk notification may arrive first when the ship subscribed earlier
            if *slot != Mark::Sunk {
                *slot = mark;
            }
        });
        let on_sunk = Rc::clone(&marks);
        board.observe_cells(CellEvent::Sunk, move |update| {
            on_sunk.borrow_mut()[update.coord.row * cols + update.coord.col] = Mark::Sunk;
        });

        Self {
            cols,
            marks,
            reveal_ships,
        }
    }

    pub fn mark(&self, coord: Coord) -> Mark {
        if coord.col >= self.cols {
            return Mark::Unknown;
        }
        self.marks
            .borrow()
            .get(coord.row * self.cols + coord.col)
            .copied()
            .unwrap_or(Mark::Unknown)
    }

    /// Forget every mark, e.g. after the board was cleared.
    pub fn reset(&self) {
        self.marks.borrow_mut().fill(Mark::Unknown);
    }

    /// Draw the grid into `out`.
    ///
    /// `~` water, `#` ship, `o` miss, `X` hit, `*` sunk, `+` preview.
    pub fn render<W: Write>(&self, board: &Board, preview: &[Coord], out: &mut W) -> fmt::Result {
        write!(out, "   ")?;
        for c in 0..board.cols() {
            write!(out, " {}", (b'A' + (c % 26) as u8) as char)?;
        }
        writeln!(out)?;
        for r in 0..board.rows() {
            write!(out, "{:2} ", r + 1)?;
            for c in 0..board.cols() {
                let coord = Coord::new(r, c);
                let ch = match self.mark(coord) {
                    Mark::Water => 'o',
                    Mark::Hit => 'X',
                    Mark::Sunk => '*',
                    Mark::Unknown if preview.contains(&coord) => '+',
                    Mark::Unknown
                        if self.reveal_ships
                            && board.cell(r, c).map_or(false, |cell| cell.occupies_ship()) =>
                    {
                        '#'
                    }
                    Mark::Unknown => '~',
                };
                write!(out, " {}", ch)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    pub fn to_text(&self, board: &Board, preview: &[Coord]) -> String {
        let mut out = String::new();
        // writing into a String cannot fail
        let _ = self.render(board, preview, &mut out);
        out
    }
}
