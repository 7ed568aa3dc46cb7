//! Side-specific strategies.
//!
//! Both sides share the same board/fleet machinery; what differs is how a
//! side lays out its fleet and picks targets:
//! - AiPlayer: uniform random layout and uniform random shots
//! - CliPlayer: reads targets from a line-oriented input

use rand::rngs::SmallRng;

use crate::board::{Board, ShotOutcome};
use crate::cell::Coord;
use crate::error::BoardError;
use crate::fleet::Fleet;

/// Interface implemented by different player types.
pub trait Player {
    /// Lay out `fleet` on `board`. Defaults to a random layout.
    fn place_fleet(
        &mut self,
        rng: &mut SmallRng,
        board: &mut Board,
        fleet: &Fleet,
        attempts: usize,
    ) -> Result<(), BoardError> {
        board.place_randomly(rng, fleet, attempts)
    }

    /// Choose the next cell to fire at on the opponent's `board`.
    /// Returns `None` when there is nothing left to shoot.
    fn select_target(&mut self, rng: &mut SmallRng, board: &Board) -> Option<Coord>;

    /// Inform the player of the result of its last shot.
    fn handle_shot_result(&mut self, _coord: Coord, _outcome: ShotOutcome) {}
}

pub mod ai;
pub use ai::AiPlayer;

pub mod cli;
pub use cli::{coord_label, parse_coord, CliPlayer};
