use rand::rngs::SmallRng;
use rand::Rng;

use crate::board::Board;
use crate::cell::Coord;

use super::Player;

/// Opponent that fires uniformly at random among cells not yet hit.
///
/// Keeps no memory of its own: the hit flags on the target board are the
/// only record of previous shots.
#[derive(Debug, Default, Clone, Copy)]
pub struct AiPlayer;

impl AiPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl Player for AiPlayer {
    fn select_target(&mut self, rng: &mut SmallRng, board: &Board) -> Option<Coord> {
        if board.unhit_count() == 0 {
            return None;
        }
        // rejection sampling over the whole grid
        loop {
            let row = rng.random_range(0..board.rows());
            let col = rng.random_range(0..board.cols());
            if !board.is_hit(row, col) {
                return Some(Coord::new(row, col));
            }
        }
    }
}
