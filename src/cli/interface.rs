use crate::cell::Coord;
use crate::error::{BoardError, MatchError};
use crate::game::Match;
use crate::ship::Orientation;

use super::Command;

/// A placement being dragged around: which ship, and the cells it would
/// occupy at the current drop target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPlacement {
    pub ship: usize,
    pub orientation: Orientation,
    pub cells: Vec<Coord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Preview(Vec<Coord>),
    /// The drop target is invalid; nothing is highlighted.
    NoPreview,
    Placed(Vec<Coord>),
    Removed(Vec<Coord>),
    Randomized,
    Started,
    Show,
    Help,
    Quit,
}

/// State owned by the input adapter while the player arranges the fleet.
#[derive(Debug, Default)]
pub struct SetupSession {
    pending: Option<PendingPlacement>,
}

impl SetupSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<&PendingPlacement> {
        self.pending.as_ref()
    }

    /// Cells to highlight as a preview.
    pub fn preview_cells(&self) -> &[Coord] {
        self.pending.as_ref().map(|p| p.cells.as_slice()).unwrap_or(&[])
    }

    pub fn apply(&mut self, game: &mut Match, command: Command) -> Result<Reply, MatchError> {
        if !matches!(command, Command::Preview { .. } | Command::Show | Command::Help) {
            self.pending = None;
        }
        let reply = match command {
            Command::Preview {
                ship,
                at,
                orientation,
            } => match game.can_place_player_ship(ship, at.row, at.col, orientation) {
                Ok(cells) => {
                    self.pending = Some(PendingPlacement {
                        ship,
                        orientation,
                        cells: cells.clone(),
                    });
                    Reply::Preview(cells)
                }
                Err(MatchError::Board(_)) => {
                    self.pending = None;
                    Reply::NoPreview
                }
                Err(e) => return Err(e),
            },
            Command::Place {
                ship,
                at,
                orientation,
            } => Reply::Placed(game.place_player_ship(ship, at.row, at.col, orientation)?),
            Command::Move { ship, to } => {
                let (_, orientation) = current_layout(game, ship)?;
                Reply::Placed(relocate(game, ship, to, orientation)?)
            }
            Command::Rotate { ship } => {
                let (origin, orientation) = current_layout(game, ship)?;
                Reply::Placed(relocate(game, ship, origin, orientation.rotated())?)
            }
            Command::Remove { ship } => Reply::Removed(game.remove_player_ship(ship)?),
            Command::Random => {
                game.randomize_player_fleet()?;
                Reply::Randomized
            }
            Command::Start => {
                game.start()?;
                Reply::Started
            }
            Command::Show => Reply::Show,
            Command::Help => Reply::Help,
            Command::Quit => Reply::Quit,
        };
        Ok(reply)
    }
}

/// Origin and orientation of a placed player ship.
fn current_layout(game: &Match, ship: usize) -> Result<(Coord, Orientation), MatchError> {
    let handle = game.player_fleet().ship(ship).ok_or(MatchError::UnknownShip(ship))?;
    let cells = game
        .player_board()
        .placement_of(handle)
        .ok_or(BoardError::ShipNotPlaced)?;
    let orientation = match cells {
        [a, b, ..] if b.row > a.row => Orientation::Vertical,
        _ => Orientation::Horizontal,
    };
    Ok((cells[0], orientation))
}

/// Lift a ship and drop it elsewhere; when the new spot is invalid the ship
/// goes back where it was.
fn relocate(
    game: &mut Match,
    ship: usize,
    to: Coord,
    orientation: Orientation,
) -> Result<Vec<Coord>, MatchError> {
    let (origin, previous) = current_layout(game, ship)?;
    game.remove_player_ship(ship)?;
    match game.place_player_ship(ship, to.row, to.col, orientation) {
        Ok(cells) => Ok(cells),
        Err(e) => {
            game.place_player_ship(ship, origin.row, origin.col, previous)?;
            Err(e)
        }
    }
}
