//! Two-board Battleship engine.
//!
//! State lives in cells, ships, boards and fleets; changes propagate through
//! synchronous notifications (cell hit -> ship sunk -> fleet lost -> match
//! over) so that observers such as views never need to be known by the
//! models they watch.

pub mod board;
pub mod cell;
pub mod cli;
pub mod config;
pub mod error;
pub mod fleet;
pub mod game;
pub mod hub;
pub mod logging;
pub mod player;
pub mod ship;
pub mod view;

pub use board::{Board, ShotOutcome};
pub use cell::{Cell, CellEvent, CellUpdate, Coord};
pub use config::*;
pub use error::{BoardError, ConfigError, MatchError};
pub use fleet::{Fleet, FleetEvent, FleetUpdate};
pub use game::{Match, MatchEvent, MatchState, ShotReport, Tally, TurnReport};
pub use hub::{Handler, Hub, SubscriptionId};
pub use logging::init_logging;
pub use player::{AiPlayer, CliPlayer, Player};
pub use ship::{Orientation, Ship, ShipEvent, ShipUpdate};
pub use view::{BoardView, Mark};
