//! Error types for board, configuration and match operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::ship::Orientation;

/// Errors returned by [`Board`](crate::Board) operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Placement leaves the grid or touches an unavailable cell.
    #[error("cannot place ship of size {size} {orientation:?} at ({row}, {col})")]
    InvalidPlacement {
        row: usize,
        col: usize,
        size: usize,
        orientation: Orientation,
    },
    /// Coordinate outside the grid.
    #[error("coordinate ({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },
    /// The cell was already fired upon.
    #[error("cell ({row}, {col}) was already hit")]
    DoubleHit { row: usize, col: usize },
    #[error("ship is already placed on this board")]
    ShipAlreadyPlaced,
    #[error("ship is not placed on this board")]
    ShipNotPlaced,
    /// Random layout gave up after the configured number of attempts.
    #[error("could not place ship of size {size} after {attempts} attempts")]
    RosterUnplaceable { size: usize, attempts: usize },
}

/// Errors found while loading or validating a [`MatchConfig`](crate::MatchConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board dimensions must be non-zero (got {rows}x{cols})")]
    EmptyBoard { rows: usize, cols: usize },
    #[error("{cols} columns exceed the {max} that can be labelled")]
    TooManyColumns { cols: usize, max: usize },
    #[error("ship roster is empty")]
    EmptyRoster,
    #[error("ship #{index} has size zero")]
    ZeroSizedShip { index: usize },
    #[error("ship #{index} of size {size} does not fit a {rows}x{cols} board")]
    ShipTooLong {
        index: usize,
        size: usize,
        rows: usize,
        cols: usize,
    },
    #[error("placement attempts must be non-zero")]
    NoPlacementAttempts,
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors returned by the match coordinator.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("fleet layout can only change during setup")]
    NotInSetup,
    #[error("the match is not in progress")]
    NotInProgress,
    #[error("{placed} of {total} ships placed")]
    FleetIncomplete { placed: usize, total: usize },
    #[error("no ship with index {0}")]
    UnknownShip(usize),
}
