use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

pub const BOARD_SIZE: usize = 10;
pub const SHIP_SIZES: [usize; 5] = [5, 4, 3, 3, 2];
pub const DEFAULT_AI_DELAY_MS: u64 = 100;
pub const DEFAULT_PLACEMENT_ATTEMPTS: usize = 1000;
/// Columns are labelled with a single letter, `A` to `Z`.
pub const MAX_COLS: usize = 26;

/// Parameters fixed for the whole duration of a match.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub rows: usize,
    pub cols: usize,
    #[serde(alias = "ships")]
    pub ship_sizes: Vec<usize>,
    /// Upper bound of the random delay before the AI fires.
    pub ai_delay_ms: u64,
    /// Random placement attempts per ship before giving up.
    pub placement_attempts: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            rows: BOARD_SIZE,
            cols: BOARD_SIZE,
            ship_sizes: SHIP_SIZES.to_vec(),
            ai_delay_ms: DEFAULT_AI_DELAY_MS,
            placement_attempts: DEFAULT_PLACEMENT_ATTEMPTS,
        }
    }
}

impl MatchConfig {
    pub fn new(rows: usize, cols: usize, ship_sizes: Vec<usize>) -> Self {
        Self {
            rows,
            cols,
            ship_sizes,
            ..Self::default()
        }
    }

    /// Parse a JSON document such as `{"rows":10,"cols":10,"ships":[5,4,3]}`.
    /// Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check the structural constraints. Whether the roster actually fits
    /// the grid is only discovered by random placement.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyBoard {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.cols > MAX_COLS {
            return Err(ConfigError::TooManyColumns {
                cols: self.cols,
                max: MAX_COLS,
            });
        }
        if self.ship_sizes.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }
        for (index, &size) in self.ship_sizes.iter().enumerate() {
            if size == 0 {
                return Err(ConfigError::ZeroSizedShip { index });
            }
            if size > self.rows.max(self.cols) {
                return Err(ConfigError::ShipTooLong {
                    index,
                    size,
                    rows: self.rows,
                    cols: self.cols,
                });
            }
        }
        if self.placement_attempts == 0 {
            return Err(ConfigError::NoPlacementAttempts);
        }
        Ok(())
    }
}
