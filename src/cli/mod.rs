//! Line-oriented input adapter for the setup phase.
//!
//! Commands are translated into the engine's placement entry points; the
//! pending (previewed) placement lives in the [`SetupSession`], never in the
//! engine.

pub mod interface;

pub use interface::{PendingPlacement, Reply, SetupSession};

use crate::cell::Coord;
use crate::player::parse_coord;
use crate::ship::Orientation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show where a ship would go without placing it.
    Preview {
        ship: usize,
        at: Coord,
        orientation: Orientation,
    },
    Place {
        ship: usize,
        at: Coord,
        orientation: Orientation,
    },
    /// Drag an already placed ship to a new origin.
    Move { ship: usize, to: Coord },
    Rotate { ship: usize },
    Remove { ship: usize },
    Random,
    Start,
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands (ships are numbered from 1, coordinates look like B7):
  preview <ship> <coord> [h|v]   show where a ship would go
  place <ship> <coord> [h|v]     place a ship
  move <ship> <coord>            move a placed ship
  rotate <ship>                  rotate a placed ship around its origin
  remove <ship>                  take a ship off the board
  random                         place the whole fleet at random
  start                          begin the battle
  show | help | quit";

fn parse_ship(word: Option<&str>) -> Result<usize, String> {
    let word = word.ok_or("missing ship number")?;
    match word.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(format!("invalid ship number '{}'", word)),
    }
}

fn parse_orientation(word: Option<&str>) -> Result<Orientation, String> {
    match word.map(|w| w.to_ascii_lowercase()) {
        None => Ok(Orientation::Horizontal),
        Some(w) if w == "h" => Ok(Orientation::Horizontal),
        Some(w) if w == "v" => Ok(Orientation::Vertical),
        Some(w) => Err(format!("invalid orientation '{}' - use h or v", w)),
    }
}

/// Parse one input line against a `rows`×`cols` board.
pub fn parse_command(line: &str, rows: usize, cols: usize) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let verb = words.next().ok_or("empty command")?.to_ascii_lowercase();
    let coord = |w: Option<&str>| -> Result<Coord, String> {
        parse_coord(w.ok_or("missing coordinate")?, rows, cols)
    };
    let command = match verb.as_str() {
        "preview" | "place" => {
            let ship = parse_ship(words.next())?;
            let at = coord(words.next())?;
            let orientation = parse_orientation(words.next())?;
            if verb == "place" {
                Command::Place {
                    ship,
                    at,
                    orientation,
                }
            } else {
                Command::Preview {
                    ship,
                    at,
                    orientation,
                }
            }
        }
        "move" => {
            let ship = parse_ship(words.next())?;
            Command::Move {
                ship,
                to: coord(words.next())?,
            }
        }
        "rotate" => Command::Rotate {
            ship: parse_ship(words.next())?,
        },
        "remove" => Command::Remove {
            ship: parse_ship(words.next())?,
        },
        "random" => Command::Random,
        "start" => Command::Start,
        "show" => Command::Show,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command '{}'", other)),
    };
    Ok(command)
}
