use std::io::{self, BufRead, Write};

use rand::rngs::SmallRng;

use crate::board::{Board, ShotOutcome};
use crate::cell::Coord;

use super::{AiPlayer, Player};

/// Player that reads target coordinates (e.g. `B7`) from a line-oriented
/// input. An empty line takes a random suggestion.
pub struct CliPlayer {
    input: Box<dyn BufRead>,
    suggest: AiPlayer,
}

impl CliPlayer {
    pub fn new() -> Self {
        Self::with_input(io::BufReader::new(io::stdin()))
    }

    pub fn with_input<R: BufRead + 'static>(input: R) -> Self {
        Self {
            input: Box::new(input),
            suggest: AiPlayer::new(),
        }
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }
}

impl Default for CliPlayer {
    fn default() -> Self {
        Self::new()
    }
}

/// Human-readable label: column letter then 1-based row, `(6, 1)` -> `B7`.
pub fn coord_label(coord: Coord) -> String {
    let col = (b'A' + (coord.col % 26) as u8) as char;
    format!("{}{}", col, coord.row + 1)
}

/// Parse a label such as `B7` against a `rows`×`cols` board.
pub fn parse_coord(input: &str, rows: usize, cols: usize) -> Result<Coord, String> {
    let input = input.trim();
    if input.len() < 2 {
        return Err("Too short - need column letter and row number (e.g., A5)".to_string());
    }
    let mut chars = input.chars();
    let col_ch = chars
        .next()
        .ok_or("No column letter")?
        .to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!("Invalid column '{}' - must be a letter", col_ch));
    }
    let col = (col_ch as u8 - b'A') as usize;
    if col >= cols {
        return Err(format!("Column '{}' out of bounds", col_ch));
    }
    let row_str: String = chars.collect();
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number", row_str))?;
    if row == 0 || row > rows {
        return Err(format!("Row {} out of bounds - must be 1-{}", row, rows));
    }
    Ok(Coord::new(row - 1, col))
}

impl Player for CliPlayer {
    fn select_target(&mut self, rng: &mut SmallRng, board: &Board) -> Option<Coord> {
        let suggestion = self.suggest.select_target(rng, board)?;
        loop {
            print!("Target [{}]: ", coord_label(suggestion));
            let _ = io::stdout().flush();
            let line = self.read_line()?;
            if line.is_empty() {
                return Some(suggestion);
            }
            match parse_coord(&line, board.rows(), board.cols()) {
                Ok(coord) if board.is_hit(coord.row, coord.col) => {
                    println!("{} was already fired at, choose another target.", coord_label(coord));
                }
                Ok(coord) => return Some(coord),
                Err(e) => println!("Invalid coordinate: {}", e),
            }
        }
    }

    fn handle_shot_result(&mut self, coord: Coord, outcome: ShotOutcome) {
        match outcome {
            ShotOutcome::Miss => println!("Miss at {}.", coord_label(coord)),
            ShotOutcome::Hit => println!("Hit at {}!", coord_label(coord)),
            ShotOutcome::Sunk { size } => {
                println!("Hit at {} sank a ship of size {}!", coord_label(coord), size)
            }
        }
    }
}
