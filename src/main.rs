use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use seabattle::cli::{self, parse_command, Reply, SetupSession};
use seabattle::player::coord_label;
use seabattle::{
    init_logging, BoardView, CliPlayer, Match, MatchConfig, MatchState, Player, ShotOutcome,
};

#[derive(Parser)]
#[command(author, version, about = "Battleship against a random AI", long_about = None)]
struct Cli {
    #[arg(long, help = "JSON match config, e.g. {\"rows\":10,\"cols\":10,\"ships\":[5,4,3,3,2]}")]
    config: Option<PathBuf>,
    #[arg(long)]
    rows: Option<usize>,
    #[arg(long)]
    cols: Option<usize>,
    #[arg(long, value_delimiter = ',', help = "Ship sizes, e.g. --ships 4,3,2")]
    ships: Option<Vec<usize>>,
    #[arg(long, help = "Maximum delay before the AI fires, in milliseconds")]
    ai_delay_ms: Option<u64>,
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
}

impl Cli {
    fn match_config(&self) -> anyhow::Result<MatchConfig> {
        let mut config = match &self.config {
            Some(path) => MatchConfig::from_path(path)?,
            None => MatchConfig::default(),
        };
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(ships) = &self.ships {
            config.ship_sizes = ships.clone();
        }
        if let Some(delay) = self.ai_delay_ms {
            config.ai_delay_ms = delay;
        }
        config.validate()?;
        Ok(config)
    }
}

fn read_line() -> anyhow::Result<Option<String>> {
    print!("> ");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn print_roster(game: &Match) {
    for (i, ship) in game.player_fleet().ships().iter().enumerate() {
        let placed = game.player_board().placement_of(ship);
        match placed {
            Some(cells) => println!("  {}. size {} at {}", i + 1, ship.size(), coord_label(cells[0])),
            None => println!("  {}. size {} (not placed)", i + 1, ship.size()),
        }
    }
}

/// Returns `false` when the player quit before starting.
fn setup(game: &mut Match, own: &BoardView) -> anyhow::Result<bool> {
    let mut session = SetupSession::new();
    println!("{}", cli::HELP);
    loop {
        println!("\nYour board:");
        print!("{}", own.to_text(game.player_board(), session.preview_cells()));
        print_roster(game);
        let Some(line) = read_line()? else {
            return Ok(false);
        };
        if line.is_empty() {
            continue;
        }
        let command = match parse_command(&line, game.config().rows, game.config().cols) {
            Ok(command) => command,
            Err(e) => {
                println!("✗ {}", e);
                continue;
            }
        };
        match session.apply(game, command) {
            Ok(Reply::Started) => return Ok(true),
            Ok(Reply::Quit) => return Ok(false),
            Ok(Reply::Help) => println!("{}", cli::HELP),
            Ok(Reply::NoPreview) => println!("✗ the ship does not fit there"),
            Ok(Reply::Randomized) => own.reset(),
            Ok(_) => {}
            Err(e) => println!("✗ {}", e),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = cli.match_config()?;
    let seed = match cli.seed {
        Some(s) => {
            println!("Using fixed seed: {} (game will be reproducible)", s);
            s
        }
        None => rand::rng().random(),
    };

    let mut game = Match::with_seed(config, seed)?;
    let own = BoardView::attach(game.player_board_mut(), true);
    let enemy = BoardView::attach(game.adversary_board_mut(), false);

    if !setup(&mut game, &own)? {
        return Ok(());
    }

    let mut player = CliPlayer::new();
    let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(1));
    while !game.is_over() {
        println!("\nEnemy board:");
        print!("{}", enemy.to_text(game.adversary_board(), &[]));
        println!("Your board:");
        print!("{}", own.to_text(game.player_board(), &[]));

        let Some(target) = player.select_target(&mut rng, game.adversary_board()) else {
            break;
        };
        let turn = game.play_turn(target.row, target.col).await?;
        if let Some(shot) = turn.player {
            player.handle_shot_result(shot.coord, shot.outcome);
        }
        if let Some(shot) = turn.adversary {
            let verdict = match shot.outcome {
                ShotOutcome::Miss => "miss".to_string(),
                ShotOutcome::Hit => "hit".to_string(),
                ShotOutcome::Sunk { size } => format!("sank your ship of size {}", size),
            };
            println!("Enemy fires at {}: {}", coord_label(shot.coord), verdict);
        }
    }

    let tally = game.player_tally();
    match game.state() {
        MatchState::PlayerWon => println!("\nVICTORY! You sank every enemy ship."),
        MatchState::PlayerLost => println!("\nDEFEAT. All your ships have been destroyed."),
        _ => println!("\nGame abandoned."),
    }
    println!("Shots: {}  Hits: {}  Ships sunk: {}", tally.shots, tally.hits, tally.ships_sunk);
    Ok(())
}
