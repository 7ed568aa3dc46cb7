use rand::{rngs::SmallRng, SeedableRng};
use seabattle::{init_logging, AiPlayer, Match, MatchConfig, MatchState, Player};
use serde_json::json;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let config = MatchConfig {
        ai_delay_ms: 0,
        ..MatchConfig::default()
    };
    let mut game = Match::with_seed(config, seed2)?;
    game.randomize_player_fleet()?;
    game.start()?;

    let mut rng = SmallRng::seed_from_u64(seed1);
    let mut player = AiPlayer::new();
    while !game.is_over() {
        let Some(target) = player.select_target(&mut rng, game.adversary_board()) else {
            break;
        };
        game.play_turn(target.row, target.col).await?;
    }

    let winner = match game.state() {
        MatchState::PlayerWon => Some("player"),
        MatchState::PlayerLost => Some("adversary"),
        _ => None,
    };
    let result = json!({
        "state": game.state(),
        "player": game.player_tally(),
        "adversary": game.adversary_tally(),
        "winner": winner,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
