//! Headless self-play for every engine.
//!
//! Plays seeded games with the built-in AIs and logs results and best
//! scores. `RUST_LOG` overrides the log level.

use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ai_games::games::tictactoe::Status;
use ai_games::{
    record_if_best, ControlMode, Direction, Engine, GameKind, GameRng, Mark, MemoryScoreStore, ScoreError,
    ScoreStore, SnakeConfig, SnakeGame, TicTacToe, TicTacToeConfig, Twenty48Config, Twenty48Game,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum GameArg {
    TicTacToe,
    Snake,
    #[value(name = "2048")]
    Twenty48,
    All,
}

#[derive(Parser)]
#[command(name = "arcade-sim")]
#[command(about = "Run the built-in game AIs against themselves")]
struct Cli {
    /// Which game to play
    #[arg(short, long, value_enum, default_value_t = GameArg::All)]
    game: GameArg,

    /// Seed for every random choice
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Games per engine
    #[arg(short = 'n', long, default_value_t = 10)]
    games: u32,

    /// Give up on a snake game after this many ticks
    #[arg(long, default_value_t = 10_000)]
    max_ticks: u64,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<(), ScoreError> {
    let cli = Cli::parse();

    let level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    let mut store = MemoryScoreStore::new();
    let mut rng = GameRng::new(cli.seed);
    info!(game = ?cli.game, seed = rng.seed(), games = cli.games, "starting simulation");

    if matches!(cli.game, GameArg::TicTacToe | GameArg::All) {
        play_tictactoe(&cli, &mut rng, &mut store)?;
    }
    if matches!(cli.game, GameArg::Snake | GameArg::All) {
        play_snake(&cli, &mut store)?;
    }
    if matches!(cli.game, GameArg::Twenty48 | GameArg::All) {
        play_twenty48(&cli, &mut rng, &mut store)?;
    }

    let best = store.load()?;
    for kind in GameKind::ALL {
        match best.get(kind) {
            Some(score) => info!(%kind, score, "best score"),
            None => info!(%kind, "no finished game"),
        }
    }
    Ok(())
}

/// A random X against the minimax O. The computer should never lose.
fn play_tictactoe(cli: &Cli, rng: &mut GameRng, store: &mut MemoryScoreStore) -> Result<(), ScoreError> {
    let mut game = TicTacToe::new(TicTacToeConfig::default());

    for round in 0..cli.games {
        if round > 0 {
            game.new_game();
        }
        while !game.is_terminal() {
            let result = if game.is_computer_turn() {
                game.play_computer_move()
            } else {
                let empty = game.board().empty_cells();
                match rng.choose(&empty) {
                    Some(&cell) => game.apply_move(cell),
                    None => break,
                }
            };
            if let Err(error) = result {
                warn!(%error, "tic-tac-toe move rejected");
                break;
            }
        }
        if game.status() == Status::Won(Mark::X) {
            warn!(round, "computer lost a tic-tac-toe game");
        }
        record_if_best(store, &game)?;
    }

    let tally = game.tally();
    info!(x_wins = tally.x_wins, o_wins = tally.o_wins, draws = tally.draws, "tic-tac-toe finished");
    Ok(())
}

fn play_snake(cli: &Cli, store: &mut MemoryScoreStore) -> Result<(), ScoreError> {
    for round in 0..cli.games {
        let seed = cli.seed.wrapping_add(u64::from(round));
        let mut game = SnakeGame::seeded(SnakeConfig::default(), seed);
        if let Err(error) = game.set_control_mode(ControlMode::Autopilot) {
            warn!(%error, "autopilot refused");
            continue;
        }

        while !game.is_terminal() && game.ticks() < cli.max_ticks {
            if let Err(error) = game.tick() {
                warn!(%error, "snake tick rejected");
                break;
            }
        }
        if !game.is_terminal() {
            info!(round, score = game.score(), "snake still alive at tick limit");
        }
        record_if_best(store, &game)?;
    }
    Ok(())
}

/// Random effective moves until the board locks.
fn play_twenty48(cli: &Cli, rng: &mut GameRng, store: &mut MemoryScoreStore) -> Result<(), ScoreError> {
    for round in 0..cli.games {
        let seed = cli.seed.wrapping_add(u64::from(round));
        let mut game = Twenty48Game::seeded(Twenty48Config::default(), seed);

        while !game.is_terminal() {
            let options: Vec<Direction> = Direction::ALL.into_iter().filter(|&d| game.can_move(d)).collect();
            let Some(&direction) = rng.choose(&options) else {
                break;
            };
            match game.move_tiles(direction) {
                Ok(transition) if transition.changed() => {}
                Ok(_) => {
                    warn!(%direction, "2048 move had no effect");
                    break;
                }
                Err(error) => {
                    warn!(%error, "2048 move rejected");
                    break;
                }
            }
        }
        info!(round, score = game.score(), max_tile = game.max_tile(), moves = game.moves(), "2048 finished");
        record_if_best(store, &game)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["arcade-sim", "--game", "2048", "-n", "3"]).unwrap();
        assert_eq!(cli.game, GameArg::Twenty48);
        assert_eq!(cli.games, 3);
        assert_eq!(cli.seed, 42);
    }

    #[test]
    fn test_twenty48_self_play_records_best() {
        let cli = Cli::try_parse_from(["arcade-sim", "--game", "2048", "-n", "1", "--seed", "5"]).unwrap();
        let mut rng = GameRng::new(cli.seed);
        let mut store = MemoryScoreStore::new();

        play_twenty48(&cli, &mut rng, &mut store).unwrap();

        let best = store.load().unwrap();
        assert!(best.get(GameKind::Twenty48).is_some());
        let missing: Vec<_> = GameKind::ALL.into_iter().filter(|&k| best.get(k).is_none()).collect();
        assert_eq!(missing, vec![GameKind::TicTacToe, GameKind::Snake]);
    }
}
