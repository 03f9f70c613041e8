//! 2048 session: moves, tile spawning and win/loss detection.
//!
//! ## Key Features
//!
//! - A move that changes no cell is accepted but spawns nothing
//! - Reaching the target tile is advisory: play continues in `Won`
//! - `GameOver` is the only terminal status

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::board::{Board, Cells};
use crate::core::error::{IntentError, IntentResult};
use crate::core::{Direction, GameRng, RandomSource};
use crate::rules::{Engine, GameKind, Transition};

/// 2048 configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Twenty48Config {
    /// Tile that wins the game (default: 2048).
    pub target_tile: u32,

    /// Probability that a spawned tile is a 4 rather than a 2 (default: 0.1).
    pub four_chance: f64,

    /// Tiles placed on an empty board by `new_game` (default: 2).
    pub starting_tiles: usize,
}

impl Default for Twenty48Config {
    fn default() -> Self {
        Self {
            target_tile: 2048,
            four_chance: 0.1,
            starting_tiles: 2,
        }
    }
}

impl Twenty48Config {
    /// Set the winning tile.
    #[must_use]
    pub fn with_target_tile(mut self, target: u32) -> Self {
        self.target_tile = target;
        self
    }

    /// Set the probability of spawning a 4.
    #[must_use]
    pub fn with_four_chance(mut self, chance: f64) -> Self {
        self.four_chance = chance;
        self
    }

    /// Set how many tiles a fresh board starts with.
    #[must_use]
    pub fn with_starting_tiles(mut self, count: usize) -> Self {
        self.starting_tiles = count;
        self
    }

    pub(crate) fn validate(&self) {
        assert!(
            self.target_tile >= 4 && self.target_tile.is_power_of_two(),
            "Target tile must be a power of two of at least 4"
        );
        assert!(
            (0.0..=1.0).contains(&self.four_chance),
            "Four chance must be within [0, 1]"
        );
        assert!(self.starting_tiles <= 16, "At most 16 starting tiles fit on the board");
    }
}

/// Status of a 2048 session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Twenty48Status {
    InProgress,
    /// Target reached. Moves are still accepted.
    Won,
    GameOver,
}

/// Intents accepted by `Twenty48Game`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Twenty48Intent {
    Move(Direction),
}

/// What the last effective move did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    pub direction: Direction,
    /// Points scored by merges.
    pub gained: u32,
    /// Row-major index and value of the spawned tile.
    pub spawned: Option<(usize, u32)>,
    /// Set only on the move that first reached the target.
    pub newly_won: bool,
}

/// Render view of a 2048 session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Twenty48Snapshot {
    pub cells: Cells,
    pub score: u32,
    pub moves: u32,
    pub status: Twenty48Status,
    pub max_tile: u32,
    pub last_move: Option<MoveReport>,
}

/// 2048 game state machine.
#[derive(Clone, Debug)]
pub struct Twenty48Game<R = GameRng> {
    config: Twenty48Config,
    rng: R,
    board: Board,
    score: u32,
    moves: u32,
    status: Twenty48Status,
    /// Whether the target has been reached this game. A win fires once.
    won: bool,
    last_move: Option<MoveReport>,
}

impl Twenty48Game<GameRng> {
    /// Create a seeded game with the default random source.
    #[must_use]
    pub fn seeded(config: Twenty48Config, seed: u64) -> Self {
        Self::new(config, GameRng::new(seed))
    }
}

impl<R: RandomSource> Twenty48Game<R> {
    /// Create a game with `starting_tiles` random tiles.
    pub fn new(config: Twenty48Config, rng: R) -> Self {
        let mut game = Self::from_board(config, rng, Board::new());
        game.reset_board();
        game
    }

    /// Create a game from an explicit board. No tile is spawned; the
    /// status is derived from the board.
    pub fn from_board(config: Twenty48Config, rng: R, board: Board) -> Self {
        config.validate();
        let mut game = Self {
            config,
            rng,
            board,
            score: 0,
            moves: 0,
            status: Twenty48Status::InProgress,
            won: false,
            last_move: None,
        };
        game.update_status();
        game
    }

    fn reset_board(&mut self) {
        self.board = Board::new();
        self.score = 0;
        self.moves = 0;
        self.won = false;
        self.last_move = None;
        self.status = Twenty48Status::InProgress;
        for _ in 0..self.config.starting_tiles {
            self.spawn_tile();
        }
        self.update_status();
    }

    /// Place a 2 or a 4 on a random empty cell.
    fn spawn_tile(&mut self) -> Option<(usize, u32)> {
        let empty = self.board.empty_cells();
        if empty.is_empty() {
            return None;
        }
        let index = empty[self.rng.pick_index(empty.len())];
        let value = if self.rng.chance(self.config.four_chance) { 4 } else { 2 };
        self.board.set_flat(index, value);
        Some((index, value))
    }

    /// Recompute the status. Returns true if the target was reached for the
    /// first time.
    fn update_status(&mut self) -> bool {
        let newly_won = !self.won && self.board.max_tile() >= self.config.target_tile;
        if newly_won {
            self.won = true;
            self.status = Twenty48Status::Won;
        }
        if !self.board.has_moves() {
            self.status = Twenty48Status::GameOver;
        }
        newly_won
    }

    // === Accessors ===

    pub fn config(&self) -> &Twenty48Config {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> Twenty48Status {
        self.status
    }

    /// Effective moves made this game.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[must_use]
    pub fn max_tile(&self) -> u32 {
        self.board.max_tile()
    }

    pub fn last_move(&self) -> Option<&MoveReport> {
        self.last_move.as_ref()
    }

    /// Whether sliding in `direction` would change the board.
    #[must_use]
    pub fn can_move(&self, direction: Direction) -> bool {
        self.status != Twenty48Status::GameOver && self.board.can_move(direction)
    }

    // === Intents ===

    /// Slide every tile in `direction`.
    ///
    /// A move that changes nothing returns `Unchanged` and spawns no tile.
    pub fn move_tiles(&mut self, direction: Direction) -> IntentResult<Transition> {
        if self.status == Twenty48Status::GameOver {
            return Err(IntentError::GameFinished);
        }

        let (next, gained) = self.board.shift(direction);
        if next == self.board {
            return Ok(Transition::Unchanged);
        }

        self.board = next;
        self.score = self.score.saturating_add(gained);
        self.moves += 1;
        let spawned = self.spawn_tile();
        let newly_won = self.update_status();

        self.last_move = Some(MoveReport {
            direction,
            gained,
            spawned,
            newly_won,
        });
        debug!(%direction, gained, score = self.score, "2048 move");

        if newly_won {
            info!(score = self.score, moves = self.moves, target_tile = self.config.target_tile, "2048 target reached");
        }
        if self.status == Twenty48Status::GameOver {
            info!(score = self.score, moves = self.moves, max_tile = self.board.max_tile(), "2048 game over");
            return Ok(Transition::Finished);
        }
        Ok(Transition::Changed)
    }
}

impl<R: RandomSource> Engine for Twenty48Game<R> {
    type Intent = Twenty48Intent;
    type Snapshot = Twenty48Snapshot;

    fn kind(&self) -> GameKind {
        GameKind::Twenty48
    }

    fn new_game(&mut self) {
        self.reset_board();
        info!(tiles = self.config.starting_tiles, "new 2048 game");
    }

    fn apply(&mut self, intent: Twenty48Intent) -> IntentResult<Transition> {
        let Twenty48Intent::Move(direction) = intent;
        let result = self.move_tiles(direction);
        if let Err(error) = &result {
            debug!(?intent, %error, "2048 intent rejected");
        }
        result
    }

    fn snapshot(&self) -> Twenty48Snapshot {
        Twenty48Snapshot {
            cells: *self.board.cells(),
            score: self.score,
            moves: self.moves,
            status: self.status,
            max_tile: self.board.max_tile(),
            last_move: self.last_move,
        }
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn is_terminal(&self) -> bool {
        self.status == Twenty48Status::GameOver
    }
}
