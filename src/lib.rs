//! # ai-games
//!
//! Deterministic engines for three small computer-opponent games.
//!
//! ## Design Principles
//!
//! 1. **Value In, Value Out**: Every engine is a synchronous state machine.
//!    An intent either applies completely or is rejected with the state
//!    untouched. No timers, rendering or storage live here.
//!
//! 2. **Injected Randomness**: Food, power-ups and tiles are placed through
//!    a `RandomSource`. Seeded runs replay exactly.
//!
//! 3. **Snapshots, Not Views**: Renderers get owned, serializable copies of
//!    state. They react to transitions instead of reaching inside.
//!
//! ## Modules
//!
//! - `core`: Grid geometry, RNG, error types
//! - `rules`: The `Engine` trait every game implements
//! - `games`: Tic-tac-toe (minimax), snake (autopilot) and 2048
//! - `scores`: Best-score records and the store they persist through

pub mod core;
pub mod games;
pub mod rules;
pub mod scores;

// Re-export commonly used types
pub use crate::core::{
    Bounds, Coord, Direction,
    GameRng, RandomSource, ScriptedSource,
    IntentError, IntentResult, ScoreError,
};

pub use crate::rules::{Engine, GameKind, Transition};

pub use crate::games::tictactoe::{
    best_move, Mark, TicTacToe, TicTacToeConfig, TicTacToeIntent, TicTacToeSnapshot,
};

pub use crate::games::snake::{
    ControlMode, SnakeConfig, SnakeGame, SnakeIntent, SnakeSnapshot, SnakeStatus,
};

pub use crate::games::twenty48::{
    Twenty48Config, Twenty48Game, Twenty48Intent, Twenty48Snapshot, Twenty48Status,
};

pub use crate::scores::{record_if_best, BestScores, MemoryScoreStore, ScoreStore};
