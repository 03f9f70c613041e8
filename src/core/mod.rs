//! Core types shared by every engine: geometry, RNG, errors.

pub mod error;
pub mod grid;
pub mod rng;

pub use error::{IntentError, IntentResult, ScoreError};
pub use grid::{Bounds, Coord, Direction};
pub use rng::{GameRng, RandomSource, ScriptedSource};
