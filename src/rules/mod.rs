//! Engine trait for game implementations.
//!
//! The presentation layer drives every game through `Engine`: it sends
//! intents, receives `Transition`s or rejections, and renders snapshots.
//! It never reaches into game-specific state directly.

pub mod engine;

pub use engine::{Engine, GameKind, Transition};
