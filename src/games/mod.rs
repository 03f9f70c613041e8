//! The three engines.
//!
//! Each is a self-contained state machine implementing
//! `rules::Engine`. They share geometry and RNG from `core` and nothing
//! else.

pub mod snake;
pub mod tictactoe;
pub mod twenty48;
