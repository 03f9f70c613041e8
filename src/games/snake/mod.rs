//! Snake with an optional heuristic autopilot.
//!
//! - N×M grid (20×20 by default), body ordered head first
//! - One cell per tick; food grows the body by one, power-ups grow it and
//!   pay a bonus
//! - Hitting a wall or the body ends the game. The cell the tail is
//!   leaving is free to enter on a non-growing tick
//! - The tick interval shrinks as the score rises, down to a floor

mod autopilot;
mod config;
mod field;
mod game;

pub use autopilot::{candidates, choose_direction, Candidate};
pub use config::{AutopilotWeights, SnakeConfig};
pub use field::{Field, Landing, Step};
pub use game::{ControlMode, SnakeGame, SnakeIntent, SnakeLayout, SnakeSnapshot, SnakeStatus};
