//! 2048: slide-and-merge on a 4×4 board.

mod board;
mod game;

pub use board::{slide_line, Board, Cells, MAX_TILE, SIZE};
pub use game::{MoveReport, Twenty48Config, Twenty48Game, Twenty48Intent, Twenty48Snapshot, Twenty48Status};
