//! Tic-tac-toe against an unbeatable minimax opponent.
//!
//! - 3×3 board, X and O alternate, the opener is configurable
//! - A game ends when a row, column or diagonal holds three equal marks,
//!   or when all nine cells are filled
//! - The computer searches the full game tree, so it never loses

mod board;
mod game;
mod minimax;

pub use board::{Board, BoardParseError, Cell, Mark, Status, CELLS, LINES};
pub use game::{Tally, TicTacToe, TicTacToeConfig, TicTacToeIntent, TicTacToeSnapshot};
pub use minimax::{best_move, SearchResult, SearchStats};
