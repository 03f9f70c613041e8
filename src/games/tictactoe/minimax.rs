//! Exhaustive minimax for the computer player.
//!
//! Terminal boards score `10 - depth` when the searching player has won,
//! `depth - 10` when the opponent has won and `0` for a draw, so faster
//! wins and slower losses are preferred. No pruning: the full 3×3 tree is
//! under 550k nodes from the empty board.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::board::{Board, Mark, Status};

/// Score of a win found at depth 0.
const WIN_SCORE: i32 = 10;

/// Statistics collected during one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Positions evaluated, root children included.
    pub nodes: u64,
}

/// Outcome of a search from the root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Chosen cell index.
    pub cell: usize,

    /// Minimax value of that cell for the searching player.
    pub score: i32,

    pub stats: SearchStats,
}

/// Best cell for `player` to mark next on `board`.
///
/// Returns `None` if the board is already decided. Among equally scored
/// moves the lowest cell index wins.
#[must_use]
pub fn best_move(board: &Board, player: Mark) -> Option<SearchResult> {
    if board.status().is_terminal() {
        return None;
    }

    let mut scratch = *board;
    let mut stats = SearchStats::default();
    let mut best: Option<(usize, i32)> = None;

    for cell in board.empty_cells() {
        // Cell is known empty, placement cannot fail.
        if scratch.place(cell, player).is_err() {
            continue;
        }
        let score = minimax(&mut scratch, player, player.opponent(), 0, &mut stats);
        scratch.clear(cell);

        trace!(cell, score, "minimax root candidate");
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((cell, score));
        }
    }

    best.map(|(cell, score)| SearchResult { cell, score, stats })
}

/// Value of `board` for `maximizer`, with `to_move` about to play.
fn minimax(board: &mut Board, maximizer: Mark, to_move: Mark, depth: i32, stats: &mut SearchStats) -> i32 {
    stats.nodes += 1;

    match board.status() {
        Status::Won(mark) if mark == maximizer => return WIN_SCORE - depth,
        Status::Won(_) => return depth - WIN_SCORE,
        Status::Draw => return 0,
        Status::InProgress => {}
    }

    let maximizing = to_move == maximizer;
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for cell in board.empty_cells() {
        if board.place(cell, to_move).is_err() {
            continue;
        }
        let score = minimax(board, maximizer, to_move.opponent(), depth + 1, stats);
        board.clear(cell);

        best = if maximizing { best.max(score) } else { best.min(score) };
    }

    best
}
