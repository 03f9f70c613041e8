//! Engine trait for game implementations.
//!
//! Games implement `Engine` to define:
//! - Which intents they accept
//! - How one intent changes the session
//! - What a renderer is allowed to see

use serde::{Deserialize, Serialize};

use crate::core::error::IntentResult;

/// Which game an engine plays. Keys persisted best scores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GameKind {
    TicTacToe,
    Snake,
    Twenty48,
}

impl GameKind {
    /// Every game, in a stable order.
    pub const ALL: [GameKind; 3] = [GameKind::TicTacToe, GameKind::Snake, GameKind::Twenty48];
}

impl std::fmt::Display for GameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameKind::TicTacToe => "tic-tac-toe",
            GameKind::Snake => "snake",
            GameKind::Twenty48 => "2048",
        };
        f.write_str(name)
    }
}

/// What an accepted intent did to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// State changed and play continues.
    Changed,
    /// Intent was legal but had no effect (e.g. a 2048 slide into a wall).
    Unchanged,
    /// State changed and the session is now terminal.
    Finished,
}

impl Transition {
    /// Whether the state changed.
    #[must_use]
    pub fn changed(self) -> bool {
        !matches!(self, Transition::Unchanged)
    }
}

/// Engine trait.
///
/// A session is exclusively owned by one presentation layer. Every
/// method completes synchronously.
///
/// ## Implementation Notes
///
/// - `apply`: On `Err` the session must be untouched
/// - `apply`: Once `is_terminal` is true, every intent is rejected
/// - `new_game`: Always accepted, replaces the whole session
/// - `snapshot`: Owned copy, never a view into mutable internals
pub trait Engine {
    /// Inputs this engine understands.
    type Intent;

    /// Immutable render view.
    type Snapshot: Serialize;

    /// Which game this is.
    fn kind(&self) -> GameKind;

    /// Discard the current session and start over.
    fn new_game(&mut self);

    /// Apply a single intent.
    fn apply(&mut self, intent: Self::Intent) -> IntentResult<Transition>;

    /// Capture the current state for rendering.
    fn snapshot(&self) -> Self::Snapshot;

    /// Current score.
    fn score(&self) -> u32;

    /// Whether the session accepts no further intents until `new_game`.
    fn is_terminal(&self) -> bool;

    // === Convenience Methods ===

    /// Apply a sequence of intents, stopping at the first rejection.
    ///
    /// Returns how many intents were accepted.
    fn apply_all<I>(&mut self, intents: I) -> usize
    where
        I: IntoIterator<Item = Self::Intent>,
    {
        let mut accepted = 0;
        for intent in intents {
            if self.apply(intent).is_err() {
                break;
            }
            accepted += 1;
        }
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_changed() {
        assert!(Transition::Changed.changed());
        assert!(Transition::Finished.changed());
        assert!(!Transition::Unchanged.changed());
    }

    #[test]
    fn test_game_kind_display() {
        assert_eq!(GameKind::Twenty48.to_string(), "2048");
        assert_eq!(GameKind::TicTacToe.to_string(), "tic-tac-toe");
        assert_eq!(GameKind::ALL.len(), 3);
    }
}
