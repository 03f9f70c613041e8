//! Best-score persistence.
//!
//! Engines never touch storage. A presentation layer owns a `ScoreStore`
//! and calls `record_if_best` once a session turns terminal.
//!
//! ## Storage Format
//!
//! `BestScores` is written with `bincode`: a map from `GameKind` to the
//! best score seen for that game. Games with no recorded score are absent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::error::ScoreError;
use crate::rules::{Engine, GameKind};

/// Best score per game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScores {
    best: BTreeMap<GameKind, u32>,
}

impl BestScores {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Best score for `kind`, if one was recorded.
    #[must_use]
    pub fn get(&self, kind: GameKind) -> Option<u32> {
        self.best.get(&kind).copied()
    }

    /// Record `score` if it beats the current best. Returns whether it did.
    ///
    /// A first score always counts, even 0.
    pub fn offer(&mut self, kind: GameKind, score: u32) -> bool {
        match self.best.get(&kind) {
            Some(&best) if best >= score => false,
            _ => {
                self.best.insert(kind, score);
                true
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (GameKind, u32)> + '_ {
        self.best.iter().map(|(&kind, &score)| (kind, score))
    }

    // === Encoding ===

    pub fn to_bytes(&self) -> Result<Vec<u8>, ScoreError> {
        bincode::serialize(self).map_err(ScoreError::Encode)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ScoreError> {
        bincode::deserialize(bytes).map_err(ScoreError::Decode)
    }
}

/// Where best scores live between sessions.
pub trait ScoreStore {
    /// Read the stored scores. An empty store yields `BestScores::default()`.
    fn load(&self) -> Result<BestScores, ScoreError>;

    /// Replace the stored scores.
    fn save(&mut self, scores: &BestScores) -> Result<(), ScoreError>;
}

/// Store that keeps the encoded bytes in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryScoreStore {
    bytes: Option<Vec<u8>>,
}

impl MemoryScoreStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from previously encoded bytes.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes: Some(bytes) }
    }

    /// Encoded contents, if anything was saved.
    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> Result<BestScores, ScoreError> {
        match &self.bytes {
            Some(bytes) => BestScores::from_bytes(bytes),
            None => Ok(BestScores::default()),
        }
    }

    fn save(&mut self, scores: &BestScores) -> Result<(), ScoreError> {
        self.bytes = Some(scores.to_bytes()?);
        Ok(())
    }
}

/// Persist the engine's score if the session is over and it is a new best.
///
/// Returns the recorded score, or `None` if the session is still running
/// or the score did not beat the stored best.
pub fn record_if_best<S, E>(store: &mut S, engine: &E) -> Result<Option<u32>, ScoreError>
where
    S: ScoreStore + ?Sized,
    E: Engine + ?Sized,
{
    if !engine.is_terminal() {
        return Ok(None);
    }

    let kind = engine.kind();
    let score = engine.score();
    let mut scores = store.load()?;
    if !scores.offer(kind, score) {
        debug!(%kind, score, "score below best");
        return Ok(None);
    }

    store.save(&scores)?;
    info!(%kind, score, "new best score");
    Ok(Some(score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Direction, ScriptedSource};
    use crate::games::twenty48::{Board, Twenty48Config, Twenty48Game};

    #[test]
    fn test_offer_keeps_maximum() {
        let mut scores = BestScores::new();
        assert!(scores.offer(GameKind::Snake, 0));
        assert!(scores.offer(GameKind::Snake, 40));
        assert!(!scores.offer(GameKind::Snake, 40));
        assert!(!scores.offer(GameKind::Snake, 10));
        assert_eq!(scores.get(GameKind::Snake), Some(40));
        assert_eq!(scores.get(GameKind::Twenty48), None);
    }

    #[test]
    fn test_bytes_survive_store() {
        let mut scores = BestScores::new();
        scores.offer(GameKind::TicTacToe, 3);
        scores.offer(GameKind::Twenty48, 2048);

        let mut store = MemoryScoreStore::new();
        assert_eq!(store.load().unwrap(), BestScores::default());
        store.save(&scores).unwrap();

        let reopened = MemoryScoreStore::from_bytes(store.bytes().unwrap().to_vec());
        let loaded = reopened.load().unwrap();
        assert_eq!(loaded, scores);
        let kinds: Vec<_> = loaded.iter().map(|(k, _)| k).collect();
        assert_eq!(kinds, vec![GameKind::TicTacToe, GameKind::Twenty48]);
    }

    #[test]
    fn test_garbage_fails_to_decode() {
        let store = MemoryScoreStore::from_bytes(vec![0xff, 0x01]);
        assert!(matches!(store.load(), Err(ScoreError::Decode(_))));
    }

    #[test]
    fn test_record_only_when_terminal() {
        let mut store = MemoryScoreStore::new();

        let running = Twenty48Game::seeded(Twenty48Config::default(), 5);
        assert_eq!(record_if_best(&mut store, &running).unwrap(), None);
        assert!(store.bytes().is_none());

        let cells = [
            [2, 2, 8, 16],
            [2, 4, 8, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
        ];
        let mut game = Twenty48Game::from_board(Twenty48Config::default(), ScriptedSource::new(), Board::from_cells(cells));
        game.move_tiles(Direction::Left).unwrap();
        assert!(game.is_terminal());

        assert_eq!(record_if_best(&mut store, &game).unwrap(), Some(4));
        assert_eq!(record_if_best(&mut store, &game).unwrap(), None);
        assert_eq!(store.load().unwrap().get(GameKind::Twenty48), Some(4));
    }
}
