//! Rejection reasons for intents and failures of the score store.
//!
//! Engines never panic or corrupt state on a bad intent: they return one
//! of these and leave the session exactly as it was.

use thiserror::Error;

pub type IntentResult<T> = Result<T, IntentError>;

/// Why an engine refused an intent.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentError {
    #[error("cell {index} is outside the board")]
    CellOutOfRange { index: usize },

    #[error("cell {index} is already taken")]
    CellOccupied { index: usize },

    #[error("the game is over; start a new game")]
    GameFinished,

    #[error("it is the computer's turn")]
    NotYourTurn,

    #[error("no computer player is to move")]
    NoComputerPlayer,

    #[error("the snake cannot reverse into itself")]
    ReverseDirection,

    #[error("direction input is ignored while the autopilot drives")]
    AutopilotEngaged,

    #[error("the game is paused")]
    Paused,

    #[error("the game is not paused")]
    NotPaused,
}

/// Failures reading or writing persisted best scores.
#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("failed to encode scores: {0}")]
    Encode(#[source] bincode::Error),

    #[error("failed to decode scores: {0}")]
    Decode(#[source] bincode::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let error = IntentError::CellOccupied { index: 4 };
        assert_eq!(error.to_string(), "cell 4 is already taken");

        let error = IntentError::CellOutOfRange { index: 9 };
        assert_eq!(error.to_string(), "cell 9 is outside the board");
    }
}
