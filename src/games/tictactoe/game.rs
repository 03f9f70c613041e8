//! Tic-tac-toe session: turn order, status and the computer opponent.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::board::{Board, Cell, Mark, Status, CELLS};
use super::minimax::{best_move, SearchStats};
use crate::core::error::{IntentError, IntentResult};
use crate::rules::{Engine, GameKind, Transition};

/// Session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicTacToeConfig {
    /// Who opens each game.
    pub first: Mark,

    /// Mark played by the minimax opponent. `None` for two humans.
    pub computer: Option<Mark>,
}

impl Default for TicTacToeConfig {
    fn default() -> Self {
        Self {
            first: Mark::X,
            computer: Some(Mark::O),
        }
    }
}

impl TicTacToeConfig {
    /// Set the opening player.
    #[must_use]
    pub fn with_first(mut self, first: Mark) -> Self {
        self.first = first;
        self
    }

    /// Let the computer play `mark`.
    #[must_use]
    pub fn with_computer(mut self, mark: Mark) -> Self {
        self.computer = Some(mark);
        self
    }

    /// Two human players.
    #[must_use]
    pub fn two_players(mut self) -> Self {
        self.computer = None;
        self
    }
}

/// Results across the games of one session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub x_wins: u32,
    pub o_wins: u32,
    pub draws: u32,
}

impl Tally {
    fn record(&mut self, status: Status) {
        match status {
            Status::Won(Mark::X) => self.x_wins += 1,
            Status::Won(Mark::O) => self.o_wins += 1,
            Status::Draw => self.draws += 1,
            Status::InProgress => {}
        }
    }

    /// Wins credited to `mark`.
    #[must_use]
    pub fn wins(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.x_wins,
            Mark::O => self.o_wins,
        }
    }
}

/// Intents accepted by `TicTacToe`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicTacToeIntent {
    /// A human marks a cell (0..9, row-major).
    Place(usize),
    /// Let the computer take its turn.
    ComputerMove,
}

/// Render view of a tic-tac-toe session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicTacToeSnapshot {
    pub cells: [Cell; CELLS],
    pub turn: Mark,
    pub status: Status,
    /// Cells of the completed line, for highlighting.
    pub winning_line: Option<[usize; 3]>,
    pub moves: u32,
    pub computer: Option<Mark>,
    pub tally: Tally,
}

/// Tic-tac-toe game state machine.
#[derive(Clone, Debug)]
pub struct TicTacToe {
    config: TicTacToeConfig,
    board: Board,
    turn: Mark,
    status: Status,
    moves: u32,
    tally: Tally,
    last_search: Option<SearchStats>,
}

impl TicTacToe {
    /// Create a session and start its first game.
    #[must_use]
    pub fn new(config: TicTacToeConfig) -> Self {
        let turn = config.first;
        Self {
            config,
            board: Board::new(),
            turn,
            status: Status::InProgress,
            moves: 0,
            tally: Tally::default(),
            last_search: None,
        }
    }

    pub fn config(&self) -> &TicTacToeConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Player to move.
    pub fn turn(&self) -> Mark {
        self.turn
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Marks placed in the current game.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// Statistics of the most recent computer search.
    pub fn last_search(&self) -> Option<SearchStats> {
        self.last_search
    }

    /// Whether the computer is the player to move.
    #[must_use]
    pub fn is_computer_turn(&self) -> bool {
        self.config.computer == Some(self.turn) && !self.status.is_terminal()
    }

    /// Mark `index` for the player to move, whoever that is.
    ///
    /// Rejected if the game is over, the index is off the board, or the
    /// cell is taken. On success the turn passes and the status is
    /// recomputed from the eight lines.
    pub fn apply_move(&mut self, index: usize) -> IntentResult<Transition> {
        if self.status.is_terminal() {
            return Err(IntentError::GameFinished);
        }
        self.board.place(index, self.turn)?;

        self.moves += 1;
        self.status = self.board.status();
        debug!(cell = index, mark = %self.turn, board = %self.board, "tic-tac-toe move");
        self.turn = self.turn.opponent();

        if self.status.is_terminal() {
            self.tally.record(self.status);
            info!(status = ?self.status, moves = self.moves, "tic-tac-toe game over");
            Ok(Transition::Finished)
        } else {
            Ok(Transition::Changed)
        }
    }

    /// Search for and play the computer's move.
    pub fn play_computer_move(&mut self) -> IntentResult<Transition> {
        if self.status.is_terminal() {
            return Err(IntentError::GameFinished);
        }
        if !self.is_computer_turn() {
            return Err(IntentError::NoComputerPlayer);
        }

        let result = best_move(&self.board, self.turn).ok_or(IntentError::GameFinished)?;
        debug!(cell = result.cell, score = result.score, nodes = result.stats.nodes, "computer chose");
        self.last_search = Some(result.stats);
        self.apply_move(result.cell)
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new(TicTacToeConfig::default())
    }
}

impl Engine for TicTacToe {
    type Intent = TicTacToeIntent;
    type Snapshot = TicTacToeSnapshot;

    fn kind(&self) -> GameKind {
        GameKind::TicTacToe
    }

    /// Clears the board; the tally carries over.
    fn new_game(&mut self) {
        self.board = Board::new();
        self.turn = self.config.first;
        self.status = Status::InProgress;
        self.moves = 0;
        self.last_search = None;
        info!(first = %self.turn, "new tic-tac-toe game");
    }

    fn apply(&mut self, intent: TicTacToeIntent) -> IntentResult<Transition> {
        let result = match intent {
            TicTacToeIntent::Place(index) => {
                if self.is_computer_turn() {
                    Err(IntentError::NotYourTurn)
                } else {
                    self.apply_move(index)
                }
            }
            TicTacToeIntent::ComputerMove => self.play_computer_move(),
        };
        if let Err(error) = &result {
            debug!(?intent, %error, "tic-tac-toe intent rejected");
        }
        result
    }

    fn snapshot(&self) -> TicTacToeSnapshot {
        TicTacToeSnapshot {
            cells: *self.board.cells(),
            turn: self.turn,
            status: self.status,
            winning_line: self.board.winning_line().map(|(_, line)| line),
            moves: self.moves,
            computer: self.config.computer,
            tally: self.tally,
        }
    }

    /// Wins by the human side: the mark the computer does not play, or X
    /// when two humans play.
    fn score(&self) -> u32 {
        let human = self.config.computer.map_or(Mark::X, Mark::opponent);
        self.tally.wins(human)
    }

    fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
