//! 3×3 board, marks and win detection.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::core::error::{IntentError, IntentResult};

/// Number of cells on the board.
pub const CELLS: usize = 9;

/// The eight winning triples: three rows, three columns, two diagonals.
pub const LINES: [[usize; 3]; 8] = [
    // rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// A player's mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mark::X => f.write_str("X"),
            Mark::O => f.write_str("O"),
        }
    }
}

/// Contents of one cell. `None` is empty.
pub type Cell = Option<Mark>;

/// Game status derived from the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    InProgress,
    Won(Mark),
    Draw,
}

impl Status {
    /// Whether no further moves are accepted.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::InProgress)
    }
}

/// Row-major 3×3 board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; CELLS],
}

impl Board {
    /// An empty board.
    #[must_use]
    pub const fn new() -> Self {
        Self { cells: [None; CELLS] }
    }

    /// Build a board from explicit cells.
    #[must_use]
    pub const fn from_cells(cells: [Cell; CELLS]) -> Self {
        Self { cells }
    }

    /// All cells, row-major.
    #[must_use]
    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    /// Bounds-checked cell access. `None` if `index` is off the board.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Put `mark` on an empty cell.
    pub fn place(&mut self, index: usize, mark: Mark) -> IntentResult<()> {
        match self.cells.get_mut(index) {
            None => Err(IntentError::CellOutOfRange { index }),
            Some(Some(_)) => Err(IntentError::CellOccupied { index }),
            Some(cell) => {
                *cell = Some(mark);
                Ok(())
            }
        }
    }

    /// Empty a cell. Used by search to undo a trial move.
    pub(crate) fn clear(&mut self, index: usize) {
        self.cells[index] = None;
    }

    /// Indices of empty cells in ascending order.
    #[must_use]
    pub fn empty_cells(&self) -> SmallVec<[usize; CELLS]> {
        (0..CELLS).filter(|&i| self.cells[i].is_none()).collect()
    }

    /// Number of marks placed.
    #[must_use]
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Whether every cell holds a mark.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// The first completed line and its owner, if any.
    #[must_use]
    pub fn winning_line(&self) -> Option<(Mark, [usize; 3])> {
        LINES.iter().find_map(|&line| {
            let [a, b, c] = line;
            match self.cells[a] {
                Some(m) if self.cells[b] == Some(m) && self.cells[c] == Some(m) => Some((m, line)),
                _ => None,
            }
        })
    }

    /// Status of a game played on this board.
    #[must_use]
    pub fn status(&self) -> Status {
        if let Some((mark, _)) = self.winning_line() {
            Status::Won(mark)
        } else if self.is_full() {
            Status::Draw
        } else {
            Status::InProgress
        }
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, cell) in self.cells.iter().enumerate() {
            let ch = match cell {
                Some(Mark::X) => 'X',
                Some(Mark::O) => 'O',
                None => '.',
            };
            write!(f, "{ch}")?;
            if i % 3 == 2 && i != CELLS - 1 {
                f.write_str("/")?;
            }
        }
        Ok(())
    }
}

/// Error parsing a board from text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardParseError {
    #[error("expected 9 cells, found {0}")]
    WrongLength(usize),

    #[error("unexpected character {0:?}")]
    BadChar(char),
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses `X`, `O` and `.`/`_`/`-` for empty. `/` and whitespace are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells: SmallVec<[Cell; CELLS]> = SmallVec::new();
        for ch in s.chars().filter(|c| !c.is_whitespace() && *c != '/') {
            let cell = match ch {
                'X' | 'x' => Some(Mark::X),
                'O' | 'o' => Some(Mark::O),
                '.' | '_' | '-' => None,
                other => return Err(BoardParseError::BadChar(other)),
            };
            cells.push(cell);
        }
        if cells.len() != CELLS {
            return Err(BoardParseError::WrongLength(cells.len()));
        }
        let mut board = Board::new();
        board.cells.copy_from_slice(&cells);
        Ok(board)
    }
}
