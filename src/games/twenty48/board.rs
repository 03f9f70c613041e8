//! 4×4 tile board and the slide-and-merge transform.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Direction;

/// Board side length.
pub const SIZE: usize = 4;

/// Largest tile a 4×4 board can reach: every cell full, the top one
/// built from spawned 4s.
pub const MAX_TILE: u32 = 1 << 17;

/// Row-major tile values. `0` is empty, anything else a power of two.
pub type Cells = [[u32; SIZE]; SIZE];

/// Slide one line toward index 0 and merge equal neighbours.
///
/// Merges happen in a single pass from the leading edge: a tile produced
/// by a merge does not merge again in the same move, so `[2, 2, 2, 2]`
/// becomes `[4, 4, 0, 0]`, never `[8, 0, 0, 0]`. Returns the new line and
/// the sum of merged tiles. Tiles too large to double stay apart.
#[must_use]
pub fn slide_line(line: [u32; SIZE]) -> ([u32; SIZE], u32) {
    let mut out = [0u32; SIZE];
    let mut gained: u32 = 0;
    let mut write = 0;
    let mut held: Option<u32> = None;

    for value in line.into_iter().filter(|&v| v != 0) {
        match held {
            Some(h) if h == value && h.checked_mul(2).is_some() => {
                out[write] = h * 2;
                gained = gained.saturating_add(h * 2);
                write += 1;
                held = None;
            }
            Some(h) => {
                out[write] = h;
                write += 1;
                held = Some(value);
            }
            None => held = Some(value),
        }
    }
    if let Some(h) = held {
        out[write] = h;
    }

    (out, gained)
}

/// The 2048 board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: Cells,
}

impl Board {
    /// An empty board.
    #[must_use]
    pub const fn new() -> Self {
        Self { cells: [[0; SIZE]; SIZE] }
    }

    /// Build a board from explicit rows.
    ///
    /// # Panics
    ///
    /// If a cell is neither 0 nor a power of two in `2..=MAX_TILE`.
    #[must_use]
    pub fn from_cells(cells: Cells) -> Self {
        for value in cells.iter().flatten() {
            assert!(
                *value == 0 || (value.is_power_of_two() && *value > 1),
                "Tile {value} is not a power of two"
            );
            assert!(*value <= MAX_TILE, "Tile {value} exceeds {MAX_TILE}");
        }
        Self { cells }
    }

    pub fn cells(&self) -> &Cells {
        &self.cells
    }

    /// Bounds-checked access. `None` if off the board.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Put a tile on a cell by flat row-major index.
    pub(crate) fn set_flat(&mut self, index: usize, value: u32) {
        self.cells[index / SIZE][index % SIZE] = value;
    }

    /// Row-major indices of empty cells.
    #[must_use]
    pub fn empty_cells(&self) -> SmallVec<[usize; SIZE * SIZE]> {
        self.cells
            .iter()
            .flatten()
            .enumerate()
            .filter(|(_, v)| **v == 0)
            .map(|(i, _)| i)
            .collect()
    }

    /// Largest tile on the board.
    #[must_use]
    pub fn max_tile(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Line `i` read in the direction of travel: the first element is
    /// the edge tiles slide toward.
    fn line(&self, direction: Direction, i: usize) -> [u32; SIZE] {
        let mut line = [0; SIZE];
        for (k, slot) in line.iter_mut().enumerate() {
            let far = SIZE - 1 - k;
            *slot = match direction {
                Direction::Left => self.cells[i][k],
                Direction::Right => self.cells[i][far],
                Direction::Up => self.cells[k][i],
                Direction::Down => self.cells[far][i],
            };
        }
        line
    }

    fn set_line(&mut self, direction: Direction, i: usize, line: [u32; SIZE]) {
        for (k, value) in line.into_iter().enumerate() {
            let far = SIZE - 1 - k;
            match direction {
                Direction::Left => self.cells[i][k] = value,
                Direction::Right => self.cells[i][far] = value,
                Direction::Up => self.cells[k][i] = value,
                Direction::Down => self.cells[far][i] = value,
            }
        }
    }

    /// Slide every line in `direction`. Returns the new board and the
    /// points scored by merges. No tile is spawned.
    #[must_use]
    pub fn shift(&self, direction: Direction) -> (Board, u32) {
        let mut next = *self;
        let mut gained: u32 = 0;
        for i in 0..SIZE {
            let (line, points) = slide_line(self.line(direction, i));
            next.set_line(direction, i, line);
            gained = gained.saturating_add(points);
        }
        (next, gained)
    }

    /// Whether sliding in `direction` would change any cell.
    #[must_use]
    pub fn can_move(&self, direction: Direction) -> bool {
        self.shift(direction).0 != *self
    }

    /// Whether any direction is effective: an empty cell exists or two
    /// orthogonal neighbours are equal.
    #[must_use]
    pub fn has_moves(&self) -> bool {
        let c = &self.cells;
        (0..SIZE).any(|r| {
            (0..SIZE).any(|col| {
                c[r][col] == 0
                    || (col + 1 < SIZE && c[r][col] == c[r][col + 1])
                    || (r + 1 < SIZE && c[r][col] == c[r + 1][col])
            })
        })
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            if r > 0 {
                f.write_str("/")?;
            }
            let parts: SmallVec<[String; SIZE]> = row.iter().map(u32::to_string).collect();
            f.write_str(&parts.join(","))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_line_pairs_merge_once() {
        assert_eq!(slide_line([2, 2, 2, 2]), ([4, 4, 0, 0], 8));
        assert_eq!(slide_line([2, 0, 2, 2]), ([4, 2, 0, 0], 4));
        assert_eq!(slide_line([4, 4, 8, 0]), ([8, 8, 0, 0], 8));
        assert_eq!(slide_line([0, 0, 0, 2]), ([2, 0, 0, 0], 0));
        assert_eq!(slide_line([2, 4, 2, 4]), ([2, 4, 2, 4], 0));
        assert_eq!(slide_line([0, 0, 0, 0]), ([0, 0, 0, 0], 0));
    }

    #[test]
    fn test_slide_line_never_overflows() {
        let top = 1 << 31;
        assert_eq!(slide_line([top, top, 0, 0]), ([top, top, 0, 0], 0));
        assert_eq!(slide_line([1 << 30, 1 << 30, 1 << 30, 1 << 30]), ([top, top, 0, 0], u32::MAX));
    }

    #[test]
    #[should_panic(expected = "exceeds 131072")]
    fn test_rejects_unreachable_tile() {
        let _ = Board::from_cells([[1 << 31, 1 << 31, 0, 0], [0; 4], [0; 4], [0; 4]]);
    }

    #[test]
    fn test_largest_tiles_merge() {
        let board = Board::from_cells([[MAX_TILE, MAX_TILE, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let (left, gained) = board.shift(Direction::Left);
        assert_eq!(left.cells()[0], [MAX_TILE * 2, 0, 0, 0]);
        assert_eq!(gained, MAX_TILE * 2);
    }

    #[test]
    fn test_shift_directions() {
        let board = Board::from_cells([
            [2, 2, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [2, 0, 0, 4],
        ]);

        let (left, gained) = board.shift(Direction::Left);
        assert_eq!(left.cells()[0], [4, 0, 0, 0]);
        assert_eq!(left.cells()[3], [2, 4, 0, 0]);
        assert_eq!(gained, 4);

        let (right, _) = board.shift(Direction::Right);
        assert_eq!(right.cells()[0], [0, 0, 0, 4]);
        assert_eq!(right.cells()[3], [0, 0, 2, 4]);

        let (up, gained) = board.shift(Direction::Up);
        assert_eq!(up.cells()[0], [4, 2, 0, 4]);
        assert_eq!(gained, 4);

        let (down, _) = board.shift(Direction::Down);
        assert_eq!(down.cells()[3], [4, 2, 0, 4]);
    }

    #[test]
    fn test_can_move_and_has_moves() {
        let locked = Board::from_cells([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ]);
        assert!(!locked.has_moves());
        for d in Direction::ALL {
            assert!(!locked.can_move(d));
        }

        let pair = Board::from_cells([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 8, 8],
        ]);
        assert!(pair.has_moves());
        assert!(pair.can_move(Direction::Left));
        assert!(!pair.can_move(Direction::Up));
    }

    #[test]
    fn test_empty_cells_and_max() {
        let board = Board::from_cells([
            [2, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 64, 0],
            [0, 0, 0, 8],
        ]);
        assert_eq!(board.empty_cells().len(), 13);
        assert_eq!(board.max_tile(), 64);
        assert_eq!(board.get(2, 2), Some(64));
        assert_eq!(board.get(4, 0), None);
    }

    #[test]
    #[should_panic(expected = "is not a power of two")]
    fn test_rejects_bad_tile() {
        let _ = Board::from_cells([[3, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
    }

    #[test]
    fn test_display() {
        let board = Board::from_cells([[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 4]]);
        assert_eq!(board.to_string(), "2,0,0,0/0,0,0,0/0,0,0,0/0,0,0,4");
    }
}
