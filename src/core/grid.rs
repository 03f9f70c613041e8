//! Grid geometry shared by the board games.
//!
//! ## Coordinates
//!
//! `Coord` uses signed components so a step off the edge is representable
//! and can be rejected by `Bounds::contains` instead of wrapping.
//! `y` grows downward: `Direction::Up` decrements it.

use serde::{Deserialize, Serialize};

/// A cell position on a 2-D grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Manhattan distance to `other`.
    #[must_use]
    pub fn manhattan(self, other: Coord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The four orthogonal neighbours, in `Direction::ALL` order.
    pub fn neighbors(self) -> impl Iterator<Item = Coord> {
        Direction::ALL.into_iter().map(move |d| self.step(d))
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four orthogonal directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in a fixed order. Tie-breaks rely on this order.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit step `(dx, dy)`.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// The direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

/// Fixed dimensions of a rectangular grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    /// Create bounds. Both dimensions must be non-zero.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Grid dimensions must be non-zero");
        Self { width, height }
    }

    /// Whether `coord` lies on the grid.
    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.y >= 0 && (coord.x as u32) < self.width && (coord.y as u32) < self.height
    }

    /// Steps from `coord` to the closest edge cell (0 on the border).
    #[must_use]
    pub fn distance_to_wall(&self, coord: Coord) -> u32 {
        let right = self.width as i32 - 1 - coord.x;
        let bottom = self.height as i32 - 1 - coord.y;
        coord.x.min(coord.y).min(right).min(bottom).max(0) as u32
    }

    /// The cell at the centre (rounded down).
    #[must_use]
    pub fn center(&self) -> Coord {
        Coord::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Coord> {
        let (w, h) = (self.width as i32, self.height as i32);
        (0..h).flat_map(move |y| (0..w).map(move |x| Coord::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_and_opposite() {
        let c = Coord::new(3, 3);
        for d in Direction::ALL {
            assert_eq!(c.step(d).step(d.opposite()), c);
        }
        assert_eq!(c.step(Direction::Up), Coord::new(3, 2));
        assert_eq!(c.step(Direction::Right), Coord::new(4, 3));
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(Coord::new(0, 0).manhattan(Coord::new(3, 4)), 7);
        assert_eq!(Coord::new(5, 1).manhattan(Coord::new(2, 1)), 3);
    }

    #[test]
    fn test_bounds_contains() {
        let b = Bounds::new(4, 3);
        assert!(b.contains(Coord::new(0, 0)));
        assert!(b.contains(Coord::new(3, 2)));
        assert!(!b.contains(Coord::new(4, 0)));
        assert!(!b.contains(Coord::new(0, 3)));
        assert!(!b.contains(Coord::new(-1, 1)));
    }

    #[test]
    fn test_distance_to_wall() {
        let b = Bounds::new(10, 10);
        assert_eq!(b.distance_to_wall(Coord::new(0, 5)), 0);
        assert_eq!(b.distance_to_wall(Coord::new(9, 5)), 0);
        assert_eq!(b.distance_to_wall(Coord::new(4, 5)), 4);
        assert_eq!(b.distance_to_wall(Coord::new(2, 7)), 2);
    }

    #[test]
    fn test_cells_row_major() {
        let b = Bounds::new(3, 2);
        let cells: Vec<_> = b.cells().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], Coord::new(0, 0));
        assert_eq!(cells[1], Coord::new(1, 0));
        assert_eq!(cells[3], Coord::new(0, 1));
    }

    #[test]
    #[should_panic(expected = "Grid dimensions must be non-zero")]
    fn test_zero_bounds() {
        let _ = Bounds::new(0, 5);
    }
}
