//! Read-only view of the playing field and the one-step movement rule.

use im::{OrdSet, Vector};

use crate::core::{Bounds, Coord, Direction};

/// What the head would land on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Landing {
    Empty,
    Food,
    PowerUp,
}

impl Landing {
    /// Whether the body keeps its tail this tick.
    #[must_use]
    pub fn grows(self) -> bool {
        !matches!(self, Landing::Empty)
    }
}

/// A collision-free step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub head: Coord,
    pub landing: Landing,
}

/// Borrowed view of everything movement depends on.
#[derive(Clone, Copy, Debug)]
pub struct Field<'a> {
    pub bounds: Bounds,
    /// Head first.
    pub body: &'a Vector<Coord>,
    pub food: Option<Coord>,
    pub power_ups: &'a OrdSet<Coord>,
}

impl<'a> Field<'a> {
    /// Current head. The body is never empty.
    #[must_use]
    pub fn head(&self) -> Coord {
        self.body.front().copied().unwrap_or_default()
    }

    /// What occupies `cell`, ignoring the body.
    #[must_use]
    pub fn landing(&self, cell: Coord) -> Landing {
        if self.food == Some(cell) {
            Landing::Food
        } else if self.power_ups.contains(&cell) {
            Landing::PowerUp
        } else {
            Landing::Empty
        }
    }

    /// Whether `cell` would be occupied after the head moves there.
    ///
    /// Without growth the tail leaves its cell on the same tick, so the
    /// tail cell is free to enter.
    #[must_use]
    pub fn hits_body(&self, cell: Coord, grows: bool) -> bool {
        let keep = if grows { self.body.len() } else { self.body.len().saturating_sub(1) };
        self.body.iter().take(keep).any(|&segment| segment == cell)
    }

    /// Move the head one cell in `direction`, or `None` on a wall or body hit.
    #[must_use]
    pub fn advance(&self, direction: Direction) -> Option<Step> {
        let head = self.head().step(direction);
        if !self.bounds.contains(head) {
            return None;
        }
        let landing = self.landing(head);
        if self.hits_body(head, landing.grows()) {
            return None;
        }
        Some(Step { head, landing })
    }

    /// Cells free of body, food and power-ups, row-major.
    pub fn free_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.bounds.cells().filter(move |&c| {
            self.food != Some(c) && !self.power_ups.contains(&c) && !self.body.iter().any(|&s| s == c)
        })
    }
}
