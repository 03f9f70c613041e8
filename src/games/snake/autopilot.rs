//! Greedy single-ply autopilot.
//!
//! Each of the four directions is tried once. Directions that hit a wall
//! or the body are dropped; the rest are scored by the weighted terms in
//! `AutopilotWeights` and the highest score wins, first in
//! `Direction::ALL` order on ties. If nothing survives, the current
//! heading is kept and the next tick ends the game.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::trace;

use super::config::AutopilotWeights;
use super::field::{Field, Step};
use crate::core::{Coord, Direction};

/// A surviving direction and its score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub direction: Direction,
    pub score: i64,
}

/// Score every collision-free direction.
///
/// The reverse of `heading` is never offered while the body has more than
/// one segment, matching the rule for manual input.
#[must_use]
pub fn candidates(field: &Field<'_>, heading: Direction, weights: &AutopilotWeights) -> SmallVec<[Candidate; 4]> {
    Direction::ALL
        .into_iter()
        .filter(|&d| field.body.len() <= 1 || d != heading.opposite())
        .filter_map(|d| field.advance(d).map(|step| (d, step)))
        .map(|(direction, step)| Candidate {
            direction,
            score: score_step(field, &step, direction == heading, weights),
        })
        .collect()
}

/// Pick the next direction.
#[must_use]
pub fn choose_direction(field: &Field<'_>, heading: Direction, weights: &AutopilotWeights) -> Direction {
    let scored = candidates(field, heading, weights);

    let mut best: Option<Candidate> = None;
    for candidate in scored {
        trace!(direction = %candidate.direction, score = candidate.score, "autopilot candidate");
        if best.map_or(true, |b| candidate.score > b.score) {
            best = Some(candidate);
        }
    }

    best.map_or(heading, |b| b.direction)
}

fn score_step(field: &Field<'_>, step: &Step, straight: bool, weights: &AutopilotWeights) -> i64 {
    let head = step.head;
    let mut score = 0;

    if let Some(food) = field.food {
        score -= weights.food * i64::from(head.manhattan(food));
    }

    score += weights.wall * i64::from(field.bounds.distance_to_wall(head));
    score += weights.space * free_neighbors(field, step) as i64;

    if let Some(nearest) = field.power_ups.iter().map(|&p| head.manhattan(p)).min() {
        score -= weights.power_up * i64::from(nearest);
    }

    if straight {
        score += weights.straight;
    }

    score
}

/// Free cells around the new head once the body has moved.
fn free_neighbors(field: &Field<'_>, step: &Step) -> usize {
    let keep = if step.landing.grows() { field.body.len() } else { field.body.len().saturating_sub(1) };

    let mut occupied: FxHashSet<Coord> = field.body.iter().take(keep).copied().collect();
    occupied.insert(step.head);

    step.head
        .neighbors()
        .filter(|&c| field.bounds.contains(c) && !occupied.contains(&c))
        .count()
}
