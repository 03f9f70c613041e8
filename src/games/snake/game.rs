//! Snake session: direction buffering, ticks, growth and spawning.

use std::time::Duration;

use im::{OrdSet, Vector};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::autopilot;
use super::config::SnakeConfig;
use super::field::{Field, Landing};
use crate::core::error::{IntentError, IntentResult};
use crate::core::{Bounds, Coord, Direction, GameRng, RandomSource};
use crate::rules::{Engine, GameKind, Transition};

/// Run state of a snake session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnakeStatus {
    Running,
    Paused,
    GameOver,
}

/// Who steers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlMode {
    #[default]
    Manual,
    Autopilot,
}

/// Intents accepted by `SnakeGame`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnakeIntent {
    SetDirection(Direction),
    Tick,
    Pause,
    Resume,
    SetControlMode(ControlMode),
}

/// Explicit starting position, for puzzles and tests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakeLayout {
    /// Head first. Must be non-empty, on the grid and free of repeats.
    pub body: Vec<Coord>,
    pub direction: Direction,
    /// `None` places food at random.
    pub food: Option<Coord>,
    pub power_ups: Vec<Coord>,
}

/// Render view of a snake session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakeSnapshot {
    pub width: u32,
    pub height: u32,
    /// Head first.
    pub body: Vec<Coord>,
    pub direction: Direction,
    pub food: Option<Coord>,
    /// Sorted.
    pub power_ups: Vec<Coord>,
    pub score: u32,
    pub ticks: u64,
    pub interval_ms: u64,
    pub status: SnakeStatus,
    pub mode: ControlMode,
}

/// Snake game state machine.
///
/// Generic over the random source so food and power-up placement can be
/// replayed exactly.
#[derive(Clone, Debug)]
pub struct SnakeGame<R = GameRng> {
    config: SnakeConfig,
    bounds: Bounds,
    rng: R,
    /// Head first.
    body: Vector<Coord>,
    /// Direction of the last move.
    direction: Direction,
    /// Direction the next manual tick will take.
    pending: Direction,
    food: Option<Coord>,
    power_ups: OrdSet<Coord>,
    score: u32,
    ticks: u64,
    status: SnakeStatus,
    mode: ControlMode,
}

impl SnakeGame<GameRng> {
    /// Create a seeded game with the default random source.
    #[must_use]
    pub fn seeded(config: SnakeConfig, seed: u64) -> Self {
        Self::new(config, GameRng::new(seed))
    }
}

impl<R: RandomSource> SnakeGame<R> {
    /// Create a game with the snake at the centre heading right.
    pub fn new(config: SnakeConfig, rng: R) -> Self {
        let mut game = Self::blank(config, rng);
        game.reset_board();
        game
    }

    /// Create a game from an explicit layout.
    ///
    /// # Panics
    ///
    /// If the layout does not fit the grid, the body is not a connected
    /// chain, or two things share a cell.
    pub fn with_layout(config: SnakeConfig, rng: R, layout: SnakeLayout) -> Self {
        let mut game = Self::blank(config, rng);
        let bounds = game.bounds;

        assert!(!layout.body.is_empty(), "Snake body must not be empty");
        for (i, cell) in layout.body.iter().enumerate() {
            assert!(bounds.contains(*cell), "Body segment {cell} is off the grid");
            assert!(!layout.body[..i].contains(cell), "Body segment {cell} repeats");
        }
        for pair in layout.body.windows(2) {
            assert!(
                pair[0].manhattan(pair[1]) == 1,
                "Body segments {} and {} are not adjacent",
                pair[0],
                pair[1]
            );
        }
        for cell in layout.food.iter().chain(layout.power_ups.iter()) {
            assert!(bounds.contains(*cell), "Item at {cell} is off the grid");
            assert!(!layout.body.contains(cell), "Item at {cell} overlaps the body");
        }
        for (i, cell) in layout.power_ups.iter().enumerate() {
            assert!(!layout.power_ups[..i].contains(cell), "Power-up at {cell} repeats");
            assert!(layout.food != Some(*cell), "Power-up at {cell} overlaps the food");
        }

        game.body = layout.body.into_iter().collect();
        game.direction = layout.direction;
        game.pending = layout.direction;
        game.power_ups = layout.power_ups.into_iter().collect();
        game.food = layout.food;
        if game.food.is_none() {
            game.food = game.random_free_cell();
        }
        game
    }

    fn blank(config: SnakeConfig, rng: R) -> Self {
        config.validate();
        Self {
            bounds: Bounds::new(config.width, config.height),
            rng,
            body: Vector::new(),
            direction: Direction::Right,
            pending: Direction::Right,
            food: None,
            power_ups: OrdSet::new(),
            score: 0,
            ticks: 0,
            status: SnakeStatus::Running,
            mode: ControlMode::Manual,
            config,
        }
    }

    fn reset_board(&mut self) {
        let center = self.bounds.center();
        self.body = (0..self.config.initial_length as i32)
            .map(|i| Coord::new(center.x - i, center.y))
            .collect();
        self.direction = Direction::Right;
        self.pending = Direction::Right;
        self.power_ups = OrdSet::new();
        self.food = None;
        self.food = self.random_free_cell();
        self.score = 0;
        self.ticks = 0;
        self.status = SnakeStatus::Running;
    }

    fn field(&self) -> Field<'_> {
        Field {
            bounds: self.bounds,
            body: &self.body,
            food: self.food,
            power_ups: &self.power_ups,
        }
    }

    fn random_free_cell(&mut self) -> Option<Coord> {
        let free: Vec<Coord> = self.field().free_cells().collect();
        if free.is_empty() {
            None
        } else {
            Some(free[self.rng.pick_index(free.len())])
        }
    }

    // === Accessors ===

    pub fn config(&self) -> &SnakeConfig {
        &self.config
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Body segments, head first.
    pub fn body(&self) -> &Vector<Coord> {
        &self.body
    }

    #[must_use]
    pub fn head(&self) -> Coord {
        self.field().head()
    }

    /// Direction of the last move.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn food(&self) -> Option<Coord> {
        self.food
    }

    pub fn power_ups(&self) -> &OrdSet<Coord> {
        &self.power_ups
    }

    pub fn status(&self) -> SnakeStatus {
        self.status
    }

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    /// Ticks survived this game.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Delay before the next tick. Shrinks as the score grows, down to the
    /// configured floor.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        let steps = u64::from(self.score / self.config.food_reward.max(1));
        let cut = steps.saturating_mul(self.config.interval_step_ms);
        let ms = self
            .config
            .base_interval_ms
            .saturating_sub(cut)
            .max(self.config.min_interval_ms);
        Duration::from_millis(ms)
    }

    // === Intents ===

    /// Buffer the direction for the next tick.
    ///
    /// Rejected when the game is over or paused, while the autopilot
    /// steers, and when it would reverse a body longer than one segment.
    pub fn set_direction(&mut self, direction: Direction) -> IntentResult<Transition> {
        match self.status {
            SnakeStatus::GameOver => return Err(IntentError::GameFinished),
            SnakeStatus::Paused => return Err(IntentError::Paused),
            SnakeStatus::Running => {}
        }
        if self.mode == ControlMode::Autopilot {
            return Err(IntentError::AutopilotEngaged);
        }
        if self.body.len() > 1 && direction == self.direction.opposite() {
            return Err(IntentError::ReverseDirection);
        }
        if direction == self.pending {
            return Ok(Transition::Unchanged);
        }
        self.pending = direction;
        Ok(Transition::Changed)
    }

    /// Direction the autopilot would take from the current position.
    #[must_use]
    pub fn autopilot_direction(&self) -> Direction {
        autopilot::choose_direction(&self.field(), self.direction, &self.config.weights)
    }

    /// Advance the snake one cell.
    pub fn tick(&mut self) -> IntentResult<Transition> {
        match self.status {
            SnakeStatus::GameOver => return Err(IntentError::GameFinished),
            SnakeStatus::Paused => return Err(IntentError::Paused),
            SnakeStatus::Running => {}
        }

        let direction = match self.mode {
            ControlMode::Autopilot => self.autopilot_direction(),
            ControlMode::Manual => self.pending,
        };
        self.direction = direction;
        self.pending = direction;

        let Some(step) = self.field().advance(direction) else {
            return Ok(self.finish("collision"));
        };

        self.body.push_front(step.head);
        self.ticks += 1;

        match step.landing {
            Landing::Empty => {
                self.body.pop_back();
            }
            Landing::Food => {
                self.score += self.config.food_reward;
                self.food = None;
                self.food = self.random_free_cell();
                debug!(score = self.score, length = self.body.len(), "snake ate food");
                if self.food.is_none() {
                    return Ok(self.finish("grid full"));
                }
                self.maybe_spawn_power_up();
            }
            Landing::PowerUp => {
                self.power_ups.remove(&step.head);
                self.score += self.config.power_up_reward;
                debug!(score = self.score, length = self.body.len(), "snake ate power-up");
            }
        }

        Ok(Transition::Changed)
    }

    fn maybe_spawn_power_up(&mut self) {
        if self.power_ups.len() >= self.config.max_power_ups {
            return;
        }
        if !self.rng.chance(self.config.power_up_chance) {
            return;
        }
        if let Some(cell) = self.random_free_cell() {
            self.power_ups.insert(cell);
            debug!(%cell, "power-up spawned");
        }
    }

    fn finish(&mut self, cause: &str) -> Transition {
        self.status = SnakeStatus::GameOver;
        info!(cause, score = self.score, length = self.body.len(), ticks = self.ticks, "snake game over");
        Transition::Finished
    }

    pub fn pause(&mut self) -> IntentResult<Transition> {
        match self.status {
            SnakeStatus::Running => {
                self.status = SnakeStatus::Paused;
                Ok(Transition::Changed)
            }
            SnakeStatus::Paused => Err(IntentError::Paused),
            SnakeStatus::GameOver => Err(IntentError::GameFinished),
        }
    }

    pub fn resume(&mut self) -> IntentResult<Transition> {
        match self.status {
            SnakeStatus::Paused => {
                self.status = SnakeStatus::Running;
                Ok(Transition::Changed)
            }
            SnakeStatus::Running => Err(IntentError::NotPaused),
            SnakeStatus::GameOver => Err(IntentError::GameFinished),
        }
    }

    /// Hand steering to the autopilot or back.
    ///
    /// Manual control resumes in the direction of the last move.
    pub fn set_control_mode(&mut self, mode: ControlMode) -> IntentResult<Transition> {
        if self.status == SnakeStatus::GameOver {
            return Err(IntentError::GameFinished);
        }
        if mode == self.mode {
            return Ok(Transition::Unchanged);
        }
        self.mode = mode;
        self.pending = self.direction;
        info!(?mode, "snake control mode");
        Ok(Transition::Changed)
    }
}

impl<R: RandomSource> Engine for SnakeGame<R> {
    type Intent = SnakeIntent;
    type Snapshot = SnakeSnapshot;

    fn kind(&self) -> GameKind {
        GameKind::Snake
    }

    /// Control mode survives a restart.
    fn new_game(&mut self) {
        self.reset_board();
        info!(width = self.bounds.width, height = self.bounds.height, "new snake game");
    }

    fn apply(&mut self, intent: SnakeIntent) -> IntentResult<Transition> {
        let result = match intent {
            SnakeIntent::SetDirection(direction) => self.set_direction(direction),
            SnakeIntent::Tick => self.tick(),
            SnakeIntent::Pause => self.pause(),
            SnakeIntent::Resume => self.resume(),
            SnakeIntent::SetControlMode(mode) => self.set_control_mode(mode),
        };
        if let Err(error) = &result {
            debug!(?intent, %error, "snake intent rejected");
        }
        result
    }

    fn snapshot(&self) -> SnakeSnapshot {
        SnakeSnapshot {
            width: self.bounds.width,
            height: self.bounds.height,
            body: self.body.iter().copied().collect(),
            direction: self.direction,
            food: self.food,
            power_ups: self.power_ups.iter().copied().collect(),
            score: self.score,
            ticks: self.ticks,
            interval_ms: self.tick_interval().as_millis() as u64,
            status: self.status,
            mode: self.mode,
        }
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn is_terminal(&self) -> bool {
        self.status == SnakeStatus::GameOver
    }
}
