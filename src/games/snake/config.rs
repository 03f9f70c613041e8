//! Snake configuration parameters.

use serde::{Deserialize, Serialize};

/// Weights of the autopilot's single-ply scoring terms.
///
/// Each term changes by at most a few units per step, so the weights
/// order the terms: food, then walls, then open space, then power-ups,
/// then keeping the current heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutopilotWeights {
    /// Per cell of Manhattan distance to the food (subtracted).
    pub food: i64,

    /// Per cell of distance to the nearest wall (added).
    pub wall: i64,

    /// Per free neighbour of the new head (added).
    pub space: i64,

    /// Per cell of distance to the nearest power-up (subtracted).
    pub power_up: i64,

    /// Flat bonus for not turning.
    pub straight: i64,
}

impl Default for AutopilotWeights {
    fn default() -> Self {
        Self {
            food: 10,
            wall: 4,
            space: 3,
            power_up: 2,
            straight: 1,
        }
    }
}

/// Snake configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnakeConfig {
    /// Grid width in cells (default: 20).
    pub width: u32,

    /// Grid height in cells (default: 20).
    pub height: u32,

    /// Body length at the start of a game (default: 3).
    /// The snake starts at the centre heading right, tail to the left.
    pub initial_length: u32,

    /// Points per food eaten (default: 10).
    pub food_reward: u32,

    /// Points per power-up eaten (default: 50).
    pub power_up_reward: u32,

    /// Probability that eating food also spawns a power-up (default: 0.25).
    pub power_up_chance: f64,

    /// Power-ups on the grid at once, at most (default: 3).
    pub max_power_ups: usize,

    /// Tick interval at score 0, in milliseconds (default: 150).
    pub base_interval_ms: u64,

    /// Tick interval floor, in milliseconds (default: 60).
    pub min_interval_ms: u64,

    /// Interval reduction per `food_reward` points scored (default: 5).
    pub interval_step_ms: u64,

    /// Autopilot scoring weights.
    pub weights: AutopilotWeights,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            initial_length: 3,
            food_reward: 10,
            power_up_reward: 50,
            power_up_chance: 0.25,
            max_power_ups: 3,
            base_interval_ms: 150,
            min_interval_ms: 60,
            interval_step_ms: 5,
            weights: AutopilotWeights::default(),
        }
    }
}

impl SnakeConfig {
    /// Set the grid size.
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the starting body length.
    #[must_use]
    pub fn with_initial_length(mut self, length: u32) -> Self {
        self.initial_length = length;
        self
    }

    /// Set the power-up spawn probability.
    #[must_use]
    pub fn with_power_up_chance(mut self, chance: f64) -> Self {
        self.power_up_chance = chance;
        self
    }

    /// Set the power-up cap.
    #[must_use]
    pub fn with_max_power_ups(mut self, max: usize) -> Self {
        self.max_power_ups = max;
        self
    }

    /// Set the autopilot weights.
    #[must_use]
    pub fn with_weights(mut self, weights: AutopilotWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Panics with a description of the first invalid field.
    pub(crate) fn validate(&self) {
        assert!(self.width > 0 && self.height > 0, "Grid dimensions must be non-zero");
        assert!(self.initial_length > 0, "Snake must start with at least 1 segment");
        assert!(
            self.initial_length <= self.width / 2 + 1,
            "Initial length must fit between the centre and the left wall"
        );
        assert!(
            (0.0..=1.0).contains(&self.power_up_chance),
            "Power-up chance must be within [0, 1]"
        );
        assert!(
            self.min_interval_ms <= self.base_interval_ms,
            "Minimum interval must not exceed the base interval"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SnakeConfig::default();
        assert_eq!((config.width, config.height), (20, 20));
        assert_eq!(config.initial_length, 3);
        config.validate();
    }

    #[test]
    fn test_builder() {
        let config = SnakeConfig::default()
            .with_size(8, 6)
            .with_initial_length(2)
            .with_power_up_chance(1.0)
            .with_max_power_ups(1);

        assert_eq!(config.width, 8);
        assert_eq!(config.height, 6);
        assert_eq!(config.initial_length, 2);
        assert_eq!(config.max_power_ups, 1);
        config.validate();
    }

    #[test]
    #[should_panic(expected = "Initial length must fit")]
    fn test_too_long() {
        SnakeConfig::default().with_size(4, 4).with_initial_length(4).validate();
    }

    #[test]
    #[should_panic(expected = "Power-up chance must be within")]
    fn test_bad_chance() {
        SnakeConfig::default().with_power_up_chance(1.5).validate();
    }

    #[test]
    fn test_serialization() {
        let config = SnakeConfig::default().with_size(10, 12);
        let json = serde_json::to_string(&config).unwrap();
        let back: SnakeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
