//! AI tuning parameters.

use serde::{Deserialize, Serialize};

/// Heuristic thresholds for the AI opponent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    /// Units with at least this much attack count as strong (default: 4).
    pub strong_attack: i32,

    /// Own hero health at or below this is endangered (default: 12).
    /// Also the opponent health at which the AI turns aggressive.
    pub endangered_health: i32,

    /// One board must exceed the other by this factor to count as
    /// dominant (default: 1.5).
    pub dominance_ratio: f64,

    /// Upper bound on intents per turn before the AI ends its turn.
    pub max_actions: usize,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            strong_attack: 4,
            endangered_health: 12,
            dominance_ratio: 1.5,
            max_actions: 64,
        }
    }
}

impl AiConfig {
    #[must_use]
    pub fn with_strong_attack(mut self, attack: i32) -> Self {
        self.strong_attack = attack;
        self
    }

    #[must_use]
    pub fn with_endangered_health(mut self, health: i32) -> Self {
        self.endangered_health = health;
        self
    }

    #[must_use]
    pub fn with_dominance_ratio(mut self, ratio: f64) -> Self {
        self.dominance_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_max_actions(mut self, max: usize) -> Self {
        self.max_actions = max;
        self
    }
}
