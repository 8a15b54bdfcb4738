//! Strategy selection.
//!
//! ## Decision table
//!
//! | Condition (first match wins)                                     | Strategy   |
//! |------------------------------------------------------------------|------------|
//! | lethal available                                                 | Lethal     |
//! | endangered, or opponent strength > own x ratio                   | Defensive  |
//! | own strength > opponent x ratio, or opponent health <= threshold | Aggressive |
//! | otherwise                                                        | Balanced   |

use serde::{Deserialize, Serialize};

use super::config::AiConfig;
use super::evaluate::field_strength;
use super::lethal::can_kill_opponent;
use crate::core::{MatchState, PlayerId};

/// Turn plan chosen by the AI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    Lethal,
    Defensive,
    Aggressive,
    Balanced,
}

/// Inputs of the strategy decision, read from one side's point of view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardAssessment {
    pub own_strength: f64,
    pub opponent_strength: f64,
    pub own_health: i32,
    pub opponent_health: i32,
    /// Attack the opponent could swing with right now.
    pub opponent_ready_attack: i32,
    pub lethal_available: bool,
}

impl BoardAssessment {
    /// Assess the board for `player`.
    #[must_use]
    pub fn of(state: &MatchState, player: PlayerId) -> Self {
        let me = state.player(player);
        let them = state.player(player.opponent());
        Self {
            own_strength: field_strength(&me.field),
            opponent_strength: field_strength(&them.field),
            own_health: me.hero.health,
            opponent_health: them.hero.health,
            opponent_ready_attack: them.ready_attack(),
            lethal_available: can_kill_opponent(state, player),
        }
    }

    /// Own hero low, or the opponent's board can finish it.
    #[must_use]
    pub fn is_endangered(&self, config: &AiConfig) -> bool {
        self.own_health <= config.endangered_health || self.opponent_ready_attack >= self.own_health
    }
}

/// Pick a strategy from the decision table.
#[must_use]
pub fn select_strategy(assessment: &BoardAssessment, config: &AiConfig) -> Strategy {
    let ratio = config.dominance_ratio;
    if assessment.lethal_available {
        Strategy::Lethal
    } else if assessment.is_endangered(config)
        || assessment.opponent_strength > assessment.own_strength * ratio
    {
        Strategy::Defensive
    } else if assessment.own_strength > assessment.opponent_strength * ratio
        || assessment.opponent_health <= config.endangered_health
    {
        Strategy::Aggressive
    } else {
        Strategy::Balanced
    }
}
