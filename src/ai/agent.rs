//! AI turn orchestrator.
//!
//! `AiAgent::take_turn` is a pure function of the state it is handed: it
//! picks a strategy, then runs either the lethal sequence or the resource,
//! play, ability and attack phases, and finally ends the turn. Every step
//! is an `Intent` applied through the engine, so the AI can never do
//! anything a human could not.

use serde::{Deserialize, Serialize};

use super::config::AiConfig;
use super::lethal::execute_lethal_sequence;
use super::policy::{attack_phase, play_phase, use_hero_ability, use_resources};
use super::strategy::{select_strategy, BoardAssessment, Strategy};
use crate::core::error::{EngineError, EngineResult, IllegalAction};
use crate::core::{Intent, MatchState, PlayerId};
use crate::events::MatchEvent;
use crate::rules::{Engine, RulesEngine};

/// State after the AI's turn, with everything it did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnPlan {
    pub state: MatchState,
    /// Applied intents, in order.
    pub intents: Vec<Intent>,
    /// Events from every applied intent, in order.
    pub events: Vec<MatchEvent>,
}

impl TurnPlan {
    #[must_use]
    pub fn new(state: MatchState) -> Self {
        Self {
            state,
            intents: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Apply an intent through the engine.
    ///
    /// Returns `Ok(false)` if the rules reject it; internal errors propagate.
    pub fn apply(&mut self, engine: &Engine, player: PlayerId, intent: Intent) -> EngineResult<bool> {
        match engine.apply_intent(&mut self.state, player, &intent) {
            Ok(events) => {
                log::trace!("ai {} applied {:?}", player, intent);
                self.events.extend(events);
                self.intents.push(intent);
                Ok(true)
            }
            Err(EngineError::Illegal(reason)) => {
                log::debug!("ai {} skipped {}: {}", player, intent.label(), reason);
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// True once the match has ended.
    #[must_use]
    pub fn finished(&self) -> bool {
        self.state.game_over
    }
}

/// Heuristic AI opponent.
#[derive(Clone, Debug, Default)]
pub struct AiAgent {
    config: AiConfig,
}

impl AiAgent {
    #[must_use]
    pub fn new(config: AiConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// Strategy for `player` on this board.
    #[must_use]
    pub fn choose_strategy(&self, state: &MatchState, player: PlayerId) -> Strategy {
        select_strategy(&BoardAssessment::of(state, player), &self.config)
    }

    /// Play a whole turn for `player`, ending with `EndTurn` unless the
    /// match ends first.
    pub fn take_turn(&self, engine: &Engine, state: MatchState, player: PlayerId) -> EngineResult<TurnPlan> {
        if state.game_over {
            return Err(IllegalAction::GameOver.into());
        }
        if state.current_player != player {
            return Err(IllegalAction::NotYourTurn.into());
        }

        let assessment = BoardAssessment::of(&state, player);
        let endangered = assessment.is_endangered(&self.config);
        let strategy = select_strategy(&assessment, &self.config);
        log::debug!(
            "ai {} turn {}: {:?} (own {:.1} vs {:.1}, endangered: {})",
            player,
            state.turn,
            strategy,
            assessment.own_strength,
            assessment.opponent_strength,
            endangered
        );

        let mut plan = TurnPlan::new(state);
        if strategy == Strategy::Lethal {
            execute_lethal_sequence(engine, &mut plan, player)?;
        }
        if !plan.finished() {
            // Lethal can fall short (a secret, a surprise taunt); finish the
            // turn on the next best plan.
            let fallback = match strategy {
                Strategy::Lethal => Strategy::Aggressive,
                other => other,
            };
            use_resources(engine, &mut plan, player, &self.config, endangered)?;
            play_phase(engine, &mut plan, player, fallback, &self.config)?;
            use_hero_ability(engine, &mut plan, player)?;
            attack_phase(engine, &mut plan, player, &self.config)?;
        }
        if !plan.finished() {
            plan.apply(engine, player, Intent::EndTurn)?;
        }
        Ok(plan)
    }
}
