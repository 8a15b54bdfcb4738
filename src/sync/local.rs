//! Human vs AI on one machine.
//!
//! The whole engine, AI included, runs next to the player. When the human
//! ends the turn, the AI plays its entire turn at once and the result comes
//! back in the same update.

use serde::{Deserialize, Serialize};

use super::snapshot::Snapshot;
use crate::ai::AiAgent;
use crate::cards::CardId;
use crate::core::error::EngineResult;
use crate::core::{Intent, MatchState, PlayerId, PlayerMap};
use crate::events::MatchEvent;
use crate::rules::{Engine, RulesEngine};

/// Result of one human intent, including any AI turn it triggered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalUpdate {
    pub snapshot: Snapshot,
    pub events: Vec<MatchEvent>,
    /// What the AI did, in order. Empty unless the human ended the turn.
    pub ai_intents: Vec<Intent>,
}

/// A local match against the AI.
#[derive(Clone, Debug)]
pub struct LocalMatch {
    engine: Engine,
    agent: AiAgent,
    state: MatchState,
    human: PlayerId,
    log_cursor: usize,
}

impl LocalMatch {
    /// Start a match. If the AI has the first seat it plays its first turn
    /// right away.
    pub fn start(
        engine: Engine,
        agent: AiAgent,
        decks: &PlayerMap<Vec<CardId>>,
        human: PlayerId,
    ) -> EngineResult<Self> {
        let state = engine.new_match(decks)?;
        let mut local = Self {
            engine,
            agent,
            state,
            human,
            log_cursor: 0,
        };
        if local.state.current_player != human {
            local.run_ai()?;
        }
        Ok(local)
    }

    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    #[must_use]
    pub fn human(&self) -> PlayerId {
        self.human
    }

    #[must_use]
    pub fn ai(&self) -> PlayerId {
        self.human.opponent()
    }

    /// Full view for the human.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::full(&self.state, self.human)
    }

    /// Legal intents for the human right now.
    #[must_use]
    pub fn legal_intents(&self) -> Vec<Intent> {
        self.engine.legal_intents(&self.state, self.human)
    }

    /// Apply a human intent. Ending the turn runs the AI's whole turn.
    pub fn submit(&mut self, intent: &Intent) -> EngineResult<LocalUpdate> {
        let mut events = self.engine.apply_intent(&mut self.state, self.human, intent)?;
        let mut ai_intents = Vec::new();
        if !self.state.game_over && self.state.current_player != self.human {
            let (intents, ai_events) = self.run_ai()?;
            ai_intents = intents;
            events.extend(ai_events);
        }

        let animation = self.state.take_pending_animation();
        let snapshot = Snapshot::for_recipient(&self.state, self.human, self.log_cursor, animation);
        self.log_cursor = snapshot.log_cursor;
        Ok(LocalUpdate {
            snapshot,
            events,
            ai_intents,
        })
    }

    fn run_ai(&mut self) -> EngineResult<(Vec<Intent>, Vec<MatchEvent>)> {
        let ai = self.ai();
        let plan = self.agent.take_turn(&self.engine, self.state.clone(), ai)?;
        self.state = plan.state;
        Ok((plan.intents, plan.events))
    }
}
