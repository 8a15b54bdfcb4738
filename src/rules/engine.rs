//! Rules engine trait and the match engine.
//!
//! `RulesEngine` is the contract the session layer and the AI drive:
//! - What intents are legal
//! - How an intent changes the state
//! - Whether the match is over
//!
//! `Engine` implements it for the duel rules. Intents are atomic: each one
//! is applied to a clone of the state (O(1) with `im`), and the clone is
//! committed only if every step succeeded.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, CardRegistry};
use crate::core::error::{EngineResult, IllegalAction};
use crate::core::{ActionRecord, GameRng, Intent, MatchConfig, MatchState, PlayerId, PlayerMap, TargetRef};
use crate::events::MatchEvent;

use super::{combat, deaths, play, turn};

/// Result of a completed match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Both heroes fell in the same resolution.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `apply_intent`: must be deterministic and must leave the state
///   untouched on error
/// - `is_terminal`: return `None` while the match continues
pub trait RulesEngine {
    /// Apply an intent from `player`.
    fn apply_intent(
        &self,
        state: &mut MatchState,
        player: PlayerId,
        intent: &Intent,
    ) -> EngineResult<Vec<MatchEvent>>;

    /// Check if the match is over.
    fn is_terminal(&self, state: &MatchState) -> Option<GameResult> {
        state.result.clone()
    }

    /// Candidate intents for `player`, before legality filtering.
    fn candidate_intents(&self, state: &MatchState, player: PlayerId) -> Vec<Intent>;

    // === Convenience Methods ===

    /// Check an intent against a scratch copy of the state.
    fn is_legal(&self, state: &MatchState, player: PlayerId, intent: &Intent) -> bool {
        let mut scratch = state.clone();
        self.apply_intent(&mut scratch, player, intent).is_ok()
    }

    /// Enumerate every legal intent for a player.
    fn legal_intents(&self, state: &MatchState, player: PlayerId) -> Vec<Intent> {
        self.candidate_intents(state, player)
            .into_iter()
            .filter(|intent| self.is_legal(state, player, intent))
            .collect()
    }
}

/// The duel rules engine.
///
/// Holds the card registry and the match configuration; match state lives
/// outside so one engine can run many matches.
#[derive(Clone, Debug)]
pub struct Engine {
    registry: Arc<CardRegistry>,
    config: MatchConfig,
}

impl Engine {
    /// Create an engine.
    #[must_use]
    pub fn new(registry: CardRegistry, config: MatchConfig) -> Self {
        Self::with_shared_registry(Arc::new(registry), config)
    }

    /// Create an engine over a registry shared with other engines.
    #[must_use]
    pub fn with_shared_registry(registry: Arc<CardRegistry>, config: MatchConfig) -> Self {
        Self { registry, config }
    }

    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Start a match from two deck lists.
    ///
    /// Instantiates every card, shuffles (unless disabled), deals opening
    /// hands, gives the second player the resource card and starts turn 1.
    pub fn new_match(&self, decks: &PlayerMap<Vec<CardId>>) -> EngineResult<MatchState> {
        let mut state = MatchState::new(&self.config);
        let rng = GameRng::new(self.config.seed);

        for (player, list) in decks.iter() {
            let mut cards: Vec<Card> = Vec::with_capacity(list.len());
            for id in list {
                let def = self.registry.lookup(*id)?;
                let instance = state.alloc_instance();
                cards.push(def.instantiate(instance));
            }
            if self.config.shuffle_decks {
                rng.for_context(&format!("deck-{}", player.index()))
                    .shuffle(&mut cards);
            }
            state.player_mut(player).deck = cards.into_iter().collect();
        }

        let mut events = Vec::new();
        for _ in 0..self.config.starting_hand_size {
            for player in PlayerId::both() {
                state.draw_card(player, &mut events);
            }
        }

        if let Some(coin) = self.config.coin_card {
            let def = self.registry.lookup(coin)?;
            let instance = state.alloc_instance();
            let second = state.player_mut(PlayerId::SECOND);
            if !second.hand_full() {
                second.hand.push_back(def.instantiate(instance));
                let hero = second.hero.name.clone();
                state.log(format!("{} receives {}", hero, def.name));
            }
        }

        log::info!(
            "match started: seed {}, {} vs {}",
            self.config.seed,
            state.player(PlayerId::FIRST).hero.name,
            state.player(PlayerId::SECOND).hero.name
        );
        turn::begin_turn(&mut state, &mut events);
        Ok(state)
    }

    fn try_apply(
        &self,
        state: &MatchState,
        player: PlayerId,
        intent: &Intent,
    ) -> EngineResult<(MatchState, Vec<MatchEvent>)> {
        if state.game_over {
            return Err(IllegalAction::GameOver.into());
        }
        if player != state.current_player {
            return Err(IllegalAction::NotYourTurn.into());
        }

        let mut next = state.clone();
        let mut events = Vec::new();
        let record = ActionRecord::new(player, intent.clone(), next.turn, next.next_sequence());
        let registry = self.registry.as_ref();

        match intent {
            Intent::PlayCard {
                hand_index,
                field_index,
                target,
            } => play::play_card(&mut next, registry, *hand_index, *field_index, *target, &mut events)?,
            Intent::Attack {
                attacker_index,
                target_index,
                is_hero_target,
            } => combat::resolve_attack(
                &mut next,
                registry,
                *attacker_index,
                *target_index,
                *is_hero_target,
                &mut events,
            )?,
            Intent::UseHeroAbility => play::use_hero_ability(&mut next, registry, &mut events)?,
            Intent::EndTurn => turn::end_turn(&mut next, &mut events)?,
        }
        deaths::finish_action(&mut next, registry, &mut events)?;
        next.record(record);
        Ok((next, events))
    }
}

impl RulesEngine for Engine {
    fn apply_intent(
        &self,
        state: &mut MatchState,
        player: PlayerId,
        intent: &Intent,
    ) -> EngineResult<Vec<MatchEvent>> {
        match self.try_apply(state, player, intent) {
            Ok((next, events)) => {
                *state = next;
                Ok(events)
            }
            Err(err) => {
                log::debug!("rejected {} from {}: {}", intent.label(), player, err);
                Err(err)
            }
        }
    }

    fn candidate_intents(&self, state: &MatchState, player: PlayerId) -> Vec<Intent> {
        if state.game_over || player != state.current_player {
            return Vec::new();
        }
        let me = state.player(player);
        let them = player.opponent();
        let characters: Vec<TargetRef> = PlayerId::both()
            .flat_map(|owner| {
                (0..state.player(owner).field.len())
                    .map(move |index| TargetRef::unit(owner, index))
                    .chain(std::iter::once(TargetRef::Hero(owner)))
            })
            .collect();

        let mut intents = Vec::new();
        for (hand_index, card) in me.hand.iter().enumerate() {
            if card.needs_chosen_target() {
                intents.extend(characters.iter().map(|t| Intent::play_at(hand_index, *t)));
                if matches!(card, Card::Unit(_)) {
                    intents.push(Intent::play(hand_index));
                }
            } else {
                intents.push(Intent::play(hand_index));
            }
        }
        for attacker_index in 0..me.field.len() {
            intents.push(Intent::attack_hero(attacker_index));
            for target_index in 0..state.player(them).field.len() {
                intents.push(Intent::attack_unit(attacker_index, target_index));
            }
        }
        intents.push(Intent::UseHeroAbility);
        intents.push(Intent::EndTurn);
        intents
    }
}
