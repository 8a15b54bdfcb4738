//! Match state: heroes, players and the two-seat aggregate.
//!
//! ## PlayerState
//!
//! One seat's zones and resources:
//! - hero with its ability
//! - hand, deck (front = top), field, secrets, graveyard
//! - mana, max mana and temporary mana
//!
//! ## MatchState
//!
//! Both seats plus turn bookkeeping, the combat log, the pending animation
//! and the action history.
//!
//! Every zone is an `im::Vector`, so cloning a `MatchState` is O(1). The
//! engine relies on this to apply each intent to a scratch copy and commit
//! only on success; the AI relies on it to look ahead.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{ActionRecord, TargetRef};
use super::config::{AbilityDefinition, HeroDefinition, MAX_FIELD, MAX_HAND, MAX_MANA};
use super::error::{EngineResult, IllegalAction, InternalInconsistency};
use super::combat_log::CombatLog;
use super::player::{PlayerId, PlayerMap};
use crate::cards::{Card, InstanceId, SecretCard, UnitCard};
use crate::effects::Effect;
use crate::events::Animation;
use crate::rules::GameResult;

/// Runtime state of a hero ability.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroAbility {
    pub name: String,
    pub cost: u8,
    pub description: String,
    pub effects: Vec<Effect>,
    pub used_this_turn: bool,
}

impl From<&AbilityDefinition> for HeroAbility {
    fn from(def: &AbilityDefinition) -> Self {
        Self {
            name: def.name.clone(),
            cost: def.cost,
            description: def.description.clone(),
            effects: def.effects.clone(),
            used_this_turn: false,
        }
    }
}

/// A player's hero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub name: String,
    pub health: i32,
    pub max_health: i32,
    pub ability: HeroAbility,
}

impl Hero {
    /// Create a hero at full health.
    #[must_use]
    pub fn new(def: &HeroDefinition, health: i32) -> Self {
        Self {
            name: def.name.clone(),
            health,
            max_health: health,
            ability: HeroAbility::from(&def.ability),
        }
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Apply damage. Returns the amount dealt.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let amount = amount.max(0);
        self.health -= amount;
        amount
    }

    /// Restore health up to the maximum. Returns the amount healed.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = (self.health + amount.max(0)).min(self.max_health).max(before);
        self.health - before
    }
}

/// One seat's zones and resources.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub hero: Hero,
    pub hand: Vector<Card>,
    /// Front is the top of the deck.
    pub deck: Vector<Card>,
    pub field: Vector<UnitCard>,
    pub secrets: Vector<SecretCard>,
    pub graveyard: Vector<Card>,
    pub mana: u8,
    pub max_mana: u8,
    /// Bonus mana for the current turn only. Spent before `mana`.
    pub temporary_mana: u8,
}

impl PlayerState {
    /// Create a seat with empty zones.
    #[must_use]
    pub fn new(hero: Hero) -> Self {
        Self {
            hero,
            hand: Vector::new(),
            deck: Vector::new(),
            field: Vector::new(),
            secrets: Vector::new(),
            graveyard: Vector::new(),
            mana: 0,
            max_mana: 0,
            temporary_mana: 0,
        }
    }

    /// Mana that can be spent right now.
    #[must_use]
    pub fn available_mana(&self) -> u8 {
        self.mana.saturating_add(self.temporary_mana)
    }

    /// Pay `cost`, spending temporary mana first.
    pub fn spend_mana(&mut self, cost: u8) -> Result<(), IllegalAction> {
        let have = self.available_mana();
        if cost > have {
            return Err(IllegalAction::InsufficientMana { need: cost, have });
        }
        let from_temporary = cost.min(self.temporary_mana);
        self.temporary_mana -= from_temporary;
        self.mana -= cost - from_temporary;
        Ok(())
    }

    /// Add temporary mana, keeping the spendable total at or under the cap.
    pub fn gain_temporary_mana(&mut self, amount: u8) -> u8 {
        let room = MAX_MANA.saturating_sub(self.available_mana());
        let gained = amount.min(room);
        self.temporary_mana += gained;
        gained
    }

    #[must_use]
    pub fn field_full(&self) -> bool {
        self.field.len() >= MAX_FIELD
    }

    #[must_use]
    pub fn hand_full(&self) -> bool {
        self.hand.len() >= MAX_HAND
    }

    /// True if any unit on this field has taunt.
    #[must_use]
    pub fn has_taunt(&self) -> bool {
        self.field.iter().any(|u| u.has_taunt)
    }

    /// Total attack of units that could attack this turn.
    #[must_use]
    pub fn ready_attack(&self) -> i32 {
        self.field
            .iter()
            .filter(|u| u.can_attack())
            .map(|u| u.attack)
            .sum()
    }

    /// Unit at a field index.
    #[must_use]
    pub fn unit(&self, index: usize) -> Option<&UnitCard> {
        self.field.get(index)
    }

    #[must_use]
    pub fn unit_mut(&mut self, index: usize) -> Option<&mut UnitCard> {
        self.field.get_mut(index)
    }
}

/// Complete state of one match.
///
/// ## Example
///
/// ```
/// use duel_engine::core::{MatchConfig, MatchState, PlayerId};
///
/// let state = MatchState::new(&MatchConfig::default());
/// assert_eq!(state.turn, 1);
/// assert_eq!(state.current_player, PlayerId::FIRST);
/// assert_eq!(state.player(PlayerId::SECOND).hero.health, 30);
/// assert!(!state.game_over);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub players: PlayerMap<PlayerState>,
    pub current_player: PlayerId,
    /// Starts at 1 and increases by one per turn transition.
    pub turn: u32,
    pub game_over: bool,
    pub winner: Option<PlayerId>,
    pub result: Option<GameResult>,
    pub combat_log: CombatLog,
    pub pending_animation: Option<Animation>,
    pub history: Vector<ActionRecord>,
    next_instance: u32,
    /// Last turn number whose unit refresh has run.
    refreshed_turn: u32,
}

impl MatchState {
    /// Create a match with heroes in place and empty zones.
    ///
    /// Decks, opening hands and the first turn are set up by
    /// [`Engine::new_match`](crate::rules::Engine::new_match).
    #[must_use]
    pub fn new(config: &crate::core::MatchConfig) -> Self {
        let players = PlayerMap::new(|player| {
            PlayerState::new(Hero::new(&config.heroes[player], config.starting_health))
        });
        Self {
            players,
            current_player: PlayerId::FIRST,
            turn: 1,
            game_over: false,
            winner: None,
            result: None,
            combat_log: CombatLog::new(),
            pending_animation: None,
            history: Vector::new(),
            next_instance: 0,
            refreshed_turn: 0,
        }
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        &self.players[player]
    }

    pub fn player_mut(&mut self, player: PlayerId) -> &mut PlayerState {
        &mut self.players[player]
    }

    /// Seat whose turn it is.
    #[must_use]
    pub fn active(&self) -> &PlayerState {
        &self.players[self.current_player]
    }

    /// Allocate a fresh instance ID.
    pub fn alloc_instance(&mut self) -> InstanceId {
        let id = InstanceId(self.next_instance);
        self.next_instance += 1;
        id
    }

    /// Append a combat-log entry for the current turn.
    pub fn log(&mut self, text: impl Into<String>) {
        self.combat_log.push(self.turn, text);
    }

    /// Record an applied intent for replay.
    pub fn record(&mut self, record: ActionRecord) {
        self.history.push_back(record);
    }

    /// Next action sequence number.
    #[must_use]
    pub fn next_sequence(&self) -> u32 {
        self.history.len() as u32
    }

    /// Replace the pending animation.
    pub fn set_animation(&mut self, animation: Animation) {
        self.pending_animation = Some(animation);
    }

    /// Observe the pending animation once. Later calls return `None`.
    pub fn take_pending_animation(&mut self) -> Option<Animation> {
        self.pending_animation.take()
    }

    /// True if the unit refresh for the current turn has already run.
    #[must_use]
    pub fn refreshed_for_turn(&self) -> bool {
        self.refreshed_turn >= self.turn
    }

    pub(crate) fn mark_refreshed(&mut self) {
        self.refreshed_turn = self.turn;
    }

    /// Check a field index against `owner`'s field.
    pub fn check_field_index(&self, owner: PlayerId, index: usize) -> EngineResult<()> {
        let len = self.players[owner].field.len();
        if index >= len {
            return Err(InternalInconsistency::FieldIndex { owner, index, len }.into());
        }
        Ok(())
    }

    /// Resolve a character reference to its current health.
    #[must_use]
    pub fn health_of(&self, target: TargetRef) -> Option<i32> {
        match target {
            TargetRef::Hero(owner) => Some(self.players[owner].hero.health),
            TargetRef::Unit { owner, index } => self.players[owner].unit(index).map(|u| u.health),
        }
    }

    /// Set `game_over` and the result from hero health.
    ///
    /// Both heroes dead at once is a draw. Returns the result if the match
    /// ended in this call.
    pub fn check_game_over(&mut self) -> Option<GameResult> {
        if self.game_over {
            return None;
        }
        let dead: Vec<PlayerId> = PlayerId::both()
            .filter(|p| self.players[*p].hero.is_dead())
            .collect();
        let result = match dead.as_slice() {
            [] => return None,
            [loser] => GameResult::Winner(loser.opponent()),
            _ => GameResult::Draw,
        };
        self.finish(result.clone());
        Some(result)
    }

    /// End the match with `loser` forfeiting.
    pub fn forfeit(&mut self, loser: PlayerId) -> Option<GameResult> {
        if self.game_over {
            return None;
        }
        self.log(format!("{} forfeits", self.players[loser].hero.name));
        let result = GameResult::Winner(loser.opponent());
        self.finish(result.clone());
        Some(result)
    }

    fn finish(&mut self, result: GameResult) {
        self.game_over = true;
        self.winner = match result {
            GameResult::Winner(p) => Some(p),
            GameResult::Draw => None,
        };
        match result {
            GameResult::Winner(p) => {
                let name = self.players[p].hero.name.clone();
                self.log(format!("{} wins", name));
                log::info!("match over on turn {}: {} wins", self.turn, p);
            }
            GameResult::Draw => {
                self.log("Both heroes fall. The match is a draw");
                log::info!("match over on turn {}: draw", self.turn);
            }
        }
        self.result = Some(result);
    }
}
