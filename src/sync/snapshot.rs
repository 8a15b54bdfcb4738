//! Per-recipient state projection.
//!
//! A snapshot shows the recipient everything they may know: their own hand
//! and secrets in full, the opponent's hand, deck and secrets as counts
//! only. Each push carries the combat-log entries since the recipient's
//! cursor and at most one animation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::{Card, SecretCard, UnitCard};
use crate::core::{Hero, LogEntry, MatchState, PlayerId, PlayerState};
use crate::events::Animation;
use crate::rules::GameResult;

/// Snapshot codec failure.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot codec: {0}")]
    Codec(#[from] bincode::Error),
}

/// The recipient's own side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnView {
    pub hero: Hero,
    pub hand: Vec<Card>,
    pub field: Vec<UnitCard>,
    pub secrets: Vec<SecretCard>,
    pub graveyard: Vec<Card>,
    pub deck_count: usize,
    pub mana: u8,
    pub max_mana: u8,
    pub temporary_mana: u8,
}

impl OwnView {
    fn of(player: &PlayerState) -> Self {
        Self {
            hero: player.hero.clone(),
            hand: player.hand.iter().cloned().collect(),
            field: player.field.iter().cloned().collect(),
            secrets: player.secrets.iter().cloned().collect(),
            graveyard: player.graveyard.iter().cloned().collect(),
            deck_count: player.deck.len(),
            mana: player.mana,
            max_mana: player.max_mana,
            temporary_mana: player.temporary_mana,
        }
    }
}

/// The opponent's side, with hidden zones reduced to counts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentView {
    pub hero: Hero,
    pub field: Vec<UnitCard>,
    pub graveyard: Vec<Card>,
    pub hand_count: usize,
    pub deck_count: usize,
    pub secret_count: usize,
    pub mana: u8,
    pub max_mana: u8,
}

impl OpponentView {
    fn of(player: &PlayerState) -> Self {
        Self {
            hero: player.hero.clone(),
            field: player.field.iter().cloned().collect(),
            graveyard: player.graveyard.iter().cloned().collect(),
            hand_count: player.hand.len(),
            deck_count: player.deck.len(),
            secret_count: player.secrets.len(),
            mana: player.mana,
            max_mana: player.max_mana,
        }
    }
}

/// What one player sees after a push.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub recipient: PlayerId,
    pub turn: u32,
    pub current_player: PlayerId,
    pub game_over: bool,
    pub winner: Option<PlayerId>,
    pub result: Option<GameResult>,
    pub me: OwnView,
    pub opponent: OpponentView,
    /// Combat-log entries since the recipient's cursor.
    pub log: Vec<LogEntry>,
    /// Cursor to send with the next request.
    pub log_cursor: usize,
    pub animation: Option<Animation>,
}

impl Snapshot {
    /// Project `state` for `recipient`, with log entries from `log_cursor` on.
    #[must_use]
    pub fn for_recipient(
        state: &MatchState,
        recipient: PlayerId,
        log_cursor: usize,
        animation: Option<Animation>,
    ) -> Self {
        Self {
            recipient,
            turn: state.turn,
            current_player: state.current_player,
            game_over: state.game_over,
            winner: state.winner,
            result: state.result.clone(),
            me: OwnView::of(state.player(recipient)),
            opponent: OpponentView::of(state.player(recipient.opponent())),
            log: state.combat_log.since(log_cursor),
            log_cursor: state.combat_log.len(),
            animation,
        }
    }

    /// Full resynchronization: the entire log.
    #[must_use]
    pub fn full(state: &MatchState, recipient: PlayerId) -> Self {
        Self::for_recipient(state, recipient, 0, state.pending_animation.clone())
    }

    /// True if it is the recipient's turn.
    #[must_use]
    pub fn my_turn(&self) -> bool {
        !self.game_over && self.current_player == self.recipient
    }

    /// Encode with bincode.
    pub fn encode(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a snapshot produced by [`encode`](Self::encode).
    pub fn decode(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
