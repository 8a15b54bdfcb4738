//! Error taxonomy for engine operations.
//!
//! - [`IllegalAction`]: the intent breaks a game rule. Always recoverable;
//!   the acting client gets the reason and the state is unchanged.
//! - [`InternalInconsistency`]: the intent references something that cannot
//!   exist (bad index, unknown card). Validated input never produces these.
//!
//! Connection loss is not an engine error; see `sync::MatchSession`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::player::PlayerId;
use crate::cards::CardId;

/// A rule violation. The intent is rejected and nothing changes.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum IllegalAction {
    #[error("the match is already over")]
    GameOver,

    #[error("it is not your turn")]
    NotYourTurn,

    #[error("not enough mana: need {need}, have {have}")]
    InsufficientMana { need: u8, have: u8 },

    #[error("the field is full")]
    FieldFull,

    #[error("unit at position {index} cannot attack")]
    IllegalAttacker { index: usize },

    #[error("unit at position {index} has already attacked this turn")]
    AttackerExhausted { index: usize },

    #[error("unit at position {index} is frozen")]
    AttackerFrozen { index: usize },

    #[error("a unit with taunt must be attacked first")]
    TauntViolation,

    #[error("the hero ability has already been used this turn")]
    AbilityAlreadyUsed,

    #[error("this card needs a target")]
    TargetRequired,

    #[error("that is not a valid target")]
    InvalidTarget,

    #[error("too many secrets in play")]
    SecretLimit,

    #[error("that secret is already in play")]
    DuplicateSecret,
}

/// A data-integrity defect: the engine refuses to proceed.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum InternalInconsistency {
    #[error("hand index {index} out of range (hand size {len})")]
    HandIndex { index: usize, len: usize },

    #[error("field index {index} out of range for {owner} (field size {len})")]
    FieldIndex {
        owner: PlayerId,
        index: usize,
        len: usize,
    },

    #[error("{0} is not in the card registry")]
    UnknownCard(CardId),

    #[error("{0} is not a unit card")]
    NotAUnit(CardId),
}

/// Any failure of an engine operation.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum EngineError {
    #[error(transparent)]
    Illegal(#[from] IllegalAction),

    #[error(transparent)]
    Internal(#[from] InternalInconsistency),
}

impl EngineError {
    /// The rule violation, if this is one.
    #[must_use]
    pub fn as_illegal(&self) -> Option<&IllegalAction> {
        match self {
            EngineError::Illegal(reason) => Some(reason),
            EngineError::Internal(_) => None,
        }
    }

    /// True for data-integrity defects.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, EngineError::Internal(_))
    }
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
