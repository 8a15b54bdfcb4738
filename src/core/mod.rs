//! Core engine types: players, state, intents, RNG, configuration, errors.
//!
//! This module contains the building blocks every other module shares.
//! Rule logic lives in `rules`; this module only holds data and the
//! bookkeeping that keeps it consistent.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;
pub mod combat_log;
pub mod state;

pub use player::{InvalidSeat, PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::GameRng;
pub use config::{
    AbilityDefinition, HeroDefinition, MatchConfig, DEFAULT_HERO_HEALTH, MAX_FIELD, MAX_HAND,
    MAX_MANA, MAX_SECRETS,
};
pub use action::{ActionRecord, Intent, TargetRef};
pub use error::{EngineError, EngineResult, IllegalAction, InternalInconsistency};
pub use combat_log::{CombatLog, LogEntry};
pub use state::{Hero, HeroAbility, MatchState, PlayerState};
