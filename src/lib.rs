//! # duel-engine
//!
//! Rules engine for a two-player, turn-based card battler, with a heuristic
//! AI opponent and an authoritative session layer.
//!
//! ## Design Principles
//!
//! 1. **Intents in, state and events out**: clients never touch state. They
//!    submit `Intent`s; the engine returns the new state plus `MatchEvent`s,
//!    or a typed rejection.
//!
//! 2. **Atomic intents**: every intent is applied to a clone of the state
//!    and committed only on success. A rejected intent changes nothing.
//!
//! 3. **Structured effects**: card abilities are data (trigger, primitive,
//!    target selector) attached to card definitions.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs`, used by the
//!   engine for atomic intents and by the AI for lookahead.
//!
//! - **Deterministic**: a seed and two deck lists fully determine a match.
//!   The engine never reads a clock; the session layer takes time from its
//!   host.
//!
//! ## Modules
//!
//! - `core`: players, state, intents, RNG, configuration, errors
//! - `cards`: card definitions, runtime cards, registry, starter set
//! - `zones`: draw, discard, place and remove
//! - `effects`: effect model, targeting and the resolver
//! - `events`: outbound events, feedback and animations
//! - `rules`: the `RulesEngine` trait, turns, combat, card play, deaths
//! - `ai`: the heuristic opponent
//! - `sync`: snapshots, sessions, grace timers, lobby, local play
//!
//! ## Example
//!
//! ```
//! use duel_engine::cards::catalog::{starter_deck, starter_registry};
//! use duel_engine::{Engine, Intent, MatchConfig, PlayerId, PlayerMap, RulesEngine};
//!
//! let engine = Engine::new(starter_registry(), MatchConfig::default());
//! let mut state = engine.new_match(&PlayerMap::with_value(starter_deck())).unwrap();
//!
//! engine.apply_intent(&mut state, PlayerId::FIRST, &Intent::EndTurn).unwrap();
//! assert_eq!(state.current_player, PlayerId::SECOND);
//! assert_eq!(state.turn, 2);
//! ```

pub mod core;
pub mod cards;
pub mod zones;
pub mod effects;
pub mod events;
pub mod rules;
pub mod ai;
pub mod sync;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, PlayerMap,
    GameRng,
    MatchConfig, HeroDefinition, AbilityDefinition,
    Intent, TargetRef, ActionRecord,
    EngineError, EngineResult, IllegalAction, InternalInconsistency,
    CombatLog, LogEntry,
    MatchState, PlayerState, Hero,
};

pub use crate::cards::{Card, CardDefinition, CardId, CardRegistry, CardType, InstanceId, UnitCard};

pub use crate::effects::{CardEffect, Effect, EffectTarget, EffectResolver, Primitive, ResolverContext, Trigger};

pub use crate::events::{Animation, Feedback, FeedbackKind, MatchEvent};

pub use crate::rules::{Engine, GameResult, RulesEngine, TurnPhase};

pub use crate::ai::{AiAgent, AiConfig, Strategy, TurnPlan};

pub use crate::sync::{LocalMatch, Lobby, MatchSession, SessionConfig, Snapshot};
