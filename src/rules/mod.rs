//! Game rules.
//!
//! - `engine`: the `RulesEngine` trait and the `Engine` that implements it
//! - `turn`: the turn controller
//! - `combat`: attack validation and resolution
//! - `play`: card play and the hero ability
//! - `secrets`: secret reveal
//! - `deaths`: the death sweep and the win check run after every intent

pub mod combat;
pub mod deaths;
pub mod engine;
pub mod play;
pub mod secrets;
pub mod turn;

pub use engine::{Engine, GameResult, RulesEngine};
pub use turn::TurnPhase;
