//! Heuristic AI opponent.
//!
//! The AI plays through the same rules engine as a human: it reads the
//! state, decides, and submits intents.
//!
//! ## Pipeline
//!
//! 1. `strategy`: assess both boards and pick Lethal, Defensive, Aggressive
//!    or Balanced
//! 2. `lethal`: if lethal is on the board, burn face and swing at the hero
//! 3. `policy`: otherwise use resource cards, play cards in the strategy's
//!    bucket order, use the hero ability, then attack
//! 4. `agent`: end the turn
//!
//! `categorize` and `evaluate` are the scoring helpers the steps share.

pub mod agent;
pub mod categorize;
pub mod config;
pub mod evaluate;
pub mod lethal;
pub mod policy;
pub mod strategy;

pub use agent::{AiAgent, TurnPlan};
pub use categorize::{categorize_hand, classify, Bucket, HandCategories};
pub use config::AiConfig;
pub use evaluate::{evaluate_target, field_strength};
pub use lethal::{can_kill_opponent, execute_lethal_sequence};
pub use strategy::{select_strategy, BoardAssessment, Strategy};
