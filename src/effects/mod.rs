//! Effect system for card abilities.
//!
//! - `Effect`: a `Primitive` aimed at an `EffectTarget`
//! - `CardEffect`: an effect bound to a `Trigger` on a card
//! - `select_targets`: expands selectors into board positions
//! - `EffectResolver`: executes effects on match state
//!
//! Effects are authored as data on card definitions. The resolver is
//! exhaustive over `Primitive`, so adding a primitive is a compile error
//! everywhere it is not yet handled.

mod effect;
mod targeting;
mod resolver;

pub use effect::{CardEffect, Effect, EffectTarget, Primitive, Trigger};
pub use targeting::{select_targets, validate_chosen, TargetContext};
pub use resolver::{EffectResolver, ResolverContext};
