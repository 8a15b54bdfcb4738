//! Effect targeting.
//!
//! Turns an [`EffectTarget`] selector into concrete board positions. Order is
//! deterministic: field index ascending, the controller's side first for
//! selectors that span both sides, heroes after units.

use crate::core::error::{EngineResult, IllegalAction, InternalInconsistency};
use crate::core::{MatchState, PlayerId, TargetRef};

use super::{EffectTarget, Primitive};

/// Who is resolving an effect, and what it points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetContext {
    /// The player the effect belongs to.
    pub controller: PlayerId,
    /// The unit carrying the effect, if it is still on the field.
    pub source: Option<TargetRef>,
    /// The chosen target, or the attack target for attack triggers.
    pub chosen: Option<TargetRef>,
}

impl TargetContext {
    #[must_use]
    pub fn new(controller: PlayerId) -> Self {
        Self {
            controller,
            source: None,
            chosen: None,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: TargetRef) -> Self {
        self.source = Some(source);
        self
    }

    #[must_use]
    pub fn with_chosen(mut self, chosen: Option<TargetRef>) -> Self {
        self.chosen = chosen;
        self
    }
}

fn units_of(state: &MatchState, owner: PlayerId) -> impl Iterator<Item = TargetRef> + '_ {
    (0..state.player(owner).field.len()).map(move |index| TargetRef::unit(owner, index))
}

/// Expand a selector into board positions.
///
/// `Chosen` and `SelfUnit` yield nothing when the context has no such
/// character.
#[must_use]
pub fn select_targets(state: &MatchState, selector: EffectTarget, ctx: &TargetContext) -> Vec<TargetRef> {
    let me = ctx.controller;
    let them = me.opponent();
    match selector {
        EffectTarget::Chosen => ctx.chosen.into_iter().collect(),
        EffectTarget::SelfUnit => ctx.source.filter(|s| !s.is_hero()).into_iter().collect(),
        EffectTarget::FriendlyHero => vec![TargetRef::Hero(me)],
        EffectTarget::EnemyHero => vec![TargetRef::Hero(them)],
        EffectTarget::AllEnemies => units_of(state, them)
            .chain(std::iter::once(TargetRef::Hero(them)))
            .collect(),
        EffectTarget::AllEnemyUnits => units_of(state, them).collect(),
        EffectTarget::AllUnits => units_of(state, me).chain(units_of(state, them)).collect(),
        EffectTarget::AllFriendlyUnits => units_of(state, me).collect(),
    }
}

/// Check a chosen target for a primitive before anything is paid.
///
/// A unit position that does not exist is an integrity error. A hero chosen
/// for a unit-only primitive, or an owner that is not a seat, is a rule
/// violation.
pub fn validate_chosen(state: &MatchState, primitive: &Primitive, target: TargetRef) -> EngineResult<()> {
    if !target.owner().is_seat() {
        return Err(IllegalAction::InvalidTarget.into());
    }
    match target {
        TargetRef::Hero(_) if primitive.unit_only() => Err(IllegalAction::InvalidTarget.into()),
        TargetRef::Hero(_) => Ok(()),
        TargetRef::Unit { owner, index } => {
            let len = state.player(owner).field.len();
            if index >= len {
                return Err(InternalInconsistency::FieldIndex { owner, index, len }.into());
            }
            Ok(())
        }
    }
}
