//! Effect resolution - executing effects on match state.
//!
//! The `EffectResolver` applies primitives to the characters a selector picks,
//! writing one combat-log entry and one [`Feedback`] per affected character.
//!
//! Units reduced to zero health stay on the field until the death sweep at
//! the end of the action, so board positions are stable while an effect list
//! resolves. Summons append to the right end for the same reason.

use crate::cards::{Card, CardRegistry};
use crate::core::error::{EngineResult, InternalInconsistency};
use crate::core::{MatchState, PlayerId, TargetRef};
use crate::events::{Animation, Feedback, FeedbackKind, MatchEvent};

use super::targeting::{select_targets, TargetContext};
use super::{Effect, Primitive};

/// Context for resolving effects.
///
/// Carries the registry (for summons) and the resolving source.
pub struct ResolverContext<'a> {
    pub registry: &'a CardRegistry,
    pub targets: TargetContext,
    /// Display name of the card or ability that owns the effect.
    pub source_name: &'a str,
}

impl<'a> ResolverContext<'a> {
    /// Create a context for `controller` with no source unit or chosen target.
    pub fn new(registry: &'a CardRegistry, controller: PlayerId, source_name: &'a str) -> Self {
        Self {
            registry,
            targets: TargetContext::new(controller),
            source_name,
        }
    }

    /// Set the unit carrying the effect.
    #[must_use]
    pub fn with_source(mut self, source: TargetRef) -> Self {
        self.targets = self.targets.with_source(source);
        self
    }

    /// Set the chosen target.
    #[must_use]
    pub fn with_chosen(mut self, chosen: Option<TargetRef>) -> Self {
        self.targets = self.targets.with_chosen(chosen);
        self
    }

    fn controller(&self) -> PlayerId {
        self.targets.controller
    }
}

/// Resolves effects on match state.
pub struct EffectResolver;

impl EffectResolver {
    /// Resolve effects in order.
    pub fn resolve_all<'e>(
        state: &mut MatchState,
        effects: impl IntoIterator<Item = &'e Effect>,
        ctx: &ResolverContext,
        events: &mut Vec<MatchEvent>,
    ) -> EngineResult<()> {
        for effect in effects {
            Self::resolve(state, effect, ctx, events)?;
        }
        Ok(())
    }

    /// Resolve a single effect.
    pub fn resolve(
        state: &mut MatchState,
        effect: &Effect,
        ctx: &ResolverContext,
        events: &mut Vec<MatchEvent>,
    ) -> EngineResult<()> {
        if effect.primitive.is_controller_scoped() {
            return Self::resolve_for_controller(state, &effect.primitive, ctx, events);
        }

        let targets = select_targets(state, effect.target, &ctx.targets);
        if targets.is_empty() {
            state.log(format!("{} has no target", ctx.source_name));
            return Ok(());
        }
        for target in targets {
            Self::apply_to(state, &effect.primitive, target, ctx, events)?;
        }
        Ok(())
    }

    /// Apply a character primitive to one target.
    fn apply_to(
        state: &mut MatchState,
        primitive: &Primitive,
        target: TargetRef,
        ctx: &ResolverContext,
        events: &mut Vec<MatchEvent>,
    ) -> EngineResult<()> {
        let source = ctx.source_name;
        match target {
            TargetRef::Hero(owner) => {
                let hero = &mut state.player_mut(owner).hero;
                let name = hero.name.clone();
                let (kind, magnitude, text) = match primitive {
                    Primitive::Damage { amount } => {
                        let dealt = hero.take_damage(*amount);
                        (FeedbackKind::Damage, dealt, format!("{} deals {} damage to {}", source, dealt, name))
                    }
                    Primitive::Heal { amount } => {
                        let healed = hero.heal(*amount);
                        (FeedbackKind::Heal, healed, format!("{} restores {} health to {}", source, healed, name))
                    }
                    _ => {
                        log::debug!("{} skipped on hero target {}", source, target);
                        return Ok(());
                    }
                };
                state.log(text);
                events.push(MatchEvent::Feedback(Feedback::new(kind, magnitude, target)));
            }
            TargetRef::Unit { owner, index } => {
                let len = state.player(owner).field.len();
                let unit = state
                    .player_mut(owner)
                    .unit_mut(index)
                    .ok_or(InternalInconsistency::FieldIndex { owner, index, len })?;
                let name = unit.name.clone();
                let (kind, magnitude, text) = match primitive {
                    Primitive::Damage { amount } => {
                        if unit.has_divine_shield && *amount > 0 {
                            unit.take_damage(*amount);
                            (FeedbackKind::ShieldBroken, 0, format!("{}'s divine shield absorbs {}", name, source))
                        } else {
                            let dealt = unit.take_damage(*amount);
                            (FeedbackKind::Damage, dealt, format!("{} deals {} damage to {}", source, dealt, name))
                        }
                    }
                    Primitive::Heal { amount } => {
                        let healed = unit.heal(*amount);
                        (FeedbackKind::Heal, healed, format!("{} restores {} health to {}", source, healed, name))
                    }
                    Primitive::Buff { attack, health } => {
                        unit.attack = (unit.attack + attack).max(0);
                        unit.max_health += health;
                        unit.health += health;
                        (FeedbackKind::Buff, *attack + *health, format!("{} gives {} +{}/+{}", source, name, attack, health))
                    }
                    Primitive::Freeze { turns } => {
                        unit.freeze(*turns);
                        (FeedbackKind::Freeze, i32::from(*turns), format!("{} freezes {}", source, name))
                    }
                    Primitive::GrantTaunt => {
                        unit.has_taunt = true;
                        (FeedbackKind::Taunt, 0, format!("{} gives {} taunt", source, name))
                    }
                    Primitive::GrantDivineShield => {
                        unit.has_divine_shield = true;
                        (FeedbackKind::DivineShield, 0, format!("{} gives {} divine shield", source, name))
                    }
                    Primitive::Draw { .. } | Primitive::Summon { .. } | Primitive::GainMana { .. } => {
                        return Ok(());
                    }
                };
                state.log(text);
                events.push(MatchEvent::Feedback(Feedback::new(kind, magnitude, target)));
            }
        }
        Ok(())
    }

    /// Apply a primitive that acts on the controller.
    fn resolve_for_controller(
        state: &mut MatchState,
        primitive: &Primitive,
        ctx: &ResolverContext,
        events: &mut Vec<MatchEvent>,
    ) -> EngineResult<()> {
        let me = ctx.controller();
        let hero_pos = TargetRef::Hero(me);
        match primitive {
            Primitive::Draw { count } => {
                for _ in 0..*count {
                    state.draw_card(me, events);
                }
                events.push(MatchEvent::Feedback(Feedback::new(
                    FeedbackKind::Draw,
                    i32::from(*count),
                    hero_pos,
                )));
            }
            Primitive::GainMana { amount } => {
                let gained = state.player_mut(me).gain_temporary_mana(*amount);
                let hero = state.player(me).hero.name.clone();
                state.log(format!("{} gains {} mana this turn", hero, gained));
                events.push(MatchEvent::Feedback(Feedback::new(
                    FeedbackKind::Mana,
                    i32::from(gained),
                    hero_pos,
                )));
            }
            Primitive::Summon { card_id, count } => {
                let def = ctx.registry.lookup(*card_id)?;
                for _ in 0..*count {
                    if state.player(me).field_full() {
                        state.log(format!("No room to summon {}", def.name));
                        break;
                    }
                    let instance = state.alloc_instance();
                    let Card::Unit(unit) = def.instantiate(instance) else {
                        return Err(InternalInconsistency::NotAUnit(*card_id).into());
                    };
                    let index = state.player_mut(me).place_on_field(unit, None)?;
                    let position = TargetRef::unit(me, index);
                    state.log(format!("{} summons {}", ctx.source_name, def.name));
                    events.push(MatchEvent::Feedback(Feedback::new(FeedbackKind::Summon, 1, position)));
                    let animation = Animation::Summon { position };
                    state.set_animation(animation.clone());
                    events.push(MatchEvent::Animation(animation));
                }
            }
            _ => {}
        }
        Ok(())
    }
}
