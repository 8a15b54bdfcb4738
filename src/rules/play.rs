//! Playing cards and using the hero ability.
//!
//! Everything is checked before anything is paid: cost, board room, secret
//! limits and the chosen target. Only then does the card leave the hand.

use crate::cards::{Card, CardRegistry, CardType, SecretTrigger};
use crate::core::config::MAX_SECRETS;
use crate::core::error::{EngineResult, IllegalAction, InternalInconsistency};
use crate::core::{MatchState, PlayerId, TargetRef};
use crate::effects::{validate_chosen, EffectResolver, ResolverContext, Trigger};
use crate::events::{Animation, MatchEvent};

use super::secrets::fire_secrets;

/// Check a play without changing anything.
pub fn validate_play(
    state: &MatchState,
    hand_index: usize,
    target: Option<TargetRef>,
) -> EngineResult<()> {
    let me = state.current_player;
    let player = state.player(me);
    let len = player.hand.len();
    let card = player
        .hand
        .get(hand_index)
        .ok_or(InternalInconsistency::HandIndex { index: hand_index, len })?;

    let have = player.available_mana();
    if card.cost() > have {
        return Err(IllegalAction::InsufficientMana { need: card.cost(), have }.into());
    }
    match card {
        Card::Unit(_) if player.field_full() => return Err(IllegalAction::FieldFull.into()),
        Card::Secret(secret) => {
            if player.secrets.len() >= MAX_SECRETS {
                return Err(IllegalAction::SecretLimit.into());
            }
            if player.secrets.iter().any(|s| s.card_id == secret.card_id) {
                return Err(IllegalAction::DuplicateSecret.into());
            }
        }
        _ => {}
    }

    if !card.needs_chosen_target() {
        return Ok(());
    }
    match target {
        Some(target) => {
            for effect in card.effects_for(Trigger::OnPlay).map(|e| &e.effect) {
                if effect.target.is_chosen() {
                    validate_chosen(state, &effect.primitive, target)?;
                }
            }
            Ok(())
        }
        // Battlecries may be played without a target; spells may not.
        None if matches!(card, Card::Unit(_)) => Ok(()),
        None => Err(IllegalAction::TargetRequired.into()),
    }
}

/// Shift a friendly unit reference past a unit inserted at `inserted`.
fn remap_after_insert(target: TargetRef, me: PlayerId, inserted: usize) -> TargetRef {
    match target {
        TargetRef::Unit { owner, index } if owner == me && index >= inserted => {
            TargetRef::unit(owner, index + 1)
        }
        other => other,
    }
}

/// Play a card from the active player's hand.
pub fn play_card(
    state: &mut MatchState,
    registry: &CardRegistry,
    hand_index: usize,
    field_index: Option<usize>,
    target: Option<TargetRef>,
    events: &mut Vec<MatchEvent>,
) -> EngineResult<()> {
    validate_play(state, hand_index, target)?;
    let me = state.current_player;
    let them = me.opponent();
    let card = state.player_mut(me).take_from_hand(hand_index)?;
    state.player_mut(me).spend_mana(card.cost())?;
    let hero = state.player(me).hero.name.clone();
    let target = if card.needs_chosen_target() { target } else { None };

    match card {
        Card::Unit(unit) => {
            let card_id = unit.card_id;
            let name = unit.name.clone();
            let effects: Vec<_> = unit
                .effects
                .iter()
                .filter(|e| e.trigger == Trigger::OnPlay)
                .map(|e| e.effect.clone())
                .collect();
            let index = state.player_mut(me).place_on_field(unit, field_index)?;
            let position = TargetRef::unit(me, index);
            let chosen = target.map(|t| remap_after_insert(t, me, index));

            state.log(format!("{} plays {}", hero, name));
            events.push(MatchEvent::CardPlayed {
                player: me,
                card_id,
                card_type: CardType::Unit,
            });
            let animation = Animation::Summon { position };
            state.set_animation(animation.clone());
            events.push(MatchEvent::Animation(animation));

            let ctx = ResolverContext::new(registry, me, &name)
                .with_source(position)
                .with_chosen(chosen);
            EffectResolver::resolve_all(state, &effects, &ctx, events)?;
            fire_secrets(state, registry, them, SecretTrigger::UnitPlayed, Some(position), events)?;
        }
        Card::Spell(spell) => {
            state.log(format!("{} casts {}", hero, spell.name));
            events.push(MatchEvent::CardPlayed {
                player: me,
                card_id: spell.card_id,
                card_type: CardType::Spell,
            });
            let animation = Animation::Spell {
                caster: me,
                card_id: spell.card_id,
                target,
            };
            state.set_animation(animation.clone());
            events.push(MatchEvent::Animation(animation));

            let ctx = ResolverContext::new(registry, me, &spell.name).with_chosen(target);
            let effects = spell
                .effects
                .iter()
                .filter(|e| e.trigger == Trigger::OnPlay)
                .map(|e| &e.effect);
            EffectResolver::resolve_all(state, effects, &ctx, events)?;
            state.player_mut(me).graveyard.push_back(Card::Spell(spell));
            fire_secrets(state, registry, them, SecretTrigger::SpellCast, Some(TargetRef::Hero(me)), events)?;
        }
        Card::Secret(secret) => {
            state.log(format!("{} sets a secret", hero));
            events.push(MatchEvent::SecretSet { player: me });
            state.player_mut(me).secrets.push_back(secret);
        }
    }
    Ok(())
}

/// Use the active player's hero ability.
pub fn use_hero_ability(
    state: &mut MatchState,
    registry: &CardRegistry,
    events: &mut Vec<MatchEvent>,
) -> EngineResult<()> {
    let me = state.current_player;
    let ability = state.player(me).hero.ability.clone();
    if ability.used_this_turn {
        return Err(IllegalAction::AbilityAlreadyUsed.into());
    }
    state.player_mut(me).spend_mana(ability.cost)?;
    state.player_mut(me).hero.ability.used_this_turn = true;

    let hero = state.player(me).hero.name.clone();
    state.log(format!("{} uses {}", hero, ability.name));
    events.push(MatchEvent::HeroAbilityUsed { player: me });

    let ctx = ResolverContext::new(registry, me, &ability.name).with_source(TargetRef::Hero(me));
    EffectResolver::resolve_all(state, &ability.effects, &ctx, events)
}
