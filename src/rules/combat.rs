//! Combat resolver.
//!
//! ## Order of resolution
//!
//! 1. Validate the attacker and the target (taunt applies to hero targets too).
//! 2. Mark the attacker as having attacked and queue the attack animation.
//! 3. Reveal the defender's `HeroAttacked` secrets when the hero is targeted.
//! 4. Resolve the attacker's on-attack effects against the target.
//! 5. Exchange damage. Unit fights are simultaneous: both sides take damage
//!    before either is removed, and divine shield absorbs on either side.
//!
//! Removal of the dead and the win check happen afterwards, in
//! [`finish_action`](super::deaths::finish_action).

use crate::cards::{CardRegistry, SecretTrigger};
use crate::core::error::{EngineResult, IllegalAction};
use crate::core::{MatchState, TargetRef};
use crate::effects::{Effect, EffectResolver, ResolverContext, Trigger};
use crate::events::{Animation, Feedback, FeedbackKind, MatchEvent};

use super::secrets::fire_secrets;

/// Check an attack without changing anything. Returns the target.
pub fn validate_attack(
    state: &MatchState,
    attacker_index: usize,
    target_index: Option<usize>,
    is_hero_target: bool,
) -> Result<TargetRef, IllegalAction> {
    let me = state.current_player;
    let them = me.opponent();
    let attacker = state
        .player(me)
        .unit(attacker_index)
        .ok_or(IllegalAction::IllegalAttacker { index: attacker_index })?;
    if attacker.is_dead() {
        return Err(IllegalAction::IllegalAttacker { index: attacker_index });
    }
    if attacker.has_attacked {
        return Err(IllegalAction::AttackerExhausted { index: attacker_index });
    }
    if attacker.frozen {
        return Err(IllegalAction::AttackerFrozen { index: attacker_index });
    }

    let defenders = state.player(them);
    if is_hero_target {
        if defenders.has_taunt() {
            return Err(IllegalAction::TauntViolation);
        }
        return Ok(TargetRef::Hero(them));
    }
    let index = target_index.ok_or(IllegalAction::InvalidTarget)?;
    let defender = defenders.unit(index).ok_or(IllegalAction::InvalidTarget)?;
    if defenders.has_taunt() && !defender.has_taunt {
        return Err(IllegalAction::TauntViolation);
    }
    Ok(TargetRef::unit(them, index))
}

fn name_of(state: &MatchState, target: TargetRef) -> String {
    match target {
        TargetRef::Hero(owner) => state.player(owner).hero.name.clone(),
        TargetRef::Unit { owner, index } => state
            .player(owner)
            .unit(index)
            .map_or_else(String::new, |u| u.name.clone()),
    }
}

fn damage_feedback(position: TargetRef, dealt: i32) -> MatchEvent {
    if dealt == 0 {
        MatchEvent::Feedback(Feedback::new(FeedbackKind::ShieldBroken, 0, position))
    } else {
        MatchEvent::Feedback(Feedback::new(FeedbackKind::Damage, dealt, position))
    }
}

/// Resolve an attack by the active player.
pub fn resolve_attack(
    state: &mut MatchState,
    registry: &CardRegistry,
    attacker_index: usize,
    target_index: Option<usize>,
    is_hero_target: bool,
    events: &mut Vec<MatchEvent>,
) -> EngineResult<()> {
    let target = validate_attack(state, attacker_index, target_index, is_hero_target)?;
    let me = state.current_player;
    let them = me.opponent();
    let attacker_ref = TargetRef::unit(me, attacker_index);

    let (attacker_name, on_attack): (String, Vec<Effect>) = {
        let attacker = &mut state.player_mut(me).field[attacker_index];
        attacker.has_attacked = true;
        let effects = attacker
            .effects
            .iter()
            .filter(|e| e.trigger == Trigger::OnAttack)
            .map(|e| e.effect.clone())
            .collect();
        (attacker.name.clone(), effects)
    };
    let target_name = name_of(state, target);

    let animation = Animation::Attack {
        attacker: attacker_ref,
        target,
        is_hero_target,
    };
    state.set_animation(animation.clone());
    events.push(MatchEvent::Animation(animation));

    if is_hero_target {
        fire_secrets(state, registry, them, SecretTrigger::HeroAttacked, Some(attacker_ref), events)?;
    }
    if !on_attack.is_empty() {
        let ctx = ResolverContext::new(registry, me, &attacker_name)
            .with_source(attacker_ref)
            .with_chosen(Some(target));
        EffectResolver::resolve_all(state, &on_attack, &ctx, events)?;
    }

    let attack = state.player(me).field[attacker_index].attack;
    let attacker_alive = !state.player(me).field[attacker_index].is_dead();
    let target_alive = state.health_of(target).map_or(false, |h| h > 0);
    if !attacker_alive || (!is_hero_target && !target_alive) {
        state.log(format!("{}'s attack on {} fizzles", attacker_name, target_name));
        return Ok(());
    }

    match target {
        TargetRef::Hero(owner) => {
            let dealt = state.player_mut(owner).hero.take_damage(attack);
            state.log(format!("{} attacks {} for {} damage", attacker_name, target_name, dealt));
            events.push(damage_feedback(target, dealt));
        }
        TargetRef::Unit { owner, index } => {
            let (dealt, counter) = {
                let defender = &mut state.player_mut(owner).field[index];
                let counter = defender.attack;
                (defender.take_damage(attack), counter)
            };
            let taken = state.player_mut(me).field[attacker_index].take_damage(counter);
            state.log(format!(
                "{} attacks {}: deals {}, takes {}",
                attacker_name, target_name, dealt, taken
            ));
            events.push(damage_feedback(target, dealt));
            if counter > 0 {
                events.push(damage_feedback(attacker_ref, taken));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardDefinition, CardId};
    use crate::core::error::EngineError;
    use crate::core::{MatchConfig, PlayerId};

    fn place(state: &mut MatchState, owner: PlayerId, attack: i32, health: i32, taunt: bool, shield: bool) {
        let mut def = CardDefinition::unit(CardId::new(1), "Unit", 1, attack, health);
        if taunt {
            def = def.with_taunt();
        }
        if shield {
            def = def.with_divine_shield();
        }
        let id = state.alloc_instance();
        if let Card::Unit(unit) = def.instantiate(id) {
            state.player_mut(owner).place_on_field(unit, None).unwrap();
        }
    }

    fn attack(state: &mut MatchState, attacker: usize, target: Option<usize>) -> EngineResult<Vec<MatchEvent>> {
        let registry = CardRegistry::new();
        let mut events = Vec::new();
        resolve_attack(state, &registry, attacker, target, target.is_none(), &mut events)?;
        Ok(events)
    }

    #[test]
    fn test_unit_exchange_is_simultaneous() {
        let mut state = MatchState::new(&MatchConfig::default());
        place(&mut state, PlayerId::FIRST, 3, 2, false, false);
        place(&mut state, PlayerId::SECOND, 2, 3, false, false);

        attack(&mut state, 0, Some(0)).unwrap();
        assert_eq!(state.player(PlayerId::FIRST).field[0].health, 0);
        assert_eq!(state.player(PlayerId::SECOND).field[0].health, 0);
        assert!(state.player(PlayerId::FIRST).field[0].has_attacked);
    }

    #[test]
    fn test_attacker_shield_absorbs_counter() {
        let mut state = MatchState::new(&MatchConfig::default());
        place(&mut state, PlayerId::FIRST, 2, 2, false, true);
        place(&mut state, PlayerId::SECOND, 5, 5, false, false);

        attack(&mut state, 0, Some(0)).unwrap();
        let attacker = &state.player(PlayerId::FIRST).field[0];
        assert_eq!(attacker.health, 2);
        assert!(!attacker.has_divine_shield);
        assert_eq!(state.player(PlayerId::SECOND).field[0].health, 3);
    }

    #[test]
    fn test_hero_attack_no_counter() {
        let mut state = MatchState::new(&MatchConfig::default());
        place(&mut state, PlayerId::FIRST, 4, 1, false, false);

        let events = attack(&mut state, 0, None).unwrap();
        assert_eq!(state.player(PlayerId::SECOND).hero.health, 26);
        assert_eq!(state.player(PlayerId::FIRST).field[0].health, 1);
        assert!(matches!(
            events[0],
            MatchEvent::Animation(Animation::Attack { is_hero_target: true, .. })
        ));
        assert!(state.pending_animation.is_some());
    }

    #[test]
    fn test_taunt_blocks_other_targets() {
        let mut state = MatchState::new(&MatchConfig::default());
        place(&mut state, PlayerId::FIRST, 2, 2, false, false);
        place(&mut state, PlayerId::SECOND, 1, 1, false, false);
        place(&mut state, PlayerId::SECOND, 1, 4, true, false);

        assert_eq!(
            attack(&mut state, 0, Some(0)).unwrap_err(),
            EngineError::Illegal(IllegalAction::TauntViolation)
        );
        assert_eq!(
            attack(&mut state, 0, None).unwrap_err(),
            EngineError::Illegal(IllegalAction::TauntViolation)
        );
        assert!(attack(&mut state, 0, Some(1)).is_ok());
    }

    #[test]
    fn test_attacker_preconditions() {
        let mut state = MatchState::new(&MatchConfig::default());
        place(&mut state, PlayerId::FIRST, 0, 3, false, false);
        place(&mut state, PlayerId::FIRST, 2, 3, false, false);
        place(&mut state, PlayerId::FIRST, 2, 3, false, false);
        state.player_mut(PlayerId::FIRST).field[2].freeze(1);

        // Zero attack is no bar to attacking.
        assert_eq!(
            validate_attack(&state, 0, None, true),
            Ok(TargetRef::Hero(PlayerId::SECOND))
        );
        assert_eq!(
            validate_attack(&state, 9, None, true),
            Err(IllegalAction::IllegalAttacker { index: 9 })
        );
        assert_eq!(
            validate_attack(&state, 2, None, true),
            Err(IllegalAction::AttackerFrozen { index: 2 })
        );

        attack(&mut state, 1, None).unwrap();
        assert_eq!(
            validate_attack(&state, 1, None, true),
            Err(IllegalAction::AttackerExhausted { index: 1 })
        );
    }

    #[test]
    fn test_missing_unit_target() {
        let mut state = MatchState::new(&MatchConfig::default());
        place(&mut state, PlayerId::FIRST, 2, 2, false, false);
        assert_eq!(
            validate_attack(&state, 0, Some(0), false),
            Err(IllegalAction::InvalidTarget)
        );
        assert_eq!(
            validate_attack(&state, 0, None, false),
            Err(IllegalAction::InvalidTarget)
        );
    }
}
