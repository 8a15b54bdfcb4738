//! Play, attack and resource policies.
//!
//! ## Play orders
//!
//! Buckets are played greedily in a fixed order per strategy. "Rest" is
//! other units, other spells and uncategorized cards; resource cards follow
//! their own rule and are never part of a play order.
//!
//! | Strategy   | Order                                                        |
//! |------------|--------------------------------------------------------------|
//! | Defensive  | heals, taunts, area, shields, damage, strong, rest           |
//! | Aggressive | damage, strong, shields, area, rest, taunts, heals           |
//! | Balanced   | strong, taunts, shields, damage, area, rest, heals           |
//!
//! ## Attacks
//!
//! Each ready unit, in field order: the best-scoring taunt if any stand;
//! the hero if the opposing field is empty; otherwise the best-scoring unit
//! when its score is positive, else the hero.

use rustc_hash::FxHashSet;

use super::agent::TurnPlan;
use super::categorize::{categorize_hand, Bucket, HandCategories};
use super::config::AiConfig;
use super::evaluate::best_target;
use super::strategy::Strategy;
use crate::cards::{Card, InstanceId, UnitCard};
use crate::core::config::MAX_MANA;
use crate::core::error::EngineResult;
use crate::core::{Intent, MatchState, PlayerId, PlayerState, TargetRef};
use crate::effects::{Primitive, Trigger};
use crate::rules::Engine;

use Bucket::*;

const DEFENSIVE: [Bucket; 9] = [
    HealingSpells,
    Taunts,
    AreaSpells,
    DivineShields,
    DamageSpells,
    StrongUnits,
    OtherUnits,
    OtherSpells,
    Uncategorized,
];

const AGGRESSIVE: [Bucket; 9] = [
    DamageSpells,
    StrongUnits,
    DivineShields,
    AreaSpells,
    OtherUnits,
    OtherSpells,
    Uncategorized,
    Taunts,
    HealingSpells,
];

const BALANCED: [Bucket; 9] = [
    StrongUnits,
    Taunts,
    DivineShields,
    DamageSpells,
    AreaSpells,
    OtherUnits,
    OtherSpells,
    Uncategorized,
    HealingSpells,
];

/// Bucket order for a strategy. `Lethal` plays like `Aggressive`.
#[must_use]
pub fn play_order(strategy: Strategy) -> &'static [Bucket] {
    match strategy {
        Strategy::Defensive => &DEFENSIVE,
        Strategy::Aggressive | Strategy::Lethal => &AGGRESSIVE,
        Strategy::Balanced => &BALANCED,
    }
}

/// Affordable, and there is room for it if it is a unit.
#[must_use]
pub fn can_play(player: &PlayerState, card: &Card) -> bool {
    if card.cost() > player.available_mana() {
        return false;
    }
    !(matches!(card, Card::Unit(_)) && player.field_full())
}

fn strongest(state: &MatchState, owner: PlayerId, filter: impl Fn(&UnitCard) -> bool) -> Option<TargetRef> {
    state
        .player(owner)
        .field
        .iter()
        .enumerate()
        .filter(|(_, u)| filter(*u))
        .max_by_key(|(i, u)| (u.attack, std::cmp::Reverse(*i)))
        .map(|(i, _)| TargetRef::unit(owner, i))
}

/// Pick a target for a card's chosen-target effect.
///
/// Damage goes to the strongest enemy unit it kills, else the enemy hero.
/// Heals go to a damaged own hero, else the most damaged friendly unit.
/// Buffs and keywords go to the strongest friendly unit, freezes to the
/// strongest enemy unit. Returns `None` when nothing sensible is available.
#[must_use]
pub fn choose_target(state: &MatchState, player: PlayerId, card: &Card) -> Option<TargetRef> {
    let them = player.opponent();
    let chosen: Vec<&Primitive> = card
        .effects_for(Trigger::OnPlay)
        .filter(|e| e.effect.target.is_chosen())
        .map(|e| &e.effect.primitive)
        .collect();
    let first = chosen.first()?;
    let unit_only = chosen.iter().any(|p| p.unit_only());

    match first {
        Primitive::Damage { amount } => {
            let kill = strongest(state, them, |u| !u.has_divine_shield && u.health <= *amount);
            match kill {
                Some(target) => Some(target),
                None if unit_only => strongest(state, them, |_| true),
                None => Some(TargetRef::Hero(them)),
            }
        }
        Primitive::Heal { .. } => {
            let hero = &state.player(player).hero;
            if hero.health < hero.max_health {
                return Some(TargetRef::Hero(player));
            }
            state
                .player(player)
                .field
                .iter()
                .enumerate()
                .filter(|(_, u)| u.health < u.max_health)
                .max_by_key(|(i, u)| (u.max_health - u.health, std::cmp::Reverse(*i)))
                .map(|(i, _)| TargetRef::unit(player, i))
        }
        Primitive::Freeze { .. } => strongest(state, them, |u| !u.frozen),
        Primitive::Buff { .. } | Primitive::GrantTaunt | Primitive::GrantDivineShield => {
            strongest(state, player, |_| true)
        }
        Primitive::Draw { .. } | Primitive::Summon { .. } | Primitive::GainMana { .. } => {
            Some(TargetRef::Hero(them))
        }
    }
}

/// Next card to play from `bucket`, as an intent.
fn next_play(
    state: &MatchState,
    player: PlayerId,
    categories: &HandCategories,
    bucket: Bucket,
    skipped: &FxHashSet<InstanceId>,
) -> Option<(InstanceId, Intent)> {
    let me = state.player(player);
    categories.get(bucket).iter().find_map(|&index| {
        let card = &me.hand[index];
        if skipped.contains(&card.instance()) || !can_play(me, card) {
            return None;
        }
        let target = if card.needs_chosen_target() {
            choose_target(state, player, card)
        } else {
            None
        };
        if target.is_none() && card.needs_chosen_target() && !matches!(card, Card::Unit(_)) {
            return None;
        }
        Some((
            card.instance(),
            Intent::PlayCard {
                hand_index: index,
                field_index: None,
                target,
            },
        ))
    })
}

/// Play cards greedily in the strategy's bucket order.
pub fn play_phase(
    engine: &Engine,
    plan: &mut TurnPlan,
    player: PlayerId,
    strategy: Strategy,
    config: &AiConfig,
) -> EngineResult<()> {
    let mut skipped = FxHashSet::default();
    for &bucket in play_order(strategy) {
        loop {
            if plan.finished() || plan.intents.len() >= config.max_actions {
                return Ok(());
            }
            let categories = categorize_hand(&plan.state.player(player).hand, config);
            let Some((instance, intent)) = next_play(&plan.state, player, &categories, bucket, &skipped) else {
                break;
            };
            if !plan.apply(engine, player, intent)? {
                skipped.insert(instance);
            }
        }
    }
    Ok(())
}

/// Whether to play a resource card now.
///
/// Yes if a card costing exactly one more than the current mana is a strong
/// unit, a taunt, or (when endangered) any spell; or whenever endangered
/// with mana below the cap.
#[must_use]
pub fn should_use_resource(player: &PlayerState, config: &AiConfig, endangered: bool) -> bool {
    let mana = player.available_mana();
    if endangered && mana < MAX_MANA {
        return true;
    }
    player.hand.iter().any(|card| {
        if card.cost() != mana.saturating_add(1) {
            return false;
        }
        match card {
            Card::Unit(unit) => unit.has_taunt || unit.attack >= config.strong_attack,
            Card::Spell(_) | Card::Secret(_) => endangered,
        }
    })
}

/// Play resource cards while the resource rule says so.
pub fn use_resources(
    engine: &Engine,
    plan: &mut TurnPlan,
    player: PlayerId,
    config: &AiConfig,
    endangered: bool,
) -> EngineResult<()> {
    while !plan.finished() && plan.intents.len() < config.max_actions {
        let me = plan.state.player(player);
        if !should_use_resource(me, config, endangered) {
            break;
        }
        let categories = categorize_hand(&me.hand, config);
        let Some(&index) = categories.get(Resources).first() else {
            break;
        };
        if !plan.apply(engine, player, Intent::play(index))? {
            break;
        }
    }
    Ok(())
}

/// Spend leftover mana on the hero ability.
pub fn use_hero_ability(engine: &Engine, plan: &mut TurnPlan, player: PlayerId) -> EngineResult<()> {
    let me = plan.state.player(player);
    let ability = &me.hero.ability;
    if plan.finished() || ability.used_this_turn || ability.effects.is_empty() {
        return Ok(());
    }
    if ability.cost <= me.available_mana() {
        plan.apply(engine, player, Intent::UseHeroAbility)?;
    }
    Ok(())
}

/// Attack for the unit with this instance, if it can attack.
#[must_use]
pub fn choose_attack(state: &MatchState, player: PlayerId, instance: InstanceId) -> Option<Intent> {
    let field = &state.player(player).field;
    let index = field.iter().position(|u| u.instance == instance)?;
    let attacker = &field[index];
    if !attacker.can_attack() || attacker.attack <= 0 {
        return None;
    }

    let defenders = &state.player(player.opponent()).field;
    if defenders.iter().any(|u| u.has_taunt) {
        let taunts = defenders.iter().enumerate().filter(|(_, u)| u.has_taunt);
        return best_target(attacker, taunts).map(|(target, _)| Intent::attack_unit(index, target));
    }
    match best_target(attacker, defenders.iter().enumerate()) {
        Some((target, score)) if score > 0 => Some(Intent::attack_unit(index, target)),
        _ => Some(Intent::attack_hero(index)),
    }
}

/// Attack with every ready unit in field order.
pub fn attack_phase(engine: &Engine, plan: &mut TurnPlan, player: PlayerId, config: &AiConfig) -> EngineResult<()> {
    let attackers: Vec<InstanceId> = plan
        .state
        .player(player)
        .field
        .iter()
        .map(|u| u.instance)
        .collect();
    for instance in attackers {
        if plan.finished() || plan.intents.len() >= config.max_actions {
            break;
        }
        if let Some(intent) = choose_attack(&plan.state, player, instance) {
            plan.apply(engine, player, intent)?;
        }
    }
    Ok(())
}
