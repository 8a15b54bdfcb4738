//! Lethal detection and execution.
//!
//! Lethal counts the attack of every unit that can swing this turn plus the
//! face damage of hand spells affordable in hand order. Unit attack only
//! counts when the opponent has no taunt, because taunt would force the
//! swings elsewhere.

use super::agent::TurnPlan;
use crate::cards::Card;
use crate::core::error::EngineResult;
use crate::core::{Intent, MatchState, PlayerId, TargetRef};
use crate::effects::Trigger;
use crate::rules::Engine;

/// Damage a spell deals to the enemy hero, if it can be aimed there.
fn face_damage(card: &Card) -> Option<i32> {
    let Card::Spell(_) = card else {
        return None;
    };
    let mut total = 0;
    for effect in card.effects_for(Trigger::OnPlay).map(|e| &e.effect) {
        if effect.target.is_chosen() && effect.primitive.unit_only() {
            // Cannot be cast at a hero.
            return None;
        }
        if let Some(amount) = effect.primitive.damage() {
            if effect.target.can_hit_enemy_hero() {
                total += amount;
            }
        }
    }
    (total > 0).then_some(total)
}

/// Hand indices and damage of face spells castable this turn, greedily in
/// hand order.
#[must_use]
pub fn burn_in_hand(state: &MatchState, player: PlayerId) -> Vec<(usize, i32)> {
    let me = state.player(player);
    let mut mana = me.available_mana();
    let mut spells = Vec::new();
    for (index, card) in me.hand.iter().enumerate() {
        if let Some(damage) = face_damage(card) {
            if card.cost() <= mana {
                mana -= card.cost();
                spells.push((index, damage));
            }
        }
    }
    spells
}

/// Total damage `player` can deal to the enemy hero this turn.
#[must_use]
pub fn available_damage(state: &MatchState, player: PlayerId) -> i32 {
    let spells: i32 = burn_in_hand(state, player).iter().map(|(_, d)| d).sum();
    let them = state.player(player.opponent());
    let units = if them.has_taunt() {
        0
    } else {
        state.player(player).ready_attack()
    };
    spells + units
}

/// True if `player` can reduce the enemy hero to zero this turn.
#[must_use]
pub fn can_kill_opponent(state: &MatchState, player: PlayerId) -> bool {
    available_damage(state, player) >= state.player(player.opponent()).hero.health
}

/// Cast every affordable face spell at the enemy hero, then send every
/// ready unit at it if no taunt stands in the way.
pub fn execute_lethal_sequence(engine: &Engine, plan: &mut TurnPlan, player: PlayerId) -> EngineResult<()> {
    let enemy_hero = TargetRef::Hero(player.opponent());

    while !plan.finished() {
        let Some(&(index, _)) = burn_in_hand(&plan.state, player).first() else {
            break;
        };
        let card = &plan.state.player(player).hand[index];
        let intent = if card.needs_chosen_target() {
            Intent::play_at(index, enemy_hero)
        } else {
            Intent::play(index)
        };
        if !plan.apply(engine, player, intent)? {
            break;
        }
    }

    while !plan.finished() && !plan.state.player(player.opponent()).has_taunt() {
        let ready = plan
            .state
            .player(player)
            .field
            .iter()
            .position(|u| u.can_attack() && u.attack > 0);
        let Some(index) = ready else {
            break;
        };
        if !plan.apply(engine, player, Intent::attack_hero(index))? {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::catalog::{self, starter_registry};
    use crate::cards::{CardDefinition, CardId, CardRegistry};
    use crate::core::MatchConfig;
    use crate::effects::{CardEffect, Effect, EffectTarget};

    const BOLT: CardId = CardId::new(100);
    const BRAWLER: CardId = CardId::new(101);

    fn registry() -> CardRegistry {
        let mut registry = starter_registry();
        registry.register(
            CardDefinition::spell(BOLT, "Bolt", 2)
                .with_effect(CardEffect::on_play(Effect::damage(3, EffectTarget::Chosen))),
        );
        registry.register(CardDefinition::unit(BRAWLER, "Brawler", 4, 4, 4));
        registry
    }

    fn give(state: &mut MatchState, registry: &CardRegistry, id: CardId) -> Card {
        let instance = state.alloc_instance();
        registry.lookup(id).unwrap().instantiate(instance)
    }

    fn lethal_board() -> (Engine, MatchState) {
        let registry = registry();
        let mut state = MatchState::new(&MatchConfig::default());
        for _ in 0..2 {
            if let Card::Unit(unit) = give(&mut state, &registry, BRAWLER) {
                state.player_mut(PlayerId::FIRST).field.push_back(unit);
            }
        }
        let bolt = give(&mut state, &registry, BOLT);
        let me = state.player_mut(PlayerId::FIRST);
        me.hand.push_back(bolt);
        me.mana = 3;
        me.max_mana = 3;
        state.player_mut(PlayerId::SECOND).hero.health = 10;
        (Engine::new(registry, MatchConfig::default()), state)
    }

    #[test]
    fn test_fixed_board_is_lethal() {
        let (_, state) = lethal_board();
        assert_eq!(available_damage(&state, PlayerId::FIRST), 11);
        assert!(can_kill_opponent(&state, PlayerId::FIRST));
    }

    #[test]
    fn test_execute_lethal_sequence() {
        let (engine, state) = lethal_board();
        let mut plan = TurnPlan::new(state);
        execute_lethal_sequence(&engine, &mut plan, PlayerId::FIRST).unwrap();

        assert!(plan.state.player(PlayerId::SECOND).hero.health <= 0);
        assert!(plan.state.game_over);
        assert_eq!(plan.state.winner, Some(PlayerId::FIRST));
        assert_eq!(
            plan.intents[0],
            Intent::play_at(0, TargetRef::Hero(PlayerId::SECOND))
        );
    }

    #[test]
    fn test_taunt_removes_unit_damage() {
        let (_, mut state) = lethal_board();
        let registry = registry();
        if let Card::Unit(unit) = give(&mut state, &registry, catalog::STONE_WARDEN) {
            state.player_mut(PlayerId::SECOND).field.push_back(unit);
        }
        assert_eq!(available_damage(&state, PlayerId::FIRST), 3);
        assert!(!can_kill_opponent(&state, PlayerId::FIRST));
    }

    #[test]
    fn test_unaffordable_and_unit_only_spells_ignored() {
        let registry = registry();
        let mut state = MatchState::new(&MatchConfig::default());
        let fireball = give(&mut state, &registry, catalog::FIREBALL);
        let lance = give(&mut state, &registry, catalog::FROST_LANCE);
        let spark = give(&mut state, &registry, catalog::SPARK);
        let me = state.player_mut(PlayerId::FIRST);
        me.hand.push_back(fireball);
        me.hand.push_back(lance);
        me.hand.push_back(spark);
        me.mana = 3;

        assert_eq!(burn_in_hand(&state, PlayerId::FIRST), vec![(2, 2)]);
    }
}
