//! Starter card set.
//!
//! A small, complete set used by tests, the local AI match and hosts that
//! want a playable default. Every primitive, trigger and keyword appears on
//! at least one card.

use super::definition::{CardDefinition, CardId, SecretTrigger};
use super::registry::CardRegistry;
use crate::effects::{CardEffect, Effect, EffectTarget};

pub const MANA_SHARD: CardId = CardId::new(1);
pub const SPARK: CardId = CardId::new(2);
pub const FIREBALL: CardId = CardId::new(3);
pub const FLAME_NOVA: CardId = CardId::new(4);
pub const BLIZZARD: CardId = CardId::new(5);
pub const FROST_LANCE: CardId = CardId::new(6);
pub const MENDING_LIGHT: CardId = CardId::new(7);
pub const RALLYING_CRY: CardId = CardId::new(8);
pub const SQUIRE: CardId = CardId::new(9);
pub const SHIELD_BEARER: CardId = CardId::new(10);
pub const STONE_WARDEN: CardId = CardId::new(11);
pub const TUSKED_BRUTE: CardId = CardId::new(12);
pub const HATCHLING_NEST: CardId = CardId::new(13);
pub const WHELP: CardId = CardId::new(14);
pub const SCHOLAR: CardId = CardId::new(15);
pub const SNIPER: CardId = CardId::new(16);
pub const STORM_HERALD: CardId = CardId::new(17);
pub const SILVER_GUARDIAN: CardId = CardId::new(18);
pub const ICE_TRAP: CardId = CardId::new(19);
pub const AMBUSH: CardId = CardId::new(20);

/// All starter definitions.
#[must_use]
pub fn starter_cards() -> Vec<CardDefinition> {
    use EffectTarget::*;

    vec![
        CardDefinition::spell(MANA_SHARD, "Mana Shard", 0)
            .with_effect(CardEffect::on_play(Effect::gain_mana(1))),
        CardDefinition::spell(SPARK, "Spark", 1)
            .with_effect(CardEffect::on_play(Effect::damage(2, Chosen))),
        CardDefinition::spell(FIREBALL, "Fireball", 4)
            .with_effect(CardEffect::on_play(Effect::damage(6, Chosen))),
        CardDefinition::spell(FLAME_NOVA, "Flame Nova", 3)
            .with_effect(CardEffect::on_play(Effect::damage(2, AllEnemyUnits))),
        CardDefinition::spell(BLIZZARD, "Blizzard", 6)
            .with_effect(CardEffect::on_play(Effect::damage(2, AllEnemies)))
            .with_effect(CardEffect::on_play(Effect::freeze(2, AllEnemyUnits))),
        CardDefinition::spell(FROST_LANCE, "Frost Lance", 2)
            .with_effect(CardEffect::on_play(Effect::damage(3, Chosen)))
            .with_effect(CardEffect::on_play(Effect::freeze(2, Chosen))),
        CardDefinition::spell(MENDING_LIGHT, "Mending Light", 2)
            .with_effect(CardEffect::on_play(Effect::heal(8, FriendlyHero))),
        CardDefinition::spell(RALLYING_CRY, "Rallying Cry", 2)
            .with_effect(CardEffect::on_play(Effect::buff(1, 1, AllFriendlyUnits))),
        CardDefinition::unit(SQUIRE, "Squire", 1, 1, 2),
        CardDefinition::unit(SHIELD_BEARER, "Shield Bearer", 2, 1, 3).with_divine_shield(),
        CardDefinition::unit(STONE_WARDEN, "Stone Warden", 3, 2, 5).with_taunt(),
        CardDefinition::unit(TUSKED_BRUTE, "Tusked Brute", 5, 5, 4),
        CardDefinition::unit(HATCHLING_NEST, "Hatchling Nest", 2, 0, 3)
            .with_effect(CardEffect::on_death(Effect::summon(WHELP, 2))),
        CardDefinition::unit(WHELP, "Whelp", 1, 1, 1),
        CardDefinition::unit(SCHOLAR, "Scholar", 3, 2, 3)
            .with_effect(CardEffect::on_play(Effect::draw(1))),
        CardDefinition::unit(SNIPER, "Sniper", 2, 2, 1)
            .with_effect(CardEffect::on_play(Effect::damage(1, Chosen))),
        CardDefinition::unit(STORM_HERALD, "Storm Herald", 4, 4, 3)
            .with_effect(CardEffect::on_attack(Effect::damage(1, AllEnemyUnits))),
        CardDefinition::unit(SILVER_GUARDIAN, "Silver Guardian", 6, 4, 6)
            .with_taunt()
            .with_divine_shield(),
        CardDefinition::secret(ICE_TRAP, "Ice Trap", 2, SecretTrigger::HeroAttacked)
            .with_effect(CardEffect::on_play(Effect::freeze(3, AllEnemyUnits))),
        CardDefinition::secret(AMBUSH, "Ambush", 2, SecretTrigger::UnitPlayed)
            .with_effect(CardEffect::on_play(Effect::damage(4, Chosen))),
    ]
}

/// Registry holding the starter set.
#[must_use]
pub fn starter_registry() -> CardRegistry {
    let mut registry = CardRegistry::new();
    for card in starter_cards() {
        registry.register(card);
    }
    registry
}

/// A 30-card list built from the starter set.
#[must_use]
pub fn starter_deck() -> Vec<CardId> {
    const LIST: [(CardId, usize); 16] = [
        (SPARK, 2),
        (FIREBALL, 2),
        (FLAME_NOVA, 2),
        (BLIZZARD, 1),
        (FROST_LANCE, 2),
        (MENDING_LIGHT, 2),
        (RALLYING_CRY, 1),
        (SQUIRE, 2),
        (SHIELD_BEARER, 2),
        (STONE_WARDEN, 2),
        (TUSKED_BRUTE, 2),
        (HATCHLING_NEST, 2),
        (SCHOLAR, 2),
        (SNIPER, 2),
        (STORM_HERALD, 2),
        (SILVER_GUARDIAN, 2),
    ];
    LIST.iter()
        .flat_map(|&(id, copies)| std::iter::repeat(id).take(copies))
        .collect()
}
