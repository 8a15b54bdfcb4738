//! Card definitions - static card data.
//!
//! `CardDefinition` holds the printed properties of a card: cost, stats,
//! keywords and its structured effect list. Battlefield state (damage taken,
//! frozen, attacked this turn) lives on the runtime [`Card`] created by
//! [`CardDefinition::instantiate`].

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::instance::{Card, InstanceId, SecretCard, SpellCard, UnitCard};
use crate::effects::{CardEffect, Trigger};

/// Unique identifier for a card definition.
///
/// This identifies the "type" of card (e.g., "Frost Lance"),
/// not a specific copy in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card type discriminator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Unit,
    Spell,
    Secret,
}

/// Opponent action that reveals a secret.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecretTrigger {
    /// An enemy unit attacks the owner's hero.
    HeroAttacked,
    /// The opponent plays a unit.
    UnitPlayed,
    /// The opponent casts a spell.
    SpellCast,
}

/// Printed unit stats and keywords.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitStats {
    pub attack: i32,
    pub health: i32,
    pub taunt: bool,
    pub divine_shield: bool,
}

/// Variant-specific printed data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardKind {
    Unit(UnitStats),
    Spell,
    Secret(SecretTrigger),
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use duel_engine::cards::{CardDefinition, CardId, CardType};
/// use duel_engine::effects::{CardEffect, Effect, EffectTarget};
///
/// let bolt = CardDefinition::spell(CardId::new(1), "Spark", 1)
///     .with_effect(CardEffect::on_play(Effect::damage(2, EffectTarget::Chosen)));
///
/// assert_eq!(bolt.card_type(), CardType::Spell);
/// assert!(bolt.needs_chosen_target());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Display name.
    pub name: String,

    /// Mana cost.
    pub cost: u8,

    /// Art reference for the presentation layer.
    pub art: Option<String>,

    /// Variant-specific data.
    pub kind: CardKind,

    /// Triggered effects, in resolution order.
    pub effects: SmallVec<[CardEffect; 2]>,
}

impl CardDefinition {
    fn with_kind(id: CardId, name: impl Into<String>, cost: u8, kind: CardKind) -> Self {
        Self {
            id,
            name: name.into(),
            cost,
            art: None,
            kind,
            effects: SmallVec::new(),
        }
    }

    /// Create a unit with no keywords.
    #[must_use]
    pub fn unit(id: CardId, name: impl Into<String>, cost: u8, attack: i32, health: i32) -> Self {
        Self::with_kind(
            id,
            name,
            cost,
            CardKind::Unit(UnitStats {
                attack,
                health,
                taunt: false,
                divine_shield: false,
            }),
        )
    }

    /// Create a spell.
    #[must_use]
    pub fn spell(id: CardId, name: impl Into<String>, cost: u8) -> Self {
        Self::with_kind(id, name, cost, CardKind::Spell)
    }

    /// Create a secret.
    #[must_use]
    pub fn secret(id: CardId, name: impl Into<String>, cost: u8, trigger: SecretTrigger) -> Self {
        Self::with_kind(id, name, cost, CardKind::Secret(trigger))
    }

    /// Give a unit taunt (builder pattern). No effect on other kinds.
    #[must_use]
    pub fn with_taunt(mut self) -> Self {
        if let CardKind::Unit(stats) = &mut self.kind {
            stats.taunt = true;
        }
        self
    }

    /// Give a unit divine shield (builder pattern). No effect on other kinds.
    #[must_use]
    pub fn with_divine_shield(mut self) -> Self {
        if let CardKind::Unit(stats) = &mut self.kind {
            stats.divine_shield = true;
        }
        self
    }

    /// Add a triggered effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: CardEffect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Set the art reference (builder pattern).
    #[must_use]
    pub fn with_art(mut self, art: impl Into<String>) -> Self {
        self.art = Some(art.into());
        self
    }

    /// The type discriminator.
    #[must_use]
    pub fn card_type(&self) -> CardType {
        match self.kind {
            CardKind::Unit(_) => CardType::Unit,
            CardKind::Spell => CardType::Spell,
            CardKind::Secret(_) => CardType::Secret,
        }
    }

    /// Effects that fire on `trigger`.
    pub fn effects_for(&self, trigger: Trigger) -> impl Iterator<Item = &CardEffect> {
        self.effects.iter().filter(move |e| e.trigger == trigger)
    }

    /// True if an on-play effect needs a chosen target. Never for secrets.
    #[must_use]
    pub fn needs_chosen_target(&self) -> bool {
        !matches!(self.kind, CardKind::Secret(_))
            && self
                .effects_for(Trigger::OnPlay)
                .any(|e| e.effect.target.is_chosen())
    }

    /// Create the runtime card for one copy in a match.
    #[must_use]
    pub fn instantiate(&self, instance: InstanceId) -> Card {
        match &self.kind {
            CardKind::Unit(stats) => Card::Unit(UnitCard {
                instance,
                card_id: self.id,
                name: self.name.clone(),
                cost: self.cost,
                art: self.art.clone(),
                attack: stats.attack,
                health: stats.health,
                max_health: stats.health,
                has_attacked: false,
                frozen: false,
                frozen_turns_remaining: 0,
                has_taunt: stats.taunt,
                has_divine_shield: stats.divine_shield,
                effects: self.effects.clone(),
            }),
            CardKind::Spell => Card::Spell(SpellCard {
                instance,
                card_id: self.id,
                name: self.name.clone(),
                cost: self.cost,
                art: self.art.clone(),
                effects: self.effects.clone(),
            }),
            CardKind::Secret(trigger) => Card::Secret(SecretCard {
                instance,
                card_id: self.id,
                name: self.name.clone(),
                cost: self.cost,
                art: self.art.clone(),
                trigger: *trigger,
                effects: self.effects.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{Effect, EffectTarget};

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_unit_builder() {
        let card = CardDefinition::unit(CardId::new(1), "Warden", 3, 2, 4)
            .with_taunt()
            .with_divine_shield()
            .with_art("warden.png");

        assert_eq!(card.card_type(), CardType::Unit);
        assert_eq!(card.art.as_deref(), Some("warden.png"));
        match card.kind {
            CardKind::Unit(stats) => {
                assert_eq!((stats.attack, stats.health), (2, 4));
                assert!(stats.taunt);
                assert!(stats.divine_shield);
            }
            _ => panic!("Expected unit"),
        }
    }

    #[test]
    fn test_keywords_ignored_on_spells() {
        let card = CardDefinition::spell(CardId::new(2), "Spark", 1).with_taunt();
        assert_eq!(card.kind, CardKind::Spell);
    }

    #[test]
    fn test_instantiate_unit_sets_max_health() {
        let card = CardDefinition::unit(CardId::new(3), "Yeti", 4, 4, 5);
        match card.instantiate(InstanceId(9)) {
            Card::Unit(unit) => {
                assert_eq!(unit.instance, InstanceId(9));
                assert_eq!(unit.health, 5);
                assert_eq!(unit.max_health, 5);
                assert!(!unit.has_attacked);
                assert!(!unit.frozen);
            }
            other => panic!("Expected unit, got {:?}", other),
        }
    }

    #[test]
    fn test_needs_chosen_target() {
        let aoe = CardDefinition::spell(CardId::new(4), "Nova", 2)
            .with_effect(CardEffect::on_play(Effect::damage(1, EffectTarget::AllEnemies)));
        assert!(!aoe.needs_chosen_target());

        let battlecry = CardDefinition::unit(CardId::new(5), "Sniper", 2, 2, 1)
            .with_effect(CardEffect::on_play(Effect::damage(1, EffectTarget::Chosen)));
        assert!(battlecry.needs_chosen_target());

        let deathrattle = CardDefinition::unit(CardId::new(6), "Bomb", 1, 1, 1)
            .with_effect(CardEffect::on_death(Effect::damage(1, EffectTarget::Chosen)));
        assert!(!deathrattle.needs_chosen_target());

        let ambush = CardDefinition::secret(CardId::new(8), "Ambush", 2, SecretTrigger::UnitPlayed)
            .with_effect(CardEffect::on_play(Effect::damage(4, EffectTarget::Chosen)));
        assert!(!ambush.needs_chosen_target());
        assert!(!ambush.instantiate(InstanceId::new(1)).needs_chosen_target());
    }

    #[test]
    fn test_definition_serialization() {
        let card = CardDefinition::secret(CardId::new(7), "Snare", 2, SecretTrigger::HeroAttacked)
            .with_effect(CardEffect::on_play(Effect::freeze(2, EffectTarget::AllEnemyUnits)));
        let json = serde_json::to_string(&card).unwrap();
        let deserialized: CardDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(card, deserialized);
    }
}
