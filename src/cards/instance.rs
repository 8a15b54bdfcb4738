//! Card instances - runtime card state.
//!
//! A [`Card`] is one physical copy in a match. Units carry their battlefield
//! state (current health, frozen, attacked this turn); spells and secrets are
//! immutable once drawn.
//!
//! ## Variants
//!
//! The card kind is a closed set, so `Card` is a tagged union and code that
//! cares about the kind matches on it. Fields common to every kind are
//! exposed through accessors ([`Card::cost`], [`Card::name`], ...).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::{CardId, CardType, SecretTrigger};
use crate::effects::{CardEffect, Trigger};

/// Unique identifier for one card copy within a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Create a new instance ID.
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

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A unit copy with its battlefield state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitCard {
    pub instance: InstanceId,
    pub card_id: CardId,
    pub name: String,
    pub cost: u8,
    pub art: Option<String>,
    pub attack: i32,
    /// Current health. The unit dies when this drops to zero or below.
    pub health: i32,
    pub max_health: i32,
    pub has_attacked: bool,
    pub frozen: bool,
    /// Turn transitions left before the freeze wears off.
    pub frozen_turns_remaining: u8,
    pub has_taunt: bool,
    pub has_divine_shield: bool,
    pub effects: SmallVec<[CardEffect; 2]>,
}

impl UnitCard {
    /// True once health has dropped to zero or below.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// True if the unit may declare an attack right now.
    #[must_use]
    pub fn can_attack(&self) -> bool {
        !self.has_attacked && !self.frozen && !self.is_dead()
    }

    /// Apply damage, honoring divine shield.
    ///
    /// Returns the damage actually dealt: zero if the shield absorbed it.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        if amount <= 0 {
            return 0;
        }
        if self.has_divine_shield {
            self.has_divine_shield = false;
            return 0;
        }
        self.health -= amount;
        amount
    }

    /// Restore health up to the maximum. Returns the amount healed.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = (self.health + amount.max(0)).min(self.max_health);
        self.health - before
    }

    /// Freeze for `turns` turn transitions. Never shortens an existing freeze.
    pub fn freeze(&mut self, turns: u8) {
        if turns == 0 {
            return;
        }
        self.frozen = true;
        self.frozen_turns_remaining = self.frozen_turns_remaining.max(turns);
    }

    /// Count one turn transition off the freeze.
    pub fn tick_freeze(&mut self) {
        if self.frozen_turns_remaining > 0 {
            self.frozen_turns_remaining -= 1;
        }
        if self.frozen_turns_remaining == 0 {
            self.frozen = false;
        }
    }
}

/// A spell copy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellCard {
    pub instance: InstanceId,
    pub card_id: CardId,
    pub name: String,
    pub cost: u8,
    pub art: Option<String>,
    pub effects: SmallVec<[CardEffect; 2]>,
}

/// A secret copy: hidden from the opponent until its trigger fires.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretCard {
    pub instance: InstanceId,
    pub card_id: CardId,
    pub name: String,
    pub cost: u8,
    pub art: Option<String>,
    pub trigger: SecretTrigger,
    pub effects: SmallVec<[CardEffect; 2]>,
}

/// One card copy in a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Card {
    Unit(UnitCard),
    Spell(SpellCard),
    Secret(SecretCard),
}

impl Card {
    /// The type discriminator.
    #[must_use]
    pub fn card_type(&self) -> CardType {
        match self {
            Card::Unit(_) => CardType::Unit,
            Card::Spell(_) => CardType::Spell,
            Card::Secret(_) => CardType::Secret,
        }
    }

    #[must_use]
    pub fn instance(&self) -> InstanceId {
        match self {
            Card::Unit(c) => c.instance,
            Card::Spell(c) => c.instance,
            Card::Secret(c) => c.instance,
        }
    }

    #[must_use]
    pub fn card_id(&self) -> CardId {
        match self {
            Card::Unit(c) => c.card_id,
            Card::Spell(c) => c.card_id,
            Card::Secret(c) => c.card_id,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Card::Unit(c) => &c.name,
            Card::Spell(c) => &c.name,
            Card::Secret(c) => &c.name,
        }
    }

    #[must_use]
    pub fn cost(&self) -> u8 {
        match self {
            Card::Unit(c) => c.cost,
            Card::Spell(c) => c.cost,
            Card::Secret(c) => c.cost,
        }
    }

    #[must_use]
    pub fn effects(&self) -> &[CardEffect] {
        match self {
            Card::Unit(c) => &c.effects,
            Card::Spell(c) => &c.effects,
            Card::Secret(c) => &c.effects,
        }
    }

    /// Effects that fire on `trigger`.
    pub fn effects_for(&self, trigger: Trigger) -> impl Iterator<Item = &CardEffect> {
        self.effects().iter().filter(move |e| e.trigger == trigger)
    }

    /// True if an on-play effect needs a chosen target.
    ///
    /// Secret effects resolve when the secret is revealed, against the
    /// character that set it off, so a secret never asks for one.
    #[must_use]
    pub fn needs_chosen_target(&self) -> bool {
        !matches!(self, Card::Secret(_))
            && self
                .effects_for(Trigger::OnPlay)
                .any(|e| e.effect.target.is_chosen())
    }

    /// The unit payload, if this is a unit.
    #[must_use]
    pub fn as_unit(&self) -> Option<&UnitCard> {
        match self {
            Card::Unit(unit) => Some(unit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardDefinition;

    fn unit(attack: i32, health: i32) -> UnitCard {
        match CardDefinition::unit(CardId::new(1), "Test Unit", 1, attack, health)
            .instantiate(InstanceId(1))
        {
            Card::Unit(unit) => unit,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_divine_shield_absorbs_one_hit() {
        let mut u = unit(2, 3);
        u.has_divine_shield = true;

        assert_eq!(u.take_damage(5), 0);
        assert_eq!(u.health, 3);
        assert!(!u.has_divine_shield);

        assert_eq!(u.take_damage(5), 5);
        assert!(u.is_dead());
    }

    #[test]
    fn test_zero_damage_keeps_shield() {
        let mut u = unit(2, 3);
        u.has_divine_shield = true;
        assert_eq!(u.take_damage(0), 0);
        assert!(u.has_divine_shield);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut u = unit(2, 5);
        u.take_damage(3);
        assert_eq!(u.heal(10), 3);
        assert_eq!(u.health, 5);
    }

    #[test]
    fn test_freeze_ticks_down() {
        let mut u = unit(2, 2);
        u.freeze(2);
        assert!(!u.can_attack());

        u.tick_freeze();
        assert!(u.frozen);
        u.tick_freeze();
        assert!(!u.frozen);
        assert!(u.can_attack());
    }

    #[test]
    fn test_freeze_never_shortens() {
        let mut u = unit(1, 1);
        u.freeze(3);
        u.freeze(1);
        assert_eq!(u.frozen_turns_remaining, 3);
    }

    #[test]
    fn test_zero_attack_can_still_attack() {
        let mut u = unit(0, 4);
        assert!(u.can_attack());
        u.has_attacked = true;
        assert!(!u.can_attack());
    }

    #[test]
    fn test_card_accessors() {
        let card = CardDefinition::spell(CardId::new(8), "Spark", 1).instantiate(InstanceId(3));
        assert_eq!(card.card_type(), CardType::Spell);
        assert_eq!(card.cost(), 1);
        assert_eq!(card.name(), "Spark");
        assert_eq!(card.instance().to_string(), "#3");
        assert!(card.as_unit().is_none());
    }
}
