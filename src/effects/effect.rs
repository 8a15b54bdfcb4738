//! Effect definitions.
//!
//! Effects are structured data attached to card definitions: a trigger, a
//! primitive and a target selector. Nothing is inferred from rules text.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// When a card effect fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trigger {
    /// The card is played from hand (spells, battlecries, secrets on reveal).
    OnPlay,
    /// The unit declares an attack.
    OnAttack,
    /// The unit is removed from the field by the death sweep.
    OnDeath,
}

/// An atomic game action.
///
/// ## Character primitives
///
/// Apply to every selected character:
/// - `Damage`, `Heal`: heroes and units
/// - `Buff`, `Freeze`, `GrantTaunt`, `GrantDivineShield`: units only
///
/// ## Controller primitives
///
/// Act on the controller regardless of the target selector:
/// - `Draw`, `Summon`, `GainMana`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Primitive {
    Damage { amount: i32 },
    Heal { amount: i32 },
    Draw { count: u8 },
    Buff { attack: i32, health: i32 },
    /// Freeze for this many turn transitions.
    Freeze { turns: u8 },
    GrantTaunt,
    GrantDivineShield,
    Summon { card_id: CardId, count: u8 },
    /// Temporary mana for the current turn.
    GainMana { amount: u8 },
}

impl Primitive {
    /// True for primitives that cannot apply to a hero.
    #[must_use]
    pub fn unit_only(&self) -> bool {
        matches!(
            self,
            Primitive::Buff { .. }
                | Primitive::Freeze { .. }
                | Primitive::GrantTaunt
                | Primitive::GrantDivineShield
        )
    }

    /// True for primitives that act on the controller, not on characters.
    #[must_use]
    pub fn is_controller_scoped(&self) -> bool {
        matches!(
            self,
            Primitive::Draw { .. } | Primitive::Summon { .. } | Primitive::GainMana { .. }
        )
    }

    /// Damage dealt per target, if this is a damage primitive.
    #[must_use]
    pub fn damage(&self) -> Option<i32> {
        match self {
            Primitive::Damage { amount } => Some(*amount),
            _ => None,
        }
    }
}

/// Which characters an effect applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectTarget {
    /// The target chosen with the intent (or the attack target for `OnAttack`).
    Chosen,
    /// The unit carrying the effect.
    SelfUnit,
    FriendlyHero,
    EnemyHero,
    /// Enemy units in field order, then the enemy hero.
    AllEnemies,
    AllEnemyUnits,
    /// The controller's units, then the opponent's.
    AllUnits,
    AllFriendlyUnits,
}

impl EffectTarget {
    #[must_use]
    pub fn is_chosen(self) -> bool {
        self == EffectTarget::Chosen
    }

    /// True for selectors that can reach more than one character.
    #[must_use]
    pub fn is_area(self) -> bool {
        matches!(
            self,
            EffectTarget::AllEnemies
                | EffectTarget::AllEnemyUnits
                | EffectTarget::AllUnits
                | EffectTarget::AllFriendlyUnits
        )
    }

    /// True if the selector can include the enemy hero.
    #[must_use]
    pub fn can_hit_enemy_hero(self) -> bool {
        matches!(
            self,
            EffectTarget::Chosen | EffectTarget::EnemyHero | EffectTarget::AllEnemies
        )
    }
}

/// A primitive aimed at a target selector.
///
/// ## Example
///
/// ```
/// use duel_engine::effects::{Effect, EffectTarget, Primitive};
///
/// let nova = Effect::damage(2, EffectTarget::AllEnemies);
/// assert_eq!(nova.primitive, Primitive::Damage { amount: 2 });
/// assert!(nova.target.is_area());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Effect {
    pub primitive: Primitive,
    pub target: EffectTarget,
}

impl Effect {
    #[must_use]
    pub fn new(primitive: Primitive, target: EffectTarget) -> Self {
        Self { primitive, target }
    }

    #[must_use]
    pub fn damage(amount: i32, target: EffectTarget) -> Self {
        Self::new(Primitive::Damage { amount }, target)
    }

    #[must_use]
    pub fn heal(amount: i32, target: EffectTarget) -> Self {
        Self::new(Primitive::Heal { amount }, target)
    }

    #[must_use]
    pub fn buff(attack: i32, health: i32, target: EffectTarget) -> Self {
        Self::new(Primitive::Buff { attack, health }, target)
    }

    #[must_use]
    pub fn freeze(turns: u8, target: EffectTarget) -> Self {
        Self::new(Primitive::Freeze { turns }, target)
    }

    #[must_use]
    pub fn grant_taunt(target: EffectTarget) -> Self {
        Self::new(Primitive::GrantTaunt, target)
    }

    #[must_use]
    pub fn grant_divine_shield(target: EffectTarget) -> Self {
        Self::new(Primitive::GrantDivineShield, target)
    }

    /// The controller draws `count` cards.
    #[must_use]
    pub fn draw(count: u8) -> Self {
        Self::new(Primitive::Draw { count }, EffectTarget::FriendlyHero)
    }

    /// The controller summons `count` fresh copies of `card_id`.
    #[must_use]
    pub fn summon(card_id: CardId, count: u8) -> Self {
        Self::new(Primitive::Summon { card_id, count }, EffectTarget::FriendlyHero)
    }

    /// The controller gains `amount` temporary mana.
    #[must_use]
    pub fn gain_mana(amount: u8) -> Self {
        Self::new(Primitive::GainMana { amount }, EffectTarget::FriendlyHero)
    }
}

/// A triggered effect on a card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardEffect {
    pub trigger: Trigger,
    pub effect: Effect,
}

impl CardEffect {
    #[must_use]
    pub fn new(trigger: Trigger, effect: Effect) -> Self {
        Self { trigger, effect }
    }

    #[must_use]
    pub fn on_play(effect: Effect) -> Self {
        Self::new(Trigger::OnPlay, effect)
    }

    #[must_use]
    pub fn on_attack(effect: Effect) -> Self {
        Self::new(Trigger::OnAttack, effect)
    }

    #[must_use]
    pub fn on_death(effect: Effect) -> Self {
        Self::new(Trigger::OnDeath, effect)
    }
}
