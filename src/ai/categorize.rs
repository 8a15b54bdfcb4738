//! Hand categorization.
//!
//! Every hand card lands in exactly one bucket. Classification reads the
//! card's keywords and structured effects; names and rules text are never
//! consulted.
//!
//! ## Precedence
//!
//! Units: taunt, then divine shield, then strong, then other units.
//! Spells: resource, then area damage, then healing, then single-target
//! damage, then other spells. Secrets are other spells. A spell with no
//! on-play effect matches no rule and goes to `Uncategorized`.

use serde::{Deserialize, Serialize};

use super::config::AiConfig;
use crate::cards::Card;
use crate::effects::{Primitive, Trigger};

/// AI hand bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bucket {
    Taunts,
    DivineShields,
    StrongUnits,
    AreaSpells,
    HealingSpells,
    DamageSpells,
    OtherUnits,
    OtherSpells,
    /// One-shot mana cards.
    Resources,
    /// Cards no rule claims.
    Uncategorized,
}

impl Bucket {
    pub const ALL: [Bucket; 10] = [
        Bucket::Taunts,
        Bucket::DivineShields,
        Bucket::StrongUnits,
        Bucket::AreaSpells,
        Bucket::HealingSpells,
        Bucket::DamageSpells,
        Bucket::OtherUnits,
        Bucket::OtherSpells,
        Bucket::Resources,
        Bucket::Uncategorized,
    ];

    fn slot(self) -> usize {
        self as usize
    }
}

/// Hand indices grouped by bucket, each list in hand order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HandCategories {
    buckets: [Vec<usize>; 10],
}

impl HandCategories {
    /// Hand indices in a bucket.
    #[must_use]
    pub fn get(&self, bucket: Bucket) -> &[usize] {
        &self.buckets[bucket.slot()]
    }

    /// Total number of categorized cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bucket of a hand index.
    #[must_use]
    pub fn bucket_of(&self, hand_index: usize) -> Option<Bucket> {
        Bucket::ALL
            .into_iter()
            .find(|b| self.get(*b).contains(&hand_index))
    }
}

/// Classify one card. Returns `None` if no rule claims it.
#[must_use]
pub fn classify(card: &Card, config: &AiConfig) -> Option<Bucket> {
    match card {
        Card::Unit(unit) => Some(if unit.has_taunt {
            Bucket::Taunts
        } else if unit.has_divine_shield {
            Bucket::DivineShields
        } else if unit.attack >= config.strong_attack {
            Bucket::StrongUnits
        } else {
            Bucket::OtherUnits
        }),
        Card::Secret(_) => Some(Bucket::OtherSpells),
        Card::Spell(_) => {
            let effects: Vec<_> = card.effects_for(Trigger::OnPlay).map(|e| &e.effect).collect();
            if effects.is_empty() {
                return None;
            }
            if effects
                .iter()
                .all(|e| matches!(e.primitive, Primitive::GainMana { .. }))
            {
                return Some(Bucket::Resources);
            }
            let damages = |area: bool| {
                effects
                    .iter()
                    .any(|e| e.primitive.damage().is_some() && e.target.is_area() == area)
            };
            Some(if damages(true) {
                Bucket::AreaSpells
            } else if effects
                .iter()
                .any(|e| matches!(e.primitive, Primitive::Heal { .. }))
            {
                Bucket::HealingSpells
            } else if damages(false) {
                Bucket::DamageSpells
            } else {
                Bucket::OtherSpells
            })
        }
    }
}

/// Partition a hand into buckets.
///
/// Cards no rule claims are logged and kept in `Uncategorized`.
#[must_use]
pub fn categorize_hand<'a>(hand: impl IntoIterator<Item = &'a Card>, config: &AiConfig) -> HandCategories {
    let mut categories = HandCategories::default();
    for (index, card) in hand.into_iter().enumerate() {
        let bucket = classify(card, config).unwrap_or_else(|| {
            log::warn!("no hand bucket for {} ({}), using default", card.name(), card.card_id());
            Bucket::Uncategorized
        });
        categories.buckets[bucket.slot()].push(index);
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::catalog::{self, starter_registry};
    use crate::cards::{CardDefinition, CardId, InstanceId};

    fn card(id: CardId) -> Card {
        starter_registry().lookup(id).unwrap().instantiate(InstanceId(0))
    }

    #[test]
    fn test_classify_units() {
        let config = AiConfig::default();
        assert_eq!(classify(&card(catalog::STONE_WARDEN), &config), Some(Bucket::Taunts));
        assert_eq!(classify(&card(catalog::SILVER_GUARDIAN), &config), Some(Bucket::Taunts));
        assert_eq!(classify(&card(catalog::SHIELD_BEARER), &config), Some(Bucket::DivineShields));
        assert_eq!(classify(&card(catalog::TUSKED_BRUTE), &config), Some(Bucket::StrongUnits));
        assert_eq!(classify(&card(catalog::SQUIRE), &config), Some(Bucket::OtherUnits));
    }

    #[test]
    fn test_classify_spells() {
        let config = AiConfig::default();
        assert_eq!(classify(&card(catalog::MANA_SHARD), &config), Some(Bucket::Resources));
        assert_eq!(classify(&card(catalog::FLAME_NOVA), &config), Some(Bucket::AreaSpells));
        assert_eq!(classify(&card(catalog::BLIZZARD), &config), Some(Bucket::AreaSpells));
        assert_eq!(classify(&card(catalog::MENDING_LIGHT), &config), Some(Bucket::HealingSpells));
        assert_eq!(classify(&card(catalog::FIREBALL), &config), Some(Bucket::DamageSpells));
        assert_eq!(classify(&card(catalog::RALLYING_CRY), &config), Some(Bucket::OtherSpells));
        assert_eq!(classify(&card(catalog::ICE_TRAP), &config), Some(Bucket::OtherSpells));
    }

    #[test]
    fn test_strong_threshold_from_config() {
        let config = AiConfig::default().with_strong_attack(6);
        assert_eq!(classify(&card(catalog::TUSKED_BRUTE), &config), Some(Bucket::OtherUnits));
    }

    #[test]
    fn test_unclaimed_card_kept() {
        let blank = CardDefinition::spell(CardId::new(77), "Blank", 0).instantiate(InstanceId(1));
        let hand = vec![card(catalog::SQUIRE), blank];
        let categories = categorize_hand(&hand, &AiConfig::default());

        assert_eq!(categories.len(), 2);
        assert_eq!(categories.get(Bucket::Uncategorized), &[1]);
        assert_eq!(categories.bucket_of(0), Some(Bucket::OtherUnits));
    }

    #[test]
    fn test_buckets_keep_hand_order() {
        let hand = vec![
            card(catalog::SPARK),
            card(catalog::SQUIRE),
            card(catalog::FIREBALL),
        ];
        let categories = categorize_hand(&hand, &AiConfig::default());
        assert_eq!(categories.get(Bucket::DamageSpells), &[0, 2]);
    }
}
