//! Match configuration.
//!
//! Hosts configure a match at startup by providing a `MatchConfig`:
//! - starting hero health and opening hand size
//! - the RNG seed used to shuffle decks
//! - the resource card handed to the second player
//! - each seat's hero and hero ability
//!
//! Board limits are rules of the game, not configuration, and live here as
//! constants.

use serde::{Deserialize, Serialize};

use super::player::{PlayerId, PlayerMap};
use crate::cards::CardId;
use crate::effects::{Effect, EffectTarget, Primitive};

/// Maximum units on one player's field.
pub const MAX_FIELD: usize = 7;

/// Maximum cards in one player's hand.
pub const MAX_HAND: usize = 10;

/// Mana crystal cap.
pub const MAX_MANA: u8 = 10;

/// Maximum secrets one player may have in play.
pub const MAX_SECRETS: usize = 5;

/// Hero health at match start unless configured otherwise.
pub const DEFAULT_HERO_HEALTH: i32 = 30;

/// Static description of a hero ability.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityDefinition {
    /// Display name.
    pub name: String,
    /// Mana cost.
    pub cost: u8,
    /// Player-facing rules text.
    pub description: String,
    /// Untargeted effects applied on use.
    pub effects: Vec<Effect>,
}

impl AbilityDefinition {
    /// Create an ability definition.
    pub fn new(
        name: impl Into<String>,
        cost: u8,
        description: impl Into<String>,
        effects: impl IntoIterator<Item = Effect>,
    ) -> Self {
        Self {
            name: name.into(),
            cost,
            description: description.into(),
            effects: effects.into_iter().collect(),
        }
    }
}

/// Static description of a hero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroDefinition {
    /// Display name.
    pub name: String,
    /// The hero's activatable ability.
    pub ability: AbilityDefinition,
}

impl HeroDefinition {
    /// Create a hero.
    pub fn new(name: impl Into<String>, ability: AbilityDefinition) -> Self {
        Self {
            name: name.into(),
            ability,
        }
    }
}

impl Default for HeroDefinition {
    fn default() -> Self {
        Self::new(
            "Pyromancer",
            AbilityDefinition::new(
                "Ember",
                2,
                "Deal 1 damage to the enemy hero.",
                [Effect::new(Primitive::Damage { amount: 1 }, EffectTarget::EnemyHero)],
            ),
        )
    }
}

/// Complete match configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Starting hero health, applied to both heroes.
    pub starting_health: i32,

    /// Cards each player draws before the first turn.
    pub starting_hand_size: usize,

    /// Seed for deck shuffling.
    pub seed: u64,

    /// Shuffle decks at match start. Disable for scripted scenarios.
    pub shuffle_decks: bool,

    /// Resource card given to the second player at match start.
    pub coin_card: Option<CardId>,

    /// Hero per seat.
    pub heroes: PlayerMap<HeroDefinition>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            starting_health: DEFAULT_HERO_HEALTH,
            starting_hand_size: 3,
            seed: 42,
            shuffle_decks: true,
            coin_card: None,
            heroes: PlayerMap::with_value(HeroDefinition::default()),
        }
    }
}

impl MatchConfig {
    /// Create a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set starting hero health (builder pattern).
    #[must_use]
    pub fn with_starting_health(mut self, health: i32) -> Self {
        self.starting_health = health;
        self
    }

    /// Set opening hand size (builder pattern).
    #[must_use]
    pub fn with_starting_hand_size(mut self, size: usize) -> Self {
        self.starting_hand_size = size.min(MAX_HAND);
        self
    }

    /// Set the shuffle seed (builder pattern).
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Keep decks in list order (builder pattern).
    #[must_use]
    pub fn without_shuffle(mut self) -> Self {
        self.shuffle_decks = false;
        self
    }

    /// Give the second player a resource card (builder pattern).
    #[must_use]
    pub fn with_coin(mut self, card: CardId) -> Self {
        self.coin_card = Some(card);
        self
    }

    /// Set a seat's hero (builder pattern).
    #[must_use]
    pub fn with_hero(mut self, player: PlayerId, hero: HeroDefinition) -> Self {
        self.heroes[player] = hero;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MatchConfig::default();
        assert_eq!(config.starting_health, 30);
        assert_eq!(config.starting_hand_size, 3);
        assert!(config.shuffle_decks);
        assert!(config.coin_card.is_none());
        assert_eq!(config.heroes[PlayerId::FIRST].ability.cost, 2);
    }

    #[test]
    fn test_builder_pattern() {
        let hero = HeroDefinition::new(
            "Cleric",
            AbilityDefinition::new(
                "Mend",
                2,
                "Restore 2 health to your hero.",
                [Effect::new(Primitive::Heal { amount: 2 }, EffectTarget::FriendlyHero)],
            ),
        );
        let config = MatchConfig::new()
            .with_starting_health(20)
            .with_seed(7)
            .with_starting_hand_size(25)
            .without_shuffle()
            .with_coin(CardId::new(1))
            .with_hero(PlayerId::SECOND, hero);

        assert_eq!(config.seed, 7);
        assert_eq!(config.starting_hand_size, MAX_HAND);
        assert!(!config.shuffle_decks);
        assert_eq!(config.coin_card, Some(CardId::new(1)));
        assert_eq!(config.starting_health, 20);
        assert_eq!(config.heroes[PlayerId::SECOND].name, "Cleric");
        assert_eq!(config.heroes[PlayerId::FIRST].name, "Pyromancer");
    }

    #[test]
    fn test_serialization() {
        let config = MatchConfig::default().with_seed(99);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: MatchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
