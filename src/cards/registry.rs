//! Card registry for definition lookup.
//!
//! The `CardRegistry` stores every card definition a match can reference:
//! deck lists, the resource card and summon targets all resolve through it.

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId, CardType};
use crate::core::error::{EngineResult, InternalInconsistency};

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use duel_engine::cards::{CardRegistry, CardDefinition, CardId};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardDefinition::unit(CardId::new(1), "Squire", 1, 1, 2));
///
/// let found = registry.get(CardId::new(1)).unwrap();
/// assert_eq!(found.name, "Squire");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardDefinition>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition.
    ///
    /// Panics if a card with the same ID already exists.
    pub fn register(&mut self, card: CardDefinition) {
        if self.cards.contains_key(&card.id) {
            panic!("Card with ID {:?} already registered", card.id);
        }
        self.cards.insert(card.id, card);
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    /// Get a card definition by ID, or an integrity error.
    pub fn lookup(&self, id: CardId) -> EngineResult<&CardDefinition> {
        self.cards
            .get(&id)
            .ok_or_else(|| InternalInconsistency::UnknownCard(id).into())
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }

    /// Find cards by type.
    pub fn find_by_type(&self, card_type: CardType) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values().filter(move |c| c.card_type() == card_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::EngineError;

    fn sample_registry() -> CardRegistry {
        let mut registry = CardRegistry::new();
        registry.register(CardDefinition::unit(CardId::new(1), "Squire", 1, 1, 2));
        registry.register(CardDefinition::unit(CardId::new(2), "Knight", 3, 3, 3));
        registry.register(CardDefinition::spell(CardId::new(3), "Spark", 1));
        registry
    }

    #[test]
    fn test_register_and_get() {
        let registry = sample_registry();
        assert_eq!(registry.len(), 3);
        assert!(registry.contains(CardId::new(2)));
        assert!(registry.get(CardId::new(99)).is_none());
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_registration_panics() {
        let mut registry = sample_registry();
        registry.register(CardDefinition::spell(CardId::new(1), "Dupe", 0));
    }

    #[test]
    fn test_lookup_unknown_is_internal() {
        let registry = sample_registry();
        let err = registry.lookup(CardId::new(42)).unwrap_err();
        assert_eq!(
            err,
            EngineError::Internal(InternalInconsistency::UnknownCard(CardId::new(42)))
        );
    }

    #[test]
    fn test_find_by_type() {
        let registry = sample_registry();
        assert_eq!(registry.find_by_type(CardType::Unit).count(), 2);
        assert_eq!(registry.find_by_type(CardType::Secret).count(), 0);
    }
}
