//! Card system: definitions, runtime cards, registry and the starter set.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `CardDefinition`: Static card data with structured effects
//! - `Card`: Runtime card, a tagged union of `UnitCard`, `SpellCard`, `SecretCard`
//! - `InstanceId`: Identifier for one copy in a match
//! - `CardRegistry`: Card definition lookup
//!
//! Card kinds form a closed set, so code that handles cards matches on
//! `Card` and the compiler checks every kind is covered.

pub mod catalog;
pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{CardDefinition, CardId, CardKind, CardType, SecretTrigger, UnitStats};
pub use instance::{Card, InstanceId, SecretCard, SpellCard, UnitCard};
pub use registry::CardRegistry;
