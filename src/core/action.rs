//! Intents: what a player asks the engine to do.
//!
//! Intents reference cards by position (hand index, field index), the same
//! way a client sees the board. Characters on the board are addressed with a
//! [`TargetRef`].

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// A character on the board: a hero or a unit at a field position.
///
/// Also used as the logical board position in feedback and animation
/// descriptors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetRef {
    /// A player's hero.
    Hero(PlayerId),
    /// A unit on `owner`'s field at `index`.
    Unit { owner: PlayerId, index: usize },
}

impl TargetRef {
    /// Shorthand for a unit reference.
    #[must_use]
    pub const fn unit(owner: PlayerId, index: usize) -> Self {
        Self::Unit { owner, index }
    }

    /// The player who controls this character.
    #[must_use]
    pub const fn owner(self) -> PlayerId {
        match self {
            TargetRef::Hero(owner) | TargetRef::Unit { owner, .. } => owner,
        }
    }

    /// True for hero references.
    #[must_use]
    pub const fn is_hero(self) -> bool {
        matches!(self, TargetRef::Hero(_))
    }
}

impl std::fmt::Display for TargetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetRef::Hero(owner) => write!(f, "{} hero", owner),
            TargetRef::Unit { owner, index } => write!(f, "{} unit #{}", owner, index),
        }
    }
}

/// An inbound player intent.
///
/// ## Example
///
/// ```
/// use duel_engine::core::{Intent, PlayerId, TargetRef};
///
/// // Play the first card in hand at the right end of the field.
/// let play = Intent::play(0);
///
/// // Cast the second card at the enemy hero.
/// let bolt = Intent::play_at(1, TargetRef::Hero(PlayerId::SECOND));
///
/// // Attack the enemy hero with the unit in field slot 2.
/// let swing = Intent::attack_hero(2);
/// assert!(matches!(swing, Intent::Attack { is_hero_target: true, .. }));
/// # let _ = (play, bolt);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Play a card from hand.
    PlayCard {
        hand_index: usize,
        /// Field slot for units; `None` places at the right end.
        field_index: Option<usize>,
        /// Chosen target for effects that need one.
        target: Option<TargetRef>,
    },

    /// Attack with a unit on the acting player's field.
    Attack {
        attacker_index: usize,
        /// Opposing field index; ignored when `is_hero_target` is set.
        target_index: Option<usize>,
        is_hero_target: bool,
    },

    /// Activate the hero ability.
    UseHeroAbility,

    /// End the turn.
    EndTurn,
}

impl Intent {
    /// Play a card with no target at the default position.
    #[must_use]
    pub const fn play(hand_index: usize) -> Self {
        Self::PlayCard {
            hand_index,
            field_index: None,
            target: None,
        }
    }

    /// Play a card at a chosen target.
    #[must_use]
    pub const fn play_at(hand_index: usize, target: TargetRef) -> Self {
        Self::PlayCard {
            hand_index,
            field_index: None,
            target: Some(target),
        }
    }

    /// Attack an opposing unit.
    #[must_use]
    pub const fn attack_unit(attacker_index: usize, target_index: usize) -> Self {
        Self::Attack {
            attacker_index,
            target_index: Some(target_index),
            is_hero_target: false,
        }
    }

    /// Attack the opposing hero.
    #[must_use]
    pub const fn attack_hero(attacker_index: usize) -> Self {
        Self::Attack {
            attacker_index,
            target_index: None,
            is_hero_target: true,
        }
    }

    /// Short label for logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Intent::PlayCard { .. } => "play_card",
            Intent::Attack { .. } => "attack",
            Intent::UseHeroAbility => "use_hero_ability",
            Intent::EndTurn => "end_turn",
        }
    }
}

/// A recorded intent with metadata for replay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who acted.
    pub player: PlayerId,

    /// The intent applied.
    pub intent: Intent,

    /// Turn number when the intent was applied.
    pub turn: u32,

    /// Sequence number within the match.
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, intent: Intent, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            intent,
            turn,
            sequence,
        }
    }
}
