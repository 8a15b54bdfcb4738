//! Outbound match events.
//!
//! Every successful intent yields a list of `MatchEvent`s in the order they
//! happened. Presentation layers consume them to drive sounds, particles and
//! animations; the engine has no opinion on how they are rendered.
//!
//! Events never carry hidden information: a draw reports only who drew.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, CardType};
use crate::core::{PlayerId, TargetRef};
use crate::rules::GameResult;

/// Kind of visual feedback for a resolved primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackKind {
    Damage,
    /// Divine shield absorbed a hit.
    ShieldBroken,
    Heal,
    Buff,
    Freeze,
    Taunt,
    DivineShield,
    Summon,
    Draw,
    Mana,
}

/// A typed visual-feedback descriptor: what happened, how much, and where.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub magnitude: i32,
    /// Logical board position at the time the primitive resolved.
    pub position: TargetRef,
}

impl Feedback {
    #[must_use]
    pub fn new(kind: FeedbackKind, magnitude: i32, position: TargetRef) -> Self {
        Self {
            kind,
            magnitude,
            position,
        }
    }
}

/// Animation-intent descriptor. At most one is pending per push.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Animation {
    Attack {
        attacker: TargetRef,
        target: TargetRef,
        is_hero_target: bool,
    },
    Spell {
        caster: PlayerId,
        card_id: CardId,
        target: Option<TargetRef>,
    },
    Summon {
        position: TargetRef,
    },
}

/// Something that happened during an intent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    TurnStarted {
        player: PlayerId,
        turn: u32,
    },
    CardPlayed {
        player: PlayerId,
        card_id: CardId,
        card_type: CardType,
    },
    /// A secret entered play. Which one stays hidden until it is revealed.
    SecretSet {
        player: PlayerId,
    },
    CardDrawn {
        player: PlayerId,
    },
    /// Drawn into a full hand and sent to the graveyard.
    CardBurned {
        player: PlayerId,
        card_id: CardId,
    },
    HeroAbilityUsed {
        player: PlayerId,
    },
    Feedback(Feedback),
    Animation(Animation),
    UnitDied {
        owner: PlayerId,
        card_id: CardId,
    },
    SecretRevealed {
        owner: PlayerId,
        card_id: CardId,
    },
    GameOver {
        result: GameResult,
    },
}
