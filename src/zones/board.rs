//! Zone transitions on one player's board.
//!
//! Cards move between zones by value: deck → hand → field or graveyard,
//! secrets → graveyard. Nothing is ever duplicated.
//!
//! The `PlayerState` methods touch a single seat. [`MatchState::draw_card`]
//! wraps a draw with the combat-log entry and event, since only the match
//! knows the turn number.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, UnitCard};
use crate::core::config::MAX_FIELD;
use crate::core::error::{EngineResult, IllegalAction, InternalInconsistency};
use crate::core::player::PlayerId;
use crate::core::state::{MatchState, PlayerState};
use crate::events::MatchEvent;

/// Outcome of drawing one card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawOutcome {
    /// The card went to the end of the hand.
    Drawn { name: String },
    /// The hand was full; the card went to the graveyard.
    Burned { name: String },
    /// The deck was empty. Nothing happens.
    DeckEmpty,
}

impl PlayerState {
    /// Move the top deck card to the hand.
    ///
    /// A full hand burns the card instead. An empty deck is a no-op.
    pub fn draw(&mut self) -> DrawOutcome {
        let Some(card) = self.deck.pop_front() else {
            return DrawOutcome::DeckEmpty;
        };
        let name = card.name().to_string();
        if self.hand_full() {
            self.graveyard.push_back(card);
            DrawOutcome::Burned { name }
        } else {
            self.hand.push_back(card);
            DrawOutcome::Drawn { name }
        }
    }

    /// Take a card out of the hand.
    pub fn take_from_hand(&mut self, index: usize) -> EngineResult<Card> {
        let len = self.hand.len();
        if index >= len {
            return Err(InternalInconsistency::HandIndex { index, len }.into());
        }
        Ok(self.hand.remove(index))
    }

    /// Move a hand card to the graveyard.
    pub fn discard_from_hand(&mut self, index: usize) -> EngineResult<()> {
        let card = self.take_from_hand(index)?;
        self.graveyard.push_back(card);
        Ok(())
    }

    /// Put a unit on the field. Returns the index it landed at.
    ///
    /// `None` or an index past the end appends.
    pub fn place_on_field(
        &mut self,
        unit: UnitCard,
        index: Option<usize>,
    ) -> Result<usize, IllegalAction> {
        if self.field.len() >= MAX_FIELD {
            return Err(IllegalAction::FieldFull);
        }
        let index = index.map_or(self.field.len(), |i| i.min(self.field.len()));
        self.field.insert(index, unit);
        Ok(index)
    }

    /// Take a unit off the field.
    pub fn remove_from_field(&mut self, owner: PlayerId, index: usize) -> EngineResult<UnitCard> {
        let len = self.field.len();
        if index >= len {
            return Err(InternalInconsistency::FieldIndex { owner, index, len }.into());
        }
        Ok(self.field.remove(index))
    }
}

impl MatchState {
    /// Draw one card for `player`, logging the outcome.
    ///
    /// Card names are written to the combat log only for burns, which are
    /// public. A normal draw reports just who drew.
    pub fn draw_card(&mut self, player: PlayerId, events: &mut Vec<MatchEvent>) -> DrawOutcome {
        let outcome = self.player_mut(player).draw();
        let hero = self.player(player).hero.name.clone();
        match &outcome {
            DrawOutcome::Drawn { .. } => {
                self.log(format!("{} draws a card", hero));
                events.push(MatchEvent::CardDrawn { player });
            }
            DrawOutcome::Burned { name } => {
                self.log(format!("{}'s hand is full. {} is burned", hero, name));
                let card_id = self
                    .player(player)
                    .graveyard
                    .back()
                    .map(Card::card_id);
                if let Some(card_id) = card_id {
                    events.push(MatchEvent::CardBurned { player, card_id });
                }
            }
            DrawOutcome::DeckEmpty => {
                self.log(format!("{} has no cards left to draw", hero));
            }
        }
        outcome
    }
}
