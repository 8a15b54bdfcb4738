//! Turn controller.
//!
//! ## States
//!
//! `Player0Turn` and `Player1Turn` alternate through [`end_turn`], the only
//! edge; `GameOver` is terminal.
//!
//! ## Transition
//!
//! 1. The turn counter advances and the other seat becomes active.
//! 2. [`refresh_units`] runs for both seats.
//! 3. [`begin_turn`] refills the new active seat's mana and draws a card.

use serde::{Deserialize, Serialize};

use crate::core::config::MAX_MANA;
use crate::core::error::{EngineResult, IllegalAction};
use crate::core::{MatchState, PlayerId};
use crate::events::MatchEvent;

/// Where the match stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    Player0Turn,
    Player1Turn,
    GameOver,
}

/// Current phase of a match.
#[must_use]
pub fn phase(state: &MatchState) -> TurnPhase {
    if state.game_over {
        TurnPhase::GameOver
    } else if state.current_player == PlayerId::FIRST {
        TurnPhase::Player0Turn
    } else {
        TurnPhase::Player1Turn
    }
}

/// End the active player's turn and start the opponent's.
pub fn end_turn(state: &mut MatchState, events: &mut Vec<MatchEvent>) -> EngineResult<()> {
    if state.game_over {
        return Err(IllegalAction::GameOver.into());
    }
    let ending = state.current_player;
    let hero = state.player(ending).hero.name.clone();
    state.log(format!("{} ends the turn", hero));

    state.turn += 1;
    state.current_player = ending.opponent();
    refresh_units(state);
    begin_turn(state, events);
    Ok(())
}

/// Per-transition bookkeeping for both seats.
///
/// Clears `has_attacked`, counts one transition off every freeze and drops
/// temporary mana. Runs at most once per turn number: a second call in the
/// same transition changes nothing and returns `false`.
pub fn refresh_units(state: &mut MatchState) -> bool {
    if state.refreshed_for_turn() {
        return false;
    }
    for (_, player) in state.players.iter_mut() {
        for unit in player.field.iter_mut() {
            unit.has_attacked = false;
            unit.tick_freeze();
        }
        player.temporary_mana = 0;
    }
    state.mark_refreshed();
    true
}

/// Start the current player's turn: refill mana, reset the ability, draw.
pub fn begin_turn(state: &mut MatchState, events: &mut Vec<MatchEvent>) {
    let active = state.current_player;
    let turn = state.turn;
    let player = state.player_mut(active);
    player.mana = player.max_mana;
    player.max_mana = (player.max_mana + 1).min(MAX_MANA);
    player.mana = player.max_mana;
    player.hero.ability.used_this_turn = false;

    let hero = player.hero.name.clone();
    let mana = player.mana;
    state.log(format!("Turn {}: {}'s turn ({} mana)", turn, hero, mana));
    log::info!("turn {} begins for {}", turn, active);
    events.push(MatchEvent::TurnStarted {
        player: active,
        turn,
    });
    state.draw_card(active, events);
}
