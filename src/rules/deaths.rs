//! End-of-action cleanup: the death sweep and the win check.
//!
//! Damage never removes a unit mid-calculation. After an action resolves,
//! every unit at zero health or below leaves the field (active player's side
//! first, field index ascending) and its death effects resolve. Those effects
//! can kill more units, so the sweep repeats until the board is stable.

use crate::cards::{Card, CardRegistry, UnitCard};
use crate::core::error::EngineResult;
use crate::core::{MatchState, PlayerId};
use crate::effects::{EffectResolver, ResolverContext, Trigger};
use crate::events::MatchEvent;

/// Upper bound on sweep rounds per action.
pub const MAX_DEATH_ROUNDS: usize = 16;

fn remove_dead(state: &mut MatchState, owner: PlayerId) -> Vec<UnitCard> {
    let field = &mut state.player_mut(owner).field;
    let dead: Vec<usize> = field
        .iter()
        .enumerate()
        .filter(|(_, u)| u.is_dead())
        .map(|(i, _)| i)
        .collect();
    let mut removed: Vec<UnitCard> = dead.iter().rev().map(|&i| field.remove(i)).collect();
    removed.reverse();
    removed
}

/// Take every dead unit off both fields, active side first, and report it.
fn take_dead(state: &mut MatchState, events: &mut Vec<MatchEvent>) -> Vec<(PlayerId, UnitCard)> {
    let active = state.current_player;
    let mut dead: Vec<(PlayerId, UnitCard)> = Vec::new();
    for owner in [active, active.opponent()] {
        dead.extend(remove_dead(state, owner).into_iter().map(|u| (owner, u)));
    }
    for (owner, unit) in &dead {
        state.log(format!("{} dies", unit.name));
        events.push(MatchEvent::UnitDied {
            owner: *owner,
            card_id: unit.card_id,
        });
    }
    dead
}

/// Remove dead units and resolve their death effects until none remain.
///
/// After [`MAX_DEATH_ROUNDS`] the units still dead are removed without
/// resolving their effects, so no action ends with a dead unit on the field.
pub fn sweep_deaths(
    state: &mut MatchState,
    registry: &CardRegistry,
    events: &mut Vec<MatchEvent>,
) -> EngineResult<()> {
    for _ in 0..MAX_DEATH_ROUNDS {
        let dead = take_dead(state, events);
        if dead.is_empty() {
            return Ok(());
        }
        for (owner, unit) in dead {
            let ctx = ResolverContext::new(registry, owner, &unit.name);
            let effects = unit
                .effects
                .iter()
                .filter(|e| e.trigger == Trigger::OnDeath)
                .map(|e| &e.effect);
            EffectResolver::resolve_all(state, effects, &ctx, events)?;
            state.player_mut(owner).graveyard.push_back(Card::Unit(unit));
        }
    }
    log::warn!(
        "death sweep stopped after {} rounds on turn {}",
        MAX_DEATH_ROUNDS,
        state.turn
    );
    for (owner, unit) in take_dead(state, events) {
        state.player_mut(owner).graveyard.push_back(Card::Unit(unit));
    }
    Ok(())
}

/// Sweep deaths, then end the match if a hero has fallen.
pub fn finish_action(
    state: &mut MatchState,
    registry: &CardRegistry,
    events: &mut Vec<MatchEvent>,
) -> EngineResult<()> {
    sweep_deaths(state, registry, events)?;
    if let Some(result) = state.check_game_over() {
        events.push(MatchEvent::GameOver { result });
    }
    Ok(())
}
