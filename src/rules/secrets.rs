//! Secrets: hidden cards that resolve when the opponent acts.
//!
//! A secret sits in its owner's secret zone until the opponent does the thing
//! it waits for. It is then revealed, its on-play effects resolve with the
//! triggering character as the chosen target, and it goes to the graveyard.

use crate::cards::{Card, CardRegistry, SecretCard, SecretTrigger};
use crate::core::error::EngineResult;
use crate::core::{MatchState, PlayerId, TargetRef};
use crate::effects::{EffectResolver, ResolverContext, Trigger};
use crate::events::MatchEvent;

/// Reveal and resolve every secret `owner` holds for `trigger`.
pub fn fire_secrets(
    state: &mut MatchState,
    registry: &CardRegistry,
    owner: PlayerId,
    trigger: SecretTrigger,
    triggered_by: Option<TargetRef>,
    events: &mut Vec<MatchEvent>,
) -> EngineResult<()> {
    let fired: Vec<SecretCard> = state
        .player(owner)
        .secrets
        .iter()
        .filter(|s| s.trigger == trigger)
        .cloned()
        .collect();
    if fired.is_empty() {
        return Ok(());
    }
    state.player_mut(owner).secrets.retain(|s| s.trigger != trigger);

    for secret in fired {
        let hero = state.player(owner).hero.name.clone();
        state.log(format!("{}'s secret is revealed: {}", hero, secret.name));
        events.push(MatchEvent::SecretRevealed {
            owner,
            card_id: secret.card_id,
        });

        let ctx = ResolverContext::new(registry, owner, &secret.name).with_chosen(triggered_by);
        let effects = secret
            .effects
            .iter()
            .filter(|e| e.trigger == Trigger::OnPlay)
            .map(|e| &e.effect);
        EffectResolver::resolve_all(state, effects, &ctx, events)?;

        state.player_mut(owner).graveyard.push_back(Card::Secret(secret));
    }
    Ok(())
}
