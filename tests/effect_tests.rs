//! Effect resolution through card play.

use duel_engine::cards::catalog::{self, starter_registry};
use duel_engine::cards::{Card, CardDefinition, CardId, CardRegistry};
use duel_engine::core::{Intent, MatchConfig, MatchState, PlayerId, TargetRef};
use duel_engine::effects::{CardEffect, Effect, EffectTarget};
use duel_engine::events::{FeedbackKind, MatchEvent};
use duel_engine::{Engine, RulesEngine};

const POWDER_KEG: CardId = CardId::new(400);
const WARCRY: CardId = CardId::new(401);

fn registry() -> CardRegistry {
    let mut registry = starter_registry();
    registry.register(
        CardDefinition::unit(POWDER_KEG, "Powder Keg", 1, 0, 1)
            .with_effect(CardEffect::on_death(Effect::damage(1, EffectTarget::AllUnits))),
    );
    registry.register(
        CardDefinition::unit(WARCRY, "Warcry Captain", 3, 2, 2)
            .with_effect(CardEffect::on_play(Effect::grant_taunt(EffectTarget::SelfUnit)))
            .with_effect(CardEffect::on_play(Effect::grant_divine_shield(EffectTarget::AllFriendlyUnits))),
    );
    registry
}

fn setup() -> (Engine, MatchState) {
    let engine = Engine::new(registry(), MatchConfig::default());
    let mut state = MatchState::new(engine.config());
    for player in PlayerId::both() {
        state.player_mut(player).mana = 10;
        state.player_mut(player).max_mana = 10;
    }
    (engine, state)
}

fn summon(engine: &Engine, state: &mut MatchState, owner: PlayerId, id: CardId) {
    let instance = state.alloc_instance();
    if let Card::Unit(unit) = engine.registry().lookup(id).unwrap().instantiate(instance) {
        state.player_mut(owner).field.push_back(unit);
    }
}

fn give(engine: &Engine, state: &mut MatchState, owner: PlayerId, id: CardId) {
    let instance = state.alloc_instance();
    let card = engine.registry().lookup(id).unwrap().instantiate(instance);
    state.player_mut(owner).hand.push_back(card);
}

fn stock_deck(engine: &Engine, state: &mut MatchState, owner: PlayerId, count: usize) {
    for _ in 0..count {
        let instance = state.alloc_instance();
        let card = engine.registry().lookup(catalog::SQUIRE).unwrap().instantiate(instance);
        state.player_mut(owner).deck.push_back(card);
    }
}

#[test]
fn test_blizzard_damages_and_freezes() {
    let (engine, mut state) = setup();
    give(&engine, &mut state, PlayerId::FIRST, catalog::BLIZZARD);
    summon(&engine, &mut state, PlayerId::SECOND, catalog::SQUIRE);
    summon(&engine, &mut state, PlayerId::SECOND, catalog::STONE_WARDEN);
    summon(&engine, &mut state, PlayerId::FIRST, catalog::SQUIRE);

    engine.apply_intent(&mut state, PlayerId::FIRST, &Intent::play(0)).unwrap();

    let them = state.player(PlayerId::SECOND);
    assert_eq!(them.hero.health, 28);
    assert_eq!(them.field.len(), 1);
    assert_eq!(them.field[0].card_id, catalog::STONE_WARDEN);
    assert_eq!(them.field[0].health, 3);
    assert!(them.field[0].frozen);
    // Own side untouched.
    assert_eq!(state.player(PlayerId::FIRST).field[0].health, 2);
    assert_eq!(state.player(PlayerId::FIRST).mana, 4);
}

#[test]
fn test_deathrattle_summons_for_owner() {
    let (engine, mut state) = setup();
    give(&engine, &mut state, PlayerId::FIRST, catalog::FIREBALL);
    summon(&engine, &mut state, PlayerId::SECOND, catalog::HATCHLING_NEST);

    let events = engine
        .apply_intent(
            &mut state,
            PlayerId::FIRST,
            &Intent::play_at(0, TargetRef::unit(PlayerId::SECOND, 0)),
        )
        .unwrap();

    let them = state.player(PlayerId::SECOND);
    assert_eq!(them.field.len(), 2);
    assert!(them.field.iter().all(|u| u.card_id == catalog::WHELP));
    assert_eq!(them.graveyard.len(), 1);
    let summons = events
        .iter()
        .filter(|e| matches!(e, MatchEvent::Feedback(f) if f.kind == FeedbackKind::Summon))
        .count();
    assert_eq!(summons, 2);
}

#[test]
fn test_summon_stops_at_full_field() {
    let (engine, mut state) = setup();
    give(&engine, &mut state, PlayerId::FIRST, catalog::SPARK);
    summon(&engine, &mut state, PlayerId::SECOND, catalog::SNIPER);
    for _ in 0..6 {
        summon(&engine, &mut state, PlayerId::SECOND, catalog::HATCHLING_NEST);
    }
    // Kill the sniper: six nests remain, none die, nothing is summoned.
    engine
        .apply_intent(
            &mut state,
            PlayerId::FIRST,
            &Intent::play_at(0, TargetRef::unit(PlayerId::SECOND, 0)),
        )
        .unwrap();
    assert_eq!(state.player(PlayerId::SECOND).field.len(), 6);

    // One nest dying into a field of six only has room for one whelp.
    give(&engine, &mut state, PlayerId::FIRST, catalog::FIREBALL);
    summon(&engine, &mut state, PlayerId::SECOND, catalog::SQUIRE);
    engine
        .apply_intent(
            &mut state,
            PlayerId::FIRST,
            &Intent::play_at(0, TargetRef::unit(PlayerId::SECOND, 0)),
        )
        .unwrap();
    assert_eq!(state.player(PlayerId::SECOND).field.len(), 7);
}

#[test]
fn test_scholar_draws_on_play() {
    let (engine, mut state) = setup();
    give(&engine, &mut state, PlayerId::FIRST, catalog::SCHOLAR);
    stock_deck(&engine, &mut state, PlayerId::FIRST, 2);

    engine.apply_intent(&mut state, PlayerId::FIRST, &Intent::play(0)).unwrap();

    let me = state.player(PlayerId::FIRST);
    assert_eq!(me.field.len(), 1);
    assert_eq!(me.hand.len(), 1);
    assert_eq!(me.deck.len(), 1);
}

#[test]
fn test_rallying_cry_buffs_friendly_units() {
    let (engine, mut state) = setup();
    give(&engine, &mut state, PlayerId::FIRST, catalog::RALLYING_CRY);
    summon(&engine, &mut state, PlayerId::FIRST, catalog::SQUIRE);
    summon(&engine, &mut state, PlayerId::FIRST, catalog::TUSKED_BRUTE);
    summon(&engine, &mut state, PlayerId::SECOND, catalog::SQUIRE);

    engine.apply_intent(&mut state, PlayerId::FIRST, &Intent::play(0)).unwrap();

    let field = &state.player(PlayerId::FIRST).field;
    assert_eq!((field[0].attack, field[0].health, field[0].max_health), (2, 3, 3));
    assert_eq!((field[1].attack, field[1].health), (6, 5));
    let enemy = &state.player(PlayerId::SECOND).field[0];
    assert_eq!((enemy.attack, enemy.health), (1, 2));
}

#[test]
fn test_mending_light_clamps_to_max_health() {
    let (engine, mut state) = setup();
    give(&engine, &mut state, PlayerId::FIRST, catalog::MENDING_LIGHT);
    state.player_mut(PlayerId::FIRST).hero.health = 25;

    let events = engine.apply_intent(&mut state, PlayerId::FIRST, &Intent::play(0)).unwrap();

    assert_eq!(state.player(PlayerId::FIRST).hero.health, 30);
    assert!(events.iter().any(|e| matches!(
        e,
        MatchEvent::Feedback(f) if f.kind == FeedbackKind::Heal && f.magnitude == 5
    )));
}

#[test]
fn test_mana_shard_is_temporary() {
    let (engine, mut state) = setup();
    give(&engine, &mut state, PlayerId::FIRST, catalog::MANA_SHARD);
    state.player_mut(PlayerId::FIRST).mana = 3;

    engine.apply_intent(&mut state, PlayerId::FIRST, &Intent::play(0)).unwrap();
    assert_eq!(state.player(PlayerId::FIRST).available_mana(), 4);

    engine.apply_intent(&mut state, PlayerId::FIRST, &Intent::EndTurn).unwrap();
    assert_eq!(state.player(PlayerId::FIRST).temporary_mana, 0);
}

#[test]
fn test_keyword_grants() {
    let (engine, mut state) = setup();
    summon(&engine, &mut state, PlayerId::FIRST, catalog::SQUIRE);
    give(&engine, &mut state, PlayerId::FIRST, WARCRY);

    engine.apply_intent(&mut state, PlayerId::FIRST, &Intent::play(0)).unwrap();

    let field = &state.player(PlayerId::FIRST).field;
    assert_eq!(field.len(), 2);
    assert!(!field[0].has_taunt);
    assert!(field[0].has_divine_shield);
    assert!(field[1].has_taunt);
    assert!(field[1].has_divine_shield);
}

/// A death effect that kills another unit keeps the sweep going until the
/// board is stable.
#[test]
fn test_death_cascade_resolves_to_stable_board() {
    let (engine, mut state) = setup();
    give(&engine, &mut state, PlayerId::FIRST, catalog::SPARK);
    summon(&engine, &mut state, PlayerId::SECOND, POWDER_KEG);
    summon(&engine, &mut state, PlayerId::SECOND, POWDER_KEG);
    summon(&engine, &mut state, PlayerId::FIRST, catalog::STONE_WARDEN);

    let events = engine
        .apply_intent(
            &mut state,
            PlayerId::FIRST,
            &Intent::play_at(0, TargetRef::unit(PlayerId::SECOND, 0)),
        )
        .unwrap();

    assert!(state.player(PlayerId::SECOND).field.is_empty());
    assert_eq!(state.player(PlayerId::SECOND).graveyard.len(), 2);
    // One point from each keg.
    assert_eq!(state.player(PlayerId::FIRST).field[0].health, 3);
    let deaths = events
        .iter()
        .filter(|e| matches!(e, MatchEvent::UnitDied { .. }))
        .count();
    assert_eq!(deaths, 2);
    assert!(state
        .players
        .iter()
        .all(|(_, p)| p.field.iter().all(|u| u.health > 0)));
}

#[test]
fn test_sniper_battlecry_hits_chosen_target() {
    let (engine, mut state) = setup();
    give(&engine, &mut state, PlayerId::FIRST, catalog::SNIPER);
    give(&engine, &mut state, PlayerId::FIRST, catalog::SNIPER);
    summon(&engine, &mut state, PlayerId::SECOND, catalog::WHELP);

    engine
        .apply_intent(
            &mut state,
            PlayerId::FIRST,
            &Intent::play_at(0, TargetRef::unit(PlayerId::SECOND, 0)),
        )
        .unwrap();
    assert!(state.player(PlayerId::SECOND).field.is_empty());

    // Without a target the battlecry is skipped but the unit still lands.
    engine.apply_intent(&mut state, PlayerId::FIRST, &Intent::play(0)).unwrap();
    assert_eq!(state.player(PlayerId::FIRST).field.len(), 2);
    assert_eq!(state.player(PlayerId::SECOND).hero.health, 30);
}

#[test]
fn test_ambush_set_then_sprung_by_unit_play() {
    let (engine, mut state) = setup();
    give(&engine, &mut state, PlayerId::FIRST, catalog::AMBUSH);
    give(&engine, &mut state, PlayerId::SECOND, catalog::TUSKED_BRUTE);

    let events = engine.apply_intent(&mut state, PlayerId::FIRST, &Intent::play(0)).unwrap();
    assert!(events.contains(&MatchEvent::SecretSet { player: PlayerId::FIRST }));
    assert_eq!(state.player(PlayerId::FIRST).secrets.len(), 1);

    engine.apply_intent(&mut state, PlayerId::FIRST, &Intent::EndTurn).unwrap();
    let events = engine.apply_intent(&mut state, PlayerId::SECOND, &Intent::play(0)).unwrap();

    assert!(events.iter().any(|e| matches!(
        e,
        MatchEvent::SecretRevealed { owner, card_id } if *owner == PlayerId::FIRST && *card_id == catalog::AMBUSH
    )));
    // Four damage kills the 5/4 as it lands.
    assert!(state.player(PlayerId::SECOND).field.is_empty());
    assert!(state.player(PlayerId::FIRST).secrets.is_empty());
}
