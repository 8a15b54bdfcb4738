//! Combat integration tests.
//!
//! Attacks go through the engine, so validation, secrets, the death sweep
//! and the win check all run exactly as they do in a match.

use duel_engine::cards::catalog::{self, starter_registry};
use duel_engine::cards::{Card, CardDefinition, CardId, CardRegistry};
use duel_engine::core::{IllegalAction, Intent, MatchConfig, MatchState, PlayerId, TargetRef};
use duel_engine::effects::{CardEffect, Effect, EffectTarget};
use duel_engine::events::MatchEvent;
use duel_engine::{EngineError, Engine, GameResult, RulesEngine};

const RAIDER: CardId = CardId::new(200);
const WARDEN: CardId = CardId::new(201);
const CATACLYSM: CardId = CardId::new(202);

fn registry() -> CardRegistry {
    let mut registry = starter_registry();
    registry.register(CardDefinition::unit(RAIDER, "Raider", 4, 5, 3));
    registry.register(CardDefinition::unit(WARDEN, "Warden", 4, 4, 5).with_divine_shield());
    registry.register(
        CardDefinition::spell(CATACLYSM, "Cataclysm", 0)
            .with_effect(CardEffect::on_play(Effect::damage(5, EffectTarget::FriendlyHero)))
            .with_effect(CardEffect::on_play(Effect::damage(5, EffectTarget::EnemyHero))),
    );
    registry
}

fn setup() -> (Engine, MatchState) {
    let engine = Engine::new(registry(), MatchConfig::default());
    let state = MatchState::new(engine.config());
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

/// 5/3 attacker into a 4/5 shielded defender: the shield pops, the
/// defender keeps 5 health, the attacker dies to the counterattack.
#[test]
fn test_attack_into_divine_shield() {
    let (engine, mut state) = setup();
    summon(&engine, &mut state, PlayerId::FIRST, RAIDER);
    summon(&engine, &mut state, PlayerId::SECOND, WARDEN);

    let events = engine
        .apply_intent(&mut state, PlayerId::FIRST, &Intent::attack_unit(0, 0))
        .unwrap();

    assert!(state.player(PlayerId::FIRST).field.is_empty());
    let defender = &state.player(PlayerId::SECOND).field[0];
    assert_eq!(defender.health, 5);
    assert!(!defender.has_divine_shield);
    assert!(events
        .iter()
        .any(|e| matches!(e, MatchEvent::UnitDied { owner, card_id } if *owner == PlayerId::FIRST && *card_id == RAIDER)));
    assert_eq!(state.player(PlayerId::FIRST).graveyard.len(), 1);
}

#[test]
fn test_divine_shield_absorbs_exactly_one_hit() {
    let (engine, mut state) = setup();
    summon(&engine, &mut state, PlayerId::FIRST, catalog::SQUIRE);
    summon(&engine, &mut state, PlayerId::FIRST, catalog::SQUIRE);
    summon(&engine, &mut state, PlayerId::SECOND, catalog::SHIELD_BEARER);

    engine
        .apply_intent(&mut state, PlayerId::FIRST, &Intent::attack_unit(0, 0))
        .unwrap();
    let bearer = &state.player(PlayerId::SECOND).field[0];
    assert_eq!(bearer.health, 3);
    assert!(!bearer.has_divine_shield);

    engine
        .apply_intent(&mut state, PlayerId::FIRST, &Intent::attack_unit(1, 0))
        .unwrap();
    assert_eq!(state.player(PlayerId::SECOND).field[0].health, 2);
}

#[test]
fn test_lethal_attack_ends_match_in_same_step() {
    let (engine, mut state) = setup();
    summon(&engine, &mut state, PlayerId::FIRST, catalog::STORM_HERALD);
    state.player_mut(PlayerId::SECOND).hero.health = 3;

    let events = engine
        .apply_intent(&mut state, PlayerId::FIRST, &Intent::attack_hero(0))
        .unwrap();

    assert!(state.game_over);
    assert_eq!(state.winner, Some(PlayerId::FIRST));
    assert_eq!(state.result, Some(GameResult::Winner(PlayerId::FIRST)));
    assert_eq!(
        events.last(),
        Some(&MatchEvent::GameOver {
            result: GameResult::Winner(PlayerId::FIRST)
        })
    );
    assert_eq!(
        engine.apply_intent(&mut state, PlayerId::SECOND, &Intent::EndTurn),
        Err(EngineError::Illegal(IllegalAction::GameOver))
    );
}

#[test]
fn test_double_lethal_is_draw() {
    let (engine, mut state) = setup();
    give(&engine, &mut state, PlayerId::FIRST, CATACLYSM);
    state.player_mut(PlayerId::FIRST).hero.health = 5;
    state.player_mut(PlayerId::SECOND).hero.health = 4;

    engine
        .apply_intent(&mut state, PlayerId::FIRST, &Intent::play(0))
        .unwrap();

    assert!(state.game_over);
    assert_eq!(state.result, Some(GameResult::Draw));
    assert_eq!(state.winner, None);
}

#[test]
fn test_taunt_rejection_leaves_state_unchanged() {
    let (engine, mut state) = setup();
    summon(&engine, &mut state, PlayerId::FIRST, catalog::TUSKED_BRUTE);
    summon(&engine, &mut state, PlayerId::SECOND, catalog::SQUIRE);
    summon(&engine, &mut state, PlayerId::SECOND, catalog::STONE_WARDEN);
    let before = state.clone();

    for intent in [Intent::attack_unit(0, 0), Intent::attack_hero(0)] {
        assert_eq!(
            engine.apply_intent(&mut state, PlayerId::FIRST, &intent),
            Err(EngineError::Illegal(IllegalAction::TauntViolation))
        );
        assert_eq!(state, before);
    }
    assert!(engine
        .apply_intent(&mut state, PlayerId::FIRST, &Intent::attack_unit(0, 1))
        .is_ok());
}

/// A 0/3 nest may still attack: it deals nothing and takes the counterattack.
#[test]
fn test_zero_attack_unit_can_trade() {
    let (engine, mut state) = setup();
    summon(&engine, &mut state, PlayerId::FIRST, catalog::HATCHLING_NEST);
    summon(&engine, &mut state, PlayerId::SECOND, catalog::WHELP);

    engine
        .apply_intent(&mut state, PlayerId::FIRST, &Intent::attack_unit(0, 0))
        .unwrap();

    let nest = &state.player(PlayerId::FIRST).field[0];
    assert_eq!(nest.health, 2);
    assert!(nest.has_attacked);
    assert_eq!(state.player(PlayerId::SECOND).field[0].health, 1);
}

#[test]
fn test_zero_attack_unit_dies_into_its_death_effect() {
    let (engine, mut state) = setup();
    summon(&engine, &mut state, PlayerId::FIRST, catalog::HATCHLING_NEST);
    summon(&engine, &mut state, PlayerId::SECOND, catalog::WHELP);
    state.player_mut(PlayerId::FIRST).field[0].health = 1;

    let events = engine
        .apply_intent(&mut state, PlayerId::FIRST, &Intent::attack_unit(0, 0))
        .unwrap();

    assert!(events.iter().any(|e| matches!(e, MatchEvent::UnitDied { card_id, .. } if *card_id == catalog::HATCHLING_NEST)));
    let field = &state.player(PlayerId::FIRST).field;
    assert_eq!(field.len(), 2);
    assert!(field.iter().all(|u| u.card_id == catalog::WHELP));
}

#[test]
fn test_unit_attacks_once_per_turn() {
    let (engine, mut state) = setup();
    summon(&engine, &mut state, PlayerId::FIRST, catalog::SQUIRE);

    engine
        .apply_intent(&mut state, PlayerId::FIRST, &Intent::attack_hero(0))
        .unwrap();
    assert_eq!(
        engine.apply_intent(&mut state, PlayerId::FIRST, &Intent::attack_hero(0)),
        Err(EngineError::Illegal(IllegalAction::AttackerExhausted { index: 0 }))
    );
}

#[test]
fn test_ice_trap_freezes_attackers() {
    let (engine, mut state) = setup();
    summon(&engine, &mut state, PlayerId::FIRST, catalog::SQUIRE);
    summon(&engine, &mut state, PlayerId::FIRST, catalog::SQUIRE);
    let instance = state.alloc_instance();
    if let Card::Secret(secret) = engine.registry().lookup(catalog::ICE_TRAP).unwrap().instantiate(instance) {
        state.player_mut(PlayerId::SECOND).secrets.push_back(secret);
    }

    let events = engine
        .apply_intent(&mut state, PlayerId::FIRST, &Intent::attack_hero(0))
        .unwrap();

    assert!(events
        .iter()
        .any(|e| matches!(e, MatchEvent::SecretRevealed { card_id, .. } if *card_id == catalog::ICE_TRAP)));
    let them = state.player(PlayerId::SECOND);
    assert!(them.secrets.is_empty());
    assert_eq!(them.graveyard.len(), 1);
    // The declared attack still lands.
    assert_eq!(them.hero.health, 29);
    assert!(state.player(PlayerId::FIRST).field.iter().all(|u| u.frozen));
    assert_eq!(
        engine.apply_intent(&mut state, PlayerId::FIRST, &Intent::attack_hero(1)),
        Err(EngineError::Illegal(IllegalAction::AttackerFrozen { index: 1 }))
    );
}

#[test]
fn test_on_attack_effect_resolves_before_exchange() {
    let (engine, mut state) = setup();
    summon(&engine, &mut state, PlayerId::FIRST, catalog::STORM_HERALD);
    summon(&engine, &mut state, PlayerId::SECOND, catalog::WHELP);
    summon(&engine, &mut state, PlayerId::SECOND, catalog::STONE_WARDEN);

    engine
        .apply_intent(&mut state, PlayerId::FIRST, &Intent::attack_unit(0, 1))
        .unwrap();

    // The whelp dies to the pulse; the warden takes 1 + 4.
    let field = &state.player(PlayerId::SECOND).field;
    assert_eq!(field.len(), 0);
    assert_eq!(state.player(PlayerId::FIRST).field[0].health, 1);
}

#[test]
fn test_attack_animation_pending_once() {
    let (engine, mut state) = setup();
    summon(&engine, &mut state, PlayerId::FIRST, catalog::SQUIRE);

    engine
        .apply_intent(&mut state, PlayerId::FIRST, &Intent::attack_hero(0))
        .unwrap();
    let animation = state.take_pending_animation();
    assert_eq!(
        animation,
        Some(duel_engine::Animation::Attack {
            attacker: TargetRef::unit(PlayerId::FIRST, 0),
            target: TargetRef::Hero(PlayerId::SECOND),
            is_hero_target: true,
        })
    );
    assert_eq!(state.take_pending_animation(), None);
}
