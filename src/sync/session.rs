//! Authoritative match session.
//!
//! `MatchSession` owns the one live `MatchState` of a match and is its only
//! mutator. Intents are applied in the order they are submitted; intents
//! from the inactive player are rejected, never queued. Connection changes
//! arrive as signals from the host, with the host's clock.
//!
//! ## Disconnects
//!
//! - `on_disconnect`: start a grace timer, tell the opponent how long it runs
//! - `tick`: report the remaining time, or forfeit the match on expiry
//! - `on_reconnect`: cancel the timer and resend the full state
//!
//! Pushes to a disconnected player are dropped; the full snapshot on
//! reconnect covers whatever they missed.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::grace::GraceTimer;
use super::snapshot::Snapshot;
use crate::cards::CardId;
use crate::core::error::{EngineError, EngineResult, IllegalAction};
use crate::core::{Intent, MatchState, PlayerId, PlayerMap};
use crate::events::MatchEvent;
use crate::rules::{Engine, RulesEngine};

/// Session settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// How long a disconnected player has to come back (default: 60s).
    pub grace_period: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grace_period: Duration::from_secs(60),
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn with_grace_period(mut self, period: Duration) -> Self {
        self.grace_period = period;
        self
    }
}

/// A message for one client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionMessage {
    /// New state after an applied intent (or a resync).
    Update {
        snapshot: Snapshot,
        events: Vec<MatchEvent>,
    },
    /// The client's intent was refused. State is unchanged.
    Rejected {
        reason: IllegalAction,
        message: String,
    },
    /// The opponent is away; the match is forfeited if they are not back
    /// in `remaining`.
    OpponentDisconnected { remaining: Duration },
    OpponentReconnected,
}

/// A message addressed to a seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outbound {
    pub to: PlayerId,
    pub message: SessionMessage,
}

impl Outbound {
    fn new(to: PlayerId, message: SessionMessage) -> Self {
        Self { to, message }
    }
}

/// The authoritative owner of one match.
#[derive(Clone, Debug)]
pub struct MatchSession {
    engine: Engine,
    state: MatchState,
    config: SessionConfig,
    cursors: PlayerMap<usize>,
    connected: PlayerMap<bool>,
    timers: PlayerMap<Option<GraceTimer>>,
}

impl MatchSession {
    /// Wrap an existing match. Both players start connected.
    #[must_use]
    pub fn new(engine: Engine, state: MatchState, config: SessionConfig) -> Self {
        Self {
            engine,
            state,
            config,
            cursors: PlayerMap::with_value(0),
            connected: PlayerMap::with_value(true),
            timers: PlayerMap::with_value(None),
        }
    }

    /// Start a new match from two deck lists.
    pub fn start(engine: Engine, decks: &PlayerMap<Vec<CardId>>, config: SessionConfig) -> EngineResult<Self> {
        let state = engine.new_match(decks)?;
        Ok(Self::new(engine, state, config))
    }

    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    #[must_use]
    pub fn is_connected(&self, player: PlayerId) -> bool {
        self.connected[player]
    }

    /// Remaining grace time for a disconnected player.
    #[must_use]
    pub fn grace_remaining(&self, player: PlayerId, now: Duration) -> Option<Duration> {
        self.timers[player].map(|t| t.remaining(now))
    }

    /// Full snapshots for both seats, e.g. right after `start`.
    pub fn initial_snapshots(&mut self) -> Vec<Outbound> {
        PlayerId::both().map(|p| self.resync(p)).collect()
    }

    /// Apply an intent from `player`.
    ///
    /// Legal intents push an update to every connected seat. Illegal ones
    /// produce a single rejection for the actor. Internal inconsistencies
    /// are returned as errors; the state is left as it was.
    pub fn submit(&mut self, player: PlayerId, intent: &Intent) -> Result<Vec<Outbound>, EngineError> {
        match self.engine.apply_intent(&mut self.state, player, intent) {
            Ok(events) => Ok(self.push(&events)),
            Err(EngineError::Illegal(reason)) => {
                let message = reason.to_string();
                Ok(vec![Outbound::new(player, SessionMessage::Rejected { reason, message })])
            }
            Err(err) => {
                log::warn!("session refused {} from {}: {}", intent.label(), player, err);
                Err(err)
            }
        }
    }

    /// Transport lost `player`.
    pub fn on_disconnect(&mut self, player: PlayerId, now: Duration) -> Vec<Outbound> {
        if !self.connected[player] || self.state.game_over {
            return Vec::new();
        }
        self.connected[player] = false;
        let timer = GraceTimer::new(player, now, self.config.grace_period);
        self.timers[player] = Some(timer);
        log::info!("{} disconnected, grace until {:?}", player, timer.deadline());
        self.notify_opponent(player, SessionMessage::OpponentDisconnected {
            remaining: timer.remaining(now),
        })
    }

    /// Advance the host clock: forfeit expired timers, report the rest.
    pub fn tick(&mut self, now: Duration) -> Vec<Outbound> {
        let mut out = Vec::new();
        for player in PlayerId::both() {
            let Some(timer) = self.timers[player] else {
                continue;
            };
            if self.state.game_over {
                self.timers[player] = None;
            } else if timer.expired(now) {
                self.timers[player] = None;
                out.extend(self.forfeit(player));
            } else {
                out.extend(self.notify_opponent(player, SessionMessage::OpponentDisconnected {
                    remaining: timer.remaining(now),
                }));
            }
        }
        out
    }

    /// `player` is back. Returns their full snapshot, plus a note for the
    /// opponent. A reconnect at or after the deadline still loses.
    pub fn on_reconnect(&mut self, player: PlayerId, now: Duration) -> Vec<Outbound> {
        let mut out = Vec::new();
        if let Some(timer) = self.timers[player].take() {
            if timer.expired(now) && !self.state.game_over {
                out.extend(self.forfeit(player));
            }
        }
        let was_away = !self.connected[player];
        self.connected[player] = true;
        if was_away && !self.state.game_over {
            log::info!("{} reconnected", player);
            out.extend(self.notify_opponent(player, SessionMessage::OpponentReconnected));
        }
        out.push(self.resync(player));
        out
    }

    fn forfeit(&mut self, loser: PlayerId) -> Vec<Outbound> {
        log::info!("{} did not return in time", loser);
        match self.state.forfeit(loser) {
            Some(result) => self.push(&[MatchEvent::GameOver { result }]),
            None => Vec::new(),
        }
    }

    fn resync(&mut self, player: PlayerId) -> Outbound {
        let snapshot = Snapshot::full(&self.state, player);
        self.cursors[player] = snapshot.log_cursor;
        Outbound::new(player, SessionMessage::Update {
            snapshot,
            events: Vec::new(),
        })
    }

    fn notify_opponent(&self, player: PlayerId, message: SessionMessage) -> Vec<Outbound> {
        let other = player.opponent();
        if self.connected[other] {
            vec![Outbound::new(other, message)]
        } else {
            Vec::new()
        }
    }

    fn push(&mut self, events: &[MatchEvent]) -> Vec<Outbound> {
        let animation = self.state.take_pending_animation();
        let mut out = Vec::new();
        for player in PlayerId::both() {
            if !self.connected[player] {
                continue;
            }
            let snapshot = Snapshot::for_recipient(&self.state, player, self.cursors[player], animation.clone());
            self.cursors[player] = snapshot.log_cursor;
            out.push(Outbound::new(player, SessionMessage::Update {
                snapshot,
                events: events.to_vec(),
            }));
        }
        out
    }
}
