//! Lobby: who is online, and who gets paired with whom.
//!
//! Queued clients are paired first come, first served. The first client in
//! a pairing takes the first seat.

use std::collections::VecDeque;
use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{PlayerId, PlayerMap};

/// A connected client, as the host identifies it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClientId(pub u64);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Client({})", self.0)
    }
}

/// Pairing notifications.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LobbyEvent {
    MatchFound {
        match_id: u64,
        seats: PlayerMap<ClientId>,
    },
    /// A queued client left before being paired.
    MatchCancelled { client: ClientId },
}

impl LobbyEvent {
    /// Seat of `client` in a found match.
    #[must_use]
    pub fn seat_of(&self, client: ClientId) -> Option<PlayerId> {
        match self {
            LobbyEvent::MatchFound { seats, .. } => seats.iter().find(|(_, c)| **c == client).map(|(p, _)| p),
            LobbyEvent::MatchCancelled { .. } => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LobbyError {
    #[error("{0} is not online")]
    NotOnline(ClientId),
    #[error("{0} is already queued")]
    AlreadyQueued(ClientId),
}

/// Online clients and the match queue.
#[derive(Clone, Debug, Default)]
pub struct Lobby {
    online: FxHashSet<ClientId>,
    queue: VecDeque<ClientId>,
    next_match: u64,
}

impl Lobby {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&mut self, client: ClientId) {
        self.online.insert(client);
    }

    /// Drop a client. Cancels its queue entry if it had one.
    pub fn disconnect(&mut self, client: ClientId) -> Vec<LobbyEvent> {
        self.online.remove(&client);
        self.leave_queue(client)
    }

    /// Online clients, in ascending order.
    #[must_use]
    pub fn request_online_players(&self) -> Vec<ClientId> {
        let mut clients: Vec<ClientId> = self.online.iter().copied().collect();
        clients.sort_unstable();
        clients
    }

    #[must_use]
    pub fn is_queued(&self, client: ClientId) -> bool {
        self.queue.contains(&client)
    }

    /// Queue a client and pair whoever can be paired.
    pub fn enqueue(&mut self, client: ClientId) -> Result<Vec<LobbyEvent>, LobbyError> {
        if !self.online.contains(&client) {
            return Err(LobbyError::NotOnline(client));
        }
        if self.is_queued(client) {
            return Err(LobbyError::AlreadyQueued(client));
        }
        self.queue.push_back(client);

        let mut events = Vec::new();
        while self.queue.len() >= 2 {
            let (Some(first), Some(second)) = (self.queue.pop_front(), self.queue.pop_front()) else {
                break;
            };
            let match_id = self.next_match;
            self.next_match += 1;
            log::info!("match {}: {} vs {}", match_id, first, second);
            events.push(LobbyEvent::MatchFound {
                match_id,
                seats: PlayerMap::from_pair(first, second),
            });
        }
        Ok(events)
    }

    /// Take a client out of the queue.
    pub fn leave_queue(&mut self, client: ClientId) -> Vec<LobbyEvent> {
        let before = self.queue.len();
        self.queue.retain(|c| *c != client);
        if self.queue.len() < before {
            vec![LobbyEvent::MatchCancelled { client }]
        } else {
            Vec::new()
        }
    }
}
