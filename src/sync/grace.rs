//! Disconnect grace timer.
//!
//! Time is whatever the host says it is: every call takes `now` as a
//! `Duration` since some host-chosen epoch.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Countdown started when a player disconnects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraceTimer {
    player: PlayerId,
    started_at: Duration,
    period: Duration,
}

impl GraceTimer {
    #[must_use]
    pub fn new(player: PlayerId, now: Duration, period: Duration) -> Self {
        Self {
            player,
            started_at: now,
            period,
        }
    }

    /// The disconnected player.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    #[must_use]
    pub fn deadline(&self) -> Duration {
        self.started_at.saturating_add(self.period)
    }

    #[must_use]
    pub fn remaining(&self, now: Duration) -> Duration {
        self.deadline().saturating_sub(now)
    }

    #[must_use]
    pub fn expired(&self, now: Duration) -> bool {
        now >= self.deadline()
    }
}
