//! Match synchronization.
//!
//! Everything between the pure engine and the transport:
//!
//! - `snapshot`: what each player is allowed to see
//! - `session`: the authoritative owner of a networked match
//! - `grace`: the disconnect countdown
//! - `lobby`: online players and pairing
//! - `local`: a human against the AI in one process

pub mod grace;
pub mod lobby;
pub mod local;
pub mod session;
pub mod snapshot;

pub use grace::GraceTimer;
pub use lobby::{ClientId, Lobby, LobbyError, LobbyEvent};
pub use local::{LocalMatch, LocalUpdate};
pub use session::{MatchSession, Outbound, SessionConfig, SessionMessage};
pub use snapshot::{OpponentView, OwnView, Snapshot, SnapshotError};
