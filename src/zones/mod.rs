//! Zone system for card locations.
//!
//! Each player owns five zones: deck, hand, field, secrets and graveyard.
//! The transitions between them live here as methods on `PlayerState`.
//!
//! ## Key Types
//!
//! - `DrawOutcome`: what a draw did (drawn, burned, deck empty)

pub mod board;

pub use board::DrawOutcome;
