//! Event contract between the engine and its observers.
//!
//! - `MatchEvent`: everything an intent caused, in order
//! - `Feedback`: typed visual feedback (kind, magnitude, board position)
//! - `Animation`: the one animation descriptor a push may carry

mod event;

pub use event::{Animation, Feedback, FeedbackKind, MatchEvent};
