//! Client core for an alliance station scoring panel.
//!
//! The panel mirrors the arena's match clock, gates which scoring controls are
//! live for the current phase, keeps an optimistic tally of fouls it has called,
//! and sends scoring commands back to the arena over a named-message channel.

pub mod bootstrap;
pub mod counters;
pub mod dispatcher;
pub mod error;
pub mod phase;
pub mod render;
pub mod session;
pub mod transport;

pub use bootstrap::resolve_identity;
pub use counters::LocalFoulCounts;
pub use dispatcher::{CounterId, DispatchOutcome, ScoringAction};
pub use error::{GatingViolation, IdentityError, TransportError};
pub use phase::{ClientScoringState, PhaseTransition};
pub use render::{ControlGating, MatchDisplay, Renderer, ScoreDisplay};
pub use session::{session_queue, ScoringSession, SessionEvent, TransportStatus};
pub use transport::{
    finish_transport, station_websocket_url, Transport, WebSocketConfig, WebSocketTransport,
};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
