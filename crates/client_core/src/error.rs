use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("launch context `{0}` has no station token")]
    MissingToken(String),
    #[error("station token `{0}` must have the form <alliance>_<side>")]
    Malformed(String),
    #[error("unknown alliance `{0}` in station token")]
    UnknownAlliance(String),
    #[error("unknown side `{0}` in station token")]
    UnknownSide(String),
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("server_url must start with http://, https://, ws:// or wss://: {0}")]
    UnsupportedScheme(String),
    #[error("invalid server url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("failed to connect websocket {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: tokio_tungstenite::tungstenite::Error,
    },
    #[error("failed to encode outbound command: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("transport is closed")]
    Closed,
}

/// Why the dispatcher refused an action. Never surfaced to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GatingViolation {
    #[error("scoring is not available in the current phase")]
    ScoringUnavailable,
    #[error("teleop-only control used outside teleop")]
    NotInTeleop,
    #[error("commit is not available")]
    CommitUnavailable,
    #[error("auto editing requires teleop with scoring available")]
    EditAutoUnavailable,
}
