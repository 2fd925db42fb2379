use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed message envelope: {0}")]
    Envelope(#[source] serde_json::Error),
    #[error("invalid payload for `{kind}`: {source}")]
    Payload {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("team position {0} is outside 1..=3")]
    InvalidTeamPosition(u8),
}
