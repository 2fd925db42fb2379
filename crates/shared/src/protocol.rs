use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    domain::{Alliance, MatchPhase, TeamPosition},
    error::ProtocolError,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MatchSummary {
    pub long_name: String,
    pub red1: i64,
    pub red2: i64,
    pub red3: i64,
    pub blue1: i64,
    pub blue2: i64,
    pub blue3: i64,
}

impl MatchSummary {
    pub fn teams(&self, alliance: Alliance) -> [i64; 3] {
        match alliance {
            Alliance::Red => [self.red1, self.red2, self.red3],
            Alliance::Blue => [self.blue1, self.blue2, self.blue3],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchLoad {
    #[serde(rename = "Match")]
    pub match_summary: MatchSummary,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MatchTime {
    pub match_state: i64,
    #[serde(default)]
    pub match_time_sec: i64,
}

impl MatchTime {
    pub fn phase(&self) -> MatchPhase {
        MatchPhase::from_index(self.match_state)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Score {
    pub leave_statuses: [bool; 3],
    pub park_statuses: [bool; 3],
    pub auto_gamepiece1_level1_count: i64,
    pub teleop_gamepiece1_level1_count: i64,
    pub auto_gamepiece1_level2_count: i64,
    pub teleop_gamepiece1_level2_count: i64,
    pub auto_gamepiece2_count: i64,
    pub teleop_gamepiece2_count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AllianceRealtimeScore {
    pub score: Score,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RealtimeScore {
    pub red: AllianceRealtimeScore,
    pub blue: AllianceRealtimeScore,
}

impl RealtimeScore {
    pub fn for_alliance(&self, alliance: Alliance) -> &Score {
        match alliance {
            Alliance::Red => &self.red.score,
            Alliance::Blue => &self.blue.score,
        }
    }
}

/// Messages pushed by the arena server to a scoring panel.
///
/// Frames are `{"type": <name>, "data": <payload>}` JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    MatchLoad(MatchLoad),
    MatchTime(MatchTime),
    RealtimeScore(RealtimeScore),
    ResetLocalState,
    Error(String),
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: serde_json::Value,
}

impl ServerEvent {
    /// Decodes one text frame. Message types this panel does not consume
    /// (display reloads, pings) decode to `Ok(None)`.
    pub fn decode(text: &str) -> Result<Option<Self>, ProtocolError> {
        let envelope: Envelope = serde_json::from_str(text).map_err(ProtocolError::Envelope)?;
        let event = match envelope.kind.as_str() {
            "matchLoad" => Self::MatchLoad(payload("matchLoad", envelope.data)?),
            "matchTime" => Self::MatchTime(payload("matchTime", envelope.data)?),
            "realtimeScore" => Self::RealtimeScore(payload("realtimeScore", envelope.data)?),
            "resetLocalState" => Self::ResetLocalState,
            "error" => Self::Error(match envelope.data {
                serde_json::Value::String(message) => message,
                other => other.to_string(),
            }),
            _ => return Ok(None),
        };
        Ok(Some(event))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::MatchLoad(_) => "matchLoad",
            Self::MatchTime(_) => "matchTime",
            Self::RealtimeScore(_) => "realtimeScore",
            Self::ResetLocalState => "resetLocalState",
            Self::Error(_) => "error",
        }
    }
}

fn payload<T: DeserializeOwned>(
    kind: &'static str,
    data: serde_json::Value,
) -> Result<T, ProtocolError> {
    serde_json::from_value(data).map_err(|source| ProtocolError::Payload { kind, source })
}

/// Messages a scoring panel sends to the arena server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ClientCommand {
    #[serde(rename_all = "PascalCase")]
    AddFoul { alliance: Alliance, is_major: bool },
    #[serde(rename_all = "PascalCase")]
    UpdateScore { field: String, adjustment: i32 },
    #[serde(rename_all = "PascalCase")]
    Leave { team_position: TeamPosition },
    #[serde(rename_all = "PascalCase")]
    Park { team_position: TeamPosition },
    CommitMatch,
}

impl ClientCommand {
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::AddFoul { .. } => "addFoul",
            Self::UpdateScore { .. } => "updateScore",
            Self::Leave { .. } => "leave",
            Self::Park { .. } => "park",
            Self::CommitMatch => "commitMatch",
        }
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
