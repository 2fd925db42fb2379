use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alliance {
    Red,
    Blue,
}

impl Alliance {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Blue => "blue",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "red" => Some(Self::Red),
            "blue" => Some(Self::Blue),
            _ => None,
        }
    }
}

impl fmt::Display for Alliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Near,
    Far,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Near => "near",
            Self::Far => "far",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "near" => Some(Self::Near),
            "far" => Some(Self::Far),
            _ => None,
        }
    }
}

/// Which alliance and which end of the field a scoring station covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StationIdentity {
    pub alliance: Alliance,
    pub side: Side,
}

impl StationIdentity {
    pub fn new(alliance: Alliance, side: Side) -> Self {
        Self { alliance, side }
    }

    /// Position token used in panel paths, e.g. `red_near`.
    pub fn position(&self) -> String {
        format!("{}_{}", self.alliance.as_str(), self.side.as_str())
    }

    /// Human readable station name, e.g. `Red Near`.
    pub fn title(&self) -> &'static str {
        match (self.alliance, self.side) {
            (Alliance::Red, Side::Near) => "Red Near",
            (Alliance::Red, Side::Far) => "Red Far",
            (Alliance::Blue, Side::Near) => "Blue Near",
            (Alliance::Blue, Side::Far) => "Blue Far",
        }
    }
}

impl fmt::Display for StationIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.alliance.as_str(), self.side.as_str())
    }
}

/// Server-side match clock state. The wire carries the index into this list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchPhase {
    PreMatch,
    StartMatch,
    WarmupPeriod,
    AutoPeriod,
    PausePeriod,
    TeleopPeriod,
    PostMatch,
    TimeoutActive,
    PostTimeout,
    Unknown(i64),
}

impl MatchPhase {
    const ORDERED: [MatchPhase; 9] = [
        MatchPhase::PreMatch,
        MatchPhase::StartMatch,
        MatchPhase::WarmupPeriod,
        MatchPhase::AutoPeriod,
        MatchPhase::PausePeriod,
        MatchPhase::TeleopPeriod,
        MatchPhase::PostMatch,
        MatchPhase::TimeoutActive,
        MatchPhase::PostTimeout,
    ];

    pub fn from_index(index: i64) -> Self {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ORDERED.get(i).copied())
            .unwrap_or(MatchPhase::Unknown(index))
    }

    pub fn index(self) -> i64 {
        match self {
            MatchPhase::Unknown(index) => index,
            known => Self::ORDERED
                .iter()
                .position(|phase| *phase == known)
                .map(|i| i as i64)
                .unwrap_or(-1),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MatchPhase::PreMatch => "PRE_MATCH",
            MatchPhase::StartMatch => "START_MATCH",
            MatchPhase::WarmupPeriod => "WARMUP_PERIOD",
            MatchPhase::AutoPeriod => "AUTO_PERIOD",
            MatchPhase::PausePeriod => "PAUSE_PERIOD",
            MatchPhase::TeleopPeriod => "TELEOP_PERIOD",
            MatchPhase::PostMatch => "POST_MATCH",
            MatchPhase::TimeoutActive => "TIMEOUT_ACTIVE",
            MatchPhase::PostTimeout => "POST_TIMEOUT",
            MatchPhase::Unknown(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for MatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoulSeverity {
    Minor,
    Major,
}

impl FoulSeverity {
    pub fn from_is_major(is_major: bool) -> Self {
        if is_major {
            Self::Major
        } else {
            Self::Minor
        }
    }

    pub fn is_major(self) -> bool {
        self == Self::Major
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minor => "minor",
            Self::Major => "major",
        }
    }
}

/// One of the four locally tracked foul tallies, e.g. `red-major`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FoulKey {
    pub alliance: Alliance,
    pub severity: FoulSeverity,
}

impl FoulKey {
    pub const ALL: [FoulKey; 4] = [
        FoulKey::new(Alliance::Red, FoulSeverity::Minor),
        FoulKey::new(Alliance::Blue, FoulSeverity::Minor),
        FoulKey::new(Alliance::Red, FoulSeverity::Major),
        FoulKey::new(Alliance::Blue, FoulSeverity::Major),
    ];

    pub const fn new(alliance: Alliance, severity: FoulSeverity) -> Self {
        Self { alliance, severity }
    }
}

impl fmt::Display for FoulKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.alliance.as_str(), self.severity.as_str())
    }
}

/// Robot slot within an alliance, 1 through 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TeamPosition(u8);

impl TeamPosition {
    pub const SLOTS: usize = 3;

    pub fn new(position: u8) -> Result<Self, ProtocolError> {
        if (1..=Self::SLOTS as u8).contains(&position) {
            Ok(Self(position))
        } else {
            Err(ProtocolError::InvalidTeamPosition(position))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for TeamPosition {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TeamPosition> for u8 {
    fn from(value: TeamPosition) -> Self {
        value.0
    }
}
