//! Match phase state machine.
//!
//! Every function here is a pure reducer: it takes the previous
//! [`ClientScoringState`] and an input, and returns the next state. Side effects
//! (clearing the local foul tallies, re-rendering) are left to the caller and
//! signalled through [`PhaseTransition::reset_counters`].

use shared::domain::MatchPhase;

use crate::error::GatingViolation;

/// Phase-derived gating flags for this station.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientScoringState {
    /// Any scoring control may be used.
    pub scoring_available: bool,
    /// The commit control may be used.
    pub commit_available: bool,
    /// Teleop-only controls may be used.
    pub in_teleop: bool,
    /// Operator switched back to scoring auto while the match is past auto.
    pub editing_auto: bool,
    /// Score has been submitted; editing stays locked until a reset.
    pub committed: bool,
}

impl ClientScoringState {
    /// State after a successful commit.
    pub const COMMITTED: Self = Self {
        scoring_available: false,
        commit_available: false,
        in_teleop: false,
        editing_auto: false,
        committed: true,
    };

    /// True when counter adjustments should land in the auto fields.
    pub fn scoring_for_auto(&self) -> bool {
        !self.in_teleop || self.editing_auto
    }

    pub fn can_edit_auto(&self) -> bool {
        self.in_teleop && self.scoring_available
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTransition {
    pub state: ClientScoringState,
    pub reset_counters: bool,
}

impl PhaseTransition {
    fn keep_counters(state: ClientScoringState) -> Self {
        Self {
            state,
            reset_counters: false,
        }
    }
}

pub fn on_phase_event(current: ClientScoringState, phase: MatchPhase) -> PhaseTransition {
    match phase {
        MatchPhase::AutoPeriod | MatchPhase::PausePeriod => {
            PhaseTransition::keep_counters(ClientScoringState {
                scoring_available: true,
                commit_available: false,
                in_teleop: false,
                editing_auto: false,
                committed: false,
            })
        }
        MatchPhase::TeleopPeriod => PhaseTransition::keep_counters(ClientScoringState {
            scoring_available: true,
            commit_available: false,
            in_teleop: true,
            editing_auto: current.editing_auto,
            committed: false,
        }),
        MatchPhase::PostMatch if current.committed => PhaseTransition::keep_counters(current),
        MatchPhase::PostMatch => PhaseTransition::keep_counters(ClientScoringState {
            scoring_available: true,
            commit_available: true,
            in_teleop: true,
            ..current
        }),
        MatchPhase::PreMatch
        | MatchPhase::StartMatch
        | MatchPhase::WarmupPeriod
        | MatchPhase::TimeoutActive
        | MatchPhase::PostTimeout
        | MatchPhase::Unknown(_) => PhaseTransition {
            state: ClientScoringState::default(),
            reset_counters: true,
        },
    }
}

/// Drops client-only state the server does not track. The phase flags are left
/// as they are; a fresh phase event re-derives them.
pub fn on_reset(current: ClientScoringState) -> PhaseTransition {
    PhaseTransition {
        state: ClientScoringState {
            committed: false,
            editing_auto: false,
            ..current
        },
        reset_counters: true,
    }
}

pub fn toggle_edit_auto(
    current: ClientScoringState,
) -> Result<ClientScoringState, GatingViolation> {
    if !current.can_edit_auto() {
        return Err(GatingViolation::EditAutoUnavailable);
    }
    Ok(ClientScoringState {
        editing_auto: !current.editing_auto,
        ..current
    })
}

#[cfg(test)]
#[path = "tests/phase_tests.rs"]
mod tests;
