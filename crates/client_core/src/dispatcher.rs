//! Turns operator actions into outbound arena commands.
//!
//! Every action is checked against the current [`ClientScoringState`] before
//! anything is sent. A refused action is dropped without a message; the panel
//! is expected to have disabled the matching control already, so refusals only
//! happen for stale or replayed input.

use shared::{
    domain::{Alliance, FoulKey, FoulSeverity, TeamPosition},
    protocol::ClientCommand,
};
use tracing::{debug, warn};

use crate::{
    counters::LocalFoulCounts,
    error::GatingViolation,
    phase::{toggle_edit_auto, ClientScoringState},
    transport::Transport,
};

/// Score counters on the panel, each backed by an auto and a teleop field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterId {
    Gamepiece1Level1,
    Gamepiece1Level2,
    Gamepiece2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterFields {
    /// `None` marks a counter that only exists during teleop.
    pub auto: Option<&'static str>,
    pub teleop: &'static str,
}

impl CounterId {
    pub const ALL: [CounterId; 3] = [
        CounterId::Gamepiece1Level1,
        CounterId::Gamepiece1Level2,
        CounterId::Gamepiece2,
    ];

    /// Control id used by the panel, e.g. `gp1_l1`.
    pub fn id(self) -> &'static str {
        match self {
            Self::Gamepiece1Level1 => "gp1_l1",
            Self::Gamepiece1Level2 => "gp1_l2",
            Self::Gamepiece2 => "gp2",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|counter| counter.id() == raw)
    }

    pub fn fields(self) -> CounterFields {
        match self {
            Self::Gamepiece1Level1 => CounterFields {
                auto: Some("AutoGamepiece1Level1Count"),
                teleop: "TeleopGamepiece1Level1Count",
            },
            Self::Gamepiece1Level2 => CounterFields {
                auto: Some("AutoGamepiece1Level2Count"),
                teleop: "TeleopGamepiece1Level2Count",
            },
            Self::Gamepiece2 => CounterFields {
                auto: Some("AutoGamepiece2Count"),
                teleop: "TeleopGamepiece2Count",
            },
        }
    }

    pub fn is_teleop_only(self) -> bool {
        self.fields().auto.is_none()
    }

    fn field_for(self, state: &ClientScoringState) -> &'static str {
        let fields = self.fields();
        match fields.auto {
            Some(auto) if state.scoring_for_auto() => auto,
            _ => fields.teleop,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringAction {
    AddFoul { alliance: Alliance, is_major: bool },
    UpdateCounter { counter: CounterId, adjustment: i32 },
    SetLeave(TeamPosition),
    SetPark(TeamPosition),
    ToggleEditAuto,
    Commit,
}

impl ScoringAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddFoul { .. } => "add_foul",
            Self::UpdateCounter { .. } => "update_counter",
            Self::SetLeave(_) => "set_leave",
            Self::SetPark(_) => "set_park",
            Self::ToggleEditAuto => "toggle_edit_auto",
            Self::Commit => "commit",
        }
    }
}

/// Effects of an accepted action, in the order they are applied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolved {
    pub foul: Option<FoulKey>,
    pub command: Option<ClientCommand>,
    pub next_state: Option<ClientScoringState>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Applied {
        sent: Option<&'static str>,
        rerender: bool,
    },
    Rejected(GatingViolation),
}

fn require_scoring(state: &ClientScoringState) -> Result<(), GatingViolation> {
    if state.scoring_available {
        Ok(())
    } else {
        Err(GatingViolation::ScoringUnavailable)
    }
}

pub fn resolve(
    action: &ScoringAction,
    state: &ClientScoringState,
) -> Result<Resolved, GatingViolation> {
    match *action {
        ScoringAction::AddFoul { alliance, is_major } => {
            require_scoring(state)?;
            let key = FoulKey::new(alliance, FoulSeverity::from_is_major(is_major));
            Ok(Resolved {
                foul: Some(key),
                command: Some(ClientCommand::AddFoul {
                    alliance: key.alliance,
                    is_major: key.severity.is_major(),
                }),
                next_state: None,
            })
        }
        ScoringAction::UpdateCounter {
            counter,
            adjustment,
        } => {
            require_scoring(state)?;
            if counter.is_teleop_only() && !state.in_teleop {
                return Err(GatingViolation::NotInTeleop);
            }
            Ok(Resolved {
                command: Some(ClientCommand::UpdateScore {
                    field: counter.field_for(state).to_string(),
                    adjustment,
                }),
                ..Resolved::default()
            })
        }
        ScoringAction::SetLeave(team_position) => {
            require_scoring(state)?;
            Ok(Resolved {
                command: Some(ClientCommand::Leave { team_position }),
                ..Resolved::default()
            })
        }
        ScoringAction::SetPark(team_position) => {
            require_scoring(state)?;
            Ok(Resolved {
                command: Some(ClientCommand::Park { team_position }),
                ..Resolved::default()
            })
        }
        ScoringAction::ToggleEditAuto => Ok(Resolved {
            next_state: Some(toggle_edit_auto(*state)?),
            ..Resolved::default()
        }),
        ScoringAction::Commit => {
            if !state.commit_available {
                return Err(GatingViolation::CommitUnavailable);
            }
            Ok(Resolved {
                command: Some(ClientCommand::CommitMatch),
                next_state: Some(ClientScoringState::COMMITTED),
                ..Resolved::default()
            })
        }
    }
}

/// Gates `action`, bumps the optimistic foul tally, forwards the command and
/// applies any state change. Send failures are logged and otherwise ignored:
/// there is no acknowledgement to wait for.
pub fn dispatch<T: Transport + ?Sized>(
    action: ScoringAction,
    state: &mut ClientScoringState,
    counts: &mut LocalFoulCounts,
    transport: &mut T,
) -> DispatchOutcome {
    let resolved = match resolve(&action, state) {
        Ok(resolved) => resolved,
        Err(violation) => {
            debug!(action = action.name(), %violation, "scoring: rejected gated action");
            return DispatchOutcome::Rejected(violation);
        }
    };

    if let Some(key) = resolved.foul {
        let count = counts.increment(key);
        debug!(foul = %key, count, "scoring: optimistic foul recorded");
    }

    let sent = resolved.command.as_ref().map(|command| {
        if let Err(err) = transport.send(command) {
            warn!(command = command.kind(), "scoring: failed to send command: {err}");
        }
        command.kind()
    });

    if let Some(next_state) = resolved.next_state {
        *state = next_state;
    }

    DispatchOutcome::Applied {
        sent,
        rerender: resolved.foul.is_some() || resolved.next_state.is_some(),
    }
}

#[cfg(test)]
#[path = "tests/dispatcher_tests.rs"]
mod tests;
