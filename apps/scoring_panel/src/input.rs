//! Line-oriented operator input.

use client_core::{CounterId, ScoringAction};
use shared::domain::{Alliance, TeamPosition};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  foul <red|blue> <minor|major>     call a foul
  count <gp1_l1|gp1_l2|gp2> <+n|-n> adjust a game piece counter
  leave <1-3>                       toggle leave for a team slot
  park <1-3>                        toggle park for a team slot
  edit-auto                         switch auto editing on/off during teleop
  commit                            submit this station's score
  help                              show this list
  quit                              close the panel";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorInput {
    Action(ScoringAction),
    /// Input that maps to nothing on this panel, e.g. an unknown counter id.
    Ignored(String),
    Help,
    Quit,
    Empty,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown command `{0}` (try `help`)")]
    UnknownCommand(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("`{0}` is not a signed whole number")]
    InvalidAdjustment(String),
    #[error("team slot must be 1, 2 or 3, got `{0}`")]
    InvalidTeamPosition(String),
}

pub fn parse_line(line: &str) -> Result<OperatorInput, InputError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&command, args)) = words.split_first() else {
        return Ok(OperatorInput::Empty);
    };

    let action = match (command.to_ascii_lowercase().as_str(), args) {
        ("help" | "?", _) => return Ok(OperatorInput::Help),
        ("quit" | "exit", _) => return Ok(OperatorInput::Quit),
        ("foul", [alliance, severity]) => {
            let alliance = Alliance::parse(alliance)
                .ok_or(InputError::Usage("foul <red|blue> <minor|major>"))?;
            let is_major = match *severity {
                "major" => true,
                "minor" => false,
                _ => return Err(InputError::Usage("foul <red|blue> <minor|major>")),
            };
            ScoringAction::AddFoul { alliance, is_major }
        }
        ("foul", _) => return Err(InputError::Usage("foul <red|blue> <minor|major>")),
        ("count", [counter_id, adjustment]) => {
            let adjustment = adjustment
                .parse::<i32>()
                .map_err(|_| InputError::InvalidAdjustment(adjustment.to_string()))?;
            let Some(counter) = CounterId::parse(counter_id) else {
                return Ok(OperatorInput::Ignored(format!("unknown counter `{counter_id}`")));
            };
            ScoringAction::UpdateCounter {
                counter,
                adjustment,
            }
        }
        ("count", _) => return Err(InputError::Usage("count <gp1_l1|gp1_l2|gp2> <+n|-n>")),
        ("leave", [slot]) => ScoringAction::SetLeave(team_position(slot)?),
        ("leave", _) => return Err(InputError::Usage("leave <1-3>")),
        ("park", [slot]) => ScoringAction::SetPark(team_position(slot)?),
        ("park", _) => return Err(InputError::Usage("park <1-3>")),
        ("edit-auto", []) => ScoringAction::ToggleEditAuto,
        ("commit", []) => ScoringAction::Commit,
        _ => return Err(InputError::UnknownCommand(line.trim().to_string())),
    };
    Ok(OperatorInput::Action(action))
}

fn team_position(raw: &str) -> Result<TeamPosition, InputError> {
    raw.parse::<u8>()
        .ok()
        .and_then(|slot| TeamPosition::new(slot).ok())
        .ok_or_else(|| InputError::InvalidTeamPosition(raw.to_string()))
}

#[cfg(test)]
#[path = "tests/input_tests.rs"]
mod tests;
