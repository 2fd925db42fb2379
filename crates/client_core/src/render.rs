//! Presentation-facing views derived from session state, and the trait a
//! panel surface implements to show them.

use shared::{
    domain::Alliance,
    protocol::{MatchLoad, RealtimeScore, Score},
};

use crate::{
    counters::LocalFoulCounts, dispatcher::CounterId, phase::ClientScoringState,
    session::TransportStatus,
};

pub trait Renderer {
    fn render_controls(&mut self, gating: &ControlGating);
    fn render_foul_counts(&mut self, counts: &LocalFoulCounts);
    fn render_match(&mut self, display: &MatchDisplay);
    fn render_score(&mut self, display: &ScoreDisplay);
    fn render_connection(&mut self, _status: TransportStatus) {}
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render_controls(&mut self, gating: &ControlGating) {
        (**self).render_controls(gating)
    }

    fn render_foul_counts(&mut self, counts: &LocalFoulCounts) {
        (**self).render_foul_counts(counts)
    }

    fn render_match(&mut self, display: &MatchDisplay) {
        (**self).render_match(display)
    }

    fn render_score(&mut self, display: &ScoreDisplay) {
        (**self).render_score(display)
    }

    fn render_connection(&mut self, status: TransportStatus) {
        (**self).render_connection(status)
    }
}

/// Which controls are enabled and how the panel should be tinted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlGating {
    pub scoring_enabled: bool,
    pub teleop_enabled: bool,
    pub commit_enabled: bool,
    pub edit_auto_enabled: bool,
    /// Counter presses currently land in the auto fields.
    pub scoring_auto: bool,
    pub in_teleop_mode: bool,
    pub edit_auto_label: &'static str,
}

impl From<&ClientScoringState> for ControlGating {
    fn from(state: &ClientScoringState) -> Self {
        let teleop_enabled = state.in_teleop && state.scoring_available;
        Self {
            scoring_enabled: state.scoring_available,
            teleop_enabled,
            commit_enabled: state.commit_available,
            edit_auto_enabled: teleop_enabled,
            scoring_auto: state.scoring_for_auto() && state.scoring_available,
            in_teleop_mode: teleop_enabled,
            edit_auto_label: if state.editing_auto {
                "Save Auto"
            } else {
                "Edit Auto"
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchDisplay {
    pub name: String,
    pub teams: [i64; 3],
}

impl MatchDisplay {
    pub fn for_alliance(load: &MatchLoad, alliance: Alliance) -> Self {
        Self {
            name: load.match_summary.long_name.clone(),
            teams: load.match_summary.teams(alliance),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreDisplay {
    pub leave: [bool; 3],
    pub park: [bool; 3],
    /// Auto plus teleop total per counter.
    pub counters: [(CounterId, i64); 3],
}

impl ScoreDisplay {
    pub fn for_alliance(realtime: &RealtimeScore, alliance: Alliance) -> Self {
        let score = realtime.for_alliance(alliance);
        Self {
            leave: score.leave_statuses,
            park: score.park_statuses,
            counters: CounterId::ALL.map(|counter| (counter, counter_total(score, counter))),
        }
    }

    pub fn total(&self, counter: CounterId) -> i64 {
        self.counters
            .iter()
            .find(|(candidate, _)| *candidate == counter)
            .map(|(_, total)| *total)
            .unwrap_or_default()
    }
}

fn counter_total(score: &Score, counter: CounterId) -> i64 {
    let (auto, teleop) = match counter {
        CounterId::Gamepiece1Level1 => (
            score.auto_gamepiece1_level1_count,
            score.teleop_gamepiece1_level1_count,
        ),
        CounterId::Gamepiece1Level2 => (
            score.auto_gamepiece1_level2_count,
            score.teleop_gamepiece1_level2_count,
        ),
        CounterId::Gamepiece2 => (score.auto_gamepiece2_count, score.teleop_gamepiece2_count),
    };
    // counts come straight off the wire
    auto.saturating_add(teleop)
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
