//! Plain-text panel surface: prints a line whenever something visible changes.

use std::io::{self, Write};

use client_core::{
    ControlGating, LocalFoulCounts, MatchDisplay, Renderer, ScoreDisplay, TransportStatus,
};
use shared::domain::StationIdentity;

pub struct TerminalRenderer<W: Write> {
    out: W,
    station: StationIdentity,
    last_controls: Option<ControlGating>,
    last_fouls: Option<LocalFoulCounts>,
    last_score: Option<ScoreDisplay>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout(station: StationIdentity) -> Self {
        Self::new(io::stdout(), station)
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, station: StationIdentity) -> Self {
        Self {
            out,
            station,
            last_controls: None,
            last_fouls: None,
            last_score: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: String) {
        // stdout going away is not worth stopping the panel for
        let _ = writeln!(self.out, "[{}] {text}", self.station.title());
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

fn marks(flags: &[bool; 3]) -> String {
    flags
        .iter()
        .map(|flag| if *flag { "x" } else { "-" })
        .collect::<Vec<_>>()
        .join(" ")
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render_controls(&mut self, gating: &ControlGating) {
        if self.last_controls.as_ref() == Some(gating) {
            return;
        }
        self.last_controls = Some(*gating);
        let mode = match (gating.scoring_enabled, gating.scoring_auto) {
            (false, _) => "locked",
            (true, true) => "auto",
            (true, false) => "teleop",
        };
        self.line(format!(
            "controls: mode={mode} scoring={} teleop={} commit={} edit-auto={} ({})",
            on_off(gating.scoring_enabled),
            on_off(gating.teleop_enabled),
            on_off(gating.commit_enabled),
            on_off(gating.edit_auto_enabled),
            gating.edit_auto_label,
        ));
    }

    fn render_foul_counts(&mut self, counts: &LocalFoulCounts) {
        if self.last_fouls.as_ref() == Some(counts) {
            return;
        }
        self.last_fouls = Some(counts.clone());
        let tallies = counts
            .all()
            .iter()
            .map(|(key, count)| format!("{key}={count}"))
            .collect::<Vec<_>>()
            .join(" ");
        self.line(format!("fouls: {tallies}"));
    }

    fn render_match(&mut self, display: &MatchDisplay) {
        let [team1, team2, team3] = display.teams;
        self.line(format!(
            "match: {} teams {team1} {team2} {team3}",
            display.name
        ));
    }

    fn render_score(&mut self, display: &ScoreDisplay) {
        if self.last_score.as_ref() == Some(display) {
            return;
        }
        self.last_score = Some(display.clone());
        let counters = display
            .counters
            .iter()
            .map(|(counter, total)| format!("{}={total}", counter.id()))
            .collect::<Vec<_>>()
            .join(" ");
        self.line(format!(
            "score: leave=[{}] park=[{}] {counters}",
            marks(&display.leave),
            marks(&display.park),
        ));
    }

    fn render_connection(&mut self, status: TransportStatus) {
        let text = match status {
            TransportStatus::Connected => "link: connected",
            TransportStatus::Disconnected => "link: disconnected, retrying",
        };
        self.line(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use client_core::ClientScoringState;
    use shared::domain::{Alliance, FoulKey, FoulSeverity, Side};

    use super::*;

    fn output(renderer: TerminalRenderer<Vec<u8>>) -> String {
        String::from_utf8(renderer.into_inner()).expect("utf8")
    }

    #[test]
    fn prints_changes_once() {
        let station = StationIdentity::new(Alliance::Red, Side::Near);
        let mut renderer = TerminalRenderer::new(Vec::new(), station);
        let gating = ControlGating::from(&ClientScoringState::default());
        renderer.render_controls(&gating);
        renderer.render_controls(&gating);

        let mut counts = LocalFoulCounts::new();
        renderer.render_foul_counts(&counts);
        counts.increment(FoulKey::new(Alliance::Blue, FoulSeverity::Major));
        renderer.render_foul_counts(&counts);

        let out = output(renderer);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3, "{out}");
        assert_eq!(
            lines[0],
            "[Red Near] controls: mode=locked scoring=off teleop=off commit=off edit-auto=off (Edit Auto)"
        );
        assert!(lines[2].ends_with("red-minor=0 blue-minor=0 red-major=0 blue-major=1"));
    }

    #[test]
    fn prints_match_and_connection() {
        let station = StationIdentity::new(Alliance::Blue, Side::Far);
        let mut renderer = TerminalRenderer::new(Vec::new(), station);
        renderer.render_match(&MatchDisplay {
            name: "Qualification 3".to_string(),
            teams: [971, 118, 148],
        });
        renderer.render_connection(TransportStatus::Disconnected);

        let out = output(renderer);
        assert!(out.contains("[Blue Far] match: Qualification 3 teams 971 118 148"));
        assert!(out.contains("link: disconnected"));
    }
}
