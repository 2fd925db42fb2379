use shared::protocol::ClientCommand;

use crate::{
    counters::LocalFoulCounts,
    error::TransportError,
    render::{ControlGating, MatchDisplay, Renderer, ScoreDisplay},
    session::TransportStatus,
    transport::Transport,
};

#[derive(Default)]
pub(crate) struct RecordingTransport {
    pub(crate) sent: Vec<ClientCommand>,
    pub(crate) fail_sends: bool,
}

impl RecordingTransport {
    pub(crate) fn failing() -> Self {
        Self {
            sent: Vec::new(),
            fail_sends: true,
        }
    }
}

impl Transport for RecordingTransport {
    fn send(&mut self, command: &ClientCommand) -> Result<(), TransportError> {
        if self.fail_sends {
            return Err(TransportError::Closed);
        }
        self.sent.push(command.clone());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Rendered {
    Controls(ControlGating),
    Fouls(LocalFoulCounts),
    Match(MatchDisplay),
    Score(ScoreDisplay),
    Connection(TransportStatus),
}

#[derive(Default)]
pub(crate) struct RecordingRenderer {
    pub(crate) frames: Vec<Rendered>,
}

impl RecordingRenderer {
    pub(crate) fn last_controls(&self) -> Option<ControlGating> {
        self.frames.iter().rev().find_map(|frame| match frame {
            Rendered::Controls(gating) => Some(*gating),
            _ => None,
        })
    }

    pub(crate) fn last_fouls(&self) -> Option<&LocalFoulCounts> {
        self.frames.iter().rev().find_map(|frame| match frame {
            Rendered::Fouls(counts) => Some(counts),
            _ => None,
        })
    }
}

impl Renderer for RecordingRenderer {
    fn render_controls(&mut self, gating: &ControlGating) {
        self.frames.push(Rendered::Controls(*gating));
    }

    fn render_foul_counts(&mut self, counts: &LocalFoulCounts) {
        self.frames.push(Rendered::Fouls(counts.clone()));
    }

    fn render_match(&mut self, display: &MatchDisplay) {
        self.frames.push(Rendered::Match(display.clone()));
    }

    fn render_score(&mut self, display: &ScoreDisplay) {
        self.frames.push(Rendered::Score(display.clone()));
    }

    fn render_connection(&mut self, status: TransportStatus) {
        self.frames.push(Rendered::Connection(status));
    }
}
