//! The scoring session: one owned object holding all panel state, driven by a
//! single queue of events.
//!
//! Inbound server messages, operator actions and transport status changes all
//! arrive on the same [`mpsc`] queue and are applied one at a time by
//! [`ScoringSession::run`]. Nothing else holds a reference to the state, so
//! there is no locking.

use std::ops::ControlFlow;

use shared::{
    domain::{MatchPhase, StationIdentity},
    protocol::ServerEvent,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    bootstrap,
    counters::LocalFoulCounts,
    dispatcher::{dispatch, DispatchOutcome, ScoringAction},
    phase::{on_phase_event, on_reset, ClientScoringState, PhaseTransition},
    render::{ControlGating, MatchDisplay, Renderer, ScoreDisplay},
    transport::Transport,
};

pub const SESSION_QUEUE_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportStatus {
    Connected,
    Disconnected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Server(ServerEvent),
    User(ScoringAction),
    Transport(TransportStatus),
    Shutdown,
}

pub fn session_queue() -> (mpsc::Sender<SessionEvent>, mpsc::Receiver<SessionEvent>) {
    mpsc::channel(SESSION_QUEUE_CAPACITY)
}

pub struct ScoringSession<T, R> {
    station: StationIdentity,
    state: ClientScoringState,
    fouls: LocalFoulCounts,
    last_phase: Option<MatchPhase>,
    transport: T,
    renderer: R,
}

impl<T: Transport, R: Renderer> ScoringSession<T, R> {
    /// Creates the session for `station` and renders the locked start-up state.
    pub fn new(station: StationIdentity, transport: T, renderer: R) -> Self {
        let mut session = Self {
            station,
            state: ClientScoringState::default(),
            fouls: LocalFoulCounts::new(),
            last_phase: None,
            transport,
            renderer,
        };
        session.apply_transition(bootstrap::initial_state());
        info!(station = %station, title = station.title(), "scoring: session started");
        session
    }

    pub fn station(&self) -> StationIdentity {
        self.station
    }

    pub fn state(&self) -> ClientScoringState {
        self.state
    }

    pub fn foul_counts(&self) -> &LocalFoulCounts {
        &self.fouls
    }

    pub fn last_phase(&self) -> Option<MatchPhase> {
        self.last_phase
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Drains `events` until the queue closes or a shutdown event arrives.
    pub async fn run(mut self, mut events: mpsc::Receiver<SessionEvent>) -> Self {
        while let Some(event) = events.recv().await {
            if self.handle_event(event).is_break() {
                break;
            }
        }
        info!(station = %self.station, "scoring: session stopped");
        self
    }

    pub fn handle_event(&mut self, event: SessionEvent) -> ControlFlow<()> {
        match event {
            SessionEvent::Server(event) => self.handle_server_event(event),
            SessionEvent::User(action) => {
                self.handle_action(action);
            }
            SessionEvent::Transport(status) => {
                debug!(?status, "scoring: transport status changed");
                self.renderer.render_connection(status);
            }
            SessionEvent::Shutdown => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    pub fn handle_server_event(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::MatchLoad(load) => {
                let match_display = MatchDisplay::for_alliance(&load, self.station.alliance);
                info!(
                    match_name = %match_display.name,
                    teams = ?match_display.teams,
                    "scoring: match loaded"
                );
                self.renderer.render_match(&match_display);
            }
            ServerEvent::MatchTime(match_time) => self.handle_phase(match_time.phase()),
            ServerEvent::RealtimeScore(realtime) => {
                let display = ScoreDisplay::for_alliance(&realtime, self.station.alliance);
                self.renderer.render_score(&display);
            }
            ServerEvent::ResetLocalState => self.reset_local_state(),
            ServerEvent::Error(message) => warn!("scoring: server reported error: {message}"),
        }
    }

    pub fn handle_phase(&mut self, phase: MatchPhase) {
        if self.last_phase != Some(phase) {
            info!(phase = %phase, "scoring: match phase changed");
        }
        self.last_phase = Some(phase);
        let transition = on_phase_event(self.state, phase);
        self.apply_transition(transition);
    }

    /// Drops committed/edit-auto state and the optimistic foul tallies, e.g.
    /// after the transport reconnects.
    pub fn reset_local_state(&mut self) {
        debug!("scoring: resetting local state");
        self.apply_transition(on_reset(self.state));
    }

    pub fn handle_action(&mut self, action: ScoringAction) -> DispatchOutcome {
        let outcome = dispatch(action, &mut self.state, &mut self.fouls, &mut self.transport);
        if let DispatchOutcome::Applied { sent, rerender } = outcome {
            if let Some(command) = sent {
                debug!(action = action.name(), command, "scoring: sent command");
            }
            if action == ScoringAction::Commit {
                info!(station = %self.station, "scoring: score committed");
            }
            if rerender {
                self.render_local_state();
            }
        }
        outcome
    }

    fn apply_transition(&mut self, transition: PhaseTransition) {
        self.state = transition.state;
        if transition.reset_counters {
            self.fouls.reset_all();
        }
        self.render_local_state();
    }

    fn render_local_state(&mut self) {
        self.renderer
            .render_controls(&ControlGating::from(&self.state));
        self.renderer.render_foul_counts(&self.fouls);
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
