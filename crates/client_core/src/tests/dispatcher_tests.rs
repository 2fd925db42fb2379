use shared::domain::MatchPhase;

use super::*;
use crate::{phase::on_phase_event, test_support::RecordingTransport};

fn state_for(phase: MatchPhase) -> ClientScoringState {
    on_phase_event(ClientScoringState::default(), phase).state
}

fn position(slot: u8) -> TeamPosition {
    TeamPosition::new(slot).expect("team position")
}

fn update_field(command: &ClientCommand) -> &str {
    match command {
        ClientCommand::UpdateScore { field, .. } => field,
        other => panic!("expected updateScore, got {other:?}"),
    }
}

#[test]
fn counter_ids_round_trip_through_panel_names() {
    for counter in CounterId::ALL {
        assert_eq!(CounterId::parse(counter.id()), Some(counter));
        assert!(!counter.is_teleop_only());
    }
    assert_eq!(CounterId::parse("gp3"), None);
}

#[test]
fn teleop_counter_press_targets_teleop_field() {
    let mut state = state_for(MatchPhase::TeleopPeriod);
    let mut counts = LocalFoulCounts::new();
    let mut transport = RecordingTransport::default();

    let outcome = dispatch(
        ScoringAction::UpdateCounter {
            counter: CounterId::Gamepiece2,
            adjustment: 1,
        },
        &mut state,
        &mut counts,
        &mut transport,
    );

    assert_eq!(
        outcome,
        DispatchOutcome::Applied {
            sent: Some("updateScore"),
            rerender: false,
        }
    );
    assert_eq!(
        transport.sent,
        vec![ClientCommand::UpdateScore {
            field: "TeleopGamepiece2Count".to_string(),
            adjustment: 1,
        }]
    );
}

#[test]
fn editing_auto_redirects_counter_to_auto_field() {
    let mut state = state_for(MatchPhase::TeleopPeriod);
    let mut counts = LocalFoulCounts::new();
    let mut transport = RecordingTransport::default();

    let outcome = dispatch(
        ScoringAction::ToggleEditAuto,
        &mut state,
        &mut counts,
        &mut transport,
    );
    assert_eq!(
        outcome,
        DispatchOutcome::Applied {
            sent: None,
            rerender: true,
        }
    );
    assert!(state.editing_auto);

    dispatch(
        ScoringAction::UpdateCounter {
            counter: CounterId::Gamepiece2,
            adjustment: 1,
        },
        &mut state,
        &mut counts,
        &mut transport,
    );
    assert_eq!(transport.sent.len(), 1);
    assert_eq!(update_field(&transport.sent[0]), "AutoGamepiece2Count");
}

#[test]
fn auto_period_resolves_every_counter_to_its_auto_field() {
    let state = state_for(MatchPhase::AutoPeriod);
    let fields: Vec<String> = CounterId::ALL
        .into_iter()
        .map(|counter| {
            let resolved = resolve(
                &ScoringAction::UpdateCounter {
                    counter,
                    adjustment: -1,
                },
                &state,
            )
            .expect("scoring available in auto");
            update_field(resolved.command.as_ref().expect("command")).to_string()
        })
        .collect();
    assert_eq!(
        fields,
        [
            "AutoGamepiece1Level1Count",
            "AutoGamepiece1Level2Count",
            "AutoGamepiece2Count"
        ]
    );
}

#[test]
fn post_match_counter_press_targets_teleop_field() {
    let state = state_for(MatchPhase::PostMatch);
    let resolved = resolve(
        &ScoringAction::UpdateCounter {
            counter: CounterId::Gamepiece1Level2,
            adjustment: 2,
        },
        &state,
    )
    .expect("scoring available post match");
    assert_eq!(
        resolved.command,
        Some(ClientCommand::UpdateScore {
            field: "TeleopGamepiece1Level2Count".to_string(),
            adjustment: 2,
        })
    );
}

#[test]
fn add_foul_increments_optimistically_and_sends() {
    let mut state = state_for(MatchPhase::AutoPeriod);
    let mut counts = LocalFoulCounts::new();
    let mut transport = RecordingTransport::default();
    let red_major = ScoringAction::AddFoul {
        alliance: Alliance::Red,
        is_major: true,
    };

    for _ in 0..2 {
        let outcome = dispatch(red_major, &mut state, &mut counts, &mut transport);
        assert_eq!(
            outcome,
            DispatchOutcome::Applied {
                sent: Some("addFoul"),
                rerender: true,
            }
        );
    }

    let red_major_key = FoulKey::new(Alliance::Red, FoulSeverity::Major);
    for (key, count) in counts.all() {
        let expected = if key == red_major_key { 2 } else { 0 };
        assert_eq!(count, expected, "{key}");
    }
    assert_eq!(
        transport.sent,
        vec![
            ClientCommand::AddFoul {
                alliance: Alliance::Red,
                is_major: true,
            };
            2
        ]
    );
}

#[test]
fn foul_is_counted_even_when_send_fails() {
    let mut state = state_for(MatchPhase::TeleopPeriod);
    let mut counts = LocalFoulCounts::new();
    let mut transport = RecordingTransport::failing();

    let outcome = dispatch(
        ScoringAction::AddFoul {
            alliance: Alliance::Blue,
            is_major: false,
        },
        &mut state,
        &mut counts,
        &mut transport,
    );

    assert!(matches!(outcome, DispatchOutcome::Applied { .. }));
    assert_eq!(
        counts.get(FoulKey::new(Alliance::Blue, FoulSeverity::Minor)),
        1
    );
    assert!(transport.sent.is_empty());
}

#[test]
fn scoring_actions_are_rejected_outside_scoring_phases() {
    let actions = [
        ScoringAction::AddFoul {
            alliance: Alliance::Blue,
            is_major: false,
        },
        ScoringAction::UpdateCounter {
            counter: CounterId::Gamepiece1Level1,
            adjustment: 1,
        },
        ScoringAction::SetLeave(position(1)),
        ScoringAction::SetPark(position(3)),
    ];

    for locked in [
        ClientScoringState::default(),
        ClientScoringState::COMMITTED,
    ] {
        for action in actions {
            let mut state = locked;
            let mut counts = LocalFoulCounts::new();
            let mut transport = RecordingTransport::default();
            let outcome = dispatch(action, &mut state, &mut counts, &mut transport);
            assert_eq!(
                outcome,
                DispatchOutcome::Rejected(GatingViolation::ScoringUnavailable),
                "{action:?}"
            );
            assert_eq!(state, locked);
            assert!(counts.is_zero());
            assert!(transport.sent.is_empty());
        }
    }
}

#[test]
fn leave_and_park_send_team_position() {
    let mut state = state_for(MatchPhase::AutoPeriod);
    let mut counts = LocalFoulCounts::new();
    let mut transport = RecordingTransport::default();

    dispatch(
        ScoringAction::SetLeave(position(2)),
        &mut state,
        &mut counts,
        &mut transport,
    );
    dispatch(
        ScoringAction::SetPark(position(3)),
        &mut state,
        &mut counts,
        &mut transport,
    );

    assert_eq!(
        transport.sent,
        vec![
            ClientCommand::Leave {
                team_position: position(2)
            },
            ClientCommand::Park {
                team_position: position(3)
            },
        ]
    );
}

#[test]
fn commit_is_only_effective_when_available() {
    for phase in [
        MatchPhase::PreMatch,
        MatchPhase::AutoPeriod,
        MatchPhase::TeleopPeriod,
    ] {
        let mut state = state_for(phase);
        let before = state;
        let mut counts = LocalFoulCounts::new();
        let mut transport = RecordingTransport::default();
        let outcome = dispatch(
            ScoringAction::Commit,
            &mut state,
            &mut counts,
            &mut transport,
        );
        assert_eq!(
            outcome,
            DispatchOutcome::Rejected(GatingViolation::CommitUnavailable),
            "{phase}"
        );
        assert_eq!(state, before);
        assert!(transport.sent.is_empty());
    }
}

#[test]
fn commit_sends_once_and_locks_station() {
    let mut state = state_for(MatchPhase::PostMatch);
    let mut counts = LocalFoulCounts::new();
    let mut transport = RecordingTransport::default();

    let outcome = dispatch(
        ScoringAction::Commit,
        &mut state,
        &mut counts,
        &mut transport,
    );
    assert_eq!(
        outcome,
        DispatchOutcome::Applied {
            sent: Some("commitMatch"),
            rerender: true,
        }
    );
    assert_eq!(state, ClientScoringState::COMMITTED);

    let again = dispatch(
        ScoringAction::Commit,
        &mut state,
        &mut counts,
        &mut transport,
    );
    assert_eq!(
        again,
        DispatchOutcome::Rejected(GatingViolation::CommitUnavailable)
    );
    assert_eq!(transport.sent, vec![ClientCommand::CommitMatch]);
}

#[test]
fn commit_locks_station_even_if_send_fails() {
    let mut state = state_for(MatchPhase::PostMatch);
    let mut counts = LocalFoulCounts::new();
    let mut transport = RecordingTransport::failing();

    dispatch(
        ScoringAction::Commit,
        &mut state,
        &mut counts,
        &mut transport,
    );
    assert_eq!(state, ClientScoringState::COMMITTED);
}

#[test]
fn edit_auto_toggle_is_rejected_outside_teleop() {
    let mut state = state_for(MatchPhase::AutoPeriod);
    let mut counts = LocalFoulCounts::new();
    let mut transport = RecordingTransport::default();
    let outcome = dispatch(
        ScoringAction::ToggleEditAuto,
        &mut state,
        &mut counts,
        &mut transport,
    );
    assert_eq!(
        outcome,
        DispatchOutcome::Rejected(GatingViolation::EditAutoUnavailable)
    );
    assert!(!state.editing_auto);
}
