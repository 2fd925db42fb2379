//! Station identity resolution at panel start-up.

use shared::domain::{Alliance, Side, StationIdentity};
use url::Url;

use crate::{
    error::IdentityError,
    phase::{on_reset, ClientScoringState, PhaseTransition},
};

/// Resolves the station from the launch location.
///
/// Accepts either a full panel url (`http://arena/panels/scoring/red_near`) or
/// a bare path or token (`red_near`). The trailing path segment must split on
/// `_` into exactly an alliance and a side.
pub fn resolve_identity(launch_context: &str) -> Result<StationIdentity, IdentityError> {
    let token = station_token(launch_context)
        .ok_or_else(|| IdentityError::MissingToken(launch_context.to_string()))?;

    let mut parts = token.split('_');
    let (Some(alliance), Some(side), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(IdentityError::Malformed(token.to_string()));
    };

    let alliance =
        Alliance::parse(alliance).ok_or_else(|| IdentityError::UnknownAlliance(alliance.into()))?;
    let side = Side::parse(side).ok_or_else(|| IdentityError::UnknownSide(side.into()))?;
    Ok(StationIdentity::new(alliance, side))
}

fn station_token(launch_context: &str) -> Option<String> {
    let launch_context = launch_context.trim();
    let last_segment = match Url::parse(launch_context) {
        Ok(url) if url.has_host() => url.path_segments()?.last()?.to_string(),
        _ => launch_context.rsplit('/').next()?.to_string(),
    };
    (!last_segment.is_empty()).then_some(last_segment)
}

/// Scoring state a freshly started panel begins from: everything locked until
/// the first phase event arrives.
pub fn initial_state() -> PhaseTransition {
    on_reset(ClientScoringState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_token_from_panel_url() {
        let station =
            resolve_identity("http://10.0.100.5:8080/panels/scoring/blue_far").expect("identity");
        assert_eq!(station, StationIdentity::new(Alliance::Blue, Side::Far));

        let station = resolve_identity("https://arena.local/panels/scoring/red_near?reload=1")
            .expect("identity");
        assert_eq!(station, StationIdentity::new(Alliance::Red, Side::Near));
    }

    #[test]
    fn resolves_bare_tokens_and_paths() {
        assert_eq!(
            resolve_identity("red_far").expect("identity"),
            StationIdentity::new(Alliance::Red, Side::Far)
        );
        assert_eq!(
            resolve_identity("/panels/scoring/blue_near").expect("identity"),
            StationIdentity::new(Alliance::Blue, Side::Near)
        );
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert_eq!(
            resolve_identity("http://arena/panels/scoring/"),
            Err(IdentityError::MissingToken(
                "http://arena/panels/scoring/".to_string()
            ))
        );
        assert_eq!(
            resolve_identity("red"),
            Err(IdentityError::Malformed("red".to_string()))
        );
        assert_eq!(
            resolve_identity("red_near_extra"),
            Err(IdentityError::Malformed("red_near_extra".to_string()))
        );
        assert_eq!(
            resolve_identity("green_near"),
            Err(IdentityError::UnknownAlliance("green".to_string()))
        );
        assert_eq!(
            resolve_identity("red_middle"),
            Err(IdentityError::UnknownSide("middle".to_string()))
        );
    }

    #[test]
    fn initial_state_is_fully_locked() {
        let initial = initial_state();
        assert_eq!(initial.state, ClientScoringState::default());
        assert!(initial.reset_counters);
    }
}
