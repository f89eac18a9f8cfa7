//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place state changes. It receives user input,
//! host permission results and web responses, mutates [`AppState`], and returns
//! whether to re-render plus the [`Action`]s the runtime should execute.
//!
//! # Event Types
//!
//! - **Lifecycle**: `Mount`, `Unmount`
//! - **Input**: `Char`, `Backspace`, `SubmitSearch`, `DismissNotice`, `CloseFocus`
//! - **Host**: `LocationPermission`, `WebResponse`, `RequestFailed`
//!
//! # Example
//!
//! ```rust
//! use cinemapa::app::{handle_event, Action, AppState, Event};
//! use cinemapa::client::Endpoints;
//! use cinemapa::ui::Theme;
//!
//! let mut state = AppState::new(Endpoints::default(), Theme::default());
//! let (_, actions) = handle_event(&mut state, &Event::Mount)?;
//! assert_eq!(actions[0], Action::RequestLocationPermission);
//! # Ok::<(), cinemapa::CinemapaError>(())
//! ```

use crate::app::modes::Lifecycle;
use crate::app::{Action, AppState};
use crate::client::{geolocation, movies, open_data, RequestKind};
use crate::domain::{CinemapaError, Notice, Result};

/// Events triggered by user input or by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The screen was shown. Fires the startup lookups once.
    Mount,

    /// The screen is going away. Later responses are dropped.
    Unmount,

    /// Appends a character to the search text.
    Char(char),

    /// Removes the last character of the search text.
    Backspace,

    /// The search button was pressed.
    SubmitSearch,

    /// Acknowledges the notice currently shown.
    DismissNotice,

    /// Hides the plugin pane.
    CloseFocus,

    /// The host answered the location permission prompt.
    LocationPermission {
        /// Whether access was granted.
        granted: bool,
    },

    /// The host delivered a response to an earlier request.
    WebResponse {
        kind: RequestKind,
        status: u16,
        body: Vec<u8>,
    },

    /// The host could not execute an earlier request at all.
    RequestFailed {
        kind: RequestKind,
        reason: String,
    },
}

/// Processes an event, mutates state, and returns `(should_render, actions)`.
///
/// Every failure is turned into a notice here; no error escapes the startup
/// or search flows. The `Result` is kept for symmetry with the runtime's
/// error logging.
///
/// # Errors
///
/// Currently never returns an error.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = %event_name(event)).entered();

    if !state.is_mounted() && *event != Event::Mount {
        tracing::debug!("ignoring event while unmounted");
        return Ok((false, vec![]));
    }

    match event {
        Event::Mount => {
            if state.is_mounted() {
                tracing::debug!("already mounted");
                return Ok((false, vec![]));
            }
            state.lifecycle = Lifecycle::Mounted;
            tracing::info!("mounted; requesting location permission and points of interest");
            Ok((
                true,
                vec![
                    Action::RequestLocationPermission,
                    Action::SendRequest(open_data::points_of_interest_request(&state.endpoints)),
                ],
            ))
        }
        Event::Unmount => {
            state.lifecycle = Lifecycle::Unmounted;
            tracing::info!(search_generation = state.search_generation, "unmounted");
            Ok((false, vec![]))
        }
        Event::Char(c) => {
            if state.has_notice() {
                return Ok((false, vec![]));
            }
            state.search_query.push(*c);
            tracing::trace!(query = %state.search_query, "search text updated");
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.has_notice() || state.search_query.pop().is_none() {
                return Ok((false, vec![]));
            }
            Ok((true, vec![]))
        }
        Event::SubmitSearch => Ok(submit_search(state)),
        Event::DismissNotice => Ok((state.dismiss_notice(), vec![])),
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::LocationPermission { granted } => {
            if *granted {
                tracing::debug!("location permission granted");
                Ok((false, vec![Action::SendRequest(geolocation::position_request(&state.endpoints))]))
            } else {
                tracing::warn!("location permission denied");
                state.raise_notice(Notice::location_permission_denied());
                Ok((true, vec![]))
            }
        }
        Event::WebResponse { kind, status, body } => Ok(apply_response(state, *kind, *status, body)),
        Event::RequestFailed { kind, reason } => {
            tracing::error!(?kind, %reason, "request could not be sent");
            Ok(apply_outcome(state, *kind, Outcome::Failed(CinemapaError::Transport(reason.clone()))))
        }
    }
}

/// Validates the search text and issues a lookup under a fresh generation.
fn submit_search(state: &mut AppState) -> (bool, Vec<Action>) {
    if state.has_notice() {
        return (false, vec![]);
    }

    let title = state.search_query.trim();
    if title.is_empty() {
        let error = CinemapaError::Validation("blank movie title".to_string());
        tracing::debug!(error = %error, "search rejected");
        state.raise_notice(Notice::invalid_title());
        return (true, vec![]);
    }

    let title = title.to_string();
    let generation = state.next_search_generation();
    tracing::info!(%title, generation, "searching movie");
    (
        false,
        vec![Action::SendRequest(movies::search_request(&state.endpoints, &title, generation))],
    )
}

/// A decoded response, not yet applied.
enum Outcome {
    Position(crate::domain::DevicePosition),
    Points(crate::domain::PointOfInterestBatch),
    Movie(crate::domain::MovieRecord),
    Failed(CinemapaError),
}

fn apply_response(state: &mut AppState, kind: RequestKind, status: u16, body: &[u8]) -> (bool, Vec<Action>) {
    tracing::debug!(?kind, status, body_len = body.len(), "web response");

    let outcome = match kind {
        RequestKind::Location => geolocation::parse_position(status, body).map(Outcome::Position),
        RequestKind::PointsOfInterest => open_data::parse_points_of_interest(status, body).map(Outcome::Points),
        RequestKind::Movie { .. } => movies::parse_movie(status, body).map(Outcome::Movie),
    };

    apply_outcome(state, kind, outcome.unwrap_or_else(Outcome::Failed))
}

/// Writes a decoded outcome into its own state slice, or raises its notice.
fn apply_outcome(state: &mut AppState, kind: RequestKind, outcome: Outcome) -> (bool, Vec<Action>) {
    if let RequestKind::Movie { generation } = kind {
        if !state.is_current_search(generation) {
            tracing::debug!(generation, latest = state.search_generation, "discarding stale search response");
            return (false, vec![]);
        }
    }

    match (kind, outcome) {
        (_, Outcome::Position(position)) => {
            if state.device_position.is_some() {
                tracing::debug!("position already known, ignoring second fix");
                return (false, vec![]);
            }
            tracing::info!(latitude = position.latitude, longitude = position.longitude, "device position read");
            state.device_position = Some(position);
        }
        (_, Outcome::Points(batch)) => {
            tracing::info!(count = batch.points.len(), skipped = batch.skipped, "points of interest loaded");
            state.points_of_interest = Some(batch);
        }
        (_, Outcome::Movie(record)) => {
            tracing::info!(title = %record.title, "movie found");
            state.movie = Some(record);
        }
        (RequestKind::Location, Outcome::Failed(error)) => {
            tracing::error!(error = %error, "position read failed");
            state.raise_notice(Notice::location_unavailable());
        }
        (RequestKind::PointsOfInterest, Outcome::Failed(error)) => {
            if error.is_transport() {
                tracing::error!(error = %error, "points of interest fetch failed");
            } else {
                tracing::warn!(error = %error, "points of interest rejected");
            }
            state.raise_notice(Notice::points_of_interest_failed(&error));
        }
        (RequestKind::Movie { .. }, Outcome::Failed(error)) => {
            if error.is_transport() {
                tracing::error!(error = %error, "movie search failed");
            } else {
                tracing::debug!(error = %error, "movie not found");
            }
            state.raise_notice(Notice::movie_search_failed(&error));
        }
    }

    (true, vec![])
}

fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Mount => "Mount",
        Event::Unmount => "Unmount",
        Event::Char(_) => "Char",
        Event::Backspace => "Backspace",
        Event::SubmitSearch => "SubmitSearch",
        Event::DismissNotice => "DismissNotice",
        Event::CloseFocus => "CloseFocus",
        Event::LocationPermission { .. } => "LocationPermission",
        Event::WebResponse { .. } => "WebResponse",
        Event::RequestFailed { .. } => "RequestFailed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Endpoints;
    use crate::ui::Theme;

    fn mounted() -> AppState {
        let mut state = AppState::new(Endpoints::default(), Theme::default());
        handle_event(&mut state, &Event::Mount).unwrap();
        state
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_event(state, &Event::Char(c)).unwrap();
        }
    }

    fn movie_body(title: &str) -> Vec<u8> {
        format!(
            r#"{{"Title":"{title}","Year":"1999","Genre":"Action","Director":"Lana Wachowski","Awards":"4 Oscars","Response":"True"}}"#
        )
        .into_bytes()
    }

    #[test]
    fn mount_fires_both_startup_lookups_once() {
        let mut state = AppState::new(Endpoints::default(), Theme::default());
        let (render, actions) = handle_event(&mut state, &Event::Mount).unwrap();
        assert!(render);
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0], Action::RequestLocationPermission);
        assert!(matches!(
            &actions[1],
            Action::SendRequest(r) if r.kind == RequestKind::PointsOfInterest
        ));

        let (_, again) = handle_event(&mut state, &Event::Mount).unwrap();
        assert!(again.is_empty());
    }

    #[test]
    fn events_before_mount_are_ignored() {
        let mut state = AppState::new(Endpoints::default(), Theme::default());
        let (render, actions) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.search_query.is_empty());
    }

    #[test]
    fn granted_permission_reads_position_once() {
        let mut state = mounted();
        let (_, actions) = handle_event(&mut state, &Event::LocationPermission { granted: true }).unwrap();
        assert!(matches!(&actions[..], [Action::SendRequest(r)] if r.kind == RequestKind::Location));

        let body = br#"{"status":"success","lat":-8.05,"lon":-34.9}"#.to_vec();
        handle_event(&mut state, &Event::WebResponse { kind: RequestKind::Location, status: 200, body }).unwrap();
        assert_eq!(state.device_position.map(|p| p.latitude), Some(-8.05));

        let body = br#"{"status":"success","lat":1.0,"lon":1.0}"#.to_vec();
        handle_event(&mut state, &Event::WebResponse { kind: RequestKind::Location, status: 200, body }).unwrap();
        assert_eq!(state.device_position.map(|p| p.latitude), Some(-8.05));
    }

    #[test]
    fn failed_position_read_raises_notice() {
        let mut state = mounted();
        let body = br#"{"status":"fail","message":"reserved range"}"#.to_vec();
        handle_event(&mut state, &Event::WebResponse { kind: RequestKind::Location, status: 200, body }).unwrap();
        assert!(state.device_position.is_none());
        assert_eq!(state.notices.front(), Some(&Notice::location_unavailable()));
    }

    #[test]
    fn typing_and_backspace_edit_query() {
        let mut state = mounted();
        type_text(&mut state, "Matrixx");
        let (render, _) = handle_event(&mut state, &Event::Backspace).unwrap();
        assert!(render);
        assert_eq!(state.search_query, "Matrix");

        state.search_query.clear();
        let (render, _) = handle_event(&mut state, &Event::Backspace).unwrap();
        assert!(!render);
    }

    #[test]
    fn submit_sends_trimmed_title_with_new_generation() {
        let mut state = mounted();
        type_text(&mut state, "  Cidade de Deus ");
        let (_, actions) = handle_event(&mut state, &Event::SubmitSearch).unwrap();
        let [Action::SendRequest(request)] = &actions[..] else {
            panic!("expected one request, got {actions:?}");
        };
        assert!(request.url.contains("t=Cidade%20de%20Deus&"));
        assert_eq!(request.kind, RequestKind::Movie { generation: 1 });
        assert_eq!(state.search_query, "  Cidade de Deus ");
    }

    #[test]
    fn input_is_blocked_while_a_notice_shows() {
        let mut state = mounted();
        handle_event(&mut state, &Event::SubmitSearch).unwrap();
        assert!(state.has_notice());

        handle_event(&mut state, &Event::Char('a')).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::SubmitSearch).unwrap();
        assert!(state.search_query.is_empty());
        assert!(actions.is_empty());
        assert_eq!(state.notices.len(), 1);

        let (render, _) = handle_event(&mut state, &Event::DismissNotice).unwrap();
        assert!(render);
        assert!(!state.has_notice());
    }

    #[test]
    fn stale_search_response_is_discarded() {
        let mut state = mounted();
        type_text(&mut state, "Matrix");
        handle_event(&mut state, &Event::SubmitSearch).unwrap();
        handle_event(&mut state, &Event::SubmitSearch).unwrap();
        assert_eq!(state.search_generation, 2);

        let latest = Event::WebResponse {
            kind: RequestKind::Movie { generation: 2 },
            status: 200,
            body: movie_body("The Matrix"),
        };
        let stale = Event::WebResponse {
            kind: RequestKind::Movie { generation: 1 },
            status: 200,
            body: movie_body("The Matrix Reloaded"),
        };

        handle_event(&mut state, &latest).unwrap();
        let (render, _) = handle_event(&mut state, &stale).unwrap();
        assert!(!render);
        assert_eq!(state.movie.as_ref().map(|m| m.title.as_str()), Some("The Matrix"));
    }

    #[test]
    fn stale_failure_raises_no_notice() {
        let mut state = mounted();
        type_text(&mut state, "Matrix");
        handle_event(&mut state, &Event::SubmitSearch).unwrap();
        handle_event(&mut state, &Event::SubmitSearch).unwrap();

        let stale = Event::RequestFailed {
            kind: RequestKind::Movie { generation: 1 },
            reason: "connection reset".to_string(),
        };
        handle_event(&mut state, &stale).unwrap();
        assert!(!state.has_notice());
    }

    #[test]
    fn request_failure_for_points_is_a_transport_notice() {
        let mut state = mounted();
        let event = Event::RequestFailed {
            kind: RequestKind::PointsOfInterest,
            reason: "web access denied".to_string(),
        };
        handle_event(&mut state, &event).unwrap();
        assert!(state.points_of_interest.is_none());
        assert_eq!(
            state.notices.front().map(|n| n.message.as_str()),
            Some("Houve um problema na busca dos dados.")
        );
    }

    #[test]
    fn responses_after_unmount_are_dropped() {
        let mut state = mounted();
        type_text(&mut state, "Matrix");
        handle_event(&mut state, &Event::SubmitSearch).unwrap();
        handle_event(&mut state, &Event::Unmount).unwrap();

        let response = Event::WebResponse {
            kind: RequestKind::Movie { generation: 1 },
            status: 200,
            body: movie_body("The Matrix"),
        };
        let (render, _) = handle_event(&mut state, &response).unwrap();
        assert!(!render);
        assert!(state.movie.is_none());
    }

    #[test]
    fn close_focus_emits_action() {
        let mut state = mounted();
        let (_, actions) = handle_event(&mut state, &Event::CloseFocus).unwrap();
        assert_eq!(actions, vec![Action::CloseFocus]);
    }
}
