//! Zellij plugin wrapper and entry point.
//!
//! A thin layer between the host and the library: it translates host events
//! into [`Event`]s, runs [`handle_event`], and turns the returned [`Action`]s
//! into host calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: parse config, install tracing, build `AppState`, subscribe
//! 2. **Mount**: dispatched right after load; asks for web access and queues
//!    the point-of-interest fetch
//! 3. **Permission result**: releases or fails the queued requests, then
//!    reports the answer to the handler
//! 4. **Update**: keys and web responses flow through the handler
//! 5. **BeforeClose**: dispatches `Unmount`
//!
//! # Web Access Gate
//!
//! The host rejects web requests until `WebAccess` is granted, so requests
//! issued before the answer wait here. On denial every waiting request, and
//! any later one, is reported back as `RequestFailed`.
//!
//! # Keybindings
//!
//! - Printable keys: type into the search box
//! - `Backspace`: delete the last character
//! - `Enter`: search, or dismiss the notice when one is shown
//! - `Esc`: hide the pane, or dismiss the notice when one is shown

#![allow(clippy::multiple_crate_versions)]

use std::collections::{BTreeMap, VecDeque};
use zellij_tile::prelude::*;

use cinemapa::{handle_event, Action, CinemapaError, Config, Event, RequestKind, WebRequest};

register_plugin!(State);

/// Where the host stands on `WebAccess`.
#[derive(Debug)]
enum WebAccess {
    /// Not answered yet; requests wait in order.
    Pending(Vec<WebRequest>),
    Granted,
    Denied,
}

struct State {
    app: cinemapa::AppState,
    web_access: WebAccess,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: cinemapa::initialize(&Config::default()),
            web_access: WebAccess::Pending(Vec::new()),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        cinemapa::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(endpoints = ?config.endpoints, "parsed configuration");
        self.app = cinemapa::initialize(&config);

        subscribe(&[
            EventType::Key,
            EventType::PermissionRequestResult,
            EventType::WebRequestResult,
            EventType::BeforeClose,
        ]);

        self.dispatch(Event::Mount);
        tracing::debug!("plugin load complete");
    }

    /// Translates a host event and runs it through the handler.
    ///
    /// Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", otel.name = %format!("plugin_update::{event_name}"), event_type = %event_name);
        let _guard = span.entered();

        match event {
            zellij_tile::prelude::Event::Key(ref key) => self.map_key_event(key).is_some_and(|e| self.dispatch(e)),
            zellij_tile::prelude::Event::PermissionRequestResult(status) => self.handle_permission_result(status),
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match RequestKind::from_context(&context) {
                    Some(kind) => self.dispatch(Event::WebResponse { kind, status, body }),
                    None => {
                        tracing::debug!(?context, "ignoring web response without a known request kind");
                        false
                    }
                }
            }
            zellij_tile::prelude::Event::BeforeClose => self.dispatch(Event::Unmount),
            _ => false,
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        cinemapa::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Runs `event` and every follow-up event its actions produce.
    fn dispatch(&mut self, event: Event) -> bool {
        let mut queue = VecDeque::from([event]);
        let mut should_render = false;

        while let Some(event) = queue.pop_front() {
            match handle_event(&mut self.app, &event) {
                Ok((render, actions)) => {
                    tracing::debug!(action_count = actions.len(), should_render = render, "event handled");
                    should_render |= render;
                    for action in actions {
                        queue.extend(self.execute_action(action));
                    }
                }
                Err(e) => tracing::error!(error = %e, "error handling event"),
            }
        }

        should_render
    }

    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::BeforeClose => "BeforeClose".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps a key press to an application event. A shown notice captures
    /// Enter and Esc.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) || key.has_modifiers(&[KeyModifier::Alt]) {
            return None;
        }

        let notice_shown = self.app.has_notice();
        Some(match key.bare_key {
            BareKey::Enter | BareKey::Esc if notice_shown => Event::DismissNotice,
            BareKey::Enter => Event::SubmitSearch,
            BareKey::Esc => Event::CloseFocus,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    /// Opens or closes the web access gate, then tells the handler.
    fn handle_permission_result(&mut self, status: PermissionStatus) -> bool {
        let granted = matches!(status, PermissionStatus::Granted);
        let gate = if granted { WebAccess::Granted } else { WebAccess::Denied };
        let waiting = match std::mem::replace(&mut self.web_access, gate) {
            WebAccess::Pending(waiting) => waiting,
            WebAccess::Granted | WebAccess::Denied => Vec::new(),
        };
        tracing::info!(granted, waiting = waiting.len(), "web access answered");

        let mut should_render = self.dispatch(Event::LocationPermission { granted });
        for request in waiting {
            if granted {
                Self::send(&request);
            } else {
                should_render |= self.dispatch(Self::refused(request.kind));
            }
        }
        should_render
    }

    fn refused(kind: RequestKind) -> Event {
        Event::RequestFailed {
            kind,
            reason: CinemapaError::PermissionDenied.to_string(),
        }
    }

    fn send(request: &WebRequest) {
        tracing::debug!(url = %request.url, kind = ?request.kind, "sending web request");
        web_request(
            &request.url,
            HttpVerb::Get,
            BTreeMap::new(),
            Vec::new(),
            request.kind.to_context(),
        );
    }

    /// Executes one action and returns any event it produces immediately.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: Action) -> Option<Event> {
        match action {
            Action::CloseFocus => {
                hide_self();
                None
            }
            Action::RequestLocationPermission => {
                request_permission(&[PermissionType::WebAccess]);
                None
            }
            Action::SendRequest(request) => match &mut self.web_access {
                WebAccess::Pending(waiting) => {
                    tracing::debug!(kind = ?request.kind, "queueing request until web access is answered");
                    waiting.push(request);
                    None
                }
                WebAccess::Granted => {
                    Self::send(&request);
                    None
                }
                WebAccess::Denied => Some(Self::refused(request.kind)),
            },
        }
    }
}
