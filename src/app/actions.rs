//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to the host. It returns a `Vec<Action>` after
//! each event and `main.rs` executes them in order: prompting for permission,
//! handing web requests to the host, or hiding the pane.
//!
//! # Example
//!
//! ```rust
//! use cinemapa::app::Action;
//! use cinemapa::client::{open_data, Endpoints};
//!
//! let actions = vec![
//!     Action::RequestLocationPermission,
//!     Action::SendRequest(open_data::points_of_interest_request(&Endpoints::default())),
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::client::WebRequest;

/// Commands the plugin runtime executes on behalf of the handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Asks the host for the access needed to read the device position.
    ///
    /// The host prompts at most once per session and answers with a
    /// permission result event.
    RequestLocationPermission,

    /// Hands a GET request to the host.
    ///
    /// The response comes back as a web response event tagged with the
    /// request's kind.
    SendRequest(WebRequest),
}
