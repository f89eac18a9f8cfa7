//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the domain and client
//! layers. Data flows one way:
//!
//! ```text
//! Key / Host Event → Event → handle_event → State Mutation → Actions → Host Calls
//!                              ↑                                          ↓
//!                              └──────────── Web Responses ───────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side effect commands emitted by the handler
//! - [`handler`]: event processing and state transitions
//! - [`modes`]: mount lifecycle
//! - [`state`]: state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use cinemapa::app::{handle_event, AppState, Event};
//! use cinemapa::client::Endpoints;
//! use cinemapa::ui::Theme;
//!
//! let mut state = AppState::new(Endpoints::default(), Theme::default());
//! let (_, actions) = handle_event(&mut state, &Event::Mount)?;
//! assert_eq!(actions.len(), 2);
//! # Ok::<(), cinemapa::CinemapaError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::Lifecycle;
pub use state::AppState;
