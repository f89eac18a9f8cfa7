//! User interface rendering layer with component-based architecture.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready types computed from state
//! - [`renderer`]: top-level rendering entry point
//! - [`components`]: per-section renderers
//! - [`helpers`]: cursor positioning and width-aware text fitting
//! - [`theme`]: color schemes and ANSI escapes
//!
//! # Example
//!
//! ```rust
//! use cinemapa::app::AppState;
//! use cinemapa::client::Endpoints;
//! use cinemapa::ui::{render, Theme};
//!
//! let state = AppState::new(Endpoints::default(), Theme::default());
//! render(&state, 24, 80);
//! ```

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    FooterInfo, HeaderInfo, LocationBlock, MapMarker, MarkerKind, MovieBlock, NoticeBox, SearchBarInfo,
    UIViewModel,
};
