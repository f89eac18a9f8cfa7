//! Lifecycle state of the application.
//!
//! The plugin starts `Unmounted`. The first `Mount` event fires the startup
//! lookups and moves to `Mounted`; later mounts are no-ops. Once `Unmounted`
//! again, late responses are dropped instead of touching state.

/// Mount state of the single screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    /// Not yet started, or torn down.
    #[default]
    Unmounted,

    /// Startup lookups have been issued; events are processed.
    Mounted,
}
