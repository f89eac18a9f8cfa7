//! Error types for the Cinemapa plugin.
//!
//! This module defines the centralized error type [`CinemapaError`] and a type alias
//! [`Result`] used throughout the plugin. Every failure a remote lookup can produce
//! is one of these variants; the event handler turns each into a user notice.

use thiserror::Error;

/// The main error type for Cinemapa operations.
///
/// Remote lookups (device position, points of interest, movie search) report
/// their failures through the first five variants. The remaining variants wrap
/// errors from external crates and local configuration problems.
///
/// # Examples
///
/// ```
/// use cinemapa::domain::CinemapaError;
///
/// let err = CinemapaError::Transport("HTTP 503".to_string());
/// assert!(err.is_transport());
/// assert!(!CinemapaError::NotFound.is_transport());
/// ```
#[derive(Debug, Error)]
pub enum CinemapaError {
    /// The host refused the permission needed to read the device position.
    #[error("Location permission denied")]
    PermissionDenied,

    /// The request never produced a usable response.
    ///
    /// Covers network failures reported by the host, non-success HTTP statuses
    /// without a parseable envelope, and lookups the remote service could not
    /// answer.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The open-data API answered with `success: false`.
    #[error("Open-data API rejected the request")]
    ApiRejected,

    /// The movie API answered with anything other than `Response: "True"`.
    #[error("Movie not found")]
    NotFound,

    /// User input failed validation before any request was issued.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A response body could not be decoded.
    #[error("Malformed response: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CinemapaError {
    /// Returns `true` for failures that happened below the API contract.
    ///
    /// Transport failures and undecodable bodies share the same user notice.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Json(_) | Self::Io(_))
    }
}

/// A specialized `Result` type for Cinemapa operations.
pub type Result<T> = std::result::Result<T, CinemapaError>;
