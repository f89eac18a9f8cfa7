//! Cinemapa: a Zellij plugin that looks movies up by title and maps nearby
//! points of interest from Recife's open-data portal.
//!
//! One screen, four pieces of state:
//! - the search text and the last movie found (OMDb)
//! - the device position, read once after the location permission is granted
//! - a batch of up to five points of interest, fetched once at startup
//! - a queue of notices shown one at a time as a modal box

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← host events, permission gate
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← lifecycle, search generations
//! │  - Event handling                                   │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │
//! ┌───────────────┐   ┌─────────────────────────────────┐
//! │ UI Layer      │   │ Client Layer (client/)          │
//! │ (ui/)         │   │ - Request builders              │
//! │ - Map grid    │   │ - Response decoders             │
//! │ - Notices     │   │ - Request context tagging       │
//! └───────────────┘   └─────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Infrastructure, Observability              │
//! │  - Positions, regions, records, notices, errors     │
//! │  - Sandbox paths                                    │
//! │  - OpenTelemetry file export                        │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/cinemapa.wasm" {
//!         movie_api_key "83a82fc6"
//!         theme "cinemapa-light"
//!         trace_level "cinemapa=debug"
//!     }
//! }
//! ```
//!
//! # Startup
//!
//! 1. `main.rs` parses [`Config`], installs tracing and calls [`initialize`].
//! 2. The `Mount` event asks for web access and queues the point-of-interest
//!    fetch behind it.
//! 3. Once access is granted, the queued fetch goes out together with the
//!    position lookup. If it is denied, both fail with a notice and the map
//!    never appears.
//!
//! # Example
//!
//! ```rust
//! use cinemapa::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::Mount)?;
//! assert_eq!(actions[0], Action::RequestLocationPermission);
//! # Ok::<(), cinemapa::CinemapaError>(())
//! ```

pub mod app;
pub mod client;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, Lifecycle};
pub use client::{Endpoints, RequestKind, WebRequest};
pub use domain::{CinemapaError, Result};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Plugin configuration parsed from the KDL plugin block.
///
/// ```kdl
/// plugin location="file:/path/to/cinemapa.wasm" {
///     movie_api_url "https://www.omdbapi.com/"
///     movie_api_key "83a82fc6"
///     open_data_url "http://dados.recife.pe.gov.br/api/3/action/datastore_search"
///     open_data_resource_id "d85bf4e3-637e-4e1b-9b03-970dca4403c7"
///     geolocation_url "http://ip-api.com/json"
///     theme "cinemapa-dark"
///     theme_file "~/.config/zellij/cinemapa-theme.toml"
///     trace_level "info"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Remote service locations and the movie API key.
    pub endpoints: Endpoints,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme; a leading `~` means the host home.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`.
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            theme_name: None,
            theme_file: None,
            trace_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parses the host's configuration map. Missing or blank keys keep their
    /// defaults.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use cinemapa::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("movie_api_key".to_string(), "abc123".to_string());
    /// map.insert("trace_level".to_string(), " ".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.endpoints.movie_api_key, "abc123");
    /// assert_eq!(config.trace_level, "info");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        let defaults = Self::default();
        let endpoints = Endpoints {
            movie_api_url: get("movie_api_url").unwrap_or(defaults.endpoints.movie_api_url),
            movie_api_key: get("movie_api_key").unwrap_or(defaults.endpoints.movie_api_key),
            open_data_url: get("open_data_url").unwrap_or(defaults.endpoints.open_data_url),
            open_data_resource_id: get("open_data_resource_id")
                .unwrap_or(defaults.endpoints.open_data_resource_id),
            geolocation_url: get("geolocation_url").unwrap_or(defaults.endpoints.geolocation_url),
        };

        Self {
            endpoints,
            theme_name: get("theme"),
            theme_file: get("theme_file"),
            trace_level: get("trace_level").unwrap_or(defaults.trace_level),
        }
    }

    /// Checks that every endpoint is an absolute HTTP(S) URL.
    ///
    /// # Errors
    ///
    /// Returns [`CinemapaError::Config`] naming the first offending key.
    pub fn validate(&self) -> Result<()> {
        let urls = [
            ("movie_api_url", &self.endpoints.movie_api_url),
            ("open_data_url", &self.endpoints.open_data_url),
            ("geolocation_url", &self.endpoints.geolocation_url),
        ];

        for (key, url) in urls {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(CinemapaError::Config(format!("{key} is not an http(s) URL: {url}")));
            }
        }
        Ok(())
    }
}

/// Builds the initial, unmounted [`AppState`].
///
/// A theme that fails to load falls back to the default with a warning. An
/// invalid endpoint set falls back to the default endpoints the same way, so
/// a bad plugin block never stops the screen from opening.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing cinemapa plugin");

    let theme = load_theme(config);

    let endpoints = match config.validate() {
        Ok(()) => config.endpoints.clone(),
        Err(e) => {
            tracing::warn!(error = %e, "invalid endpoint configuration, using defaults");
            Endpoints::default()
        }
    };

    AppState::new(endpoints, theme)
}

fn load_theme(config: &Config) -> Theme {
    if let Some(theme_file) = &config.theme_file {
        let path = infrastructure::expand_tilde(theme_file);
        return Theme::from_file(&path).unwrap_or_else(|e| {
            tracing::warn!(theme_file = %path, error = %e, "failed to load theme from file, using default");
            Theme::default()
        });
    }

    config.theme_name.as_deref().map_or_else(Theme::default, |name| {
        Theme::from_name(name).unwrap_or_else(|| {
            tracing::warn!(theme_name = %name, "unknown theme, using default");
            Theme::default()
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn empty_map_yields_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn endpoint_keys_override_defaults() {
        let config = Config::from_zellij(&map(&[
            ("open_data_url", "https://example.org/api/3/action/datastore_search"),
            ("open_data_resource_id", "abc"),
            ("theme", "cinemapa-light"),
        ]));
        assert_eq!(config.endpoints.open_data_resource_id, "abc");
        assert_eq!(config.endpoints.movie_api_key, Endpoints::default().movie_api_key);
        assert_eq!(config.theme_name.as_deref(), Some("cinemapa-light"));
    }

    #[test]
    fn validate_rejects_non_http_urls() {
        let config = Config::from_zellij(&map(&[("geolocation_url", "ftp://ip-api.com/json")]));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("geolocation_url"));

        let state = initialize(&config);
        assert_eq!(state.endpoints, Endpoints::default());
    }

    #[test]
    fn initialize_starts_unmounted_with_chosen_theme() {
        let state = initialize(&Config::from_zellij(&map(&[("theme", "cinemapa-light")])));
        assert!(!state.is_mounted());
        assert_eq!(state.theme.name, "cinemapa-light");

        let state = initialize(&Config::from_zellij(&map(&[("theme", "no-such-theme")])));
        assert_eq!(state.theme.name, "cinemapa-dark");
    }

    #[test]
    fn theme_file_takes_precedence_over_name() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let custom = toml::to_string(&Theme::default()).unwrap().replace("cinemapa-dark", "noite");
        file.write_all(custom.as_bytes()).unwrap();

        let path = file.path().to_string_lossy().into_owned();
        let config = Config::from_zellij(&map(&[("theme", "cinemapa-light"), ("theme_file", path.as_str())]));
        assert_eq!(initialize(&config).theme.name, "noite");
    }
}
