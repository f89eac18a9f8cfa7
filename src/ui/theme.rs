//! Theme management and ANSI escape sequence generation.
//!
//! Colors come either from a built-in theme compiled into the plugin or from a
//! user TOML file. All colors are hex strings turned into 24-bit ANSI escapes
//! at render time.
//!
//! # Built-in Themes
//!
//! - `cinemapa-dark`: near-black background with a purple accent (default)
//! - `cinemapa-light`: light variant with the same accent
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#ffffff"
//! header_bg = "#121212"          # optional
//! text_normal = "#ffffff"
//! text_dim = "#aaaaaa"
//! border = "#444444"
//! search_bar_border = "#444444"
//! input_bg = "#1e1e1e"           # optional
//! placeholder_fg = "#aaaaaa"
//! button_fg = "#ffffff"
//! button_bg = "#993399"
//! heading_fg = "#993399"
//! map_background_fg = "#444444"
//! marker_fg = "#f9e2af"
//! device_marker_fg = "#89b4fa"
//! movie_title_fg = "#ffffff"
//! notice_border = "#993399"
//! notice_title_fg = "#f38ba8"
//! ```
//!
//! # Example
//!
//! ```rust
//! use cinemapa::ui::Theme;
//!
//! let theme = Theme::from_name("cinemapa-dark").unwrap();
//! println!("{}Busca{}", Theme::fg(&theme.colors.header_fg), Theme::reset());
//! ```

use crate::domain::{CinemapaError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "cinemapa-dark";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Header text color.
    pub header_fg: String,
    /// Optional header background color.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Normal text color.
    pub text_normal: String,
    /// Dimmed text color (footer, legend, caption).
    pub text_dim: String,

    /// Border and separator line color.
    pub border: String,

    /// Search box frame color.
    pub search_bar_border: String,
    /// Optional search box fill.
    #[serde(default)]
    pub input_bg: Option<String>,
    /// Hint text shown in an empty search box.
    pub placeholder_fg: String,

    pub button_fg: String,
    pub button_bg: String,

    /// Section headings ("Sua Localização").
    pub heading_fg: String,

    /// Empty map cells.
    pub map_background_fg: String,
    /// Point-of-interest markers.
    pub marker_fg: String,
    /// The device marker.
    pub device_marker_fg: String,

    pub movie_title_fg: String,

    /// Frame of the notice box.
    pub notice_border: String,
    /// Title line of the notice box.
    pub notice_title_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name, or `None` if the name is unknown.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "cinemapa-dark" => include_str!("../../themes/cinemapa-dark.toml"),
            "cinemapa-light" => include_str!("../../themes/cinemapa-light.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`CinemapaError::Theme`] if the file cannot be read or does not
    /// parse as a theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| CinemapaError::Theme(format!("failed to read theme file: {e}")))?;

        toml::from_str(&contents).map_err(|e| CinemapaError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Converts a hex color to an RGB tuple, falling back to white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// ANSI 24-bit foreground escape for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the `cinemapa-dark` theme.
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse, which the tests rule out.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).expect("built-in cinemapa-dark theme should always parse")
    }
}
