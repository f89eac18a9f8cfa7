//! Path helpers for the Zellij sandbox, where `~` is mounted at `/host`.

use std::path::PathBuf;

/// File name of the OTLP trace log inside [`get_data_dir`].
pub const TRACE_FILE_NAME: &str = "cinemapa-otlp.json";

/// Directory holding the plugin's trace log.
///
/// `/host` is the cwd of the last focused terminal, usually the home
/// directory, so this normally lands in `~/.local/share/zellij/cinemapa`.
///
/// ```
/// use cinemapa::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/cinemapa"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("cinemapa")
}

/// Full path of the trace log.
#[must_use]
pub fn trace_file() -> PathBuf {
    get_data_dir().join(TRACE_FILE_NAME)
}

/// Rewrites a leading `~` to the sandbox's `/host` mount.
///
/// ```
/// use cinemapa::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/noite.toml"), "/host/themes/noite.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
