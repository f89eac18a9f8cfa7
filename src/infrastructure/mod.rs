//! Filesystem locations inside the Zellij plugin sandbox.
//!
//! The host filesystem is mounted under `/host`, so every user-facing path
//! goes through [`paths`] before the plugin touches it.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir, trace_file};
