//! Movie metadata returned by a successful title search.

use serde::{Deserialize, Serialize};

/// Flat record of one movie's metadata.
///
/// Field names follow the movie API's PascalCase keys so the record can be
/// decoded straight out of a response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MovieRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub awards: String,
}
