//! Request builders and response decoders for the three remote services.
//!
//! The plugin never performs I/O itself: the Zellij host executes web requests
//! and delivers the results back as events. This module describes each request
//! as a [`WebRequest`] (URL plus a [`RequestKind`] tag that travels in the host's
//! request context) and decodes each response body into domain types.
//!
//! # Modules
//!
//! - [`geolocation`]: One-shot device position read
//! - [`open_data`]: Municipal points of interest
//! - [`movies`]: Movie metadata lookup by title

pub mod geolocation;
pub mod movies;
pub mod open_data;

use crate::domain::{CinemapaError, Result};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

/// Context key holding the request kind.
const CONTEXT_KIND: &str = "cinemapa.request";

/// Context key holding the search generation of a movie lookup.
const CONTEXT_GENERATION: &str = "cinemapa.generation";

/// Base URLs and credentials for the remote services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub movie_api_url: String,
    pub movie_api_key: String,
    pub open_data_url: String,
    pub open_data_resource_id: String,
    pub geolocation_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            movie_api_url: "https://www.omdbapi.com/".to_string(),
            movie_api_key: "83a82fc6".to_string(),
            open_data_url: "http://dados.recife.pe.gov.br/api/3/action/datastore_search".to_string(),
            open_data_resource_id: "d85bf4e3-637e-4e1b-9b03-970dca4403c7".to_string(),
            geolocation_url: "http://ip-api.com/json".to_string(),
        }
    }
}

/// Identifies which lookup a web response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Device position read.
    Location,
    /// Open-data points of interest.
    PointsOfInterest,
    /// Movie search tagged with the generation it was issued under.
    Movie { generation: u64 },
}

impl RequestKind {
    /// Encodes the kind into a host request context.
    #[must_use]
    pub fn to_context(self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        let kind = match self {
            Self::Location => "location",
            Self::PointsOfInterest => "points_of_interest",
            Self::Movie { generation } => {
                context.insert(CONTEXT_GENERATION.to_string(), generation.to_string());
                "movie"
            }
        };
        context.insert(CONTEXT_KIND.to_string(), kind.to_string());
        context
    }

    /// Decodes the kind from a host request context.
    ///
    /// Returns `None` for contexts this plugin did not produce.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        match context.get(CONTEXT_KIND)?.as_str() {
            "location" => Some(Self::Location),
            "points_of_interest" => Some(Self::PointsOfInterest),
            "movie" => {
                let generation = context.get(CONTEXT_GENERATION)?.parse().ok()?;
                Some(Self::Movie { generation })
            }
            _ => None,
        }
    }
}

/// A GET request for the host to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebRequest {
    pub url: String,
    pub kind: RequestKind,
}

/// Appends percent-encoded query parameters to a base URL.
fn with_query(base: &str, params: &[(&str, &str)]) -> String {
    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&");
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}{query}")
}

/// Percent-encodes everything outside the RFC 3986 unreserved set.
fn encode_component(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(char::from(byte));
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}

/// Decodes a JSON body regardless of HTTP status.
///
/// The open-data and movie APIs both describe failures inside a JSON envelope,
/// so the body is tried first. A body that does not decode is a transport
/// failure when the status already says so, and a malformed response otherwise.
fn decode_body<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T> {
    match serde_json::from_slice(body) {
        Ok(value) => Ok(value),
        Err(e) if (200..300).contains(&status) => Err(CinemapaError::Json(e)),
        Err(_) => Err(CinemapaError::Transport(format!("HTTP {status}"))),
    }
}
