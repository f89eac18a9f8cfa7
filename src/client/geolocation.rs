//! One-shot device position read.
//!
//! A terminal plugin has no satellite fix to ask for, so the position comes from
//! an IP geolocation lookup (`ip-api.com` response shape). It is read once after
//! the host grants web access and never refreshed.

use super::{decode_body, Endpoints, RequestKind, WebRequest};
use crate::domain::{CinemapaError, DevicePosition, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Lookup {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// Builds the position read.
#[must_use]
pub fn position_request(endpoints: &Endpoints) -> WebRequest {
    WebRequest {
        url: endpoints.geolocation_url.clone(),
        kind: RequestKind::Location,
    }
}

/// Decodes a position lookup.
///
/// # Errors
///
/// Returns [`CinemapaError::Transport`] when the lookup failed, lacks
/// coordinates, or reports coordinates outside valid degree ranges.
pub fn parse_position(status: u16, body: &[u8]) -> Result<DevicePosition> {
    let lookup: Lookup = decode_body(status, body)?;

    if lookup.status != "success" {
        return Err(CinemapaError::Transport(format!(
            "position lookup failed: {}",
            lookup.message.as_deref().unwrap_or("unknown reason")
        )));
    }

    match (lookup.lat, lookup.lon) {
        (Some(latitude), Some(longitude)) => DevicePosition::checked(latitude, longitude)
            .ok_or_else(|| CinemapaError::Transport(format!("invalid coordinates {latitude}, {longitude}"))),
        _ => Err(CinemapaError::Transport("position lookup without coordinates".to_string())),
    }
}
