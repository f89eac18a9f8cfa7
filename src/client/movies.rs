//! Movie metadata client (OMDb title lookup).

use super::{decode_body, with_query, Endpoints, RequestKind, WebRequest};
use crate::domain::{CinemapaError, MovieRecord, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Error", default)]
    error: Option<String>,
    #[serde(flatten)]
    record: MovieRecord,
}

/// Builds a title lookup tagged with its search generation.
///
/// `title` is sent as given; callers trim and validate it first.
#[must_use]
pub fn search_request(endpoints: &Endpoints, title: &str, generation: u64) -> WebRequest {
    WebRequest {
        url: with_query(
            &endpoints.movie_api_url,
            &[("t", title), ("apikey", endpoints.movie_api_key.as_str())],
        ),
        kind: RequestKind::Movie { generation },
    }
}

/// Decodes a title lookup response.
///
/// # Errors
///
/// - [`CinemapaError::NotFound`] for any envelope whose `Response` is not `"True"`
/// - [`CinemapaError::Transport`] or [`CinemapaError::Json`] when no envelope
///   could be decoded
pub fn parse_movie(status: u16, body: &[u8]) -> Result<MovieRecord> {
    let envelope: Envelope = decode_body(status, body)?;

    if envelope.response == "True" {
        Ok(envelope.record)
    } else {
        tracing::debug!(response = %envelope.response, error = ?envelope.error, "movie lookup unmatched");
        Err(CinemapaError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_encodes_title_and_key() {
        let request = search_request(&Endpoints::default(), "The Matrix", 3);
        assert_eq!(request.url, "https://www.omdbapi.com/?t=The%20Matrix&apikey=83a82fc6");
        assert_eq!(request.kind, RequestKind::Movie { generation: 3 });
    }

    #[test]
    fn found_envelope_yields_record() {
        let body = br#"{"Title":"Central do Brasil","Year":"1998","Genre":"Drama",
            "Director":"Walter Salles","Awards":"Nominated for 2 Oscars","Response":"True","Runtime":"110 min"}"#;
        let record = parse_movie(200, body).unwrap();
        assert_eq!(record.title, "Central do Brasil");
        assert_eq!(record.director, "Walter Salles");
    }

    #[test]
    fn any_other_response_value_is_not_found() {
        let body = br#"{"Response":"False","Error":"Movie not found!"}"#;
        assert!(matches!(parse_movie(200, body), Err(CinemapaError::NotFound)));

        let body = br#"{"Response":"False","Error":"Invalid API key!"}"#;
        assert!(matches!(parse_movie(401, body), Err(CinemapaError::NotFound)));

        assert!(matches!(parse_movie(200, br#"{}"#), Err(CinemapaError::NotFound)));
    }

    #[test]
    fn unreadable_body_is_transport() {
        let err = parse_movie(500, b"Internal Server Error").unwrap_err();
        assert!(err.is_transport());
    }
}
