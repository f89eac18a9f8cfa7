//! Municipal open-data client (CKAN `datastore_search`).
//!
//! One page of [`PAGE_SIZE`] records is requested at startup. Records whose
//! coordinates do not parse into valid degrees are skipped and counted rather
//! than passed on to the map.

use super::{decode_body, with_query, Endpoints, RequestKind, WebRequest};
use crate::domain::location::is_valid_coordinate;
use crate::domain::{CinemapaError, PointOfInterest, PointOfInterestBatch, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;

/// Number of records requested from the open-data API.
pub const PAGE_SIZE: usize = 5;

#[derive(Debug, Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    result: Option<DatastoreResult>,
}

#[derive(Debug, Deserialize)]
struct DatastoreResult {
    #[serde(default)]
    records: Vec<RawRecord>,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "_id", default)]
    id: Value,
    #[serde(default)]
    nome: Option<String>,
    #[serde(default)]
    latitude: Value,
    #[serde(default)]
    longitude: Value,
}

/// Builds the single startup request for points of interest.
#[must_use]
pub fn points_of_interest_request(endpoints: &Endpoints) -> WebRequest {
    WebRequest {
        url: with_query(
            &endpoints.open_data_url,
            &[
                ("resource_id", endpoints.open_data_resource_id.as_str()),
                ("limit", PAGE_SIZE.to_string().as_str()),
            ],
        ),
        kind: RequestKind::PointsOfInterest,
    }
}

/// Decodes an open-data response into a batch.
///
/// # Errors
///
/// - [`CinemapaError::ApiRejected`] when the envelope reports `success: false`
/// - [`CinemapaError::Transport`] for failed requests or a successful envelope
///   without a result
/// - [`CinemapaError::Json`] for an undecodable body on a 2xx status
pub fn parse_points_of_interest(status: u16, body: &[u8]) -> Result<PointOfInterestBatch> {
    let envelope: Envelope = decode_body(status, body)?;

    if !envelope.success {
        return Err(CinemapaError::ApiRejected);
    }

    let records = envelope
        .result
        .ok_or_else(|| CinemapaError::Transport("response without result".to_string()))?
        .records;

    let total = records.len();
    let mut seen = HashSet::new();
    let points: Vec<PointOfInterest> = records
        .into_iter()
        .filter_map(|record| {
            let point = to_point(record)?;
            seen.insert(point.id.clone()).then_some(point)
        })
        .collect();

    let skipped = total - points.len();
    if skipped > 0 {
        tracing::warn!(skipped, total, "skipped open-data records with invalid id or coordinates");
    }

    Ok(PointOfInterestBatch::new(points, skipped))
}

fn to_point(record: RawRecord) -> Option<PointOfInterest> {
    let id = match record.id {
        Value::Number(n) => n.to_string(),
        Value::String(s) if !s.trim().is_empty() => s,
        _ => return None,
    };

    let latitude = parse_degrees(&record.latitude)?;
    let longitude = parse_degrees(&record.longitude)?;
    if !is_valid_coordinate(latitude, longitude) {
        return None;
    }

    let name = record
        .nome
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| id.clone());

    Some(PointOfInterest {
        id,
        name,
        latitude,
        longitude,
    })
}

fn parse_degrees(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_resource_and_fixed_limit() {
        let request = points_of_interest_request(&Endpoints::default());
        assert_eq!(request.kind, RequestKind::PointsOfInterest);
        assert_eq!(
            request.url,
            "http://dados.recife.pe.gov.br/api/3/action/datastore_search?resource_id=d85bf4e3-637e-4e1b-9b03-970dca4403c7&limit=5"
        );
    }

    #[test]
    fn numeric_ids_and_numeric_coordinates_are_accepted() {
        let body = br#"{"success": true, "result": {"records": [
            {"_id": 7, "nome": "Cinema Sao Luiz", "latitude": -8.0612, "longitude": -34.8811}
        ]}}"#;
        let batch = parse_points_of_interest(200, body).unwrap();
        assert_eq!(batch.points[0].id, "7");
        assert_eq!(batch.points[0].latitude, -8.0612);
    }

    #[test]
    fn malformed_coordinates_are_skipped_and_counted() {
        let body = br#"{"success": true, "result": {"records": [
            {"_id": 1, "nome": "A", "latitude": "-8.05", "longitude": "-34.90"},
            {"_id": 2, "nome": "B", "latitude": "", "longitude": "-34.90"},
            {"_id": 3, "nome": "C", "latitude": "-8,05", "longitude": "-34.90"},
            {"_id": 4, "nome": "D", "latitude": "NaN", "longitude": "-34.90"},
            {"_id": 5, "nome": "E", "latitude": null, "longitude": "-34.90"}
        ]}}"#;
        let batch = parse_points_of_interest(200, body).unwrap();
        assert_eq!(batch.points.len(), 1);
        assert_eq!(batch.skipped, 4);
    }

    #[test]
    fn duplicate_ids_keep_the_first_record() {
        let body = br#"{"success": true, "result": {"records": [
            {"_id": 1, "nome": "A", "latitude": "-8.05", "longitude": "-34.90"},
            {"_id": 1, "nome": "B", "latitude": "-8.06", "longitude": "-34.91"}
        ]}}"#;
        let batch = parse_points_of_interest(200, body).unwrap();
        assert_eq!(batch.points.len(), 1);
        assert_eq!(batch.points[0].name, "A");
        assert_eq!(batch.skipped, 1);
    }

    #[test]
    fn missing_name_falls_back_to_id() {
        let body = br#"{"success": true, "result": {"records": [
            {"_id": "abc", "latitude": "-8.05", "longitude": "-34.90"}
        ]}}"#;
        let batch = parse_points_of_interest(200, body).unwrap();
        assert_eq!(batch.points[0].name, "abc");
    }

    #[test]
    fn rejection_is_reported_even_on_error_status() {
        let body = br#"{"success": false, "error": {"message": "Not found"}}"#;
        assert!(matches!(parse_points_of_interest(404, body), Err(CinemapaError::ApiRejected)));
    }

    #[test]
    fn success_without_result_is_a_transport_failure() {
        let err = parse_points_of_interest(200, br#"{"success": true}"#).unwrap_err();
        assert!(err.is_transport());
    }
}
