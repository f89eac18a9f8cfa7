//! Point-of-interest domain model.
//!
//! Points of interest come from one page of the municipal open-data API and are
//! kept together as a [`PointOfInterestBatch`]: the accepted records, the number
//! of records dropped because their coordinates did not parse, and the moment
//! the batch was accepted.

use serde::{Deserialize, Serialize};

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// One municipal record placed on the map.
///
/// `id` is unique within the batch it came from and keys the map marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// The full result of one successful open-data fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterestBatch {
    /// Records with valid coordinates, in response order.
    pub points: Vec<PointOfInterest>,

    /// Records dropped because a coordinate was missing or malformed.
    pub skipped: usize,

    /// Unix timestamp at which the batch was accepted.
    pub fetched_at: i64,
}

impl PointOfInterestBatch {
    /// Creates a batch stamped with the current time.
    #[must_use]
    pub fn new(points: Vec<PointOfInterest>, skipped: usize) -> Self {
        Self {
            points,
            skipped,
            fetched_at: chrono::Utc::now().timestamp(),
        }
    }

    /// Returns a short Portuguese description of the batch age.
    ///
    /// - Less than 1 minute: "agora"
    /// - Less than 1 hour: "há Xmin"
    /// - Less than 1 day: "há Xh"
    /// - Otherwise: "há Xd"
    ///
    /// # Examples
    ///
    /// ```
    /// use cinemapa::domain::PointOfInterestBatch;
    ///
    /// let mut batch = PointOfInterestBatch::new(vec![], 0);
    /// assert_eq!(batch.age(), "agora");
    ///
    /// batch.fetched_at -= 300;
    /// assert_eq!(batch.age(), "há 5min");
    /// ```
    #[must_use]
    pub fn age(&self) -> String {
        let diff = chrono::Utc::now().timestamp() - self.fetched_at;

        if diff < SECONDS_PER_MINUTE {
            "agora".to_string()
        } else if diff < SECONDS_PER_HOUR {
            format!("há {}min", diff / SECONDS_PER_MINUTE)
        } else if diff < SECONDS_PER_DAY {
            format!("há {}h", diff / SECONDS_PER_HOUR)
        } else {
            format!("há {}d", diff / SECONDS_PER_DAY)
        }
    }
}
