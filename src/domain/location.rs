//! Device position and map region types.
//!
//! A [`DevicePosition`] is the single geolocation fix read after the host grants
//! access. A [`MapRegion`] is the viewport the map block opens on: a centre
//! coordinate plus the latitude and longitude spans it covers.

use serde::{Deserialize, Serialize};

/// Latitude span of the initial map region, in degrees.
pub const DEFAULT_LATITUDE_DELTA: f64 = 0.0922;

/// Longitude span of the initial map region, in degrees.
pub const DEFAULT_LONGITUDE_DELTA: f64 = 0.0421;

/// One geolocation fix in floating-point degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DevicePosition {
    pub latitude: f64,
    pub longitude: f64,
}

impl DevicePosition {
    /// Builds a position, rejecting non-finite or out-of-range degrees.
    ///
    /// # Examples
    ///
    /// ```
    /// use cinemapa::domain::DevicePosition;
    ///
    /// assert!(DevicePosition::checked(-8.05, -34.88).is_some());
    /// assert!(DevicePosition::checked(f64::NAN, -34.88).is_none());
    /// assert!(DevicePosition::checked(91.0, 0.0).is_none());
    /// ```
    #[must_use]
    pub fn checked(latitude: f64, longitude: f64) -> Option<Self> {
        is_valid_coordinate(latitude, longitude).then_some(Self { latitude, longitude })
    }
}

/// Returns `true` if both values are finite degrees within the WGS84 ranges.
#[must_use]
pub fn is_valid_coordinate(latitude: f64, longitude: f64) -> bool {
    latitude.is_finite()
        && longitude.is_finite()
        && (-90.0..=90.0).contains(&latitude)
        && (-180.0..=180.0).contains(&longitude)
}

/// Visible area of the map: a centre and the spans on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapRegion {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl MapRegion {
    /// Region centred on the device with the default zoom spans.
    #[must_use]
    pub const fn around(position: DevicePosition) -> Self {
        Self {
            latitude: position.latitude,
            longitude: position.longitude,
            latitude_delta: DEFAULT_LATITUDE_DELTA,
            longitude_delta: DEFAULT_LONGITUDE_DELTA,
        }
    }

    /// Projects a coordinate onto a `width` x `height` cell grid.
    ///
    /// Row 0 is the northern edge and column 0 the western edge. Returns
    /// `None` when the coordinate falls outside the region or the grid is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cinemapa::domain::{DevicePosition, MapRegion};
    ///
    /// let region = MapRegion::around(DevicePosition { latitude: -8.05, longitude: -34.9 });
    /// assert_eq!(region.project(-8.05, -34.9, 21, 11), Some((5, 10)));
    /// assert_eq!(region.project(0.0, 0.0, 21, 11), None);
    /// ```
    #[must_use]
    pub fn project(&self, latitude: f64, longitude: f64, width: usize, height: usize) -> Option<(usize, usize)> {
        if width == 0 || height == 0 || !is_valid_coordinate(latitude, longitude) {
            return None;
        }

        let north = self.latitude + self.latitude_delta / 2.0;
        let west = self.longitude - self.longitude_delta / 2.0;

        let row_fraction = (north - latitude) / self.latitude_delta;
        let col_fraction = (longitude - west) / self.longitude_delta;

        if !(0.0..=1.0).contains(&row_fraction) || !(0.0..=1.0).contains(&col_fraction) {
            return None;
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
        let to_cell = |fraction: f64, cells: usize| ((fraction * cells as f64) as usize).min(cells - 1);

        Some((to_cell(row_fraction, height), to_cell(col_fraction, width)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECIFE: DevicePosition = DevicePosition {
        latitude: -8.0476,
        longitude: -34.877,
    };

    #[test]
    fn region_uses_default_deltas() {
        let region = MapRegion::around(RECIFE);
        assert_eq!(region.latitude_delta, DEFAULT_LATITUDE_DELTA);
        assert_eq!(region.longitude_delta, DEFAULT_LONGITUDE_DELTA);
        assert_eq!(region.latitude, RECIFE.latitude);
    }

    #[test]
    fn north_west_corner_maps_to_origin() {
        let region = MapRegion::around(RECIFE);
        let north = RECIFE.latitude + DEFAULT_LATITUDE_DELTA / 2.0;
        let west = RECIFE.longitude - DEFAULT_LONGITUDE_DELTA / 2.0;
        assert_eq!(region.project(north, west, 40, 10), Some((0, 0)));
    }

    #[test]
    fn south_east_corner_clamps_to_last_cell() {
        let region = MapRegion::around(RECIFE);
        let south = RECIFE.latitude - DEFAULT_LATITUDE_DELTA / 2.0 + 1e-9;
        let east = RECIFE.longitude + DEFAULT_LONGITUDE_DELTA / 2.0 - 1e-9;
        assert_eq!(region.project(south, east, 40, 10), Some((9, 39)));
    }

    #[test]
    fn points_north_of_centre_land_in_upper_rows() {
        let region = MapRegion::around(RECIFE);
        let (row, _) = region
            .project(RECIFE.latitude + 0.02, RECIFE.longitude, 40, 10)
            .expect("inside region");
        assert!(row < 5);
    }

    #[test]
    fn outside_points_and_empty_grids_do_not_project() {
        let region = MapRegion::around(RECIFE);
        assert_eq!(region.project(RECIFE.latitude + 1.0, RECIFE.longitude, 40, 10), None);
        assert_eq!(region.project(RECIFE.latitude, RECIFE.longitude, 0, 10), None);
        assert_eq!(region.project(f64::NAN, RECIFE.longitude, 40, 10), None);
    }
}
