//! View model types representing renderable UI state.
//!
//! View models are computed from `AppState::compute_viewmodel()` and consumed
//! by the renderer. They hold display-ready text only: every label, every map
//! cell and every conditional block is decided before rendering starts.

use crate::domain::MapRegion;

/// Complete UI view model for one frame.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Screen title.
    pub header: HeaderInfo,

    /// Search input and its button.
    pub search_bar: SearchBarInfo,

    /// Location text and map, present only once the device position is known.
    pub location: Option<LocationBlock>,

    /// Movie details, present only after a successful search.
    pub movie: Option<MovieBlock>,

    /// Front of the notice queue, drawn over everything else.
    pub notice: Option<NoticeBox>,

    /// Keybinding hints.
    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Search input box and button.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Current query text, possibly empty.
    pub query: String,

    /// Hint shown while the query is empty.
    pub placeholder: String,

    /// Label of the search button.
    pub button_label: String,
}

/// Whose position a marker shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Device,
    PointOfInterest,
}

/// One marker on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    /// Stable key: `"device"` or the point-of-interest id.
    pub key: String,

    /// Character drawn in the grid and repeated in the legend.
    pub glyph: char,

    /// Marker title.
    pub label: String,

    pub kind: MarkerKind,

    /// Grid cell `(row, col)`, or `None` when outside the visible region.
    pub cell: Option<(usize, usize)>,
}

/// Location text, map grid and legend.
#[derive(Debug, Clone)]
pub struct LocationBlock {
    /// Section title.
    pub heading: String,

    /// "Latitude: ..." line.
    pub latitude_line: String,

    /// "Longitude: ..." line.
    pub longitude_line: String,

    /// Region the grid covers.
    pub region: MapRegion,

    /// Device marker first, then one per point of interest.
    pub markers: Vec<MapMarker>,

    /// Grid rows, one `String` per row, all the same width.
    pub grid: Vec<String>,

    /// Summary of the point-of-interest batch, if one has arrived.
    pub caption: Option<String>,
}

/// Movie detail block.
#[derive(Debug, Clone)]
pub struct MovieBlock {
    pub title: String,

    /// Labelled lines: year, genre, director, awards.
    pub details: Vec<String>,
}

/// Modal notice box.
#[derive(Debug, Clone)]
pub struct NoticeBox {
    pub title: String,
    pub message: String,

    /// Notices queued behind this one.
    pub pending: usize,
}
