//! Application state management and view model computation.
//!
//! [`AppState`] is the single owner of everything the screen shows: the search
//! text, the last movie found, the device position, the point-of-interest
//! batch and the queue of notices. The handler is its only mutator and the
//! renderer only ever sees a [`UIViewModel`](crate::ui::viewmodel::UIViewModel)
//! computed from it.
//!
//! # Example
//!
//! ```rust
//! use cinemapa::app::AppState;
//! use cinemapa::client::Endpoints;
//! use cinemapa::ui::Theme;
//!
//! let state = AppState::new(Endpoints::default(), Theme::default());
//! let viewmodel = state.compute_viewmodel(30, 80);
//! assert!(viewmodel.location.is_none());
//! assert!(viewmodel.movie.is_none());
//! ```

use super::modes::Lifecycle;
use crate::client::Endpoints;
use crate::domain::{DevicePosition, MapRegion, MovieRecord, Notice, PointOfInterestBatch};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    FooterInfo, HeaderInfo, LocationBlock, MapMarker, MarkerKind, MovieBlock, NoticeBox, SearchBarInfo,
    UIViewModel,
};
use std::collections::VecDeque;

/// Rows taken by everything above the location block: blank line, header,
/// border, three-line search box, button, blank line.
const TOP_CHROME_ROWS: usize = 8;

/// Rows taken by the footer border and footer.
const BOTTOM_CHROME_ROWS: usize = 2;

/// Heading, latitude, longitude, and the two map frame borders.
const LOCATION_FIXED_ROWS: usize = 5;

/// Blank separator, title and four detail lines.
const MOVIE_ROWS: usize = 6;

const MIN_MAP_ROWS: usize = 3;
const MAX_MAP_ROWS: usize = 15;
const MIN_MAP_COLS: usize = 8;

/// Horizontal margin on each side of the map frame.
const MAP_MARGIN: usize = 2;

/// Background cell of the map grid.
pub const MAP_BACKGROUND: char = '·';

/// Glyph of the device marker.
pub const DEVICE_GLYPH: char = '@';

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Mount state; events other than `Mount` are ignored while unmounted.
    pub lifecycle: Lifecycle,

    /// Text typed into the search box. Always defined, possibly empty.
    pub search_query: String,

    /// Last successfully found movie. Failed searches leave it untouched.
    pub movie: Option<MovieRecord>,

    /// The one position fix, set at most once.
    pub device_position: Option<DevicePosition>,

    /// The one point-of-interest batch, replaced atomically.
    pub points_of_interest: Option<PointOfInterestBatch>,

    /// Pending notices, front shown first.
    pub notices: VecDeque<Notice>,

    /// Generation of the most recently issued search. Responses carrying an
    /// older generation are stale.
    pub search_generation: u64,

    /// Remote service locations.
    pub endpoints: Endpoints,

    /// Color scheme for UI rendering.
    pub theme: Theme,
}

impl AppState {
    /// Creates an unmounted state with nothing loaded.
    #[must_use]
    pub fn new(endpoints: Endpoints, theme: Theme) -> Self {
        Self {
            lifecycle: Lifecycle::Unmounted,
            search_query: String::new(),
            movie: None,
            device_position: None,
            points_of_interest: None,
            notices: VecDeque::new(),
            search_generation: 0,
            endpoints,
            theme,
        }
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.lifecycle == Lifecycle::Mounted
    }

    /// Returns `true` while a notice is waiting for acknowledgement.
    #[must_use]
    pub fn has_notice(&self) -> bool {
        !self.notices.is_empty()
    }

    /// Queues a notice behind any already showing.
    pub fn raise_notice(&mut self, notice: Notice) {
        tracing::debug!(title = %notice.title, queued = self.notices.len(), "notice raised");
        self.notices.push_back(notice);
    }

    /// Drops the front notice. Returns `false` if there was none.
    pub fn dismiss_notice(&mut self) -> bool {
        self.notices.pop_front().is_some()
    }

    /// Issues a new search generation and returns it.
    pub fn next_search_generation(&mut self) -> u64 {
        self.search_generation += 1;
        self.search_generation
    }

    /// Returns `true` if `generation` is the latest search issued.
    #[must_use]
    pub const fn is_current_search(&self, generation: u64) -> bool {
        generation == self.search_generation
    }

    /// Computes a renderable view model for a `rows` x `cols` pane.
    ///
    /// The location block exists only when the device position is known, and
    /// the movie block only when a movie has been found. The map grid takes
    /// the rows left over by everything else, within fixed bounds.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let movie = self.compute_movie_block();
        let location = self.device_position.map(|position| {
            let movie_rows = if movie.is_some() { MOVIE_ROWS } else { 0 };
            self.compute_location_block(position, rows, cols, movie_rows)
        });

        UIViewModel {
            header: HeaderInfo {
                title: " Busca de Filmes ".to_string(),
            },
            search_bar: SearchBarInfo {
                query: self.search_query.clone(),
                placeholder: "Digite o nome do filme".to_string(),
                button_label: "Buscar Filme".to_string(),
            },
            location,
            movie,
            notice: self.notices.front().map(|notice| NoticeBox {
                title: notice.title.clone(),
                message: notice.message.clone(),
                pending: self.notices.len() - 1,
            }),
            footer: self.compute_footer(),
        }
    }

    fn compute_movie_block(&self) -> Option<MovieBlock> {
        self.movie.as_ref().map(|movie| MovieBlock {
            title: movie.title.clone(),
            details: vec![
                format!("Ano: {}", movie.year),
                format!("Gênero: {}", movie.genre),
                format!("Diretor: {}", movie.director),
                format!("Prêmios: {}", movie.awards),
            ],
        })
    }

    fn compute_location_block(
        &self,
        position: DevicePosition,
        rows: usize,
        cols: usize,
        movie_rows: usize,
    ) -> LocationBlock {
        let region = MapRegion::around(position);
        let points = self
            .points_of_interest
            .as_ref()
            .map_or(&[][..], |batch| batch.points.as_slice());

        let caption = self.points_of_interest.as_ref().map(|batch| {
            let mut caption = format!("{} pontos de interesse · atualizado {}", batch.points.len(), batch.age());
            if batch.skipped > 0 {
                caption.push_str(&format!(" · {} ignorado(s) por coordenadas inválidas", batch.skipped));
            }
            caption
        });

        let legend_rows = 1 + points.len() + usize::from(caption.is_some());
        let used = TOP_CHROME_ROWS + LOCATION_FIXED_ROWS + legend_rows + movie_rows + BOTTOM_CHROME_ROWS;
        let height = rows.saturating_sub(used).clamp(MIN_MAP_ROWS, MAX_MAP_ROWS);
        let width = cols.saturating_sub(MAP_MARGIN * 2 + 2).max(MIN_MAP_COLS);

        let mut markers = Vec::with_capacity(points.len() + 1);
        markers.push(MapMarker {
            key: "device".to_string(),
            glyph: DEVICE_GLYPH,
            label: "Sua Localização".to_string(),
            kind: MarkerKind::Device,
            cell: region.project(position.latitude, position.longitude, width, height),
        });
        markers.extend(points.iter().enumerate().map(|(index, point)| MapMarker {
            key: point.id.clone(),
            glyph: marker_glyph(index),
            label: point.name.clone(),
            kind: MarkerKind::PointOfInterest,
            cell: region.project(point.latitude, point.longitude, width, height),
        }));

        LocationBlock {
            heading: "Sua Localização".to_string(),
            latitude_line: format!("Latitude: {}", position.latitude),
            longitude_line: format!("Longitude: {}", position.longitude),
            region,
            grid: rasterize(&markers, width, height),
            markers,
            caption,
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.has_notice() {
            "Enter/Esc: OK"
        } else {
            "Digite o título  Enter: Buscar Filme  Backspace: apagar  Esc: fechar"
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Glyph for the `index`-th point of interest: `1`-`9`, then `a`-`z`, then `*`.
fn marker_glyph(index: usize) -> char {
    u32::try_from(index + 1)
        .ok()
        .and_then(|n| char::from_digit(n, 36))
        .unwrap_or('*')
}

/// Draws markers onto a background grid.
///
/// Points are drawn first and the device last, so the device stays visible
/// when a point shares its cell.
fn rasterize(markers: &[MapMarker], width: usize, height: usize) -> Vec<String> {
    let mut grid = vec![vec![MAP_BACKGROUND; width]; height];

    let device_last = markers
        .iter()
        .filter(|m| m.kind == MarkerKind::PointOfInterest)
        .chain(markers.iter().filter(|m| m.kind == MarkerKind::Device));

    for marker in device_last {
        if let Some((row, col)) = marker.cell {
            grid[row][col] = marker.glyph;
        }
    }

    grid.into_iter().map(|row| row.into_iter().collect()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PointOfInterest;

    fn mounted_state() -> AppState {
        let mut state = AppState::new(Endpoints::default(), Theme::default());
        state.lifecycle = Lifecycle::Mounted;
        state
    }

    fn recife() -> DevicePosition {
        DevicePosition {
            latitude: -8.0476,
            longitude: -34.877,
        }
    }

    fn poi(id: &str, latitude: f64, longitude: f64) -> PointOfInterest {
        PointOfInterest {
            id: id.to_string(),
            name: format!("Ponto {id}"),
            latitude,
            longitude,
        }
    }

    #[test]
    fn map_block_absent_without_position() {
        let mut state = mounted_state();
        state.points_of_interest = Some(PointOfInterestBatch::new(vec![poi("1", -8.05, -34.88)], 0));
        assert!(state.compute_viewmodel(40, 80).location.is_none());
    }

    #[test]
    fn device_marker_sits_at_grid_centre() {
        let mut state = mounted_state();
        state.device_position = Some(recife());

        let vm = state.compute_viewmodel(40, 80);
        let location = vm.location.expect("location block");
        let height = location.grid.len();
        let width = location.grid[0].chars().count();

        let device = &location.markers[0];
        assert_eq!(device.kind, MarkerKind::Device);
        let (row, col) = device.cell.expect("device inside its own region");
        assert!(row.abs_diff(height / 2) <= 1);
        assert!(col.abs_diff(width / 2) <= 1);
        assert_eq!(location.grid[row].chars().nth(col), Some(DEVICE_GLYPH));
    }

    #[test]
    fn every_point_gets_a_keyed_marker() {
        let mut state = mounted_state();
        state.device_position = Some(recife());
        state.points_of_interest = Some(PointOfInterestBatch::new(
            vec![poi("10", -8.03, -34.87), poi("11", -8.06, -34.89), poi("12", 40.0, -74.0)],
            0,
        ));

        let location = state.compute_viewmodel(40, 80).location.expect("location block");
        let keys: Vec<&str> = location.markers.iter().map(|m| m.key.as_str()).collect();
        assert_eq!(keys, ["device", "10", "11", "12"]);

        let glyphs: Vec<char> = location.markers.iter().map(|m| m.glyph).collect();
        assert_eq!(glyphs, ['@', '1', '2', '3']);

        assert!(location.markers[1].cell.is_some());
        assert!(location.markers[3].cell.is_none());
        assert!(location.grid.iter().any(|row| row.contains('1')));
        assert!(!location.grid.iter().any(|row| row.contains('3')));
    }

    #[test]
    fn caption_reports_skipped_records() {
        let mut state = mounted_state();
        state.device_position = Some(recife());
        state.points_of_interest = Some(PointOfInterestBatch::new(vec![poi("1", -8.05, -34.88)], 2));

        let caption = state.compute_viewmodel(40, 80).location.and_then(|l| l.caption).unwrap();
        assert!(caption.starts_with("1 pontos de interesse"));
        assert!(caption.contains("2 ignorado(s)"));
    }

    #[test]
    fn map_height_stays_within_bounds() {
        let mut state = mounted_state();
        state.device_position = Some(recife());

        assert_eq!(state.compute_viewmodel(10, 80).location.unwrap().grid.len(), MIN_MAP_ROWS);
        assert_eq!(state.compute_viewmodel(200, 80).location.unwrap().grid.len(), MAX_MAP_ROWS);
    }

    #[test]
    fn movie_block_lists_labelled_details() {
        let mut state = mounted_state();
        state.movie = Some(MovieRecord {
            title: "Bacurau".to_string(),
            year: "2019".to_string(),
            genre: "Drama, Western".to_string(),
            director: "Kleber Mendonça Filho, Juliano Dornelles".to_string(),
            awards: "Jury Prize, Cannes".to_string(),
        });

        let movie = state.compute_viewmodel(40, 80).movie.expect("movie block");
        assert_eq!(movie.title, "Bacurau");
        assert_eq!(movie.details[0], "Ano: 2019");
        assert_eq!(movie.details[3], "Prêmios: Jury Prize, Cannes");
    }

    #[test]
    fn notice_box_shows_front_and_pending_count() {
        let mut state = mounted_state();
        state.raise_notice(Notice::invalid_title());
        state.raise_notice(Notice::location_permission_denied());

        let vm = state.compute_viewmodel(40, 80);
        let notice = vm.notice.expect("notice");
        assert_eq!(notice.title, "Aviso");
        assert_eq!(notice.pending, 1);
        assert_eq!(vm.footer.keybindings, "Enter/Esc: OK");

        assert!(state.dismiss_notice());
        assert!(state.dismiss_notice());
        assert!(!state.dismiss_notice());
    }

    #[test]
    fn generations_increase_and_only_latest_is_current() {
        let mut state = mounted_state();
        let first = state.next_search_generation();
        let second = state.next_search_generation();
        assert!(second > first);
        assert!(state.is_current_search(second));
        assert!(!state.is_current_search(first));
    }

    #[test]
    fn glyphs_run_through_digits_then_letters() {
        assert_eq!(marker_glyph(0), '1');
        assert_eq!(marker_glyph(8), '9');
        assert_eq!(marker_glyph(9), 'a');
        assert_eq!(marker_glyph(40), '*');
    }
}
