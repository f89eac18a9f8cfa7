//! Composable UI component renderers.
//!
//! Each component prints one part of the screen starting at a given row and
//! returns the next free row, so [`render_screen`] can stack them top to
//! bottom.
//!
//! # Components
//!
//! - [`header`]: centred title bar
//! - [`search`]: search box and button
//! - [`location`]: coordinates, map grid and legend
//! - [`movie`]: movie details
//! - [`notice`]: modal notice box drawn over everything
//! - [`footer`]: keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search box - 3 lines]
//! [Button]
//! [blank line]
//! [Location block]   only once the position is known
//! [Movie block]      only after a successful search
//! [padding]
//! [Border]
//! [Footer]
//! ```

mod footer;
mod header;
mod location;
mod movie;
mod notice;
mod search;

use crate::ui::helpers::render_border;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use footer::render_footer;
use header::render_header;
use location::render_location;
use movie::render_movie;
use notice::render_notice;
use search::render_search_bar;

/// Renders the whole screen for a `rows` x `cols` pane.
///
/// Blocks that would overlap the footer are still printed; the map height is
/// already sized by the view model so this only happens on very small panes.
pub fn render_screen(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_search_bar(current_row, &vm.search_bar, theme, cols);
    current_row += 1;

    if let Some(location) = &vm.location {
        current_row = render_location(current_row, location, theme, cols);
    }
    if let Some(movie) = &vm.movie {
        let _current_row = render_movie(current_row, movie, theme, cols);
    }

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);

    if let Some(notice) = &vm.notice {
        render_notice(notice, theme, rows, cols);
    }
}
