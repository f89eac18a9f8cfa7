//! Movie detail renderer.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::MovieBlock;

const MOVIE_MARGIN: usize = 2;

/// Renders a blank separator, the bold title, then one line per detail.
///
/// Returns the next available row.
pub fn render_movie(row: usize, movie: &MovieBlock, theme: &Theme, cols: usize) -> usize {
    let text_cells = cols.saturating_sub(MOVIE_MARGIN);
    let mut current_row = row + 1;

    position_cursor(current_row, MOVIE_MARGIN + 1);
    print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.movie_title_fg));
    print!("{}{}", fit(&movie.title, text_cells), Theme::reset());
    current_row += 1;

    for detail in &movie.details {
        position_cursor(current_row, MOVIE_MARGIN + 1);
        print!("{}{}{}", Theme::fg(&theme.colors.text_normal), fit(detail, text_cells), Theme::reset());
        current_row += 1;
    }

    current_row
}
