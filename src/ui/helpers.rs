//! Shared rendering utilities.
//!
//! Width math here counts `char`s, not bytes, so accented labels such as
//! "Gênero" or "Sua Localização" line up with plain ASCII ones.

use crate::ui::theme::Theme;

/// Moves the cursor to a 1-indexed `row` and `col`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of terminal cells `text` takes, assuming one cell per `char`.
#[must_use]
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `width` cells, marking the cut with `…`.
///
/// ```rust
/// use cinemapa::ui::helpers::truncate;
///
/// assert_eq!(truncate("Buscar Filme", 20), "Buscar Filme");
/// assert_eq!(truncate("Buscar Filme", 7), "Buscar…");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// Truncates or right-pads `text` to exactly `width` cells.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let cut = truncate(text, width);
    let padding = width.saturating_sub(text_width(&cut));
    format!("{cut}{}", " ".repeat(padding))
}

/// Left padding that centres `content_width` cells in `cols`.
#[must_use]
pub const fn centre_offset(content_width: usize, cols: usize) -> usize {
    cols.saturating_sub(content_width) / 2
}

/// Prints a full-width horizontal rule at `row` and returns the next row.
pub fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}{}{}", Theme::fg(color), "─".repeat(cols), Theme::reset());
    row + 1
}
