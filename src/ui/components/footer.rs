//! Footer component renderer.

use crate::ui::helpers::{centre_offset, position_cursor, text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the keybinding hints centred and dimmed at `row`.
///
/// Hints wider than the pane are truncated rather than wrapped, so the footer
/// always stays on its one line.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let help_text = truncate(&footer.keybindings, cols);
    let text_len = text_width(&help_text);
    let padding = centre_offset(text_len, cols);

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(padding));
    print!("{help_text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
    row + 1
}
