//! Search box and button renderer.

use crate::ui::helpers::{centre_offset, fit, position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Spaces left and right of the search box.
const SEARCH_BOX_MARGIN: usize = 5;

/// Renders the three-line search box followed by the button line.
///
/// ```text
/// [margin] ┌──────────────────────────┐
/// [margin] │ Digite o nome do filme   │
/// [margin] └──────────────────────────┘
///                [ Buscar Filme ]
/// ```
///
/// The placeholder is shown dimmed while the query is empty. When the query
/// is longer than the box, its tail is kept so the caret end stays visible.
///
/// Returns the row after the button.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let text_cells = inner_width.saturating_sub(2);
    let fill = theme.colors.input_bg.as_deref().map(Theme::bg).unwrap_or_default();

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}│{}{fill} ", Theme::fg(&theme.colors.search_bar_border), Theme::reset());
    if search.query.is_empty() {
        print!("{}{}", Theme::fg(&theme.colors.placeholder_fg), fit(&search.placeholder, text_cells));
    } else {
        let skip = text_width(&search.query).saturating_sub(text_cells);
        let visible: String = search.query.chars().skip(skip).collect();
        print!("{}{}", Theme::fg(&theme.colors.text_normal), fit(&visible, text_cells));
    }
    print!(" {}", Theme::reset());
    print!("{}│{}", Theme::fg(&theme.colors.search_bar_border), Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let button = format!(" {} ", search.button_label);
    position_cursor(row + 3, 1 + centre_offset(text_width(&button), cols));
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.button_fg));
    print!("{}", Theme::bg(&theme.colors.button_bg));
    print!("{button}");
    print!("{}", Theme::reset());

    row + 4
}
