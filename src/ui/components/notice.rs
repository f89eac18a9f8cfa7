//! Modal notice box renderer.
//!
//! The box is drawn last, centred over whatever the rest of the frame shows,
//! so the notice reads like an alert dialog with a single OK button.

use crate::ui::helpers::{centre_offset, fit, position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::NoticeBox;

const MAX_BOX_WIDTH: usize = 60;
const MIN_BOX_WIDTH: usize = 20;

/// Draws the notice box centred in a `rows` x `cols` pane.
pub fn render_notice(notice: &NoticeBox, theme: &Theme, rows: usize, cols: usize) {
    let box_width = cols.saturating_sub(4).clamp(MIN_BOX_WIDTH.min(cols), MAX_BOX_WIDTH);
    let inner = box_width.saturating_sub(4);

    let mut body = vec![(notice.title.clone(), true)];
    body.push((String::new(), false));
    body.extend(wrap(&notice.message, inner).into_iter().map(|line| (line, false)));
    if notice.pending > 0 {
        body.push((format!("(+{} aviso(s) na fila)", notice.pending), false));
    }
    body.push((String::new(), false));

    let height = body.len() + 3;
    let top = 1 + centre_offset(height, rows);
    let left = 1 + centre_offset(box_width, cols);
    let border = Theme::fg(&theme.colors.notice_border);
    let span = box_width.saturating_sub(2);

    position_cursor(top, left);
    print!("{border}┌{}┐{}", "─".repeat(span), Theme::reset());

    for (offset, (line, is_title)) in body.iter().enumerate() {
        position_cursor(top + 1 + offset, left);
        print!("{border}│{}  ", Theme::reset());
        if *is_title {
            print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.notice_title_fg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
        print!("{}{}  {border}│{}", fit(line, inner), Theme::reset(), Theme::reset());
    }

    let button = " OK ";
    let button_row = top + 1 + body.len();
    let button_pad = centre_offset(text_width(button), span);
    position_cursor(button_row, left);
    print!("{border}│{}{}", Theme::reset(), " ".repeat(button_pad));
    print!("{}{}{}{button}{}", Theme::bold(), Theme::fg(&theme.colors.button_fg), Theme::bg(&theme.colors.button_bg), Theme::reset());
    print!("{}{border}│{}", " ".repeat(span.saturating_sub(button_pad + text_width(button))), Theme::reset());

    position_cursor(button_row + 1, left);
    print!("{border}└{}┘{}", "─".repeat(span), Theme::reset());
}

/// Greedy word wrap to `width` cells. Words longer than a line are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![];
    }

    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: String = word.to_string();
        while text_width(&word) > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let head: String = word.chars().take(width).collect();
            word = word.chars().skip(width).collect();
            lines.push(head);
        }

        let needed = text_width(&current) + usize::from(!current.is_empty()) + text_width(&word);
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
