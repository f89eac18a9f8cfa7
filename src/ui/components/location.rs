//! Location text, map grid and legend renderer.

use crate::app::state::{DEVICE_GLYPH, MAP_BACKGROUND};
use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{LocationBlock, MapMarker, MarkerKind};

/// Spaces left of the map frame.
const MAP_MARGIN: usize = 2;

/// Renders the location block starting at `row` and returns the next row.
///
/// ```text
///   Sua Localização
///   Latitude: -8.0476
///   Longitude: -34.877
///   ┌────────────────┐
///   │·····1··········│
///   │·······@········│
///   └────────────────┘
///   @ Sua Localização
///   1 Cinema São Luiz
///   5 pontos de interesse · atualizado agora
/// ```
pub fn render_location(row: usize, location: &LocationBlock, theme: &Theme, cols: usize) -> usize {
    let text_cells = cols.saturating_sub(MAP_MARGIN);
    let mut current_row = row;

    position_cursor(current_row, MAP_MARGIN + 1);
    print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.heading_fg));
    print!("{}{}", fit(&location.heading, text_cells), Theme::reset());
    current_row += 1;

    for line in [&location.latitude_line, &location.longitude_line] {
        position_cursor(current_row, MAP_MARGIN + 1);
        print!("{}{}{}", Theme::fg(&theme.colors.text_normal), fit(line, text_cells), Theme::reset());
        current_row += 1;
    }

    let width = location.grid.first().map_or(0, |line| line.chars().count());
    current_row = render_frame_edge(current_row, '┌', '┐', width, theme);
    for line in &location.grid {
        position_cursor(current_row, MAP_MARGIN + 1);
        print!("{}│", Theme::fg(&theme.colors.border));
        for cell in line.chars() {
            print!("{}{cell}", Theme::fg(cell_color(cell, theme)));
        }
        print!("{}│{}", Theme::fg(&theme.colors.border), Theme::reset());
        current_row += 1;
    }
    current_row = render_frame_edge(current_row, '└', '┘', width, theme);

    for marker in &location.markers {
        position_cursor(current_row, MAP_MARGIN + 1);
        print!("{}", legend_line(marker, theme, text_cells));
        current_row += 1;
    }

    if let Some(caption) = &location.caption {
        position_cursor(current_row, MAP_MARGIN + 1);
        print!("{}{}{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim), fit(caption, text_cells), Theme::reset());
        current_row += 1;
    }

    current_row
}

fn render_frame_edge(row: usize, left: char, right: char, width: usize, theme: &Theme) -> usize {
    position_cursor(row, MAP_MARGIN + 1);
    print!("{}{left}{}{right}{}", Theme::fg(&theme.colors.border), "─".repeat(width), Theme::reset());
    row + 1
}

fn cell_color(cell: char, theme: &Theme) -> &str {
    match cell {
        MAP_BACKGROUND => &theme.colors.map_background_fg,
        DEVICE_GLYPH => &theme.colors.device_marker_fg,
        _ => &theme.colors.marker_fg,
    }
}

fn legend_line(marker: &MapMarker, theme: &Theme, width: usize) -> String {
    let color = match marker.kind {
        MarkerKind::Device => &theme.colors.device_marker_fg,
        MarkerKind::PointOfInterest => &theme.colors.marker_fg,
    };
    let label = if marker.cell.is_some() {
        marker.label.clone()
    } else {
        format!("{} (fora do mapa)", marker.label)
    };
    format!(
        "{}{}{} {}{}",
        Theme::fg(color),
        marker.glyph,
        Theme::fg(&theme.colors.text_dim),
        fit(&label, width.saturating_sub(2)),
        Theme::reset()
    )
}
