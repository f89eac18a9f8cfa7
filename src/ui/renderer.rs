//! Top-level rendering coordinator.
//!
//! Rendering is two steps: compute a [`UIViewModel`] from the state, then hand
//! it to the components. Nothing here reads state beyond the view model and
//! the theme.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout for a `rows` x `cols` pane.
///
/// Prints ANSI-styled output with explicit cursor positioning. Does not clear
/// the screen; the host does that before each render.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    if rows == 0 || cols == 0 {
        return;
    }
    components::render_screen(vm, theme, rows, cols);
}
