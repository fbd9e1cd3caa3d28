//! Top-level rendering entry point.

use crate::app::AppState;
use crate::ui::components;

/// Computes the view model for a `rows` x `cols` pane and prints it.
///
/// Prints ANSI-styled output to stdout; the host clears the pane before each
/// render call.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_screen(&viewmodel, state.theme(), rows, cols);
}
