//! Status tables for terminals, coloured by navigation style.
//!
//! Colours are only emitted when the output is a terminal; piped output
//! stays plain.

use comfy_table::{Cell, Color, Table};

use quizdeck_core::view::{NavButton, NavStyle};

/// Questions per row of the compact navigation grid.
pub const GRID_COLUMNS: usize = 10;

/// Foreground colour of a navigation control. Never-attempted questions
/// keep the terminal default.
pub fn nav_color(style: NavStyle) -> Option<Color> {
    match style {
        NavStyle::Success => Some(Color::Green),
        NavStyle::Danger => Some(Color::Red),
        NavStyle::Neutral => Some(Color::Grey),
        NavStyle::Default => None,
    }
}

fn styled(cell: Cell, style: NavStyle) -> Cell {
    match nav_color(style) {
        Some(color) => cell.fg(color),
        None => cell,
    }
}

fn status_text(button: &NavButton) -> String {
    button
        .status
        .map(|s| s.to_string())
        .unwrap_or_else(|| "not attempted".to_string())
}

/// One row per bank question: id and status.
pub fn status_table(panel: &[NavButton]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Question", "Status"]);
    for b in panel {
        table.add_row(vec![
            styled(Cell::new(b.id.as_str()), b.style),
            styled(Cell::new(status_text(b)), b.style),
        ]);
    }
    table
}

/// Compact panel: question ids laid out [`GRID_COLUMNS`] to a row.
pub fn nav_grid(panel: &[NavButton]) -> Table {
    let mut table = Table::new();
    for chunk in panel.chunks(GRID_COLUMNS) {
        table.add_row(
            chunk
                .iter()
                .map(|b| styled(Cell::new(b.id.as_str()), b.style))
                .collect::<Vec<_>>(),
        );
    }
    table
}
