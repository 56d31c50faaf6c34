//! Title-row alignment and column padding of the expanded grid.

use unicode_width::UnicodeWidthStr;

use super::grid::RectGrid;
use crate::options::Align;

/// Wrap every title cell in a one-column `\multicolumn` carrying `align`,
/// then optionally pad every column to its widest entry.
///
/// Padding only adds trailing spaces; cell content and column count are
/// unchanged.
pub fn normalize(mut grid: RectGrid, title_align: Align, pad: bool) -> RectGrid {
    if let Some(title) = grid.first_mut() {
        wrap_title(title, title_align);
    }
    if pad {
        pad_columns(&mut grid);
    }
    grid
}

/// Apply the alignment directive to each cell of the title row.
pub fn wrap_title(title: &mut [String], align: Align) {
    for cell in title.iter_mut() {
        *cell = format!("\\multicolumn{{1}}{{{}}}{{{}}}", align.to_char(), cell);
    }
}

/// Pad each column with trailing spaces to its maximum display width.
pub fn pad_columns(grid: &mut RectGrid) {
    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..width)
        .map(|col| {
            grid.iter()
                .filter_map(|row| row.get(col))
                .map(|cell| UnicodeWidthStr::width(cell.as_str()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    for row in grid.iter_mut() {
        for (cell, &target) in row.iter_mut().zip(&widths) {
            let current = UnicodeWidthStr::width(cell.as_str());
            if current < target {
                cell.push_str(&" ".repeat(target - current));
            }
        }
    }
}
