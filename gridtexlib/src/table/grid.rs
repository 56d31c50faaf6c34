//! The ragged cell grid and its expansion into physical lines.
//!
//! Row 0 of a [`RaggedGrid`] is the title row and column 0 is the row-label
//! column. Each entry is a [`Cell`] of one or more lines, so rows can differ
//! in height until [`RaggedGrid::expand`] flattens them into a rectangle of
//! single-line strings.

use tracing::debug;

use super::cell::{self, Cell};
use crate::error::GridtexError;
use crate::model::{Column, Row};
use crate::options::HeightPolicy;
use crate::Result;

/// A rectangular matrix of single-line strings, one entry per physical row.
pub type RectGrid = Vec<Vec<String>>;

/// Logical rows of cells, title row first.
#[derive(Debug, Clone, PartialEq)]
pub struct RaggedGrid {
    rows: Vec<Vec<Cell>>,
}

impl RaggedGrid {
    /// Resolve every (row, column) pair and prepend the title row.
    ///
    /// Fails on the first formatter that breaks its contract.
    pub fn build(rows: &[Row], columns: &[Column<'_>], row_header: Option<&str>) -> Result<Self> {
        let mut grid = Vec::with_capacity(rows.len() + 1);

        let mut title = Vec::with_capacity(columns.len() + 1);
        title.push(vec![row_header.unwrap_or_default().to_string()]);
        title.extend(columns.iter().map(|col| vec![col.label.clone()]));
        grid.push(title);

        for row in rows {
            let mut cells = Vec::with_capacity(columns.len() + 1);
            cells.push(vec![row.label.clone()]);
            for column in columns {
                cells.push(cell::resolve(row, column)?);
            }
            grid.push(cells);
        }

        debug!(
            rows = rows.len(),
            columns = columns.len(),
            "built ragged grid"
        );
        Ok(RaggedGrid { rows: grid })
    }

    /// Wrap already-resolved rows. Every row must have the same number of
    /// cells and every cell at least one line.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        RaggedGrid { rows }
    }

    /// Logical rows, title row first
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of columns, row-label column included
    pub fn width(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    /// Swap the two axes: logical rows become logical columns.
    ///
    /// Cells keep their lines, so after transposition multi-line cells
    /// expand along the new row axis.
    pub fn transpose(self) -> Self {
        let width = self.width();
        let height = self.rows.len();
        let mut swapped: Vec<Vec<Cell>> = (0..width).map(|_| Vec::with_capacity(height)).collect();

        for row in self.rows {
            for (col_idx, cell) in row.into_iter().enumerate() {
                swapped[col_idx].push(cell);
            }
        }

        RaggedGrid { rows: swapped }
    }

    /// Physical height of every logical row (title row included).
    ///
    /// Under `Strict`, two cells of one row that both span several lines
    /// must agree on how many.
    pub fn heights(&self, policy: HeightPolicy) -> Result<Vec<usize>> {
        self.rows
            .iter()
            .enumerate()
            .map(|(row_idx, row)| -> Result<usize> {
                if policy == HeightPolicy::Strict {
                    self.check_uniform(row_idx, row)?;
                }
                Ok(row.iter().map(Vec::len).max().unwrap_or(1).max(1))
            })
            .collect()
    }

    fn check_uniform(&self, row_idx: usize, row: &[Cell]) -> Result<()> {
        let mut expected: Option<usize> = None;
        for (col_idx, cell) in row.iter().enumerate() {
            if cell.len() <= 1 {
                continue;
            }
            match expected {
                None => expected = Some(cell.len()),
                Some(height) if height != cell.len() => {
                    return Err(GridtexError::RaggedCell {
                        row: self.label_of_row(row_idx),
                        column: self.label_of_column(col_idx),
                        expected: height,
                        found: cell.len(),
                    });
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    fn label_of_row(&self, row_idx: usize) -> String {
        self.rows[row_idx]
            .first()
            .and_then(|cell| cell.first())
            .cloned()
            .unwrap_or_default()
    }

    fn label_of_column(&self, col_idx: usize) -> String {
        self.rows
            .first()
            .and_then(|title| title.get(col_idx))
            .and_then(|cell| cell.first())
            .cloned()
            .unwrap_or_default()
    }

    /// Flatten into physical rows.
    ///
    /// Logical row `i` becomes `heights[i]` physical rows; a cell shorter
    /// than its row is padded with blank lines at the bottom.
    pub fn expand(&self, heights: &[usize]) -> RectGrid {
        let mut physical = Vec::with_capacity(heights.iter().sum());

        for (row, &height) in self.rows.iter().zip(heights) {
            for line in 0..height {
                physical.push(
                    row.iter()
                        .map(|cell| cell.get(line).cloned().unwrap_or_default())
                        .collect(),
                );
            }
        }

        physical
    }
}
