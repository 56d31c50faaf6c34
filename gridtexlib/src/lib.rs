//! # gridtexlib
//!
//! Assemble a grid of keyed data into a booktabs LaTeX table.
//!
//! ## Overview
//!
//! A table is described by **columns** and **rows**:
//!
//! - A [`Column`] is a display label over a [`KeyedSource`], anything that
//!   can look a [`Key`] up and return a [`Value`] (a map, or an adapter over
//!   e.g. a fitted model)
//! - A [`Row`] is a lookup key, a display label and a [`Formatter`] that
//!   turns the value found into one or more lines of text
//!
//! For every (row, column) pair the value is fetched and formatted; a key a
//! column does not have simply leaves the cell blank. Multi-line cells
//! (estimate over standard error, say) are expanded into several physical
//! rows, section rules are placed at logical row boundaries, column groups
//! get spanning super-headers, and the whole grid can be transposed.
//!
//! ## Features
//!
//! - **Ragged cells**: cells of one row may differ in line count; shorter
//!   ones are padded at the bottom (or rejected with [`HeightPolicy::Strict`])
//! - **Section rules**: given in logical rows, placed in physical rows
//! - **Column groups**: `\multicolumn` super-headers with `\cmidrule`s
//! - **Transposition**: applied before expansion, so multi-line cells keep
//!   stacking vertically
//! - **Readable output**: columns padded to a common width
//!
//! ## Example
//!
//! ```rust
//! use gridtexlib::{render_table, Column, Formatter, Row, TableOptions, Value};
//! use std::collections::BTreeMap;
//!
//! let mut ols = BTreeMap::new();
//! ols.insert("educ".to_string(), Value::List(vec![0.09.into(), 0.007.into()]));
//! ols.insert("nobs".to_string(), Value::Int(935));
//!
//! let mut iv = BTreeMap::new();
//! iv.insert("educ".to_string(), Value::List(vec![0.12.into(), 0.018.into()]));
//!
//! let columns = [Column::new("OLS", &ols), Column::new("IV", &iv)];
//! let rows = [
//!     Row::new("educ", "Education", Formatter::stacked(3)),
//!     Row::new("nobs", "Observations", Formatter::integer()),
//! ];
//! let options = TableOptions::new().midrule(1).pad_columns(false);
//!
//! let latex = render_table(&rows, &columns, &options).unwrap();
//! assert!(latex.contains("Education & 0.090 & 0.120 \\\\"));
//! assert!(latex.contains(" & (0.007) & (0.018) \\\\ \\midrule"));
//! assert!(latex.contains("Observations & 935 &  \\\\"));
//! ```

pub mod error;
pub mod format;
pub mod model;
pub mod options;
pub mod output;
pub mod source;
pub mod table;

pub use error::GridtexError;
pub use format::{escape_latex, format_number, Formatter};
pub use model::{Column, Row};
pub use options::{Align, ColumnGroup, HeightPolicy, TableOptions};
pub use output::Destination;
pub use source::{Key, KeyedSource, Value};
pub use table::{GroupHeader, Table};

/// Result type for gridtexlib operations
pub type Result<T> = std::result::Result<T, GridtexError>;

/// Assemble a table without rendering it.
pub fn build_table(rows: &[Row], columns: &[Column<'_>], options: &TableOptions) -> Result<Table> {
    Table::build(rows, columns, options)
}

/// Assemble and render a table to LaTeX source.
pub fn render_table(rows: &[Row], columns: &[Column<'_>], options: &TableOptions) -> Result<String> {
    Ok(Table::build(rows, columns, options)?.to_latex())
}

/// Assemble, render and deliver a table.
///
/// Nothing is written unless the whole table builds.
pub fn write_table(
    rows: &[Row],
    columns: &[Column<'_>],
    options: &TableOptions,
    destination: Destination<'_>,
) -> Result<Option<String>> {
    let latex = render_table(rows, columns, options)?;
    output::emit(latex, destination)
}
