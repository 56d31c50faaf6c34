//! Resolve one (row, column) pair into the lines of a cell.

use crate::error::GridtexError;
use crate::model::{Column, Row};
use crate::source::{Key, Value};
use crate::Result;

/// The lines of one cell, top to bottom. Never empty.
pub type Cell = Vec<String>;

/// A one-line blank cell
pub fn blank() -> Cell {
    vec![String::new()]
}

/// Look `row.key` up in `column` and format what is found.
///
/// A missing key is not an error: the cell is a single blank line. A
/// formatter that returns anything but text, or a list containing anything
/// but text, is reported as a `FormattingContractViolation`.
pub fn resolve(row: &Row, column: &Column<'_>) -> Result<Cell> {
    let value = match &row.key {
        Key::Null => None,
        key => column.data.get(key),
    };
    let Some(value) = value else {
        return Ok(blank());
    };

    match row.formatter.apply(value) {
        Value::Text(text) => Ok(vec![text]),
        Value::List(items) if items.is_empty() => Ok(blank()),
        Value::List(items) => items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| match item {
                Value::Text(text) => Ok(text),
                other => Err(violation(
                    row,
                    column,
                    format!("line {} is {}, expected text", idx + 1, other.kind()),
                )),
            })
            .collect(),
        other => Err(violation(
            row,
            column,
            format!("returned {}, expected text or a list of text", other.kind()),
        )),
    }
}

fn violation(row: &Row, column: &Column<'_>, detail: String) -> GridtexError {
    GridtexError::FormattingContractViolation {
        row: row.label.clone(),
        column: column.label.clone(),
        detail,
    }
}
