//! Row and column descriptions consumed by the table engine.

use std::fmt;

use crate::format::Formatter;
use crate::source::{Key, KeyedSource};

/// A column: a display label over a keyed data source.
///
/// The source is borrowed for the duration of one table build.
#[derive(Clone)]
pub struct Column<'a> {
    pub label: String,
    pub data: &'a dyn KeyedSource,
}

impl<'a> Column<'a> {
    pub fn new(label: impl Into<String>, data: &'a dyn KeyedSource) -> Self {
        Column {
            label: label.into(),
            data,
        }
    }
}

impl fmt::Debug for Column<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// A row: what to look up, how to label it, and how to format what is found.
#[derive(Debug, Clone)]
pub struct Row {
    pub key: Key,
    pub label: String,
    pub formatter: Formatter,
}

impl Row {
    /// Create a row with an explicit formatter
    pub fn new(key: impl Into<Key>, label: impl Into<String>, formatter: Formatter) -> Self {
        Row {
            key: key.into(),
            label: label.into(),
            formatter,
        }
    }

    /// Create a row using the default formatter
    pub fn plain(key: impl Into<Key>, label: impl Into<String>) -> Self {
        Row::new(key, label, Formatter::default())
    }

    /// A row that never matches any column, e.g. a section heading
    pub fn spacer(label: impl Into<String>) -> Self {
        Row::new(Key::Null, label, Formatter::default())
    }
}
