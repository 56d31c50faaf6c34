//! Options controlling how a table is assembled and rendered.
//!
//! All types here are plain data and serde-friendly, so a table document can
//! carry its own options and a CLI can override them field by field.

use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use crate::error::GridtexError;

/// Horizontal alignment token used for column specs and title cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

impl Align {
    /// LaTeX column specification character
    pub fn to_char(self) -> char {
        match self {
            Align::Left => 'l',
            Align::Center => 'c',
            Align::Right => 'r',
        }
    }
}

impl FromStr for Align {
    type Err = GridtexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "l" | "left" => Ok(Align::Left),
            "c" | "center" | "centre" => Ok(Align::Center),
            "r" | "right" => Ok(Align::Right),
            _ => Err(GridtexError::InvalidOption(format!(
                "unknown alignment: {}",
                s
            ))),
        }
    }
}

/// What to do when cells of one logical row have different line counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeightPolicy {
    /// Pad shorter cells with blank lines at the bottom
    #[default]
    Pad,
    /// Reject rows where two multi-line cells disagree on height
    Strict,
}

impl FromStr for HeightPolicy {
    type Err = GridtexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pad" => Ok(HeightPolicy::Pad),
            "strict" => Ok(HeightPolicy::Strict),
            _ => Err(GridtexError::InvalidOption(format!(
                "unknown height policy: {}",
                s
            ))),
        }
    }
}

/// A super-header spanning a contiguous range of columns.
///
/// Columns are numbered from 0, where 0 is the row-label column, so data
/// columns start at 1. `end` is inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnGroup {
    pub start: usize,
    pub end: usize,
    pub label: String,
}

impl ColumnGroup {
    pub fn new(start: usize, end: usize, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }

    /// Number of columns covered (at least one, even for inverted bounds)
    pub fn span(&self) -> usize {
        self.end.saturating_sub(self.start) + 1
    }
}

impl FromStr for ColumnGroup {
    type Err = GridtexError;

    /// Parse `START-END:LABEL`, e.g. `1-2:Region`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GridtexError::InvalidOption(format!("invalid column group: {}", s));

        let (range, label) = s.split_once(':').ok_or_else(invalid)?;
        let (start, end) = match range.split_once('-') {
            Some((start, end)) => (start, end),
            None => (range, range),
        };
        let start = start.trim().parse::<usize>().map_err(|_| invalid())?;
        let end = end.trim().parse::<usize>().map_err(|_| invalid())?;

        Ok(ColumnGroup::new(start, end, label))
    }
}

/// Table assembly options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Label of the row-label column in the title row
    pub row_header: Option<String>,
    /// Swap rows and columns before line expansion
    pub transpose: bool,
    /// Logical row counts after which a `\midrule` is placed
    pub midrules: Vec<usize>,
    /// Alignment of title-row cells
    pub title_align: Align,
    /// Column super-headers
    pub groups: Vec<ColumnGroup>,
    /// Explicit tabular column spec; `l` plus one `r` per data column when unset
    pub column_align: Option<String>,
    /// Notes printed under the closing rule; a single string is accepted
    #[serde(deserialize_with = "one_or_many")]
    pub footnotes: Vec<String>,
    /// Pad every column to a common width in the emitted source
    pub pad_columns: bool,
    /// Ragged multi-line cell handling
    pub height_policy: HeightPolicy,
}

/// Accept either `"text"` or `["text", ...]`
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(text) => vec![text],
        OneOrMany::Many(texts) => texts,
    })
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            row_header: None,
            transpose: false,
            midrules: Vec::new(),
            title_align: Align::Center,
            groups: Vec::new(),
            column_align: None,
            footnotes: Vec::new(),
            pad_columns: true,
            height_policy: HeightPolicy::Pad,
        }
    }
}

impl TableOptions {
    /// Create new options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the row-label column header
    pub fn row_header(mut self, label: impl Into<String>) -> Self {
        self.row_header = Some(label.into());
        self
    }

    /// Enable or disable transposition
    pub fn transpose(mut self, transpose: bool) -> Self {
        self.transpose = transpose;
        self
    }

    /// Add a section rule after the first `index` logical rows
    pub fn midrule(mut self, index: usize) -> Self {
        self.midrules.push(index);
        self
    }

    /// Replace all section rules
    pub fn midrules(mut self, indices: Vec<usize>) -> Self {
        self.midrules = indices;
        self
    }

    /// Set title-row alignment
    pub fn title_align(mut self, align: Align) -> Self {
        self.title_align = align;
        self
    }

    /// Add a column group
    pub fn group(mut self, group: ColumnGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// Set an explicit column spec
    pub fn column_align(mut self, spec: impl Into<String>) -> Self {
        self.column_align = Some(spec.into());
        self
    }

    /// Add a footnote row
    pub fn footnote(mut self, text: impl Into<String>) -> Self {
        self.footnotes.push(text.into());
        self
    }

    /// Enable or disable column padding
    pub fn pad_columns(mut self, pad: bool) -> Self {
        self.pad_columns = pad;
        self
    }

    /// Set the height policy
    pub fn height_policy(mut self, policy: HeightPolicy) -> Self {
        self.height_policy = policy;
        self
    }
}
