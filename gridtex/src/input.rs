//! JSON table documents read by the CLI.
//!
//! ```json
//! {
//!   "columns": [{"label": "(1)", "data": {"educ": [0.09, 0.007], "nobs": 935}}],
//!   "rows": [
//!     {"key": "educ", "label": "Education", "format": {"kind": "stacked", "decimals": 3}},
//!     {"key": "nobs", "label": "Observations", "format": {"kind": "integer"}}
//!   ],
//!   "options": {"midrules": [1]}
//! }
//! ```

use std::collections::BTreeMap;

use anyhow::Context;
use gridtexlib::{Column, Formatter, Key, Row, TableOptions, Value};
use serde::Deserialize;

/// A whole table: columns, rows and optional embedded options
#[derive(Debug, Deserialize)]
pub struct TableDocument {
    pub columns: Vec<ColumnSpec>,
    pub rows: Vec<RowSpec>,
    #[serde(default)]
    pub options: TableOptions,
}

#[derive(Debug, Deserialize)]
pub struct ColumnSpec {
    pub label: String,
    #[serde(default)]
    pub data: BTreeMap<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct RowSpec {
    pub key: Key,
    /// Defaults to the key itself
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub format: FormatSpec,
}

/// Which stock formatter a row uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FormatSpec {
    Fixed {
        #[serde(default = "default_decimals")]
        decimals: usize,
    },
    Stacked {
        #[serde(default = "default_decimals")]
        decimals: usize,
    },
    Integer,
    Verbatim,
}

fn default_decimals() -> usize {
    3
}

impl Default for FormatSpec {
    fn default() -> Self {
        FormatSpec::Fixed {
            decimals: default_decimals(),
        }
    }
}

impl FormatSpec {
    pub fn formatter(self) -> Formatter {
        match self {
            FormatSpec::Fixed { decimals } => Formatter::fixed(decimals),
            FormatSpec::Stacked { decimals } => Formatter::stacked(decimals),
            FormatSpec::Integer => Formatter::integer(),
            FormatSpec::Verbatim => Formatter::verbatim(),
        }
    }
}

impl TableDocument {
    /// Parse a document from JSON text
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        serde_json::from_str(text).context("invalid table document")
    }

    /// Rows with their formatters resolved
    pub fn rows(&self) -> Vec<Row> {
        self.rows
            .iter()
            .map(|spec| {
                let label = match (&spec.label, &spec.key) {
                    (Some(label), _) => label.clone(),
                    (None, Key::Null) => String::new(),
                    (None, key) => key.to_string(),
                };
                Row::new(spec.key.clone(), label, spec.format.formatter())
            })
            .collect()
    }

    /// Columns borrowing this document's data
    pub fn columns(&self) -> Vec<Column<'_>> {
        self.columns
            .iter()
            .map(|spec| Column::new(spec.label.clone(), &spec.data))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "columns": [
            {"label": "(1)", "data": {"educ": [0.09, 0.007], "nobs": 935}},
            {"label": "(2)", "data": {"educ": [0.12, 0.018]}}
        ],
        "rows": [
            {"key": "educ", "label": "Education", "format": {"kind": "stacked"}},
            {"key": null, "label": "Fit"},
            {"key": "nobs", "format": {"kind": "integer"}}
        ],
        "options": {"midrules": [1], "row_header": "Variable"}
    }"#;

    #[test]
    fn test_parse_document() {
        let doc = TableDocument::parse(DOC).unwrap();
        assert_eq!(doc.columns.len(), 2);
        assert_eq!(doc.rows.len(), 3);
        assert_eq!(doc.rows[0].format, FormatSpec::Stacked { decimals: 3 });
        assert_eq!(doc.rows[1].key, Key::Null);
        assert_eq!(doc.rows[2].format, FormatSpec::Integer);
        assert_eq!(doc.options.midrules, vec![1]);
        assert_eq!(doc.options.row_header.as_deref(), Some("Variable"));
    }

    #[test]
    fn test_rows_default_label_to_key() {
        let doc = TableDocument::parse(DOC).unwrap();
        let rows = doc.rows();
        assert_eq!(rows[0].label, "Education");
        assert_eq!(rows[1].label, "Fit");
        assert_eq!(rows[2].label, "nobs");
    }

    #[test]
    fn test_default_format_is_fixed() {
        let spec: RowSpec = serde_json::from_str(r#"{"key": "x"}"#).unwrap();
        assert_eq!(spec.format, FormatSpec::Fixed { decimals: 3 });
    }

    #[test]
    fn test_rejects_unknown_format() {
        let text = r#"{"columns": [], "rows": [{"key": "x", "format": {"kind": "roman"}}]}"#;
        assert!(TableDocument::parse(text).is_err());
    }

    #[test]
    fn test_single_footnote_string() {
        let text = r#"{
            "columns": [{"label": "(1)", "data": {"nobs": 935}}],
            "rows": [{"key": "nobs", "format": {"kind": "integer"}}],
            "options": {"footnotes": "Robust standard errors."}
        }"#;
        let doc = TableDocument::parse(text).unwrap();
        assert_eq!(doc.options.footnotes, vec!["Robust standard errors.".to_string()]);

        let latex = gridtexlib::render_table(&doc.rows(), &doc.columns(), &doc.options).unwrap();
        assert!(latex.contains("\\multicolumn{2}{l}{Robust standard errors.} \\\\"));
    }

    #[test]
    fn test_document_renders() {
        let doc = TableDocument::parse(DOC).unwrap();
        let rows = doc.rows();
        let columns = doc.columns();
        let latex =
            gridtexlib::render_table(&rows, &columns, &doc.options.clone().pad_columns(false))
                .unwrap();

        assert!(latex.contains("Education & 0.090 & 0.120 \\\\"));
        assert!(latex.contains(" & (0.007) & (0.018) \\\\ \\midrule"));
        assert!(latex.contains("Fit &  &  \\\\"));
        assert!(latex.contains("nobs & 935 &  \\\\"));
    }
}
