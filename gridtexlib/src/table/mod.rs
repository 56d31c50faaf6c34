//! Table assembly: from rows and columns to LaTeX.
//!
//! The pipeline runs in fixed order:
//!
//! 1. **Grid**: resolve every (row, column) pair into a cell of one or more
//!    lines and prepend the title row ([`RaggedGrid::build`])
//! 2. **Transpose**: optionally swap axes while cells are still whole
//! 3. **Expand**: flatten multi-line cells into physical rows
//! 4. **Rules**: map logical `\midrule` positions to physical rows
//! 5. **Groups**: lay out column super-headers
//! 6. **Render**: align, pad and serialize ([`Table::to_latex`])
//!
//! Steps 1-5 run in [`Table::build`] and are the only ones that can fail.
//! The resulting [`Table`] is plain data and renders infallibly.
//!
//! ## Example
//!
//! ```rust
//! use gridtexlib::{Column, Formatter, Row, Table, TableOptions, Value};
//! use std::collections::BTreeMap;
//!
//! let mut a = BTreeMap::new();
//! a.insert("x".to_string(), Value::Float(1.0));
//! let b: BTreeMap<String, Value> = BTreeMap::new();
//!
//! let columns = [Column::new("A", &a), Column::new("B", &b)];
//! let rows = [Row::new("x", "Intercept", Formatter::fixed(3))];
//!
//! let table = Table::build(&rows, &columns, &TableOptions::new().pad_columns(false)).unwrap();
//! assert_eq!(table.grid[1], vec!["Intercept", "1.000", ""]);
//! assert!(table.to_latex().contains("Intercept & 1.000 &  \\\\"));
//! ```

pub mod align;
pub mod cell;
pub mod grid;
pub mod groups;
pub mod render;
pub mod rules;

use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

pub use cell::Cell;
pub use grid::{RaggedGrid, RectGrid};
pub use groups::GroupHeader;

use crate::model::{Column, Row};
use crate::options::{Align, TableOptions};
use crate::Result;

/// An assembled table, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    /// Physical rows, title row first, cells unpadded
    pub grid: RectGrid,
    /// Physical height of each logical row, title row first
    pub heights: Vec<usize>,
    /// Line offsets that carry a `\midrule`
    pub rules: BTreeSet<usize>,
    /// Group header block, if column groups were requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_header: Option<GroupHeader>,
    /// Tabular column spec
    pub column_spec: String,
    /// Footnote rows below the closing rule
    pub footnotes: Vec<String>,
    pub title_align: Align,
    pub pad_columns: bool,
}

impl Table {
    /// Run the fallible part of the pipeline.
    pub fn build(rows: &[Row], columns: &[Column<'_>], options: &TableOptions) -> Result<Self> {
        let mut ragged = RaggedGrid::build(rows, columns, options.row_header.as_deref())?;
        if options.transpose {
            ragged = ragged.transpose();
            debug!("transposed grid");
        }

        let heights = ragged.heights(options.height_policy)?;
        let grid = ragged.expand(&heights);
        let num_data_columns = ragged.width().saturating_sub(1);

        let group_header = if options.groups.is_empty() {
            None
        } else {
            Some(groups::build_group_header(num_data_columns, &options.groups))
        };
        let rules = rules::map_separators(&options.midrules, &heights, group_header.is_some());

        let column_spec = options
            .column_align
            .clone()
            .unwrap_or_else(|| render::default_column_spec(num_data_columns));

        debug!(
            physical_rows = grid.len(),
            logical_rows = heights.len(),
            rules = rules.len(),
            "assembled table"
        );

        Ok(Table {
            grid,
            heights,
            rules,
            group_header,
            column_spec,
            footnotes: options.footnotes.clone(),
            title_align: options.title_align,
            pad_columns: options.pad_columns,
        })
    }

    /// Number of columns, row-label column included
    pub fn num_columns(&self) -> usize {
        self.grid.first().map(Vec::len).unwrap_or(0)
    }

    /// Render as LaTeX source.
    pub fn to_latex(&self) -> String {
        let aligned = align::normalize(self.grid.clone(), self.title_align, self.pad_columns);
        render::serialize(
            &aligned,
            &self.rules,
            self.group_header.as_ref(),
            &self.footnotes,
            &self.column_spec,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridtexError;
    use crate::format::Formatter;
    use crate::options::{ColumnGroup, HeightPolicy};
    use crate::source::Value;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    type Data = BTreeMap<String, Value>;

    fn data(entries: &[(&str, Value)]) -> Data {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn unpadded() -> TableOptions {
        TableOptions::new().pad_columns(false)
    }

    #[test]
    fn test_key_present_in_one_column_only() {
        let a = data(&[("x", Value::Float(1.0))]);
        let b = data(&[]);
        let columns = [Column::new("A", &a), Column::new("B", &b)];
        let rows = [Row::plain("x", "X")];

        let table = Table::build(&rows, &columns, &unpadded()).unwrap();
        assert_eq!(table.grid[1], vec!["X", "1.000", ""]);
    }

    #[test]
    fn test_multiline_cell_expands_row() {
        let a = data(&[("k", Value::List(vec!["x".into(), "y".into()]))]);
        let b = data(&[("k", Value::Text("z".into()))]);
        let columns = [Column::new("A", &a), Column::new("B", &b)];
        let rows = [Row::new("k", "K", Formatter::verbatim())];

        let table = Table::build(&rows, &columns, &unpadded()).unwrap();
        assert_eq!(table.heights, vec![1, 2]);
        assert_eq!(table.grid[1], vec!["K", "x", "z"]);
        assert_eq!(table.grid[2], vec!["", "y", ""]);
    }

    #[test]
    fn test_midrule_after_first_row() {
        let a = data(&[
            ("r1", Value::Text("1".into())),
            ("r2", Value::List(vec!["2".into(), "3".into()])),
        ]);
        let columns = [Column::new("A", &a)];
        let rows = [
            Row::new("r1", "R1", Formatter::verbatim()),
            Row::new("r2", "R2", Formatter::verbatim()),
        ];

        let table = Table::build(&rows, &columns, &unpadded().midrule(1)).unwrap();
        let expected = [
            "\\begin{tabular}{lr}",
            "\\toprule",
            "\\multicolumn{1}{c}{} & \\multicolumn{1}{c}{A} \\\\ \\midrule",
            "R1 & 1 \\\\ \\midrule",
            "R2 & 2 \\\\",
            " & 3 \\\\",
            "\\bottomrule",
            "\\end{tabular}",
        ]
        .join("\n");
        assert_eq!(table.to_latex(), expected);
    }

    #[test]
    fn test_repeated_midrule_emitted_once() {
        let a = data(&[("r1", Value::Int(1)), ("r2", Value::Int(2))]);
        let columns = [Column::new("A", &a)];
        let rows = [Row::plain("r1", "R1"), Row::plain("r2", "R2")];

        let table = Table::build(&rows, &columns, &unpadded().midrules(vec![1, 1])).unwrap();
        assert_eq!(table.to_latex().matches("\\midrule").count(), 2);
    }

    #[test]
    fn test_grouped_header() {
        let a = data(&[("x", Value::Int(1))]);
        let columns = [
            Column::new("(1)", &a),
            Column::new("(2)", &a),
            Column::new("(3)", &a),
        ];
        let rows = [Row::new("x", "X", Formatter::integer())];

        let options = unpadded().group(ColumnGroup::new(1, 2, "Region"));
        let table = Table::build(&rows, &columns, &options).unwrap();
        let latex = table.to_latex();
        let lines: Vec<&str> = latex.lines().collect();

        assert_eq!(lines[2], " & \\multicolumn{2}{c}{Region} &  \\\\");
        assert_eq!(lines[3], "\\cmidrule(lr){2-3}");
        assert!(lines[4].ends_with("\\\\ \\midrule"));
        assert_eq!(table.rules, BTreeSet::from([1]));
    }

    #[test]
    fn test_transpose_swaps_labels() {
        let a = data(&[("r1", Value::Text("a1".into())), ("r2", Value::Text("a2".into()))]);
        let b = data(&[("r1", Value::Text("b1".into())), ("r2", Value::Text("b2".into()))]);
        let columns = [Column::new("A", &a), Column::new("B", &b)];
        let rows = [
            Row::new("r1", "R1", Formatter::verbatim()),
            Row::new("r2", "R2", Formatter::verbatim()),
        ];

        let plain = Table::build(&rows, &columns, &unpadded()).unwrap();
        let swapped = Table::build(&rows, &columns, &unpadded().transpose(true)).unwrap();

        assert_eq!(swapped.grid[0], vec!["", "R1", "R2"]);
        assert_eq!(swapped.grid[1], vec!["A", "a1", "a2"]);
        assert_eq!(swapped.grid[2], vec!["B", "b1", "b2"]);
        for i in 1..3 {
            for j in 1..3 {
                assert_eq!(plain.grid[i][j], swapped.grid[j][i]);
            }
        }
    }

    #[test]
    fn test_transposed_column_spec_follows_new_width() {
        let a = data(&[("x", Value::Int(1))]);
        let columns = [Column::new("A", &a)];
        let rows = [Row::plain("x", "X"), Row::plain("y", "Y"), Row::plain("z", "Z")];

        let table = Table::build(&rows, &columns, &unpadded().transpose(true)).unwrap();
        assert_eq!(table.column_spec, "lrrr");
        assert_eq!(table.num_columns(), 4);
    }

    #[test]
    fn test_transpose_with_groups_and_midrule() {
        let a = data(&[("r1", Value::Int(1)), ("r2", Value::Int(2)), ("r3", Value::Int(3))]);
        let b = data(&[("r1", Value::Int(4)), ("r3", Value::Int(6))]);
        let columns = [Column::new("A", &a), Column::new("B", &b)];
        let rows = [
            Row::new("r1", "R1", Formatter::integer()),
            Row::new("r2", "R2", Formatter::integer()),
            Row::new("r3", "R3", Formatter::integer()),
        ];

        let options = unpadded()
            .transpose(true)
            .group(ColumnGroup::new(1, 3, "Rows"))
            .midrule(1);
        let table = Table::build(&rows, &columns, &options).unwrap();
        assert_eq!(table.rules, BTreeSet::from([1, 2]));

        let latex = table.to_latex();
        let lines: Vec<&str> = latex.lines().collect();
        assert_eq!(lines[0], "\\begin{tabular}{lrrr}");
        assert_eq!(lines[2], " & \\multicolumn{3}{c}{Rows} \\\\");
        assert_eq!(lines[3], "\\cmidrule(lr){2-4}");
        assert!(lines[4].ends_with("\\\\ \\midrule"));
        assert_eq!(lines[5], "A & 1 & 2 & 3 \\\\ \\midrule");
        assert_eq!(lines[6], "B & 4 &  & 6 \\\\");
    }

    #[test]
    fn test_footnote_after_bottom_rule() {
        let a = data(&[("x", Value::Int(1))]);
        let columns = [Column::new("A", &a), Column::new("B", &a)];
        let rows = [Row::plain("x", "X")];

        let table = Table::build(&rows, &columns, &unpadded().footnote("Note.")).unwrap();
        let latex = table.to_latex();
        let lines: Vec<&str> = latex.lines().collect();
        let n = lines.len();

        assert_eq!(lines[n - 3], "\\bottomrule");
        assert_eq!(lines[n - 2], "\\multicolumn{3}{l}{Note.} \\\\");
        assert_eq!(lines[n - 1], "\\end{tabular}");
    }

    #[test]
    fn test_padding_aligns_separators() {
        let a = data(&[("x", Value::Float(1234.5)), ("y", Value::Float(1.0))]);
        let columns = [Column::new("A", &a)];
        let rows = [Row::plain("x", "Long label"), Row::plain("y", "Y")];

        let table = Table::build(&rows, &columns, &TableOptions::new()).unwrap();
        let latex = table.to_latex();
        let body: Vec<&str> = latex
            .lines()
            .filter(|line| line.contains(" & "))
            .collect();

        let positions: Vec<usize> = body.iter().filter_map(|line| line.find(" & ")).collect();
        assert_eq!(positions.len(), 3);
        assert!(positions.iter().all(|&p| p == positions[0]));
    }

    #[test]
    fn test_formatter_violation_aborts_build() {
        let a = data(&[("x", Value::Int(1))]);
        let columns = [Column::new("A", &a)];
        let rows = [
            Row::plain("x", "Fine"),
            Row::new("x", "Broken", Formatter::new(|_| Value::Float(0.0))),
        ];

        let err = Table::build(&rows, &columns, &TableOptions::new()).unwrap_err();
        assert!(matches!(
            err,
            GridtexError::FormattingContractViolation { ref row, .. } if row == "Broken"
        ));
    }

    #[test]
    fn test_strict_height_policy() {
        let a = data(&[("x", Value::List(vec!["1".into(), "2".into()]))]);
        let b = data(&[("x", Value::List(vec!["1".into(), "2".into(), "3".into()]))]);
        let columns = [Column::new("A", &a), Column::new("B", &b)];
        let rows = [Row::new("x", "X", Formatter::verbatim())];

        let padded = Table::build(&rows, &columns, &TableOptions::new()).unwrap();
        assert_eq!(padded.heights, vec![1, 3]);

        let strict = TableOptions::new().height_policy(HeightPolicy::Strict);
        assert!(matches!(
            Table::build(&rows, &columns, &strict),
            Err(GridtexError::RaggedCell { expected: 2, found: 3, .. })
        ));
    }

    #[test]
    fn test_empty_table() {
        let table = Table::build(&[], &[], &TableOptions::new().row_header("Var")).unwrap();
        assert_eq!(table.grid, vec![vec!["Var".to_string()]]);
        assert_eq!(table.column_spec, "l");
        assert!(table.to_latex().contains("\\multicolumn{1}{c}{Var} \\\\ \\midrule"));
    }

    #[test]
    fn test_table_serializes_to_json() {
        let a = data(&[("x", Value::Int(1))]);
        let columns = [Column::new("A", &a)];
        let rows = [Row::plain("x", "X")];

        let table = Table::build(&rows, &columns, &TableOptions::new()).unwrap();
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["grid"][1][1], "1");
        assert_eq!(json["heights"], serde_json::json!([1, 1]));
        assert!(json.get("group_header").is_none());
    }
}
