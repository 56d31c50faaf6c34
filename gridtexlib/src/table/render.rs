//! Serialize an expanded grid into a booktabs `tabular`.

use std::collections::BTreeSet;

use super::grid::RectGrid;
use super::groups::GroupHeader;

pub const FIELD_SEP: &str = " & ";
pub const ROW_END: &str = " \\\\";
pub const TOP_RULE: &str = "\\toprule";
pub const MID_RULE: &str = "\\midrule";
pub const BOTTOM_RULE: &str = "\\bottomrule";

/// Assemble the final LaTeX source.
///
/// `rules` holds line offsets as produced by
/// [`map_separators`](super::rules::map_separators): offset 0 is the group
/// header when one is given, otherwise the first grid row. Lines are joined
/// with `\n` and there is no trailing newline.
pub fn serialize(
    grid: &RectGrid,
    rules: &BTreeSet<usize>,
    group_header: Option<&GroupHeader>,
    footnotes: &[String],
    column_spec: &str,
) -> String {
    let num_columns = grid.first().map(Vec::len).unwrap_or(0);
    let mut lines = Vec::with_capacity(grid.len() + footnotes.len() + 6);

    lines.push(format!("\\begin{{tabular}}{{{}}}", column_spec));
    lines.push(TOP_RULE.to_string());

    let mut offset = 0;
    if let Some(header) = group_header {
        lines.push(header.line.clone());
        if !header.rules.is_empty() {
            lines.push(header.rules.clone());
        }
        offset = 1;
    }

    for (idx, row) in grid.iter().enumerate() {
        let mut line = format!("{}{}", row.join(FIELD_SEP), ROW_END);
        if rules.contains(&(idx + offset)) {
            line.push(' ');
            line.push_str(MID_RULE);
        }
        lines.push(line);
    }

    lines.push(BOTTOM_RULE.to_string());
    for note in footnotes {
        lines.push(format!(
            "\\multicolumn{{{}}}{{l}}{{{}}}{}",
            num_columns, note, ROW_END
        ));
    }
    lines.push("\\end{tabular}".to_string());

    lines.join("\n")
}

/// `l` for the row-label column, `r` for every data column.
pub fn default_column_spec(num_data_columns: usize) -> String {
    let mut spec = String::with_capacity(num_data_columns + 1);
    spec.push('l');
    spec.push_str(&"r".repeat(num_data_columns));
    spec
}
