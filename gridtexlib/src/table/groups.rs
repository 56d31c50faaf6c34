//! Column super-headers with partial rules underneath.

use serde::Serialize;

use super::render::{FIELD_SEP, ROW_END};
use crate::options::ColumnGroup;

/// The header line of group labels and the `\cmidrule` line below it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupHeader {
    pub line: String,
    pub rules: String,
}

/// Lay out group labels over columns `0..=num_data_columns`.
///
/// Column 0 is the row-label column. A position where a group starts gets
/// a `\multicolumn` spanning the group; any other position gets a blank
/// cell. Groups must be sorted left to right and must not overlap; this is
/// not checked, and bad input yields odd-looking but well-formed output.
pub fn build_group_header(num_data_columns: usize, groups: &[ColumnGroup]) -> GroupHeader {
    let mut cells = Vec::new();
    let mut pos = 0;

    while pos <= num_data_columns {
        match groups.iter().find(|group| group.start == pos) {
            Some(group) => {
                cells.push(format!(
                    "\\multicolumn{{{}}}{{c}}{{{}}}",
                    group.span(),
                    group.label
                ));
                pos = (group.end + 1).max(pos + 1);
            }
            None => {
                cells.push(String::new());
                pos += 1;
            }
        }
    }

    let line = format!("{}{}", cells.join(FIELD_SEP), ROW_END);
    let rules = groups
        .iter()
        .map(|group| format!("\\cmidrule(lr){{{}-{}}}", group.start + 1, group.end + 1))
        .collect::<Vec<_>>()
        .join(" ");

    GroupHeader { line, rules }
}
