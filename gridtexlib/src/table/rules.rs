//! Placement of section rules (`\midrule`) in the physical row sequence.
//!
//! Callers count in logical rows: rule `m` goes after the first `m` body
//! rows. Once multi-line cells are expanded, that boundary has to be found
//! again in physical rows, which is what [`map_separators`] does.

use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Resolve logical rule positions into physical line offsets.
///
/// `heights[0]` is the title row, `heights[1..]` the body rows. The
/// returned offsets index the emitted row lines, counting from the first
/// header line: when a group header is present it occupies offset 0 and
/// every grid row moves down by one. An offset means "append a rule to this
/// line".
///
/// The title row always gets a rule. Duplicate positions collapse into one
/// rule. A rule after the last body row is dropped since the closing rule
/// follows anyway; positions past the end are dropped with a warning.
pub fn map_separators(midrules: &[usize], heights: &[usize], grouped: bool) -> BTreeSet<usize> {
    let shift = usize::from(grouped);
    let mut offsets = BTreeSet::new();

    let Some((&title_height, body)) = heights.split_first() else {
        return offsets;
    };

    // ends[m] = physical rows used by the title and the first m body rows
    let mut ends = Vec::with_capacity(body.len() + 1);
    ends.push(title_height);
    for &height in body {
        let last = ends[ends.len() - 1];
        ends.push(last + height);
    }

    offsets.insert((shift + title_height).saturating_sub(1));

    for &m in midrules {
        if m > body.len() {
            warn!(
                index = m,
                rows = body.len(),
                "ignoring midrule past the last row"
            );
            continue;
        }
        if m == body.len() && m > 0 {
            debug!(index = m, "midrule after the last row merges into bottom rule");
            continue;
        }
        offsets.insert((shift + ends[m]).saturating_sub(1));
    }

    offsets
}
