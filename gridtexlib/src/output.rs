//! Where rendered tables go.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tracing::debug;

use crate::error::GridtexError;
use crate::Result;

/// Destination for rendered LaTeX.
pub enum Destination<'w> {
    /// Hand the text back to the caller
    Text,
    /// Write to an already-open stream
    Writer(&'w mut dyn Write),
    /// Create or truncate a file
    File(PathBuf),
}

/// Deliver `text` to `destination`.
///
/// Returns `Some(text)` for [`Destination::Text`] and `None` otherwise. A
/// trailing newline is added when writing to a stream or file.
pub fn emit(text: String, destination: Destination<'_>) -> Result<Option<String>> {
    match destination {
        Destination::Text => Ok(Some(text)),
        Destination::Writer(writer) => {
            writer.write_all(text.as_bytes())?;
            writer.write_all(b"\n")?;
            writer.flush()?;
            Ok(None)
        }
        Destination::File(path) => {
            fs::write(&path, format!("{}\n", text))
                .map_err(|source| GridtexError::FileWrite {
                    path: path.clone(),
                    source,
                })?;
            debug!(path = %path.display(), bytes = text.len() + 1, "wrote table");
            Ok(None)
        }
    }
}
