//! Error types for gridtexlib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while assembling or writing a table
#[derive(Error, Debug)]
pub enum GridtexError {
    /// A formatter returned something other than text or a list of text
    #[error("formatter for row '{row}' in column '{column}' broke its contract: {detail}")]
    FormattingContractViolation {
        row: String,
        column: String,
        detail: String,
    },

    /// Two multi-line cells of one logical row disagree on line count
    /// (only raised under `HeightPolicy::Strict`)
    #[error(
        "cell in row '{row}', column '{column}' has {found} lines but the row expects {expected}"
    )]
    RaggedCell {
        row: String,
        column: String,
        expected: usize,
        found: usize,
    },

    /// Failed to write the rendered table to a file
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An option value could not be parsed
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
