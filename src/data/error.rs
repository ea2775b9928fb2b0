use std::path::PathBuf;

use thiserror::Error;

/// Failures of the data-preparation layer.
#[derive(Debug, Error)]
pub enum PrepError {
    /// The input file is missing or unreadable.
    #[error("cannot read '{}'", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input file was read but could not be parsed.
    #[error("malformed input '{}': {detail}", path.display())]
    Malformed { path: PathBuf, detail: String },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    /// A referenced column is absent from the table.
    #[error("column '{0}' not found in table")]
    InvalidColumn(String),
}

impl PrepError {
    pub(crate) fn malformed(path: impl Into<PathBuf>, detail: impl ToString) -> Self {
        PrepError::Malformed {
            path: path.into(),
            detail: detail.to_string(),
        }
    }
}
