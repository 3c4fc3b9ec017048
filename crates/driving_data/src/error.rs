//! Failure kinds raised while turning driving-log rows into training batches.
//!
//! Everything fallible in this crate returns `anyhow::Result`; these variants are
//! raised into `anyhow::Error` and can be recovered with
//! `err.downcast_ref::<DataError>()`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    /// A camera frame is missing, unreadable, or not a decodable image.
    #[error("Failed to load image '{path}': {reason}")]
    ImageLoad { path: PathBuf, reason: String },

    /// A row index outside `[0, len)` was requested from the driving log.
    #[error("Row index {index} out of range for driving log with {len} rows")]
    RowIndexOutOfRange { index: usize, len: usize },

    /// A driving-log line has the wrong number of columns or an unparseable value.
    #[error("Malformed driving log row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },
}

impl DataError {
    pub fn image_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::ImageLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
