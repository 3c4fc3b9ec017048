use crate::camera::Camera;
use crate::error::DataError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One record of the driving log: the three camera frames captured at the
/// same instant plus the vehicle telemetry.
///
/// Columns, in order: `center, left, right, steering, throttle, brake, speed`.
/// Only the camera paths and `steering` are consumed by the batch pipeline;
/// `throttle`, `brake` and `speed` are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRow {
    pub center: PathBuf,
    pub left: PathBuf,
    pub right: PathBuf,
    pub steering: f64,
    pub throttle: f64,
    pub brake: f64,
    pub speed: f64,
}

impl LogRow {
    /// Number of columns a driving-log line must have.
    pub const NUM_COLUMNS: usize = 7;

    /// Returns the frame path recorded for the given camera.
    pub fn camera_path(&self, camera: Camera) -> &Path {
        match camera {
            Camera::Center => &self.center,
            Camera::Left => &self.left,
            Camera::Right => &self.right,
        }
    }

    fn rebased(&self, root: &Path) -> Self {
        let rebase = |p: &PathBuf| {
            if p.is_relative() {
                root.join(p)
            } else {
                p.clone()
            }
        };
        Self {
            center: rebase(&self.center),
            left: rebase(&self.left),
            right: rebase(&self.right),
            ..self.clone()
        }
    }
}

/// The full driving log held in memory as a contiguous, reference-counted
/// slice (`Arc<[LogRow]>`).
///
/// - Cloning only bumps the `Arc` counter.
/// - Rows are immutable once loaded.
/// - Random access by row index; out-of-range lookups fail with
///   [`DataError::RowIndexOutOfRange`].
#[derive(Debug, Clone)]
pub struct DrivingLog {
    rows: Arc<[LogRow]>,
    source: Option<PathBuf>,
}

impl DrivingLog {
    /// Creates a driving log from already-parsed rows.
    pub fn new(rows: Vec<LogRow>) -> Self {
        Self {
            rows: rows.into(),
            source: None,
        }
    }

    /// Records the file the rows were read from. Chainable.
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// The file the rows were read from, if known.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Resolves every relative frame path against `root` (typically the
    /// directory holding the CSV). Absolute paths are left as they are.
    pub fn rebase(&self, root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            rows: self.rows.iter().map(|row| row.rebased(root)).collect(),
            source: self.source.clone(),
        }
    }

    /// Random-access lookup by row index.
    pub fn get(&self, index: usize) -> Result<&LogRow> {
        self.rows.get(index).ok_or_else(|| {
            DataError::RowIndexOutOfRange {
                index,
                len: self.rows.len(),
            }
            .into()
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
