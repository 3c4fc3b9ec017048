use crate::dataset::{DrivingLog, LogRow};
use crate::error::DataError;
use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::info;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// Reads a simulator driving log (`driving_log.csv`) into a [`DrivingLog`].
///
/// Columns are matched by position, not by header name:
/// `center, left, right, steering, throttle, brake, speed`.
/// Whitespace around every field is stripped, so the `" IMG/left_..."`
/// paths the simulator writes come out clean.
///
/// # Example
/// ```ignore
/// let log = DrivingLogReader::new("data/driving_log.csv")
///     .has_headers(true)
///     .read()?;
/// println!("{} rows", log.len());
/// ```
#[derive(Debug, Clone)]
pub struct DrivingLogReader {
    path: PathBuf,
    has_headers: bool,
}

impl DrivingLogReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            has_headers: false,
        }
    }

    /// Whether the first line is a header row to skip. Defaults to `false`.
    pub fn has_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    /// Reads every row of the file. Fails on the first malformed line.
    pub fn read(&self) -> Result<DrivingLog> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open driving log: {}", self.path.display()))?;
        let log = Self::read_from(file, self.has_headers)
            .with_context(|| format!("Failed to read driving log: {}", self.path.display()))?
            .with_source(&self.path);

        info!(
            "Loaded {} driving log rows from {}",
            log.len(),
            self.path.display()
        );
        Ok(log)
    }

    /// Parses rows from any reader.
    pub fn read_from<R: Read>(reader: R, has_headers: bool) -> Result<DrivingLog> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(has_headers)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();
        for (i, record) in csv_reader.records().enumerate() {
            let fallback_line = i as u64 + 1 + has_headers as u64;
            let record = record.map_err(|e| DataError::MalformedRow {
                line: e.position().map_or(fallback_line, |p| p.line()),
                reason: e.to_string(),
            })?;
            rows.push(parse_row(&record, fallback_line)?);
        }
        Ok(DrivingLog::new(rows))
    }
}

fn parse_row(record: &StringRecord, fallback_line: u64) -> Result<LogRow> {
    let line = record.position().map_or(fallback_line, |p| p.line());

    if record.len() != LogRow::NUM_COLUMNS {
        return Err(DataError::MalformedRow {
            line,
            reason: format!(
                "expected {} columns, found {}",
                LogRow::NUM_COLUMNS,
                record.len()
            ),
        }
        .into());
    }

    record
        .deserialize::<LogRow>(None)
        .map_err(|e| {
            DataError::MalformedRow {
                line,
                reason: e.to_string(),
            }
            .into()
        })
}
