//! Trade record loading from a delimited journal export.
//!
//! Reads the whole file once, discovers the column layout from the header,
//! and parses every data row into a [`TradeRecord`]. The policy for bad
//! rows is skip-and-count:
//! 1. Row parses → kept, in file order
//! 2. Timestamp or P/L unusable → skipped, one [`RowParseWarning`] recorded
//! 3. Nothing usable at all → [`LoadError::NoValidRows`]
//!
//! Optional columns (size, prices, side, entry time) never cause a skip;
//! an unreadable optional cell is simply left empty on the record.

pub mod columns;
pub mod parse;

use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::InputConfig;
use crate::domain::{TradeRecord, UNKNOWN_INSTRUMENT};

pub use columns::{ColumnAssignment, ColumnMap, ColumnOverrides, ColumnRole};
pub use parse::{parse_money, parse_number, parse_timestamp};

/// Fatal errors from the loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("input file not found: {}", .path.display())]
    MissingInput { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("input has no header row")]
    MissingHeader,

    #[error("no {role} column found in header [{headers}]")]
    MissingColumn { role: ColumnRole, headers: String },

    #[error("configured {role} column '{name}' is not in the header")]
    UnknownColumn { role: ColumnRole, name: String },

    #[error("no valid trade rows ({skipped} of {total} rows skipped)")]
    NoValidRows { total: usize, skipped: usize },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl LoadError {
    /// True for every error that means "the file exists but is unusable".
    pub fn is_malformed(&self) -> bool {
        !matches!(self, LoadError::MissingInput { .. } | LoadError::Io { .. })
    }
}

/// Why a single row was skipped.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RowIssue {
    #[error("missing timestamp")]
    MissingTimestamp,

    #[error("unparseable timestamp '{0}'")]
    InvalidTimestamp(String),

    #[error("missing profit/loss")]
    MissingPnl,

    #[error("unparseable profit/loss '{0}'")]
    InvalidPnl(String),

    #[error("malformed record: {0}")]
    Malformed(String),
}

/// A recoverable per-row problem: the row is excluded and counted once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowParseWarning {
    /// 1-based line in the source file.
    pub line: u64,
    pub issue: RowIssue,
}

/// Empty-cell count for one header column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnNulls {
    pub column: String,
    pub empty: usize,
}

/// What the loader learned about the file's layout and completeness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub headers: Vec<String>,
    pub assignments: Vec<ColumnAssignment>,
    /// Data rows seen, including skipped ones.
    pub total_rows: usize,
    pub empty_cells: Vec<ColumnNulls>,
}

/// Options controlling how the journal is parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOptions {
    pub delimiter: u8,
    pub overrides: ColumnOverrides,
    pub timestamp_formats: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self::from(&InputConfig::default())
    }
}

impl From<&InputConfig> for LoadOptions {
    fn from(input: &InputConfig) -> Self {
        Self {
            delimiter: input.delimiter_byte(),
            overrides: ColumnOverrides {
                timestamp: input.timestamp_column.clone(),
                instrument: input.instrument_column.clone(),
                profit_loss: input.pnl_column.clone(),
                size: input.size_column.clone(),
            },
            timestamp_formats: input.timestamp_formats.clone(),
        }
    }
}

/// Result of loading a journal: valid records plus provenance.
#[derive(Debug, Clone)]
pub struct LoadedJournal {
    /// Path the data came from, when loaded from disk.
    pub source: Option<PathBuf>,
    /// Valid records in file order.
    pub records: Vec<TradeRecord>,
    /// One entry per skipped row, in file order.
    pub skipped: Vec<RowParseWarning>,
    pub columns: ColumnSummary,
    /// BLAKE3 hash of the raw input bytes.
    pub dataset_hash: String,
}

impl LoadedJournal {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Load a journal export from disk.
///
/// This is the primary entry point for the pipeline.
pub fn load_trades(path: &Path, opts: &LoadOptions) -> Result<LoadedJournal, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            LoadError::MissingInput {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    info!(path = %path.display(), bytes = bytes.len(), "reading trade journal");

    let mut journal = read_trades(&bytes, opts)?;
    journal.source = Some(path.to_path_buf());
    Ok(journal)
}

/// Parse a journal from raw bytes.
pub fn read_trades(data: &[u8], opts: &LoadOptions) -> Result<LoadedJournal, LoadError> {
    let dataset_hash = blake3::hash(data).to_hex().to_string();

    let mut reader = ReaderBuilder::new()
        .delimiter(opts.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let header = reader.headers()?.clone();
    let columns = ColumnMap::discover(&header, &opts.overrides)?;
    for assignment in columns.assignments() {
        debug!(role = %assignment.role, header = %assignment.header, "column bound");
    }

    let mut empty_counts = vec![0usize; columns.headers().len()];
    let mut records = Vec::new();
    let mut skipped = Vec::new();
    let mut total_rows = 0usize;
    let mut row = StringRecord::new();

    loop {
        match reader.read_record(&mut row) {
            Ok(false) => break,
            Ok(true) => {
                total_rows += 1;
                let line = row.position().map(|p| p.line()).unwrap_or(total_rows as u64 + 1);
                for (i, count) in empty_counts.iter_mut().enumerate() {
                    if row.get(i).map_or(true, |cell| cell.trim().is_empty()) {
                        *count += 1;
                    }
                }
                match parse_row(&row, line, &columns, &opts.timestamp_formats) {
                    Ok(record) => records.push(record),
                    Err(issue) => {
                        warn!(line, %issue, "skipping row");
                        skipped.push(RowParseWarning { line, issue });
                    }
                }
            }
            Err(err) if err.is_io_error() => return Err(LoadError::Csv(err)),
            Err(err) => {
                // Undecodable rows still count toward the total.
                total_rows += 1;
                let line = err
                    .position()
                    .map(|p| p.line())
                    .unwrap_or(total_rows as u64 + 1);
                let issue = RowIssue::Malformed(err.to_string());
                warn!(line, %issue, "skipping row");
                skipped.push(RowParseWarning { line, issue });
            }
        }
    }

    if records.is_empty() {
        return Err(LoadError::NoValidRows {
            total: total_rows,
            skipped: skipped.len(),
        });
    }

    info!(
        loaded = records.len(),
        skipped = skipped.len(),
        "trade journal parsed"
    );

    let empty_cells = columns
        .headers()
        .iter()
        .zip(empty_counts)
        .map(|(column, empty)| ColumnNulls {
            column: column.clone(),
            empty,
        })
        .collect();

    Ok(LoadedJournal {
        source: None,
        records,
        skipped,
        columns: ColumnSummary {
            headers: columns.headers().to_vec(),
            assignments: columns.assignments(),
            total_rows,
            empty_cells,
        },
        dataset_hash,
    })
}

fn parse_row(
    row: &StringRecord,
    line: u64,
    columns: &ColumnMap,
    formats: &[String],
) -> Result<TradeRecord, RowIssue> {
    let cell = |idx: Option<usize>| {
        idx.and_then(|i| row.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    };

    let raw_ts = cell(Some(columns.timestamp)).ok_or(RowIssue::MissingTimestamp)?;
    let timestamp = parse_timestamp(raw_ts, formats)
        .ok_or_else(|| RowIssue::InvalidTimestamp(raw_ts.to_string()))?;

    let profit_loss = parse_money(cell(Some(columns.profit_loss)).unwrap_or(""))?;

    let instrument = cell(columns.instrument).unwrap_or(UNKNOWN_INSTRUMENT);

    let mut record = TradeRecord::new(line, timestamp, instrument, profit_loss);
    record.entry_time = cell(columns.entry_time).and_then(|s| parse_timestamp(s, formats));
    record.size = cell(columns.size).and_then(parse_number);
    record.entry_price = cell(columns.entry_price).and_then(parse_number);
    record.exit_price = cell(columns.exit_price).and_then(parse_number);
    record.side = cell(columns.side).map(str::to_string);
    Ok(record)
}
