//! Serializable journal configuration.
//!
//! Every field has a default, so an empty TOML file (or no file at all)
//! reproduces the stock behaviour: read `Trades.csv`, show the top 5 days,
//! rank every instrument, write artifacts to `journal-report/`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from loading or validating a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Complete configuration for one analysis run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct JournalConfig {
    pub input: InputConfig,
    pub aggregate: AggregateConfig,
    pub output: OutputConfig,
}

/// Where the journal comes from and how its columns are found.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    pub path: PathBuf,
    /// Single ASCII field delimiter.
    pub delimiter: char,
    /// Explicit header names. When unset the loader discovers the column.
    pub timestamp_column: Option<String>,
    pub instrument_column: Option<String>,
    pub pnl_column: Option<String>,
    pub size_column: Option<String>,
    /// Extra chrono format strings tried before the built-in ones.
    pub timestamp_formats: Vec<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("Trades.csv"),
            delimiter: ',',
            timestamp_column: None,
            instrument_column: None,
            pnl_column: None,
            size_column: None,
            timestamp_formats: Vec::new(),
        }
    }
}

impl InputConfig {
    /// The delimiter as the byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> u8 {
        // validated ASCII by JournalConfig::validate
        self.delimiter as u8
    }
}

/// Ranking sizes for the aggregator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AggregateConfig {
    /// Number of best days to keep.
    pub top_days: usize,
    /// Number of instruments to keep. `None` ranks all of them.
    pub top_instruments: Option<usize>,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            top_days: 5,
            top_instruments: None,
        }
    }
}

/// Artifact and chart output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    /// Chart canvas size in terminal cells.
    pub chart_width: u16,
    pub chart_height: u16,
    pub write_artifacts: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("journal-report"),
            chart_width: 100,
            chart_height: 30,
            write_artifacts: true,
        }
    }
}

impl JournalConfig {
    /// Load and validate a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.input.delimiter.is_ascii() {
            return Err(ConfigError::Invalid(format!(
                "delimiter must be a single ASCII character, got '{}'",
                self.input.delimiter
            )));
        }
        if self.aggregate.top_days == 0 {
            return Err(ConfigError::Invalid("top_days must be at least 1".into()));
        }
        if self.aggregate.top_instruments == Some(0) {
            return Err(ConfigError::Invalid(
                "top_instruments must be at least 1 when set".into(),
            ));
        }
        if self.output.chart_width < 20 || self.output.chart_height < 8 {
            return Err(ConfigError::Invalid(format!(
                "chart size {}x{} is too small (minimum 20x8)",
                self.output.chart_width, self.output.chart_height
            )));
        }
        Ok(())
    }
}
