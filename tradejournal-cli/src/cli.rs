//! Command-line surface and its merge into [`JournalConfig`].

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

use tradejournal_core::JournalConfig;

#[derive(Debug, Parser)]
#[command(
    name = "tradejournal",
    version,
    about = "Trade journal analyzer: cumulative, monthly, daily and per-instrument P/L"
)]
pub struct Cli {
    /// Journal export to analyze. Defaults to ./Trades.csv.
    pub input: Option<PathBuf>,

    /// TOML config file. Flags override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory for charts and reports. Defaults to ./journal-report.
    #[arg(long, short = 'o')]
    pub output_dir: Option<PathBuf>,

    /// Number of best days to rank.
    #[arg(long)]
    pub top_days: Option<usize>,

    /// Number of instruments to rank (all when omitted).
    #[arg(long)]
    pub top_instruments: Option<usize>,

    /// Field delimiter of the export.
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Open the interactive chart viewer after writing artifacts.
    #[arg(long, default_value_t = false)]
    pub view: bool,

    /// Print the console summary only; write nothing to disk.
    #[arg(long, default_value_t = false)]
    pub no_artifacts: bool,

    /// More log output on stderr (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Config file (or defaults) with flag overrides applied, validated.
    pub fn resolve_config(&self) -> Result<JournalConfig> {
        let mut config = match &self.config {
            Some(path) => JournalConfig::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => JournalConfig::default(),
        };

        if let Some(input) = &self.input {
            config.input.path = input.clone();
        }
        if let Some(delimiter) = self.delimiter {
            config.input.delimiter = delimiter;
        }
        if let Some(top_days) = self.top_days {
            config.aggregate.top_days = top_days;
        }
        if let Some(top_instruments) = self.top_instruments {
            config.aggregate.top_instruments = Some(top_instruments);
        }
        if let Some(dir) = &self.output_dir {
            config.output.dir = dir.clone();
        }
        if self.no_artifacts {
            config.output.write_artifacts = false;
        }

        config.validate()?;
        Ok(config)
    }
}
