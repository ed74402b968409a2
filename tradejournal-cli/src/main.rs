//! Trade Journal CLI: analyze a CSV export of closed trades.
//!
//! Pipeline: load `Trades.csv` (or the given file), aggregate, print the
//! console summary, write charts and reports to `journal-report/`, and
//! optionally open the interactive chart viewer (`--view`).

mod cli;
mod logging;
mod pipeline;
mod view;

use std::io;

use anyhow::Result;
use clap::Parser;

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = cli.resolve_config()?;
    let outcome = pipeline::run(&config, &mut io::stdout().lock())?;

    if let Some(artifacts) = &outcome.artifacts {
        println!("\nArtifacts written to {}:", config.output.dir.display());
        for path in artifacts.all() {
            println!("  {}", path.display());
        }
    }

    if cli.view {
        view::run(&outcome.aggregate)?;
    }

    Ok(())
}
