//! Command-line interface for the harvester.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use console::style;

use crate::config::{HarvestConfig, DEFAULT_OUTPUT_DIR};
use crate::error::Result;
use crate::harvester::harvest;

/// Harvest statute names, titles and section headings from
/// gesetze-im-internet.de, dejure.org and lexparency.de.
#[derive(Parser, Debug)]
#[command(name = "gesetze-harvester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output directory for partition and dataset files
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Only harvest this source (repeatable): gesetze-im-internet, dejure, lexparency
    #[arg(short, long = "source")]
    pub sources: Vec<String>,

    /// Pause in seconds after each law's detail page (default: 2)
    #[arg(long)]
    pub delay_secs: Option<u64>,

    /// Write 4-space indented JSON
    #[arg(long)]
    pub pretty: bool,
}

impl Cli {
    pub fn config(&self) -> HarvestConfig {
        let config = HarvestConfig::default()
            .with_output_dir(self.output.clone())
            .with_pretty(self.pretty)
            .with_sources(self.sources.clone());

        match self.delay_secs {
            Some(secs) => config.with_law_delay(Duration::from_secs(secs)),
            None => config,
        }
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let summaries = harvest(&cli.config())?;

    println!();
    for summary in &summaries {
        println!(
            "{} {} laws from {} to {}",
            style("Saved").green().bold(),
            summary.laws,
            style(summary.source).cyan(),
            summary.path.display()
        );
        if summary.partitions_skipped > 0 {
            println!(
                "  {} partitions reused from a previous run",
                style(summary.partitions_skipped).yellow()
            );
        }
    }

    Ok(())
}
