//! Configuration constants and run settings for the harvester.

use std::path::PathBuf;
use std::time::Duration;

/// Base URL for gesetze-im-internet.de.
pub const GESETZE_IM_INTERNET_URL: &str = "https://www.gesetze-im-internet.de";

/// Base URL for dejure.org.
pub const DEJURE_URL: &str = "https://dejure.org";

/// Base URL for lexparency.de.
pub const LEXPARENCY_URL: &str = "https://lexparency.de";

/// Pause after each law's detail page.
pub const LAW_DELAY_SECS: u64 = 2;

/// Additional pause after each completed dejure.org partition.
pub const DEJURE_PARTITION_DELAY_SECS: u64 = 3;

/// Default output directory for partition and dataset files.
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// User agent string identifying this harvester.
pub const USER_AGENT: &str = concat!("gesetze-harvester/", env!("CARGO_PKG_VERSION"));

/// Settings for one harvester run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestConfig {
    /// Directory holding `{source}.json` and `{source}/{token}.json`.
    pub output_dir: PathBuf,

    /// Override for the pause after each law's detail page.
    ///
    /// Only applies to sources that pace per law at all.
    pub law_delay: Option<Duration>,

    /// Write 4-space indented JSON instead of compact JSON.
    pub pretty: bool,

    /// Source names to run, in the fixed harvesting order. Empty means all.
    pub sources: Vec<String>,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            law_delay: None,
            pretty: false,
            sources: Vec::new(),
        }
    }
}

impl HarvestConfig {
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_law_delay(mut self, law_delay: Duration) -> Self {
        self.law_delay = Some(law_delay);
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_sources(mut self, sources: Vec<String>) -> Self {
        self.sources = sources;
        self
    }

    /// Whether the named source is selected for this run.
    pub fn includes(&self, source: &str) -> bool {
        self.sources.is_empty() || self.sources.iter().any(|s| s == source)
    }
}
