//! Main harvester service that ties all components together.

use std::path::PathBuf;
use std::time::Duration;

use console::style;

use crate::collector::Collector;
use crate::config::HarvestConfig;
use crate::error::Result;
use crate::http::{Fetch, HttpFetcher};
use crate::merge::merge_partitions;
use crate::pacing::{FixedDelay, RateLimiter};
use crate::sources::{default_sources, validate_source, Partitioning, Source};
use crate::store::Store;

/// What one source's pipeline produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSummary {
    pub source: &'static str,

    /// Laws in the final dataset.
    pub laws: usize,

    /// Partitions crawled during this run.
    pub partitions_fetched: usize,

    /// Partitions whose checkpoint file already existed.
    pub partitions_skipped: usize,

    /// Final dataset file.
    pub path: PathBuf,
}

/// Runs source pipelines against one output directory.
pub struct Harvester<'a> {
    fetcher: &'a dyn Fetch,
    limiter: &'a dyn RateLimiter,
    store: Store,
    law_delay: Option<Duration>,
}

impl<'a> Harvester<'a> {
    pub fn new(fetcher: &'a dyn Fetch, limiter: &'a dyn RateLimiter, store: Store) -> Self {
        Self {
            fetcher,
            limiter,
            store,
            law_delay: None,
        }
    }

    /// Override the per-law pause of sources that pace per law.
    pub fn with_law_delay(mut self, law_delay: Option<Duration>) -> Self {
        self.law_delay = law_delay;
        self
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Run the sources in the given order.
    ///
    /// A failing source aborts the run; datasets of sources that already
    /// finished stay on disk.
    pub fn run(&self, sources: &[Box<dyn Source>]) -> Result<Vec<SourceSummary>> {
        sources
            .iter()
            .map(|source| self.harvest_source(source.as_ref()))
            .collect()
    }

    /// Run one source's full pipeline and write its dataset.
    pub fn harvest_source(&self, source: &dyn Source) -> Result<SourceSummary> {
        let name = source.name();
        println!("{} {} ..", style("Harvesting").bold(), style(name).cyan());

        std::fs::create_dir_all(self.store.root())?;
        let collector = Collector::new(source, self.fetcher, self.limiter, &self.store)
            .with_law_delay(self.law_delay);
        let path = self.store.dataset_path(name);

        match source.partitioning() {
            Partitioning::ByToken(tokens) => {
                let collected = collector.run()?;
                let dataset = merge_partitions(&self.store, name, tokens)?;
                Ok(SourceSummary {
                    source: name,
                    laws: dataset.len(),
                    partitions_fetched: collected.fetched,
                    partitions_skipped: collected.skipped,
                    path,
                })
            }
            Partitioning::Single => {
                let dataset = collector.collect_partition("")?;
                self.store.write(&path, &dataset)?;
                tracing::info!(source = name, laws = dataset.len(), "Dataset written");
                Ok(SourceSummary {
                    source: name,
                    laws: dataset.len(),
                    partitions_fetched: 1,
                    partitions_skipped: 0,
                    path,
                })
            }
        }
    }
}

/// Harvest the configured sources over HTTP, pausing between requests.
pub fn harvest(config: &HarvestConfig) -> Result<Vec<SourceSummary>> {
    for name in &config.sources {
        validate_source(name)?;
    }

    let fetcher = HttpFetcher::new()?;
    let store = Store::new(config.output_dir.clone()).with_pretty(config.pretty);
    let harvester = Harvester::new(&fetcher, &FixedDelay, store).with_law_delay(config.law_delay);

    let sources: Vec<Box<dyn Source>> = default_sources()
        .into_iter()
        .filter(|source| config.includes(source.name()))
        .collect();

    harvester.run(&sources)
}
