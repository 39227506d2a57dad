//! Checkpointed collection of one source, partition by partition.
//!
//! Every finished partition is written to `{source}/{token}.json`. A
//! partition whose file already exists and decodes is skipped, so an
//! interrupted run can be restarted and only redoes the partition it was
//! working on.

use std::path::Path;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::{HarvesterError, Result};
use crate::http::Fetch;
use crate::pacing::RateLimiter;
use crate::sources::{Partitioning, Source};
use crate::store::Store;
use crate::types::{insert_record, Dataset};

/// Outcome of collecting one source's partitions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectSummary {
    /// Partitions crawled during this run.
    pub fetched: usize,

    /// Partitions skipped because their file already existed.
    pub skipped: usize,

    /// Laws stored during this run.
    pub laws: usize,
}

/// Drives one source adapter over its partitions.
pub struct Collector<'a> {
    source: &'a dyn Source,
    fetcher: &'a dyn Fetch,
    limiter: &'a dyn RateLimiter,
    store: &'a Store,
    law_delay: Option<Duration>,
}

impl<'a> Collector<'a> {
    pub fn new(
        source: &'a dyn Source,
        fetcher: &'a dyn Fetch,
        limiter: &'a dyn RateLimiter,
        store: &'a Store,
    ) -> Self {
        Self {
            source,
            fetcher,
            limiter,
            store,
            law_delay: None,
        }
    }

    /// Override the source's per-law pause.
    pub fn with_law_delay(mut self, law_delay: Option<Duration>) -> Self {
        self.law_delay = law_delay;
        self
    }

    fn law_delay(&self) -> Duration {
        let default = self.source.law_delay();
        if default.is_zero() {
            return default;
        }
        self.law_delay.unwrap_or(default)
    }

    /// Crawl every partition that has no file yet.
    ///
    /// Single-pass sources have no partitions; for them this does nothing.
    pub fn run(&self) -> Result<CollectSummary> {
        let Partitioning::ByToken(tokens) = self.source.partitioning() else {
            return Ok(CollectSummary::default());
        };

        let name = self.source.name();
        self.store.ensure_source_dir(name)?;

        let progress = partition_progress(name, tokens.len());
        let mut summary = CollectSummary::default();

        for token in tokens {
            let path = self.store.partition_path(name, token);
            if self.is_collected(&path)? {
                tracing::debug!(source = name, token, "Partition already collected, skipping");
                summary.skipped += 1;
                progress.inc(1);
                continue;
            }

            progress.set_message(format!("partition {token}"));
            let dataset = self.collect_with(token, &progress)?;
            self.store.write(&path, &dataset)?;
            tracing::info!(source = name, token, laws = dataset.len(), "Partition collected");

            summary.fetched += 1;
            summary.laws += dataset.len();
            progress.inc(1);

            self.limiter.wait(self.source.partition_delay());
        }

        progress.finish_and_clear();
        Ok(summary)
    }

    /// Whether `path` holds a readable partition.
    ///
    /// A file that does not decode is left over from an interrupted write
    /// and gets collected again.
    fn is_collected(&self, path: &Path) -> Result<bool> {
        match self.store.read(path) {
            Ok(partition) => Ok(partition.is_some()),
            Err(HarvesterError::Dataset { path, source }) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %source,
                    "Undecodable partition file, collecting again"
                );
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// List one partition and read every law's detail page.
    ///
    /// The returned dataset is owned by the caller; nothing is written.
    pub fn collect_partition(&self, token: &str) -> Result<Dataset> {
        self.collect_with(token, &ProgressBar::hidden())
    }

    fn collect_with(&self, token: &str, progress: &ProgressBar) -> Result<Dataset> {
        let mut dataset = Dataset::new();
        let delay = self.law_delay();

        for entry in self.source.list(self.fetcher, token)? {
            progress.suspend(|| println!("{} {} ..", style("Storing").bold(), entry.law));

            let record = self.source.record(self.fetcher, entry)?;
            insert_record(&mut dataset, record);

            self.limiter.wait(delay);
        }

        Ok(dataset)
    }
}

fn partition_progress(source: &str, partitions: usize) -> ProgressBar {
    let progress = ProgressBar::new(partitions as u64);
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{prefix:.cyan} [{bar:30}] {pos}/{len} {msg}")
            .expect("valid template"),
    );
    progress.set_prefix(source.to_string());
    progress
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pacing::NoDelay;
    use crate::types::{Headings, LawEntry, LawRecord};
    use std::cell::{Cell, RefCell};
    use tempfile::TempDir;

    /// Two laws per token; `B` lists the same law twice in different case.
    struct Stub {
        fetches: Cell<usize>,
        fail_on: Option<&'static str>,
    }

    impl Stub {
        fn new() -> Self {
            Self {
                fetches: Cell::new(0),
                fail_on: None,
            }
        }
    }

    impl Fetch for Stub {
        fn fetch(&self, _url: &str) -> Result<String> {
            self.fetches.set(self.fetches.get() + 1);
            Ok(String::new())
        }
    }

    impl Source for Stub {
        fn name(&self) -> &'static str {
            "stub"
        }

        fn partitioning(&self) -> Partitioning {
            Partitioning::ByToken(&["A", "B"])
        }

        fn list(&self, fetcher: &dyn Fetch, token: &str) -> Result<Vec<LawEntry>> {
            fetcher.fetch(token)?;
            let laws = if token == "B" {
                ["BGB", "bgb"]
            } else {
                ["AO", "AktG"]
            };
            Ok(laws
                .iter()
                .map(|law| LawEntry::new(*law, law.to_lowercase(), format!("{law} title")))
                .collect())
        }

        fn record(&self, fetcher: &dyn Fetch, entry: LawEntry) -> Result<LawRecord> {
            if self.fail_on == Some(entry.law.as_str()) {
                return Err(HarvesterError::missing("td", entry.law));
            }
            fetcher.fetch(&entry.slug)?;
            Ok(LawRecord::from_entry(entry, Headings::new()))
        }

        fn partition_delay(&self) -> Duration {
            Duration::from_secs(3)
        }
    }

    #[derive(Default)]
    struct Recorder(RefCell<Vec<Duration>>);

    impl RateLimiter for Recorder {
        fn wait(&self, delay: Duration) {
            self.0.borrow_mut().push(delay);
        }
    }

    #[test]
    fn test_run_writes_one_file_per_partition() {
        let tmp = TempDir::new().unwrap();
        let store = Store::new(tmp.path());
        let stub = Stub::new();

        let summary = Collector::new(&stub, &stub, &NoDelay, &store).run().unwrap();

        assert_eq!(summary.fetched, 2);
        assert_eq!(summary.skipped, 0);
        assert!(store.partition_path("stub", "A").is_file());
        assert!(store.partition_path("stub", "B").is_file());

        let b = store.read(&store.partition_path("stub", "B")).unwrap().unwrap();
        assert_eq!(b.len(), 1);
        assert_eq!(b["bgb"].law, "bgb");
    }

    #[test]
    fn test_existing_partitions_are_skipped() {
        let tmp = TempDir::new().unwrap();
        let store = Store::new(tmp.path());
        let stub = Stub::new();
        let collector = Collector::new(&stub, &stub, &NoDelay, &store);

        collector.run().unwrap();
        let fetches = stub.fetches.get();

        let summary = collector.run().unwrap();
        assert_eq!(summary.fetched, 0);
        assert_eq!(summary.skipped, 2);
        assert_eq!(stub.fetches.get(), fetches);
    }

    #[test]
    fn test_truncated_partition_is_collected_again() {
        let tmp = TempDir::new().unwrap();
        let store = Store::new(tmp.path());
        let stub = Stub::new();
        let collector = Collector::new(&stub, &stub, &NoDelay, &store);

        collector.run().unwrap();
        let path = store.partition_path("stub", "B");
        std::fs::write(&path, r#"{"bgb":{"law":"BG"#).unwrap();

        let summary = collector.run().unwrap();

        assert_eq!(summary.fetched, 1);
        assert_eq!(summary.skipped, 1);
        let b = store.read(&path).unwrap().unwrap();
        assert_eq!(b["bgb"].title, "bgb title");
    }

    #[test]
    fn test_failed_partition_leaves_no_file() {
        let tmp = TempDir::new().unwrap();
        let store = Store::new(tmp.path());
        let stub = Stub {
            fetches: Cell::new(0),
            fail_on: Some("bgb"),
        };

        assert!(Collector::new(&stub, &stub, &NoDelay, &store).run().is_err());
        assert!(store.partition_path("stub", "A").is_file());
        assert!(!store.partition_path("stub", "B").exists());
    }

    #[test]
    fn test_pauses_per_law_and_per_partition() {
        let tmp = TempDir::new().unwrap();
        let store = Store::new(tmp.path());
        let stub = Stub::new();
        let recorder = Recorder::default();

        Collector::new(&stub, &stub, &recorder, &store).run().unwrap();

        let two = Duration::from_secs(2);
        let three = Duration::from_secs(3);
        assert_eq!(*recorder.0.borrow(), vec![two, two, three, two, two, three]);
    }

    #[test]
    fn test_law_delay_override() {
        let tmp = TempDir::new().unwrap();
        let store = Store::new(tmp.path());
        let stub = Stub::new();
        let recorder = Recorder::default();

        Collector::new(&stub, &stub, &recorder, &store)
            .with_law_delay(Some(Duration::ZERO))
            .collect_partition("A")
            .unwrap();

        assert_eq!(*recorder.0.borrow(), vec![Duration::ZERO, Duration::ZERO]);
    }
}
