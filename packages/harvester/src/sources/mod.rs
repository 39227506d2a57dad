//! Source adapters, one per legal-reference website.
//!
//! Each adapter knows its site's page structure: how to list the laws of a
//! partition and how to read one law's table of contents. Parsing is kept
//! apart from fetching so it can be tested against fixture HTML.

mod dejure;
mod gesetze_im_internet;
mod lexparency;

use std::time::Duration;

use scraper::{ElementRef, Selector};

use crate::classify::classify;
use crate::config::LAW_DELAY_SECS;
use crate::error::{HarvesterError, Result};
use crate::http::Fetch;
use crate::types::{Headings, LawEntry, LawRecord};

pub use dejure::{DejureOnline, DEJURE_LETTERS};
pub use gesetze_im_internet::{GesetzeImInternet, GESETZE_CATEGORIES};
pub use lexparency::Lexparency;

/// How a source's listings are split into checkpointed units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partitioning {
    /// One partition file per token (category letter or digit).
    ByToken(&'static [&'static str]),

    /// One flat pass straight into the dataset, no partition files.
    Single,
}

/// A legal-reference website the harvester can crawl.
pub trait Source {
    /// Identifier used for partition directories and dataset files.
    fn name(&self) -> &'static str;

    fn partitioning(&self) -> Partitioning;

    /// List the laws of one partition. `token` is empty for `Partitioning::Single`.
    fn list(&self, fetcher: &dyn Fetch, token: &str) -> Result<Vec<LawEntry>>;

    /// Fetch a law's detail page and build its full record.
    fn record(&self, fetcher: &dyn Fetch, entry: LawEntry) -> Result<LawRecord>;

    /// Pause after each law's detail page.
    fn law_delay(&self) -> Duration {
        Duration::from_secs(LAW_DELAY_SECS)
    }

    /// Extra pause after each completed partition.
    fn partition_delay(&self) -> Duration {
        Duration::ZERO
    }
}

/// Adapters in fixed harvesting order.
pub fn default_sources() -> Vec<Box<dyn Source>> {
    vec![
        Box::new(GesetzeImInternet::new()),
        Box::new(DejureOnline::new()),
        Box::new(Lexparency::new()),
    ]
}

/// Names of all known sources, in harvesting order.
pub const SOURCE_NAMES: [&str; 3] = [
    gesetze_im_internet::NAME,
    dejure::NAME,
    lexparency::NAME,
];

/// Check that a source name is known.
pub fn validate_source(name: &str) -> Result<()> {
    if SOURCE_NAMES.contains(&name) {
        Ok(())
    } else {
        Err(HarvesterError::UnknownSource(name.to_string()))
    }
}

/// Parse a static CSS selector.
#[allow(clippy::expect_used)] // Only called with literal selectors
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

/// Concatenated text content of an element.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Fold heading elements into a heading map.
///
/// Elements without a contained link, or whose link has no `href`, are not
/// headings and are skipped. `normalize` is applied to the element text
/// before classification.
pub(crate) fn collect_headings<'a>(
    elements: impl Iterator<Item = ElementRef<'a>>,
    normalize: impl Fn(&str) -> String,
) -> Headings {
    let link = selector("a");
    let mut headings = Headings::new();

    for element in elements {
        let has_href = element
            .select(&link)
            .next()
            .and_then(|a| a.value().attr("href"))
            .is_some();
        if !has_href {
            tracing::debug!(text = %element_text(element).trim(), "Skipping heading without link");
            continue;
        }

        let (key, value) = classify(&normalize(&element_text(element)));
        headings.insert(key, value);
    }

    headings
}
