//! Gesetze Harvester - Collect statute metadata from German and EU legal websites.
//!
//! For every law listed on gesetze-im-internet.de, dejure.org and
//! lexparency.de the harvester stores its abbreviation, slug, official title
//! and table of contents, and writes one JSON dataset per source keyed by the
//! lowercased law name.
//!
//! # Example
//!
//! ```
//! use gesetze_harvester::classify::classify;
//!
//! let (key, heading) = classify("§ 823 Schadensersatzpflicht");
//! assert_eq!(key, "823");
//! assert_eq!(heading, "§ 823 Schadensersatzpflicht");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants and run settings
//! - [`types`]: Law records and datasets
//! - [`error`]: Error types and Result alias
//! - [`classify`]: Section-number heuristic for headings
//! - [`http`]: Page fetching
//! - [`pacing`]: Pauses between requests
//! - [`store`]: Partition and dataset files
//! - [`sources`]: One adapter per website
//! - [`collector`]: Checkpointed crawling of partitions
//! - [`merge`]: Partition files into a source dataset
//! - [`harvester`]: Runs the source pipelines in order
//! - [`cli`]: Command-line interface

pub mod classify;
pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod harvester;
pub mod http;
pub mod merge;
pub mod pacing;
pub mod sources;
pub mod store;
pub mod types;

// Re-export main functions
pub use harvester::{harvest, Harvester, SourceSummary};

// Re-export commonly used items
pub use classify::classify;
pub use error::{HarvesterError, Result};
pub use types::{Dataset, Headings, LawEntry, LawRecord};
