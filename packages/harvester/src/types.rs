//! Core data types for the harvester.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Section identifier (or self-keyed heading text) to heading display text.
pub type Headings = BTreeMap<String, String>;

/// Law records keyed by lowercased law name.
///
/// Used for both partition files and final source datasets.
pub type Dataset = BTreeMap<String, LawRecord>;

/// One raw entry from a source's listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LawEntry {
    /// Display name or abbreviation (e.g., "BGB").
    pub law: String,

    /// Source-specific path fragment for the detail page.
    pub slug: String,

    /// Official title; may be empty until the detail page is read.
    pub title: String,
}

impl LawEntry {
    pub fn new(law: impl Into<String>, slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            law: law.into(),
            slug: slug.into(),
            title: title.into(),
        }
    }
}

/// One statute with its table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LawRecord {
    pub law: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub headings: Headings,
}

impl LawRecord {
    /// Build a record from a listing entry and its headings.
    pub fn from_entry(entry: LawEntry, headings: Headings) -> Self {
        Self {
            law: entry.law,
            slug: entry.slug,
            title: entry.title,
            headings,
        }
    }

    /// Dataset key: the lowercased law name.
    #[must_use]
    pub fn key(&self) -> String {
        self.law.to_lowercase()
    }
}

/// Insert a record under its lowercased law name.
///
/// A later record with the same key replaces the earlier one.
pub fn insert_record(dataset: &mut Dataset, record: LawRecord) {
    dataset.insert(record.key(), record);
}
