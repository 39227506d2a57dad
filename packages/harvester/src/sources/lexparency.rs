//! Adapter for lexparency.de (EU acts).
//!
//! There is no partitioning: the featured acts on the start page are
//! harvested in a single pass.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::{collect_headings, element_text, selector, Partitioning, Source};
use crate::config::LEXPARENCY_URL;
use crate::error::{HarvesterError, Result};
use crate::http::Fetch;
use crate::types::{LawEntry, LawRecord};

pub(super) const NAME: &str = "lexparency";

/// Path prefix of act links, preceding the slug.
const HREF_PREFIX: &str = "/eu/";

/// Trailing parenthesized abbreviation, as in `"Verordnung (EU) 2016/679 (DSGVO)"`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ABBREVIATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.*\(([^()]+)\)$").expect("valid regex"));

static FEATURED_LINK: LazyLock<Selector> = LazyLock::new(|| selector("#featured-acts a"));
static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("h1"));
static TOC_LEAF: LazyLock<Selector> = LazyLock::new(|| selector("#toc li.leaf"));

#[derive(Debug, Clone)]
pub struct Lexparency {
    base_url: String,
}

impl Default for Lexparency {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexparency {
    pub fn new() -> Self {
        Self::with_base_url(LEXPARENCY_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn detail_url(&self, slug: &str) -> String {
        format!("{}{HREF_PREFIX}{slug}", self.base_url)
    }
}

impl Source for Lexparency {
    fn name(&self) -> &'static str {
        NAME
    }

    fn partitioning(&self) -> Partitioning {
        Partitioning::Single
    }

    fn list(&self, fetcher: &dyn Fetch, _token: &str) -> Result<Vec<LawEntry>> {
        let html = fetcher.fetch(&self.base_url)?;
        parse_featured(&html, &self.base_url)
    }

    fn record(&self, fetcher: &dyn Fetch, entry: LawEntry) -> Result<LawRecord> {
        let url = self.detail_url(&entry.slug);
        let html = fetcher.fetch(&url)?;
        let (title, headings) = {
            let doc = Html::parse_document(&html);
            let title = doc
                .select(&TITLE)
                .next()
                .map(act_title)
                .ok_or_else(|| HarvesterError::missing("h1", &url))?;
            let headings = collect_headings(doc.select(&TOC_LEAF), |text| text.replace('—', "-"));
            (title, headings)
        };

        Ok(LawRecord {
            law: entry.law,
            slug: entry.slug,
            title,
            headings,
        })
    }

    fn law_delay(&self) -> Duration {
        Duration::ZERO
    }
}

/// Parse the featured acts on the start page.
pub fn parse_featured(html: &str, context: &str) -> Result<Vec<LawEntry>> {
    let doc = Html::parse_document(html);

    doc.select(&FEATURED_LINK)
        .map(|link| -> Result<LawEntry> {
            let law = law_from_link_text(&element_text(link));
            let href = link
                .value()
                .attr("href")
                .ok_or_else(|| HarvesterError::missing("a[href]", context))?;
            let slug = href.strip_prefix(HREF_PREFIX).ok_or_else(|| {
                HarvesterError::missing(format!("'{HREF_PREFIX}' in {href}"), context)
            })?;
            Ok(LawEntry::new(law, slug, ""))
        })
        .collect()
}

/// Link text, or its trailing parenthesized abbreviation if it has one.
pub fn law_from_link_text(text: &str) -> String {
    let text = text.trim();
    ABBREVIATION
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map_or(text, |m| m.as_str())
        .to_string()
}

/// Join the heading's text pieces, lowercasing the start of the second one.
pub fn act_title(heading: ElementRef<'_>) -> String {
    heading
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .enumerate()
        .map(|(i, s)| if i == 1 { lowercase_first(s) } else { s.to_string() })
        .collect::<Vec<_>>()
        .join(" ")
}

fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
