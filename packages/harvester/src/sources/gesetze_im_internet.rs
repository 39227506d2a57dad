//! Adapter for gesetze-im-internet.de.
//!
//! Laws are listed on one page per category (`Teilliste_{category}.html`).
//! Each entry links to `./{slug}/index.html`, whose table cells hold the
//! law's table of contents.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::{collect_headings, element_text, selector, Partitioning, Source};
use crate::config::GESETZE_IM_INTERNET_URL;
use crate::error::{HarvesterError, Result};
use crate::http::Fetch;
use crate::types::{LawEntry, LawRecord};

pub(super) const NAME: &str = "gesetze-im-internet";

/// Category tokens of the listing pages.
pub const GESETZE_CATEGORIES: &[&str] = &[
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R",
    "S", "T", "U", "V", "W", "X", "Y", "Z", "1", "2", "3", "4", "5", "6", "7", "8", "9",
];

/// Relative link prefix of a listing entry.
const HREF_PREFIX: &str = "./";

/// Suffix of a listing entry's link, following the slug.
const HREF_SUFFIX: &str = "/index.html";

static CONTAINER: LazyLock<Selector> = LazyLock::new(|| selector("#paddingLR12"));
static ENTRY: LazyLock<Selector> = LazyLock::new(|| selector("p"));
static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a"));
static ABBR: LazyLock<Selector> = LazyLock::new(|| selector("abbr"));
static CELL: LazyLock<Selector> = LazyLock::new(|| selector("td"));

#[derive(Debug, Clone)]
pub struct GesetzeImInternet {
    base_url: String,
}

impl Default for GesetzeImInternet {
    fn default() -> Self {
        Self::new()
    }
}

impl GesetzeImInternet {
    pub fn new() -> Self {
        Self::with_base_url(GESETZE_IM_INTERNET_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn listing_url(&self, category: &str) -> String {
        format!("{}/Teilliste_{category}.html", self.base_url)
    }

    pub fn detail_url(&self, slug: &str) -> String {
        format!("{}/{slug}/index.html", self.base_url)
    }
}

impl Source for GesetzeImInternet {
    fn name(&self) -> &'static str {
        NAME
    }

    fn partitioning(&self) -> Partitioning {
        Partitioning::ByToken(GESETZE_CATEGORIES)
    }

    fn list(&self, fetcher: &dyn Fetch, token: &str) -> Result<Vec<LawEntry>> {
        let url = self.listing_url(token);
        let html = fetcher.fetch(&url)?;
        parse_listing(&html, &url)
    }

    fn record(&self, fetcher: &dyn Fetch, entry: LawEntry) -> Result<LawRecord> {
        let html = fetcher.fetch(&self.detail_url(&entry.slug))?;
        let headings = {
            let doc = Html::parse_document(&html);
            collect_headings(doc.select(&CELL), str::to_string)
        };
        Ok(LawRecord::from_entry(entry, headings))
    }
}

/// Parse a category listing page.
///
/// `context` names the page in error messages.
pub fn parse_listing(html: &str, context: &str) -> Result<Vec<LawEntry>> {
    let doc = Html::parse_document(html);
    let container = doc
        .select(&CONTAINER)
        .next()
        .ok_or_else(|| HarvesterError::missing("#paddingLR12", context))?;

    let mut entries = Vec::new();
    for paragraph in container.select(&ENTRY) {
        let link = paragraph
            .select(&LINK)
            .next()
            .ok_or_else(|| HarvesterError::missing("p > a", context))?;

        let law = strip_delimiters(&element_text(link)).to_string();

        let href = link
            .value()
            .attr("href")
            .ok_or_else(|| HarvesterError::missing("a[href]", context))?;
        let slug = slug_from_href(href)
            .ok_or_else(|| HarvesterError::missing(format!("'{HREF_SUFFIX}' in {href}"), context))?;

        let title = link
            .select(&ABBR)
            .next()
            .and_then(|abbr| abbr.value().attr("title"))
            .ok_or_else(|| HarvesterError::missing("abbr[title]", context))?;

        entries.push(LawEntry::new(law, slug, title));
    }

    Ok(entries)
}

/// Drop the one-character delimiter on each side of the link text.
pub fn strip_delimiters(text: &str) -> &str {
    let mut chars = text.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

/// Extract the slug from `./{slug}/index.html`.
pub fn slug_from_href(href: &str) -> Option<&str> {
    href.strip_prefix(HREF_PREFIX)
        .unwrap_or(href)
        .strip_suffix(HREF_SUFFIX)
}
