//! Adapter for dejure.org.
//!
//! All laws are listed on the start page, grouped below one named anchor per
//! initial letter. The page is fetched once and reused for every letter.

use std::cell::OnceCell;
use std::sync::LazyLock;
use std::time::Duration;

use scraper::{ElementRef, Html, Selector};

use super::{collect_headings, element_text, selector, Partitioning, Source};
use crate::classify::collapse_section_spacing;
use crate::config::{DEJURE_PARTITION_DELAY_SECS, DEJURE_URL};
use crate::error::{HarvesterError, Result};
use crate::http::Fetch;
use crate::types::{LawEntry, LawRecord};

pub(super) const NAME: &str = "dejure";

/// Letters with a section on the start page.
pub const DEJURE_LETTERS: &[&str] = &[
    "A", "B", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "R", "S", "T",
    "U", "V", "W", "Z",
];

/// Path prefix of law links, preceding the slug.
const HREF_PREFIX: &str = "/gesetze/";

static NAMED_ANCHOR: LazyLock<Selector> = LazyLock::new(|| selector("a[name]"));
static ITEM: LazyLock<Selector> = LazyLock::new(|| selector("li"));
static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a"));
static HEADING: LazyLock<Selector> = LazyLock::new(|| selector("p.clearfix"));

#[derive(Debug, Clone)]
pub struct DejureOnline {
    base_url: String,
    overview: OnceCell<String>,
}

impl Default for DejureOnline {
    fn default() -> Self {
        Self::new()
    }
}

impl DejureOnline {
    pub fn new() -> Self {
        Self::with_base_url(DEJURE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            overview: OnceCell::new(),
        }
    }

    pub fn detail_url(&self, slug: &str) -> String {
        format!("{}{HREF_PREFIX}{slug}", self.base_url)
    }

    /// Start page HTML, fetched on first use.
    fn overview(&self, fetcher: &dyn Fetch) -> Result<&str> {
        if let Some(html) = self.overview.get() {
            return Ok(html.as_str());
        }
        let html = fetcher.fetch(&self.base_url)?;
        Ok(self.overview.get_or_init(|| html).as_str())
    }
}

impl Source for DejureOnline {
    fn name(&self) -> &'static str {
        NAME
    }

    fn partitioning(&self) -> Partitioning {
        Partitioning::ByToken(DEJURE_LETTERS)
    }

    fn list(&self, fetcher: &dyn Fetch, token: &str) -> Result<Vec<LawEntry>> {
        let html = self.overview(fetcher)?;
        parse_letter(html, token, &self.base_url)
    }

    fn record(&self, fetcher: &dyn Fetch, entry: LawEntry) -> Result<LawRecord> {
        let html = fetcher.fetch(&self.detail_url(&entry.slug))?;
        let headings = {
            let doc = Html::parse_document(&html);
            collect_headings(doc.select(&HEADING), collapse_section_spacing)
        };
        Ok(LawRecord::from_entry(entry, headings))
    }

    fn partition_delay(&self) -> Duration {
        Duration::from_secs(DEJURE_PARTITION_DELAY_SECS)
    }
}

/// Parse the laws listed under `letter` on the start page.
pub fn parse_letter(html: &str, letter: &str, context: &str) -> Result<Vec<LawEntry>> {
    let doc = Html::parse_document(html);

    let anchor = doc
        .select(&NAMED_ANCHOR)
        .find(|a| a.value().attr("name") == Some(letter))
        .ok_or_else(|| HarvesterError::missing(format!("a[name={letter}]"), context))?;

    // The letter's list sits between its anchor and the next letter's anchor
    let list = anchor
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .take_while(|e| !is_letter_anchor(e))
        .find(|e| e.value().name() == "ul")
        .ok_or_else(|| HarvesterError::missing(format!("ul after a[name={letter}]"), context))?;

    let mut entries = Vec::new();
    for item in list.select(&ITEM) {
        let link = item
            .select(&LINK)
            .next()
            .ok_or_else(|| HarvesterError::missing("li > a", context))?;
        let law = element_text(link);

        let href = link
            .value()
            .attr("href")
            .ok_or_else(|| HarvesterError::missing("a[href]", context))?;
        let slug = href
            .strip_prefix(HREF_PREFIX)
            .ok_or_else(|| HarvesterError::missing(format!("'{HREF_PREFIX}' in {href}"), context))?;

        let title = title_from_item(&element_text(item), &law);
        entries.push(LawEntry::new(law, slug, title));
    }

    Ok(entries)
}

fn is_letter_anchor(element: &ElementRef<'_>) -> bool {
    element.value().name() == "a" && element.value().attr("name").is_some()
}

/// Item text minus the link text, without surrounding parentheses.
///
/// `"BGB (Bürgerliches Gesetzbuch)"` with law `"BGB"` gives
/// `"Bürgerliches Gesetzbuch"`.
pub fn title_from_item(item_text: &str, law: &str) -> String {
    item_text
        .replacen(law, "", 1)
        .trim_matches(|c: char| c.is_whitespace() || c == '(' || c == ')')
        .to_string()
}
