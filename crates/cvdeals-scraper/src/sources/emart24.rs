//! emart24 event-goods listing scraper (markup variant).
//!
//! Anonymous paginated GETs against the event listing, one request per
//! `(category, page)`, items extracted with CSS selectors. A page with zero
//! item containers is the termination signal — the site sends no explicit
//! "last page" flag.

use scraper::{ElementRef, Html, Selector};

use cvdeals_core::Category;

use crate::client::EventClient;
use crate::error::ScraperError;
use crate::normalize::normalize_markup_item;
use crate::pace::Pacer;
use crate::sources::{EventSource, PageOutcome};
use crate::types::{RawMarkupItem, SkipReason};

pub const DEFAULT_ORIGIN: &str = "https://emart24.co.kr";

const BRAND: &str = "emart24";
const LISTING_PATH: &str = "/goods/event";

// Structural selectors, kept together so markup drift is a one-place edit.
const ITEM_SELECTOR: &str = "div.itemWrap";
const NAME_SELECTOR: &str = ".itemtitle p a";
const PRICE_SELECTOR: &str = ".price";
const BADGE_SELECTOR: &str = ".itemTit span.floatR";
const IMAGE_SELECTOR: &str = ".itemSpImg img";

pub struct Emart24Source {
    origin: String,
    categories: Vec<Category>,
}

impl Emart24Source {
    /// Creates the source with an optional origin override (used to point
    /// the adapter at a test server).
    #[must_use]
    pub fn new(origin: Option<String>) -> Self {
        Self {
            origin: origin.unwrap_or_else(|| DEFAULT_ORIGIN.to_owned()),
            categories: vec![
                Category::new("1", "1+1"),
                Category::new("2", "2+1"),
                Category::new("3", "3+1"),
                Category::new("4", "SALE"),
            ],
        }
    }
}

impl EventSource for Emart24Source {
    fn brand(&self) -> &str {
        BRAND
    }

    fn categories(&self) -> &[Category] {
        &self.categories
    }

    fn pacer(&self) -> Pacer {
        Pacer::jittered(300, 500)
    }

    async fn authenticate(&mut self, _client: &EventClient) -> Result<(), ScraperError> {
        // Anonymous GETs only; nothing to acquire.
        Ok(())
    }

    async fn fetch_page(
        &self,
        client: &EventClient,
        category: &Category,
        page: u32,
    ) -> Result<PageOutcome, ScraperError> {
        let url = format!("{}{}", self.origin, LISTING_PATH);
        let query = [
            ("page", page.to_string()),
            ("category_seq", category.param.clone()),
        ];
        let html = client.get_text(&url, &query).await?;
        Ok(parse_listing_page(&html, &category.label, &self.origin))
    }
}

/// Extracts every item container on one listing page.
///
/// A single malformed container is skipped with a typed reason and never
/// aborts the page.
pub(crate) fn parse_listing_page(html: &str, category_label: &str, origin: &str) -> PageOutcome {
    let document = Html::parse_document(html);
    let item_selector = Selector::parse(ITEM_SELECTOR).expect("valid selector");

    let mut outcome = PageOutcome::default();
    for container in document.select(&item_selector) {
        match extract_item(container) {
            Ok(raw) => match normalize_markup_item(raw, BRAND, category_label, origin) {
                Some(record) => outcome.records.push(record),
                None => outcome.skipped.push(SkipReason::EmptyName),
            },
            Err(reason) => outcome.skipped.push(reason),
        }
    }
    outcome
}

fn extract_item(container: ElementRef<'_>) -> Result<RawMarkupItem, SkipReason> {
    let name = select_text(container, NAME_SELECTOR).ok_or(SkipReason::MissingName)?;
    let price_text = select_text(container, PRICE_SELECTOR).ok_or(SkipReason::MissingPrice)?;
    let badge = select_text(container, BADGE_SELECTOR);
    let img_src = select_attr(container, IMAGE_SELECTOR, "src").ok_or(SkipReason::MissingImage)?;

    Ok(RawMarkupItem {
        name,
        price_text,
        badge,
        img_src,
    })
}

fn select_text(scope: ElementRef<'_>, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).expect("valid selector");
    scope
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>())
}

fn select_attr(scope: ElementRef<'_>, selector: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(selector).expect("valid selector");
    scope
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::to_owned)
}
