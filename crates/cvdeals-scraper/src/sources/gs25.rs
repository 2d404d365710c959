//! GS25 event-goods collector (token-API variant).
//!
//! The search API is session-bound: an initial GET of the listing page sets
//! the session cookie and embeds a `CSRFToken` hidden input, whose value must
//! accompany every subsequent search call as a query credential. The token
//! lives for one collection run only — it is never persisted or reused.

use scraper::{Html, Selector};

use cvdeals_core::Category;

use crate::client::EventClient;
use crate::error::ScraperError;
use crate::normalize::normalize_api_item;
use crate::pace::Pacer;
use crate::sources::{EventSource, PageOutcome};
use crate::types::{GoodsSearchResponse, SkipReason};

pub const DEFAULT_ORIGIN: &str = "http://gs25.gsretail.com";

const BRAND: &str = "GS25";
const LISTING_PATH: &str = "/gscvs/ko/products/event-goods";
const SEARCH_PATH: &str = "/gscvs/ko/products/event-goods-search";
const TOKEN_SELECTOR: &str = r#"input[name="CSRFToken"]"#;

pub struct Gs25Source {
    origin: String,
    categories: Vec<Category>,
    page_size: u32,
    /// Harvested by [`EventSource::authenticate`]; read-only afterwards.
    token: Option<String>,
}

impl Gs25Source {
    /// Creates the source with an optional origin override (used to point
    /// the adapter at a test server) and the search page size.
    #[must_use]
    pub fn new(origin: Option<String>, page_size: u32) -> Self {
        Self {
            origin: origin.unwrap_or_else(|| DEFAULT_ORIGIN.to_owned()),
            // The API takes one fixed "all events" filter; per-mechanic
            // labels come from each item's event-type code instead.
            categories: vec![Category::new("TOTAL", "전체")],
            page_size,
            token: None,
        }
    }

    fn listing_url(&self) -> String {
        format!("{}{}", self.origin, LISTING_PATH)
    }
}

impl EventSource for Gs25Source {
    fn brand(&self) -> &str {
        BRAND
    }

    fn categories(&self) -> &[Category] {
        &self.categories
    }

    fn pacer(&self) -> Pacer {
        Pacer::fixed(1000)
    }

    async fn authenticate(&mut self, client: &EventClient) -> Result<(), ScraperError> {
        let url = self.listing_url();
        let html = client.get_text(&url, &[]).await?;

        let token =
            extract_csrf_token(&html).ok_or_else(|| ScraperError::TokenMissing { url })?;

        // Log a prefix only; the full value is a credential.
        tracing::debug!(
            brand = BRAND,
            token_prefix = %&token[..token.len().min(8)],
            "anti-forgery token acquired"
        );
        self.token = Some(token);
        Ok(())
    }

    async fn fetch_page(
        &self,
        client: &EventClient,
        category: &Category,
        page: u32,
    ) -> Result<PageOutcome, ScraperError> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| ScraperError::TokenMissing {
                url: self.listing_url(),
            })?;

        let url = format!("{}{}", self.origin, SEARCH_PATH);
        let query = [
            ("CSRFToken", token.to_owned()),
            ("pageNum", page.to_string()),
            ("pageSize", self.page_size.to_string()),
            ("searchType", String::new()),
            ("searchWord", String::new()),
            ("parameterList", category.param.clone()),
        ];

        let value = client.get_json_value(&url, &query).await?;
        let response: GoodsSearchResponse =
            serde_json::from_value(value).map_err(|e| ScraperError::Deserialize {
                context: format!("event goods search page {page}"),
                source: e,
            })?;

        let mut outcome = PageOutcome::default();
        for goods in response.results {
            match normalize_api_item(goods, BRAND, &category.label, &self.origin) {
                Some(record) => outcome.records.push(record),
                None => outcome.skipped.push(SkipReason::EmptyName),
            }
        }
        Ok(outcome)
    }
}

/// Pulls the anti-forgery token out of the listing page's hidden input.
/// Returns `None` when the input is absent or carries an empty value.
pub(crate) fn extract_csrf_token(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(TOKEN_SELECTOR).expect("valid selector");
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("value"))
        .map(str::to_owned)
        .filter(|value| !value.is_empty())
}
