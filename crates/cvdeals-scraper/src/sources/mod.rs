//! Retailer source adapters.
//!
//! Each retailer exposes a different access pattern — paginated HTML with
//! CSS-selector extraction for emart24, a token-gated JSON search API for
//! GS25 — but both reduce to the same capability set so the pipeline can
//! drive either one.

mod emart24;
mod gs25;

pub use emart24::Emart24Source;
pub use gs25::Gs25Source;

use cvdeals_core::{Category, DealRecord};

use crate::client::EventClient;
use crate::error::ScraperError;
use crate::pace::Pacer;
use crate::types::SkipReason;

/// Everything one page fetch produced: the normalized records plus the
/// per-item skips. A page with no records *and* no skips contained zero item
/// containers — the pagination exhaustion signal.
#[derive(Debug, Default)]
pub struct PageOutcome {
    pub records: Vec<DealRecord>,
    pub skipped: Vec<SkipReason>,
}

impl PageOutcome {
    /// `true` when the page contained no items at all (exhaustion), as
    /// opposed to items that all failed extraction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.skipped.is_empty()
    }
}

/// The capability set the pipeline drives: authenticate once, then fetch
/// pages per category until exhaustion.
///
/// The pipeline is generic over this trait; implementations stay cheap to
/// construct and hold no state beyond one run's session.
#[allow(async_fn_in_trait)]
pub trait EventSource {
    /// Retailer identifier stamped on every record and snapshot filename.
    fn brand(&self) -> &str;

    /// Fixed category list, iterated in declaration order.
    fn categories(&self) -> &[Category];

    /// Inter-request delay policy for this retailer.
    fn pacer(&self) -> Pacer;

    /// Acquire whatever session state the retailer requires. A no-op for
    /// anonymous sources.
    ///
    /// # Errors
    ///
    /// A failure here is fatal for the retailer's run — the caller must not
    /// proceed to pagination or write a snapshot.
    async fn authenticate(&mut self, client: &EventClient) -> Result<(), ScraperError>;

    /// Fetch and extract one page of the given category. Pages are requested
    /// in strictly increasing order starting at 1.
    ///
    /// # Errors
    ///
    /// Transport and decode failures propagate; the pipeline contains them
    /// at the category boundary.
    async fn fetch_page(
        &self,
        client: &EventClient,
        category: &Category,
        page: u32,
    ) -> Result<PageOutcome, ScraperError>;
}
