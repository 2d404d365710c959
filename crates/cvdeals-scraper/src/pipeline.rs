//! Per-retailer collection orchestration.
//!
//! Drives one [`EventSource`] through authenticate → per-category pagination,
//! accumulating normalized records and skip statistics. Fully sequential:
//! one outstanding request, pages in strictly increasing order, categories in
//! configuration order, with the source's pacer applied between successive
//! fetches inside a category.

use std::collections::BTreeMap;

use cvdeals_core::DealRecord;

use crate::client::EventClient;
use crate::error::ScraperError;
use crate::sources::EventSource;

/// Everything one retailer run collected. Owned by the pipeline invocation
/// and returned by value — never module-level state.
#[derive(Debug, Default)]
pub struct Collected {
    /// Normalized records in encounter order, duplicates included; the
    /// snapshot writer dedupes.
    pub records: Vec<DealRecord>,
    /// Pages that yielded at least one item or skip.
    pub pages_fetched: u32,
    /// Skip counts keyed by reason, for the run summary.
    pub skipped: BTreeMap<&'static str, usize>,
    /// Labels of categories cut short by a transport error or the
    /// pagination guard.
    pub failed_categories: Vec<String>,
}

/// Runs the full collection state machine for one retailer.
///
/// Failure containment follows the taxonomy:
/// - an `authenticate` error is fatal and propagates — the caller must not
///   write a snapshot;
/// - a page-fetch error (or hitting the `max_pages` guard) terminates only
///   the current category, is logged, and the next category proceeds;
/// - per-item skips are aggregated and never interrupt anything.
///
/// # Errors
///
/// Only [`EventSource::authenticate`] failures propagate.
pub async fn collect_source<S: EventSource>(
    source: &mut S,
    client: &EventClient,
    max_pages: u32,
) -> Result<Collected, ScraperError> {
    source.authenticate(client).await?;

    let pacer = source.pacer();
    let categories = source.categories().to_vec();
    let mut collected = Collected::default();

    for category in &categories {
        tracing::info!(
            brand = %source.brand(),
            category = %category.label,
            "collecting category"
        );

        let mut page: u32 = 1;
        loop {
            if page > max_pages {
                let err = ScraperError::PaginationLimit {
                    brand: source.brand().to_owned(),
                    category: category.label.clone(),
                    max_pages,
                };
                tracing::warn!(
                    brand = %source.brand(),
                    category = %category.label,
                    error = %err,
                    "stopping category"
                );
                collected.failed_categories.push(category.label.clone());
                break;
            }

            if page > 1 {
                pacer.pause().await;
            }

            let outcome = match source.fetch_page(client, category, page).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::warn!(
                        brand = %source.brand(),
                        category = %category.label,
                        page,
                        error = %e,
                        "page fetch failed; moving to next category"
                    );
                    collected.failed_categories.push(category.label.clone());
                    break;
                }
            };

            if outcome.is_empty() {
                break;
            }

            tracing::debug!(
                brand = %source.brand(),
                category = %category.label,
                page,
                items = outcome.records.len(),
                skipped = outcome.skipped.len(),
                "page collected"
            );

            collected.pages_fetched += 1;
            for reason in &outcome.skipped {
                *collected.skipped.entry(reason.as_str()).or_insert(0) += 1;
            }
            collected.records.extend(outcome.records);
            page += 1;
        }

        tracing::info!(
            brand = %source.brand(),
            category = %category.label,
            records = collected.records.len(),
            "category done"
        );
    }

    Ok(collected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pace::Pacer;
    use crate::sources::PageOutcome;
    use crate::types::SkipReason;
    use cvdeals_core::{Category, Price};

    fn record(name: &str, event: &str) -> DealRecord {
        DealRecord {
            brand: "stub".to_owned(),
            name: name.to_owned(),
            price: Price::Text("1,000원".to_owned()),
            event: event.to_owned(),
            img_url: "https://stub.example/img.png".to_owned(),
        }
    }

    /// Scripted source: outcomes are computed from `(category.param, page)`
    /// so `fetch_page` can stay `&self`.
    struct StubSource {
        categories: Vec<Category>,
        auth_fails: bool,
    }

    impl StubSource {
        fn new(categories: Vec<Category>) -> Self {
            Self {
                categories,
                auth_fails: false,
            }
        }
    }

    impl EventSource for StubSource {
        fn brand(&self) -> &str {
            "stub"
        }

        fn categories(&self) -> &[Category] {
            &self.categories
        }

        fn pacer(&self) -> Pacer {
            Pacer::fixed(0)
        }

        async fn authenticate(&mut self, _client: &EventClient) -> Result<(), ScraperError> {
            if self.auth_fails {
                return Err(ScraperError::TokenMissing {
                    url: "https://stub.example/listing".to_owned(),
                });
            }
            Ok(())
        }

        async fn fetch_page(
            &self,
            _client: &EventClient,
            category: &Category,
            page: u32,
        ) -> Result<PageOutcome, ScraperError> {
            match (category.param.as_str(), page) {
                // Two non-empty pages, then exhaustion.
                ("two-pages", 1) => Ok(PageOutcome {
                    records: vec![record("a", "1+1"), record("b", "1+1")],
                    skipped: vec![],
                }),
                ("two-pages", 2) => Ok(PageOutcome {
                    records: vec![record("c", "1+1")],
                    skipped: vec![SkipReason::MissingImage],
                }),
                // A category whose every fetch errors out.
                ("broken", _) => Err(ScraperError::UnexpectedStatus {
                    status: 500,
                    url: "https://stub.example/listing".to_owned(),
                }),
                ("one-page", 1) => Ok(PageOutcome {
                    records: vec![record("d", "2+1")],
                    skipped: vec![],
                }),
                _ => Ok(PageOutcome::default()),
            }
        }
    }

    fn test_client() -> EventClient {
        EventClient::new(5, "cvdeals-test/0.1").expect("failed to build test EventClient")
    }

    #[tokio::test]
    async fn pagination_stops_at_the_first_empty_page() {
        let mut source = StubSource::new(vec![Category::new("two-pages", "1+1")]);
        let collected = collect_source(&mut source, &test_client(), 200)
            .await
            .unwrap();

        assert_eq!(collected.records.len(), 3, "two pages' worth of items");
        assert_eq!(collected.pages_fetched, 2);
        assert_eq!(collected.skipped.get("missing image"), Some(&1));
        assert!(collected.failed_categories.is_empty());
    }

    #[tokio::test]
    async fn failing_category_does_not_block_the_next_one() {
        let mut source = StubSource::new(vec![
            Category::new("broken", "1+1"),
            Category::new("one-page", "2+1"),
        ]);
        let collected = collect_source(&mut source, &test_client(), 200)
            .await
            .unwrap();

        assert_eq!(collected.failed_categories, vec!["1+1".to_owned()]);
        assert_eq!(collected.records.len(), 1);
        assert_eq!(collected.records[0].name, "d");
    }

    #[tokio::test]
    async fn auth_failure_aborts_the_whole_run() {
        let mut source = StubSource::new(vec![Category::new("one-page", "2+1")]);
        source.auth_fails = true;

        let result = collect_source(&mut source, &test_client(), 200).await;
        assert!(matches!(result, Err(ScraperError::TokenMissing { .. })));
    }

    #[tokio::test]
    async fn pagination_guard_fails_only_the_category() {
        // "endless" never returns an empty page within the guard.
        struct EndlessSource {
            categories: Vec<Category>,
        }

        impl EventSource for EndlessSource {
            fn brand(&self) -> &str {
                "stub"
            }
            fn categories(&self) -> &[Category] {
                &self.categories
            }
            fn pacer(&self) -> Pacer {
                Pacer::fixed(0)
            }
            async fn authenticate(&mut self, _client: &EventClient) -> Result<(), ScraperError> {
                Ok(())
            }
            async fn fetch_page(
                &self,
                _client: &EventClient,
                _category: &Category,
                page: u32,
            ) -> Result<PageOutcome, ScraperError> {
                Ok(PageOutcome {
                    records: vec![record(&format!("item-{page}"), "1+1")],
                    skipped: vec![],
                })
            }
        }

        let mut source = EndlessSource {
            categories: vec![Category::new("endless", "1+1")],
        };
        let collected = collect_source(&mut source, &test_client(), 3)
            .await
            .unwrap();

        assert_eq!(collected.pages_fetched, 3);
        assert_eq!(collected.failed_categories, vec!["1+1".to_owned()]);
    }
}
