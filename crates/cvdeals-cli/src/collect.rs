//! `collect` subcommand: run every enabled retailer in roster order and
//! write one dated snapshot per retailer.

use std::time::Instant;

use cvdeals_core::{AppConfig, RetailerConfig, SourceKind};
use cvdeals_scraper::{
    collect_source, write_snapshot, Collected, Emart24Source, EventClient, EventSource,
    Gs25Source, SnapshotSummary,
};

/// Runs collection for the selected retailers.
///
/// A retailer failure (fatal token-discovery error, snapshot I/O) is logged
/// and the remaining retailers still run; the process fails only when every
/// retailer does.
///
/// # Errors
///
/// Returns an error when the roster cannot be loaded, `brand_filter`
/// matches no enabled retailer, or all retailers fail.
pub async fn run(config: &AppConfig, brand_filter: Option<&str>) -> anyhow::Result<()> {
    let brands_file = cvdeals_core::load_brands(&config.brands_path)?;
    let retailers = select_retailers(brands_file.brands, brand_filter)?;

    let client = EventClient::new(config.request_timeout_secs, &config.user_agent)?;

    let mut failed = 0usize;
    for retailer in &retailers {
        if let Err(e) = collect_retailer(config, &client, retailer).await {
            tracing::error!(
                brand = %retailer.slug(),
                error = %e,
                "retailer collection failed; no snapshot written"
            );
            failed += 1;
        }
    }

    if failed == retailers.len() {
        anyhow::bail!("all {failed} retailers failed collection");
    }

    Ok(())
}

/// Filters the roster down to the enabled retailers, honoring `--brand`.
fn select_retailers(
    brands: Vec<RetailerConfig>,
    brand_filter: Option<&str>,
) -> anyhow::Result<Vec<RetailerConfig>> {
    let enabled: Vec<RetailerConfig> = brands.into_iter().filter(|b| b.enabled).collect();

    let Some(slug) = brand_filter else {
        if enabled.is_empty() {
            anyhow::bail!("no enabled retailers in the roster");
        }
        return Ok(enabled);
    };

    let selected: Vec<RetailerConfig> =
        enabled.into_iter().filter(|b| b.slug() == slug).collect();
    if selected.is_empty() {
        anyhow::bail!("retailer '{slug}' not found among enabled roster entries");
    }
    Ok(selected)
}

async fn collect_retailer(
    config: &AppConfig,
    client: &EventClient,
    retailer: &RetailerConfig,
) -> anyhow::Result<()> {
    let started = Instant::now();

    let (brand, collected) = match retailer.source {
        SourceKind::Markup => {
            let mut source = Emart24Source::new(retailer.origin.clone());
            let collected = collect_source(&mut source, client, config.max_pages).await?;
            (source.brand().to_owned(), collected)
        }
        SourceKind::TokenApi => {
            let mut source = Gs25Source::new(retailer.origin.clone(), config.api_page_size);
            let collected = collect_source(&mut source, client, config.max_pages).await?;
            (source.brand().to_owned(), collected)
        }
    };

    let Collected {
        records,
        pages_fetched,
        skipped,
        failed_categories,
    } = collected;

    let summary = write_snapshot(records, &brand, &config.out_dir, started)?;
    print_summary(&brand, &summary, pages_fetched, &skipped, &failed_categories);
    Ok(())
}

fn print_summary(
    brand: &str,
    summary: &SnapshotSummary,
    pages_fetched: u32,
    skipped: &std::collections::BTreeMap<&'static str, usize>,
    failed_categories: &[String],
) {
    println!();
    println!("{}", "=".repeat(50));
    println!("{brand} run summary:");
    println!(" - pages fetched : {pages_fetched}");
    println!(" - raw records   : {}", summary.raw_count);
    println!(" - after dedupe  : {}", summary.deduped_count);
    match &summary.path {
        Some(path) => println!(" - snapshot file : {}", path.display()),
        None => println!(" - snapshot file : (no records, nothing written)"),
    }
    if !skipped.is_empty() {
        let total: usize = skipped.values().sum();
        let reasons = skipped
            .iter()
            .map(|(reason, count)| format!("{reason}: {count}"))
            .collect::<Vec<_>>()
            .join(", ");
        println!(" - items skipped : {total} ({reasons})");
    }
    if !failed_categories.is_empty() {
        println!(" - categories cut short: {}", failed_categories.join(", "));
    }
    let secs = summary.elapsed.as_secs();
    println!(" - elapsed       : {}m {}s", secs / 60, secs % 60);
    println!("{}", "=".repeat(50));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn retailer(name: &str, enabled: bool) -> RetailerConfig {
        RetailerConfig {
            name: name.to_string(),
            source: SourceKind::Markup,
            origin: None,
            enabled,
        }
    }

    #[test]
    fn select_keeps_roster_order() {
        let selected = select_retailers(
            vec![retailer("emart24", true), retailer("GS25", true)],
            None,
        )
        .unwrap();
        let names: Vec<_> = selected.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["emart24", "GS25"]);
    }

    #[test]
    fn select_drops_disabled_retailers() {
        let selected = select_retailers(
            vec![retailer("emart24", false), retailer("GS25", true)],
            None,
        )
        .unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "GS25");
    }

    #[test]
    fn select_filter_matches_by_slug() {
        let selected = select_retailers(
            vec![retailer("emart24", true), retailer("GS25", true)],
            Some("gs25"),
        )
        .unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "GS25");
    }

    #[test]
    fn select_unknown_filter_is_an_error() {
        let result = select_retailers(vec![retailer("emart24", true)], Some("cu"));
        assert!(result.is_err());
    }

    #[test]
    fn select_empty_roster_is_an_error() {
        let result = select_retailers(vec![retailer("emart24", false)], None);
        assert!(result.is_err());
    }
}
