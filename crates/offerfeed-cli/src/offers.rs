//! Offer-export mode: fetch one store's feed and write it to a file.
//!
//! Data problems never fail the run. A feed with nothing usable, a feed the
//! extractor cannot walk and a fetch that gave up all end with exit code 0
//! and leave the output file untouched.

use std::path::Path;
use std::process::ExitCode;

use offerfeed_core::{load_highlights, AppConfig, HighlightsError};
use offerfeed_scraper::{extract_offers, write_export, FeedClient, FeedOutcome};

/// Runs one fetch → extract → write cycle for `market_id`.
///
/// # Errors
///
/// Returns an error if the highlights file cannot be read for a reason other
/// than being absent, or if the output file cannot be written.
pub(crate) async fn run_offer_export(
    client: &FeedClient,
    config: &AppConfig,
    market_id: &str,
    output_file: &Path,
    highlights_file: Option<&Path>,
) -> anyhow::Result<ExitCode> {
    let highlights = match highlights_file {
        Some(path) => match load_highlights(path) {
            Ok(items) => {
                if items.is_empty() {
                    println!(
                        "WARNING: No product highlights in file \"{}\" found. \
                         Ignoring user request to highlight and continuing anyway.",
                        path.display()
                    );
                }
                items
            }
            Err(HighlightsError::NotFound { path }) => {
                println!(
                    "FAIL: Highlights file \"{}\" not found. \
                     Please check for typos or create it and write one product per line.",
                    path.display()
                );
                return Ok(ExitCode::FAILURE);
            }
            Err(e) => return Err(e.into()),
        },
        None => Vec::new(),
    };

    let response = match client
        .fetch_offers(&config.offers_url, market_id, &config.api_key)
        .await
    {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(market_id, error = %e, "offers fetch failed");
            println!("INFO: Unknown error while fetching discounts.");
            return Ok(ExitCode::SUCCESS);
        }
    };
    tracing::info!(market_id, attempts = response.attempts, "offers feed received");

    let export = match extract_offers(&response.body, highlights) {
        FeedOutcome::Extracted(export) => export,
        FeedOutcome::NoData => {
            tracing::warn!(market_id, "offers feed contained no data; output left unchanged");
            return Ok(ExitCode::SUCCESS);
        }
        FeedOutcome::MalformedFeed(reason) => {
            tracing::warn!(market_id, %reason, "offers feed malformed; output left unchanged");
            return Ok(ExitCode::SUCCESS);
        }
    };

    if export.is_partial() {
        tracing::info!(
            categories = export.skipped.categories,
            articles = export.skipped.articles,
            online_only = export.skipped.online_only,
            "some feed entries were skipped"
        );
    }

    write_export(output_file, &export.buffer)?;

    println!(
        "{} OK: Wrote {} discounts to file \"{}\".",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        export.count(),
        output_file.display()
    );
    Ok(ExitCode::SUCCESS)
}
