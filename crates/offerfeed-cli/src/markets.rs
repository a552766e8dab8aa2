//! Store-lookup mode: list nearby stores and their IDs.

use std::process::ExitCode;

use offerfeed_core::AppConfig;
use offerfeed_scraper::{extract_stores, render_listing, FeedClient, StoreOutcome};

/// Prints the stores around the configured search coordinates.
///
/// The search endpoint is keyed by coordinates, not postal code; the postal
/// code is only recorded in the logs. Every outcome exits 0.
pub(crate) async fn run_list_markets(
    client: &FeedClient,
    config: &AppConfig,
    postal_code: &str,
) -> anyhow::Result<ExitCode> {
    tracing::info!(
        postal_code,
        latitude = config.store_search.latitude,
        longitude = config.store_search.longitude,
        radius_km = config.store_search.radius_km,
        "searching stores"
    );

    let response = match client.fetch_store_search(&config.store_search).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(error = %e, "store search failed");
            println!("INFO: Unknown error while fetching stores.");
            return Ok(ExitCode::SUCCESS);
        }
    };

    match extract_stores(&response.body) {
        StoreOutcome::Listed(stores) => {
            tracing::debug!(count = stores.len(), "stores listed");
            println!("{}", render_listing(&stores));
        }
        StoreOutcome::NoData => tracing::warn!("store search returned no data"),
        StoreOutcome::Incomplete { index, field } => {
            tracing::warn!(store = index, field, "store search entry incomplete; nothing listed");
        }
        StoreOutcome::MalformedFeed(reason) => {
            tracing::warn!(%reason, "store search response malformed");
        }
    }
    Ok(ExitCode::SUCCESS)
}
