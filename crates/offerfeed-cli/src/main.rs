mod markets;
mod offers;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{CommandFactory, Parser};
use offerfeed_core::AppConfig;
use offerfeed_scraper::{CancelToken, FeedClient, ProxyRoute, RetryPolicy};
use tracing_subscriber::EnvFilter;

const EXAMPLES: &str = "\
Example usages:
 - Prints the IDs of all stores in/near the postal code \"63773\":
      offerfeed --list-markets 63773
 - Exports current discounts of the store with the ID \"562286\":
      offerfeed --market-id 562286 --output-file \"Angebote.md\"
 - Exports current discounts and highlights the products listed in a file:
      offerfeed --market-id 562286 --output-file \"Angebote.md\" --highlights highlights.txt";

#[derive(Debug, Parser)]
#[command(name = "offerfeed")]
#[command(about = "Fetches the current discount offers of a store and writes them to a file")]
#[command(after_help = EXAMPLES)]
struct Cli {
    /// Store whose offers are exported.
    #[arg(long)]
    market_id: Option<String>,

    /// Output file path.
    #[arg(long)]
    output_file: Option<PathBuf>,

    /// Products listed in this file, one per line, are highlighted in the output.
    #[arg(long)]
    highlights: Option<PathBuf>,

    /// List the stores near this postal code (PLZ) with their IDs.
    #[arg(long, value_name = "PLZ")]
    list_markets: Option<String>,
}

/// What a parsed command line asks for.
#[derive(Debug, PartialEq, Eq)]
enum Mode<'a> {
    ListMarkets {
        postal_code: &'a str,
    },
    ExportOffers {
        market_id: &'a str,
        output_file: &'a Path,
        highlights: Option<&'a Path>,
    },
    Usage,
}

impl Cli {
    fn mode(&self) -> Mode<'_> {
        if let Some(postal_code) = self.list_markets.as_deref().filter(|plz| !plz.is_empty()) {
            return Mode::ListMarkets { postal_code };
        }
        match (self.market_id.as_deref(), self.output_file.as_deref()) {
            (Some(market_id), Some(output_file)) if !market_id.is_empty() => Mode::ExportOffers {
                market_id,
                output_file,
                highlights: self.highlights.as_deref(),
            },
            _ => Mode::Usage,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = match offerfeed_core::load_app_config() {
        Ok(config) => config,
        Err(e) => {
            println!("FAIL: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.mode() {
        Mode::Usage => {
            Cli::command().print_help()?;
            Ok(ExitCode::SUCCESS)
        }
        Mode::ListMarkets { postal_code } => {
            let client = start_feed_client(&config)?;
            markets::run_list_markets(&client, &config, postal_code).await
        }
        Mode::ExportOffers {
            market_id,
            output_file,
            highlights,
        } => {
            let client = start_feed_client(&config)?;
            offers::run_offer_export(&client, &config, market_id, output_file, highlights).await
        }
    }
}

/// Builds the feed client and wires Ctrl-C to its cancel token.
fn start_feed_client(config: &AppConfig) -> anyhow::Result<FeedClient> {
    let cancel = CancelToken::new();
    spawn_ctrl_c_handler(cancel.clone());
    build_feed_client(config, cancel)
}

/// Cancels in-flight fetches on the first Ctrl-C.
fn spawn_ctrl_c_handler(cancel: CancelToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::warn!("interrupted; cancelling fetch");
                cancel.cancel();
            }
            Err(e) => tracing::warn!(error = %e, "could not listen for ctrl-c"),
        }
    });
}

fn build_feed_client(config: &AppConfig, cancel: CancelToken) -> anyhow::Result<FeedClient> {
    let client = FeedClient::new(&config.user_agent, config.direct_timeout_secs)
        .map_err(|e| anyhow::anyhow!("failed to build feed client: {e}"))?
        .with_proxy(ProxyRoute::from_settings(&config.proxy))
        .with_retry_policy(RetryPolicy::from_settings(&config.retry))
        .with_cancel_token(cancel);

    tracing::debug!(
        proxy = client.uses_proxy(),
        max_attempts = config.retry.max_attempts,
        deadline = ?config.retry.deadline_secs.map(Duration::from_secs),
        "feed client ready"
    );
    Ok(client)
}

#[cfg(test)]
mod tests;
