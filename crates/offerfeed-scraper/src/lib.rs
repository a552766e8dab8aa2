//! Fetching, extracting and exporting a store's offers feed.

pub mod cancel;
pub mod client;
pub mod error;
pub mod export;
mod feed_value;
pub mod normalize;
pub mod offers;
pub mod retry;
pub mod stores;

pub use cancel::CancelToken;
pub use client::{FeedClient, FeedResponse, ProxyRoute};
pub use error::{ExportError, FeedError};
pub use export::write_export;
pub use offers::{extract_offers, format_offer_line, FeedOutcome, OfferExport, SkipCounts};
pub use retry::RetryPolicy;
pub use stores::{extract_stores, render_listing, StoreOutcome};
