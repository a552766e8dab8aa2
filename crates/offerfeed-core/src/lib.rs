pub mod app_config;
pub mod config;
pub mod highlights;
pub mod records;
pub mod text;

pub use app_config::{AppConfig, ProxySettings, RetrySettings, StoreSearchSettings};
pub use config::{load_app_config, load_app_config_from_env};
pub use highlights::{load_highlights, HighlightsError};
pub use records::{DiscountRecord, DiscountRecordBuilder, StoreRecord};
pub use text::clean_text;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
