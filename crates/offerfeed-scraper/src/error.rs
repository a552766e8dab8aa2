use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid endpoint URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("could not configure HTTP client: {source}")]
    ClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("giving up after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        last: Box<FeedError>,
    },

    #[error("deadline of {deadline_secs}s exceeded after {attempts} attempts")]
    DeadlineExceeded { attempts: u32, deadline_secs: u64 },

    #[error("fetch cancelled after {attempts} attempts")]
    Cancelled { attempts: u32 },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("output path \"{}\" has no parent directory", path.display())]
    NoParent { path: PathBuf },

    #[error("failed to write output file \"{}\": {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
