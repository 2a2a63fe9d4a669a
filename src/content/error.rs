//! Content API errors

use thiserror::Error;

/// Anything that can go wrong while talking to the content API
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("content API returned {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("malformed content response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid cursor {0:?}")]
    InvalidCursor(String),

    #[error("content API at {0} reports no master ref")]
    NoMasterRef(String),

    #[error("invalid content endpoint {0:?}")]
    InvalidEndpoint(String),

    #[error("no content endpoint configured")]
    NoEndpoint,
}
