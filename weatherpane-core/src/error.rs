//! Error types for the refresh pipeline.
//!
//! None of these reach the display layer; a failed cycle is logged and the
//! previously published state stays in place.

use std::time::Duration;

use thiserror::Error;

/// Failure talking to the forecast provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("No API key configured. Hint: run `weatherpane configure` and enter your API key.")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode provider response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The provider payload lacked something the display needs.
#[derive(Debug, Error, PartialEq)]
pub enum MapError {
    #[error("Forecast payload is missing `{0}`")]
    MissingField(String),

    #[error("Forecast payload has an out-of-range timestamp at `{path}`: {value}")]
    InvalidTimestamp { path: String, value: i64 },
}

/// One refresh cycle failed. The store was left untouched.
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("Configuration error: {0:#}")]
    Config(anyhow::Error),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Map(#[from] MapError),

    #[error("Provider did not respond within {0:?}")]
    Timeout(Duration),
}
