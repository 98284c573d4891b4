use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::{error::ProviderError, model::ForecastRequest};

use super::{ForecastProvider, raw::RawForecast};

pub const DEFAULT_BASE_URL: &str = "https://api.darksky.net";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Dark Sky forecast API (and compatible drop-in services).
#[derive(Debug, Clone)]
pub struct DarkSkyProvider {
    base_url: String,
    http: Client,
}

impl DarkSkyProvider {
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the client at another host, e.g. a self-hosted mirror or a test server.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ProviderError> {
        Self::with_options(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_options(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .user_agent(concat!("weatherpane/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ForecastProvider for DarkSkyProvider {
    async fn fetch(&self, request: &ForecastRequest) -> Result<RawForecast, ProviderError> {
        if request.api_key.trim().is_empty() {
            return Err(ProviderError::MissingApiKey);
        }

        // The key is part of the path, so only the location is logged.
        debug!(
            base_url = %self.base_url,
            lat = request.latitude,
            lon = request.longitude,
            units = %request.units,
            lang = %request.language,
            "Fetching forecast"
        );

        let url = format!(
            "{}/forecast/{}/{},{}",
            self.base_url, request.api_key, request.latitude, request.longitude
        );

        let res = self
            .http
            .get(&url)
            .query(&[
                ("units", request.units.as_str()),
                ("lang", request.language.as_str()),
                ("exclude", "minutely"),
                ("extend", "hourly"),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::Http(e.without_url()))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| ProviderError::Http(e.without_url()))?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
