use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::ProviderError, model::ForecastRequest};

pub mod darksky;
pub mod raw;

pub use darksky::DarkSkyProvider;
pub use raw::{RawDataBlock, RawDataPoint, RawForecast};

/// Source of raw forecast payloads.
///
/// Implementations own their transport timeouts; the scheduler additionally
/// bounds every call.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch(&self, request: &ForecastRequest) -> Result<RawForecast, ProviderError>;
}
