//! Wire shape of the provider's forecast response.
//!
//! Every field is optional; the mapper decides what is required.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawForecast {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// IANA timezone id of the requested location.
    pub timezone: Option<String>,
    pub currently: Option<RawDataPoint>,
    pub hourly: Option<RawDataBlock>,
    pub daily: Option<RawDataBlock>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDataBlock {
    pub summary: Option<String>,
    pub icon: Option<String>,
    #[serde(default)]
    pub data: Vec<RawDataPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDataPoint {
    /// Unix seconds.
    pub time: Option<i64>,
    pub icon: Option<String>,
    pub summary: Option<String>,
    pub temperature: Option<f64>,
    pub apparent_temperature: Option<f64>,
    pub temperature_low: Option<f64>,
    pub temperature_high: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub precip_probability: Option<f64>,
}
