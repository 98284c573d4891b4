//! Turns a provider payload into display records.
//!
//! Mapping is all-or-nothing: every field needed for the current conditions
//! and for each slot that has a matching daily entry is validated before a
//! [`MappedForecast`] is returned, so applying it never mixes old and new data.

use chrono::{DateTime, Utc};

use crate::{
    error::MapError,
    model::{CurrentConditions, ForecastSlot, WeatherSnapshot},
    provider::{RawDataPoint, RawForecast},
};

/// New values for one forecast slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotUpdate {
    pub index: usize,
    pub time_zone: String,
    pub date_time: DateTime<Utc>,
    pub icon: String,
    pub temperature_low: f64,
    pub temperature_high: f64,
    pub precipitation: f64,
}

impl SlotUpdate {
    fn apply_to(&self, slot: &mut ForecastSlot) {
        slot.time_zone.clone_from(&self.time_zone);
        slot.date_time = self.date_time;
        slot.icon.clone_from(&self.icon);
        slot.temperature_low = self.temperature_low;
        slot.temperature_high = self.temperature_high;
        slot.precipitation = self.precipitation;
    }
}

/// Result of a successful mapping, ready to be published in one step.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedForecast {
    pub current: CurrentConditions,
    pub slots: Vec<SlotUpdate>,
}

impl MappedForecast {
    /// Overwrite current conditions and mutate matching slots in place.
    ///
    /// Slots without an update keep their previous values.
    pub fn apply(&self, snapshot: &mut WeatherSnapshot) {
        snapshot.current = self.current.clone();

        for update in &self.slots {
            if let Some(slot) = snapshot.slots.iter_mut().find(|s| s.index() == update.index) {
                update.apply_to(slot);
            }
        }
    }
}

/// Map `raw` for the given slot indices.
pub fn map_forecast(
    raw: &RawForecast,
    slot_indices: impl IntoIterator<Item = usize>,
) -> Result<MappedForecast, MapError> {
    let time_zone = require(raw.timezone.as_ref(), "timezone")?;
    let currently = require(raw.currently.as_ref(), "currently")?;
    let daily = require(raw.daily.as_ref(), "daily")?;

    let current = map_current(currently, time_zone)?;

    let mut slots = Vec::new();
    for index in slot_indices {
        // Fewer daily entries than slots: the rest keep their old values.
        let Some(point) = daily.data.get(index) else {
            continue;
        };
        slots.push(map_slot(point, index, time_zone)?);
    }

    Ok(MappedForecast { current, slots })
}

fn map_current(point: &RawDataPoint, time_zone: &str) -> Result<CurrentConditions, MapError> {
    Ok(CurrentConditions {
        date_time: timestamp(point.time, "currently.time")?,
        time_zone: time_zone.to_string(),
        icon: require(point.icon.as_ref(), "currently.icon")?.clone(),
        summary: require(point.summary.as_ref(), "currently.summary")?.clone(),
        // Actual temperature is shown as "high", feels-like as "low".
        temperature_high: *require(point.temperature.as_ref(), "currently.temperature")?,
        temperature_low: *require(
            point.apparent_temperature.as_ref(),
            "currently.apparentTemperature",
        )?,
        humidity: *require(point.humidity.as_ref(), "currently.humidity")?,
        pressure: *require(point.pressure.as_ref(), "currently.pressure")?,
    })
}

fn map_slot(point: &RawDataPoint, index: usize, time_zone: &str) -> Result<SlotUpdate, MapError> {
    let field = |name: &str| format!("daily.data[{index}].{name}");

    Ok(SlotUpdate {
        index,
        time_zone: time_zone.to_string(),
        date_time: timestamp(point.time, &field("time"))?,
        icon: require(point.icon.as_ref(), &field("icon"))?.clone(),
        temperature_low: *require(point.temperature_low.as_ref(), &field("temperatureLow"))?,
        temperature_high: *require(point.temperature_high.as_ref(), &field("temperatureHigh"))?,
        precipitation: *require(point.precip_probability.as_ref(), &field("precipProbability"))?,
    })
}

fn require<'a, T>(value: Option<&'a T>, path: &str) -> Result<&'a T, MapError> {
    value.ok_or_else(|| MapError::MissingField(path.to_string()))
}

fn timestamp(value: Option<i64>, path: &str) -> Result<DateTime<Utc>, MapError> {
    let secs = *require(value.as_ref(), path)?;
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| MapError::InvalidTimestamp { path: path.to_string(), value: secs })
}
