//! Display strings derived from numeric fields. Computed on read, never stored.

use chrono::Local;
use chrono_tz::Tz;

use crate::model::{ForecastSlot, SlotKind};

/// `72.9` -> `72°`. Truncates toward zero.
pub fn degrees(temperature: f64) -> String {
    format!("{}°", temperature as i64)
}

/// `0.37` -> `37%`.
pub fn percent(fraction: f64) -> String {
    format!("{}%", (fraction * 100.0) as i64)
}

/// `"52° / 71°"`, as shown under each forecast icon.
pub fn low_high(low: f64, high: f64) -> String {
    format!("{} / {}", degrees(low), degrees(high))
}

/// Heading of a forecast panel in the forecast location's own timezone.
///
/// Hourly slots show the hour (`3 PM`), daily slots the weekday (`Monday`).
/// An unknown timezone id falls back to the local zone.
pub fn slot_label(slot: &ForecastSlot) -> String {
    let pattern = match slot.kind {
        SlotKind::Hourly => "%-I %p",
        SlotKind::Daily => "%A",
    };

    match slot.time_zone.parse::<Tz>() {
        Ok(tz) => slot.date_time.with_timezone(&tz).format(pattern).to_string(),
        Err(_) => slot.date_time.with_timezone(&Local).format(pattern).to_string(),
    }
}
