use weatherpane_core::{
    WeatherSnapshot,
    format::{degrees, low_high, percent, slot_label},
    icon::{IconCatalog, icon_key, resolve_icon},
};

/// Text rendering of the clock line, current conditions and forecast row.
pub fn render(time_text: &str, snapshot: &WeatherSnapshot, icons: Option<&dyn IconCatalog>) -> String {
    let current = &snapshot.current;

    let mut out = format!(
        "{time_text}\n\n  {}  {}  [{}]\n  Feels Like: {}   Humidity: {}   Pressure: {}\n\n",
        degrees(current.temperature_high),
        current.summary,
        icon_label(&current.icon, icons),
        degrees(current.temperature_low),
        percent(current.humidity),
        current.pressure
    );

    for slot in &snapshot.slots {
        out.push_str(&format!(
            "  {:<10} {:<24} {:<10} {}\n",
            slot_label(slot),
            icon_label(&slot.icon, icons),
            low_high(slot.temperature_low, slot.temperature_high),
            percent(slot.precipitation)
        ));
    }

    out
}

fn icon_label(code: &str, icons: Option<&dyn IconCatalog>) -> String {
    match icons {
        Some(catalog) => match resolve_icon(code, catalog) {
            Some(path) => path.display().to_string(),
            None => "-".to_string(),
        },
        None => icon_key(code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    struct OnlyUnknown;

    impl IconCatalog for OnlyUnknown {
        fn lookup(&self, key: &str) -> Option<PathBuf> {
            (key == "unknown").then(|| PathBuf::from("icons/unknown.png"))
        }
    }

    fn snapshot() -> WeatherSnapshot {
        let mut snapshot = WeatherSnapshot::default();
        snapshot.current.summary = "Partly Cloudy".into();
        snapshot.current.icon = "partly-cloudy-day".into();
        snapshot.current.temperature_high = 72.4;
        snapshot.current.temperature_low = 75.9;
        snapshot.current.humidity = 0.37;
        snapshot.slots[1].temperature_low = 52.2;
        snapshot.slots[1].temperature_high = 71.8;
        snapshot.slots[1].precipitation = 0.4;
        snapshot
    }

    #[test]
    fn renders_current_conditions_and_slots() {
        let text = render("Sun, Jun 30  10:55:29 PM", &snapshot(), None);

        assert!(text.starts_with("Sun, Jun 30  10:55:29 PM\n"));
        assert!(text.contains("72°  Partly Cloudy  [partlycloudy]"));
        assert!(text.contains("Feels Like: 75°"));
        assert!(text.contains("Humidity: 37%"));
        assert!(text.contains("52° / 71°"));
        assert!(text.contains("40%"));
    }

    #[test]
    fn renders_header_then_one_line_per_slot() {
        let text = render("clock", &snapshot(), None);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5 + 4);
        assert_eq!(lines[0], "clock");
        assert!(lines[6].contains("52° / 71°"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn unresolved_icons_use_catalog_fallback() {
        let text = render("", &snapshot(), Some(&OnlyUnknown));
        assert!(text.contains("[icons/unknown.png]"));
    }
}
