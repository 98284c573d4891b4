use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Number of forecast panels shown along the bottom of the display.
pub const SLOT_COUNT: usize = 4;

/// Unit system understood by the forecast provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Units {
    Auto,
    Ca,
    Uk2,
    #[default]
    Us,
    Si,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Auto => "auto",
            Units::Ca => "ca",
            Units::Uk2 => "uk2",
            Units::Us => "us",
            Units::Si => "si",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Auto, Units::Ca, Units::Uk2, Units::Us, Units::Si]
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lower = value.trim().to_lowercase();

        Units::all().iter().copied().find(|u| u.as_str() == lower).ok_or_else(|| {
            anyhow::anyhow!("Unknown units '{value}'. Supported units: auto, ca, uk2, us, si.")
        })
    }
}

/// Declares [`Language`] together with its provider codes.
macro_rules! languages {
    ($($variant:ident => $code:literal,)+) => {
        /// Language for the provider's human-readable summaries.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Language {
            $(
                #[doc = $code]
                $variant,
            )+
        }

        impl Language {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Language::$variant => $code,)+
                }
            }

            pub const fn all() -> &'static [Language] {
                &[$(Language::$variant,)+]
            }
        }
    };
}

languages! {
    Ar => "ar",
    Az => "az",
    Be => "be",
    Bg => "bg",
    Bn => "bn",
    Bs => "bs",
    Ca => "ca",
    Cs => "cs",
    Cy => "cy",
    Da => "da",
    De => "de",
    El => "el",
    En => "en",
    Eo => "eo",
    Es => "es",
    Et => "et",
    Fi => "fi",
    Fr => "fr",
    He => "he",
    Hi => "hi",
    Hr => "hr",
    Hu => "hu",
    Id => "id",
    Is => "is",
    It => "it",
    Ja => "ja",
    Ka => "ka",
    Kn => "kn",
    Ko => "ko",
    Kw => "kw",
    Lv => "lv",
    Ml => "ml",
    Mr => "mr",
    Nb => "nb",
    Nl => "nl",
    No => "no",
    Pa => "pa",
    Pl => "pl",
    Pt => "pt",
    Ro => "ro",
    Ru => "ru",
    Sk => "sk",
    Sl => "sl",
    Sq => "sq",
    Sr => "sr",
    Sv => "sv",
    Ta => "ta",
    Te => "te",
    Tet => "tet",
    Tr => "tr",
    Uk => "uk",
    Ur => "ur",
    XPigLatin => "x-pig-latin",
    Zh => "zh",
    ZhTw => "zh-tw",
}

impl Default for Language {
    fn default() -> Self {
        Language::En
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        // Accept both "zh-tw" and "zh_tw".
        let normalized = value.trim().to_lowercase().replace('_', "-");

        Language::all().iter().copied().find(|l| l.as_str() == normalized).ok_or_else(|| {
            anyhow::anyhow!("Unknown language '{value}'. Expected a provider language code such as 'en' or 'de'.")
        })
    }
}

/// Parameters of a single forecast request.
///
/// Rebuilt from configuration on every refresh cycle, never cached.
#[derive(Clone, PartialEq)]
pub struct ForecastRequest {
    pub api_key: String,
    pub longitude: f64,
    pub latitude: f64,
    pub units: Units,
    pub language: Language,
}

impl ForecastRequest {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            api_key: config.api_key.clone(),
            longitude: config.longitude,
            latitude: config.latitude,
            units: config.units()?,
            language: config.language()?,
        })
    }
}

// Keeps the credential out of logs.
impl fmt::Debug for ForecastRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForecastRequest")
            .field("api_key", &"<redacted>")
            .field("longitude", &self.longitude)
            .field("latitude", &self.latitude)
            .field("units", &self.units)
            .field("language", &self.language)
            .finish()
    }
}

/// The "now" snapshot shown in the middle of the display.
///
/// `temperature_high` holds the actual temperature and `temperature_low` the
/// feels-like temperature. They are not diurnal extremes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub date_time: DateTime<Utc>,
    pub time_zone: String,
    pub icon: String,
    pub summary: String,
    pub temperature_high: f64,
    pub temperature_low: f64,
    pub humidity: f64,
    pub pressure: f64,
}

impl Default for CurrentConditions {
    fn default() -> Self {
        Self {
            date_time: Utc::now(),
            time_zone: String::new(),
            icon: String::new(),
            summary: String::new(),
            temperature_high: 0.0,
            temperature_low: 0.0,
            humidity: 0.0,
            pressure: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SlotKind {
    Hourly,
    #[default]
    Daily,
}

/// One fixed-position forecast panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSlot {
    index: usize,
    pub kind: SlotKind,
    pub date_time: DateTime<Utc>,
    pub time_zone: String,
    pub icon: String,
    pub temperature_low: f64,
    pub temperature_high: f64,
    pub precipitation: f64,
}

impl ForecastSlot {
    /// Placeholder slot shown until the first successful refresh.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            kind: SlotKind::default(),
            date_time: Utc::now(),
            time_zone: String::new(),
            icon: String::new(),
            temperature_low: 0.0,
            temperature_high: 0.0,
            precipitation: 0.0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

/// Everything a refresh cycle publishes, as one value.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    pub slots: [ForecastSlot; SLOT_COUNT],
}

impl WeatherSnapshot {
    pub fn slot_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter().map(ForecastSlot::index)
    }
}

impl Default for WeatherSnapshot {
    fn default() -> Self {
        Self {
            current: CurrentConditions::default(),
            slots: std::array::from_fn(ForecastSlot::new),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_as_str_roundtrip() {
        for units in Units::all() {
            let parsed: Units = units.as_str().parse().expect("roundtrip should succeed");
            assert_eq!(*units, parsed);
        }
    }

    #[test]
    fn unknown_units_error() {
        let err = "kelvin".parse::<Units>().unwrap_err();
        assert!(err.to_string().contains("Unknown units"));
    }

    #[test]
    fn language_parse_accepts_underscore_and_case() {
        assert_eq!("ZH_TW".parse::<Language>().unwrap(), Language::ZhTw);
        assert_eq!("De".parse::<Language>().unwrap(), Language::De);
        assert!("klingon".parse::<Language>().is_err());
    }

    #[test]
    fn every_provider_language_roundtrips() {
        for lang in Language::all() {
            let parsed: Language = lang.as_str().parse().expect("roundtrip should succeed");
            assert_eq!(*lang, parsed);
        }
        assert_eq!(Language::all().len(), 55);
        assert_eq!(Language::default(), Language::En);
    }

    #[test]
    fn less_common_languages_build_a_request() {
        for code in [
            "hr", "he", "ro", "id", "sl", "sr", "et", "is", "az", "be", "bs", "kw", "tet",
            "x-pig-latin", "x_pig_latin", "bn", "eo", "hi", "ka", "kn", "lv", "ml", "mr", "no",
            "pa", "sq", "ta", "te", "ur",
        ] {
            let cfg = Config { lang: code.into(), ..Config::default() };
            let request = ForecastRequest::from_config(&cfg)
                .unwrap_or_else(|e| panic!("'{code}' should be accepted: {e:#}"));
            assert_eq!(request.language.as_str(), code.replace('_', "-"));
        }
    }

    #[test]
    fn default_snapshot_has_fixed_slot_indices() {
        let snapshot = WeatherSnapshot::default();
        let indices: Vec<usize> = snapshot.slot_indices().collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn request_from_default_config() {
        let request = ForecastRequest::from_config(&Config::default()).unwrap();
        assert_eq!(request.units, Units::Us);
        assert_eq!(request.language, Language::En);
        assert_eq!(request.api_key, "");
    }

    #[test]
    fn request_debug_hides_api_key() {
        let cfg = Config { api_key: "SECRET".into(), ..Config::default() };
        let request = ForecastRequest::from_config(&cfg).unwrap();
        assert!(!format!("{request:?}").contains("SECRET"));
    }
}
