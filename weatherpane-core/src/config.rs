use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::model::{Language, Units};

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// latitude = 47.6
/// longitude = -122.3
/// units = "us"
/// lang = "en"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: String,
    pub longitude: f64,
    pub latitude: f64,
    /// Provider unit system, e.g. "us" or "si".
    pub units: String,
    pub lang: String,
    /// Display scale factor. Only read by the display layer.
    pub scale: f64,
    /// Start the display full screen. Only read by the display layer.
    pub fullscreen: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            longitude: 0.0,
            latitude: 0.0,
            units: "us".to_string(),
            lang: "en".to_string(),
            scale: 1.0,
            fullscreen: false,
        }
    }
}

impl Config {
    pub fn units(&self) -> Result<Units> {
        self.units.parse().context("Invalid `units` in configuration")
    }

    pub fn language(&self) -> Result<Language> {
        self.lang.parse().context("Invalid `lang` in configuration")
    }

    /// Load config from `path`, or defaults if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherpane", "weatherpane")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Where the scheduler gets its configuration from on each refresh cycle.
pub trait ConfigSource: Send + Sync {
    fn load(&self) -> Result<Config>;
}

/// Re-reads the config file on every call, so edits apply on the next cycle.
#[derive(Debug, Clone)]
pub struct FileConfigSource {
    path: PathBuf,
}

impl FileConfigSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_location() -> Result<Self> {
        Ok(Self::new(Config::config_file_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for FileConfigSource {
    fn load(&self) -> Result<Config> {
        Config::load_from(&self.path)
    }
}

/// A fixed configuration, loaded once.
#[derive(Debug, Clone, Default)]
pub struct StaticConfig(pub Config);

impl ConfigSource for StaticConfig {
    fn load(&self) -> Result<Config> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = Config::default();

        assert_eq!(cfg.api_key, "");
        assert_eq!(cfg.longitude, 0.0);
        assert_eq!(cfg.latitude, 0.0);
        assert_eq!(cfg.units().unwrap(), Units::Us);
        assert_eq!(cfg.language().unwrap(), Language::En);
        assert_eq!(cfg.scale, 1.0);
        assert!(!cfg.fullscreen);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: Config = toml::from_str("api_key = \"KEY\"\nlatitude = 51.5\n").unwrap();

        assert_eq!(cfg.api_key, "KEY");
        assert_eq!(cfg.latitude, 51.5);
        assert_eq!(cfg.units, "us");
        assert_eq!(cfg.lang, "en");
    }

    #[test]
    fn invalid_units_is_reported_with_context() {
        let cfg = Config { units: "furlongs".into(), ..Config::default() };
        let err = cfg.units().unwrap_err();

        assert!(err.to_string().contains("Invalid `units`"));
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("nope.toml")).unwrap();

        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load_from_nested_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config {
            api_key: "KEY".into(),
            longitude: -122.3,
            latitude: 47.6,
            units: "si".into(),
            lang: "de".into(),
            scale: 1.5,
            fullscreen: true,
        };
        cfg.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn file_source_picks_up_edits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let source = FileConfigSource::new(&path);

        assert_eq!(source.load().unwrap().lang, "en");

        Config { lang: "fr".into(), ..Config::default() }.save_to(&path).unwrap();
        assert_eq!(source.load().unwrap().lang, "fr");
    }

    #[test]
    fn unparseable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "latitude = \"north\"").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
