//! Maps provider icon codes to icon asset names.
//!
//! Codes look like `<condition>-day` or `<condition>-night`. Asset names drop
//! the hyphens and the `day` token; night variants get an `nt_` prefix.

use std::path::PathBuf;

/// Asset shown when a code has no matching icon.
pub const UNKNOWN_ICON: &str = "unknown";

/// Asset key for an icon code, e.g. `clear-night` -> `nt_clear`.
pub fn icon_key(code: &str) -> String {
    let key = code.replace('-', "").replace("day", "");
    if key.contains("night") {
        format!("nt_{}", key.replace("night", ""))
    } else {
        key
    }
}

/// Something that can turn an asset key into a loadable icon.
pub trait IconCatalog {
    fn lookup(&self, key: &str) -> Option<PathBuf>;
}

/// Icons stored as `<dir>/<key>.png`.
#[derive(Debug, Clone)]
pub struct DirectoryCatalog {
    dir: PathBuf,
}

impl DirectoryCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl IconCatalog for DirectoryCatalog {
    fn lookup(&self, key: &str) -> Option<PathBuf> {
        let path = self.dir.join(format!("{key}.png"));
        path.is_file().then_some(path)
    }
}

/// Resolve an icon, falling back to [`UNKNOWN_ICON`] and then to no icon.
pub fn resolve_icon(code: &str, catalog: &dyn IconCatalog) -> Option<PathBuf> {
    let key = icon_key(code);
    catalog.lookup(&key).or_else(|| {
        tracing::debug!(code, key = %key, "No icon asset, using fallback");
        catalog.lookup(UNKNOWN_ICON)
    })
}
