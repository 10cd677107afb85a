//! Settings loading (config.toml + environment overrides).
//!
//! Lookup order for the settings file:
//!
//! 1. explicit path passed to [`init`] (`--config`)
//! 2. `$RPMNAME_CONFIG`
//! 3. `<config dir>/rpmname/config.toml`
//!
//! A missing file means built-in defaults. `RPMNAME_DISTRO` and
//! `RPMNAME_PYTHON_VERSION` are applied on top of whatever was loaded.
//!
//! ```toml
//! distro = "fedora"
//! default_python_version = "2"
//!
//! [catalog]
//! command = "dnf repoquery --quiet --queryformat '%{name}\n'"
//! # file = "/var/cache/rpmname/names.txt"
//! ```

use crate::error::ConfigError;
use crate::name::{DEFAULT_DISTRO, DEFAULT_PYTHON_VERSION};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static SETTINGS: OnceLock<Settings> = OnceLock::new();
static SETTINGS_PATH: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Environment variable pointing at a settings file.
pub const CONFIG_ENV: &str = "RPMNAME_CONFIG";
/// Environment override for [`Settings::distro`].
pub const DISTRO_ENV: &str = "RPMNAME_DISTRO";
/// Environment override for [`Settings::default_python_version`].
pub const PYTHON_VERSION_ENV: &str = "RPMNAME_PYTHON_VERSION";

/// Conversion settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Target distribution
    pub distro: String,
    /// Runtime version that needs no number in package names
    pub default_python_version: String,
    /// Catalog backend selection
    pub catalog: CatalogSettings,
}

/// Catalog backend settings. `file` takes precedence over `command`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Command listing package names
    pub command: Option<String>,
    /// File with one package name per line
    pub file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            distro: DEFAULT_DISTRO.to_string(),
            default_python_version: DEFAULT_PYTHON_VERSION.to_string(),
            catalog: CatalogSettings::default(),
        }
    }
}

impl Settings {
    /// Parse settings from TOML text. `path` is only used in errors.
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Load settings from `path`; a missing file gives defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("Config: no file at {}", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Config: loaded {}", path.display());
        Self::from_toml(&content, path)
    }

    /// Apply `RPMNAME_*` overrides from `lookup` (normally `std::env::var`).
    pub fn apply_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(distro) = lookup(DISTRO_ENV).filter(|v| !v.is_empty()) {
            debug!("Config: {}={}", DISTRO_ENV, distro);
            self.distro = distro;
        }
        if let Some(version) = lookup(PYTHON_VERSION_ENV).filter(|v| !v.is_empty()) {
            debug!("Config: {}={}", PYTHON_VERSION_ENV, version);
            self.default_python_version = version;
        }
        self
    }
}

/// Load process-wide settings, honoring an explicit `path`.
///
/// Only the first call loads; later calls return the cached settings.
pub fn init(path: Option<PathBuf>) -> Result<&'static Settings, ConfigError> {
    if let Some(settings) = SETTINGS.get() {
        return Ok(settings);
    }

    let path = path.or_else(default_path);
    let settings = match &path {
        Some(p) => Settings::load(p)?,
        None => Settings::default(),
    }
    .apply_env(|key| std::env::var(key).ok());

    let _ = SETTINGS_PATH.set(path);
    Ok(SETTINGS.get_or_init(|| settings))
}

/// Process-wide settings, loading from the default location if needed.
pub fn get() -> Result<&'static Settings, ConfigError> {
    init(None)
}

/// Settings file consulted by [`init`], if any.
pub fn config_path() -> Option<&'static Path> {
    SETTINGS_PATH.get().and_then(|p| p.as_deref())
}

/// Settings file location when none is given explicitly.
pub fn default_path() -> Option<PathBuf> {
    if let Ok(raw) = std::env::var(CONFIG_ENV) {
        if !raw.is_empty() {
            return Some(PathBuf::from(raw));
        }
    }
    dirs::config_dir().map(|d| d.join("rpmname").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.distro, "fedora");
        assert_eq!(s.default_python_version, "2");
        assert!(s.catalog.command.is_none());
        assert!(s.catalog.file.is_none());
    }

    #[test]
    fn parse_partial() {
        let s = Settings::from_toml("distro = \"mageia\"\n", Path::new("x.toml")).unwrap();
        assert_eq!(s.distro, "mageia");
        assert_eq!(s.default_python_version, "2");
    }

    #[test]
    fn parse_catalog_section() {
        let raw = r#"
default_python_version = "3"

[catalog]
file = "/tmp/names.txt"
"#;
        let s = Settings::from_toml(raw, Path::new("x.toml")).unwrap();
        assert_eq!(s.default_python_version, "3");
        assert_eq!(s.catalog.file, Some(PathBuf::from("/tmp/names.txt")));
    }

    #[test]
    fn parse_error_names_file() {
        let err = Settings::from_toml("distro = [", Path::new("broken.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn load_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let s = Settings::load(&dir.path().join("none.toml")).unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "distro = \"epel7\"\n[catalog]\ncommand = \"cat names\"\n").unwrap();
        let s = Settings::load(&path).unwrap();
        assert_eq!(s.distro, "epel7");
        assert_eq!(s.catalog.command.as_deref(), Some("cat names"));
    }

    #[test]
    fn env_overrides() {
        let env: HashMap<&str, &str> = [(DISTRO_ENV, "mageia"), (PYTHON_VERSION_ENV, "")]
            .into_iter()
            .collect();
        let s = Settings::default().apply_env(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(s.distro, "mageia");
        // Empty values are ignored
        assert_eq!(s.default_python_version, "2");
    }
}
