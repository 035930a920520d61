// src/config.rs
//
// Settings for the catalogue store.
//
// Settings live in `config/configuration.json` under the working
// directory. Every field has a default, and a missing file yields
// `Settings::default()`, so a fresh checkout works with no setup.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Directory holding the configuration file, relative to the workdir
pub const CONFIGURATION_DIRECTORY: &str = "config";

/// Name of the configuration file
pub const CONFIGURATION_FILE: &str = "configuration.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub images: ImageSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseSettings {
    /// Path of the SQLite database file
    pub path: PathBuf,
    pub pool: PoolSettings,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/toonhub.db"),
            pool: PoolSettings::default(),
        }
    }
}

/// Connection pool knobs. Mapped onto r2d2 and rusqlite:
/// idle connections are validated against `idle_timeout_secs`, and each
/// connection keeps `statement_cache_capacity` prepared statements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PoolSettings {
    pub max_size: u32,
    pub min_idle: Option<u32>,
    /// How long `Pool::get` blocks before failing
    pub connection_timeout_secs: u64,
    pub idle_timeout_secs: Option<u64>,
    /// Validate connections on checkout with a test query
    pub test_on_check_out: bool,
    pub statement_cache_capacity: usize,
    /// SQLite busy handler timeout, in milliseconds
    pub busy_timeout_ms: u32,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_size: 15,
            min_idle: None,
            connection_timeout_secs: 30,
            idle_timeout_secs: Some(1800),
            test_on_check_out: true,
            statement_cache_capacity: 50,
            busy_timeout_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageSettings {
    /// Directory the image tree lives under; pictures are stored at
    /// `<root>/images/<cartoon title>/<file name>`
    pub root: PathBuf,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
        }
    }
}

impl Settings {
    /// Load settings from `config/configuration.json` under the given
    /// working directory. A missing file is not an error; malformed JSON is.
    pub fn load_from_dir(workdir: &Path) -> AppResult<Self> {
        let path = workdir.join(CONFIGURATION_DIRECTORY).join(CONFIGURATION_FILE);
        if !path.exists() {
            log::debug!("no configuration file at {}, using defaults", path.display());
            return Ok(Settings::default());
        }
        Self::load(&path)
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| AppError::Config(format!("cannot parse {}: {}", path.display(), e)))?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.database.path, PathBuf::from("data/toonhub.db"));
        assert_eq!(settings.database.pool.max_size, 15);
        assert_eq!(settings.database.pool.statement_cache_capacity, 50);
        assert!(settings.database.pool.test_on_check_out);
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join(CONFIGURATION_DIRECTORY);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(
            config_dir.join(CONFIGURATION_FILE),
            r#"{"database": {"path": "catalog.db", "pool": {"max_size": 4}}}"#,
        )
        .unwrap();

        let settings = Settings::load_from_dir(dir.path()).unwrap();
        assert_eq!(settings.database.path, PathBuf::from("catalog.db"));
        assert_eq!(settings.database.pool.max_size, 4);
        // untouched knobs keep their defaults
        assert_eq!(settings.database.pool.busy_timeout_ms, 5000);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from_dir(dir.path()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join(CONFIGURATION_DIRECTORY);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join(CONFIGURATION_FILE), "{not json").unwrap();

        assert!(Settings::load_from_dir(dir.path()).is_err());
    }
}
