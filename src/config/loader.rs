//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/gymlog/config.toml) or an explicit file
//! 3. Environment variables (GYMLOG_* prefix, `__` between nested keys)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::constants::store;
use crate::types::{GymError, Result};

/// Environment variable prefix, e.g. `GYMLOG_STORE__PATH` -> `store.path`
pub const ENV_PREFIX: &str = "GYMLOG_";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with the full resolution chain:
    /// defaults → global → env vars
    pub fn load() -> Result<Config> {
        Self::load_with(None)
    }

    /// Load configuration, reading `config_file` instead of the global file
    /// when one is given.
    pub fn load_with(config_file: Option<&Path>) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        match config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(GymError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                debug!("Loading config from: {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
            None => {
                if let Some(global_path) = Self::global_config_path()
                    && global_path.exists()
                {
                    debug!("Loading global config from: {}", global_path.display());
                    figment = figment.merge(Toml::file(&global_path));
                }
            }
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| GymError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| GymError::Config(format!("Configuration error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/gymlog/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
            .map(|p| p.join(store::APP_DIR))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Render the effective configuration as TOML or pretty JSON
    pub fn render(config: &Config, as_json: bool) -> Result<String> {
        if as_json {
            Ok(serde_json::to_string_pretty(config)?)
        } else {
            toml::to_string_pretty(config).map_err(|e| GymError::Config(e.to_string()))
        }
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Write the default global config file, keeping an existing one unless
    /// `force` is set.
    pub fn init_global(force: bool) -> Result<PathBuf> {
        let global_dir = Self::global_dir().ok_or_else(|| {
            GymError::Config("Cannot determine global config directory".to_string())
        })?;
        Self::init_in(&global_dir, force)
    }

    fn init_in(dir: &Path, force: bool) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;

        let config_path = dir.join("config.toml");
        if !config_path.exists() || force {
            fs::write(&config_path, Self::default_global_config())?;
            info!("Created global config: {}", config_path.display());
        } else {
            info!("Global config exists: {}", config_path.display());
        }

        Ok(config_path)
    }

    /// Default global config content (TOML)
    fn default_global_config() -> String {
        format!(
            r#"# gymlog configuration
# Environment variables override these values, e.g. GYMLOG_STORE__PATH.

version = "1.0"

[store]
# Location of the SQLite file. Its directory is created on first use.
path = "{}"

# Table names. Changing them on an existing store starts a fresh set of tables.
[tables]
exercise = "exercise"
session = "session"
session_details = "session_details"
intensity = "intensity"
"#,
            super::types::default_store_path()
                .display()
                .to_string()
                .replace('\\', "\\\\")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use tempfile::TempDir;

    #[test]
    fn test_load_default_config() {
        Jail::expect_with(|jail| {
            let config_home = jail.directory().to_path_buf();
            jail.set_env("XDG_CONFIG_HOME", config_home.display());
            let config = ConfigLoader::load().unwrap();
            assert_eq!(config.version, "1.0");
            assert_eq!(config.tables, crate::config::TableNames::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_reads_global_file() {
        Jail::expect_with(|jail| {
            let config_home = jail.directory().to_path_buf();
            jail.set_env("XDG_CONFIG_HOME", config_home.display());
            jail.create_dir("gymlog")?;
            jail.create_file("gymlog/config.toml", "[tables]\nexercise = \"lifts\"\n")?;

            let config = ConfigLoader::load().unwrap();
            assert_eq!(config.tables.exercise, "lifts");
            Ok(())
        });
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[store]
path = "/tmp/gymlog-test/gym.db"

[tables]
session = "workout"
"#,
        )
        .unwrap();

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.store.path, PathBuf::from("/tmp/gymlog-test/gym.db"));
        assert_eq!(config.tables.session, "workout");
        assert_eq!(config.tables.exercise, "exercise");
    }

    #[test]
    fn test_load_with_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.toml");
        let err = ConfigLoader::load_with(Some(&missing)).unwrap_err();
        assert!(matches!(err, GymError::Config(_)));
    }

    #[test]
    fn test_load_from_file_rejects_bad_table() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[tables]\nexercise = \"bad name\"\n").unwrap();
        assert!(ConfigLoader::load_from_file(&path).is_err());
    }

    #[test]
    fn test_init_writes_loadable_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = ConfigLoader::init_in(&temp_dir.path().join("gymlog"), false).unwrap();
        assert!(path.exists());

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.tables, crate::config::TableNames::default());

        fs::write(&path, "version = \"custom\"\n").unwrap();
        ConfigLoader::init_in(&temp_dir.path().join("gymlog"), false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "version = \"custom\"\n");
    }

    #[test]
    fn test_render_formats() {
        let config = Config::default();
        let toml_out = ConfigLoader::render(&config, false).unwrap();
        assert!(toml_out.contains("[tables]"));
        let json_out = ConfigLoader::render(&config, true).unwrap();
        assert!(json_out.contains("\"session_details\""));
    }

    #[test]
    fn test_env_override() {
        Jail::expect_with(|jail| {
            let config_home = jail.directory().to_path_buf();
            jail.set_env("XDG_CONFIG_HOME", config_home.display());
            jail.set_env("GYMLOG_TABLES__INTENSITY", "effort");
            let config = ConfigLoader::load().unwrap();
            assert_eq!(config.tables.intensity, "effort");
            Ok(())
        });
    }
}
