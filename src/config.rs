//! User configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the per-user config directory.
pub const CONFIG_DIR_ENV: &str = "DOCKERMONITOR_CONFIG_DIR";

const APP_DIR_NAME: &str = "dockermonitor";
const SETTINGS_FILE: &str = "config.toml";
const WATCHLIST_FILE: &str = "dockermonitor.cfg";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub docker: DockerConfig,

    #[serde(default)]
    pub watchlist: WatchlistConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DockerConfig {
    #[serde(default = "default_binary")]
    pub binary: String,

    #[serde(default = "default_true")]
    pub include_stopped: bool,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            include_stopped: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WatchlistConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

fn default_binary() -> String {
    "docker".to_string()
}

fn default_true() -> bool {
    true
}

/// Resolve the base config directory: an explicit override wins, then
/// `$DOCKERMONITOR_CONFIG_DIR`, then the platform config dir.
pub fn get_config_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Cannot find config directory"))
}

fn settings_path(config_dir: &Path) -> PathBuf {
    config_dir.join(APP_DIR_NAME).join(SETTINGS_FILE)
}

impl Config {
    pub fn load(config_dir: &Path) -> Result<Self> {
        let path = settings_path(config_dir);
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid settings in {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self, config_dir: &Path) -> Result<()> {
        let path = settings_path(config_dir);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Where the watchlist blob lives. Defaults to `dockermonitor.cfg`
    /// directly under the config dir, e.g. `~/.config/dockermonitor.cfg`.
    pub fn watchlist_path(&self, config_dir: &Path) -> PathBuf {
        self.watchlist
            .path
            .clone()
            .unwrap_or_else(|| config_dir.join(WATCHLIST_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = Config::load(temp.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.docker.binary, "docker");
        assert!(config.docker.include_stopped);
    }

    #[test]
    fn test_save_then_load() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut config = Config::default();
        config.docker.binary = "podman".to_string();
        config.docker.include_stopped = false;
        config.watchlist.path = Some(PathBuf::from("/srv/watch.txt"));
        config.save(temp.path()).unwrap();

        let loaded = Config::load(temp.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path().join(APP_DIR_NAME);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(SETTINGS_FILE), "[docker]\ninclude_stopped = false\n").unwrap();

        let config = Config::load(temp.path()).unwrap();
        assert_eq!(config.docker.binary, "docker");
        assert!(!config.docker.include_stopped);
        assert!(config.watchlist.path.is_none());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path().join(APP_DIR_NAME);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(SETTINGS_FILE), "[docker\nbinary = ").unwrap();

        assert!(Config::load(temp.path()).is_err());
    }

    #[test]
    fn test_default_watchlist_path() {
        let config = Config::default();
        assert_eq!(
            config.watchlist_path(Path::new("/home/u/.config")),
            PathBuf::from("/home/u/.config/dockermonitor.cfg")
        );
    }

    #[test]
    fn test_watchlist_path_override() {
        let mut config = Config::default();
        config.watchlist.path = Some(PathBuf::from("/tmp/list.txt"));
        assert_eq!(
            config.watchlist_path(Path::new("/ignored")),
            PathBuf::from("/tmp/list.txt")
        );
    }

    #[test]
    #[serial]
    fn test_config_dir_explicit_override_wins() {
        std::env::set_var(CONFIG_DIR_ENV, "/from/env");
        let dir = get_config_dir(Some(Path::new("/explicit"))).unwrap();
        std::env::remove_var(CONFIG_DIR_ENV);
        assert_eq!(dir, PathBuf::from("/explicit"));
    }

    #[test]
    #[serial]
    fn test_config_dir_from_env() {
        std::env::set_var(CONFIG_DIR_ENV, "/from/env");
        let dir = get_config_dir(None).unwrap();
        std::env::remove_var(CONFIG_DIR_ENV);
        assert_eq!(dir, PathBuf::from("/from/env"));
    }
}
