//! Configuration management for c8tfile
//!
//! Handles config file loading/saving and resolution of the effective
//! settings for a run. Config is stored at ~/.config/c8tfile/config.toml

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::models::VideoExtensions;

/// Default playback server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default playback server port
pub const DEFAULT_PORT: u16 = 8080;

/// Application configuration (every field optional on disk)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Playback server host
    pub host: Option<String>,
    /// Playback server port
    pub port: Option<u16>,
    /// Never start playback automatically
    pub queue_only: Option<bool>,
    /// Per-request timeout in seconds (no timeout when unset)
    pub request_timeout_secs: Option<u64>,
    /// Replacement set of video extensions
    pub extensions: Option<Vec<String>>,
}

impl Config {
    /// Get config file path (~/.config/c8tfile/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("c8tfile").join("config.toml"))
    }

    /// Load config from the default location
    ///
    /// On first run the file does not exist yet; a starter file with the
    /// built-in defaults is written so there is something to edit.
    pub fn load() -> Self {
        Self::path()
            .map(|p| Self::load_or_init(&p))
            .unwrap_or_default()
    }

    /// Load config from a file, writing the starter config if it is missing
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::load_from(path);
        }

        let config = Self::starter();
        if let Err(e) = config.save_to(path) {
            // Best effort save
            debug!(path = %path.display(), error = %e, "could not write starter config");
        }
        config
    }

    /// Load config from a specific file, or return default if missing/invalid
    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Config with the built-in server address and auto-play filled in
    pub fn starter() -> Self {
        Self {
            host: Some(DEFAULT_HOST.to_string()),
            port: Some(DEFAULT_PORT),
            queue_only: Some(false),
            ..Default::default()
        }
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml)?;
        Ok(())
    }

    /// Resolve the effective settings, applying overrides on top of the file
    ///
    /// Precedence: override > config file > built-in default.
    pub fn resolve(&self, overrides: Overrides) -> Settings {
        Settings {
            host: overrides
                .host
                .or_else(|| self.host.clone())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: overrides.port.or(self.port).unwrap_or(DEFAULT_PORT),
            queue_only: overrides.queue_only || self.queue_only.unwrap_or(false),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            extensions: self
                .extensions
                .as_ref()
                .map(VideoExtensions::new)
                .unwrap_or_default(),
        }
    }
}

/// Values supplied on the command line that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    /// A set flag forces queue-only; an unset flag defers to the file
    pub queue_only: bool,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub queue_only: bool,
    pub request_timeout: Option<Duration>,
    pub extensions: VideoExtensions,
}

impl Settings {
    /// Base URL of the playback server's web API
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Config::default().resolve(Overrides::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.host.is_none());
        assert!(config.queue_only.is_none());
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.base_url(), "http://127.0.0.1:8080");
        assert!(!settings.queue_only);
        assert!(settings.request_timeout.is_none());
        assert_eq!(settings.extensions, VideoExtensions::default());
    }

    #[test]
    fn test_overrides_take_precedence() {
        let config = Config {
            host: Some("10.0.0.2".to_string()),
            port: Some(9000),
            ..Default::default()
        };
        let settings = config.resolve(Overrides {
            host: None,
            port: Some(9100),
            queue_only: true,
        });
        assert_eq!(settings.base_url(), "http://10.0.0.2:9100");
        assert!(settings.queue_only);
    }

    #[test]
    fn test_queue_only_from_file() {
        let config = Config {
            queue_only: Some(true),
            ..Default::default()
        };
        assert!(config.resolve(Overrides::default()).queue_only);
    }

    #[test]
    fn test_load_from_toml() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "port = 8181\nrequest_timeout_secs = 5\nextensions = [\".webm\"]\n",
        )
        .unwrap();

        let settings = Config::load_from(&path).resolve(Overrides::default());
        assert_eq!(settings.port, 8181);
        assert_eq!(settings.request_timeout, Some(Duration::from_secs(5)));
        assert!(settings.extensions.matches(Path::new("clip.webm")));
        assert!(!settings.extensions.matches(Path::new("clip.mp4")));
    }

    #[test]
    fn test_load_from_missing_or_invalid() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(Config::load_from(&tmp.path().join("none.toml")), Config::default());

        let bad = tmp.path().join("bad.toml");
        std::fs::write(&bad, "port = \"not a number\"").unwrap();
        assert_eq!(Config::load_from(&bad), Config::default());
    }

    #[test]
    fn test_save_and_reload() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("config.toml");
        let config = Config {
            host: Some("192.168.1.20".to_string()),
            queue_only: Some(true),
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path), config);
    }

    #[test]
    fn test_first_run_writes_starter_config() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("c8tfile").join("config.toml");

        let config = Config::load_or_init(&path);
        assert_eq!(config, Config::starter());
        assert!(path.exists());

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("port = 8080"));
        assert_eq!(config.resolve(Overrides::default()), Settings::default());
    }

    #[test]
    fn test_existing_config_not_overwritten() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "queue_only = true\n").unwrap();

        let config = Config::load_or_init(&path);
        assert_eq!(config.queue_only, Some(true));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "queue_only = true\n");
    }
}
