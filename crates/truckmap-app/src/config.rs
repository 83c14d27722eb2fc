//! Configuration management for truckmap
//!
//! Config stored at: ~/.config/truckmap/config.json

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use truckmap_types::{ConfigError, Coordinate, OutputFormat, Result};
use truckmap_vision::PhotoConfig;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Data directory override
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Map center before anything is selected
    #[serde(default = "default_center")]
    pub default_center: Coordinate,

    #[serde(default = "default_zoom")]
    pub default_zoom: f64,

    /// Zoom used when focusing a single truck or a location fix
    #[serde(default = "default_focus_zoom")]
    pub focus_zoom: f64,

    /// Longest edge of stored photos, in pixels
    #[serde(default = "default_photo_max_edge")]
    pub photo_max_edge: u32,

    /// JPEG quality for stored photos (1-100)
    #[serde(default = "default_photo_quality")]
    pub photo_quality: u8,

    /// How long a notification stays visible
    #[serde(default = "default_notification_ms")]
    pub notification_ms: u64,

    #[serde(default = "default_geolocation_timeout_secs")]
    pub geolocation_timeout_secs: u64,

    /// Position reported by the geolocation button. Unset means unsupported.
    #[serde(default)]
    pub home_location: Option<Coordinate>,

    /// Reject saves larger than this many bytes
    #[serde(default)]
    pub storage_quota_bytes: Option<usize>,

    /// Default CLI output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,
}

fn default_center() -> Coordinate {
    Coordinate::new(34.0522, -118.2437)
}

fn default_zoom() -> f64 {
    11.0
}

fn default_focus_zoom() -> f64 {
    15.0
}

fn default_photo_max_edge() -> u32 {
    PhotoConfig::default().max_edge
}

fn default_photo_quality() -> u8 {
    PhotoConfig::default().quality
}

fn default_notification_ms() -> u64 {
    3000
}

fn default_geolocation_timeout_secs() -> u64 {
    8
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            default_center: default_center(),
            default_zoom: default_zoom(),
            focus_zoom: default_focus_zoom(),
            photo_max_edge: default_photo_max_edge(),
            photo_quality: default_photo_quality(),
            notification_ms: default_notification_ms(),
            geolocation_timeout_secs: default_geolocation_timeout_secs(),
            home_location: None,
            storage_quota_bytes: None,
            output_format: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("truckmap");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or(ConfigError::NotFound)?
            .join("truckmap");
        Ok(data_dir)
    }

    pub fn photo_config(&self) -> PhotoConfig {
        PhotoConfig {
            max_edge: self.photo_max_edge.max(1),
            quality: self.photo_quality.clamp(1, 100),
        }
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_ms)
    }

    pub fn geolocation_timeout(&self) -> Duration {
        Duration::from_secs(self.geolocation_timeout_secs)
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_json(&content)
        } else {
            Ok(Config::default())
        }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// Save config to `path`, normally [`Config::config_path`]
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Truckmap Configuration")?;
        writeln!(f, "======================")?;
        writeln!(f)?;
        writeln!(
            f,
            "Data dir:         {}",
            self.data_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f, "Map center:       {}", self.default_center)?;
        writeln!(f, "Map zoom:         {} (focus {})", self.default_zoom, self.focus_zoom)?;
        writeln!(
            f,
            "Photos:           max {}px, quality {}",
            self.photo_max_edge, self.photo_quality
        )?;
        writeln!(f, "Notifications:    {} ms", self.notification_ms)?;
        writeln!(f, "Geolocation:      {} s timeout", self.geolocation_timeout_secs)?;
        writeln!(
            f,
            "Home location:    {}",
            self.home_location
                .map(|c| c.to_string())
                .unwrap_or_else(|| "(unsupported)".to_string())
        )?;
        writeln!(
            f,
            "Storage quota:    {}",
            self.storage_quota_bytes
                .map(|q| format!("{} bytes", q))
                .unwrap_or_else(|| "(unlimited)".to_string())
        )?;
        writeln!(f, "Output format:    {}", self.output_format)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:      {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = Config::from_json(r#"{"photo_max_edge": 640, "home_location": {"lat": 1.5, "lng": 2.5}}"#)
            .unwrap();
        assert_eq!(config.photo_max_edge, 640);
        assert_eq!(config.home_location, Some(Coordinate::new(1.5, 2.5)));
        assert_eq!(config.geolocation_timeout(), Duration::from_secs(8));
        assert_eq!(config.notification_duration(), Duration::from_millis(3000));
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = Config::from_json("{").unwrap_err();
        assert!(matches!(err, truckmap_types::Error::Config(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_photo_config_clamps() {
        let config = Config {
            photo_max_edge: 0,
            photo_quality: 0,
            ..Config::default()
        };
        assert_eq!(config.photo_config(), PhotoConfig { max_edge: 1, quality: 1 });
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());

        let config = Config {
            home_location: Some(Coordinate::new(-33.9, 151.2)),
            output_format: OutputFormat::Json,
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_data_dir_override() {
        let config = Config {
            data_dir: Some(PathBuf::from("/tmp/trucks")),
            ..Config::default()
        };
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/trucks"));
    }
}
