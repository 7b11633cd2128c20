//! Remote configuration
//!
//! Loaded from JSON; every field is optional and falls back to its default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sonos_api::operations::rendering_control::MAX_VOLUME;
use tracing::debug;

use crate::error::{RemoteError, Result};

/// File name looked up inside the configuration directory
pub const CONFIG_FILE_NAME: &str = "config.json";

const CONFIG_DIR_NAME: &str = "sonos-remote";

/// A stream started by a preset button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetConfig {
    /// Transport URI handed to the player
    pub uri: String,
    /// Volume set right after playback starts
    pub volume: u8,
    /// Second status line shown once the preset is playing
    pub label: String,
    /// Optional DIDL-Lite metadata sent with the URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
}

/// Configuration for the remote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Zone to control; matched exactly and case-sensitively
    /// Default: "Kitchen"
    pub zone_name: String,

    /// Volume change per volume button press
    /// Default: 5
    pub volume_step: u8,

    /// Discovery window in seconds
    /// Default: 3
    pub discovery_timeout: u64,

    /// Read timeout for control requests in seconds
    /// Default: 10
    pub control_timeout: u64,

    /// First status line shown while connecting
    /// Default: "Sonos Remote"
    pub title: String,

    /// Streams bound to the two preset buttons
    pub presets: [PresetConfig; 2],
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            zone_name: "Kitchen".to_string(),
            volume_step: 5,
            discovery_timeout: 3,
            control_timeout: 10,
            title: "Sonos Remote".to_string(),
            presets: [
                PresetConfig {
                    uri: "x-sonosapi-radio:vy_wPybY9vRCoaCMySC_D6Ol9WJ1aoH97kTmNIzBZ667Frppf2koUq7ZH7OJ9bXx41s_K0RZBSA?sid=151&flags=8300&sn=3".to_string(),
                    volume: 30,
                    label: "Pasta at Mario".to_string(),
                    metadata: None,
                },
                PresetConfig {
                    uri: "x-rincon-mp3radio://www.radioswisspop.ch/live/aacp.m3u".to_string(),
                    volume: 20,
                    label: "Swiss Pop".to_string(),
                    metadata: None,
                },
            ],
        }
    }
}

impl RemoteConfig {
    /// Discovery window as a Duration
    pub fn discovery_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.discovery_timeout)
    }

    /// Control request read timeout as a Duration
    pub fn control_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.control_timeout)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.zone_name.is_empty() {
            return Err(RemoteError::Config("zone_name must not be empty".to_string()));
        }

        if self.volume_step == 0 || self.volume_step > MAX_VOLUME {
            return Err(RemoteError::Config(format!(
                "volume_step must be between 1 and {}, got {}",
                MAX_VOLUME, self.volume_step
            )));
        }

        if self.discovery_timeout == 0 {
            return Err(RemoteError::Config("discovery_timeout must be positive".to_string()));
        }

        if self.control_timeout == 0 {
            return Err(RemoteError::Config("control_timeout must be positive".to_string()));
        }

        for (index, preset) in self.presets.iter().enumerate() {
            if preset.uri.trim().is_empty() {
                return Err(RemoteError::Config(format!("preset {} has an empty uri", index + 1)));
            }
            if preset.volume > MAX_VOLUME {
                return Err(RemoteError::Config(format!(
                    "preset {} volume {} exceeds {}",
                    index + 1,
                    preset.volume,
                    MAX_VOLUME
                )));
            }
        }

        Ok(())
    }

    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| RemoteError::Config(format!("cannot read {}: {}", path.display(), e)))?;

        let config: RemoteConfig = serde_json::from_str(&text)
            .map_err(|e| RemoteError::Config(format!("invalid {}: {}", path.display(), e)))?;

        config.validate()?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// `<config dir>/sonos-remote/config.json`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load the file at [`RemoteConfig::default_path`], or defaults when it does not exist
    pub fn load_or_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_if_present(&path),
            None => Ok(Self::default()),
        }
    }

    fn load_if_present(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "no configuration file, using defaults");
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = RemoteConfig::default();

        assert_eq!(config.zone_name, "Kitchen");
        assert_eq!(config.volume_step, 5);
        assert_eq!(config.discovery_timeout_duration(), Duration::from_secs(3));
        assert_eq!(config.control_timeout_duration(), Duration::from_secs(10));
        assert_eq!(config.presets[0].volume, 30);
        assert_eq!(config.presets[0].label, "Pasta at Mario");
        assert_eq!(config.presets[1].uri, "x-rincon-mp3radio://www.radioswisspop.ch/live/aacp.m3u");
        assert_eq!(config.presets[1].volume, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config: RemoteConfig = serde_json::from_str(r#"{"zone_name": "Office", "volume_step": 10}"#).unwrap();

        assert_eq!(config.zone_name, "Office");
        assert_eq!(config.volume_step, 10);
        assert_eq!(config.title, "Sonos Remote");
        assert_eq!(config.presets, RemoteConfig::default().presets);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let cases: [fn(&mut RemoteConfig); 7] = [
            |c| c.zone_name.clear(),
            |c| c.volume_step = 0,
            |c| c.volume_step = 101,
            |c| c.discovery_timeout = 0,
            |c| c.control_timeout = 0,
            |c| c.presets[0].uri = " ".to_string(),
            |c| c.presets[1].volume = 120,
        ];

        for mutate in cases {
            let mut config = RemoteConfig::default();
            mutate(&mut config);
            assert!(matches!(config.validate(), Err(RemoteError::Config(_))), "{:?}", config);
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"zone_name": "Living Room", "presets": [
                {{"uri": "x-rincon-mp3radio://a.example/live", "volume": 15, "label": "A"}},
                {{"uri": "x-rincon-mp3radio://b.example/live", "volume": 25, "label": "B"}}
            ]}}"#
        )
        .unwrap();

        let config = RemoteConfig::load(file.path()).unwrap();

        assert_eq!(config.zone_name, "Living Room");
        assert_eq!(config.presets[1].label, "B");
        assert_eq!(config.volume_step, 5);
    }

    #[test]
    fn test_load_rejects_invalid_json_and_values() {
        let mut broken = tempfile::NamedTempFile::new().unwrap();
        write!(broken, "{{ not json").unwrap();
        assert!(matches!(RemoteConfig::load(broken.path()), Err(RemoteError::Config(_))));

        let mut invalid = tempfile::NamedTempFile::new().unwrap();
        write!(invalid, r#"{{"volume_step": 0}}"#).unwrap();
        assert!(matches!(RemoteConfig::load(invalid.path()), Err(RemoteError::Config(_))));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = RemoteConfig::load_if_present(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, RemoteConfig::default());

        assert!(RemoteConfig::load(&dir.path().join(CONFIG_FILE_NAME)).is_err());
    }

    #[test]
    fn test_default_path_ends_with_app_dir() {
        if let Some(path) = RemoteConfig::default_path() {
            assert!(path.ends_with("sonos-remote/config.json"));
        }
    }
}
