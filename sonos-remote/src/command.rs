//! Button events and the commands they map to

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::config::RemoteConfig;

/// One of the five remote buttons, already debounced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonEvent {
    PlayPause,
    VolumeUp,
    VolumeDown,
    Preset1,
    Preset2,
}

/// A playback command interpreted against the selected zone
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play,
    Pause,
    /// Pause when playing, play otherwise
    Toggle,
    VolumeUp(u8),
    VolumeDown(u8),
    /// Start a stream and set its volume directly
    PlayUri {
        uri: String,
        metadata: Option<String>,
        volume: u8,
        label: String,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown button '{0}' (expected play-pause, volume-up, volume-down, preset-1 or preset-2)")]
pub struct UnknownButton(pub String);

impl ButtonEvent {
    pub const ALL: [ButtonEvent; 5] = [
        ButtonEvent::PlayPause,
        ButtonEvent::VolumeUp,
        ButtonEvent::VolumeDown,
        ButtonEvent::Preset1,
        ButtonEvent::Preset2,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ButtonEvent::PlayPause => "play-pause",
            ButtonEvent::VolumeUp => "volume-up",
            ButtonEvent::VolumeDown => "volume-down",
            ButtonEvent::Preset1 => "preset-1",
            ButtonEvent::Preset2 => "preset-2",
        }
    }

    /// The command this button issues under `config`
    pub fn command(&self, config: &RemoteConfig) -> Command {
        match self {
            ButtonEvent::PlayPause => Command::Toggle,
            ButtonEvent::VolumeUp => Command::VolumeUp(config.volume_step),
            ButtonEvent::VolumeDown => Command::VolumeDown(config.volume_step),
            ButtonEvent::Preset1 => preset_command(config, 0),
            ButtonEvent::Preset2 => preset_command(config, 1),
        }
    }
}

fn preset_command(config: &RemoteConfig, index: usize) -> Command {
    let preset = &config.presets[index];
    Command::PlayUri {
        uri: preset.uri.clone(),
        metadata: preset.metadata.clone(),
        volume: preset.volume,
        label: preset.label.clone(),
    }
}

impl FromStr for ButtonEvent {
    type Err = UnknownButton;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "play-pause" | "p" => Ok(ButtonEvent::PlayPause),
            "volume-up" | "+" => Ok(ButtonEvent::VolumeUp),
            "volume-down" | "-" => Ok(ButtonEvent::VolumeDown),
            "preset-1" | "1" => Ok(ButtonEvent::Preset1),
            "preset-2" | "2" => Ok(ButtonEvent::Preset2),
            _ => Err(UnknownButton(s.trim().to_string())),
        }
    }
}

impl fmt::Display for ButtonEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
