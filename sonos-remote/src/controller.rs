//! Playback controller: zone selection and button command handling
//!
//! The controller is either disconnected (no zone selected) or connected to
//! exactly one zone. A failed command never drops the selection; only the
//! play-pause button pressed while disconnected, or an explicit
//! [`PlaybackController::connect`], runs discovery again.

use sonos_api::operations::rendering_control::MAX_VOLUME;
use sonos_api::PlayState;
use sonos_discovery::Device;
use tracing::{debug, info, warn};

use crate::command::{ButtonEvent, Command};
use crate::config::RemoteConfig;
use crate::display::{self, StatusDisplay};
use crate::error::{RemoteError, Result};
use crate::network::{PlayerControl, ZoneNetwork};
use crate::registry::ZoneRegistry;

/// `current` moved by `delta`, clamped to 0..=100
pub fn clamp_volume(current: u8, delta: i16) -> u8 {
    let target = (i16::from(current) + delta).clamp(0, i16::from(MAX_VOLUME));
    // In range after the clamp
    target as u8
}

/// The selected zone and what was last read from or written to it
#[derive(Debug)]
pub struct ConnectedZone<P> {
    device: Device,
    proxy: P,
    last_known_volume: Option<u8>,
    last_known_play_state: Option<PlayState>,
}

impl<P: PlayerControl> ConnectedZone<P> {
    fn new(device: Device, proxy: P) -> Self {
        Self {
            device,
            proxy,
            last_known_volume: None,
            last_known_play_state: None,
        }
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn proxy(&self) -> &P {
        &self.proxy
    }

    pub fn last_known_volume(&self) -> Option<u8> {
        self.last_known_volume
    }

    pub fn last_known_play_state(&self) -> Option<PlayState> {
        self.last_known_play_state
    }

    /// Run one command; returns the second status line
    fn apply(&mut self, command: &Command) -> sonos_api::Result<String> {
        match command {
            Command::Play => {
                self.proxy.play()?;
                Ok(display::PLAYING.to_string())
            }
            Command::Pause => {
                self.proxy.pause()?;
                Ok(display::PAUSED.to_string())
            }
            Command::Toggle => {
                let state = self.proxy.play_state()?;
                self.last_known_play_state = Some(state);

                if state.is_playing() {
                    self.apply(&Command::Pause)
                } else {
                    self.apply(&Command::Play)
                }
            }
            Command::VolumeUp(step) => self.step_volume(i16::from(*step)),
            Command::VolumeDown(step) => self.step_volume(-i16::from(*step)),
            Command::PlayUri { uri, metadata, volume, label } => {
                self.proxy.play_uri(uri, metadata.as_deref())?;
                self.proxy.set_volume(*volume)?;
                self.last_known_volume = Some(*volume);
                Ok(label.clone())
            }
        }
    }

    fn step_volume(&mut self, delta: i16) -> sonos_api::Result<String> {
        let current = self.proxy.volume()?;
        self.last_known_volume = Some(current);

        let target = clamp_volume(current, delta);
        self.proxy.set_volume(target)?;
        self.last_known_volume = Some(target);

        Ok(format!("volume {}", target))
    }
}

/// Stateful façade driven by button events
///
/// # Example
/// ```no_run
/// use sonos_remote::{ButtonEvent, LogDisplay, PlaybackController, RemoteConfig, SonosNetwork};
///
/// let config = RemoteConfig::default();
/// let network = SonosNetwork::from_config(&config);
/// let mut controller = PlaybackController::new(network, LogDisplay, config);
///
/// controller.start().ok();
/// controller.run([ButtonEvent::VolumeUp, ButtonEvent::PlayPause]);
/// ```
pub struct PlaybackController<N: ZoneNetwork, D: StatusDisplay> {
    network: N,
    display: D,
    config: RemoteConfig,
    zone: Option<ConnectedZone<N::Player>>,
}

impl<N: ZoneNetwork, D: StatusDisplay> PlaybackController<N, D> {
    pub fn new(network: N, display: D, config: RemoteConfig) -> Self {
        Self {
            network,
            display,
            config,
            zone: None,
        }
    }

    /// Show the startup status, then connect
    pub fn start(&mut self) -> Result<()> {
        self.display.publish_status(&self.config.title, display::CONNECTING);
        self.connect()
    }

    /// Run discovery and select the configured zone
    ///
    /// The previous selection is replaced in both outcomes, never merged.
    pub fn connect(&mut self) -> Result<()> {
        let zone_name = self.config.zone_name.clone();
        let registry = ZoneRegistry::new(self.network.discover());
        debug!(zones = ?registry.zone_names(), "discovery finished");

        match registry.into_selected(&zone_name) {
            Some(device) => {
                info!(zone = %zone_name, address = %device.base_url(), "connected");
                let proxy = self.network.connect(&device);
                self.zone = Some(ConnectedZone::new(device, proxy));
                self.display.publish_status(&zone_name, display::CONNECTED);
                Ok(())
            }
            None => {
                warn!(zone = %zone_name, "zone not found");
                self.zone = None;
                self.display
                    .publish_status(display::CONNECTION_ERROR, display::RETRY_HINT);
                Err(RemoteError::NoMatchingZone(zone_name))
            }
        }
    }

    /// Handle one button press
    pub fn dispatch(&mut self, event: ButtonEvent) -> Result<()> {
        debug!(button = %event, "button pressed");
        let command = event.command(&self.config);
        self.execute(command)
    }

    /// Interpret `command` against the selected zone
    ///
    /// Toggle while disconnected reconnects instead. Every other command
    /// while disconnected fails with `NotConnected` and leaves the status
    /// untouched.
    pub fn execute(&mut self, command: Command) -> Result<()> {
        let Some(zone) = self.zone.as_mut() else {
            return match command {
                Command::Toggle => self.connect(),
                _ => {
                    warn!(?command, "ignored while disconnected");
                    Err(RemoteError::NotConnected)
                }
            };
        };

        let zone_name = zone.device.zone_name().to_string();
        match zone.apply(&command) {
            Ok(line2) => {
                self.display.publish_status(&zone_name, &line2);
                Ok(())
            }
            Err(e) => {
                warn!(zone = %zone_name, ?command, "command failed: {}", e);
                self.display.publish_status(&zone_name, display::COMMAND_FAILED);
                Err(e.into())
            }
        }
    }

    /// Dispatch events in order until the source is exhausted
    ///
    /// Failures are already logged and shown; they do not stop the loop.
    pub fn run<I: IntoIterator<Item = ButtonEvent>>(&mut self, events: I) {
        for event in events {
            let _ = self.dispatch(event);
        }
    }

    pub fn is_connected(&self) -> bool {
        self.zone.is_some()
    }

    pub fn connected_zone(&self) -> Option<&ConnectedZone<N::Player>> {
        self.zone.as_ref()
    }

    pub fn selected_device(&self) -> Option<&Device> {
        self.zone.as_ref().map(ConnectedZone::device)
    }

    pub fn last_known_volume(&self) -> Option<u8> {
        self.zone.as_ref().and_then(ConnectedZone::last_known_volume)
    }

    pub fn last_known_play_state(&self) -> Option<PlayState> {
        self.zone.as_ref().and_then(ConnectedZone::last_known_play_state)
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn network(&self) -> &N {
        &self.network
    }
}
