//! Seams between the playback controller and the network
//!
//! The controller only talks to these traits, so it can be driven by
//! in-memory fakes in tests.

use std::time::Duration;

use sonos_api::{DeviceController, PlayState, SonosClient, DEFAULT_CONNECT_TIMEOUT};
use sonos_discovery::Device;

use crate::config::RemoteConfig;

/// Control operations on one selected zone player
pub trait PlayerControl {
    fn play_state(&self) -> sonos_api::Result<PlayState>;
    fn volume(&self) -> sonos_api::Result<u8>;
    fn set_volume(&self, level: u8) -> sonos_api::Result<()>;
    fn play(&self) -> sonos_api::Result<()>;
    fn pause(&self) -> sonos_api::Result<()>;
    fn play_uri(&self, uri: &str, metadata: Option<&str>) -> sonos_api::Result<()>;
}

/// Discovery and connection
pub trait ZoneNetwork {
    type Player: PlayerControl;

    /// One discovery pass; empty when nothing answered or discovery failed
    fn discover(&mut self) -> Vec<Device>;

    /// Bind a control proxy to `device`
    fn connect(&mut self, device: &Device) -> Self::Player;
}

impl PlayerControl for DeviceController {
    fn play_state(&self) -> sonos_api::Result<PlayState> {
        DeviceController::play_state(self)
    }

    fn volume(&self) -> sonos_api::Result<u8> {
        DeviceController::volume(self)
    }

    fn set_volume(&self, level: u8) -> sonos_api::Result<()> {
        DeviceController::set_volume(self, level)
    }

    fn play(&self) -> sonos_api::Result<()> {
        DeviceController::play(self)
    }

    fn pause(&self) -> sonos_api::Result<()> {
        DeviceController::pause(self)
    }

    fn play_uri(&self, uri: &str, metadata: Option<&str>) -> sonos_api::Result<()> {
        DeviceController::play_uri(self, uri, metadata)
    }
}

/// SSDP discovery plus SOAP control
#[derive(Debug, Clone)]
pub struct SonosNetwork {
    discovery_timeout: Duration,
    client: SonosClient,
}

impl SonosNetwork {
    pub fn new(discovery_timeout: Duration, control_timeout: Duration) -> Self {
        Self {
            discovery_timeout,
            client: SonosClient::with_timeouts(DEFAULT_CONNECT_TIMEOUT.min(control_timeout), control_timeout),
        }
    }

    pub fn from_config(config: &RemoteConfig) -> Self {
        Self::new(config.discovery_timeout_duration(), config.control_timeout_duration())
    }
}

impl ZoneNetwork for SonosNetwork {
    type Player = DeviceController;

    fn discover(&mut self) -> Vec<Device> {
        sonos_discovery::get_with_timeout(self.discovery_timeout)
    }

    fn connect(&mut self, device: &Device) -> DeviceController {
        DeviceController::with_client(self.client.clone(), device.clone())
    }
}
