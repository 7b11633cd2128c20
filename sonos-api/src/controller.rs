//! Device control proxy bound to one zone player

use sonos_discovery::Device;
use tracing::{debug, info};

use crate::operations::av_transport::{
    GetTransportInfoOperation, GetTransportInfoRequest, PauseOperation, PauseRequest, PlayOperation,
    PlayRequest, PlayState, SetAVTransportURIOperation, SetAVTransportURIRequest,
};
use crate::operations::rendering_control::{
    GetVolumeOperation, GetVolumeRequest, SetVolumeOperation, SetVolumeRequest, MASTER_CHANNEL,
};
use crate::operations::INSTANCE_ID;
use crate::{Result, SonosClient};

/// Control proxy for a single zone player
///
/// Every method is one synchronous request/response exchange (two for
/// [`DeviceController::play_uri`]) against the device's control endpoints.
/// Failures surface as [`crate::ApiError`]; no value is ever substituted and
/// nothing is retried.
///
/// # Example
/// ```no_run
/// use sonos_api::DeviceController;
///
/// for device in sonos_discovery::get() {
///     let controller = DeviceController::new(device);
///     println!("{} is {}", controller.device().zone_name(), controller.play_state()?);
/// }
/// # Ok::<(), sonos_api::ApiError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DeviceController {
    client: SonosClient,
    device: Device,
}

impl DeviceController {
    /// Bind a controller to `device` using default timeouts
    pub fn new(device: Device) -> Self {
        Self::with_client(SonosClient::new(), device)
    }

    /// Bind a controller to `device` using a preconfigured client
    pub fn with_client(client: SonosClient, device: Device) -> Self {
        Self { client, device }
    }

    /// The device this controller talks to
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Query the current play state
    pub fn play_state(&self) -> Result<PlayState> {
        let response = self.client.execute::<GetTransportInfoOperation>(
            &self.device,
            &GetTransportInfoRequest { instance_id: INSTANCE_ID },
        )?;

        debug!(zone = %self.device.room_name, state = %response.current_transport_state, "play state");
        Ok(response.current_transport_state)
    }

    /// Query the master volume (0..=100)
    pub fn volume(&self) -> Result<u8> {
        let response = self.client.execute::<GetVolumeOperation>(
            &self.device,
            &GetVolumeRequest {
                instance_id: INSTANCE_ID,
                channel: MASTER_CHANNEL.to_string(),
            },
        )?;

        debug!(zone = %self.device.room_name, volume = response.current_volume, "volume");
        Ok(response.current_volume)
    }

    /// Set the master volume
    ///
    /// Levels above 100 are rejected with `InvalidParameter` without
    /// contacting the device.
    pub fn set_volume(&self, level: u8) -> Result<()> {
        self.client.execute::<SetVolumeOperation>(
            &self.device,
            &SetVolumeRequest {
                instance_id: INSTANCE_ID,
                channel: MASTER_CHANNEL.to_string(),
                desired_volume: level,
            },
        )?;

        debug!(zone = %self.device.room_name, level, "volume set");
        Ok(())
    }

    /// Start or resume playback
    pub fn play(&self) -> Result<()> {
        self.client
            .execute::<PlayOperation>(&self.device, &PlayRequest::normal(INSTANCE_ID))?;
        Ok(())
    }

    /// Pause playback
    pub fn pause(&self) -> Result<()> {
        self.client
            .execute::<PauseOperation>(&self.device, &PauseRequest { instance_id: INSTANCE_ID })?;
        Ok(())
    }

    /// Replace the transport URI and start playing it
    ///
    /// Stops at the first failing exchange; Play is not sent when the URI
    /// was rejected.
    pub fn play_uri(&self, uri: &str, metadata: Option<&str>) -> Result<()> {
        self.client.execute::<SetAVTransportURIOperation>(
            &self.device,
            &SetAVTransportURIRequest {
                instance_id: INSTANCE_ID,
                current_uri: uri.to_string(),
                current_uri_metadata: metadata.map(str::to_string),
            },
        )?;
        self.play()?;

        info!(zone = %self.device.room_name, uri, "playing URI");
        Ok(())
    }
}
