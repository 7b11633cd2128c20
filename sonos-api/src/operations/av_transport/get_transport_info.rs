//! GetTransportInfo operation for AVTransport service

use serde::{Deserialize, Serialize};
use std::fmt;
use xmltree::Element;
use crate::operation::child_text;
use crate::{ApiError, Service, SonosOperation};

/// GetTransportInfo operation
pub struct GetTransportInfoOperation;

/// Request for GetTransportInfo operation
#[derive(Serialize)]
pub struct GetTransportInfoRequest {
    pub instance_id: u32,
}

/// Play state reported by a zone player
///
/// Only ever produced from a device response. `TRANSITIONING` is reported
/// as `Playing`; any token outside the known set becomes `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PlayState {
    Error,
    Stopped,
    Playing,
    Paused,
}

impl PlayState {
    /// Interpret a `CurrentTransportState` token
    pub fn from_transport_state(token: &str) -> Self {
        match token {
            "PLAYING" | "TRANSITIONING" => PlayState::Playing,
            "PAUSED_PLAYBACK" => PlayState::Paused,
            "STOPPED" => PlayState::Stopped,
            _ => PlayState::Error,
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, PlayState::Playing)
    }
}

impl fmt::Display for PlayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            PlayState::Error => "error",
            PlayState::Stopped => "stopped",
            PlayState::Playing => "playing",
            PlayState::Paused => "paused",
        };
        f.write_str(text)
    }
}

/// Response for GetTransportInfo operation
#[derive(Debug, Clone, Deserialize)]
pub struct GetTransportInfoResponse {
    #[serde(rename = "CurrentTransportState")]
    pub current_transport_state: PlayState,
    #[serde(rename = "CurrentTransportStatus")]
    pub current_transport_status: String,
}

impl SonosOperation for GetTransportInfoOperation {
    type Request = GetTransportInfoRequest;
    type Response = GetTransportInfoResponse;

    const SERVICE: Service = Service::AVTransport;
    const ACTION: &'static str = "GetTransportInfo";

    fn build_payload(request: &Self::Request) -> String {
        format!("<InstanceID>{}</InstanceID>", request.instance_id)
    }

    fn parse_response(xml: &Element) -> Result<Self::Response, ApiError> {
        let current_transport_state = child_text(xml, "CurrentTransportState")
            .filter(|state| !state.is_empty())
            .ok_or_else(|| ApiError::MalformedResponse("Missing CurrentTransportState element".to_string()))?;

        let current_transport_status =
            child_text(xml, "CurrentTransportStatus").unwrap_or_else(|| "OK".to_string());

        Ok(GetTransportInfoResponse {
            current_transport_state: PlayState::from_transport_state(&current_transport_state),
            current_transport_status,
        })
    }
}
