//! Play and Pause for the AVTransport service
//!
//! Neither action returns data; a successful response body is enough.

use serde::{Deserialize, Serialize};
use xmltree::Element;
use crate::{ApiError, Service, SonosOperation};

/// Starts or resumes the current transport
pub struct PlayOperation;

#[derive(Serialize)]
pub struct PlayRequest {
    pub instance_id: u32,
    /// Playback speed token; players only accept "1"
    pub speed: String,
}

impl PlayRequest {
    /// Normal-speed playback on the given instance
    pub fn normal(instance_id: u32) -> Self {
        Self {
            instance_id,
            speed: "1".to_string(),
        }
    }
}

#[derive(Deserialize)]
pub struct PlayResponse;

impl SonosOperation for PlayOperation {
    type Request = PlayRequest;
    type Response = PlayResponse;

    const SERVICE: Service = Service::AVTransport;
    const ACTION: &'static str = "Play";

    fn validate(request: &Self::Request) -> Result<(), ApiError> {
        if request.speed.trim().is_empty() {
            return Err(ApiError::InvalidParameter("speed must not be empty".to_string()));
        }
        Ok(())
    }

    fn build_payload(request: &Self::Request) -> String {
        format!(
            "<InstanceID>{}</InstanceID><Speed>{}</Speed>",
            request.instance_id,
            quick_xml::escape::escape(&request.speed)
        )
    }

    fn parse_response(_xml: &Element) -> Result<Self::Response, ApiError> {
        Ok(PlayResponse)
    }
}

/// Pauses the current transport, keeping its position
pub struct PauseOperation;

#[derive(Serialize)]
pub struct PauseRequest {
    pub instance_id: u32,
}

#[derive(Deserialize)]
pub struct PauseResponse;

impl SonosOperation for PauseOperation {
    type Request = PauseRequest;
    type Response = PauseResponse;

    const SERVICE: Service = Service::AVTransport;
    const ACTION: &'static str = "Pause";

    fn build_payload(request: &Self::Request) -> String {
        format!("<InstanceID>{}</InstanceID>", request.instance_id)
    }

    fn parse_response(_xml: &Element) -> Result<Self::Response, ApiError> {
        Ok(PauseResponse)
    }
}
