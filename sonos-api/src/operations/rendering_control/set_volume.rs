//! SetVolume operation for RenderingControl service

use quick_xml::escape::escape;
use serde::{Deserialize, Serialize};
use xmltree::Element;
use super::MAX_VOLUME;
use crate::{ApiError, Service, SonosOperation};

/// SetVolume operation
pub struct SetVolumeOperation;

/// Request for SetVolume operation
#[derive(Serialize)]
pub struct SetVolumeRequest {
    pub instance_id: u32,
    pub channel: String,
    pub desired_volume: u8,
}

/// Response for SetVolume operation
#[derive(Deserialize)]
pub struct SetVolumeResponse;

impl SonosOperation for SetVolumeOperation {
    type Request = SetVolumeRequest;
    type Response = SetVolumeResponse;

    const SERVICE: Service = Service::RenderingControl;
    const ACTION: &'static str = "SetVolume";

    fn validate(request: &Self::Request) -> Result<(), ApiError> {
        if request.desired_volume > MAX_VOLUME {
            return Err(ApiError::InvalidParameter(format!(
                "DesiredVolume {} is out of range [0, {}]",
                request.desired_volume, MAX_VOLUME
            )));
        }
        Ok(())
    }

    fn build_payload(request: &Self::Request) -> String {
        format!(
            "<InstanceID>{}</InstanceID><Channel>{}</Channel><DesiredVolume>{}</DesiredVolume>",
            request.instance_id,
            escape(&request.channel),
            request.desired_volume
        )
    }

    fn parse_response(_xml: &Element) -> Result<Self::Response, ApiError> {
        Ok(SetVolumeResponse)
    }
}
