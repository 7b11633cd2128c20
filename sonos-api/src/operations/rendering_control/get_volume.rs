//! GetVolume operation for RenderingControl service

use quick_xml::escape::escape;
use serde::{Deserialize, Serialize};
use xmltree::Element;
use super::MAX_VOLUME;
use crate::operation::child_text;
use crate::{ApiError, Service, SonosOperation};

/// GetVolume operation
pub struct GetVolumeOperation;

/// Request for GetVolume operation
#[derive(Serialize)]
pub struct GetVolumeRequest {
    pub instance_id: u32,
    pub channel: String,
}

/// Response for GetVolume operation
#[derive(Debug, Deserialize)]
pub struct GetVolumeResponse {
    #[serde(rename = "CurrentVolume")]
    pub current_volume: u8,
}

impl SonosOperation for GetVolumeOperation {
    type Request = GetVolumeRequest;
    type Response = GetVolumeResponse;

    const SERVICE: Service = Service::RenderingControl;
    const ACTION: &'static str = "GetVolume";

    fn build_payload(request: &Self::Request) -> String {
        format!(
            "<InstanceID>{}</InstanceID><Channel>{}</Channel>",
            request.instance_id,
            escape(&request.channel)
        )
    }

    fn parse_response(xml: &Element) -> Result<Self::Response, ApiError> {
        let text = child_text(xml, "CurrentVolume")
            .ok_or_else(|| ApiError::MalformedResponse("Missing CurrentVolume element".to_string()))?;

        let current_volume = text
            .parse::<u8>()
            .ok()
            .filter(|volume| *volume <= MAX_VOLUME)
            .ok_or_else(|| ApiError::MalformedResponse(format!("CurrentVolume out of range: {:?}", text)))?;

        Ok(GetVolumeResponse { current_volume })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn response(body: &str) -> Element {
        Element::parse(format!("<GetVolumeResponse>{}</GetVolumeResponse>", body).as_bytes()).unwrap()
    }

    #[test]
    fn test_get_volume_payload_construction() {
        let request = GetVolumeRequest {
            instance_id: 0,
            channel: "Master".to_string(),
        };
        assert_eq!(
            GetVolumeOperation::build_payload(&request),
            "<InstanceID>0</InstanceID><Channel>Master</Channel>"
        );
    }

    #[rstest]
    #[case("<CurrentVolume>0</CurrentVolume>", 0)]
    #[case("<CurrentVolume>40</CurrentVolume>", 40)]
    #[case("<CurrentVolume> 100 </CurrentVolume>", 100)]
    fn test_get_volume_response_parsing(#[case] body: &str, #[case] expected: u8) {
        let result = GetVolumeOperation::parse_response(&response(body)).unwrap();
        assert_eq!(result.current_volume, expected);
    }

    #[rstest]
    #[case("")]
    #[case("<CurrentVolume></CurrentVolume>")]
    #[case("<CurrentVolume>loud</CurrentVolume>")]
    #[case("<CurrentVolume>-1</CurrentVolume>")]
    #[case("<CurrentVolume>101</CurrentVolume>")]
    #[case("<CurrentVolume>300</CurrentVolume>")]
    fn test_get_volume_rejects_bad_values(#[case] body: &str) {
        let result = GetVolumeOperation::parse_response(&response(body));
        assert!(matches!(result, Err(ApiError::MalformedResponse(_))), "{:?}", result);
    }
}
