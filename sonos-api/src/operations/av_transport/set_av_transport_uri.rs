//! SetAVTransportURI operation for AVTransport service

use quick_xml::escape::escape;
use serde::{Deserialize, Serialize};
use xmltree::Element;
use crate::{ApiError, Service, SonosOperation};

/// SetAVTransportURI operation; replaces what the transport will play next
pub struct SetAVTransportURIOperation;

/// Request for SetAVTransportURI operation
#[derive(Serialize)]
pub struct SetAVTransportURIRequest {
    pub instance_id: u32,
    pub current_uri: String,
    /// DIDL-Lite metadata, sent empty when absent
    pub current_uri_metadata: Option<String>,
}

/// Response for SetAVTransportURI operation
#[derive(Deserialize)]
pub struct SetAVTransportURIResponse;

impl SonosOperation for SetAVTransportURIOperation {
    type Request = SetAVTransportURIRequest;
    type Response = SetAVTransportURIResponse;

    const SERVICE: Service = Service::AVTransport;
    const ACTION: &'static str = "SetAVTransportURI";

    fn validate(request: &Self::Request) -> Result<(), ApiError> {
        if request.current_uri.trim().is_empty() {
            return Err(ApiError::InvalidParameter("CurrentURI must not be empty".to_string()));
        }
        Ok(())
    }

    fn build_payload(request: &Self::Request) -> String {
        format!(
            "<InstanceID>{}</InstanceID><CurrentURI>{}</CurrentURI><CurrentURIMetaData>{}</CurrentURIMetaData>",
            request.instance_id,
            escape(&request.current_uri),
            escape(request.current_uri_metadata.as_deref().unwrap_or(""))
        )
    }

    fn parse_response(_xml: &Element) -> Result<Self::Response, ApiError> {
        Ok(SetAVTransportURIResponse)
    }
}
