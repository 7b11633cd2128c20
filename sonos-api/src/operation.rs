use serde::{Deserialize, Serialize};
use xmltree::Element;

use crate::error::ApiError;
use crate::service::Service;

/// Base trait for all zone player operations
///
/// Each operation is a single SOAP action on one UPnP service. The trait
/// ties the typed request and response to the action name and service, so
/// [`crate::SonosClient::execute`] can run any of them the same way.
pub trait SonosOperation {
    /// The request type for this operation, must be serializable
    type Request: Serialize;

    /// The response type for this operation, must be deserializable
    type Response: for<'de> Deserialize<'de>;

    /// The UPnP service this operation belongs to
    const SERVICE: Service;

    /// The SOAP action name for this operation
    const ACTION: &'static str;

    /// Reject requests that must never reach the device.
    ///
    /// Called before the payload is built; the default accepts everything.
    fn validate(_request: &Self::Request) -> Result<(), ApiError> {
        Ok(())
    }

    /// Build the XML argument elements placed inside the action element.
    ///
    /// String values must already be escaped here.
    fn build_payload(request: &Self::Request) -> String;

    /// Parse the `<ActionResponse>` element into the typed response
    fn parse_response(xml: &Element) -> Result<Self::Response, ApiError>;
}

/// Text of a direct child element, trimmed
pub(crate) fn child_text(xml: &Element, name: &str) -> Option<String> {
    xml.get_child(name)
        .and_then(|e| e.get_text())
        .map(|text| text.trim().to_string())
}
