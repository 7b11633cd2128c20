use soap_client::SoapError;
use thiserror::Error;

/// High-level API errors for zone player operations
///
/// The variants separate "could not reach the device" from "the device
/// rejected the request" and from "the device answered with something we
/// cannot read", so callers can react without inspecting messages.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response: connection refused, timed out, or reset
    #[error("Network unreachable: {0}")]
    NetworkUnreachable(String),

    /// The device reported a UPnP fault in an otherwise well-formed response
    #[error("Device fault {code}: {description}")]
    ProtocolFault { code: u16, description: String },

    /// The response could not be parsed into the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A request parameter was rejected before anything was sent
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl ApiError {
    /// True when the device could not be reached at all
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::NetworkUnreachable(_))
    }

    /// True when the device answered with a fault
    pub fn is_fault(&self) -> bool {
        matches!(self, ApiError::ProtocolFault { .. })
    }
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

impl From<SoapError> for ApiError {
    fn from(error: SoapError) -> Self {
        match error {
            SoapError::Network(msg) => ApiError::NetworkUnreachable(msg),
            SoapError::Parse(msg) => ApiError::MalformedResponse(msg),
            SoapError::Fault { code, description } => ApiError::ProtocolFault { code, description },
        }
    }
}
