//! Error types for the SOAP client

use thiserror::Error;

/// Errors that can occur during SOAP communication
#[derive(Debug, Error)]
pub enum SoapError {
    /// The device could not be reached (refused, timed out, reset)
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// The response could not be parsed as a SOAP envelope
    #[error("XML parsing error: {0}")]
    Parse(String),

    /// SOAP fault returned by the device
    #[error("SOAP fault: error code {code} ({description})")]
    Fault { code: u16, description: String },
}
