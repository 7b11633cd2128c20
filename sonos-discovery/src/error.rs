//! Error types for the discovery system.

use std::fmt;

/// Error type for discovery operations.
///
/// Per-device failures (unreachable or malformed descriptors) are reported
/// with these variants by [`crate::DescriptorResolver`] and then dropped by
/// the discovery pass; only socket-level failures abort a whole pass.
#[derive(Debug)]
pub enum DiscoveryError {
    /// Network-related errors (socket creation, HTTP requests, etc.)
    NetworkError(String),
    /// Parsing errors (descriptor XML, location URL, etc.)
    ParseError(String),
    /// Descriptor parsed but does not describe a usable zone player
    InvalidDevice(String),
}

impl DiscoveryError {
    /// Returns true if the failure happened before any data was received.
    pub fn is_network(&self) -> bool {
        matches!(self, DiscoveryError::NetworkError(_))
    }
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            DiscoveryError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            DiscoveryError::InvalidDevice(msg) => write!(f, "Invalid device: {}", msg),
        }
    }
}

impl std::error::Error for DiscoveryError {}

/// Convenience Result type alias for discovery operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;
