use sonos_api::ApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("No zone named '{0}' was discovered")]
    NoMatchingZone(String),

    #[error("Not connected to a zone")]
    NotConnected,

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl RemoteError {
    /// True when the selected device could not be reached
    pub fn is_network(&self) -> bool {
        matches!(self, RemoteError::Api(e) if e.is_network())
    }
}

pub type Result<T> = std::result::Result<T, RemoteError>;
