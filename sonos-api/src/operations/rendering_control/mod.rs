//! RenderingControl service operations
//!
//! Operations for controlling volume on zone players.

mod get_volume;
mod set_volume;

pub use get_volume::{GetVolumeOperation, GetVolumeRequest, GetVolumeResponse};
pub use set_volume::{SetVolumeOperation, SetVolumeRequest, SetVolumeResponse};

/// Channel every volume action is sent for
pub const MASTER_CHANNEL: &str = "Master";

/// Highest volume a zone player accepts
pub const MAX_VOLUME: u8 = 100;
