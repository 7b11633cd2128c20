//! Zone player operations organized by service
//!
//! This module contains the individual API operations, organized by
//! the UPnP service they belong to.

pub mod av_transport;
pub mod rendering_control;

/// Instance ID every zone player action is sent with
pub const INSTANCE_ID: u32 = 0;

// Re-export commonly used operations
pub use av_transport::{GetTransportInfoOperation, PauseOperation, PlayOperation, SetAVTransportURIOperation};
pub use rendering_control::{GetVolumeOperation, SetVolumeOperation};
