//! AVTransport operations: transport state, play, pause and source selection

mod get_transport_info;
mod playback;
mod set_av_transport_uri;

pub use get_transport_info::{GetTransportInfoOperation, GetTransportInfoRequest, GetTransportInfoResponse, PlayState};
pub use playback::{PauseOperation, PauseRequest, PauseResponse, PlayOperation, PlayRequest, PlayResponse};
pub use set_av_transport_uri::{SetAVTransportURIOperation, SetAVTransportURIRequest, SetAVTransportURIResponse};
