//! Typed control API for zone players
//!
//! This crate provides a type-safe, trait-based API for controlling zone
//! players. It uses the private `soap-client` crate for the SOAP exchange
//! and the [`sonos_discovery::Device`] type for addressing.
//!
//! ```no_run
//! use sonos_api::DeviceController;
//!
//! let device = sonos_discovery::get()
//!     .into_iter()
//!     .find(|device| device.zone_name() == "Kitchen");
//!
//! if let Some(device) = device {
//!     let controller = DeviceController::new(device);
//!     let volume = controller.volume()?;
//!     controller.set_volume(volume.saturating_add(5).min(100))?;
//! }
//! # Ok::<(), sonos_api::ApiError>(())
//! ```

pub mod client;
pub mod controller;
pub mod error;
pub mod operation;
pub mod operations;
pub mod service;

pub use client::{SonosClient, DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_TIMEOUT};
pub use controller::DeviceController;
pub use error::{ApiError, Result};
pub use operation::SonosOperation;
pub use operations::av_transport::PlayState;
pub use service::Service;
