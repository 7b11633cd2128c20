//! # Sonos Remote
//!
//! A five-button remote for one zone player: discover the configured zone,
//! then turn button presses into playback commands and two-line status
//! updates.
//!
//! ```no_run
//! use std::sync::mpsc;
//! use sonos_remote::{ButtonEvent, ConsoleDisplay, PlaybackController, RemoteConfig, SonosNetwork};
//!
//! let config = RemoteConfig::load_or_default()?;
//! let mut controller = PlaybackController::new(
//!     SonosNetwork::from_config(&config),
//!     ConsoleDisplay::stdout(),
//!     config,
//! );
//! controller.start().ok();
//!
//! let (tx, rx) = mpsc::channel();
//! tx.send(ButtonEvent::Preset1).ok();
//! drop(tx);
//! controller.run(rx);
//! # Ok::<(), sonos_remote::RemoteError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! sonos-remote (controller, config, status)
//!     ↓
//! sonos-api (typed control operations)
//!     ↓
//! soap-client (SOAP over HTTP)        sonos-discovery (SSDP + descriptors)
//! ```

pub mod command;
pub mod config;
pub mod controller;
pub mod display;
pub mod logging;
pub mod network;
pub mod registry;

mod error;

pub use command::{ButtonEvent, Command};
pub use config::{PresetConfig, RemoteConfig};
pub use controller::{clamp_volume, ConnectedZone, PlaybackController};
pub use display::{ConsoleDisplay, LogDisplay, StatusDisplay};
pub use error::{RemoteError, Result};
pub use network::{PlayerControl, SonosNetwork, ZoneNetwork};
pub use registry::ZoneRegistry;

// Re-export commonly used types from the lower crates
pub use sonos_api::{ApiError, PlayState};
pub use sonos_discovery::Device;
