//! Zone player discovery library
//!
//! This crate finds zone players on the local network using SSDP (Simple
//! Service Discovery Protocol) and resolves each responder's UPnP device
//! description into a [`Device`] carrying its zone name and control endpoints.
//!
//! # Quick Start
//!
//! ```no_run
//! use sonos_discovery::get;
//!
//! // Discover all zone players on the network
//! let devices = get();
//! for device in devices {
//!     println!("Found {} at {}", device.zone_name(), device.base_url());
//! }
//! ```
//!
//! # Iterator-based Discovery
//!
//! For more control, use the iterator API:
//!
//! ```no_run
//! use sonos_discovery::{get_iter, DeviceEvent};
//!
//! for event in get_iter() {
//!     match event {
//!         DeviceEvent::Found(device) => {
//!             println!("Found: {}", device.room_name);
//!             // Can break early if needed
//!         }
//!     }
//! }
//! ```

mod error;
mod ssdp;
pub mod device;
mod discovery;
mod resolver;

pub use error::{DiscoveryError, Result};
pub use discovery::DiscoveryIterator;
pub use resolver::DescriptorResolver;

use std::time::Duration;
use tracing::warn;

/// Port zone players serve HTTP on when the location omits one
pub const DEFAULT_PORT: u16 = 1400;

/// AVTransport control path used when the descriptor does not list one
pub const DEFAULT_AV_TRANSPORT_PATH: &str = "MediaRenderer/AVTransport/Control";

/// RenderingControl control path used when the descriptor does not list one
pub const DEFAULT_RENDERING_CONTROL_PATH: &str = "MediaRenderer/RenderingControl/Control";

/// Default discovery window
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Information about a discovered zone player.
///
/// Contains everything needed to identify the player by zone name and to
/// address its control endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    /// Unique device identifier (UDN), e.g., "uuid:RINCON_000E58A0123456"
    pub id: String,
    /// Friendly name of the device
    pub name: String,
    /// Zone (room) name shown to users, e.g. "Kitchen"
    pub room_name: String,
    /// IP address or host of the device
    pub ip_address: String,
    /// Port number (typically 1400)
    pub port: u16,
    /// Model name (e.g., "Sonos One", "Sonos Play:1")
    pub model_name: String,
    /// AVTransport control path relative to [`Device::base_url`]
    pub av_transport_path: String,
    /// RenderingControl control path relative to [`Device::base_url`]
    pub rendering_control_path: String,
}

impl Device {
    /// Zone name used for selection
    pub fn zone_name(&self) -> &str {
        &self.room_name
    }

    /// Base URL for control requests, e.g. `http://192.168.1.100:1400`
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.ip_address, self.port)
    }
}

/// Events emitted during device discovery.
#[derive(Debug, Clone)]
pub enum DeviceEvent {
    /// A zone player was found on the network
    Found(Device),
}

/// Discover all zone players on the local network with the default 3-second window.
///
/// This is a convenience function that collects all discovered devices into a Vec.
/// Failures are logged and yield an empty list; use [`try_get_with_timeout`]
/// to observe them.
///
/// # Examples
///
/// ```no_run
/// use sonos_discovery::get;
///
/// let devices = get();
/// for device in devices {
///     println!("Found: {} at {}", device.room_name, device.ip_address);
/// }
/// ```
pub fn get() -> Vec<Device> {
    get_with_timeout(DEFAULT_TIMEOUT)
}

/// Discover all zone players on the local network with a custom window.
///
/// # Arguments
///
/// * `timeout` - How long to collect SSDP responses; also bounds each descriptor fetch
///
/// # Examples
///
/// ```no_run
/// use sonos_discovery::get_with_timeout;
/// use std::time::Duration;
///
/// let devices = get_with_timeout(Duration::from_secs(5));
/// for device in devices {
///     println!("Found: {} at {}", device.room_name, device.ip_address);
/// }
/// ```
pub fn get_with_timeout(timeout: Duration) -> Vec<Device> {
    collect(get_iter_with_timeout(timeout))
}

/// Discover zone players, reporting a failure to start the search.
///
/// # Errors
///
/// Returns `NetworkError` when the discovery socket or HTTP client cannot be
/// created. Individual devices that fail to resolve are dropped, not reported.
pub fn try_get_with_timeout(timeout: Duration) -> Result<Vec<Device>> {
    let mut iter = DiscoveryIterator::new(timeout)?;
    iter.fill_buffer()?;
    Ok(collect(iter))
}

/// Get an iterator for discovering zone players with the default 3-second window.
///
/// # Examples
///
/// ```no_run
/// use sonos_discovery::{get_iter, DeviceEvent};
///
/// for event in get_iter() {
///     match event {
///         DeviceEvent::Found(device) => {
///             println!("Found: {} at {}", device.room_name, device.ip_address);
///             break;
///         }
///     }
/// }
/// ```
pub fn get_iter() -> DiscoveryIterator {
    get_iter_with_timeout(DEFAULT_TIMEOUT)
}

/// Get an iterator for discovering zone players with a custom window.
///
/// If the iterator cannot be created, the error is logged and an empty
/// iterator is returned.
pub fn get_iter_with_timeout(timeout: Duration) -> DiscoveryIterator {
    DiscoveryIterator::new(timeout).unwrap_or_else(|e| {
        warn!("discovery unavailable: {}", e);
        DiscoveryIterator::empty()
    })
}

/// Resolve a single descriptor location into a [`Device`], bypassing SSDP.
///
/// # Examples
///
/// ```no_run
/// use sonos_discovery::resolve;
/// use std::time::Duration;
///
/// let device = resolve("http://192.168.1.100:1400/xml/device_description.xml", Duration::from_secs(3))?;
/// println!("{}", device.zone_name());
/// # Ok::<(), sonos_discovery::DiscoveryError>(())
/// ```
pub fn resolve(location: &str, timeout: Duration) -> Result<Device> {
    DescriptorResolver::new(timeout)?.resolve(location)
}

fn collect(iter: DiscoveryIterator) -> Vec<Device> {
    iter.map(|event| match event {
        DeviceEvent::Found(device) => device,
    })
    .collect()
}
