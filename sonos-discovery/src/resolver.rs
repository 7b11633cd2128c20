//! Descriptor resolution: one synchronous fetch per responding player.

use std::time::Duration;

use tracing::debug;

use crate::device::DeviceDescription;
use crate::error::{DiscoveryError, Result};
use crate::Device;

/// Fetches descriptor documents and turns them into [`Device`]s.
///
/// # Examples
///
/// ```no_run
/// use sonos_discovery::DescriptorResolver;
/// use std::time::Duration;
///
/// let resolver = DescriptorResolver::new(Duration::from_secs(3))?;
/// let device = resolver.resolve("http://192.168.1.100:1400/xml/device_description.xml")?;
/// println!("{} controls {}", device.base_url(), device.zone_name());
/// # Ok::<(), sonos_discovery::DiscoveryError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DescriptorResolver {
    http_client: reqwest::blocking::Client,
}

impl DescriptorResolver {
    /// Create a resolver whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let http_client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DiscoveryError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http_client })
    }

    /// Fetch and parse the descriptor at `location`.
    ///
    /// # Errors
    ///
    /// * `NetworkError` - unreachable host or non-success HTTP status
    /// * `ParseError` - body is not a device description, or it lacks a zone name
    /// * `InvalidDevice` - the description is not a zone player
    pub fn resolve(&self, location: &str) -> Result<Device> {
        debug!(location, "fetching device descriptor");

        let response = self
            .http_client
            .get(location)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|e| DiscoveryError::NetworkError(format!("Failed to fetch device description: {}", e)))?;

        let xml = response
            .text()
            .map_err(|e| DiscoveryError::NetworkError(format!("Failed to read response body: {}", e)))?;

        let description = DeviceDescription::from_xml(&xml)?;
        if !description.is_sonos_device() {
            return Err(DiscoveryError::InvalidDevice(format!(
                "{} ({}) is not a zone player",
                description.friendly_name, description.manufacturer
            )));
        }

        description.into_device(location)
    }
}
