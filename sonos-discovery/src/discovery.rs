//! Core discovery logic and iterator implementation.
//!
//! This module implements the discovery algorithm that:
//! 1. Sends an SSDP M-SEARCH request for ZonePlayer devices
//! 2. Collects SSDP responses until the window closes
//! 3. Keeps the first response per responding address (LOCATION host and port)
//! 4. Fetches and parses each descriptor, dropping the ones that fail
//! 5. Yields discovered devices in response arrival order

use std::collections::HashSet;
use std::time::Duration;

use tracing::{debug, warn};

use crate::device::parse_location;
use crate::error::Result;
use crate::resolver::DescriptorResolver;
use crate::ssdp::{SsdpClient, SsdpResponse, ZONE_PLAYER_URN};
use crate::DeviceEvent;

/// Iterator that discovers zone players on the local network.
///
/// Yields `DeviceEvent::Found` for each player whose descriptor resolved.
/// Unreachable or malformed descriptors are logged and skipped, so a partial
/// result is still produced.
///
/// # Examples
///
/// ```no_run
/// use sonos_discovery::{get_iter, DeviceEvent};
///
/// for event in get_iter() {
///     match event {
///         DeviceEvent::Found(device) => {
///             println!("Found: {}", device.room_name);
///         }
///     }
/// }
/// ```
pub struct DiscoveryIterator {
    ssdp_client: Option<SsdpClient>,
    ssdp_buffer: Vec<SsdpResponse>,
    buffer_index: usize,
    seen_addresses: HashSet<String>,
    resolver: Option<DescriptorResolver>,
}

impl DiscoveryIterator {
    /// Create a new discovery iterator with the specified timeout
    ///
    /// # Errors
    ///
    /// Returns `NetworkError` if the UDP socket or HTTP client cannot be created.
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self {
            ssdp_client: Some(SsdpClient::new(timeout)?),
            ssdp_buffer: Vec::new(),
            buffer_index: 0,
            seen_addresses: HashSet::new(),
            resolver: Some(DescriptorResolver::new(timeout)?),
        })
    }

    /// Create an empty iterator that yields no results
    pub(crate) fn empty() -> Self {
        Self {
            ssdp_client: None,
            ssdp_buffer: Vec::new(),
            buffer_index: 0,
            seen_addresses: HashSet::new(),
            resolver: None,
        }
    }

    /// Iterator over already-collected SSDP responses
    #[cfg(test)]
    pub(crate) fn from_responses(responses: Vec<SsdpResponse>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            ssdp_client: None,
            ssdp_buffer: responses,
            buffer_index: 0,
            seen_addresses: HashSet::new(),
            resolver: Some(DescriptorResolver::new(timeout)?),
        })
    }

    /// Address a response is deduplicated on: LOCATION host and port, or
    /// the datagram sender when the location cannot be parsed
    fn responder_address(response: &SsdpResponse) -> String {
        parse_location(&response.location)
            .map(|(host, port)| format!("{}:{}", host, port))
            .unwrap_or_else(|| response.address.clone())
    }

    /// Check if an SSDP response is likely from a zone player (early filtering)
    fn is_likely_sonos(response: &SsdpResponse) -> bool {
        response.urn.contains("ZonePlayer")
            || response.usn.contains("RINCON")
            || response
                .server
                .as_ref()
                .map_or(false, |server| server.to_lowercase().contains("sonos"))
    }

    /// Search and fill the buffer with SSDP responses
    ///
    /// Returns an error only when the search itself could not be sent.
    pub(crate) fn fill_buffer(&mut self) -> Result<()> {
        let Some(client) = self.ssdp_client.take() else {
            return Ok(());
        };

        for result in client.search(ZONE_PLAYER_URN)? {
            match result {
                Ok(response) => {
                    debug!(address = %response.address, location = %response.location, "SSDP response");
                    self.ssdp_buffer.push(response);
                }
                Err(e) => warn!("SSDP receive failed, ending collection: {}", e),
            }
        }
        Ok(())
    }
}

impl Iterator for DiscoveryIterator {
    type Item = DeviceEvent;

    fn next(&mut self) -> Option<Self::Item> {
        // Fill buffer on first call
        if let Err(e) = self.fill_buffer() {
            warn!("SSDP search failed: {}", e);
        }

        let resolver = self.resolver.as_ref()?;

        while let Some(response) = self.ssdp_buffer.get(self.buffer_index) {
            self.buffer_index += 1;

            // First response per address wins
            if !self.seen_addresses.insert(Self::responder_address(response)) {
                continue;
            }

            if !Self::is_likely_sonos(response) {
                debug!(address = %response.address, "ignoring non zone player response");
                continue;
            }

            match resolver.resolve(&response.location) {
                Ok(device) => return Some(DeviceEvent::Found(device)),
                Err(e) => {
                    warn!(address = %response.address, location = %response.location, "dropping device: {}", e);
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(room: &str, udn: &str) -> String {
        format!(
            r#"<?xml version="1.0"?>
<root xmlns="urn:schemas-upnp-org:device-1-0">
  <device>
    <deviceType>urn:schemas-upnp-org:device:ZonePlayer:1</deviceType>
    <friendlyName>{room}</friendlyName>
    <manufacturer>Sonos, Inc.</manufacturer>
    <modelName>Sonos One</modelName>
    <UDN>{udn}</UDN>
    <roomName>{room}</roomName>
  </device>
</root>"#
        )
    }

    fn response(address: &str, location: String) -> SsdpResponse {
        SsdpResponse {
            address: address.to_string(),
            location,
            urn: ZONE_PLAYER_URN.to_string(),
            usn: "uuid:RINCON_TEST::urn:schemas-upnp-org:device:ZonePlayer:1".to_string(),
            server: None,
        }
    }

    fn rooms(iter: DiscoveryIterator) -> Vec<String> {
        iter.map(|event| match event {
            DeviceEvent::Found(device) => device.room_name,
        })
        .collect()
    }

    #[test]
    fn test_keeps_arrival_order_and_first_response_per_address() {
        let mut kitchen_player = mockito::Server::new();
        let mut office_player = mockito::Server::new();
        let kitchen = kitchen_player
            .mock("GET", "/kitchen.xml")
            .with_body(descriptor("Kitchen", "uuid:RINCON_1"))
            .expect(1)
            .create();
        let office = office_player
            .mock("GET", "/office.xml")
            .with_body(descriptor("Office", "uuid:RINCON_2"))
            .create();
        let repeat = kitchen_player
            .mock("GET", "/kitchen-again.xml")
            .with_body(descriptor("Kitchen Again", "uuid:RINCON_1"))
            .expect(0)
            .create();

        let iter = DiscoveryIterator::from_responses(
            vec![
                response("10.0.0.1", format!("{}/kitchen.xml", kitchen_player.url())),
                response("10.0.0.2", format!("{}/office.xml", office_player.url())),
                response("10.0.0.1", format!("{}/kitchen-again.xml", kitchen_player.url())),
            ],
            Duration::from_secs(2),
        )
        .unwrap();

        assert_eq!(rooms(iter), vec!["Kitchen", "Office"]);
        kitchen.assert();
        office.assert();
        repeat.assert();
    }

    #[test]
    fn test_same_location_host_from_two_senders_resolves_once() {
        let mut server = mockito::Server::new();
        let kitchen = server
            .mock("GET", "/xml/device_description.xml")
            .with_body(descriptor("Kitchen", "uuid:RINCON_1"))
            .expect(1)
            .create();
        let location = format!("{}/xml/device_description.xml", server.url());

        let iter = DiscoveryIterator::from_responses(
            vec![
                response("10.0.0.1", location.clone()),
                response("10.0.0.2", location),
            ],
            Duration::from_secs(2),
        )
        .unwrap();

        assert_eq!(rooms(iter), vec!["Kitchen"]);
        kitchen.assert();
    }

    #[test]
    fn test_malformed_and_unreachable_descriptors_are_dropped() {
        let mut broken_player = mockito::Server::new();
        let mut missing_player = mockito::Server::new();
        let mut office_player = mockito::Server::new();
        let _broken = broken_player.mock("GET", "/broken.xml").with_body("<root>").create();
        let _missing = missing_player.mock("GET", "/missing.xml").with_status(404).create();
        let _office = office_player
            .mock("GET", "/office.xml")
            .with_body(descriptor("Office", "uuid:RINCON_2"))
            .create();

        let iter = DiscoveryIterator::from_responses(
            vec![
                response("10.0.0.1", format!("{}/broken.xml", broken_player.url())),
                response("10.0.0.2", format!("{}/missing.xml", missing_player.url())),
                response("10.0.0.3", format!("{}/office.xml", office_player.url())),
            ],
            Duration::from_secs(2),
        )
        .unwrap();

        assert_eq!(rooms(iter), vec!["Office"]);
    }

    #[test]
    fn test_non_zone_player_responses_are_not_fetched() {
        let mut server = mockito::Server::new();
        let router = server.mock("GET", "/router.xml").expect(0).create();

        let mut other = response("10.0.0.9", format!("{}/router.xml", server.url()));
        other.urn = "urn:schemas-upnp-org:device:InternetGatewayDevice:1".to_string();
        other.usn = "uuid:router".to_string();

        let iter = DiscoveryIterator::from_responses(vec![other], Duration::from_secs(1)).unwrap();

        assert!(rooms(iter).is_empty());
        router.assert();
    }

    #[test]
    fn test_responder_address_prefers_location() {
        let with_location = response("10.0.0.2", "http://10.0.0.1:1400/xml/device_description.xml".to_string());
        let without = response("10.0.0.2", "not a url".to_string());

        assert_eq!(DiscoveryIterator::responder_address(&with_location), "10.0.0.1:1400");
        assert_eq!(DiscoveryIterator::responder_address(&without), "10.0.0.2");
    }

    #[test]
    fn test_empty_iterator_yields_nothing() {
        assert_eq!(DiscoveryIterator::empty().count(), 0);
    }
}
