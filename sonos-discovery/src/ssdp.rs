//! SSDP (Simple Service Discovery Protocol) implementation for device discovery
//!
//! This module provides internal SSDP client functionality for discovering UPnP devices
//! on the local network. It is not part of the public API.

use std::net::{SocketAddr, UdpSocket};
use std::time::{Duration, Instant};
use crate::error::{DiscoveryError, Result};

const SSDP_MULTICAST_ADDR: &str = "239.255.255.250:1900";

/// Search target advertised by zone players
pub(crate) const ZONE_PLAYER_URN: &str = "urn:schemas-upnp-org:device:ZonePlayer:1";

/// SSDP response containing device information
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SsdpResponse {
    /// IP address the datagram came from
    pub address: String,
    pub location: String,
    pub urn: String,
    pub usn: String,
    pub server: Option<String>,
}

/// SSDP client for device discovery
pub(crate) struct SsdpClient {
    socket: UdpSocket,
    window: Duration,
}

impl SsdpClient {
    /// Create a new SSDP client that collects responses for `window`
    pub fn new(window: Duration) -> Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0")
            .map_err(|e| DiscoveryError::NetworkError(format!("Failed to bind UDP socket: {}", e)))?;

        socket.set_multicast_loop_v4(true)
            .map_err(|e| DiscoveryError::NetworkError(format!("Failed to set multicast loop: {}", e)))?;

        Ok(Self { socket, window })
    }

    /// Send an M-SEARCH request and return an iterator of responses
    ///
    /// The iterator stops once the collection window has elapsed, no matter
    /// how many datagrams keep arriving.
    pub fn search(&self, search_target: &str) -> Result<SsdpResponseIterator<'_>> {
        let request = build_search_request(search_target);

        self.socket.send_to(request.as_bytes(), SSDP_MULTICAST_ADDR)
            .map_err(|e| DiscoveryError::NetworkError(format!("Failed to send M-SEARCH: {}", e)))?;

        Ok(SsdpResponseIterator::new(&self.socket, Instant::now() + self.window))
    }
}

fn build_search_request(search_target: &str) -> String {
    format!(
        "M-SEARCH * HTTP/1.1\r\n\
         HOST: {}\r\n\
         MAN: \"ssdp:discover\"\r\n\
         MX: 2\r\n\
         ST: {}\r\n\
         USER-AGENT: sonos-remote/1.0 UPnP/1.0\r\n\
         \r\n",
        SSDP_MULTICAST_ADDR, search_target
    )
}

/// Iterator for SSDP responses
pub(crate) struct SsdpResponseIterator<'a> {
    socket: &'a UdpSocket,
    buffer: [u8; 2048],
    deadline: Instant,
    finished: bool,
}

impl<'a> SsdpResponseIterator<'a> {
    fn new(socket: &'a UdpSocket, deadline: Instant) -> Self {
        Self {
            socket,
            buffer: [0; 2048],
            deadline,
            finished: false,
        }
    }

    fn receive(&mut self) -> Option<Result<(usize, SocketAddr)>> {
        let remaining = self.deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return None;
        }

        if let Err(e) = self.socket.set_read_timeout(Some(remaining)) {
            return Some(Err(DiscoveryError::NetworkError(format!("Failed to set read timeout: {}", e))));
        }

        match self.socket.recv_from(&mut self.buffer) {
            Ok(received) => Some(Ok(received)),
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock || e.kind() == std::io::ErrorKind::TimedOut => None,
            Err(e) => Some(Err(DiscoveryError::NetworkError(format!("Socket error: {}", e)))),
        }
    }
}

impl<'a> Iterator for SsdpResponseIterator<'a> {
    type Item = Result<SsdpResponse>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            let (size, from) = match self.receive() {
                Some(Ok(received)) => received,
                Some(Err(e)) => {
                    self.finished = true;
                    return Some(Err(e));
                }
                None => {
                    self.finished = true;
                    return None;
                }
            };

            // Invalid UTF-8 or incomplete headers: wait for the next datagram
            let Ok(text) = std::str::from_utf8(&self.buffer[..size]) else {
                continue;
            };
            if let Some(response) = parse_ssdp_response(text, &from.ip().to_string()) {
                return Some(Ok(response));
            }
        }

        None
    }
}

/// Parse an SSDP response from HTTP text
///
/// Header names are matched case-insensitively. LOCATION, ST and USN are
/// required; anything else except SERVER is ignored.
fn parse_ssdp_response(response: &str, address: &str) -> Option<SsdpResponse> {
    let mut location = None;
    let mut urn = None;
    let mut usn = None;
    let mut server = None;

    for (name, value) in response.lines().filter_map(split_header) {
        if name.eq_ignore_ascii_case("LOCATION") {
            location = Some(value);
        } else if name.eq_ignore_ascii_case("ST") {
            urn = Some(value);
        } else if name.eq_ignore_ascii_case("USN") {
            usn = Some(value);
        } else if name.eq_ignore_ascii_case("SERVER") {
            server = Some(value);
        }
    }

    match (location, urn, usn) {
        (Some(location), Some(urn), Some(usn)) if !location.is_empty() => Some(SsdpResponse {
            address: address.to_string(),
            location,
            urn,
            usn,
            server,
        }),
        _ => None,
    }
}

/// Split a line like "HEADER: value" into its trimmed name and value
fn split_header(line: &str) -> Option<(&str, String)> {
    let (name, value) = line.trim().split_once(':')?;
    let name = name.trim();
    if name.is_empty() || name.contains(' ') {
        return None;
    }
    Some((name, value.trim().to_string()))
}
