//! Device description parsing and validation.
//!
//! This module handles parsing the UPnP descriptor document a zone player
//! serves at its SSDP `LOCATION`, and turning it into a [`Device`] with a
//! zone name and control endpoints.

use crate::error::{DiscoveryError, Result};
use crate::{Device, DEFAULT_AV_TRANSPORT_PATH, DEFAULT_PORT, DEFAULT_RENDERING_CONTROL_PATH};
use serde::Deserialize;

/// UPnP device description root element.
#[derive(Debug, Deserialize)]
pub struct Root {
    pub device: DeviceDescription,
}

/// Internal device description parsed from XML.
///
/// Zone players describe themselves as a root device with embedded
/// MediaRenderer/MediaServer devices; services can appear at any level.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDescription {
    pub device_type: String,
    pub friendly_name: String,
    pub manufacturer: String,
    pub model_name: String,
    #[serde(rename = "UDN")]
    pub udn: String,
    pub room_name: Option<String>,
    pub service_list: Option<ServiceList>,
    pub device_list: Option<DeviceList>,
}

/// `<serviceList>` element
#[derive(Debug, Default, Deserialize)]
pub struct ServiceList {
    #[serde(rename = "service", default)]
    pub services: Vec<ServiceDescription>,
}

/// A single `<service>` entry
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceDescription {
    #[serde(rename = "serviceType")]
    pub service_type: String,
    #[serde(rename = "controlURL")]
    pub control_url: String,
}

/// `<deviceList>` element
#[derive(Debug, Default, Deserialize)]
pub struct DeviceList {
    #[serde(rename = "device", default)]
    pub devices: Vec<EmbeddedDevice>,
}

/// Embedded device; only its services matter here
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedDevice {
    pub device_type: Option<String>,
    pub service_list: Option<ServiceList>,
    pub device_list: Option<DeviceList>,
}

impl DeviceDescription {
    /// Parse device description from XML.
    ///
    /// # Errors
    ///
    /// Returns `DiscoveryError::ParseError` if the XML is malformed or missing required fields.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let root: Root = quick_xml::de::from_str(xml)
            .map_err(|e| DiscoveryError::ParseError(format!("Failed to parse device XML: {}", e)))?;

        Ok(root.device)
    }

    /// Check if this device is a zone player.
    ///
    /// Validates by checking manufacturer name and device type.
    pub fn is_sonos_device(&self) -> bool {
        self.manufacturer.to_lowercase().contains("sonos")
            || self.device_type.contains("ZonePlayer")
            || self.device_type.contains("MediaRenderer")
    }

    /// All services declared by this device and its embedded devices,
    /// in document order.
    pub fn services(&self) -> Vec<&ServiceDescription> {
        let mut services = Vec::new();
        collect_services(self.service_list.as_ref(), self.device_list.as_ref(), &mut services);
        services
    }

    /// Control path for the first service whose type contains `needle`
    pub fn control_path(&self, needle: &str) -> Option<String> {
        self.services()
            .into_iter()
            .find(|service| service.service_type.contains(needle))
            .map(|service| service.control_url.trim_start_matches('/').to_string())
            .filter(|path| !path.is_empty())
    }

    /// Convert device description to public Device type.
    ///
    /// # Arguments
    ///
    /// * `location` - descriptor URL the device advertised; supplies host and port
    ///
    /// # Errors
    ///
    /// `ParseError` when the descriptor carries no zone name or the
    /// location is not a usable URL.
    pub fn into_device(self, location: &str) -> Result<Device> {
        let (ip_address, port) = parse_location(location)
            .ok_or_else(|| DiscoveryError::ParseError(format!("Invalid location URL: {}", location)))?;

        let room_name = self
            .room_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| DiscoveryError::ParseError(format!("{} has no roomName", self.udn)))?
            .to_string();

        let av_transport_path = self
            .control_path("AVTransport")
            .unwrap_or_else(|| DEFAULT_AV_TRANSPORT_PATH.to_string());
        let rendering_control_path = self
            .control_path(":RenderingControl:")
            .unwrap_or_else(|| DEFAULT_RENDERING_CONTROL_PATH.to_string());

        Ok(Device {
            id: self.udn,
            name: self.friendly_name,
            room_name,
            ip_address,
            port,
            model_name: self.model_name,
            av_transport_path,
            rendering_control_path,
        })
    }
}

fn collect_services<'a>(
    service_list: Option<&'a ServiceList>,
    device_list: Option<&'a DeviceList>,
    out: &mut Vec<&'a ServiceDescription>,
) {
    if let Some(list) = service_list {
        out.extend(list.services.iter());
    }
    if let Some(list) = device_list {
        for device in &list.devices {
            collect_services(device.service_list.as_ref(), device.device_list.as_ref(), out);
        }
    }
}

/// Extract host and port from a descriptor location URL.
///
/// # Returns
///
/// The host portion of the URL and its port (1400 when the URL omits it),
/// or `None` if the URL is malformed.
pub fn parse_location(url: &str) -> Option<(String, u16)> {
    let parsed = reqwest::Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_string();
    Some((host, parsed.port().unwrap_or(DEFAULT_PORT)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KITCHEN_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<root xmlns="urn:schemas-upnp-org:device-1-0">
  <specVersion><major>1</major><minor>0</minor></specVersion>
  <device>
    <deviceType>urn:schemas-upnp-org:device:ZonePlayer:1</deviceType>
    <friendlyName>192.168.1.50 - Sonos One - RINCON_ABCDEF123456</friendlyName>
    <manufacturer>Sonos, Inc.</manufacturer>
    <modelName>Sonos One</modelName>
    <UDN>uuid:RINCON_ABCDEF123456</UDN>
    <roomName>Kitchen</roomName>
    <displayName>One</displayName>
    <serviceList>
      <service>
        <serviceType>urn:schemas-upnp-org:service:DeviceProperties:1</serviceType>
        <serviceId>urn:upnp-org:serviceId:DeviceProperties</serviceId>
        <controlURL>/DeviceProperties/Control</controlURL>
        <eventSubURL>/DeviceProperties/Event</eventSubURL>
        <SCPDURL>/xml/DeviceProperties1.xml</SCPDURL>
      </service>
    </serviceList>
    <deviceList>
      <device>
        <deviceType>urn:schemas-upnp-org:device:MediaRenderer:1</deviceType>
        <serviceList>
          <service>
            <serviceType>urn:schemas-upnp-org:service:RenderingControl:1</serviceType>
            <controlURL>/MediaRenderer/RenderingControl/Control</controlURL>
          </service>
          <service>
            <serviceType>urn:schemas-sonos-com:service:GroupRenderingControl:1</serviceType>
            <controlURL>/MediaRenderer/GroupRenderingControl/Control</controlURL>
          </service>
          <service>
            <serviceType>urn:schemas-upnp-org:service:AVTransport:1</serviceType>
            <controlURL>/MediaRenderer/AVTransport/Control</controlURL>
          </service>
        </serviceList>
      </device>
    </deviceList>
  </device>
</root>"#;

    #[test]
    fn test_parse_location() {
        assert_eq!(
            parse_location("http://192.168.1.100:1400/xml/device_description.xml"),
            Some(("192.168.1.100".to_string(), 1400))
        );
        assert_eq!(
            parse_location("http://10.0.0.5:8080/path"),
            Some(("10.0.0.5".to_string(), 8080))
        );
        assert_eq!(
            parse_location("http://10.0.0.5/xml/device_description.xml"),
            Some(("10.0.0.5".to_string(), 1400))
        );
        assert_eq!(parse_location("invalid-url"), None);
    }

    #[test]
    fn test_device_from_xml() {
        let device = DeviceDescription::from_xml(KITCHEN_XML).unwrap();

        assert_eq!(device.manufacturer, "Sonos, Inc.");
        assert_eq!(device.model_name, "Sonos One");
        assert_eq!(device.udn, "uuid:RINCON_ABCDEF123456");
        assert_eq!(device.room_name.as_deref(), Some("Kitchen"));
        assert_eq!(device.services().len(), 4);
        assert!(device.is_sonos_device());
    }

    #[test]
    fn test_control_paths_from_embedded_devices() {
        let device = DeviceDescription::from_xml(KITCHEN_XML).unwrap();

        assert_eq!(
            device.control_path("AVTransport").as_deref(),
            Some("MediaRenderer/AVTransport/Control")
        );
        // Must not pick GroupRenderingControl
        assert_eq!(
            device.control_path(":RenderingControl:").as_deref(),
            Some("MediaRenderer/RenderingControl/Control")
        );
        assert_eq!(device.control_path("ContentDirectory"), None);
    }

    #[test]
    fn test_into_device_conversion() {
        let device = DeviceDescription::from_xml(KITCHEN_XML)
            .unwrap()
            .into_device("http://192.168.1.50:1400/xml/device_description.xml")
            .unwrap();

        assert_eq!(device.id, "uuid:RINCON_ABCDEF123456");
        assert_eq!(device.room_name, "Kitchen");
        assert_eq!(device.zone_name(), "Kitchen");
        assert_eq!(device.ip_address, "192.168.1.50");
        assert_eq!(device.port, 1400);
        assert_eq!(device.model_name, "Sonos One");
        assert_eq!(device.base_url(), "http://192.168.1.50:1400");
    }

    #[test]
    fn test_into_device_defaults_control_paths_without_service_list() {
        let xml = r#"<?xml version="1.0"?>
<root xmlns="urn:schemas-upnp-org:device-1-0">
  <device>
    <deviceType>urn:schemas-upnp-org:device:ZonePlayer:1</deviceType>
    <friendlyName>Office</friendlyName>
    <manufacturer>Sonos, Inc.</manufacturer>
    <modelName>Sonos Play:1</modelName>
    <UDN>uuid:RINCON_XYZ789</UDN>
    <roomName>Office</roomName>
  </device>
</root>"#;

        let device = DeviceDescription::from_xml(xml)
            .unwrap()
            .into_device("http://192.168.1.60:1400/xml/device_description.xml")
            .unwrap();

        assert_eq!(device.av_transport_path, DEFAULT_AV_TRANSPORT_PATH);
        assert_eq!(device.rendering_control_path, DEFAULT_RENDERING_CONTROL_PATH);
    }

    #[test]
    fn test_into_device_requires_room_name() {
        let xml = r#"<?xml version="1.0"?>
<root xmlns="urn:schemas-upnp-org:device-1-0">
  <device>
    <deviceType>urn:schemas-upnp-org:device:ZonePlayer:1</deviceType>
    <friendlyName>Bedroom</friendlyName>
    <manufacturer>Sonos, Inc.</manufacturer>
    <modelName>Sonos One</modelName>
    <UDN>uuid:RINCON_NOROOM</UDN>
  </device>
</root>"#;

        let result = DeviceDescription::from_xml(xml)
            .unwrap()
            .into_device("http://192.168.1.70:1400/xml/device_description.xml");

        assert!(matches!(result, Err(DiscoveryError::ParseError(_))));
    }

    #[test]
    fn test_not_sonos_device() {
        let xml = r#"<?xml version="1.0"?>
<root xmlns="urn:schemas-upnp-org:device-1-0">
  <device>
    <deviceType>urn:schemas-upnp-org:device:InternetGatewayDevice:1</deviceType>
    <friendlyName>Router</friendlyName>
    <manufacturer>Other Company</manufacturer>
    <modelName>Router Model</modelName>
    <UDN>uuid:ROUTER123</UDN>
  </device>
</root>"#;

        let device = DeviceDescription::from_xml(xml).unwrap();
        assert!(!device.is_sonos_device());
    }

    #[test]
    fn test_malformed_xml() {
        assert!(DeviceDescription::from_xml("not xml at all").is_err());
        assert!(DeviceDescription::from_xml("<root><nothing/></root>").is_err());
    }
}
