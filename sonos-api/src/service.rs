use sonos_discovery::Device;

/// The UPnP services used to control a zone player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// AVTransport service - Controls playback (play, pause, transport URI)
    AVTransport,

    /// RenderingControl service - Controls audio rendering (volume)
    RenderingControl,
}

impl Service {
    /// Get the name of this service as a string
    pub fn name(&self) -> &'static str {
        match self {
            Service::AVTransport => "AVTransport",
            Service::RenderingControl => "RenderingControl",
        }
    }

    /// The UPnP service URI used in SOAP requests
    pub fn service_uri(&self) -> &'static str {
        match self {
            Service::AVTransport => "urn:schemas-upnp-org:service:AVTransport:1",
            Service::RenderingControl => "urn:schemas-upnp-org:service:RenderingControl:1",
        }
    }

    /// Control path this device advertised for the service
    pub fn control_path<'a>(&self, device: &'a Device) -> &'a str {
        match self {
            Service::AVTransport => &device.av_transport_path,
            Service::RenderingControl => &device.rendering_control_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonos_discovery::DEFAULT_RENDERING_CONTROL_PATH;

    #[test]
    fn test_control_path_follows_device() {
        let device = Device {
            id: "uuid:RINCON_1".to_string(),
            name: "Kitchen".to_string(),
            room_name: "Kitchen".to_string(),
            ip_address: "10.0.0.5".to_string(),
            port: 1400,
            model_name: "Sonos One".to_string(),
            av_transport_path: "Custom/AVTransport/Control".to_string(),
            rendering_control_path: DEFAULT_RENDERING_CONTROL_PATH.to_string(),
        };

        assert_eq!(Service::AVTransport.control_path(&device), "Custom/AVTransport/Control");
        assert_eq!(
            Service::RenderingControl.control_path(&device),
            DEFAULT_RENDERING_CONTROL_PATH
        );
    }

    #[test]
    fn test_service_uris() {
        assert_eq!(
            Service::AVTransport.service_uri(),
            "urn:schemas-upnp-org:service:AVTransport:1"
        );
        assert_eq!(
            Service::RenderingControl.service_uri(),
            "urn:schemas-upnp-org:service:RenderingControl:1"
        );
        assert_eq!(Service::RenderingControl.name(), "RenderingControl");
    }
}
