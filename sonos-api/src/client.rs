use std::time::Duration;

use soap_client::SoapClient;
pub use soap_client::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_TIMEOUT};
use sonos_discovery::Device;
use tracing::debug;

use crate::{Result, SonosOperation};

/// A client for executing operations against zone players
///
/// This client bridges the stateless operation definitions and actual
/// network requests. It uses the soap-client crate for the SOAP exchange.
#[derive(Debug, Clone, Default)]
pub struct SonosClient {
    soap_client: SoapClient,
}

impl SonosClient {
    /// Create a new client with the default connect/read timeouts
    pub fn new() -> Self {
        Self {
            soap_client: SoapClient::new(),
        }
    }

    /// Create a client whose requests give up after the given timeouts
    pub fn with_timeouts(connect: Duration, read: Duration) -> Self {
        Self {
            soap_client: SoapClient::with_timeouts(connect, read),
        }
    }

    /// Create a client with a preconfigured SOAP client
    pub fn with_soap_client(soap_client: SoapClient) -> Self {
        Self { soap_client }
    }

    /// Execute an operation against a device
    ///
    /// Exactly one request is sent; nothing is retried.
    ///
    /// # Example
    /// ```no_run
    /// use sonos_api::SonosClient;
    /// use sonos_api::operations::av_transport::{GetTransportInfoOperation, GetTransportInfoRequest};
    ///
    /// let client = SonosClient::new();
    /// let device = sonos_discovery::get().into_iter().next().unwrap();
    /// let info = client.execute::<GetTransportInfoOperation>(&device, &GetTransportInfoRequest { instance_id: 0 })?;
    /// println!("{:?}", info.current_transport_state);
    /// # Ok::<(), sonos_api::ApiError>(())
    /// ```
    pub fn execute<Op: SonosOperation>(&self, device: &Device, request: &Op::Request) -> Result<Op::Response> {
        Op::validate(request)?;

        let payload = Op::build_payload(request);

        debug!(
            zone = %device.room_name,
            service = Op::SERVICE.name(),
            action = Op::ACTION,
            "executing operation"
        );

        let xml = self.soap_client.call(
            &device.base_url(),
            Op::SERVICE.control_path(device),
            Op::SERVICE.service_uri(),
            Op::ACTION,
            &payload,
        )?;

        Op::parse_response(&xml)
    }
}
