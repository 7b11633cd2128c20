//! Snapshot of one discovery pass and lookup by zone name

use sonos_discovery::Device;

/// Devices found by one discovery pass, in response arrival order
#[derive(Debug, Clone, Default)]
pub struct ZoneRegistry {
    devices: Vec<Device>,
}

impl ZoneRegistry {
    pub fn new(devices: Vec<Device>) -> Self {
        Self { devices }
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Zone names in arrival order, duplicates included
    pub fn zone_names(&self) -> Vec<&str> {
        self.devices.iter().map(Device::zone_name).collect()
    }

    /// First device whose zone name equals `zone_name` exactly
    pub fn select(&self, zone_name: &str) -> Option<&Device> {
        select(&self.devices, zone_name)
    }

    /// Like [`ZoneRegistry::select`], consuming the snapshot
    pub fn into_selected(self, zone_name: &str) -> Option<Device> {
        self.devices
            .into_iter()
            .find(|device| device.zone_name() == zone_name)
    }
}

/// Exact, case-sensitive match; the earliest response wins ties
pub fn select<'a>(devices: &'a [Device], zone_name: &str) -> Option<&'a Device> {
    devices.iter().find(|device| device.zone_name() == zone_name)
}
