use rusb::{DeviceDescriptor, DeviceHandle, GlobalContext};
use std::time::Duration;

/// The transport operations a session needs from an opened USB device.
pub trait UsbPort {
    fn product_string(&mut self) -> Result<String, rusb::Error>;
    fn set_configuration(&mut self, configuration: u8) -> Result<(), rusb::Error>;
    fn claim_interface(&mut self, interface: u8) -> Result<(), rusb::Error>;
    fn release_interface(&mut self, interface: u8) -> Result<(), rusb::Error>;
    fn write_bulk(
        &mut self,
        endpoint: u8,
        data: &[u8],
        timeout: Duration,
    ) -> Result<usize, rusb::Error>;
}

/// libusb-backed port. The underlying handle closes when the port drops.
pub struct RusbPort {
    handle: DeviceHandle<GlobalContext>,
    descriptor: DeviceDescriptor,
}

impl RusbPort {
    /// Open the first device with the given identity, if one is attached.
    pub fn open(vendor_id: u16, product_id: u16) -> Result<Option<RusbPort>, rusb::Error> {
        let Some(handle) = rusb::open_device_with_vid_pid(vendor_id, product_id) else {
            return Ok(None);
        };
        let descriptor = handle.device().device_descriptor()?;
        Ok(Some(RusbPort { handle, descriptor }))
    }
}

impl UsbPort for RusbPort {
    fn product_string(&mut self) -> Result<String, rusb::Error> {
        self.handle.read_product_string_ascii(&self.descriptor)
    }

    fn set_configuration(&mut self, configuration: u8) -> Result<(), rusb::Error> {
        self.handle.set_active_configuration(configuration)
    }

    fn claim_interface(&mut self, interface: u8) -> Result<(), rusb::Error> {
        self.handle.claim_interface(interface)
    }

    fn release_interface(&mut self, interface: u8) -> Result<(), rusb::Error> {
        self.handle.release_interface(interface)
    }

    fn write_bulk(
        &mut self,
        endpoint: u8,
        data: &[u8],
        timeout: Duration,
    ) -> Result<usize, rusb::Error> {
        self.handle.write_bulk(endpoint, data, timeout)
    }
}
