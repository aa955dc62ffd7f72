//! Session with a pinDMD v2 display over USB bulk transport.

pub mod frame;
pub mod usb_port;

pub use frame::FrameBuffer;
pub use usb_port::{RusbPort, UsbPort};

use crate::display_constants::FRAME_BYTES;
use crate::error::DmdError;
use image::GrayImage;
use std::time::Duration;
use tracing::{debug, info};

static DMD_VENDOR_ID: u16 = 0x0314;
static DMD_PRODUCT_ID: u16 = 0xE457;
/// substring of the product descriptor that marks the device family
static DMD_PRODUCT_TAG: &str = "pinDMD V2";

static DMD_CONFIGURATION: u8 = 1;
static DMD_INTERFACE: u8 = 0;
static DMD_ENDPOINT_OUT: u8 = 0x01;
static WRITE_TIMEOUT: Duration = Duration::from_millis(2000);

/// A session with one pinDMD v2 display.
///
/// The session owns the USB handle between [`init`](Self::init) and
/// [`dispose`](Self::dispose) and reuses a single transmit buffer across
/// frames. Rendering is synchronous and blocking; callers serialize
/// `render` calls themselves.
pub struct PinDmd2 {
    port: Option<Box<dyn UsbPort>>,
    frame: FrameBuffer,
}

impl PinDmd2 {
    /// A session with no device claimed yet; call [`init`](Self::init).
    pub fn new() -> PinDmd2 {
        PinDmd2 {
            port: None,
            frame: FrameBuffer::new(),
        }
    }

    /// Whether the last probe found and claimed a device.
    pub fn is_available(&self) -> bool {
        self.port.is_some()
    }

    /// Discover and claim a pinDMD v2, releasing any previously claimed
    /// handle first.
    ///
    /// An absent device leaves the session unavailable; that is an expected
    /// condition, not an error.
    pub fn init(&mut self) -> Result<(), DmdError> {
        self.dispose();
        match RusbPort::open(DMD_VENDOR_ID, DMD_PRODUCT_ID)? {
            Some(port) => self.attach(Box::new(port)),
            None => {
                debug!("pinDMD v2 device not found");
                Ok(())
            }
        }
    }

    /// Probe an opened port and claim it if it identifies as a pinDMD v2.
    ///
    /// A port that does not match leaves the session unavailable; only
    /// claiming the matching device can fail.
    pub fn attach(&mut self, mut port: Box<dyn UsbPort>) -> Result<(), DmdError> {
        self.dispose();
        match port.product_string() {
            Ok(product) if product.contains(DMD_PRODUCT_TAG) => {
                info!("found pinDMD v2 device ({product})");
            }
            Ok(product) => {
                debug!("device found but it is not a pinDMD v2 ({product})");
                return Ok(());
            }
            Err(err) => {
                debug!("device found but its product string is unreadable ({err})");
                return Ok(());
            }
        }
        port.set_configuration(DMD_CONFIGURATION)?;
        port.claim_interface(DMD_INTERFACE)?;
        self.port = Some(port);
        Ok(())
    }

    /// Encode one frame into the transmit buffer and push it to the device
    /// in a single bulk write.
    pub fn render(&mut self, bmp: &GrayImage) -> Result<(), DmdError> {
        let port = self.port.as_mut().ok_or(DmdError::DeviceNotAvailable)?;
        self.frame.encode(bmp)?;
        let written = port
            .write_bulk(DMD_ENDPOINT_OUT, self.frame.as_bytes(), WRITE_TIMEOUT)
            .map_err(|err| DmdError::TransferFailed(err.to_string()))?;
        if written != FRAME_BYTES {
            return Err(DmdError::TransferFailed(format!(
                "short bulk write: {written} of {FRAME_BYTES} bytes"
            )));
        }
        Ok(())
    }

    /// Release the claimed interface and close the handle.
    ///
    /// Safe to call any number of times; the transmit buffer and its sync
    /// header survive, so the session can be re-initialized.
    pub fn dispose(&mut self) {
        if let Some(mut port) = self.port.take() {
            // teardown failures are ignored, the handle closes on drop
            let _ = port.release_interface(DMD_INTERFACE);
        }
    }
}

impl Default for PinDmd2 {
    fn default() -> PinDmd2 {
        PinDmd2::new()
    }
}

impl Drop for PinDmd2 {
    fn drop(&mut self) {
        self.dispose();
    }
}
