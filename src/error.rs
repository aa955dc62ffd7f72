use image::ColorType;
use thiserror::Error;

/// The canonical error type for driving a pinDMD v2.
///
/// Unavailability of the device after discovery is a flag on the session,
/// not an error; everything here is surfaced synchronously to the caller
/// and never retried internally.
#[derive(Debug, Error)]
pub enum DmdError {
    /// Render was called on a session that has not claimed a device.
    #[error("no pinDMD v2 device available, initialize the session first")]
    DeviceNotAvailable,

    /// The image does not match the display's native resolution. The
    /// session stays usable.
    #[error("image must match the display resolution ({expected_width}x{expected_height}), got {actual_width}x{actual_height}")]
    DimensionMismatch {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    /// The color reducer was handed a pixel format it cannot convert.
    #[error("unsupported pixel format {0:?}")]
    UnsupportedFormat(ColorType),

    /// The bulk write failed, timed out or came up short; carries the
    /// transport diagnostic. Re-initialize the session before retrying.
    #[error("bulk transfer failed: {0}")]
    TransferFailed(String),

    #[error(transparent)]
    Usb(#[from] rusb::Error),
}
