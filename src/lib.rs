//! Driver for the pinDMD v2, a 128x32 monochrome dot-matrix display on USB
//! bulk transport.
//!
//! Bitmaps are reduced to 8-bit luminosity (optionally tinted for
//! previews), packed into four bit planes and pushed to the device as one
//! 2052-byte frame.

pub mod display_constants;
pub mod dmd_display;
pub mod error;
pub mod monochrome;

pub use dmd_display::{FrameBuffer, PinDmd2, RusbPort, UsbPort};
pub use error::DmdError;
