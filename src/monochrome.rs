//! Reduces arbitrary bitmaps to the 8-bit luminosity image the frame
//! encoder consumes, with an optional tint pass for on-screen previews.

use crate::error::DmdError;
use image::{DynamicImage, GrayImage, Rgba};

/// Convert a bitmap into a single-channel 8-bit luminosity image of the
/// same dimensions.
///
/// All integer pixel formats are supported; anything else fails with
/// [`DmdError::UnsupportedFormat`].
pub fn grayscale(bmp: &DynamicImage) -> Result<GrayImage, DmdError> {
    match bmp {
        DynamicImage::ImageLuma8(gray) => Ok(gray.clone()),
        DynamicImage::ImageLumaA8(_)
        | DynamicImage::ImageRgb8(_)
        | DynamicImage::ImageRgba8(_)
        | DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_)
        | DynamicImage::ImageRgb16(_)
        | DynamicImage::ImageRgba16(_) => Ok(bmp.to_luma8()),
        other => Err(DmdError::UnsupportedFormat(other.color())),
    }
}

/// Recolor a grayscale image by scaling each color channel with the tint's
/// normalized components.
///
/// `tint[3] == 0` means no tint: the grayscale image is returned unchanged.
pub fn shade(gray: &GrayImage, tint: Rgba<u8>) -> DynamicImage {
    if tint[3] == 0 {
        return DynamicImage::ImageLuma8(gray.clone());
    }

    let scale = [
        f32::from(tint[0]) / 255.0,
        f32::from(tint[1]) / 255.0,
        f32::from(tint[2]) / 255.0,
    ];
    let mut colored = DynamicImage::ImageLuma8(gray.clone()).into_rgba8();
    for pixel in colored.pixels_mut() {
        for (channel, factor) in pixel.0[..3].iter_mut().zip(scale) {
            // in-range inputs cannot push the product past 255, clamp anyway
            *channel = (f32::from(*channel) * factor).clamp(0.0, 255.0) as u8;
        }
    }
    DynamicImage::ImageRgba8(colored)
}

/// The whole pre-processing stage: reduce to luminosity, then tint if the
/// tint's presence flag is set.
pub fn process(bmp: &DynamicImage, tint: Rgba<u8>) -> Result<DynamicImage, DmdError> {
    let gray = grayscale(bmp)?;
    Ok(shade(&gray, tint))
}
