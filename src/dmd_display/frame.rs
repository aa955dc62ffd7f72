use crate::display_constants::{
    DMD_PIXEL_HEIGHT, DMD_PIXEL_WIDTH, FRAME_BYTES, FRAME_SYNC, GROUPS_PER_ROW, PIXELS_PER_BYTE,
    PLANE_BYTES,
};
use crate::error::DmdError;
use image::GrayImage;

/// Transmit buffer for one frame: the frame sync bytes followed by four
/// 512-byte bit planes. Plane 0 carries luminosity bit 4 of every pixel,
/// plane 3 bit 7; the low nibble is discarded.
///
/// The buffer is allocated once and reused across frames; only the plane
/// bytes are rewritten.
#[derive(Debug)]
pub struct FrameBuffer {
    bytes: [u8; FRAME_BYTES],
}

impl FrameBuffer {
    pub fn new() -> FrameBuffer {
        let mut bytes = [0u8; FRAME_BYTES];
        bytes[..FRAME_SYNC.len()].copy_from_slice(&FRAME_SYNC);
        FrameBuffer { bytes }
    }

    /// The full wire frame, sync header included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// One bit plane of the payload.
    pub fn plane(&self, plane: usize) -> &[u8] {
        let start = FRAME_SYNC.len() + plane * PLANE_BYTES;
        &self.bytes[start..start + PLANE_BYTES]
    }

    /// Encode a luminosity image into the plane bytes.
    ///
    /// The image must match the display resolution exactly; the check runs
    /// before any byte is touched. The sync header is written once at
    /// construction and never here.
    pub fn encode(&mut self, bmp: &GrayImage) -> Result<(), DmdError> {
        let (width, height) = bmp.dimensions();
        if width != DMD_PIXEL_WIDTH || height != DMD_PIXEL_HEIGHT {
            return Err(DmdError::DimensionMismatch {
                expected_width: DMD_PIXEL_WIDTH,
                expected_height: DMD_PIXEL_HEIGHT,
                actual_width: width,
                actual_height: height,
            });
        }

        let payload = &mut self.bytes[FRAME_SYNC.len()..];
        let (plane0, rest) = payload.split_at_mut(PLANE_BYTES);
        let (plane1, rest) = rest.split_at_mut(PLANE_BYTES);
        let (plane2, plane3) = rest.split_at_mut(PLANE_BYTES);

        for y in 0..DMD_PIXEL_HEIGHT {
            for group in 0..GROUPS_PER_ROW {
                let x = group as u32 * PIXELS_PER_BYTE;
                let mut samples = [0u8; 8];
                for (v, sample) in samples.iter_mut().enumerate() {
                    *sample = bmp.get_pixel(x + v as u32, y).0[0];
                }
                let index = y as usize * GROUPS_PER_ROW + group;
                plane0[index] = pack_group(&samples, 4);
                plane1[index] = pack_group(&samples, 5);
                plane2[index] = pack_group(&samples, 6);
                plane3[index] = pack_group(&samples, 7);
            }
        }
        Ok(())
    }
}

impl Default for FrameBuffer {
    fn default() -> FrameBuffer {
        FrameBuffer::new()
    }
}

/// Pack one luminosity bit of 8 horizontally adjacent pixels into a plane
/// byte. Columns are sampled right to left, shifting before each insert, so
/// `samples[7]` lands in bit 7 and `samples[0]` in bit 0. The scan order is
/// part of the wire contract; reversing it mirrors the image within every
/// 8-pixel block.
fn pack_group(samples: &[u8; 8], bit: u32) -> u8 {
    let mut packed = 0u8;
    for sample in samples.iter().rev() {
        packed <<= 1;
        packed |= (sample >> bit) & 1;
    }
    packed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display_constants::PLANE_COUNT;
    use image::Luma;

    #[test]
    fn pack_group_puts_the_leftmost_column_in_bit_zero() {
        let mut samples = [0u8; 8];
        samples[0] = 0xFF;
        assert_eq!(pack_group(&samples, 4), 0b0000_0001);
        assert_eq!(pack_group(&samples, 7), 0b0000_0001);

        let mut samples = [0u8; 8];
        samples[7] = 0xFF;
        assert_eq!(pack_group(&samples, 4), 0b1000_0000);
    }

    #[test]
    fn pack_group_reads_only_the_requested_bit() {
        let samples = [0x10u8; 8]; // bit 4 set, bits 5..7 clear
        assert_eq!(pack_group(&samples, 4), 0xFF);
        assert_eq!(pack_group(&samples, 5), 0x00);
        assert_eq!(pack_group(&samples, 6), 0x00);
        assert_eq!(pack_group(&samples, 7), 0x00);
    }

    #[test]
    fn new_buffer_is_sync_header_plus_zero_planes() {
        let frame = FrameBuffer::new();
        assert_eq!(frame.as_bytes().len(), FRAME_BYTES);
        assert_eq!(frame.as_bytes().len(), 2052);
        assert_eq!(&frame.as_bytes()[..4], &[0x81, 0xC3, 0xE7, 0x00]);
        assert!(frame.as_bytes()[4..].iter().all(|&b| b == 0));
    }

    #[test]
    fn all_zero_image_encodes_to_zero_planes() {
        let mut frame = FrameBuffer::new();
        frame.encode(&GrayImage::new(DMD_PIXEL_WIDTH, DMD_PIXEL_HEIGHT)).unwrap();
        for plane in 0..PLANE_COUNT {
            assert!(frame.plane(plane).iter().all(|&b| b == 0x00));
        }
    }

    #[test]
    fn all_max_image_encodes_to_full_planes() {
        let mut frame = FrameBuffer::new();
        let white = GrayImage::from_pixel(DMD_PIXEL_WIDTH, DMD_PIXEL_HEIGHT, Luma([0xFF]));
        frame.encode(&white).unwrap();
        assert_eq!(&frame.as_bytes()[..4], &FRAME_SYNC);
        for plane in 0..PLANE_COUNT {
            assert!(frame.plane(plane).iter().all(|&b| b == 0xFF));
        }
    }

    #[test]
    fn single_pixel_lands_in_the_predicted_byte_and_bit() {
        // column 10 = group 1, third column of the group -> bit 2
        let mut bmp = GrayImage::new(DMD_PIXEL_WIDTH, DMD_PIXEL_HEIGHT);
        bmp.put_pixel(10, 0, Luma([0xFF]));
        let mut frame = FrameBuffer::new();
        frame.encode(&bmp).unwrap();
        for plane in 0..PLANE_COUNT {
            let plane = frame.plane(plane);
            assert_eq!(plane[1], 0b0000_0100);
            assert_eq!(plane.iter().filter(|&&b| b != 0).count(), 1);
        }

        // column 127, row 3 -> last group of the row, bit 7
        let mut bmp = GrayImage::new(DMD_PIXEL_WIDTH, DMD_PIXEL_HEIGHT);
        bmp.put_pixel(127, 3, Luma([0xFF]));
        frame.encode(&bmp).unwrap();
        let index = 3 * GROUPS_PER_ROW + 15;
        for plane in 0..PLANE_COUNT {
            let plane = frame.plane(plane);
            assert_eq!(plane[index], 0b1000_0000);
            assert_eq!(plane.iter().filter(|&&b| b != 0).count(), 1);
        }
    }

    #[test]
    fn luminosity_bits_map_to_their_planes() {
        let mut frame = FrameBuffer::new();
        // bit 4 only: plane 0 lights up, the rest stay dark
        let dim = GrayImage::from_pixel(DMD_PIXEL_WIDTH, DMD_PIXEL_HEIGHT, Luma([0x10]));
        frame.encode(&dim).unwrap();
        assert!(frame.plane(0).iter().all(|&b| b == 0xFF));
        for plane in 1..PLANE_COUNT {
            assert!(frame.plane(plane).iter().all(|&b| b == 0x00));
        }

        // bit 7 only: the most significant plane
        let bright = GrayImage::from_pixel(DMD_PIXEL_WIDTH, DMD_PIXEL_HEIGHT, Luma([0x80]));
        frame.encode(&bright).unwrap();
        assert!(frame.plane(3).iter().all(|&b| b == 0xFF));
        for plane in 0..3 {
            assert!(frame.plane(plane).iter().all(|&b| b == 0x00));
        }

        // the low nibble is below the device's depth and is discarded
        let faint = GrayImage::from_pixel(DMD_PIXEL_WIDTH, DMD_PIXEL_HEIGHT, Luma([0x0F]));
        frame.encode(&faint).unwrap();
        assert!(frame.as_bytes()[4..].iter().all(|&b| b == 0x00));
    }

    #[test]
    fn wrong_dimensions_fail_before_touching_the_buffer() {
        let mut frame = FrameBuffer::new();
        let white = GrayImage::from_pixel(DMD_PIXEL_WIDTH, DMD_PIXEL_HEIGHT, Luma([0xFF]));
        frame.encode(&white).unwrap();

        let half = GrayImage::new(64, 32);
        match frame.encode(&half) {
            Err(DmdError::DimensionMismatch {
                actual_width: 64,
                actual_height: 32,
                ..
            }) => {}
            other => panic!("expected DimensionMismatch, got {other:?}"),
        }
        // previous frame is still intact
        assert!(frame.as_bytes()[4..].iter().all(|&b| b == 0xFF));
    }
}
