/// the panel is 128x32, 16 luminosity levels spread over four bit planes
pub const DMD_PIXEL_WIDTH: u32 = 128;
pub const DMD_PIXEL_HEIGHT: u32 = 32;

/// 8 horizontally adjacent pixels pack into one byte of every plane
pub const PIXELS_PER_BYTE: u32 = 8;
pub const GROUPS_PER_ROW: usize = (DMD_PIXEL_WIDTH / PIXELS_PER_BYTE) as usize;

pub const PLANE_COUNT: usize = 4;
pub const PLANE_BYTES: usize = (DMD_PIXEL_WIDTH * DMD_PIXEL_HEIGHT / PIXELS_PER_BYTE) as usize;

/// frame sync bytes, sent ahead of the four bit planes
pub const FRAME_SYNC: [u8; 4] = [0x81, 0xC3, 0xE7, 0x00];
pub const FRAME_BYTES: usize = FRAME_SYNC.len() + PLANE_COUNT * PLANE_BYTES;
