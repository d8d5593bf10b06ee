use image::Rgba;

/// Index into the color table. Values up to [`LAST_COLOR`] are quantized colors,
/// everything above is a reserved slot.
pub type BucketIndex = u16;

const RGB_COMPONENT_SIZE: usize = 32;
const RGB_MASK: u8 = 0b11111000;

pub const MAX_HIST_COLORS: usize = RGB_COMPONENT_SIZE * RGB_COMPONENT_SIZE * RGB_COMPONENT_SIZE;

/// Pure black bucket.
pub const BLACK_INDEX: BucketIndex = 0;
/// Pure white bucket, the highest quantized index.
pub const LAST_COLOR: BucketIndex = (MAX_HIST_COLORS - 1) as BucketIndex;
/// Running average of every accepted pixel.
pub const AVG_INDEX: BucketIndex = LAST_COLOR + 1;
/// Adjusted copy of the primary foreground made by contrast enforcement.
pub const FG1_BACKUP_INDEX: BucketIndex = LAST_COLOR + 2;
/// Adjusted copy of the secondary foreground made by contrast enforcement.
pub const FG2_BACKUP_INDEX: BucketIndex = LAST_COLOR + 3;

/// Total number of slots in the color table.
pub const MAX_COLOR_STATS: usize = MAX_HIST_COLORS + 3;

/// Alpha below this is treated as transparent by the alpha gate.
pub const ALPHA_THRESHOLD: u32 = 0xC000_0000;

#[inline]
pub fn red(pixel: u32) -> u8 {
    (pixel >> 16) as u8
}

#[inline]
pub fn green(pixel: u32) -> u8 {
    (pixel >> 8) as u8
}

#[inline]
pub fn blue(pixel: u32) -> u8 {
    pixel as u8
}

#[inline]
pub fn is_opaque(pixel: u32) -> bool {
    (pixel & 0xFF00_0000) >= ALPHA_THRESHOLD
}

/// Maps a packed `0xAARRGGBB` pixel to its bucket by keeping the top 5 bits of each
/// color channel.
#[inline]
pub fn bucket_index(pixel: u32) -> BucketIndex {
    (((RGB_MASK & red(pixel)) as u16) << 7)
        + (((RGB_MASK & green(pixel)) as u16) << 2)
        + (((RGB_MASK & blue(pixel)) as u16) >> 3)
}

#[inline]
pub fn pack_argb(rgba: Rgba<u8>) -> u32 {
    let [r, g, b, a] = rgba.0;
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

#[inline]
pub fn unpack_argb(pixel: u32) -> Rgba<u8> {
    Rgba::from([red(pixel), green(pixel), blue(pixel), (pixel >> 24) as u8])
}
