use image::Rgb;

/// Minimum luminance difference between a background and a foreground.
pub const MIN_CONTRAST: f32 = 0.5;
/// Relaxed threshold used when checking the secondary background.
pub const MIN_SECONDARY_CONTRAST: f32 = MIN_CONTRAST / 1.3;

/// BT.601 luma and color difference components of a normalized color.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct Yuv {
    pub y: f32,
    pub u: f32,
    pub v: f32,
}

impl Yuv {
    pub fn from_rgb(rgb: Rgb<f32>) -> Self {
        let [r, g, b] = rgb.0;
        let y = 0.299 * r + 0.587 * g + 0.114 * b;
        Self {
            y,
            u: 0.492 * (b - y),
            v: 0.877 * (r - y),
        }
    }

    /// Euclidean distance in YUV space.
    pub fn distance(&self, other: &Yuv) -> f32 {
        let dy = self.y - other.y;
        let du = self.u - other.u;
        let dv = self.v - other.v;
        (dy * dy + du * du + dv * dv).sqrt()
    }

    /// Chroma magnitude.
    pub fn saturation(&self) -> f32 {
        (self.u * self.u + self.v * self.v).sqrt()
    }

    pub fn contrast(&self, other: &Yuv) -> f32 {
        (self.y - other.y).abs()
    }

    #[inline]
    pub fn is_light(&self) -> bool {
        self.y > 0.5
    }
}

/// Truncates a normalized color to 8 bits per channel and packs it as an opaque
/// `0xAARRGGBB` pixel.
pub fn to_argb(rgb: Rgb<f32>) -> u32 {
    let [r, g, b] = rgb.0.map(|c| (c * 255.0) as u8 as u32);
    0xFF00_0000 | (r << 16) | (g << 8) | b
}
