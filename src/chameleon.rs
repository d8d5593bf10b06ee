use image::RgbaImage;
use tracing::debug;

use crate::color::to_argb;
use crate::contrast::enforce_contrast;
use crate::error::ChameleonError;
use crate::params::KeyColorParams;
use crate::quantize::{pack_argb, AVG_INDEX};
use crate::ramp::{ColorRole, RoleTable};
use crate::select::KeyColors;
use crate::stats::ColorTable;

pub const CHAMELEON_VERSION: u32 = 0x0100_0000;

/// Version of the color selection algorithm.
pub fn version() -> u32 {
    CHAMELEON_VERSION
}

/// Color statistics of a single image and the key colors picked from them.
///
/// Feed the image with [`Chameleon::process_line`] or one of the whole image
/// helpers, call [`Chameleon::find_key_colors`], then query colors by role. Use a new
/// instance for every image.
#[derive(Debug, Clone)]
pub struct Chameleon {
    table: ColorTable,
    roles: RoleTable,
}

impl Chameleon {
    pub fn new() -> Result<Self, ChameleonError> {
        Ok(Self {
            table: ColorTable::new()?,
            roles: RoleTable::default(),
        })
    }

    /// Adds a row of `0xAARRGGBB` pixels. `edge_line` must be set for the first and
    /// last row of the image. With `alpha` set, pixels under 75% opacity are skipped.
    pub fn process_line(&mut self, line: &[u32], edge_line: bool, alpha: bool) {
        self.table.add_line(line, edge_line, alpha);
    }

    /// Adds a whole row-major image of `0xAARRGGBB` pixels.
    pub fn process_image(
        &mut self,
        pixels: &[u32],
        width: usize,
        height: usize,
        alpha: bool,
    ) -> Result<(), ChameleonError> {
        if width == 0 {
            return Err(ChameleonError::ZeroDimension);
        }
        if width.checked_mul(height) != Some(pixels.len()) {
            return Err(ChameleonError::DimensionMismatch {
                len: pixels.len(),
                width,
                height,
            });
        }
        for (i, line) in pixels.chunks_exact(width).enumerate() {
            self.table.add_line(line, i == 0 || i == height - 1, alpha);
        }
        Ok(())
    }

    /// Adds a decoded image.
    pub fn process_rgba_image(
        &mut self,
        img: &RgbaImage,
        alpha: bool,
    ) -> Result<(), ChameleonError> {
        if img.width() == 0 {
            return Err(ChameleonError::ZeroDimension);
        }
        let height = img.height() as usize;
        let mut line = Vec::with_capacity(img.width() as usize);
        for (i, row) in img.rows().enumerate() {
            line.clear();
            line.extend(row.map(|p| pack_argb(*p)));
            self.table.add_line(&line, i == 0 || i == height - 1, alpha);
        }
        Ok(())
    }

    /// Picks the key colors and fills every role. With `force_contrast` the
    /// foregrounds are adjusted until they are legible on the primary background.
    pub fn find_key_colors(&mut self, params: &KeyColorParams, force_contrast: bool) {
        self.table.finalize();
        let mut colors = KeyColors::find(&self.table, params);
        // An image without accepted pixels keeps every role on the average.
        if force_contrast && self.table[AVG_INDEX].count > 0 {
            colors = enforce_contrast(&mut self.table, colors);
            debug!(?colors, "enforced contrast");
        }
        self.roles.assign(colors, &self.table);
    }

    /// Opaque `0xAARRGGBB` color of `role`, channels truncated to 8 bits.
    pub fn color(&self, role: ColorRole) -> u32 {
        to_argb(self.table[self.roles.get(role)].rgb)
    }

    /// Luminance of `role` in `[0, 1]`.
    pub fn luminance(&self, role: ColorRole) -> f32 {
        self.table[self.roles.get(role)].yuv.y
    }

    /// Every role with its color, in [`ColorRole::ALL`] order.
    pub fn palette(&self) -> impl Iterator<Item = (ColorRole, u32)> + '_ {
        ColorRole::ALL
            .into_iter()
            .map(move |role| (role, self.color(role)))
    }

    #[inline]
    pub fn roles(&self) -> &RoleTable {
        &self.roles
    }

    #[inline]
    pub fn stats(&self) -> &ColorTable {
        &self.table
    }
}
