use std::iter;
use std::ops::{Index, IndexMut};

use image::Rgb;
use tracing::debug;

use crate::color::Yuv;
use crate::error::ChameleonError;
use crate::quantize::{
    blue, bucket_index, green, is_opaque, red, BucketIndex, AVG_INDEX, LAST_COLOR,
    MAX_COLOR_STATS,
};

/// Accumulated statistics of one color bucket.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStat {
    /// Sum of every normalized pixel color added to the bucket.
    pub sum: [f32; 3],
    pub count: u64,
    /// Times a pixel of this bucket was found on the image border.
    pub edge_count: u64,

    // Valid only after `ColorTable::finalize`.
    pub rgb: Rgb<f32>,
    pub yuv: Yuv,
    /// `count` relative to the image pixel total.
    pub frequency: f32,
    /// `edge_count` relative to the image edge total.
    pub edge_weight: f32,
}

impl Default for ColorStat {
    fn default() -> Self {
        Self {
            sum: [0.0; 3],
            count: 0,
            edge_count: 0,
            rgb: Rgb::from([0.0; 3]),
            yuv: Yuv::default(),
            frequency: 0.0,
            edge_weight: 0.0,
        }
    }
}

impl ColorStat {
    #[inline]
    fn merge_color(&mut self, color: [f32; 3]) {
        self.count += 1;
        iter::zip(&mut self.sum, color).for_each(|(a, b)| *a += b)
    }

    fn finalize(&mut self, pixel_count: u64, edge_count: u64) {
        self.rgb = if self.count > 0 {
            let count = self.count as f32;
            Rgb::from(self.sum.map(|c| c / count))
        } else {
            Rgb::from([0.0; 3])
        };
        self.frequency = self.count as f32 / pixel_count as f32;
        self.edge_weight = self.edge_count as f32 / edge_count as f32;
        self.update_yuv();
    }

    /// Recomputes the derived components after `rgb` was changed in place.
    #[inline]
    pub fn update_yuv(&mut self) {
        self.yuv = Yuv::from_rgb(self.rgb);
    }
}

#[inline]
fn normalized(pixel: u32) -> [f32; 3] {
    [red(pixel), green(pixel), blue(pixel)].map(|c| c as f32 / 255.0)
}

/// Bucket table of one image plus its image-wide totals.
#[derive(Debug, Clone)]
pub struct ColorTable {
    stats: Vec<ColorStat>,
    pixel_count: u64,
    edge_count: u64,
    finalized: bool,
}

impl ColorTable {
    pub fn new() -> Result<Self, ChameleonError> {
        let mut stats = Vec::new();
        stats
            .try_reserve_exact(MAX_COLOR_STATS)
            .map_err(|_| ChameleonError::TableAllocation {
                slots: MAX_COLOR_STATS,
            })?;
        stats.resize(MAX_COLOR_STATS, ColorStat::default());
        // Both totals start at one so the ratios never divide by zero.
        Ok(Self {
            stats,
            pixel_count: 1,
            edge_count: 1,
            finalized: false,
        })
    }

    #[inline]
    pub fn pixel_count(&self) -> u64 {
        self.pixel_count
    }

    #[inline]
    pub fn edge_count(&self) -> u64 {
        self.edge_count
    }

    #[inline]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Adds one row of `0xAARRGGBB` pixels. `edge_line` marks the first and last
    /// row of the image, `alpha` skips pixels that are mostly transparent.
    ///
    /// On interior rows the two border pixels are checked against the alpha
    /// threshold only when `alpha` is set; with the gate off both always count.
    /// Any row, even an empty one, clears the finalized state.
    pub fn add_line(&mut self, line: &[u32], edge_line: bool, alpha: bool) {
        let width = line.len() as u64;
        for &pixel in line {
            if alpha && !is_opaque(pixel) {
                continue;
            }
            let color = normalized(pixel);
            let stat = &mut self.stats[bucket_index(pixel) as usize];
            stat.merge_color(color);
            if edge_line {
                stat.edge_count += 1;
            }
            self.stats[AVG_INDEX as usize].merge_color(color);
        }

        if edge_line {
            self.edge_count += width;
        } else {
            // Interior rows only touch the border with their outermost pixels.
            if let (Some(&first), Some(&last)) = (line.first(), line.last()) {
                for pixel in [first, last] {
                    if !alpha || is_opaque(pixel) {
                        self.stats[bucket_index(pixel) as usize].edge_count += 1;
                    }
                }
            }
            self.edge_count += 2;
        }

        self.pixel_count += width;
        self.finalized = false;
    }

    /// Turns accumulated sums into mean colors and their derived values. Does nothing
    /// when no pixels were added since the previous call.
    pub fn finalize(&mut self) {
        if self.finalized {
            return;
        }
        let (pixel_count, edge_count) = (self.pixel_count, self.edge_count);
        let mut populated = 0;
        for stat in self.stats[..=LAST_COLOR as usize]
            .iter_mut()
            .filter(|stat| stat.count > 0)
        {
            stat.finalize(pixel_count, edge_count);
            populated += 1;
        }
        self.stats[AVG_INDEX as usize].finalize(pixel_count, edge_count);
        self.finalized = true;
        debug!(populated, pixel_count, edge_count, "finalized color table");
    }

    /// Quantized buckets with at least one accepted pixel, in ascending index order.
    pub fn populated(&self) -> impl Iterator<Item = (BucketIndex, &ColorStat)> {
        self.stats[..=LAST_COLOR as usize]
            .iter()
            .enumerate()
            .filter(|(_, stat)| stat.count > 0)
            .map(|(i, stat)| (i as BucketIndex, stat))
    }

    /// Quantized buckets that touched the image border, in ascending index order.
    pub fn on_edge(&self) -> impl Iterator<Item = (BucketIndex, &ColorStat)> {
        self.stats[..=LAST_COLOR as usize]
            .iter()
            .enumerate()
            .filter(|(_, stat)| stat.edge_count > 0)
            .map(|(i, stat)| (i as BucketIndex, stat))
    }
}

impl Index<BucketIndex> for ColorTable {
    type Output = ColorStat;

    #[inline]
    fn index(&self, index: BucketIndex) -> &ColorStat {
        &self.stats[index as usize]
    }
}

impl IndexMut<BucketIndex> for ColorTable {
    #[inline]
    fn index_mut(&mut self, index: BucketIndex) -> &mut ColorStat {
        &mut self.stats[index as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantize::{BLACK_INDEX, FG1_BACKUP_INDEX};

    const RED: u32 = 0xFFFF_0000;
    const BLUE: u32 = 0xFF00_00FF;
    const CLEAR: u32 = 0x10FF_FFFF;

    #[test]
    fn new_table_is_empty() {
        let table = ColorTable::new().unwrap();
        assert_eq!(table.pixel_count(), 1);
        assert_eq!(table.edge_count(), 1);
        assert!(!table.is_finalized());
        assert_eq!(table.populated().count(), 0);
        assert_eq!(table[AVG_INDEX], ColorStat::default());
        assert_eq!(table[FG1_BACKUP_INDEX], ColorStat::default());
    }

    #[test]
    fn edge_line_counts_every_pixel() {
        let mut table = ColorTable::new().unwrap();
        table.add_line(&[RED, RED, BLUE], true, false);
        assert_eq!(table[bucket_index(RED)].count, 2);
        assert_eq!(table[bucket_index(RED)].edge_count, 2);
        assert_eq!(table[bucket_index(BLUE)].edge_count, 1);
        assert_eq!(table[AVG_INDEX].count, 3);
        assert_eq!(table.pixel_count(), 4);
        assert_eq!(table.edge_count(), 4);
    }

    #[test]
    fn interior_line_counts_outer_pixels() {
        let mut table = ColorTable::new().unwrap();
        table.add_line(&[RED, BLUE, BLUE, BLUE], false, false);
        assert_eq!(table[bucket_index(RED)].edge_count, 1);
        assert_eq!(table[bucket_index(BLUE)].edge_count, 1);
        assert_eq!(table[bucket_index(BLUE)].count, 3);
        assert_eq!(table.pixel_count(), 5);
        assert_eq!(table.edge_count(), 3);
    }

    #[test]
    fn single_pixel_interior_line_counts_twice() {
        let mut table = ColorTable::new().unwrap();
        table.add_line(&[RED], false, false);
        assert_eq!(table[bucket_index(RED)].edge_count, 2);
        assert_eq!(table[bucket_index(RED)].count, 1);
    }

    #[test]
    fn alpha_gate_skips_pixels_but_not_totals() {
        let mut table = ColorTable::new().unwrap();
        table.add_line(&[CLEAR, RED, CLEAR], true, true);
        assert_eq!(table[bucket_index(CLEAR)].count, 0);
        assert_eq!(table[bucket_index(CLEAR)].edge_count, 0);
        assert_eq!(table[AVG_INDEX].count, 1);
        assert_eq!(table.pixel_count(), 4);
        assert_eq!(table.edge_count(), 4);

        table.add_line(&[CLEAR, RED, CLEAR], false, true);
        assert_eq!(table[bucket_index(CLEAR)].edge_count, 0);
        assert_eq!(table[bucket_index(RED)].edge_count, 1);
        assert_eq!(table.pixel_count(), 7);
        assert_eq!(table.edge_count(), 6);
    }

    #[test]
    fn disabled_gate_accepts_transparent_pixels() {
        let mut table = ColorTable::new().unwrap();
        table.add_line(&[CLEAR, RED, CLEAR], false, false);
        assert_eq!(table[bucket_index(CLEAR)].count, 2);
        assert_eq!(table[bucket_index(CLEAR)].edge_count, 2);
    }

    #[test]
    fn empty_line_only_moves_edge_total() {
        let mut table = ColorTable::new().unwrap();
        table.add_line(&[], false, false);
        assert_eq!(table.pixel_count(), 1);
        assert_eq!(table.edge_count(), 3);
        assert_eq!(table.populated().count(), 0);
    }

    #[test]
    fn finalize_computes_means() {
        let mut table = ColorTable::new().unwrap();
        table.add_line(&[0xFF08_0000, 0xFF0A_0000], true, false);
        table.finalize();
        let stat = table[bucket_index(0xFF08_0000)];
        assert!((stat.rgb[0] - 9.0 / 255.0).abs() < 1e-6);
        assert_eq!(stat.rgb[1], 0.0);
        assert!((stat.frequency - 2.0 / 3.0).abs() < 1e-6);
        assert!((stat.edge_weight - 2.0 / 3.0).abs() < 1e-6);
        assert!(stat.yuv.y > 0.0);
    }

    #[test]
    fn finalize_is_idempotent() {
        let mut table = ColorTable::new().unwrap();
        table.add_line(&[RED, BLUE], true, false);
        table.finalize();
        assert!(table.is_finalized());
        table[bucket_index(RED)].rgb = Rgb::from([0.5; 3]);
        table.finalize();
        assert_eq!(table[bucket_index(RED)].rgb, Rgb::from([0.5; 3]));

        table.add_line(&[RED], true, false);
        assert!(!table.is_finalized());
        table.finalize();
        assert_eq!(table[bucket_index(RED)].rgb, Rgb::from([1.0, 0.0, 0.0]));
    }

    #[test]
    fn empty_average_is_black() {
        let mut table = ColorTable::new().unwrap();
        table.finalize();
        assert_eq!(table[AVG_INDEX].rgb, Rgb::from([0.0; 3]));
        assert_eq!(table[AVG_INDEX].yuv.y, 0.0);
        assert_eq!(table[BLACK_INDEX].count, 0);
    }

    #[test]
    fn edge_iteration_is_ordered() {
        let mut table = ColorTable::new().unwrap();
        table.add_line(&[RED, 0xFF80_8080, BLUE], false, false);
        let edges: Vec<_> = table.on_edge().map(|(i, _)| i).collect();
        assert_eq!(edges, vec![bucket_index(BLUE), bucket_index(RED)]);
        assert_eq!(table.populated().count(), 3);
    }
}
