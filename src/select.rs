use tracing::debug;

use crate::color::Yuv;
use crate::params::{KeyColorParams, Params};
use crate::quantize::{BucketIndex, AVG_INDEX};
use crate::stats::{ColorStat, ColorTable};

/// Buckets picked as the primary and secondary background and foreground.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyColors {
    pub bg1: BucketIndex,
    pub fg1: BucketIndex,
    pub bg2: BucketIndex,
    pub fg2: BucketIndex,
}

/// One scoring pass: weights plus the colors the distance and contrast terms are
/// measured against.
struct Pass<'a> {
    params: &'a Params,
    bg1: Yuv,
    fg1: Option<Yuv>,
    contrast: Option<Yuv>,
}

impl Pass<'_> {
    fn score(&self, stat: &ColorStat) -> f32 {
        let params = self.params;
        let mut score = stat.frequency * params.count_weight;
        score += stat.edge_weight * params.edge_weight;
        score += stat.yuv.distance(&self.bg1) * params.bg1_distance_weight;
        if let Some(fg1) = &self.fg1 {
            score += stat.yuv.distance(fg1) * params.fg1_distance_weight;
        }
        score += stat.yuv.saturation() * params.saturation_weight;
        if let Some(reference) = &self.contrast {
            score += stat.yuv.contrast(reference) * params.contrast_weight;
        }
        score
    }

    /// Highest scoring candidate above zero. Ties keep the lowest index.
    fn best<'t>(
        &self,
        candidates: impl Iterator<Item = (BucketIndex, &'t ColorStat)>,
        exclude: &[BucketIndex],
    ) -> Option<BucketIndex> {
        let mut best = None;
        let mut result = 0.0;
        for (i, stat) in candidates.filter(|(i, _)| !exclude.contains(i)) {
            let score = self.score(stat);
            if score > result {
                best = Some(i);
                result = score;
            }
        }
        best
    }
}

impl KeyColors {
    /// Runs the four scoring passes over a finalized table.
    pub fn find(table: &ColorTable, params: &KeyColorParams) -> Self {
        let avg = table[AVG_INDEX].yuv;

        let bg1 = Pass {
            params: &params.bg1,
            bg1: avg,
            fg1: None,
            contrast: None,
        }
        .best(table.populated(), &[])
        .unwrap_or(AVG_INDEX);
        let bg1_yuv = table[bg1].yuv;

        let fg1 = Pass {
            params: &params.fg1,
            bg1: bg1_yuv,
            fg1: None,
            contrast: Some(bg1_yuv),
        }
        .best(table.populated(), &[bg1])
        .unwrap_or(AVG_INDEX);
        let fg1_yuv = table[fg1].yuv;

        let bg2 = Pass {
            params: &params.bg2,
            bg1: bg1_yuv,
            fg1: Some(fg1_yuv),
            contrast: Some(fg1_yuv),
        }
        .best(table.on_edge(), &[bg1, fg1])
        .unwrap_or(bg1);

        let fg2 = Pass {
            params: &params.fg2,
            bg1: bg1_yuv,
            fg1: Some(fg1_yuv),
            contrast: Some(fg1_yuv),
        }
        .best(table.populated(), &[bg1, fg1, bg2])
        .unwrap_or(fg1);

        let key_colors = Self { bg1, fg1, bg2, fg2 };
        debug!(?key_colors, "selected key colors");
        key_colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantize::bucket_index;

    const WHITE: u32 = 0xFFFF_FFFF;
    const BLACK: u32 = 0xFF00_0000;
    const RED: u32 = 0xFFFF_0000;
    const BLUE: u32 = 0xFF00_00FF;

    fn count_only(count_weight: f32) -> Params {
        Params::new(count_weight, 0.0, 0.0, 0.0, 0.0, 0.0)
    }

    fn table_from_rows(rows: &[&[u32]]) -> ColorTable {
        let mut table = ColorTable::new().unwrap();
        for (i, row) in rows.iter().enumerate() {
            table.add_line(row, i == 0 || i == rows.len() - 1, false);
        }
        table.finalize();
        table
    }

    #[test]
    fn empty_table_defaults_to_average() {
        let table = table_from_rows(&[]);
        let colors = KeyColors::find(&table, &KeyColorParams::IMAGE);
        assert_eq!(
            colors,
            KeyColors {
                bg1: AVG_INDEX,
                fg1: AVG_INDEX,
                bg2: AVG_INDEX,
                fg2: AVG_INDEX,
            }
        );
    }

    #[test]
    fn single_color_fallbacks() {
        let table = table_from_rows(&[&[RED, RED], &[RED, RED]]);
        let params = KeyColorParams::from([count_only(1.0); 4]);
        let colors = KeyColors::find(&table, &params);
        assert_eq!(colors.bg1, bucket_index(RED));
        assert_eq!(colors.fg1, AVG_INDEX);
        assert_eq!(colors.bg2, colors.bg1);
        assert_eq!(colors.fg2, AVG_INDEX);
    }

    #[test]
    fn most_frequent_wins_with_count_weight() {
        let table = table_from_rows(&[&[BLUE, RED, RED, BLUE], &[BLUE, RED, WHITE, BLUE]]);
        let params = KeyColorParams::from([count_only(1.0); 4]);
        let colors = KeyColors::find(&table, &params);
        assert_eq!(colors.bg1, bucket_index(BLUE));
        assert_eq!(colors.fg1, bucket_index(RED));
        // Only border-touching buckets qualify as second background.
        assert_eq!(colors.bg2, bucket_index(WHITE));
        assert_eq!(colors.fg2, colors.fg1);
    }

    #[test]
    fn ties_keep_lowest_index() {
        let table = table_from_rows(&[&[WHITE, BLACK]]);
        let params = KeyColorParams::from([count_only(1.0); 4]);
        let colors = KeyColors::find(&table, &params);
        assert_eq!(colors.bg1, bucket_index(BLACK));
        assert_eq!(colors.fg1, bucket_index(WHITE));
    }

    #[test]
    fn negative_scores_never_win() {
        let table = table_from_rows(&[&[RED, BLUE]]);
        let params = KeyColorParams::from([count_only(-1.0); 4]);
        let colors = KeyColors::find(&table, &params);
        assert_eq!(colors.bg1, AVG_INDEX);
        assert_eq!(colors.fg1, AVG_INDEX);
    }

    #[test]
    fn contrast_weight_prefers_distant_luminance() {
        let gray = 0xFF60_6060;
        let table = table_from_rows(&[&[BLACK, BLACK, BLACK, gray, WHITE]]);
        let contrast_only = Params::new(0.0, 0.0, 0.0, 0.0, 0.0, 1.0);
        let params = KeyColorParams::from([
            count_only(1.0),
            contrast_only,
            count_only(1.0),
            contrast_only,
        ]);
        let colors = KeyColors::find(&table, &params);
        assert_eq!(colors.bg1, bucket_index(BLACK));
        assert_eq!(colors.fg1, bucket_index(WHITE));
        assert_eq!(colors.bg2, bucket_index(gray));
        // Nothing left after excluding the three picks.
        assert_eq!(colors.fg2, colors.fg1);
    }
}
