use image::Rgb;
use tracing::trace;

use crate::color::{MIN_CONTRAST, MIN_SECONDARY_CONTRAST};
use crate::quantize::{
    BucketIndex, BLACK_INDEX, FG1_BACKUP_INDEX, FG2_BACKUP_INDEX, LAST_COLOR,
};
use crate::select::KeyColors;
use crate::stats::ColorTable;

/// Adjusts the selected foregrounds until they stand out from the primary
/// background, then drops the secondary background if it clashes with them.
pub fn enforce_contrast(table: &mut ColorTable, colors: KeyColors) -> KeyColors {
    // Empty buckets at both ends of the range become usable black and white targets.
    for (index, value) in [(BLACK_INDEX, 0.0), (LAST_COLOR, 1.0)] {
        let stat = &mut table[index];
        if stat.count == 0 {
            stat.rgb = Rgb::from([value; 3]);
            stat.update_yuv();
        }
    }

    let fg1 = repair(table, colors.fg1, colors.bg1, FG1_BACKUP_INDEX);
    let fg2 = repair(table, colors.fg2, colors.bg1, FG2_BACKUP_INDEX);

    let bg2_yuv = table[colors.bg2].yuv;
    let bg2 = if table[fg1].yuv.contrast(&bg2_yuv) < MIN_SECONDARY_CONTRAST
        || table[fg2].yuv.contrast(&bg2_yuv) < MIN_SECONDARY_CONTRAST
    {
        trace!(bg2 = colors.bg2, "secondary background lacks contrast");
        colors.bg1
    } else {
        colors.bg2
    };

    KeyColors {
        bg1: colors.bg1,
        fg1,
        bg2,
        fg2,
    }
}

/// Returns `fg` when it already contrasts with `bg`, otherwise a brightness adjusted
/// copy stored in `backup`, falling back to black or white.
fn repair(
    table: &mut ColorTable,
    fg: BucketIndex,
    bg: BucketIndex,
    backup: BucketIndex,
) -> BucketIndex {
    let bg_yuv = table[bg].yuv;
    let contrast = table[fg].yuv.contrast(&bg_yuv);
    if contrast >= MIN_CONTRAST {
        return fg;
    }

    let factor = contrast / MIN_CONTRAST;
    let mut stat = table[fg];
    stat.rgb = if bg_yuv.is_light() {
        Rgb::from(stat.rgb.0.map(|c| c * factor))
    } else {
        Rgb::from(stat.rgb.0.map(|c| (c / factor).min(1.0)))
    };
    stat.update_yuv();
    table[backup] = stat;

    let adjusted = stat.yuv.contrast(&bg_yuv);
    trace!(fg, backup, contrast, adjusted, "repaired foreground contrast");
    if adjusted >= MIN_CONTRAST {
        backup
    } else if bg_yuv.is_light() {
        BLACK_INDEX
    } else {
        LAST_COLOR
    }
}
