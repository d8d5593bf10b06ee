use std::fmt;

use crate::quantize::{BucketIndex, AVG_INDEX};
use crate::select::KeyColors;
use crate::stats::ColorTable;

pub const ROLE_COUNT: usize = 13;

/// Semantic color slots filled by key color selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorRole {
    Background1,
    Foreground1,
    Background2,
    Foreground2,
    Average,
    Light1,
    Light2,
    Light3,
    Light4,
    Dark1,
    Dark2,
    Dark3,
    Dark4,
}

impl ColorRole {
    pub const ALL: [ColorRole; ROLE_COUNT] = [
        ColorRole::Background1,
        ColorRole::Foreground1,
        ColorRole::Background2,
        ColorRole::Foreground2,
        ColorRole::Average,
        ColorRole::Light1,
        ColorRole::Light2,
        ColorRole::Light3,
        ColorRole::Light4,
        ColorRole::Dark1,
        ColorRole::Dark2,
        ColorRole::Dark3,
        ColorRole::Dark4,
    ];

    pub const LIGHT: [ColorRole; 4] = [
        ColorRole::Light1,
        ColorRole::Light2,
        ColorRole::Light3,
        ColorRole::Light4,
    ];

    pub const DARK: [ColorRole; 4] = [
        ColorRole::Dark1,
        ColorRole::Dark2,
        ColorRole::Dark3,
        ColorRole::Dark4,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ColorRole::Background1 => "background1",
            ColorRole::Foreground1 => "foreground1",
            ColorRole::Background2 => "background2",
            ColorRole::Foreground2 => "foreground2",
            ColorRole::Average => "average",
            ColorRole::Light1 => "light1",
            ColorRole::Light2 => "light2",
            ColorRole::Light3 => "light3",
            ColorRole::Light4 => "light4",
            ColorRole::Dark1 => "dark1",
            ColorRole::Dark2 => "dark2",
            ColorRole::Dark3 => "dark3",
            ColorRole::Dark4 => "dark4",
        }
    }
}

impl fmt::Display for ColorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps every role to a bucket. Unset roles resolve to the average bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoleTable {
    slots: [Option<BucketIndex>; ROLE_COUNT],
}

impl Default for RoleTable {
    fn default() -> Self {
        let mut slots = [None; ROLE_COUNT];
        slots[ColorRole::Average as usize] = Some(AVG_INDEX);
        Self { slots }
    }
}

impl RoleTable {
    #[inline]
    pub fn get(&self, role: ColorRole) -> BucketIndex {
        self.slots[role as usize].unwrap_or(AVG_INDEX)
    }

    #[inline]
    fn set(&mut self, role: ColorRole, index: BucketIndex) {
        self.slots[role as usize] = Some(index);
    }

    /// Stores the key colors and fills the light ramp brightest first and the dark
    /// ramp darkest first.
    pub fn assign(&mut self, colors: KeyColors, table: &ColorTable) {
        let mut ramp = [colors.bg1, colors.bg2, colors.fg1, colors.fg2];
        // Bubble sort keeps equal luminances in pick order.
        for j in 0..ramp.len() {
            for i in 0..ramp.len() - 1 - j {
                if table[ramp[i]].yuv.y < table[ramp[i + 1]].yuv.y {
                    ramp.swap(i, i + 1);
                }
            }
        }

        for (role, index) in ColorRole::LIGHT.into_iter().zip(ramp) {
            self.set(role, index);
        }
        for (role, index) in ColorRole::DARK.into_iter().zip(ramp.into_iter().rev()) {
            self.set(role, index);
        }

        self.set(ColorRole::Background1, colors.bg1);
        self.set(ColorRole::Foreground1, colors.fg1);
        self.set(ColorRole::Background2, colors.bg2);
        self.set(ColorRole::Foreground2, colors.fg2);
    }
}
