/// Weights of one key color scoring pass.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct Params {
    pub count_weight: f32,
    pub edge_weight: f32,
    pub bg1_distance_weight: f32,
    pub fg1_distance_weight: f32,
    pub saturation_weight: f32,
    pub contrast_weight: f32,
}

impl Params {
    pub const fn new(
        count_weight: f32,
        edge_weight: f32,
        bg1_distance_weight: f32,
        fg1_distance_weight: f32,
        saturation_weight: f32,
        contrast_weight: f32,
    ) -> Self {
        Self {
            count_weight,
            edge_weight,
            bg1_distance_weight,
            fg1_distance_weight,
            saturation_weight,
            contrast_weight,
        }
    }
}

/// Weights for all four passes, in the order they run.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct KeyColorParams {
    pub bg1: Params,
    pub fg1: Params,
    pub bg2: Params,
    pub fg2: Params,
}

impl KeyColorParams {
    /// Tuned for opaque photographic images.
    pub const IMAGE: KeyColorParams = KeyColorParams {
        bg1: Params::new(0.300, 1.000, -1.000, 0.000, 0.000, 0.000),
        fg1: Params::new(0.234, -0.500, 0.568, 0.000, 0.260, 0.450),
        bg2: Params::new(1.000, 0.619, -0.830, 0.500, 0.000, 0.000),
        fg2: Params::new(0.700, -0.100, 0.410, 0.396, 0.134, 0.112),
    };

    /// Tuned for icons and other semi-transparent art.
    pub const ICON: KeyColorParams = KeyColorParams {
        bg1: Params::new(1.0, 0.0, 0.0, 0.0, 0.0, 0.0),
        fg1: Params::new(2.0, 0.0, 5.0, 0.0, 10.0, 1.0),
        bg2: Params::new(2.0, 0.0, 100.0, 10.0, 5.0, 1.0),
        fg2: Params::new(2.0, 0.0, 50.0, 200.0, 10.0, 0.5),
    };
}

impl From<[Params; 4]> for KeyColorParams {
    fn from([bg1, fg1, bg2, fg2]: [Params; 4]) -> Self {
        Self { bg1, fg1, bg2, fg2 }
    }
}
