//! Key color extraction for theming UI around artwork and icons.
//!
//! Pixels are bucketed into a 15-bit color histogram, the most prominent background
//! and foreground buckets are picked with weighted scoring, foregrounds are adjusted
//! for legibility and the picks are arranged into light and dark ramps.

mod chameleon;
pub mod color;
mod contrast;
pub mod error;
pub mod params;
pub mod quantize;
pub mod ramp;
pub mod select;
pub mod stats;

pub use self::chameleon::{version, Chameleon, CHAMELEON_VERSION};
pub use self::error::ChameleonError;
pub use self::params::{KeyColorParams, Params};
pub use self::ramp::ColorRole;
