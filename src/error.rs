use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChameleonError {
    #[error("failed to allocate color table with {slots} slots")]
    TableAllocation { slots: usize },

    #[error("pixel buffer length {len} does not match dimensions {width}x{height}")]
    DimensionMismatch {
        len: usize,
        width: usize,
        height: usize,
    },

    #[error("image width cannot be zero")]
    ZeroDimension,
}
