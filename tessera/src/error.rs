use thiserror::Error;

/// Input rejected before any segmentation work starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentError {
    #[error("Invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Invalid weight range: min {min_weight}, max {max_weight} (limit {limit})")]
    InvalidWeightRange {
        min_weight: u32,
        max_weight: u32,
        limit: u32,
    },

    #[error("Minimum region size must be at least 1, got {0}")]
    InvalidRegionSize(u32),

    #[error("RGB buffer too short: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("Tile count must be at least 1")]
    InvalidTileCount,
}
