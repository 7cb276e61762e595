//! Tessera - graph-based image segmentation.
//!
//! An RGB image is treated as a 4-connected grid graph whose edge weights are
//! scaled colour distances. Regions are grown over a minimum spanning forest
//! of that graph:
//! - Edges at or below `min_weight` are merged unconditionally (seeding).
//! - Every seeded region receives a credit derived from its size.
//! - Remaining edges are visited once in ascending weight order; two regions
//!   merge when both can pay the edge weight from their credit.
//!
//! Two pipelines compute the same partition for the same parameters:
//! - Sequential: one pass over the whole image.
//! - Tiled: the pixel index space is split into contiguous tiles processed in
//!   parallel with rayon. Work that crosses tile boundaries is deferred and
//!   resolved afterwards on a single thread.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tessera::{Config, segment};
//!
//! let config = Config { min_weight: 8, min_region_size: 50, ..Config::default() };
//! let result = segment(&rgb, width, height, &config)?;
//!
//! println!("{} segments", result.segment_count());
//! ```

mod config;
mod edges;
mod error;
mod forest;
mod growth;
mod labels;
mod tiled;
pub mod visualize;

#[cfg(test)]
mod test_utils;

pub use config::{Config, CreditModel, Execution, UNBOUNDED_CREDIT};
pub use edges::{
    Edge, MAX_EDGE_WEIGHT, build_edges, build_edges_from, build_edges_into, edge_weight,
    sort_by_weight,
};
pub use error::SegmentError;
pub use forest::{DisjointSetForest, ForestTile};
pub use labels::{SegmentationResult, assign_labels};

/// Segment a row-major RGB image (3 bytes per pixel) with the pipeline chosen
/// by `config.execution`.
pub fn segment(
    rgb: &[u8],
    width: usize,
    height: usize,
    config: &Config,
) -> Result<SegmentationResult, SegmentError> {
    match config.execution {
        Execution::Sequential => segment_sequential(rgb, width, height, config),
        Execution::Tiled { tiles } => {
            config.validate(width, height, rgb.len())?;
            let tiles = tiles.unwrap_or_else(|| tiled::default_tile_count(width * height));
            segment_tiled(rgb, width, height, config, tiles)
        }
    }
}

/// Segment on the calling thread. `config.execution` is ignored.
pub fn segment_sequential(
    rgb: &[u8],
    width: usize,
    height: usize,
    config: &Config,
) -> Result<SegmentationResult, SegmentError> {
    config.validate(width, height, rgb.len())?;

    let mut forest = growth::segment_forest(rgb, width, height, config);
    let result = assign_labels(&mut forest, width, height);

    tracing::info!(
        width,
        height,
        segments = result.segment_count(),
        "Sequential segmentation finished"
    );
    Ok(result)
}

/// Segment with `tiles` parallel workers. `config.execution` is ignored.
///
/// More tiles than pixels is allowed; the count is clamped.
pub fn segment_tiled(
    rgb: &[u8],
    width: usize,
    height: usize,
    config: &Config,
    tiles: usize,
) -> Result<SegmentationResult, SegmentError> {
    config.validate(width, height, rgb.len())?;
    if tiles == 0 {
        return Err(SegmentError::InvalidTileCount);
    }

    let mut forest = tiled::segment_forest(rgb, width, height, config, tiles);
    let result = assign_labels(&mut forest, width, height);

    tracing::info!(
        width,
        height,
        tiles,
        segments = result.segment_count(),
        "Tiled segmentation finished"
    );
    Ok(result)
}
