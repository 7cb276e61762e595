//! Tiled parallel region growth.
//!
//! The pixel index space is split into contiguous tiles, one per worker. Each
//! tile owns the forest entries of its range (see
//! [`DisjointSetForest::split_tiles`](crate::DisjointSetForest::split_tiles))
//! and runs the sequential phases on the edges whose `from` pixel it owns:
//!
//! 1. Seed edges inside the tile are merged; seed edges reaching into a later
//!    tile are queued.
//! 2. Every region containing an endpoint of a cross-tile edge is *marked*:
//!    its true extent and credit are unknown until the tiles are combined.
//! 3. Credits are computed for the tile's regions.
//! 4. Growth runs in ascending weight order. Edges leaving the tile, or
//!    touching a marked region, are queued instead of resolved, and both of
//!    their regions become marked. A region that has been skipped over once
//!    can no longer make decisions locally without breaking weight order.
//!
//! Returning from [`run_local_phase`] is the barrier: all tile views are gone
//! and only the [`LocalPhaseOutput`] queues remain. The [`Reconciler`] then
//! applies the queued seed edges, recomputes the credits of boundary regions
//! from their global size, and replays every queued growth edge in global
//! ascending order. Unmarked regions never interact with queued edges before
//! they are resolved, so the final partition equals the sequential one for the
//! same credit model.

mod reconcile;

use std::ops::Range;

use rayon::prelude::*;

use crate::config::Config;
use crate::edges::{Edge, build_edges_from, build_edges_into, sort_by_weight};
use crate::forest::DisjointSetForest;
use crate::growth::{
    GrowthStats, RegionTable, Regions, TileRegions, credit_gated_merge, initialize_credits,
    seed_split,
};

pub(crate) use reconcile::Reconciler;

/// Tiles smaller than this are not worth a separate worker.
const MIN_PIXELS_PER_TILE: usize = 16_384;

/// Tile count used when the caller does not pick one.
pub(crate) fn default_tile_count(pixel_count: usize) -> usize {
    common::parallel::auto_part_count(pixel_count, MIN_PIXELS_PER_TILE)
}

/// Edges a tile could not resolve with local information.
#[derive(Debug, Default)]
pub(crate) struct DeferredQueue {
    /// Seed edges whose `to` pixel belongs to a later tile.
    pub seed: Vec<Edge>,
    /// Growth edges leaving the tile or touching a marked region, in
    /// ascending weight order.
    pub growth: Vec<Edge>,
    /// Tile pixels that are an endpoint of a cross-tile edge, ascending.
    pub boundary: Vec<u32>,
}

/// Per-tile counters for logging.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TileStats {
    pub edges: usize,
    pub seed_merges: usize,
    pub growth: GrowthStats,
}

/// What the parallel phase leaves behind once every worker has finished.
#[derive(Debug)]
pub(crate) struct LocalPhaseOutput {
    /// One queue per tile, in tile order.
    pub queues: Vec<DeferredQueue>,
    pub stats: Vec<TileStats>,
}

/// One worker's share of the image.
#[derive(Debug)]
struct Tile<'a> {
    regions: TileRegions<'a>,
    /// Indexed by `root - range.start`; only meaningful at roots.
    marked: Vec<bool>,
    queue: DeferredQueue,
    stats: TileStats,
}

impl<'a> Tile<'a> {
    fn new(regions: TileRegions<'a>) -> Self {
        let len = regions.range().len();
        Self {
            regions,
            marked: vec![false; len],
            queue: DeferredQueue::default(),
            stats: TileStats::default(),
        }
    }

    #[inline]
    fn is_marked(&self, root: u32) -> bool {
        self.marked[(root - self.regions.range().start) as usize]
    }

    #[inline]
    fn mark(&mut self, root: u32) {
        let idx = (root - self.regions.range().start) as usize;
        self.marked[idx] = true;
    }

    fn run(
        mut self,
        rgb: &[u8],
        width: usize,
        height: usize,
        config: &Config,
    ) -> (DeferredQueue, TileStats) {
        let range = self.regions.range();
        let pixels = range.start as usize..range.end as usize;

        let edges = build_edges_from(rgb, width, height, config.max_weight, pixels.clone());
        let sorted = sort_by_weight(&edges);
        drop(edges);
        self.stats.edges = sorted.len();

        let (seed_edges, growth_edges) = sorted.split_at(seed_split(&sorted, config.min_weight));

        self.seed(seed_edges);
        self.mark_boundary(&sorted, rgb, width, height, config.max_weight, pixels);

        let local_growth: Vec<Edge> = if config.credit_model.needs_outside_weights() {
            growth_edges
                .iter()
                .filter(|e| range.contains(&e.to))
                .copied()
                .collect()
        } else {
            Vec::new()
        };
        initialize_credits(&mut self.regions, range, &local_growth, config);

        self.grow(growth_edges);

        (self.queue, self.stats)
    }

    fn seed(&mut self, seed_edges: &[Edge]) {
        let range = self.regions.range();
        for edge in seed_edges {
            if !range.contains(&edge.to) {
                self.queue.seed.push(*edge);
                continue;
            }
            if self.regions.find(edge.from) != self.regions.find(edge.to) {
                self.regions.union(edge.from, edge.to);
                self.stats.seed_merges += 1;
            }
        }
    }

    /// Mark every region holding an endpoint of a kept cross-tile edge, in
    /// either direction.
    fn mark_boundary(
        &mut self,
        own_edges: &[Edge],
        rgb: &[u8],
        width: usize,
        height: usize,
        max_weight: u32,
        pixels: Range<usize>,
    ) {
        let range = self.regions.range();
        let mut boundary: Vec<u32> = own_edges
            .iter()
            .filter(|e| !range.contains(&e.to))
            .map(|e| e.from)
            .collect();
        boundary.extend(
            build_edges_into(rgb, width, height, max_weight, pixels)
                .iter()
                .map(|e| e.to),
        );
        boundary.sort_unstable();
        boundary.dedup();

        for &p in &boundary {
            let root = self.regions.find(p);
            self.mark(root);
        }
        self.queue.boundary = boundary;
    }

    fn grow(&mut self, growth_edges: &[Edge]) {
        let range = self.regions.range();
        for edge in growth_edges {
            if !range.contains(&edge.to) {
                self.queue.growth.push(*edge);
                continue;
            }

            let a = self.regions.find(edge.from);
            let b = self.regions.find(edge.to);
            if a == b {
                continue;
            }
            if self.is_marked(a) || self.is_marked(b) {
                self.mark(a);
                self.mark(b);
                self.queue.growth.push(*edge);
                continue;
            }

            let outcome = credit_gated_merge(&mut self.regions, edge);
            self.stats.growth.record(outcome);
        }
    }
}

/// Run every tile in parallel over the forest entries it owns.
pub(crate) fn run_local_phase(
    table: &mut RegionTable,
    rgb: &[u8],
    width: usize,
    height: usize,
    config: &Config,
    ranges: &[Range<usize>],
) -> LocalPhaseOutput {
    let (queues, stats): (Vec<DeferredQueue>, Vec<TileStats>) = table
        .split_tiles(ranges)
        .into_par_iter()
        .map(|regions| Tile::new(regions).run(rgb, width, height, config))
        .unzip();

    LocalPhaseOutput { queues, stats }
}

/// Run the whole tiled pipeline over `tiles` workers and return the final
/// forest.
///
/// Parameters must already be validated.
pub(crate) fn segment_forest(
    rgb: &[u8],
    width: usize,
    height: usize,
    config: &Config,
    tiles: usize,
) -> DisjointSetForest {
    let pixel_count = width * height;
    let ranges = common::parallel::partition_ranges(pixel_count, tiles);

    let mut table = RegionTable::new(pixel_count);
    let local = run_local_phase(&mut table, rgb, width, height, config, &ranges);

    for (index, (range, (queue, stats))) in ranges
        .iter()
        .zip(local.queues.iter().zip(&local.stats))
        .enumerate()
    {
        tracing::trace!(
            tile = index,
            start = range.start,
            end = range.end,
            edges = stats.edges,
            seed_merges = stats.seed_merges,
            growth_merges = stats.growth.merged,
            deferred_seed = queue.seed.len(),
            deferred_growth = queue.growth.len(),
            boundary = queue.boundary.len(),
            "Tile finished"
        );
    }

    let stats = Reconciler::new(&mut table, config).drain(local);
    tracing::debug!(
        tiles = ranges.len(),
        deferred_seed_merges = stats.seed_merges,
        boundary_regions = stats.boundary_regions,
        deferred_edges = stats.deferred_edges,
        reconciled_merges = stats.growth.merged,
        "Tiled region growth finished"
    );

    table.into_forest()
}
