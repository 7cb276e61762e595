//! Sequential region growth.
//!
//! Three phases over edges sorted by ascending weight:
//! 1. Seed: every edge with `weight <= min_weight` merges its endpoints.
//! 2. Credit: every seeded region gets a budget from its size (see
//!    [`CreditModel`](crate::CreditModel)); undersized regions get an
//!    unbounded one.
//! 3. Growth: one ascending pass over the remaining edges. Two regions merge
//!    when the smaller of their credits exceeds the edge weight, and the
//!    merged region keeps the difference. A rejected edge is never retried.
//!
//! The phase functions are generic over [`Regions`] so the tiled path reuses
//! them on tile-owned views.

pub(crate) mod regions;

use std::ops::Range;

use crate::config::Config;
use crate::edges::{Edge, build_edges, sort_by_weight};
use crate::forest::DisjointSetForest;

pub(crate) use regions::{RegionTable, Regions, TileRegions};

/// Result of offering one edge to the growth rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum MergeOutcome {
    SameRegion,
    Merged { root: u32, credit: f64 },
    Rejected,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GrowthStats {
    pub merged: usize,
    pub rejected: usize,
}

impl GrowthStats {
    #[inline]
    pub(crate) fn record(&mut self, outcome: MergeOutcome) {
        match outcome {
            MergeOutcome::Merged { .. } => self.merged += 1,
            MergeOutcome::Rejected => self.rejected += 1,
            MergeOutcome::SameRegion => {}
        }
    }
}

/// Index of the first edge above `min_weight` in an ascending edge list.
#[inline]
pub(crate) fn seed_split(sorted: &[Edge], min_weight: u32) -> usize {
    sorted.partition_point(|e| e.weight <= min_weight)
}

/// Merge the endpoints of every edge unconditionally. Returns the number of
/// unions performed.
pub(crate) fn seed(regions: &mut impl Regions, seed_edges: &[Edge]) -> usize {
    let mut merges = 0;
    for edge in seed_edges {
        if regions.find(edge.from) != regions.find(edge.to) {
            regions.union(edge.from, edge.to);
            merges += 1;
        }
    }
    merges
}

/// Lightest edge leaving each region, indexed by `root - pixels.start`.
///
/// Edges whose endpoints already share a region are ignored. Regions with no
/// such edge keep `u32::MAX`. Every root reached from `edges` must lie in
/// `pixels`.
pub(crate) fn min_outside_weights(
    regions: &mut impl Regions,
    pixels: Range<u32>,
    edges: &[Edge],
) -> Vec<u32> {
    let mut min_weight = vec![u32::MAX; pixels.len()];
    for edge in edges {
        let a = regions.find(edge.from);
        let b = regions.find(edge.to);
        if a == b {
            continue;
        }
        for root in [a, b] {
            let slot = &mut min_weight[(root - pixels.start) as usize];
            *slot = (*slot).min(edge.weight);
        }
    }
    min_weight
}

/// Assign the initial credit of every region rooted in `pixels`.
///
/// `growth_edges` are the unseeded edges touching those regions; they are
/// only read when the credit model needs outside weights.
pub(crate) fn initialize_credits(
    regions: &mut impl Regions,
    pixels: Range<u32>,
    growth_edges: &[Edge],
    config: &Config,
) {
    let outside = if config.credit_model.needs_outside_weights() {
        min_outside_weights(regions, pixels.clone(), growth_edges)
    } else {
        Vec::new()
    };

    for p in pixels.clone() {
        if regions.find(p) != p {
            continue;
        }
        let min_outside = outside
            .get((p - pixels.start) as usize)
            .copied()
            .unwrap_or(u32::MAX);
        let credit = config.initial_credit(regions.size(p), min_outside);
        regions.set_credit(p, credit);
    }
}

/// Apply the credit rule to one edge.
#[inline]
pub(crate) fn credit_gated_merge(regions: &mut impl Regions, edge: &Edge) -> MergeOutcome {
    let a = regions.find(edge.from);
    let b = regions.find(edge.to);
    if a == b {
        return MergeOutcome::SameRegion;
    }

    let candidate = regions.credit(a).min(regions.credit(b));
    let weight = f64::from(edge.weight);
    if candidate > weight {
        let root = regions.union(a, b);
        let credit = candidate - weight;
        regions.set_credit(root, credit);
        MergeOutcome::Merged { root, credit }
    } else {
        MergeOutcome::Rejected
    }
}

/// Single ascending growth pass.
pub(crate) fn grow(regions: &mut impl Regions, growth_edges: &[Edge]) -> GrowthStats {
    let mut stats = GrowthStats::default();
    for edge in growth_edges {
        stats.record(credit_gated_merge(regions, edge));
    }
    stats
}

/// Run the whole sequential pipeline and return the final forest.
///
/// Parameters must already be validated.
pub(crate) fn segment_forest(
    rgb: &[u8],
    width: usize,
    height: usize,
    config: &Config,
) -> DisjointSetForest {
    let pixel_count = width * height;

    let edges = build_edges(rgb, width, height, config.max_weight);
    let sorted = sort_by_weight(&edges);
    drop(edges);
    let split = seed_split(&sorted, config.min_weight);
    let (seed_edges, growth_edges) = sorted.split_at(split);

    let mut table = RegionTable::new(pixel_count);
    let seed_merges = seed(&mut table, seed_edges);
    initialize_credits(&mut table, 0..pixel_count as u32, growth_edges, config);
    let stats = grow(&mut table, growth_edges);

    tracing::debug!(
        edges = sorted.len(),
        seed_edges = seed_edges.len(),
        seed_merges,
        growth_merges = stats.merged,
        growth_rejected = stats.rejected,
        "Sequential region growth finished"
    );

    table.into_forest()
}
