//! Sequential drain of the queues left by the tiled local phase.

use hashbrown::HashMap;

use super::LocalPhaseOutput;
use crate::config::Config;
use crate::edges::{Edge, sort_by_weight};
use crate::growth::{GrowthStats, RegionTable, Regions, grow, seed};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReconcileStats {
    pub seed_merges: usize,
    pub boundary_regions: usize,
    pub deferred_edges: usize,
    pub growth: GrowthStats,
}

/// Resolves deferred edges with full visibility of the forest.
#[derive(Debug)]
pub(crate) struct Reconciler<'a> {
    table: &'a mut RegionTable,
    config: &'a Config,
}

impl<'a> Reconciler<'a> {
    pub(crate) fn new(table: &'a mut RegionTable, config: &'a Config) -> Self {
        Self { table, config }
    }

    /// Apply every queued edge. Tiles are visited in order, so the result
    /// only depends on the partition.
    pub(crate) fn drain(mut self, local: LocalPhaseOutput) -> ReconcileStats {
        let mut stats = ReconcileStats::default();

        for queue in &local.queues {
            stats.seed_merges += seed(&mut *self.table, &queue.seed);
        }

        // Concatenating in tile order keeps emission order among equal
        // weights, which the stable sort preserves.
        let deferred: Vec<Edge> = local
            .queues
            .iter()
            .flat_map(|q| q.growth.iter().copied())
            .collect();
        let deferred = sort_by_weight(&deferred);
        stats.deferred_edges = deferred.len();

        let boundary = local.queues.iter().flat_map(|q| q.boundary.iter().copied());
        stats.boundary_regions = self.reset_boundary_credits(boundary, &deferred);

        stats.growth = grow(&mut *self.table, &deferred);
        stats
    }

    /// Recompute the credit of every region holding a boundary pixel, now
    /// that cross-tile seeding has fixed its size. Returns the number of such
    /// regions.
    ///
    /// Every unseeded edge touching such a region was deferred, so the queued
    /// edges are enough to find its lightest outside edge.
    fn reset_boundary_credits(
        &mut self,
        boundary: impl Iterator<Item = u32>,
        deferred: &[Edge],
    ) -> usize {
        let mut min_outside: HashMap<u32, u32> = HashMap::new();
        for p in boundary {
            let root = self.table.find(p);
            min_outside.insert(root, u32::MAX);
        }

        if self.config.credit_model.needs_outside_weights() {
            for edge in deferred {
                let a = self.table.find(edge.from);
                let b = self.table.find(edge.to);
                if a == b {
                    continue;
                }
                for root in [a, b] {
                    if let Some(weight) = min_outside.get_mut(&root) {
                        *weight = (*weight).min(edge.weight);
                    }
                }
            }
        }

        for (&root, &weight) in &min_outside {
            let credit = self.config.initial_credit(self.table.size(root), weight);
            self.table.set_credit(root, credit);
        }

        min_outside.len()
    }
}
