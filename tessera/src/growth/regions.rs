//! Union-find plus per-region credit, the state growth decisions read and write.

use std::ops::Range;

use crate::forest::{DisjointSetForest, ForestTile};

/// Operations the seed and growth phases need from region storage.
///
/// Implemented by the whole-image [`RegionTable`] and by the tile-owned
/// [`TileRegions`] view, so the same phase code runs on both.
pub(crate) trait Regions {
    fn find(&mut self, x: u32) -> u32;
    fn union(&mut self, a: u32, b: u32) -> u32;
    fn size(&self, root: u32) -> u32;
    fn credit(&self, root: u32) -> f64;
    fn set_credit(&mut self, root: u32, credit: f64);
}

/// Regions of the whole image.
#[derive(Debug)]
pub(crate) struct RegionTable {
    forest: DisjointSetForest,
    credits: Vec<f64>,
}

impl RegionTable {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            forest: DisjointSetForest::new(len),
            credits: vec![0.0; len],
        }
    }

    pub(crate) fn into_forest(self) -> DisjointSetForest {
        self.forest
    }

    /// Split into tile-owned views over consecutive `ranges`.
    pub(crate) fn split_tiles(&mut self, ranges: &[Range<usize>]) -> Vec<TileRegions<'_>> {
        let forest_tiles = self.forest.split_tiles(ranges);
        let mut credits = self.credits.as_mut_slice();

        forest_tiles
            .into_iter()
            .map(|forest| {
                let (tile_credits, rest) =
                    std::mem::take(&mut credits).split_at_mut(forest.range().len());
                credits = rest;
                TileRegions {
                    forest,
                    credits: tile_credits,
                }
            })
            .collect()
    }
}

impl Regions for RegionTable {
    #[inline]
    fn find(&mut self, x: u32) -> u32 {
        self.forest.find(x)
    }

    #[inline]
    fn union(&mut self, a: u32, b: u32) -> u32 {
        self.forest.union(a, b)
    }

    #[inline]
    fn size(&self, root: u32) -> u32 {
        self.forest.root_size(root)
    }

    #[inline]
    fn credit(&self, root: u32) -> f64 {
        self.credits[root as usize]
    }

    #[inline]
    fn set_credit(&mut self, root: u32, credit: f64) {
        self.credits[root as usize] = credit;
    }
}

/// Regions restricted to one tile's pixel range.
#[derive(Debug)]
pub(crate) struct TileRegions<'a> {
    forest: ForestTile<'a>,
    credits: &'a mut [f64],
}

impl TileRegions<'_> {
    #[inline]
    pub(crate) fn range(&self) -> Range<u32> {
        self.forest.range()
    }

    #[inline]
    fn local(&self, x: u32) -> usize {
        (x - self.forest.range().start) as usize
    }
}

impl Regions for TileRegions<'_> {
    #[inline]
    fn find(&mut self, x: u32) -> u32 {
        self.forest.find(x)
    }

    #[inline]
    fn union(&mut self, a: u32, b: u32) -> u32 {
        self.forest.union(a, b)
    }

    #[inline]
    fn size(&self, root: u32) -> u32 {
        self.forest.root_size(root)
    }

    #[inline]
    fn credit(&self, root: u32) -> f64 {
        self.credits[self.local(root)]
    }

    #[inline]
    fn set_credit(&mut self, root: u32, credit: f64) {
        let idx = self.local(root);
        self.credits[idx] = credit;
    }
}
