//! Array-backed union-find over pixel indices with size tracking.
//!
//! [`DisjointSetForest`] owns the parent and size arrays for the whole image.
//! [`DisjointSetForest::split_tiles`] hands out [`ForestTile`] views over
//! disjoint index ranges so parallel workers can mutate their own part of the
//! forest without locks. A tile only ever links roots inside its range, which
//! keeps every parent pointer it writes inside the range too.

#[cfg(test)]
mod tests;

use std::ops::Range;

/// Union-find over `0..len` with union by size and path compression.
#[derive(Debug, Clone)]
pub struct DisjointSetForest {
    parent: Vec<u32>,
    size: Vec<u32>,
}

impl DisjointSetForest {
    /// Create `len` singleton components.
    ///
    /// # Panics
    /// If `len` exceeds the `u32` index space.
    pub fn new(len: usize) -> Self {
        assert!(
            u32::try_from(len).is_ok(),
            "DisjointSetForest supports at most u32::MAX elements, got {len}"
        );
        Self {
            parent: (0..len as u32).collect(),
            size: vec![1; len],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Representative of `x`'s component.
    #[inline]
    pub fn find(&mut self, x: u32) -> u32 {
        find_root(&mut self.parent, 0, x)
    }

    /// Merge the components of `a` and `b` and return the surviving root.
    ///
    /// The smaller component is attached under the larger one; on equal sizes
    /// `a`'s root survives.
    #[inline]
    pub fn union(&mut self, a: u32, b: u32) -> u32 {
        union_roots(&mut self.parent, &mut self.size, 0, a, b)
    }

    #[inline]
    pub fn same_component(&mut self, a: u32, b: u32) -> bool {
        self.find(a) == self.find(b)
    }

    #[inline]
    pub fn is_representative(&self, x: u32) -> bool {
        self.parent[x as usize] == x
    }

    /// Pixel count of `x`'s component.
    #[inline]
    pub fn component_size(&mut self, x: u32) -> u32 {
        let root = self.find(x);
        self.size[root as usize]
    }

    /// Size stored at `root`. Meaningless for non-roots.
    #[inline]
    pub(crate) fn root_size(&self, root: u32) -> u32 {
        debug_assert!(self.is_representative(root));
        self.size[root as usize]
    }

    /// Split the forest into views over consecutive `ranges`.
    ///
    /// # Panics
    /// If `ranges` do not tile `0..len` in ascending order.
    pub fn split_tiles(&mut self, ranges: &[Range<usize>]) -> Vec<ForestTile<'_>> {
        let mut parent = self.parent.as_mut_slice();
        let mut size = self.size.as_mut_slice();
        let mut next = 0;
        let mut tiles = Vec::with_capacity(ranges.len());

        for range in ranges {
            assert_eq!(range.start, next, "tile ranges must be contiguous");
            let (tile_parent, rest_parent) = std::mem::take(&mut parent).split_at_mut(range.len());
            let (tile_size, rest_size) = std::mem::take(&mut size).split_at_mut(range.len());
            parent = rest_parent;
            size = rest_size;
            next = range.end;

            tiles.push(ForestTile {
                start: range.start as u32,
                parent: tile_parent,
                size: tile_size,
            });
        }
        assert!(parent.is_empty(), "tile ranges must cover the forest");

        tiles
    }
}

/// Exclusive view of the forest entries for one contiguous index range.
///
/// Indices are global; passing an index outside the range is a contract
/// violation and panics.
#[derive(Debug)]
pub struct ForestTile<'a> {
    start: u32,
    parent: &'a mut [u32],
    size: &'a mut [u32],
}

impl ForestTile<'_> {
    #[inline]
    pub fn range(&self) -> Range<u32> {
        self.start..self.start + self.parent.len() as u32
    }

    #[inline]
    pub fn contains(&self, x: u32) -> bool {
        self.range().contains(&x)
    }

    #[inline]
    pub fn find(&mut self, x: u32) -> u32 {
        find_root(self.parent, self.start, x)
    }

    #[inline]
    pub fn union(&mut self, a: u32, b: u32) -> u32 {
        union_roots(self.parent, self.size, self.start, a, b)
    }

    #[inline]
    pub(crate) fn root_size(&self, root: u32) -> u32 {
        self.size[(root - self.start) as usize]
    }
}

/// Find with two-pass path compression. `offset` is the global index of
/// `parent[0]`.
#[inline]
fn find_root(parent: &mut [u32], offset: u32, x: u32) -> u32 {
    let mut root = x;
    loop {
        let p = parent[(root - offset) as usize];
        if p == root {
            break;
        }
        root = p;
    }

    let mut current = x;
    while current != root {
        let idx = (current - offset) as usize;
        let next = parent[idx];
        parent[idx] = root;
        current = next;
    }

    root
}

#[inline]
fn union_roots(parent: &mut [u32], size: &mut [u32], offset: u32, a: u32, b: u32) -> u32 {
    let root_a = find_root(parent, offset, a);
    let root_b = find_root(parent, offset, b);
    if root_a == root_b {
        return root_a;
    }

    let idx_a = (root_a - offset) as usize;
    let idx_b = (root_b - offset) as usize;
    let (keep, keep_idx, absorbed_idx) = if size[idx_b] > size[idx_a] {
        (root_b, idx_b, idx_a)
    } else {
        (root_a, idx_a, idx_b)
    };

    parent[absorbed_idx] = keep;
    size[keep_idx] += size[absorbed_idx];
    keep
}
