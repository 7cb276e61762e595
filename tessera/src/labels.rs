//! Dense segment ids from the final forest.

use crate::forest::DisjointSetForest;

/// Per-pixel segment labels in `0..segment_count`, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentationResult {
    width: usize,
    height: usize,
    labels: Vec<u32>,
    segment_count: usize,
}

impl SegmentationResult {
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    #[inline]
    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    /// Label of pixel `(x, y)`, or `None` outside the image.
    #[inline]
    pub fn label_at(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.labels[y * self.width + x])
    }

    /// Pixel count of every segment, indexed by label.
    pub fn segment_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.segment_count];
        for &label in &self.labels {
            sizes[label as usize] += 1;
        }
        sizes
    }

    pub fn into_labels(self) -> Vec<u32> {
        self.labels
    }
}

impl std::ops::Index<usize> for SegmentationResult {
    type Output = u32;

    #[inline]
    fn index(&self, idx: usize) -> &Self::Output {
        &self.labels[idx]
    }
}

/// Number the components of `forest` in order of their first pixel.
///
/// Labels depend only on which pixels share a component, never on which
/// pixel ended up as the root, so equal partitions give equal label arrays.
///
/// # Panics
/// If the forest does not have exactly `width * height` elements.
pub fn assign_labels(
    forest: &mut DisjointSetForest,
    width: usize,
    height: usize,
) -> SegmentationResult {
    let pixel_count = width * height;
    assert_eq!(
        forest.len(),
        pixel_count,
        "forest size does not match {width}x{height} image"
    );

    const UNASSIGNED: u32 = u32::MAX;
    let mut root_label = vec![UNASSIGNED; pixel_count];
    let mut labels = Vec::with_capacity(pixel_count);
    let mut next_label = 0u32;

    for p in 0..pixel_count as u32 {
        let root = forest.find(p) as usize;
        if root_label[root] == UNASSIGNED {
            root_label[root] = next_label;
            next_label += 1;
        }
        labels.push(root_label[root]);
    }

    SegmentationResult {
        width,
        height,
        labels,
        segment_count: next_label as usize,
    }
}
