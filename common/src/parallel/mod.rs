//! Static partitioning of index spaces for parallel workers.

use std::ops::Range;

#[cfg(test)]
mod tests;

/// Number of parts to split `len` items into.
///
/// One part per rayon thread, but never so many that a part holds fewer than
/// `min_part_len` items. Always at least 1.
#[inline]
pub fn auto_part_count(len: usize, min_part_len: usize) -> usize {
    let num_threads = rayon::current_num_threads();
    (len / min_part_len.max(1)).clamp(1, num_threads)
}

/// Split `0..len` into `parts` contiguous, non-overlapping ranges.
///
/// Ranges are returned in ascending order and cover every index exactly once.
/// Sizes differ by at most one; the first `len % parts` ranges get the extra
/// item. `parts` is clamped to `1..=len` so no range is empty (an empty input
/// yields no ranges).
pub fn partition_ranges(len: usize, parts: usize) -> Vec<Range<usize>> {
    if len == 0 {
        return Vec::new();
    }

    let parts = parts.clamp(1, len);
    let base = len / parts;
    let extra = len % parts;

    let mut ranges = Vec::with_capacity(parts);
    let mut start = 0;
    for part in 0..parts {
        let part_len = base + usize::from(part < extra);
        ranges.push(start..start + part_len);
        start += part_len;
    }
    debug_assert_eq!(start, len);

    ranges
}
