use super::*;

#[test]
fn test_partition_covers_every_index_once() {
    for len in [1usize, 2, 7, 64, 1000, 1001] {
        for parts in [1usize, 2, 3, 8, 13] {
            let ranges = partition_ranges(len, parts);
            let mut next = 0;
            for r in &ranges {
                assert_eq!(r.start, next, "len={len} parts={parts}");
                assert!(!r.is_empty());
                next = r.end;
            }
            assert_eq!(next, len);
        }
    }
}

#[test]
fn test_partition_sizes_balanced() {
    let ranges = partition_ranges(10, 4);
    let sizes: Vec<usize> = ranges.iter().map(|r| r.len()).collect();
    assert_eq!(sizes, vec![3, 3, 2, 2]);
}

#[test]
fn test_partition_more_parts_than_items() {
    let ranges = partition_ranges(3, 10);
    assert_eq!(ranges, vec![0..1, 1..2, 2..3]);
}

#[test]
fn test_partition_zero_parts_is_single_range() {
    assert_eq!(partition_ranges(5, 0), vec![0..5]);
}

#[test]
fn test_partition_empty() {
    assert!(partition_ranges(0, 4).is_empty());
}

#[test]
fn test_auto_part_count_bounds() {
    let threads = rayon::current_num_threads();
    assert_eq!(auto_part_count(0, 100), 1);
    assert_eq!(auto_part_count(99, 100), 1);
    assert_eq!(auto_part_count(usize::MAX / 2, 1), threads);
    assert!(auto_part_count(1000, 0) >= 1);
}
