//! Tests for the disjoint-set forest.

use super::*;

#[test]
fn starts_as_singletons() {
    let mut forest = DisjointSetForest::new(5);
    assert_eq!(forest.len(), 5);
    for x in 0..5 {
        assert_eq!(forest.find(x), x);
        assert!(forest.is_representative(x));
        assert_eq!(forest.component_size(x), 1);
    }
}

#[test]
fn union_joins_and_tracks_size() {
    let mut forest = DisjointSetForest::new(6);
    forest.union(0, 1);
    forest.union(2, 3);
    forest.union(1, 3);

    assert!(forest.same_component(0, 2));
    assert!(!forest.same_component(0, 4));
    assert_eq!(forest.component_size(3), 4);
    assert_eq!(forest.component_size(5), 1);
}

#[test]
fn equal_sizes_keep_first_root() {
    let mut forest = DisjointSetForest::new(4);
    assert_eq!(forest.union(2, 1), 2);
    assert_eq!(forest.union(3, 0), 3);
    // Equal sizes again: first argument's root (2) survives.
    assert_eq!(forest.union(1, 0), 2);
}

#[test]
fn smaller_component_joins_larger() {
    let mut forest = DisjointSetForest::new(5);
    let big = forest.union(1, 2);
    forest.union(big, 3);
    assert_eq!(forest.union(0, 3), big);
    assert!(!forest.is_representative(0));
}

#[test]
fn union_of_same_component_is_noop() {
    let mut forest = DisjointSetForest::new(3);
    let root = forest.union(0, 1);
    assert_eq!(forest.union(1, 0), root);
    assert_eq!(forest.component_size(0), 2);
}

#[test]
fn find_is_idempotent_on_long_chain() {
    let n = 100_000u32;
    let mut forest = DisjointSetForest::new(n as usize);
    for x in 1..n {
        forest.union(0, x);
    }
    for x in 0..n {
        let r = forest.find(x);
        assert_eq!(forest.find(r), r);
        assert_eq!(r, forest.find(0));
    }
    assert_eq!(forest.component_size(n - 1), n);
}

#[test]
fn sizes_match_membership() {
    let mut forest = DisjointSetForest::new(12);
    for (a, b) in [(0, 5), (5, 7), (2, 3), (9, 11), (3, 11), (1, 10)] {
        forest.union(a, b);
    }
    for x in 0..12u32 {
        let root = forest.find(x);
        let members = (0..12u32).filter(|&y| forest.find(y) == root).count();
        assert_eq!(forest.component_size(x) as usize, members);
    }
}

#[test]
fn tiles_mutate_only_their_range() {
    let mut forest = DisjointSetForest::new(10);
    {
        let mut tiles = forest.split_tiles(&[0..4, 4..10]);
        assert_eq!(tiles[0].range(), 0..4);
        assert_eq!(tiles[1].range(), 4..10);
        assert!(tiles[1].contains(9));
        assert!(!tiles[1].contains(3));

        tiles[0].union(0, 3);
        tiles[1].union(4, 9);
        tiles[1].union(5, 9);
        let root = tiles[1].find(5);
        assert_eq!(tiles[1].root_size(root), 3);
    }

    assert!(forest.same_component(0, 3));
    assert!(forest.same_component(4, 5));
    assert!(!forest.same_component(3, 4));
    assert_eq!(forest.component_size(9), 3);
}

#[test]
#[should_panic(expected = "contiguous")]
fn split_rejects_gaps() {
    let mut forest = DisjointSetForest::new(10);
    forest.split_tiles(&[0..4, 5..10]);
}

#[test]
#[should_panic(expected = "cover")]
fn split_rejects_partial_cover() {
    let mut forest = DisjointSetForest::new(10);
    forest.split_tiles(&[0..4, 4..8]);
}

#[test]
#[should_panic]
fn tile_rejects_foreign_index() {
    let mut forest = DisjointSetForest::new(10);
    let mut tiles = forest.split_tiles(&[0..4, 4..10]);
    tiles[1].find(2);
}
