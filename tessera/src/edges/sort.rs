use super::{Edge, WEIGHT_BUCKETS};

/// Stable counting sort of edges by ascending weight.
///
/// Edges of equal weight keep their input order.
///
/// # Panics
/// If an edge weight exceeds [`MAX_EDGE_WEIGHT`](super::MAX_EDGE_WEIGHT).
pub fn sort_by_weight(edges: &[Edge]) -> Vec<Edge> {
    // offsets[w + 1] counts edges of weight w, then prefix sums turn
    // offsets[w] into the first output slot for weight w.
    let mut offsets = vec![0usize; WEIGHT_BUCKETS + 1];
    for edge in edges {
        offsets[edge.weight as usize + 1] += 1;
    }
    for w in 1..offsets.len() {
        offsets[w] += offsets[w - 1];
    }

    let mut sorted = vec![Edge::default(); edges.len()];
    for edge in edges {
        let slot = &mut offsets[edge.weight as usize];
        sorted[*slot] = *edge;
        *slot += 1;
    }

    sorted
}
