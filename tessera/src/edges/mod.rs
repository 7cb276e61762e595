//! Weighted 4-connected grid edges over an RGB image.
//!
//! Every edge is stored once, from a pixel to its right or down neighbour, so
//! `from < to` always holds. Weights are `4 * floor(sqrt(d))` where `d` is the
//! squared RGB distance; edges heavier than the configured maximum are never
//! materialized.

mod sort;

use std::ops::Range;

pub use sort::sort_by_weight;

/// Scale applied to the integer colour distance.
const WEIGHT_SCALE: u32 = 4;

/// Squared distance between black and white.
const MAX_SQUARED_DISTANCE: u32 = 3 * 255 * 255;

/// Largest weight [`edge_weight`] can return.
pub const MAX_EDGE_WEIGHT: u32 = WEIGHT_SCALE * MAX_SQUARED_DISTANCE.isqrt();

/// Histogram buckets needed to count every possible weight.
pub(crate) const WEIGHT_BUCKETS: usize = MAX_EDGE_WEIGHT as usize + 1;

const _: () = assert!(edge_weight([0, 0, 0], [255, 255, 255]) < WEIGHT_BUCKETS as u32);
const _: () = assert!(edge_weight([255, 0, 255], [0, 255, 0]) == MAX_EDGE_WEIGHT);

/// An undirected grid edge between two pixel indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edge {
    pub from: u32,
    pub to: u32,
    pub weight: u32,
}

/// Colour-distance weight between two RGB pixels.
pub const fn edge_weight(p: [u8; 3], q: [u8; 3]) -> u32 {
    let mut squared = 0u32;
    let mut c = 0;
    while c < 3 {
        let d = p[c] as i32 - q[c] as i32;
        squared += (d * d) as u32;
        c += 1;
    }
    WEIGHT_SCALE * squared.isqrt()
}

#[inline]
fn pixel(rgb: &[u8], idx: usize) -> [u8; 3] {
    let base = idx * 3;
    [rgb[base], rgb[base + 1], rgb[base + 2]]
}

/// Build every edge of the `width` x `height` grid with weight `<= max_weight`.
pub fn build_edges(rgb: &[u8], width: usize, height: usize, max_weight: u32) -> Vec<Edge> {
    build_edges_from(rgb, width, height, max_weight, 0..width * height)
}

/// Build the edges whose `from` endpoint lies in `pixels`.
///
/// The `to` endpoint may fall past `pixels.end`; such edges still belong to
/// the range that owns `from`.
pub fn build_edges_from(
    rgb: &[u8],
    width: usize,
    height: usize,
    max_weight: u32,
    pixels: Range<usize>,
) -> Vec<Edge> {
    let pixel_count = width * height;
    debug_assert!(pixels.end <= pixel_count);
    debug_assert!(rgb.len() >= pixel_count * 3);

    let mut edges = Vec::with_capacity(pixels.len() * 2);
    for p in pixels {
        let color = pixel(rgb, p);

        if p % width + 1 < width {
            push_if_light(&mut edges, p, p + 1, color, pixel(rgb, p + 1), max_weight);
        }
        if p + width < pixel_count {
            push_if_light(
                &mut edges,
                p,
                p + width,
                color,
                pixel(rgb, p + width),
                max_weight,
            );
        }
    }

    edges
}

/// Build the edges that enter `pixels` from an earlier index.
///
/// These are the left edge of `pixels.start` when it does not begin a row,
/// and the up edges of every pixel whose upper neighbour precedes the range.
pub fn build_edges_into(
    rgb: &[u8],
    width: usize,
    height: usize,
    max_weight: u32,
    pixels: Range<usize>,
) -> Vec<Edge> {
    let mut edges = Vec::new();
    if pixels.is_empty() {
        return edges;
    }
    debug_assert!(pixels.end <= width * height);

    let start = pixels.start;
    if start % width != 0 {
        push_if_light(
            &mut edges,
            start - 1,
            start,
            pixel(rgb, start - 1),
            pixel(rgb, start),
            max_weight,
        );
    }

    let first_with_up = start.max(width);
    let last_with_outside_up = pixels.end.min(start + width);
    for p in first_with_up..last_with_outside_up {
        let q = p - width;
        push_if_light(&mut edges, q, p, pixel(rgb, q), pixel(rgb, p), max_weight);
    }

    edges
}

#[inline]
fn push_if_light(
    edges: &mut Vec<Edge>,
    from: usize,
    to: usize,
    from_color: [u8; 3],
    to_color: [u8; 3],
    max_weight: u32,
) {
    let weight = edge_weight(from_color, to_color);
    if weight <= max_weight {
        edges.push(Edge {
            from: from as u32,
            to: to as u32,
            weight,
        });
    }
}
