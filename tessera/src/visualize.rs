//! Read-only renderings of a [`SegmentationResult`] for manual inspection.

use crate::labels::SegmentationResult;

/// Label grid as text: one line per image row, labels separated by spaces.
pub fn render_label_grid(result: &SegmentationResult) -> String {
    let mut out = String::new();
    for row in result.labels().chunks(result.width()) {
        for (x, label) in row.iter().enumerate() {
            if x > 0 {
                out.push(' ');
            }
            out.push_str(&label.to_string());
        }
        out.push('\n');
    }
    out
}

/// RGB image in which every pixel carries the mean colour of its segment.
///
/// # Panics
/// If `rgb` holds fewer than `width * height * 3` bytes.
pub fn mean_color_image(rgb: &[u8], result: &SegmentationResult) -> Vec<u8> {
    let pixel_count = result.labels().len();
    assert!(
        rgb.len() >= pixel_count * 3,
        "RGB buffer too short for {}x{} labels",
        result.width(),
        result.height()
    );

    let mut sums = vec![[0u64; 3]; result.segment_count()];
    let mut counts = vec![0u64; result.segment_count()];
    for (px, &label) in rgb.chunks_exact(3).zip(result.labels()) {
        let sum = &mut sums[label as usize];
        for c in 0..3 {
            sum[c] += u64::from(px[c]);
        }
        counts[label as usize] += 1;
    }

    let means: Vec<[u8; 3]> = sums
        .iter()
        .zip(&counts)
        .map(|(sum, &count)| sum.map(|s| ((s + count / 2) / count) as u8))
        .collect();

    let mut out = Vec::with_capacity(pixel_count * 3);
    for &label in result.labels() {
        out.extend_from_slice(&means[label as usize]);
    }
    out
}
