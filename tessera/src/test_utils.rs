//! Synthetic images for tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn uniform_rgb(width: usize, height: usize, color: [u8; 3]) -> Vec<u8> {
    color.repeat(width * height)
}

/// Independent random colour per pixel.
pub fn random_rgb(width: usize, height: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..width * height * 3).map(|_| rng.random()).collect()
}

/// 5x4 blocks of random base colour with +-3 noise per channel.
pub fn blocky_rgb(width: usize, height: usize, seed: u64) -> Vec<u8> {
    const BLOCK_W: usize = 5;
    const BLOCK_H: usize = 4;

    let mut rng = StdRng::seed_from_u64(seed);
    let blocks_x = width.div_ceil(BLOCK_W);
    let blocks_y = height.div_ceil(BLOCK_H);
    let bases: Vec<[u8; 3]> = (0..blocks_x * blocks_y)
        .map(|_| [rng.random(), rng.random(), rng.random()])
        .collect();

    let mut rgb = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let base = bases[(y / BLOCK_H) * blocks_x + x / BLOCK_W];
            for c in base {
                let noisy = i32::from(c) + rng.random_range(-3..=3);
                rgb.push(noisy.clamp(0, 255) as u8);
            }
        }
    }
    rgb
}

/// Grey pixels from a list of levels.
pub fn gray_rgb(levels: &[u8]) -> Vec<u8> {
    levels.iter().flat_map(|&v| [v, v, v]).collect()
}
