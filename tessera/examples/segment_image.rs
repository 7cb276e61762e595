//! Example: segment an image file and write the results next to it.
//!
//! Reads `TESSERA_INPUT`, segments it and writes two files into
//! `TESSERA_OUTPUT` (default `test_output/`):
//!
//! ```text
//! test_output/
//!   <name>_segments.png   every pixel painted with its segment's mean colour
//!   <name>_labels.txt     label grid, one line per row
//! ```
//!
//! Parameters come from an optional YAML file in `TESSERA_CONFIG`, then
//! `TESSERA_MIN_WEIGHT`, `TESSERA_MIN_REGION_SIZE` and `TESSERA_TILES`
//! override individual fields. Setting `TESSERA_TILES` selects the tiled path.
//!
//! # Usage
//!
//! ```bash
//! TESSERA_INPUT=photo.png TESSERA_MIN_WEIGHT=12 cargo run --release -p tessera --example segment_image
//! ```

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;

use anyhow::{Context, Result};
use common::log_setup::{LogOutput, setup_logging};
use tessera::visualize::{mean_color_image, render_label_grid};
use tessera::{Config, Execution, segment};

fn main() -> Result<()> {
    setup_logging("info", LogOutput::ConsoleOnly)?;

    let input = env::var("TESSERA_INPUT")
        .map(PathBuf::from)
        .context("TESSERA_INPUT environment variable must be set")?;
    let output_dir = env::var("TESSERA_OUTPUT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("test_output"));

    let config = load_config()?;
    tracing::info!(?config, "Segmentation parameters");

    let image = image::open(&input)
        .with_context(|| format!("failed to open {}", input.display()))?
        .into_rgb8();
    let (width, height) = (image.width() as usize, image.height() as usize);
    tracing::info!(path = %input.display(), width, height, "Loaded image");

    let start = Instant::now();
    let result = segment(image.as_raw(), width, height, &config)?;
    tracing::info!(
        segments = result.segment_count(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Segmented"
    );

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image");

    let painted = mean_color_image(image.as_raw(), &result);
    let painted_path = output_dir.join(format!("{stem}_segments.png"));
    image::save_buffer(
        &painted_path,
        &painted,
        image.width(),
        image.height(),
        image::ExtendedColorType::Rgb8,
    )
    .with_context(|| format!("failed to write {}", painted_path.display()))?;

    let grid_path = output_dir.join(format!("{stem}_labels.txt"));
    std::fs::write(&grid_path, render_label_grid(&result))
        .with_context(|| format!("failed to write {}", grid_path.display()))?;

    tracing::info!(
        segments = %painted_path.display(),
        labels = %grid_path.display(),
        "Saved outputs"
    );
    Ok(())
}

fn load_config() -> Result<Config> {
    let mut config = match env::var("TESSERA_CONFIG") {
        Ok(path) => read_yaml_config(Path::new(&path))?,
        Err(_) => Config::default(),
    };

    if let Some(min_weight) = env_number("TESSERA_MIN_WEIGHT")? {
        config.min_weight = min_weight;
    }
    if let Some(min_region_size) = env_number("TESSERA_MIN_REGION_SIZE")? {
        config.min_region_size = min_region_size;
    }
    if let Some(tiles) = env_number::<usize>("TESSERA_TILES")? {
        config.execution = Execution::Tiled { tiles: Some(tiles) };
    }

    Ok(config)
}

fn read_yaml_config(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_yml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

fn env_number<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map(Some)
            .with_context(|| format!("{name} must be a number, got '{value}'")),
        Err(_) => Ok(None),
    }
}
