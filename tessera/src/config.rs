//! Segmentation parameters.
//!
//! [`Config`] is a flat struct; [`Config::validate`] performs every input
//! check up front so the pipeline itself never fails.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::edges::MAX_EDGE_WEIGHT;
use crate::error::SegmentError;

/// Credit given to regions smaller than `min_region_size`.
///
/// Arithmetic on it stays infinite, so two undersized regions always merge.
pub const UNBOUNDED_CREDIT: f64 = f64::INFINITY;

/// How a region's initial growth budget is derived from its seeded state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CreditModel {
    /// `sqrt(4 * pi * size)`: the perimeter of a disc with the region's area.
    #[default]
    Area,
    /// `sqrt(4 * pi * size) * min_outside_weight`, where `min_outside_weight`
    /// is the lightest edge leaving the region after seeding. Regions in low
    /// contrast surroundings get proportionally smaller budgets.
    Contrast,
}

impl CreditModel {
    /// Credit for a region of `size` pixels whose lightest outgoing edge
    /// weighs `min_outside_weight`.
    #[inline]
    pub fn credit(self, size: u32, min_outside_weight: u32) -> f64 {
        let area_credit = (4.0 * PI * f64::from(size)).sqrt();
        match self {
            CreditModel::Area => area_credit,
            CreditModel::Contrast => area_credit * f64::from(min_outside_weight),
        }
    }

    /// Whether the credit depends on outgoing edge weights.
    #[inline]
    pub(crate) fn needs_outside_weights(self) -> bool {
        matches!(self, CreditModel::Contrast)
    }
}

/// Which pipeline runs the segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Execution {
    #[default]
    Sequential,
    /// Tiled parallel path. `None` picks one tile per rayon thread.
    Tiled { tiles: Option<usize> },
}

/// Segmentation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Edges at or below this weight are merged unconditionally.
    pub min_weight: u32,
    /// Edges above this weight are never built.
    pub max_weight: u32,
    /// Regions smaller than this keep absorbing neighbours regardless of credit.
    pub min_region_size: u32,
    pub credit_model: CreditModel,
    pub execution: Execution,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_weight: 0,
            max_weight: MAX_EDGE_WEIGHT,
            min_region_size: 1,
            credit_model: CreditModel::Area,
            execution: Execution::Sequential,
        }
    }
}

impl Config {
    /// Defaults for the tiled path, which uses the contrast-weighted credit.
    pub fn tiled_default() -> Self {
        Self {
            credit_model: CreditModel::Contrast,
            execution: Execution::Tiled { tiles: None },
            ..Self::default()
        }
    }

    /// Check the parameters against an image of `width` x `height` pixels
    /// backed by `rgb_len` bytes.
    ///
    /// A buffer longer than `width * height * 3` is accepted; trailing bytes
    /// are ignored.
    pub fn validate(&self, width: usize, height: usize, rgb_len: usize) -> Result<(), SegmentError> {
        let pixel_count = checked_pixel_count(width, height)
            .ok_or(SegmentError::InvalidDimensions { width, height })?;
        let expected = pixel_count
            .checked_mul(3)
            .ok_or(SegmentError::InvalidDimensions { width, height })?;

        if self.min_weight > self.max_weight || self.max_weight > MAX_EDGE_WEIGHT {
            return Err(SegmentError::InvalidWeightRange {
                min_weight: self.min_weight,
                max_weight: self.max_weight,
                limit: MAX_EDGE_WEIGHT,
            });
        }

        if self.min_region_size < 1 {
            return Err(SegmentError::InvalidRegionSize(self.min_region_size));
        }

        if rgb_len < expected {
            return Err(SegmentError::BufferSizeMismatch {
                expected,
                actual: rgb_len,
            });
        }

        if let Execution::Tiled { tiles: Some(0) } = self.execution {
            return Err(SegmentError::InvalidTileCount);
        }

        Ok(())
    }

    /// Initial credit of a freshly seeded region.
    #[inline]
    pub(crate) fn initial_credit(&self, size: u32, min_outside_weight: u32) -> f64 {
        if size >= self.min_region_size {
            self.credit_model.credit(size, min_outside_weight)
        } else {
            UNBOUNDED_CREDIT
        }
    }
}

/// `width * height` if both are positive and every pixel index fits in `u32`.
fn checked_pixel_count(width: usize, height: usize) -> Option<usize> {
    if width == 0 || height == 0 {
        return None;
    }
    let count = width.checked_mul(height)?;
    u32::try_from(count).ok()?;
    Some(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(Config::default().validate(4, 4, 48), Ok(()));
        assert_eq!(Config::tiled_default().validate(4, 4, 48), Ok(()));
    }

    #[test]
    fn zero_dimensions_rejected() {
        let err = Config::default().validate(0, 4, 0).unwrap_err();
        assert_eq!(
            err,
            SegmentError::InvalidDimensions {
                width: 0,
                height: 4
            }
        );
        assert!(matches!(
            Config::default().validate(4, 0, 0),
            Err(SegmentError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn pixel_count_beyond_u32_rejected() {
        let err = Config::default().validate(1 << 17, 1 << 16, usize::MAX);
        assert!(matches!(err, Err(SegmentError::InvalidDimensions { .. })));
    }

    #[test]
    fn inverted_weight_range_rejected() {
        let config = Config {
            min_weight: 20,
            max_weight: 10,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(2, 2, 12),
            Err(SegmentError::InvalidWeightRange {
                min_weight: 20,
                max_weight: 10,
                ..
            })
        ));
    }

    #[test]
    fn max_weight_above_limit_rejected() {
        let config = Config {
            max_weight: MAX_EDGE_WEIGHT + 1,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(2, 2, 12),
            Err(SegmentError::InvalidWeightRange { .. })
        ));
    }

    #[test]
    fn zero_region_size_rejected() {
        let config = Config {
            min_region_size: 0,
            ..Config::default()
        };
        assert_eq!(
            config.validate(2, 2, 12),
            Err(SegmentError::InvalidRegionSize(0))
        );
    }

    #[test]
    fn short_buffer_rejected_long_buffer_accepted() {
        assert_eq!(
            Config::default().validate(2, 2, 11),
            Err(SegmentError::BufferSizeMismatch {
                expected: 12,
                actual: 11
            })
        );
        assert_eq!(Config::default().validate(2, 2, 20), Ok(()));
    }

    #[test]
    fn zero_tiles_rejected() {
        let config = Config {
            execution: Execution::Tiled { tiles: Some(0) },
            ..Config::default()
        };
        assert_eq!(
            config.validate(2, 2, 12),
            Err(SegmentError::InvalidTileCount)
        );
    }

    #[test]
    fn credit_models() {
        let area = CreditModel::Area.credit(10, 7);
        assert!((area - (40.0 * PI).sqrt()).abs() < 1e-12);
        let contrast = CreditModel::Contrast.credit(10, 7);
        assert!((contrast - area * 7.0).abs() < 1e-9);
    }

    #[test]
    fn undersized_regions_get_unbounded_credit() {
        let config = Config {
            min_region_size: 5,
            ..Config::default()
        };
        assert_eq!(config.initial_credit(4, 10), UNBOUNDED_CREDIT);
        assert!(config.initial_credit(5, 10).is_finite());
    }

    #[test]
    fn config_from_yaml_fills_defaults() {
        let config: Config = serde_yml::from_str("min_weight: 8\nmin_region_size: 20\n")
            .expect("valid yaml");
        assert_eq!(config.min_weight, 8);
        assert_eq!(config.min_region_size, 20);
        assert_eq!(config.max_weight, MAX_EDGE_WEIGHT);
        assert_eq!(config.execution, Execution::Sequential);
    }
}
