//! Ground-plane clipping of lane-marking candidates.
//!
//! The fusion stage always multiplies by a ground mask. The default provider
//! keeps every pixel; the projection mode drops pixels whose projected second
//! coordinate falls below a configured bound.

use lane_servo_core::{check_shape, Homography, Mask, ShapeError};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Bound used by [`GroundMaskMode::MinGroundY`] unless overridden.
///
/// Field-tuned against [`GroundProjection::row_first_homogeneous`]; its
/// derivation is undocumented.
pub const DEFAULT_MIN_GROUND_Y: f64 = -0.08;

/// Image-to-ground homography together with its inverse.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundProjection {
    /// Image-to-ground coefficients, rows first.
    pub image_to_ground: Homography,
    /// `None` when `image_to_ground` is singular.
    pub ground_to_image: Option<Homography>,
}

impl GroundProjection {
    pub fn new(image_to_ground: Homography) -> Self {
        Self {
            image_to_ground,
            ground_to_image: image_to_ground.inverse(),
        }
    }

    #[inline]
    pub fn is_invertible(&self) -> bool {
        self.ground_to_image.is_some()
    }

    /// `H * [row, col, 1]` without perspective division.
    ///
    /// This is the product the ground threshold was tuned on: row index
    /// first, homogeneous scale left in place.
    #[inline]
    pub fn row_first_homogeneous(&self, row: usize, col: usize) -> Vector3<f64> {
        self.image_to_ground.h * Vector3::new(row as f64, col as f64, 1.0)
    }
}

/// Produces the ground mask multiplied into both lane masks.
pub trait GroundMaskProvider {
    /// Mask of shape `height x width`; `true` keeps the pixel.
    fn ground_mask(
        &self,
        projection: &GroundProjection,
        height: usize,
        width: usize,
    ) -> Result<Mask, ShapeError>;
}

/// Built-in ground mask modes, selectable from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum GroundMaskMode {
    /// Keep every pixel.
    #[default]
    Full,
    /// Keep pixels where the second component of
    /// [`GroundProjection::row_first_homogeneous`] is at least `threshold`.
    MinGroundY {
        #[serde(default = "default_min_ground_y")]
        threshold: f64,
    },
}

fn default_min_ground_y() -> f64 {
    DEFAULT_MIN_GROUND_Y
}

impl GroundMaskProvider for GroundMaskMode {
    fn ground_mask(
        &self,
        projection: &GroundProjection,
        height: usize,
        width: usize,
    ) -> Result<Mask, ShapeError> {
        check_shape(height, width)?;
        match *self {
            GroundMaskMode::Full => Ok(Mask::filled(width, height, true)),
            GroundMaskMode::MinGroundY { threshold } => Ok(Mask::from_fn(width, height, |x, y| {
                projection.row_first_homogeneous(y, x)[1] >= threshold
            })),
        }
    }
}

impl<P: GroundMaskProvider + ?Sized> GroundMaskProvider for &P {
    fn ground_mask(
        &self,
        projection: &GroundProjection,
        height: usize,
        width: usize,
    ) -> Result<Mask, ShapeError> {
        (**self).ground_mask(projection, height, width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_IMAGE_TO_GROUND;

    fn identity_projection() -> GroundProjection {
        GroundProjection::new(Homography::identity())
    }

    #[test]
    fn full_mode_keeps_everything() {
        let m = GroundMaskMode::Full
            .ground_mask(&identity_projection(), 4, 5)
            .unwrap();
        assert_eq!(m.shape(), (4, 5));
        assert_eq!(m.count(), 20);
    }

    #[test]
    fn min_ground_y_reads_the_column_under_identity() {
        // [row, col, 1] puts the column in the second component.
        let mode = GroundMaskMode::MinGroundY { threshold: 2.0 };
        let m = mode.ground_mask(&identity_projection(), 3, 5).unwrap();
        for y in 0..3 {
            for x in 0..5 {
                assert_eq!(m.get(x, y), x >= 2, "x={x} y={y}");
            }
        }
    }

    #[test]
    fn min_ground_y_skips_perspective_division() {
        // w = 4 everywhere; dividing would halve the kept columns.
        let h = Homography::from_array([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 4.0]]);
        let projection = GroundProjection::new(h);
        let mode = GroundMaskMode::MinGroundY { threshold: 4.0 };
        let m = mode.ground_mask(&projection, 1, 8).unwrap();
        assert_eq!(m.to_u8(), vec![0, 0, 0, 0, 1, 1, 1, 1]);
    }

    #[test]
    fn default_homography_mask_matches_row_first_product() {
        let projection = GroundProjection::new(Homography::from_array(DEFAULT_IMAGE_TO_GROUND));
        let mode = GroundMaskMode::MinGroundY {
            threshold: DEFAULT_MIN_GROUND_Y,
        };
        let m = mode.ground_mask(&projection, 480, 640).unwrap();

        let [a, b, c] = DEFAULT_IMAGE_TO_GROUND[1];
        for (i, &kept) in m.data.iter().enumerate() {
            let (row, col) = ((i / 640) as f64, (i % 640) as f64);
            let zeroed = a * row + b * col + c < DEFAULT_MIN_GROUND_Y;
            assert_eq!(kept, !zeroed, "row={row} col={col}");
        }
        assert_eq!(m.count(), 165_597);
    }

    #[test]
    fn singular_homography_has_no_inverse() {
        let h = Homography::from_array([[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 0.0, 1.0]]);
        let projection = GroundProjection::new(h);
        assert!(!projection.is_invertible());
        assert!(projection.ground_to_image.is_none());
    }

    #[test]
    fn empty_shape_is_rejected() {
        assert!(GroundMaskMode::Full
            .ground_mask(&identity_projection(), 0, 3)
            .is_err());
    }

    #[test]
    fn mode_round_trips_through_json() {
        let mode: GroundMaskMode = serde_json::from_str(r#"{"mode":"min_ground_y"}"#).unwrap();
        assert_eq!(
            mode,
            GroundMaskMode::MinGroundY {
                threshold: DEFAULT_MIN_GROUND_Y
            }
        );
        let full: GroundMaskMode = serde_json::from_str(r#"{"mode":"full"}"#).unwrap();
        assert_eq!(full, GroundMaskMode::Full);
    }
}
