use lane_servo_core::{Homography, Hsv};
use serde::{Deserialize, Serialize};

use crate::blur::kernel_radius;
use crate::color_range::HsvRange;
use crate::ground::{GroundMaskMode, GroundProjection};
use crate::steering::DEFAULT_STEER_TOP_FRACTION;
use crate::LaneParamsError;

/// Gaussian smoothing strength applied before differentiation.
pub const DEFAULT_SIGMA: f32 = 4.5;

/// Minimum gradient magnitude (exclusive) for an edge pixel.
pub const DEFAULT_EDGE_THRESHOLD: f32 = 50.0;

/// Dashed yellow marking: H 20..=40, S 30..=255, V 100..=255.
pub const DEFAULT_YELLOW_RANGE: HsvRange =
    HsvRange::new(Hsv::new(20, 30, 100), Hsv::new(40, 255, 255));

/// Solid white marking: H 0..=230, S 0..=70, V 200..=255.
pub const DEFAULT_WHITE_RANGE: HsvRange =
    HsvRange::new(Hsv::new(0, 0, 200), Hsv::new(230, 70, 255));

/// Image-to-ground homography of the reference camera mounting (row-major rows).
pub const DEFAULT_IMAGE_TO_GROUND: [[f64; 3]; 3] = [
    [
        -4.137917960301845e-05,
        -0.00011445854191468058,
        -0.1595567007347241,
    ],
    [
        0.0008382870319844166,
        -4.141689222457687e-05,
        -0.2518201638170328,
    ],
    [
        -0.00023561657746150284,
        -0.005370140574116084,
        0.9999999999999999,
    ],
];

/// Every tunable of the lane-marking pipeline.
///
/// Missing fields in serialized configs fall back to the defaults above.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneMarkingParams {
    /// Standard deviation of the Gaussian pre-filter, in pixels.
    pub sigma: f32,
    /// Gradient magnitude a pixel must exceed.
    pub edge_threshold: f32,
    /// Colour bounds for the left (dashed yellow) marking.
    pub yellow: HsvRange,
    /// Colour bounds for the right (solid white) marking.
    pub white: HsvRange,
    /// Fraction of rows zeroed at the top of the steering matrices.
    pub steer_top_fraction: f64,
    /// Fixed image-to-ground homography, rows first.
    pub image_to_ground: [[f64; 3]; 3],
    /// Ground clipping applied to both lane masks.
    pub ground: GroundMaskMode,
}

impl Default for LaneMarkingParams {
    fn default() -> Self {
        Self {
            sigma: DEFAULT_SIGMA,
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
            yellow: DEFAULT_YELLOW_RANGE,
            white: DEFAULT_WHITE_RANGE,
            steer_top_fraction: DEFAULT_STEER_TOP_FRACTION,
            image_to_ground: DEFAULT_IMAGE_TO_GROUND,
            ground: GroundMaskMode::default(),
        }
    }
}

impl LaneMarkingParams {
    /// Check numeric ranges and homography invertibility.
    pub fn validate(&self) -> Result<(), LaneParamsError> {
        if kernel_radius(self.sigma).is_none() {
            return Err(LaneParamsError::InvalidSigma(self.sigma));
        }
        if !self.edge_threshold.is_finite() || self.edge_threshold < 0.0 {
            return Err(LaneParamsError::InvalidEdgeThreshold(self.edge_threshold));
        }
        if !(0.0..=1.0).contains(&self.steer_top_fraction) {
            return Err(LaneParamsError::InvalidTopFraction(
                self.steer_top_fraction,
            ));
        }
        if !self.ground_projection().is_invertible() {
            return Err(LaneParamsError::SingularHomography);
        }
        Ok(())
    }

    /// Configured homography paired with its inverse.
    pub fn ground_projection(&self) -> GroundProjection {
        GroundProjection::new(Homography::from_array(self.image_to_ground))
    }
}
