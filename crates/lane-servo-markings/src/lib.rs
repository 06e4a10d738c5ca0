//! Lane-marking masks and steering weights for reactive lane following.
//!
//! ## Quickstart
//!
//! ```
//! use lane_servo_core::{ChannelOrder, Frame};
//! use lane_servo_markings::{detect_lane_markings, get_steer_matrix_left};
//!
//! let frame = Frame::filled(64, 48, ChannelOrder::Bgr, [0, 0, 0]).unwrap();
//! let markings = detect_lane_markings(&frame.view()).unwrap();
//! let steer = get_steer_matrix_left(markings.shape()).unwrap();
//! assert_eq!(steer.weighted_count(&markings.left).unwrap(), 0);
//! ```
//!
//! Pipeline, per frame:
//! 1. Convert the frame to 8-bit HSV (colour tests) and BT.601 grey.
//! 2. Smooth the grey image with a Gaussian (sigma 4.5 by default).
//! 3. Take 3x3 Sobel derivatives `gx`, `gy`, their magnitude and orientation.
//! 4. Fuse per-pixel predicates into two masks:
//!    - left: ground, left half, strong edge, `gx < 0`, `gy < 0`, yellow;
//!    - right: ground, right half, strong edge, `gx > 0`, `gy < 0`, white.
//!
//! Steering matrices are independent of pixel data: ones everywhere except
//! the top 30 % of rows.

mod blur;
mod color;
mod color_range;
mod detector;
mod error;
mod fusion;
mod gradient;
mod ground;
mod io;
mod params;
mod steering;

pub use blur::{gaussian_blur, kernel_radius, GaussianKernel1D, MAX_GAUSSIAN_RADIUS};
pub use color::{prepare, rgb_to_gray, rgb_to_hsv, to_gray, to_hsv, PreparedFrame};
pub use color_range::HsvRange;
pub use detector::{LaneMarkingDebug, LaneMarkingDetector, LaneMarkings};
pub use error::LaneParamsError;
pub use fusion::{
    fuse_lane_masks, left_half_mask, right_half_mask, split_column, FusedMasks, FusionThresholds,
};
pub use gradient::{estimate_gradients, sobel_gradients, GradientField, Sign};
pub use ground::{GroundMaskMode, GroundMaskProvider, GroundProjection, DEFAULT_MIN_GROUND_Y};
pub use io::{LaneDetectConfig, LaneDetectReport, LaneIoError};
pub use params::{
    LaneMarkingParams, DEFAULT_EDGE_THRESHOLD, DEFAULT_IMAGE_TO_GROUND, DEFAULT_SIGMA,
    DEFAULT_WHITE_RANGE, DEFAULT_YELLOW_RANGE,
};
pub use steering::{
    get_steer_matrix_left, get_steer_matrix_right, masked_top_rows, steer_matrix,
    SteeringMatrix, DEFAULT_STEER_TOP_FRACTION,
};

use lane_servo_core::{FrameView, ShapeError};

/// Detect left (dashed yellow) and right (solid white) lane-marking masks
/// with the default parameters.
pub fn detect_lane_markings(frame: &FrameView<'_>) -> Result<LaneMarkings, ShapeError> {
    LaneMarkingDetector::with_defaults().detect(frame)
}
