use lane_servo_core::{GrayImage, HsvImage, Mask};

use crate::gradient::GradientField;

/// Left and right lane-marking candidate masks of one frame.
///
/// An all-false mask is a valid result: no marking of that kind was found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaneMarkings {
    /// Dashed yellow marking, inner edge, left half of the frame.
    pub left: Mask,
    /// Solid white marking, inner edge, right half of the frame.
    pub right: Mask,
}

impl LaneMarkings {
    /// `(height, width)` shared by both masks.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.left.shape()
    }
}

/// Every intermediate computed while detecting one frame.
#[derive(Clone, Debug)]
pub struct LaneMarkingDebug {
    pub hsv: HsvImage,
    pub gray: GrayImage,
    pub gradient: GradientField,
    pub ground: Mask,
    pub magnitude: Mask,
    pub yellow: Mask,
    pub white: Mask,
}
