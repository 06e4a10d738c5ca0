//! Mask fusion.
//!
//! ```text
//! left  = ground & left_half  & magnitude & (gx < 0) & (gy < 0) & yellow
//! right = ground & right_half & magnitude & (gx > 0) & (gy < 0) & white
//! ```
//!
//! The sign pairs select the inner edge of each marking for this camera
//! mounting: the inner edge of the dashed yellow line darkens both rightwards
//! and downwards, the inner edge of the solid white line brightens rightwards
//! and darkens downwards.

use lane_servo_core::{check_same_shape, HsvImage, Mask, ShapeError};

use crate::color_range::HsvRange;
use crate::gradient::{GradientField, Sign};

/// Thresholds consumed by [`fuse_lane_masks`].
#[derive(Clone, Copy, Debug)]
pub struct FusionThresholds {
    pub edge_threshold: f32,
    pub yellow: HsvRange,
    pub white: HsvRange,
}

/// Final lane masks plus the shared sub-masks they were built from.
#[derive(Clone, Debug)]
pub struct FusedMasks {
    pub left: Mask,
    pub right: Mask,
    pub magnitude: Mask,
    pub yellow: Mask,
    pub white: Mask,
}

/// Column where the right half starts: `floor(width / 2)`.
#[inline]
pub fn split_column(width: usize) -> usize {
    width / 2
}

/// Columns `[0, floor(W/2))`.
pub fn left_half_mask(width: usize, height: usize) -> Mask {
    let split = split_column(width);
    Mask::from_fn(width, height, |x, _| x < split)
}

/// Columns `[floor(W/2), W)`.
pub fn right_half_mask(width: usize, height: usize) -> Mask {
    let split = split_column(width);
    Mask::from_fn(width, height, |x, _| x >= split)
}

/// Combine gradient, colour, spatial and ground predicates into lane masks.
pub fn fuse_lane_masks(
    gradient: &GradientField,
    hsv: &HsvImage,
    ground: &Mask,
    thresholds: &FusionThresholds,
) -> Result<FusedMasks, ShapeError> {
    let shape = (gradient.height(), gradient.width());
    check_same_shape(shape, (hsv.height, hsv.width))?;
    check_same_shape(shape, ground.shape())?;
    let (h, w) = shape;

    let magnitude = gradient.magnitude_above(thresholds.edge_threshold);
    let yellow = thresholds.yellow.mask(hsv);
    let white = thresholds.white.mask(hsv);

    let left_signs = gradient.sign_mask(Sign::Negative, Sign::Negative);
    let right_signs = gradient.sign_mask(Sign::Positive, Sign::Negative);

    let mut left = ground.clone();
    left.and_assign(&left_half_mask(w, h))?;
    left.and_assign(&magnitude)?;
    left.and_assign(&left_signs)?;
    left.and_assign(&yellow)?;

    let mut right = ground.clone();
    right.and_assign(&right_half_mask(w, h))?;
    right.and_assign(&magnitude)?;
    right.and_assign(&right_signs)?;
    right.and_assign(&white)?;

    log::debug!(
        "fusion: magnitude={} yellow={} white={} left={} right={}",
        magnitude.count(),
        yellow.count(),
        white.count(),
        left.count(),
        right.count()
    );

    Ok(FusedMasks {
        left,
        right,
        magnitude,
        yellow,
        white,
    })
}
