//! Fixed per-pixel steering weights.
//!
//! Both lane sides use the same rule: every entry is 1 except the top
//! `floor(height * top_fraction)` rows, which are 0 to ignore far-field
//! terrain. The matrices never depend on pixel data.

use lane_servo_core::{check_same_shape, check_shape, Mask, ShapeError};

/// Fraction of rows, counted from the top, that carry zero weight.
pub const DEFAULT_STEER_TOP_FRACTION: f64 = 0.3;

/// `height x width` grid of weights in `{0, 1}`, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SteeringMatrix {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl SteeringMatrix {
    /// `(height, width)` of the matrix.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    /// Sum of the element-wise product with `mask`.
    pub fn weighted_count(&self, mask: &Mask) -> Result<u64, ShapeError> {
        check_same_shape(self.shape(), mask.shape())?;
        Ok(self
            .data
            .iter()
            .zip(&mask.data)
            .filter(|&(_, &m)| m)
            .map(|(&w, _)| u64::from(w))
            .sum())
    }
}

/// Number of zero-weight rows for a matrix of `height` rows.
#[inline]
pub fn masked_top_rows(height: usize, top_fraction: f64) -> usize {
    ((height as f64 * top_fraction).floor() as usize).min(height)
}

/// Steering matrix of `(height, width)` with the top `top_fraction` of rows zeroed.
pub fn steer_matrix(
    shape: (usize, usize),
    top_fraction: f64,
) -> Result<SteeringMatrix, ShapeError> {
    let (height, width) = shape;
    check_shape(height, width)?;

    let top = masked_top_rows(height, top_fraction);
    let mut data = vec![1u8; width * height];
    data[..top * width].fill(0);

    Ok(SteeringMatrix {
        width,
        height,
        data,
    })
}

/// Weights applied to the left (dashed yellow) lane mask.
pub fn get_steer_matrix_left(shape: (usize, usize)) -> Result<SteeringMatrix, ShapeError> {
    steer_matrix(shape, DEFAULT_STEER_TOP_FRACTION)
}

/// Weights applied to the right (solid white) lane mask.
pub fn get_steer_matrix_right(shape: (usize, usize)) -> Result<SteeringMatrix, ShapeError> {
    steer_matrix(shape, DEFAULT_STEER_TOP_FRACTION)
}
