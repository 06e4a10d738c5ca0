//! Gaussian-smoothed Sobel gradients.
//!
//! - Smooths the grey image with a separable Gaussian (`blur`). The smoothed
//!   image stays in `f32`; it is not rounded back to 8 bits, so values close
//!   to the magnitude threshold can differ from an 8-bit blur-then-Sobel chain.
//! - Convolves the 3x3 Sobel pair with reflect-101 borders in `f32`, so
//!   negative derivatives survive.
//! - Derives `magnitude = sqrt(gx^2 + gy^2)` and orientation in degrees,
//!   `atan2(gy, gx)` mapped into `[0, 360)`.

use lane_servo_core::{check_shape, GrayImage, ImageF32, Mask, ShapeError};

use crate::blur::{gaussian_blur, reflect101, GaussianKernel1D};

type Kernel3 = [[f32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Per-pixel derivative buffers of one frame.
#[derive(Clone, Debug)]
pub struct GradientField {
    /// Horizontal derivative (positive when intensity grows to the right).
    pub gx: ImageF32,
    /// Vertical derivative (positive when intensity grows downwards).
    pub gy: ImageF32,
    /// Euclidean magnitude per pixel.
    pub magnitude: ImageF32,
    /// Direction in degrees, `[0, 360)`.
    pub orientation: ImageF32,
}

impl GradientField {
    #[inline]
    pub fn width(&self) -> usize {
        self.gx.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.gx.height
    }

    /// Pixels whose magnitude strictly exceeds `threshold`.
    pub fn magnitude_above(&self, threshold: f32) -> Mask {
        Mask::from_values(self.width(), self.height(), &self.magnitude.data, |m| {
            m > threshold
        })
    }

    /// Pixels matching the requested `(gx, gy)` sign pair.
    pub fn sign_mask(&self, x: Sign, y: Sign) -> Mask {
        let (w, h) = (self.width(), self.height());
        Mask::from_fn(w, h, |px, py| {
            let i = py * w + px;
            x.matches(self.gx.data[i]) && y.matches(self.gy.data[i])
        })
    }
}

/// Strict sign of a derivative component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    #[inline]
    pub fn matches(self, v: f32) -> bool {
        match self {
            Sign::Positive => v > 0.0,
            Sign::Negative => v < 0.0,
        }
    }
}

#[inline]
fn orientation_deg(gx: f32, gy: f32) -> f32 {
    let deg = gy.atan2(gx).to_degrees();
    let deg = if deg < 0.0 { deg + 360.0 } else { deg };
    // -0.0..-tiny can round up to exactly 360.
    if deg >= 360.0 {
        0.0
    } else {
        deg
    }
}

/// Sobel derivatives of an already smoothed image.
pub fn sobel_gradients(l: &ImageF32) -> GradientField {
    let (w, h) = (l.width, l.height);
    let mut gx = ImageF32::zeros(w, h);
    let mut gy = ImageF32::zeros(w, h);
    let mut magnitude = ImageF32::zeros(w, h);
    let mut orientation = ImageF32::zeros(w, h);

    for y in 0..h {
        let rows = [
            l.row(reflect101(y as isize - 1, h)),
            l.row(y),
            l.row(reflect101(y as isize + 1, h)),
        ];
        for x in 0..w {
            let xs = [reflect101(x as isize - 1, w), x, reflect101(x as isize + 1, w)];

            let mut sum_x = 0.0f32;
            let mut sum_y = 0.0f32;
            for (ky, row) in rows.iter().enumerate() {
                for (kx, &xi) in xs.iter().enumerate() {
                    let v = row[xi];
                    sum_x += v * SOBEL_KERNEL_X[ky][kx];
                    sum_y += v * SOBEL_KERNEL_Y[ky][kx];
                }
            }

            let i = y * w + x;
            gx.data[i] = sum_x;
            gy.data[i] = sum_y;
            magnitude.data[i] = (sum_x * sum_x + sum_y * sum_y).sqrt();
            orientation.data[i] = orientation_deg(sum_x, sum_y);
        }
    }

    GradientField {
        gx,
        gy,
        magnitude,
        orientation,
    }
}

/// Smooth `gray` with `kernel` and take Sobel derivatives.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        level = "debug",
        skip(gray, kernel),
        fields(width = gray.width, height = gray.height, sigma = kernel.sigma)
    )
)]
pub fn estimate_gradients(
    gray: &GrayImage,
    kernel: &GaussianKernel1D,
) -> Result<GradientField, ShapeError> {
    check_shape(gray.height, gray.width)?;
    let smoothed = gaussian_blur(&gray.to_f32(), kernel);
    Ok(sobel_gradients(&smoothed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ramp(w: usize, h: usize, f: impl Fn(usize, usize) -> f32) -> ImageF32 {
        let mut img = ImageF32::zeros(w, h);
        for y in 0..h {
            for x in 0..w {
                img.data[y * w + x] = f(x, y);
            }
        }
        img
    }

    #[test]
    fn horizontal_ramp_has_positive_gx_only() {
        let img = ramp(8, 6, |x, _| 10.0 * x as f32);
        let g = sobel_gradients(&img);
        // Interior: (1 + 2 + 1) * (10 * 2).
        assert_relative_eq!(g.gx.get(3, 3), 80.0);
        assert_eq!(g.gy.get(3, 3), 0.0);
        assert_relative_eq!(g.magnitude.get(3, 3), 80.0);
        assert_relative_eq!(g.orientation.get(3, 3), 0.0);
        // Reflect-101 mirrors the ramp at the border, flattening it.
        assert_eq!(g.gx.get(0, 3), 0.0);
    }

    #[test]
    fn downward_darkening_gives_negative_gy() {
        let img = ramp(6, 8, |_, y| 100.0 - 5.0 * y as f32);
        let g = sobel_gradients(&img);
        assert_relative_eq!(g.gy.get(2, 4), -40.0);
        assert_eq!(g.gx.get(2, 4), 0.0);
        assert_relative_eq!(g.orientation.get(2, 4), 270.0, epsilon = 1e-4);
    }

    #[test]
    fn magnitude_and_orientation_are_consistent() {
        let img = ramp(9, 9, |x, y| (x * x) as f32 - 3.0 * (y as f32));
        let g = sobel_gradients(&img);
        for i in 0..g.gx.data.len() {
            let (gx, gy) = (g.gx.data[i], g.gy.data[i]);
            assert_relative_eq!(g.magnitude.data[i], (gx * gx + gy * gy).sqrt());
            let o = g.orientation.data[i];
            assert!((0.0..360.0).contains(&o));
        }
    }

    #[test]
    fn orientation_wraps_into_range() {
        assert_eq!(orientation_deg(0.0, 0.0), 0.0);
        assert_relative_eq!(orientation_deg(0.0, 1.0), 90.0);
        assert_relative_eq!(orientation_deg(-1.0, 0.0), 180.0);
        assert!(orientation_deg(1.0, -1e-9) < 360.0);
    }

    #[test]
    fn sign_and_magnitude_masks() {
        let img = ramp(8, 8, |x, y| 4.0 * x as f32 - 2.0 * y as f32);
        let g = sobel_gradients(&img);
        let pos_neg = g.sign_mask(Sign::Positive, Sign::Negative);
        assert!(pos_neg.get(4, 4));
        assert!(!g.sign_mask(Sign::Negative, Sign::Negative).get(4, 4));
        assert!(g.magnitude_above(30.0).get(4, 4));
        assert!(!g.magnitude_above(1000.0).get(4, 4));
    }

    #[test]
    fn uniform_image_has_no_gradient() {
        let gray = GrayImage {
            width: 12,
            height: 10,
            data: vec![77; 120],
        };
        let kernel = GaussianKernel1D::new(4.5).unwrap();
        let g = estimate_gradients(&gray, &kernel).unwrap();
        assert!(g.magnitude.data.iter().all(|&m| m < 1e-3));
    }

    #[test]
    fn empty_input_is_rejected() {
        let gray = GrayImage {
            width: 0,
            height: 0,
            data: Vec::new(),
        };
        let kernel = GaussianKernel1D::new(4.5).unwrap();
        assert!(matches!(
            estimate_gradients(&gray, &kernel),
            Err(ShapeError::EmptyShape { .. })
        ));
    }
}
