//! Separable Gaussian smoothing with reflect-101 borders.

use lane_servo_core::ImageF32;

use crate::{LaneParamsError, DEFAULT_SIGMA};

/// Largest kernel radius accepted, in pixels (sigma up to about 170).
pub const MAX_GAUSSIAN_RADIUS: usize = 512;

/// Radius of the kernel for `DEFAULT_SIGMA`.
const DEFAULT_GAUSSIAN_RADIUS: usize = 14;

/// Normalised 1D Gaussian kernel.
///
/// Conventions:
/// - `len = round(6*sigma + 1) | 1` (the 8-bit sizing rule), `radius = len / 2`.
/// - `taps` sums to 1.
#[derive(Debug, Clone)]
pub struct GaussianKernel1D {
    pub sigma: f32,
    pub radius: usize,
    pub taps: Vec<f32>,
}

impl GaussianKernel1D {
    /// Build the kernel for `sigma`.
    ///
    /// Rejects non-finite or non-positive values and any `sigma` whose radius
    /// would exceed [`MAX_GAUSSIAN_RADIUS`].
    pub fn new(sigma: f32) -> Result<Self, LaneParamsError> {
        let radius = kernel_radius(sigma).ok_or(LaneParamsError::InvalidSigma(sigma))?;
        Ok(Self::with_radius(sigma, radius))
    }

    fn with_radius(sigma: f32, radius: usize) -> Self {
        let len = 2 * radius + 1;

        let sigma2 = sigma * sigma;
        let mut taps: Vec<f32> = (0..len)
            .map(|i| {
                let x = i as f32 - radius as f32;
                (-(x * x) / (2.0 * sigma2)).exp()
            })
            .collect();

        let sum: f32 = taps.iter().sum();
        for t in &mut taps {
            *t /= sum;
        }

        log::trace!("gaussian kernel sigma={sigma} len={len}");

        Self {
            sigma,
            radius,
            taps,
        }
    }
}

impl Default for GaussianKernel1D {
    fn default() -> Self {
        Self::with_radius(DEFAULT_SIGMA, DEFAULT_GAUSSIAN_RADIUS)
    }
}

/// Radius of the kernel for `sigma`, `None` when out of range.
pub fn kernel_radius(sigma: f32) -> Option<usize> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return None;
    }
    let len = (sigma * 6.0 + 1.0).round();
    if len > (2 * MAX_GAUSSIAN_RADIUS + 1) as f32 {
        return None;
    }
    Some(((len as usize) | 1) / 2)
}

/// Reflect-101 index mapping (`...cb|abcd|cb...`).
#[inline]
pub(crate) fn reflect101(i: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let period = (2 * len - 2) as isize;
    let r = i.rem_euclid(period) as usize;
    if r < len {
        r
    } else {
        period as usize - r
    }
}

fn convolve_line(src: &[f32], kernel: &GaussianKernel1D, out: &mut [f32]) {
    let n = src.len();
    let r = kernel.radius as isize;
    for (i, out_i) in out.iter_mut().enumerate() {
        let mut acc = 0.0f32;
        for (k, &kv) in kernel.taps.iter().enumerate() {
            let idx = reflect101(i as isize + k as isize - r, n);
            acc += src[idx] * kv;
        }
        *out_i = acc;
    }
}

/// Smooth `img` with `kernel` along rows, then along columns.
pub fn gaussian_blur(img: &ImageF32, kernel: &GaussianKernel1D) -> ImageF32 {
    let (w, h) = (img.width, img.height);
    let mut horiz = ImageF32::zeros(w, h);
    for y in 0..h {
        convolve_line(img.row(y), kernel, horiz.row_mut(y));
    }

    let mut out = ImageF32::zeros(w, h);
    let mut column = vec![0.0f32; h];
    let mut smoothed = vec![0.0f32; h];
    for x in 0..w {
        for (y, c) in column.iter_mut().enumerate() {
            *c = horiz.data[y * w + x];
        }
        convolve_line(&column, kernel, &mut smoothed);
        for (y, &v) in smoothed.iter().enumerate() {
            out.data[y * w + x] = v;
        }
    }
    out
}
