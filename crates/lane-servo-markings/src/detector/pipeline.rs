use lane_servo_core::{FrameView, ShapeError};

use super::{LaneMarkingDebug, LaneMarkings};
use crate::blur::GaussianKernel1D;
use crate::color::prepare;
use crate::fusion::{fuse_lane_masks, FusionThresholds};
use crate::gradient::estimate_gradients;
use crate::ground::{GroundMaskMode, GroundMaskProvider, GroundProjection};
use crate::steering::{steer_matrix, SteeringMatrix};
use crate::{LaneMarkingParams, LaneParamsError};

/// Reusable lane-marking detector.
///
/// Holds only immutable configuration, so one detector can serve frames from
/// several threads at once.
#[derive(Clone, Debug)]
pub struct LaneMarkingDetector<G = GroundMaskMode> {
    params: LaneMarkingParams,
    kernel: GaussianKernel1D,
    projection: GroundProjection,
    ground: G,
}

impl LaneMarkingDetector {
    /// Create a detector using the ground mode named in `params`.
    pub fn new(params: LaneMarkingParams) -> Result<Self, LaneParamsError> {
        params.validate()?;
        let kernel = GaussianKernel1D::new(params.sigma)?;
        Ok(Self::from_parts(params, kernel))
    }

    /// Detector with the default parameters.
    pub fn with_defaults() -> Self {
        Self::from_parts(LaneMarkingParams::default(), GaussianKernel1D::default())
    }

    fn from_parts(params: LaneMarkingParams, kernel: GaussianKernel1D) -> Self {
        let projection = params.ground_projection();
        let ground = params.ground;
        Self {
            params,
            kernel,
            projection,
            ground,
        }
    }
}

impl Default for LaneMarkingDetector {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl<G: GroundMaskProvider> LaneMarkingDetector<G> {
    /// Replace the ground mask provider.
    pub fn with_ground_mask<P: GroundMaskProvider>(self, provider: P) -> LaneMarkingDetector<P> {
        LaneMarkingDetector {
            params: self.params,
            kernel: self.kernel,
            projection: self.projection,
            ground: provider,
        }
    }

    /// Detector parameters.
    #[inline]
    pub fn params(&self) -> &LaneMarkingParams {
        &self.params
    }

    /// Ground projection handed to the ground mask provider.
    #[inline]
    pub fn projection(&self) -> &GroundProjection {
        &self.projection
    }

    #[inline]
    pub fn ground_provider(&self) -> &G {
        &self.ground
    }

    /// Detect left and right lane-marking masks in one frame.
    pub fn detect(&self, frame: &FrameView<'_>) -> Result<LaneMarkings, ShapeError> {
        self.detect_with_debug(frame).map(|(markings, _)| markings)
    }

    /// Same as [`detect`](Self::detect), also returning every intermediate.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            level = "info",
            skip(self, frame),
            fields(width = frame.width, height = frame.height)
        )
    )]
    pub fn detect_with_debug(
        &self,
        frame: &FrameView<'_>,
    ) -> Result<(LaneMarkings, LaneMarkingDebug), ShapeError> {
        let prepared = prepare(frame)?;
        let gradient = estimate_gradients(&prepared.gray, &self.kernel)?;
        let ground = self
            .ground
            .ground_mask(&self.projection, frame.height, frame.width)?;

        let thresholds = FusionThresholds {
            edge_threshold: self.params.edge_threshold,
            yellow: self.params.yellow,
            white: self.params.white,
        };
        let fused = fuse_lane_masks(&gradient, &prepared.hsv, &ground, &thresholds)?;

        log::debug!(
            "lane markings {}x{}: ground={} left={} right={}",
            frame.width,
            frame.height,
            ground.count(),
            fused.left.count(),
            fused.right.count()
        );

        let markings = LaneMarkings {
            left: fused.left,
            right: fused.right,
        };
        let debug = LaneMarkingDebug {
            hsv: prepared.hsv,
            gray: prepared.gray,
            gradient,
            ground,
            magnitude: fused.magnitude,
            yellow: fused.yellow,
            white: fused.white,
        };
        Ok((markings, debug))
    }

    /// Left and right steering matrices for `(height, width)`, using the
    /// configured top fraction.
    pub fn steer_matrices(
        &self,
        shape: (usize, usize),
    ) -> Result<(SteeringMatrix, SteeringMatrix), ShapeError> {
        let left = steer_matrix(shape, self.params.steer_top_fraction)?;
        let right = left.clone();
        Ok((left, right))
    }
}
