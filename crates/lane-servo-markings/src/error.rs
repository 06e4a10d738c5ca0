/// Invalid pipeline configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LaneParamsError {
    #[error("gaussian sigma must be finite, > 0 and give a kernel radius <= 512 (got {0})")]
    InvalidSigma(f32),
    #[error("edge threshold must be finite and >= 0 (got {0})")]
    InvalidEdgeThreshold(f32),
    #[error("steering top fraction must lie in [0, 1] (got {0})")]
    InvalidTopFraction(f64),
    #[error("image-to-ground homography is singular")]
    SingularHomography,
}
