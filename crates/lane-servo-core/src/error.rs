/// Structural errors for frames, masks and weight matrices.
///
/// Shapes are reported as `(height, width)` pairs.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("empty frame (width={width}, height={height})")]
    EmptyFrame { width: usize, height: usize },

    #[error("unsupported channel count {got} (expected 3)")]
    ChannelCount { got: usize },

    #[error("frame too large to address (width={width}, height={height})")]
    FrameTooLarge { width: usize, height: usize },

    #[error("invalid pixel buffer length (expected {expected} bytes, got {got})")]
    BufferLength { expected: usize, got: usize },

    #[error("empty shape (height={height}, width={width})")]
    EmptyShape { height: usize, width: usize },

    #[error("shape mismatch (expected {expected:?}, got {got:?})")]
    Mismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },
}

/// Reject zero-sized `(height, width)` shapes.
pub fn check_shape(height: usize, width: usize) -> Result<(), ShapeError> {
    if height == 0 || width == 0 {
        return Err(ShapeError::EmptyShape { height, width });
    }
    Ok(())
}

/// Reject two shapes that differ.
pub fn check_same_shape(
    expected: (usize, usize),
    got: (usize, usize),
) -> Result<(), ShapeError> {
    if expected != got {
        return Err(ShapeError::Mismatch { expected, got });
    }
    Ok(())
}
