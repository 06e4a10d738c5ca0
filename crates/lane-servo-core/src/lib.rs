//! Core types for visual lane servoing.
//!
//! This crate is intentionally small: camera frames, single-channel and HSV
//! images, boolean masks, plane homographies and the structural error type.
//! It carries no detection logic.

mod error;
mod frame;
mod homography;
mod image;
mod logger;
mod mask;

pub use error::{check_same_shape, check_shape, ShapeError};
pub use frame::{ChannelOrder, Frame, FrameView, FRAME_CHANNELS};
pub use homography::Homography;
pub use image::{GrayImage, Hsv, HsvImage, ImageF32};
pub use mask::Mask;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_from_env, init_with_level, parse_level, LOG_ENV_VAR};
