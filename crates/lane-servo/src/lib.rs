//! High-level facade crate for the `lane-servo-*` workspace.
//!
//! This crate provides:
//! - stable re-exports of the core and lane-marking crates
//! - (feature-gated) adapters from `image` buffers to detector inputs and
//!   from detector masks back to grey images.
//!
//! ## Quickstart
//!
//! ```no_run
//! use lane_servo::detect;
//! use image::ImageReader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = ImageReader::open("frame.png")?.decode()?.to_rgb8();
//! let markings = detect::detect_lane_markings_image_default(&img)?;
//! println!("left={} right={}", markings.left.count(), markings.right.count());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `lane_servo::core`: frames, masks, homographies, logging.
//! - `lane_servo::markings`: lane-marking masks and steering matrices.
//! - `lane_servo::detect` (feature `image`): helpers over `image::RgbImage`.

pub use lane_servo_core as core;
pub use lane_servo_markings as markings;

pub use lane_servo_core::{ChannelOrder, Frame, FrameView, Mask, ShapeError};
pub use lane_servo_markings::{
    detect_lane_markings, get_steer_matrix_left, get_steer_matrix_right, LaneMarkingDetector,
    LaneMarkingParams, LaneMarkings, SteeringMatrix,
};

#[cfg(feature = "image")]
pub mod detect;
