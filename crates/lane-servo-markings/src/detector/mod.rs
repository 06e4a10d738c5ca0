//! Lane-marking detection pipeline.
//!
//! This module wires together colour preparation, gradient estimation, ground
//! clipping and mask fusion behind one reusable detector value.

mod pipeline;
mod result;

pub use pipeline::LaneMarkingDetector;
pub use result::{LaneMarkingDebug, LaneMarkings};
