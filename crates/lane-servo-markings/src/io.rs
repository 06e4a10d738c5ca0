//! JSON configuration and report helpers for lane-marking detection.

use crate::{LaneMarkingDetector, LaneMarkingParams, LaneMarkings, LaneParamsError};
use lane_servo_core::ShapeError;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum LaneIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Params(#[from] LaneParamsError),
}

/// Configuration for one offline detection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaneDetectConfig {
    pub image_path: String,
    /// Directory for mask images and the report; defaults to the current one.
    #[serde(default)]
    pub output_dir: Option<String>,
    #[serde(default)]
    pub params: LaneMarkingParams,
}

impl LaneDetectConfig {
    pub fn new(image_path: impl Into<String>) -> Self {
        Self {
            image_path: image_path.into(),
            output_dir: None,
            params: LaneMarkingParams::default(),
        }
    }

    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, LaneIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), LaneIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the output directory.
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Build a detector from the configured parameters.
    pub fn build_detector(&self) -> Result<LaneMarkingDetector, LaneIoError> {
        Ok(LaneMarkingDetector::new(self.params.clone())?)
    }
}

/// Summary of one detection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaneDetectReport {
    pub image_path: String,
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub left_pixels: usize,
    #[serde(default)]
    pub right_pixels: usize,
    /// Left mask pixels that carry steering weight.
    #[serde(default)]
    pub left_weighted: u64,
    /// Right mask pixels that carry steering weight.
    #[serde(default)]
    pub right_weighted: u64,
    #[serde(default)]
    pub error: Option<String>,
}

impl LaneDetectReport {
    /// Build an empty report for an image of `width x height`.
    pub fn new(image_path: impl Into<String>, width: usize, height: usize) -> Self {
        Self {
            image_path: image_path.into(),
            width,
            height,
            left_pixels: 0,
            right_pixels: 0,
            left_weighted: 0,
            right_weighted: 0,
            error: None,
        }
    }

    /// Populate counts from a detection and its steering matrices.
    pub fn set_detection(
        &mut self,
        markings: &LaneMarkings,
        detector: &LaneMarkingDetector,
    ) -> Result<(), ShapeError> {
        let (steer_left, steer_right) = detector.steer_matrices(markings.shape())?;
        self.left_pixels = markings.left.count();
        self.right_pixels = markings.right.count();
        self.left_weighted = steer_left.weighted_count(&markings.left)?;
        self.right_weighted = steer_right.weighted_count(&markings.right)?;
        self.error = None;
        Ok(())
    }

    /// Record a detection error.
    pub fn set_error(&mut self, err: impl std::fmt::Display) {
        self.error = Some(err.to_string());
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, LaneIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), LaneIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GroundMaskMode;
    use lane_servo_core::Mask;

    #[test]
    fn config_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lane.json");

        let mut cfg = LaneDetectConfig::new("frame.png");
        cfg.params.edge_threshold = 30.0;
        cfg.params.ground = GroundMaskMode::MinGroundY { threshold: -0.1 };
        cfg.write_json(&path).unwrap();

        let loaded = LaneDetectConfig::load_json(&path).unwrap();
        assert_eq!(loaded.image_path, "frame.png");
        assert_eq!(loaded.params, cfg.params);
        assert_eq!(loaded.output_dir(), PathBuf::from("."));
        assert!(loaded.build_detector().is_ok());
    }

    #[test]
    fn minimal_config_uses_default_params() {
        let cfg: LaneDetectConfig = serde_json::from_str(r#"{ "image_path": "a.png" }"#).unwrap();
        assert_eq!(cfg.params, LaneMarkingParams::default());
    }

    #[test]
    fn invalid_params_surface_as_io_error() {
        let mut cfg = LaneDetectConfig::new("a.png");
        cfg.params.sigma = 0.0;
        assert!(matches!(
            cfg.build_detector(),
            Err(LaneIoError::Params(LaneParamsError::InvalidSigma(_)))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            LaneDetectConfig::load_json(dir.path().join("missing.json")),
            Err(LaneIoError::Io(_))
        ));
    }

    #[test]
    fn report_counts_weighted_pixels() {
        let detector = LaneMarkingDetector::with_defaults();
        let markings = LaneMarkings {
            left: Mask::from_fn(4, 10, |x, _| x == 0),
            right: Mask::filled(4, 10, false),
        };
        let mut report = LaneDetectReport::new("a.png", 4, 10);
        report.set_detection(&markings, &detector).unwrap();
        assert_eq!(report.left_pixels, 10);
        assert_eq!(report.left_weighted, 7);
        assert_eq!(report.right_pixels, 0);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        report.write_json(&path).unwrap();
        let loaded = LaneDetectReport::load_json(&path).unwrap();
        assert_eq!(loaded.left_weighted, 7);
        assert!(loaded.error.is_none());
    }
}
