use std::{env, fs, path::PathBuf};

use image::ImageReader;
use lane_servo::detect::{detect_lane_markings_image, mask_to_gray_image};
use lane_servo::markings::{LaneDetectConfig, LaneDetectReport};

#[cfg(not(feature = "tracing"))]
use log::{info, warn, LevelFilter};

#[cfg(feature = "tracing")]
use tracing::{info, warn};

#[cfg(feature = "tracing")]
use lane_servo::core::init_tracing;
#[cfg(not(feature = "tracing"))]
use lane_servo::core::init_from_env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(not(feature = "tracing"))]
    init_from_env(LevelFilter::Info)?;
    #[cfg(not(feature = "tracing"))]
    info!("Logger initialized");

    #[cfg(feature = "tracing")]
    init_tracing(false);

    run()
}

#[cfg_attr(feature = "tracing", tracing::instrument(level = "info"))]
fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = parse_config_path();
    let cfg = LaneDetectConfig::load_json(&config_path)?;
    let detector = cfg.build_detector()?;

    let img = ImageReader::open(&cfg.image_path)?.decode()?.to_rgb8();
    let (width, height) = (img.width() as usize, img.height() as usize);
    let mut report = LaneDetectReport::new(cfg.image_path.clone(), width, height);

    let out_dir = cfg.output_dir();
    fs::create_dir_all(&out_dir)?;

    match detect_lane_markings_image(&img, &detector) {
        Ok(markings) => {
            info!(
                "left mask: {} px, right mask: {} px",
                markings.left.count(),
                markings.right.count()
            );
            mask_to_gray_image(&markings.left).save(out_dir.join("left_mask.png"))?;
            mask_to_gray_image(&markings.right).save(out_dir.join("right_mask.png"))?;
            report.set_detection(&markings, &detector)?;
        }
        Err(err) => {
            warn!("lane detection failed: {err}");
            report.set_error(err);
        }
    }

    let report_path = out_dir.join("lane_report.json");
    report.write_json(&report_path)?;
    println!("wrote report JSON to {}", report_path.display());
    Ok(())
}

fn parse_config_path() -> PathBuf {
    env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("testdata/detect_lanes_config.json"))
}
