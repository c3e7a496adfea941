//! Headless stereo frame loop.
//!
//! Simulates a tracked head moving in front of a desk display and prints
//! the per-eye matrices the renderer would upload. Set `RUST_LOG=trace` to
//! see per-frame rig and frustum details.

use glam::{Quat, Vec2, Vec3};
use offaxis_stereo::stereo::camera::{EyeCamera, Lens};
use offaxis_stereo::stereo::log::{self as stereo_log, LogEntry, LogSeverity, Logger};
use offaxis_stereo::stereo::plane::ProjectionPlane;
use offaxis_stereo::stereo::rig::{RigTransform, StereoPair};
use offaxis_stereo::stereo::tracking::HeadOffsetMapper;
use offaxis_stereo::stereo::{EyeOutcome, FrameInputs, Result, StereoConfig, StereoFrameDriver};

const FRAME_COUNT: u64 = 240;
const DT: f32 = 1.0 / 60.0;

/// Forwards stereo log entries to the `log` facade.
struct LogBridge;

impl Logger for LogBridge {
    fn log(&self, entry: &LogEntry) {
        let level = match entry.severity {
            LogSeverity::Trace => log::Level::Trace,
            LogSeverity::Debug => log::Level::Debug,
            LogSeverity::Info => log::Level::Info,
            LogSeverity::Warn => log::Level::Warn,
            LogSeverity::Error => log::Level::Error,
        };
        match (entry.file, entry.line) {
            (Some(file), Some(line)) => {
                log::log!(target: entry.source.as_str(), level, "{} ({}:{})", entry.message, file, line)
            }
            _ => log::log!(target: entry.source.as_str(), level, "{}", entry.message),
        }
    }
}

/// Simulated face detector output: a slow figure-eight with a dropout.
fn detect_head(frame: u64) -> Option<Vec3> {
    if (100..110).contains(&frame) {
        return None;
    }
    let t = frame as f32 * DT;
    Some(Vec3::new(0.04 * t.sin(), 0.015 * (2.0 * t).sin(), 0.06))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    stereo_log::set_logger(LogBridge);
    stereo_log::set_min_severity(LogSeverity::Trace);

    // 27" display standing upright at the origin
    let plane = ProjectionPlane::from_transform(Vec3::ZERO, Quat::IDENTITY, Vec2::new(0.6, 0.34))?;
    let config = StereoConfig {
        off_axis_projection: true,
        ..StereoConfig::default()
    };
    config.validate()?;

    let mut driver = StereoFrameDriver::new(&config, Some(plane))?;
    let lens = Lens {
        aspect_ratio: plane.aspect_ratio(),
        near: 0.05,
        ..Lens::default()
    };
    let mut cameras = StereoPair::new(
        EyeCamera::new(lens, config.depth_range)?,
        EyeCamera::new(lens, config.depth_range)?,
    );

    let mut mapper = HeadOffsetMapper::new(HeadOffsetMapper::DEFAULT_POSITION_SCALE)?;
    let mut rig = RigTransform::new(Vec3::new(0.0, 0.0, 0.6), Quat::IDENTITY);

    for frame in 0..FRAME_COUNT {
        mapper.apply(detect_head(frame), &mut rig);

        let mut inputs = FrameInputs::new(rig);
        if frame == 60 {
            inputs.convergence_request = Some(1.0);
        }
        match frame {
            150 => driver.set_off_axis(false)?,
            180 => driver.set_off_axis(true)?,
            _ => {}
        }

        let report = driver.advance_frame(DT, &inputs, &mut cameras)?;

        if report.frame_index % 30 == 0 {
            log::info!(
                "frame {}: convergence {:.2}, tracking {}, off-axis {}",
                report.frame_index,
                report.convergence_distance,
                mapper.is_tracking(),
                report.is_off_axis(),
            );
            for (eye, camera) in cameras.iter() {
                if let EyeOutcome::OffAxis(frustum) = &report.outcomes[eye] {
                    log::info!(
                        "  {} frustum l {:.4} r {:.4} b {:.4} t {:.4}",
                        eye.name(), frustum.left, frustum.right, frustum.bottom, frustum.top,
                    );
                }
                log::debug!("  {} view {:?}", eye.name(), camera.view_matrix());
                log::debug!("  {} projection {:?}", eye.name(), camera.projection_matrix());
            }
        }
    }

    log::info!("Ran {} frames", driver.frame_index());
    Ok(())
}
