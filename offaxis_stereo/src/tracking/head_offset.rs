/// Head-tracked rig offset.
///
/// A face/head detector reports the head's offset from the display in
/// tracker units. The mapper runs each detection through a [`Smoother`]
/// (moving average, one-euro, ... supplied by the caller) and scales it into
/// world units to position the rig. An empty detection leaves the rig where
/// it was.

use glam::Vec3;
use crate::error::Result;
use crate::rig::RigTransform;
use crate::{stereo_bail, stereo_trace};

/// Temporal filter over head offset samples.
pub trait Smoother: Send {
    /// Filter one sample, returning the smoothed value.
    fn smooth(&mut self, sample: Vec3) -> Vec3;

    /// Forget filter history (e.g. after tracking was lost).
    fn reset(&mut self) {}
}

/// Smoother that returns samples unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl Smoother for PassThrough {
    fn smooth(&mut self, sample: Vec3) -> Vec3 {
        sample
    }
}

/// Maps detected head offsets to the rig position.
pub struct HeadOffsetMapper {
    position_scale: f32,
    origin: Vec3,
    smoother: Box<dyn Smoother>,
    tracking: bool,
}

impl HeadOffsetMapper {
    /// Tracker units to world units.
    pub const DEFAULT_POSITION_SCALE: f32 = 10.0;

    /// # Errors
    ///
    /// `Configuration` if `position_scale` is not finite.
    pub fn new(position_scale: f32) -> Result<Self> {
        if !position_scale.is_finite() {
            stereo_bail!(Configuration, "offaxis::HeadOffsetMapper",
                "position_scale must be finite (got {})", position_scale);
        }
        Ok(Self::with_scale(position_scale))
    }

    fn with_scale(position_scale: f32) -> Self {
        Self {
            position_scale,
            origin: Vec3::ZERO,
            smoother: Box::new(PassThrough),
            tracking: false,
        }
    }

    /// Use `smoother` for subsequent samples.
    pub fn with_smoother<S: Smoother + 'static>(mut self, smoother: S) -> Self {
        self.smoother = Box::new(smoother);
        self
    }

    /// World position the scaled offset is added to.
    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    pub fn position_scale(&self) -> f32 {
        self.position_scale
    }

    /// True while the last detection contained a face.
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Map a detection to a world position.
    ///
    /// `None`, the zero vector and non-finite samples mean "no face" and
    /// return `None`; the smoother history is reset so the next detection
    /// does not blend with stale samples.
    pub fn map(&mut self, detection: Option<Vec3>) -> Option<Vec3> {
        let sample = match detection {
            Some(sample) if sample != Vec3::ZERO && sample.is_finite() => sample,
            _ => {
                if self.tracking {
                    stereo_trace!("offaxis::HeadOffsetMapper", "Head tracking lost");
                    self.smoother.reset();
                }
                self.tracking = false;
                return None;
            }
        };

        self.tracking = true;
        Some(self.origin + self.smoother.smooth(sample) * self.position_scale)
    }

    /// Move `rig` to the mapped position. Returns false (rig untouched)
    /// when there is no face.
    pub fn apply(&mut self, detection: Option<Vec3>, rig: &mut RigTransform) -> bool {
        match self.map(detection) {
            Some(position) => {
                rig.position = position;
                true
            }
            None => false,
        }
    }
}

impl Default for HeadOffsetMapper {
    fn default() -> Self {
        Self::with_scale(Self::DEFAULT_POSITION_SCALE)
    }
}

#[cfg(test)]
#[path = "head_offset_tests.rs"]
mod tests;
