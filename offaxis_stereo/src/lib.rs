/*!
# Off-axis Stereo

Per-eye view and projection matrices for stereoscopic rendering on an
arbitrarily posed display surface.

Each frame the eye rig places the two eyes from the interpupillary distance
and the rig pose (toe-in or parallel), then each eye gets an asymmetric
frustum solved against the projection plane and a view matrix aligned with
that plane. With off-axis rendering disabled the eye cameras fall back to
their symmetric default lens.

## Architecture

- **ProjectionPlane**: display surface corners and axes
- **compute_frustum / compose_view**: pure off-axis math
- **EyeRig**: IPD, convergence mode and rate-limited convergence distance
- **StereoFrameDriver**: per-frame orchestration writing into `EyeCamera`s
- **HeadOffsetMapper**: head tracker samples to rig position

All math uses a right-handed frame: cameras look down -Z, +Y is up.
*/

// Internal modules
pub mod error;
pub mod log;
pub mod camera;
pub mod config;
pub mod driver;
pub mod plane;
pub mod projection;
pub mod rig;
pub mod tracking;

// Main stereo namespace module
pub mod stereo {
    // Error types
    pub use crate::error::{Error, Result};

    // Configuration
    pub use crate::config::{StereoConfig, CONVERGENCE_DISTANCE_RANGE, IPD_RANGE};

    // Frame driver
    pub use crate::driver::{EyeOutcome, FrameInputs, FrameReport, StereoFrameDriver};

    // Logging sub-module (types and registry, macros live at the crate root)
    pub mod log {
        pub use crate::log::{
            Logger, LogEntry, LogSeverity, DefaultLogger,
            set_logger, reset_logger, set_min_severity, min_severity,
        };
    }

    // Display surface geometry
    pub mod plane {
        pub use crate::plane::*;
    }

    // Off-axis math
    pub mod projection {
        pub use crate::projection::*;
    }

    // Eye rig
    pub mod rig {
        pub use crate::rig::*;
    }

    // Eye cameras
    pub mod camera {
        pub use crate::camera::*;
    }

    // Head tracking
    pub mod tracking {
        pub use crate::tracking::*;
    }
}

// Re-export math library at crate root
pub use glam;
