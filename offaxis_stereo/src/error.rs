//! Error types for the off-axis stereo core
//!
//! Two families of failure exist: structurally invalid configuration
//! (reported to the caller, fatal to the frame's off-axis path) and
//! degenerate geometry (recovered per eye by falling back to on-axis).

use std::fmt;

/// Result type for off-axis stereo operations
pub type Result<T> = std::result::Result<T, Error>;

/// Off-axis stereo errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Structurally invalid configuration (missing plane, bad clip range, ...)
    Configuration(String),

    /// Geometry that cannot produce a finite frustum (eye on/behind the plane,
    /// non-orthonormal axes, corners not forming a rectangle)
    DegenerateGeometry(String),
}

impl Error {
    /// True for errors the per-frame path recovers from by falling back.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::DegenerateGeometry(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            Error::DegenerateGeometry(msg) => write!(f, "Degenerate geometry: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
