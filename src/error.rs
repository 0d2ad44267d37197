//! Error types.

use alloc::string::String;

/// Invalid widget configuration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Ratio string is not `none`, `square` or `N:N` with 1-2 digit terms.
    #[error("don't know what to do with ratio {0:?}")]
    UnknownRatio(String),
    /// Ratio string has a zero numerator or denominator.
    #[error("ratio {0:?} has a zero term")]
    ZeroRatio(String),
}

/// Failure reported by a [`CaptureSource`](crate::CaptureSource).
///
/// Passed through to widget subscribers unchanged. Nothing retries.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    /// The user refused camera access.
    #[error("camera access denied")]
    PermissionDenied,
    /// No capture device is present.
    #[error("no capture device found")]
    NoDevice,
    /// The device failed while starting or grabbing a frame.
    #[error("capture device failed: {0}")]
    Device(String),
}

/// A widget operation was called in a stage that does not support it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("`{operation}` is not valid while {stage}")]
pub struct StateError {
    pub operation: &'static str,
    pub stage: crate::iconic::Stage,
}
