use thiserror::Error;

/// Failures surfaced to the terminal user. The display text is the exact
/// message printed on stdout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VolumeError {
    #[error("Device not found: {0}")]
    DeviceNotFound(String),
    #[error("Failed to get volume for {0}")]
    VolumeUnavailable(String),
    #[error("Failed to get current volume for {0}")]
    CurrentVolumeUnavailable(String),
    #[error("Failed to set volume for {0}")]
    VolumeNotSet(String),
}
