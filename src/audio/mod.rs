pub(crate) mod api;
pub(crate) mod device;
pub(crate) mod directory;
pub(crate) mod error;
pub(crate) mod host;
pub(crate) mod volume;

pub use device::Device;
pub use error::VolumeError;
pub use host::{Host, HostTrait};

/// Opaque handle the audio subsystem assigns to a device, stream or control.
pub type AudioObjectId = u32;
