use super::AudioObjectId;
use anyhow::{anyhow, Result};
use log::{debug, warn};

/// Primitive queries against the platform audio subsystem. Every call goes
/// back to the OS; implementations keep no device state between calls.
pub trait HostTrait: Send + Sync {
    fn name(&self) -> &'static str;
    /// Identifiers of every audio object the subsystem knows about.
    fn object_ids(&self) -> Result<Vec<AudioObjectId>>;
    fn object_name(&self, id: AudioObjectId) -> Result<String>;
    fn has_output_streams(&self, id: AudioObjectId) -> bool;
    /// Main (non per-channel) output volume in [0, 1].
    fn main_volume(&self, id: AudioObjectId) -> Result<f32>;
    fn set_main_volume(&self, id: AudioObjectId, volume: f32) -> Result<()>;
}

#[derive(Clone, Copy)]
pub enum Host {
    None,
    #[cfg(target_os = "macos")]
    CoreAudio(super::api::coreaudio::Host),
    #[cfg(target_os = "windows")]
    Wasapi(super::api::wasapi::Host),
    #[cfg(all(target_os = "linux", feature = "alsa"))]
    Alsa(super::api::alsa::Host),
}

impl HostTrait for Host {
    fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            #[cfg(target_os = "macos")]
            Self::CoreAudio(host) => host.name(),
            #[cfg(target_os = "windows")]
            Self::Wasapi(host) => host.name(),
            #[cfg(all(target_os = "linux", feature = "alsa"))]
            Self::Alsa(host) => host.name(),
        }
    }

    fn object_ids(&self) -> Result<Vec<AudioObjectId>> {
        match self {
            Self::None => Err(anyhow!("No audio backend available")),
            #[cfg(target_os = "macos")]
            Self::CoreAudio(host) => host.object_ids(),
            #[cfg(target_os = "windows")]
            Self::Wasapi(host) => host.object_ids(),
            #[cfg(all(target_os = "linux", feature = "alsa"))]
            Self::Alsa(host) => host.object_ids(),
        }
    }

    fn object_name(&self, id: AudioObjectId) -> Result<String> {
        match self {
            Self::None => Err(anyhow!("No audio backend available for object {}", id)),
            #[cfg(target_os = "macos")]
            Self::CoreAudio(host) => host.object_name(id),
            #[cfg(target_os = "windows")]
            Self::Wasapi(host) => host.object_name(id),
            #[cfg(all(target_os = "linux", feature = "alsa"))]
            Self::Alsa(host) => host.object_name(id),
        }
    }

    fn has_output_streams(&self, id: AudioObjectId) -> bool {
        match self {
            Self::None => {
                debug!("No audio backend to query object {}", id);
                false
            }
            #[cfg(target_os = "macos")]
            Self::CoreAudio(host) => host.has_output_streams(id),
            #[cfg(target_os = "windows")]
            Self::Wasapi(host) => host.has_output_streams(id),
            #[cfg(all(target_os = "linux", feature = "alsa"))]
            Self::Alsa(host) => host.has_output_streams(id),
        }
    }

    fn main_volume(&self, id: AudioObjectId) -> Result<f32> {
        match self {
            Self::None => Err(anyhow!("No audio backend available for object {}", id)),
            #[cfg(target_os = "macos")]
            Self::CoreAudio(host) => host.main_volume(id),
            #[cfg(target_os = "windows")]
            Self::Wasapi(host) => host.main_volume(id),
            #[cfg(all(target_os = "linux", feature = "alsa"))]
            Self::Alsa(host) => host.main_volume(id),
        }
    }

    fn set_main_volume(&self, id: AudioObjectId, volume: f32) -> Result<()> {
        match self {
            Self::None => Err(anyhow!(
                "No audio backend available to set object {} to {}",
                id,
                volume
            )),
            #[cfg(target_os = "macos")]
            Self::CoreAudio(host) => host.set_main_volume(id, volume),
            #[cfg(target_os = "windows")]
            Self::Wasapi(host) => host.set_main_volume(id, volume),
            #[cfg(all(target_os = "linux", feature = "alsa"))]
            Self::Alsa(host) => host.set_main_volume(id, volume),
        }
    }
}

impl Host {
    /// Backend used when no name is configured.
    pub const fn default_name() -> &'static str {
        if cfg!(target_os = "macos") {
            "coreaudio"
        } else if cfg!(target_os = "windows") {
            "wasapi"
        } else {
            "alsa"
        }
    }

    pub(crate) fn new(name: &str) -> Self {
        match name {
            #[cfg(target_os = "macos")]
            "coreaudio" => Host::CoreAudio(super::api::coreaudio::Host::new()),
            #[cfg(target_os = "windows")]
            "wasapi" => Host::Wasapi(super::api::wasapi::Host::new()),
            #[cfg(all(target_os = "linux", feature = "alsa"))]
            "alsa" => Host::Alsa(super::api::alsa::Host::new()),
            _ => {
                warn!(
                    "Audio backend '{}' is not available in this build; no device can be reached",
                    name
                );
                Host::None
            }
        }
    }
}
