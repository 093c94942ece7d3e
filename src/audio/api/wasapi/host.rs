use anyhow::{Context, Result};
use log::debug;
use windows::core::Interface;
use windows::Win32::{
    Media::Audio::{eRender, Endpoints::IAudioEndpointVolume, IMMEndpoint},
    System::Com::CLSCTX_ALL,
};

use super::{endpoint, endpoints, friendly_name};
use crate::audio::{AudioObjectId, HostTrait};

#[derive(Clone, Copy)]
pub struct Host {}

impl Host {
    pub(crate) fn new() -> Self {
        Self {}
    }

    fn endpoint_volume(id: AudioObjectId) -> Result<IAudioEndpointVolume> {
        let device = endpoint(id)?;
        unsafe { device.Activate::<IAudioEndpointVolume>(CLSCTX_ALL, None) }
            .with_context(|| format!("Error activating endpoint volume on {}", id))
    }
}

impl HostTrait for Host {
    fn name(&self) -> &'static str {
        "wasapi"
    }

    fn object_ids(&self) -> Result<Vec<AudioObjectId>> {
        let collection = endpoints()?;
        let count = unsafe { collection.GetCount() }.context("Error counting devices")?;
        Ok((0..count).collect())
    }

    fn object_name(&self, id: AudioObjectId) -> Result<String> {
        friendly_name(&endpoint(id)?)
    }

    fn has_output_streams(&self, id: AudioObjectId) -> bool {
        let flow = endpoint(id).and_then(|device| {
            let mm_endpoint = device.cast::<IMMEndpoint>()?;
            Ok(unsafe { mm_endpoint.GetDataFlow() }?)
        });
        match flow {
            Ok(flow) => flow == eRender,
            Err(err) => {
                debug!("Error getting data flow of endpoint {}: {:#}", id, err);
                false
            }
        }
    }

    fn main_volume(&self, id: AudioObjectId) -> Result<f32> {
        let volume = Self::endpoint_volume(id)?;
        unsafe { volume.GetMasterVolumeLevelScalar() }
            .with_context(|| format!("Error getting main volume of endpoint {}", id))
    }

    fn set_main_volume(&self, id: AudioObjectId, level: f32) -> Result<()> {
        let volume = Self::endpoint_volume(id)?;
        unsafe { volume.SetMasterVolumeLevelScalar(level, std::ptr::null()) }
            .with_context(|| format!("Error setting main volume of endpoint {} to {}", id, level))
    }
}
