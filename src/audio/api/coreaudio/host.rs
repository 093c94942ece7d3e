use std::ptr;

use anyhow::{anyhow, Context, Result};
use core_foundation::base::TCFType;
use core_foundation::string::{CFString, CFStringRef};
use coreaudio_sys::AudioObjectID;
use log::debug;

use super::{
    property_address, property_data_size, read_property, read_property_array, write_property,
    DEVICE_PROPERTY_STREAMS, HARDWARE_PROPERTY_DEVICES, OBJECT_PROPERTY_NAME, SCOPE_GLOBAL,
    SCOPE_OUTPUT, SYSTEM_OBJECT, VIRTUAL_MAIN_VOLUME,
};
use crate::audio::{AudioObjectId, HostTrait};

#[derive(Clone, Copy)]
pub struct Host {}

impl Host {
    pub(crate) fn new() -> Self {
        Self {}
    }
}

impl HostTrait for Host {
    fn name(&self) -> &'static str {
        "coreaudio"
    }

    fn object_ids(&self) -> Result<Vec<AudioObjectId>> {
        let address = property_address(HARDWARE_PROPERTY_DEVICES, SCOPE_GLOBAL);
        let size = property_data_size(SYSTEM_OBJECT, &address)
            .context("Failed to get device list")?;
        let ids: Vec<AudioObjectID> = unsafe { read_property_array(SYSTEM_OBJECT, &address, size) }
            .context("Failed to get device data")?;
        debug!("CoreAudio reported {} audio objects", ids.len());
        Ok(ids)
    }

    fn object_name(&self, id: AudioObjectId) -> Result<String> {
        let address = property_address(OBJECT_PROPERTY_NAME, SCOPE_GLOBAL);
        property_data_size(id, &address)
            .with_context(|| format!("Object {} has no name property", id))?;

        let mut name: CFStringRef = ptr::null();
        unsafe { read_property(id, &address, &mut name) }
            .with_context(|| format!("Error getting name of object {}", id))?;
        if name.is_null() {
            return Err(anyhow!("Object {} returned an empty name", id));
        }

        // The property getter hands over a retained reference.
        let name = unsafe { CFString::wrap_under_create_rule(name) };
        Ok(name.to_string())
    }

    fn has_output_streams(&self, id: AudioObjectId) -> bool {
        let address = property_address(DEVICE_PROPERTY_STREAMS, SCOPE_OUTPUT);
        match property_data_size(id, &address) {
            Ok(size) => size > 0,
            Err(err) => {
                debug!("Error getting output streams of object {}: {:#}", id, err);
                false
            }
        }
    }

    fn main_volume(&self, id: AudioObjectId) -> Result<f32> {
        let address = property_address(VIRTUAL_MAIN_VOLUME, SCOPE_OUTPUT);
        let mut volume: f32 = 0.0;
        unsafe { read_property(id, &address, &mut volume) }
            .with_context(|| format!("Error getting main volume of object {}", id))?;
        Ok(volume)
    }

    fn set_main_volume(&self, id: AudioObjectId, volume: f32) -> Result<()> {
        let address = property_address(VIRTUAL_MAIN_VOLUME, SCOPE_OUTPUT);
        unsafe { write_property(id, &address, &volume) }
            .with_context(|| format!("Error setting main volume of object {} to {}", id, volume))
    }
}
