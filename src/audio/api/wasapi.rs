mod com;
mod host;

pub use host::Host;

use anyhow::{anyhow, Context, Result};
use windows::Win32::{
    Devices::FunctionDiscovery::PKEY_Device_FriendlyName,
    Media::Audio::{
        eAll, IMMDevice, IMMDeviceCollection, IMMDeviceEnumerator, MMDeviceEnumerator,
        DEVICE_STATE_ACTIVE,
    },
    System::Com::{CoCreateInstance, CoTaskMemFree, CLSCTX_ALL, STGM_READ},
    UI::Shell::PropertiesSystem::{IPropertyStore, PropVariantToStringAlloc},
};

use self::com::com_initialize;
use crate::audio::AudioObjectId;

/// Active endpoints of both data flows; the index in this collection is the
/// object id handed out to callers.
fn endpoints() -> Result<IMMDeviceCollection> {
    com_initialize();
    unsafe {
        let enumerator: IMMDeviceEnumerator = CoCreateInstance(&MMDeviceEnumerator, None, CLSCTX_ALL)
            .context("Error getting device enumerator")?;
        enumerator
            .EnumAudioEndpoints(eAll, DEVICE_STATE_ACTIVE)
            .context("Error getting device list")
    }
}

fn endpoint(id: AudioObjectId) -> Result<IMMDevice> {
    let collection = endpoints()?;
    let count = unsafe { collection.GetCount() }?;
    if id >= count {
        return Err(anyhow!("No endpoint at index {} ({} active)", id, count));
    }
    unsafe { collection.Item(id) }.with_context(|| format!("Error getting endpoint {}", id))
}

fn friendly_name(device: &IMMDevice) -> Result<String> {
    unsafe {
        let property_store: IPropertyStore = device
            .OpenPropertyStore(STGM_READ)
            .context("Error opening property store")?;
        let name_property_value = property_store
            .GetValue(&PKEY_Device_FriendlyName)
            .context("Error getting device name")?;
        let raw_name = PropVariantToStringAlloc(&name_property_value)
            .context("Property store produced invalid data")?;
        let name = raw_name.to_string();
        CoTaskMemFree(Some(raw_name.0 as *const _));
        Ok(name?)
    }
}
