mod host;
mod utils;

pub use host::Host;

use std::{ffi::c_void, mem, ptr};

use anyhow::{anyhow, Result};
use coreaudio_sys::{
    AudioObjectGetPropertyData, AudioObjectGetPropertyDataSize, AudioObjectID,
    AudioObjectPropertyAddress, AudioObjectSetPropertyData, OSStatus,
};

use self::utils::{fourcc, status_name};

/// `kAudioObjectSystemObject`, the root of the audio object tree.
const SYSTEM_OBJECT: AudioObjectID = 1;

const HARDWARE_PROPERTY_DEVICES: u32 = fourcc(b"dev#");
const OBJECT_PROPERTY_NAME: u32 = fourcc(b"lnam");
const DEVICE_PROPERTY_STREAMS: u32 = fourcc(b"stm#");
const VIRTUAL_MAIN_VOLUME: u32 = fourcc(b"vmvc");

const SCOPE_GLOBAL: u32 = fourcc(b"glob");
const SCOPE_OUTPUT: u32 = fourcc(b"outp");
const ELEMENT_MAIN: u32 = 0;

const NO_ERR: OSStatus = 0;

fn property_address(selector: u32, scope: u32) -> AudioObjectPropertyAddress {
    AudioObjectPropertyAddress {
        mSelector: selector,
        mScope: scope,
        mElement: ELEMENT_MAIN,
    }
}

fn check(status: OSStatus) -> Result<()> {
    if status == NO_ERR {
        Ok(())
    } else {
        Err(anyhow!("{} ({})", status_name(status), status))
    }
}

fn property_data_size(
    object: AudioObjectID,
    address: &AudioObjectPropertyAddress,
) -> Result<u32> {
    let mut size = 0u32;
    check(unsafe { AudioObjectGetPropertyDataSize(object, address, 0, ptr::null(), &mut size) })?;
    Ok(size)
}

/// Reads a fixed-size property into `value`.
///
/// # Safety
/// `T` must match the layout the audio subsystem uses for the property.
unsafe fn read_property<T>(
    object: AudioObjectID,
    address: &AudioObjectPropertyAddress,
    value: &mut T,
) -> Result<()> {
    let mut size = mem::size_of::<T>() as u32;
    check(AudioObjectGetPropertyData(
        object,
        address,
        0,
        ptr::null(),
        &mut size,
        value as *mut T as *mut c_void,
    ))
}

/// Reads an array property whose byte size was obtained beforehand.
///
/// # Safety
/// `T` must match the element layout of the property.
unsafe fn read_property_array<T: Default + Clone>(
    object: AudioObjectID,
    address: &AudioObjectPropertyAddress,
    byte_size: u32,
) -> Result<Vec<T>> {
    let mut values = vec![T::default(); byte_size as usize / mem::size_of::<T>()];
    let mut size = byte_size;
    check(AudioObjectGetPropertyData(
        object,
        address,
        0,
        ptr::null(),
        &mut size,
        values.as_mut_ptr() as *mut c_void,
    ))?;
    values.truncate(size as usize / mem::size_of::<T>());
    Ok(values)
}

/// # Safety
/// `T` must match the layout the audio subsystem uses for the property.
unsafe fn write_property<T>(
    object: AudioObjectID,
    address: &AudioObjectPropertyAddress,
    value: &T,
) -> Result<()> {
    check(AudioObjectSetPropertyData(
        object,
        address,
        0,
        ptr::null(),
        mem::size_of::<T>() as u32,
        value as *const T as *const c_void,
    ))
}
