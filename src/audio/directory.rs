use anyhow::Result;
use log::{debug, warn};

use super::{AudioObjectId, Device, HostTrait};

/// Output-capable devices, in the order the host reports them.
///
/// Objects whose name cannot be read are skipped. An error is returned only
/// when the host cannot enumerate its objects at all.
pub fn list_devices<H: HostTrait + ?Sized>(host: &H) -> Result<Vec<Device>> {
    let mut devices = vec![];
    for id in host.object_ids()? {
        if !host.has_output_streams(id) {
            continue;
        }
        match host.object_name(id) {
            Ok(name) => devices.push(Device::new(id, name, true)),
            Err(err) => debug!("Skipping object {}: {:#}", id, err),
        }
    }
    Ok(devices)
}

/// First object whose name equals `name` exactly.
///
/// Every object is considered, including those without output streams.
pub fn resolve_by_name<H: HostTrait + ?Sized>(host: &H, name: &str) -> Option<AudioObjectId> {
    let ids = match host.object_ids() {
        Ok(ids) => ids,
        Err(err) => {
            warn!("Error enumerating audio objects on {}: {:#}", host.name(), err);
            return None;
        }
    };

    ids.into_iter().find(|&id| match host.object_name(id) {
        Ok(object_name) => object_name == name,
        Err(err) => {
            debug!("Error reading name of object {}: {:#}", id, err);
            false
        }
    })
}
