use std::sync::Mutex;

use anyhow::{anyhow, Result};

use crate::audio::{AudioObjectId, HostTrait};

struct Object {
    id: AudioObjectId,
    name: Option<String>,
    output_streams: bool,
    volume: Option<f32>,
    writable: bool,
}

/// In-process stand-in for the OS audio registry, used by unit tests.
#[derive(Default)]
pub struct Host {
    objects: Mutex<Vec<Object>>,
    enumeration_fails: bool,
}

impl Host {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            objects: Mutex::new(vec![]),
            enumeration_fails: true,
        }
    }

    pub fn with_output(self, id: AudioObjectId, name: &str, volume: f32) -> Self {
        self.push(Object {
            id,
            name: Some(name.to_string()),
            output_streams: true,
            volume: Some(volume),
            writable: true,
        })
    }

    /// An object without output streams, e.g. a microphone.
    pub fn with_input(self, id: AudioObjectId, name: &str) -> Self {
        self.push(Object {
            id,
            name: Some(name.to_string()),
            output_streams: false,
            volume: Some(1.0),
            writable: true,
        })
    }

    pub fn with_unnamed(self, id: AudioObjectId) -> Self {
        self.push(Object {
            id,
            name: None,
            output_streams: true,
            volume: Some(1.0),
            writable: true,
        })
    }

    /// An output whose volume property cannot be read or written.
    pub fn with_fixed_output(self, id: AudioObjectId, name: &str) -> Self {
        self.push(Object {
            id,
            name: Some(name.to_string()),
            output_streams: true,
            volume: None,
            writable: false,
        })
    }

    /// An output whose volume can be read but not written.
    pub fn with_read_only_output(self, id: AudioObjectId, name: &str, volume: f32) -> Self {
        self.push(Object {
            id,
            name: Some(name.to_string()),
            output_streams: true,
            volume: Some(volume),
            writable: false,
        })
    }

    pub fn volume_of(&self, id: AudioObjectId) -> Option<f32> {
        let objects = self.objects.lock().unwrap();
        objects.iter().find(|o| o.id == id).and_then(|o| o.volume)
    }

    fn push(self, object: Object) -> Self {
        self.objects.lock().unwrap().push(object);
        self
    }
}

impl HostTrait for Host {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn object_ids(&self) -> Result<Vec<AudioObjectId>> {
        if self.enumeration_fails {
            return Err(anyhow!("device list unavailable"));
        }
        Ok(self.objects.lock().unwrap().iter().map(|o| o.id).collect())
    }

    fn object_name(&self, id: AudioObjectId) -> Result<String> {
        let objects = self.objects.lock().unwrap();
        objects
            .iter()
            .find(|o| o.id == id)
            .and_then(|o| o.name.clone())
            .ok_or_else(|| anyhow!("object {} has no name", id))
    }

    fn has_output_streams(&self, id: AudioObjectId) -> bool {
        let objects = self.objects.lock().unwrap();
        objects.iter().any(|o| o.id == id && o.output_streams)
    }

    fn main_volume(&self, id: AudioObjectId) -> Result<f32> {
        self.volume_of(id)
            .ok_or_else(|| anyhow!("object {} has no main volume", id))
    }

    fn set_main_volume(&self, id: AudioObjectId, volume: f32) -> Result<()> {
        let mut objects = self.objects.lock().unwrap();
        match objects.iter_mut().find(|o| o.id == id && o.writable) {
            Some(object) => {
                object.volume = Some(volume);
                Ok(())
            }
            None => Err(anyhow!("object {} volume is not settable", id)),
        }
    }
}
