use super::AudioObjectId;

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Device {
    pub id: AudioObjectId,
    pub name: String,
    pub has_output_streams: bool,
}

impl Device {
    pub fn new(id: AudioObjectId, name: String, has_output_streams: bool) -> Self {
        Self {
            id,
            name,
            has_output_streams,
        }
    }
}
