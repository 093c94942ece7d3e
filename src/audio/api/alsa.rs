use ::alsa::card::{self, Card};
use ::alsa::mixer::{Mixer, Selem, SelemChannelId, SelemId};
use anyhow::{anyhow, Context, Result};
use log::debug;

use crate::audio::{AudioObjectId, HostTrait};

/// Simple mixer elements tried, in order, as a card's main volume.
const MAIN_ELEMENTS: [&str; 4] = ["Master", "PCM", "Speaker", "Headphone"];

/// Sound cards stand in for audio objects; the card index is the object id.
#[derive(Clone, Copy)]
pub struct Host {}

impl Host {
    pub(crate) fn new() -> Self {
        Self {}
    }

    fn mixer(id: AudioObjectId) -> Result<Mixer> {
        Mixer::new(&format!("hw:{}", id), false)
            .with_context(|| format!("Error opening mixer of card {}", id))
    }
}

fn main_element(mixer: &Mixer) -> Option<Selem<'_>> {
    for name in MAIN_ELEMENTS {
        if let Some(selem) = mixer.find_selem(&SelemId::new(name, 0)) {
            if selem.has_playback_volume() {
                return Some(selem);
            }
        }
    }
    mixer
        .iter()
        .filter_map(Selem::new)
        .find(|selem| selem.has_playback_volume())
}

fn normalize(raw: i64, (min, max): (i64, i64)) -> f32 {
    if max <= min {
        return 0.0;
    }
    (raw - min) as f32 / (max - min) as f32
}

fn denormalize(volume: f32, (min, max): (i64, i64)) -> i64 {
    min + (volume * (max - min) as f32).round() as i64
}

impl HostTrait for Host {
    fn name(&self) -> &'static str {
        "alsa"
    }

    fn object_ids(&self) -> Result<Vec<AudioObjectId>> {
        let mut ids = vec![];
        for card in card::Iter::new() {
            let card = card.context("Error enumerating sound cards")?;
            ids.push(card.get_index() as AudioObjectId);
        }
        Ok(ids)
    }

    fn object_name(&self, id: AudioObjectId) -> Result<String> {
        Card::new(id as i32)
            .get_name()
            .with_context(|| format!("Error getting name of card {}", id))
    }

    fn has_output_streams(&self, id: AudioObjectId) -> bool {
        match Self::mixer(id) {
            Ok(mixer) => main_element(&mixer).is_some(),
            Err(err) => {
                debug!("{:#}", err);
                false
            }
        }
    }

    fn main_volume(&self, id: AudioObjectId) -> Result<f32> {
        let mixer = Self::mixer(id)?;
        let selem = main_element(&mixer).ok_or_else(|| anyhow!("Card {} has no playback volume", id))?;
        let raw = selem
            .get_playback_volume(SelemChannelId::mono())
            .with_context(|| format!("Error getting playback volume of card {}", id))?;
        Ok(normalize(raw, selem.get_playback_volume_range()))
    }

    fn set_main_volume(&self, id: AudioObjectId, volume: f32) -> Result<()> {
        let mixer = Self::mixer(id)?;
        let selem = main_element(&mixer).ok_or_else(|| anyhow!("Card {} has no playback volume", id))?;
        let raw = denormalize(volume, selem.get_playback_volume_range());
        selem
            .set_playback_volume_all(raw)
            .with_context(|| format!("Error setting playback volume of card {} to {}", id, raw))
    }
}
