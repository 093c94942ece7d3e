use log::debug;

use super::{AudioObjectId, HostTrait};

pub const DEFAULT_SET_PERCENT: f32 = 50.0;
pub const DEFAULT_STEP_PERCENT: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Moves `percent` by `amount` and clamps the result to [0, 100].
    pub fn apply(self, percent: f32, amount: f32) -> f32 {
        let moved = match self {
            Direction::Up => percent + amount,
            Direction::Down => percent - amount,
        };
        moved.clamp(0.0, 100.0)
    }
}

pub fn get_volume<H: HostTrait + ?Sized>(host: &H, device: AudioObjectId) -> Option<f32> {
    match host.main_volume(device) {
        Ok(volume) => Some(volume),
        Err(err) => {
            debug!("Error reading volume of object {}: {:#}", device, err);
            None
        }
    }
}

/// Writes `volume` as given; callers are responsible for any clamping.
pub fn set_volume<H: HostTrait + ?Sized>(host: &H, device: AudioObjectId, volume: f32) -> bool {
    match host.set_main_volume(device, volume) {
        Ok(()) => true,
        Err(err) => {
            debug!("Error writing volume {} to object {}: {:#}", volume, device, err);
            false
        }
    }
}

#[inline]
pub fn to_percent(volume: f32) -> f32 {
    volume * 100.0
}

#[inline]
pub fn from_percent(percent: f32) -> f32 {
    percent / 100.0
}

/// Integer percentage as displayed, rounded toward zero.
#[inline]
pub fn display_percent(percent: f32) -> i32 {
    percent as i32
}
