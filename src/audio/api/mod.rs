#[cfg(target_os = "macos")]
pub mod coreaudio;
#[cfg(target_os = "windows")]
pub mod wasapi;
#[cfg(all(target_os = "linux", feature = "alsa"))]
pub mod alsa;
#[cfg(test)]
pub mod memory;
