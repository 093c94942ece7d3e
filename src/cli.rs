use std::ffi::OsString;
use std::io::Write;

use anyhow::Result;
use clap::Parser;
use log::{debug, info};

use crate::audio::directory::{list_devices, resolve_by_name};
use crate::audio::volume::{
    display_percent, from_percent, get_volume, set_volume, to_percent, Direction,
    DEFAULT_SET_PERCENT, DEFAULT_STEP_PERCENT,
};
use crate::audio::{HostTrait, VolumeError};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Raw positional capture. Help and version flags are disabled so that every
/// word, hyphenated or not, reaches [`Command::parse`].
#[derive(Parser, Debug)]
#[command(
    name = "mac-volume",
    disable_help_flag = true,
    disable_version_flag = true,
    disable_help_subcommand = true,
    allow_hyphen_values = true
)]
pub struct Cli {
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    /// Positional arguments after the program name; empty when the command
    /// line cannot be captured at all.
    pub fn args() -> Vec<String> {
        Self::capture(std::env::args_os())
    }

    /// `argv` includes the program name. An escape is inserted after it so a
    /// literal `--` in the first position stays a positional word.
    pub fn capture<I, T>(argv: I) -> Vec<String>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut argv = argv.into_iter().map(Into::into);
        let program = argv.next().unwrap_or_else(|| OsString::from("mac-volume"));
        let escaped = [program, OsString::from("--")].into_iter().chain(argv);
        match Cli::try_parse_from(escaped) {
            Ok(cli) => cli.args,
            Err(err) => {
                debug!("Falling back to usage: {}", err);
                vec![]
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ListDevices,
    Get {
        device: String,
    },
    Set {
        device: String,
        percent: f32,
    },
    Adjust {
        device: String,
        direction: Direction,
        amount: f32,
    },
    Help,
}

fn parse_or(value: &str, default: f32) -> f32 {
    value.parse::<f32>().unwrap_or(default)
}

impl Command {
    /// Maps the exact shape of `args` onto a command. Anything unrecognised is
    /// [`Command::Help`].
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Self {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        match args.as_slice() {
            ["list-devices"] => Command::ListDevices,
            [device, "get"] => Command::Get {
                device: device.to_string(),
            },
            [device, "set", percent] => Command::Set {
                device: device.to_string(),
                percent: parse_or(percent, DEFAULT_SET_PERCENT),
            },
            [device, verb @ ("inc" | "dec"), rest @ ..] if rest.len() <= 1 => Command::Adjust {
                device: device.to_string(),
                direction: if *verb == "inc" {
                    Direction::Up
                } else {
                    Direction::Down
                },
                amount: rest
                    .first()
                    .map_or(DEFAULT_STEP_PERCENT, |amount| parse_or(amount, DEFAULT_STEP_PERCENT)),
            },
            _ => Command::Help,
        }
    }

    /// Exit status for a failed command. `set` never fails the process and a
    /// failed write never does either.
    pub fn exit_code(&self, error: &VolumeError) -> u8 {
        match (self, error) {
            (_, VolumeError::VolumeNotSet(_)) => 0,
            (Command::Set { .. }, _) => 0,
            _ => 1,
        }
    }
}

pub fn usage() -> String {
    format!(
        "mac-volume v{VERSION} - Control the volume of a device on your mac

Usage:
  mac-volume list-devices
  mac-volume <Device Name> set <0 - 100>
  mac-volume <Device Name> get
  mac-volume <Device Name> inc [amount]
  mac-volume <Device Name> dec [amount]"
    )
}

fn get<H: HostTrait + ?Sized>(host: &H, device: &str) -> Result<String, VolumeError> {
    let id = resolve_by_name(host, device).ok_or_else(|| VolumeError::DeviceNotFound(device.to_string()))?;
    let volume = get_volume(host, id).ok_or_else(|| VolumeError::VolumeUnavailable(device.to_string()))?;
    Ok(display_percent(to_percent(volume)).to_string())
}

fn set<H: HostTrait + ?Sized>(host: &H, device: &str, percent: f32) -> Result<String, VolumeError> {
    let id = resolve_by_name(host, device).ok_or_else(|| VolumeError::DeviceNotFound(device.to_string()))?;
    if !set_volume(host, id, from_percent(percent)) {
        return Err(VolumeError::VolumeNotSet(device.to_string()));
    }
    Ok(format!("Set {} volume to {}%", device, format_percent(percent)))
}

/// Shortest round-trip float text with at least one decimal, exponents spelled
/// with a sign and two digits (`80.0`, `1e+20`, `1e-05`).
fn format_percent(percent: f32) -> String {
    let text = format!("{:?}", percent);
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => text,
    }
}

fn adjust<H: HostTrait + ?Sized>(
    host: &H,
    device: &str,
    direction: Direction,
    amount: f32,
) -> Result<String, VolumeError> {
    let id = resolve_by_name(host, device).ok_or_else(|| VolumeError::DeviceNotFound(device.to_string()))?;
    let current = get_volume(host, id)
        .ok_or_else(|| VolumeError::CurrentVolumeUnavailable(device.to_string()))?;
    let percent = direction.apply(to_percent(current), amount);
    if !set_volume(host, id, from_percent(percent)) {
        return Err(VolumeError::VolumeNotSet(device.to_string()));
    }
    Ok(format!("Set {} volume to {}%", device, display_percent(percent)))
}

/// Runs `command` against `host`, writing user-facing output to `out`, and
/// returns the process exit status.
pub fn run<H, W>(host: &H, command: &Command, out: &mut W) -> Result<u8>
where
    H: HostTrait + ?Sized,
    W: Write,
{
    debug!("Running {:?} on {}", command, host.name());

    let outcome = match command {
        Command::Help => {
            writeln!(out, "{}", usage())?;
            return Ok(0);
        }
        Command::ListDevices => {
            match list_devices(host) {
                Ok(devices) => {
                    writeln!(out, "Available output devices:")?;
                    for device in devices {
                        debug!(
                            "Object {} ({}) has output streams: {}",
                            device.id, device.name, device.has_output_streams
                        );
                        writeln!(out, "  {}", device.name)?;
                    }
                }
                Err(err) => {
                    info!("Error listing devices: {:#}", err);
                    writeln!(out, "Failed to get device list")?;
                }
            }
            return Ok(0);
        }
        Command::Get { device } => get(host, device),
        Command::Set { device, percent } => set(host, device, *percent),
        Command::Adjust {
            device,
            direction,
            amount,
        } => adjust(host, device, *direction, *amount),
    };

    match outcome {
        Ok(message) => {
            writeln!(out, "{}", message)?;
            Ok(0)
        }
        Err(err) => {
            info!("{:?} failed: {}", command, err);
            writeln!(out, "{}", err)?;
            Ok(command.exit_code(&err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::api::memory;

    fn host() -> memory::Host {
        memory::Host::new()
            .with_output(40, "MacBook Pro Speakers", 0.5)
            .with_input(41, "MacBook Pro Microphone")
            .with_output(43, "External Headphones", 0.99)
            .with_output(44, "AirPods", 0.01)
            .with_fixed_output(45, "HDMI")
            .with_read_only_output(46, "Display Audio", 0.25)
    }

    fn exec(host: &memory::Host, args: &[&str]) -> (u8, String) {
        let mut out = Vec::new();
        let code = run(host, &Command::parse(args), &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn parses_each_shape() {
        assert_eq!(Command::parse(&["list-devices"]), Command::ListDevices);
        assert_eq!(
            Command::parse(&["Speakers", "get"]),
            Command::Get { device: "Speakers".into() }
        );
        assert_eq!(
            Command::parse(&["Speakers", "set", "30"]),
            Command::Set { device: "Speakers".into(), percent: 30.0 }
        );
        assert_eq!(
            Command::parse(&["Speakers", "inc"]),
            Command::Adjust { device: "Speakers".into(), direction: Direction::Up, amount: 2.0 }
        );
        assert_eq!(
            Command::parse(&["Speakers", "dec", "7.5"]),
            Command::Adjust { device: "Speakers".into(), direction: Direction::Down, amount: 7.5 }
        );
    }

    #[test]
    fn malformed_numbers_fall_back_to_defaults() {
        assert_eq!(
            Command::parse(&["MyDevice", "set", "abc"]),
            Command::Set { device: "MyDevice".into(), percent: 50.0 }
        );
        assert_eq!(
            Command::parse(&["MyDevice", "inc", "lots"]),
            Command::Adjust { device: "MyDevice".into(), direction: Direction::Up, amount: 2.0 }
        );
        assert_eq!(
            Command::parse(&["MyDevice", "dec", ""]),
            Command::Adjust { device: "MyDevice".into(), direction: Direction::Down, amount: 2.0 }
        );
    }

    #[test]
    fn other_shapes_are_help() {
        let empty: [&str; 0] = [];
        assert_eq!(Command::parse(&empty), Command::Help);
        assert_eq!(Command::parse(&["--help"]), Command::Help);
        assert_eq!(Command::parse(&["list-devices", "now"]), Command::Help);
        assert_eq!(Command::parse(&["Speakers", "set"]), Command::Help);
        assert_eq!(Command::parse(&["Speakers", "get", "now"]), Command::Help);
        assert_eq!(Command::parse(&["Speakers", "inc", "1", "2"]), Command::Help);
        assert_eq!(Command::parse(&["Speakers", "GET"]), Command::Help);
        assert_eq!(Command::parse(&["Speakers", "mute"]), Command::Help);
    }

    #[test]
    fn list_devices_is_a_device_name_for_other_verbs() {
        assert_eq!(
            Command::parse(&["list-devices", "get"]),
            Command::Get { device: "list-devices".into() }
        );
    }

    #[test]
    fn help_prints_versioned_usage() {
        let (code, out) = exec(&host(), &["bogus"]);
        assert_eq!(code, 0);
        assert!(out.starts_with(&format!("mac-volume v{} - ", VERSION)));
        assert!(out.contains("  mac-volume <Device Name> dec [amount]\n"));
    }

    #[test]
    fn lists_output_devices_only() {
        let (code, out) = exec(&host(), &["list-devices"]);
        assert_eq!(code, 0);
        assert_eq!(
            out,
            "Available output devices:\n  MacBook Pro Speakers\n  External Headphones\n  AirPods\n  HDMI\n  Display Audio\n"
        );
        assert!(!out.contains("Microphone"));
    }

    #[test]
    fn list_failure_prints_diagnostic_and_succeeds() {
        let (code, out) = exec(&memory::Host::failing(), &["list-devices"]);
        assert_eq!(code, 0);
        assert_eq!(out, "Failed to get device list\n");
    }

    #[test]
    fn set_then_get_round_trips() {
        let host = host();
        let (code, out) = exec(&host, &["MacBook Pro Speakers", "set", "80"]);
        assert_eq!(code, 0);
        assert_eq!(out, "Set MacBook Pro Speakers volume to 80.0%\n");
        assert_eq!(exec(&host, &["MacBook Pro Speakers", "get"]), (0, "80\n".to_string()));
    }

    #[test]
    fn set_echoes_fractional_percent() {
        let host = host();
        let (_, out) = exec(&host, &["AirPods", "set", "33.5"]);
        assert_eq!(out, "Set AirPods volume to 33.5%\n");
        assert_eq!(host.volume_of(44), Some(0.335));
    }

    #[test]
    fn set_does_not_clamp() {
        let host = host();
        exec(&host, &["AirPods", "set", "150"]);
        assert_eq!(host.volume_of(44), Some(1.5));
    }

    #[test]
    fn malformed_set_writes_half_volume() {
        let host = host();
        let (_, out) = exec(&host, &["AirPods", "set", "abc"]);
        assert_eq!(out, "Set AirPods volume to 50.0%\n");
        assert_eq!(host.volume_of(44), Some(0.5));
    }

    #[test]
    fn get_truncates_toward_zero() {
        let host = memory::Host::new().with_output(1, "Speakers", 0.256);
        assert_eq!(exec(&host, &["Speakers", "get"]), (0, "25\n".to_string()));
    }

    #[test]
    fn get_works_on_devices_without_output_streams() {
        assert_eq!(exec(&host(), &["MacBook Pro Microphone", "get"]), (0, "100\n".to_string()));
    }

    #[test]
    fn increment_clamps_at_one_hundred() {
        let host = host();
        let (code, out) = exec(&host, &["External Headphones", "inc", "5"]);
        assert_eq!(code, 0);
        assert_eq!(out, "Set External Headphones volume to 100%\n");
        assert_eq!(host.volume_of(43), Some(1.0));
    }

    #[test]
    fn decrement_clamps_at_zero() {
        let host = host();
        let (code, out) = exec(&host, &["AirPods", "dec", "5"]);
        assert_eq!(code, 0);
        assert_eq!(out, "Set AirPods volume to 0%\n");
        assert_eq!(host.volume_of(44), Some(0.0));
    }

    #[test]
    fn adjust_defaults_to_two_percent() {
        assert_eq!(
            exec(&host(), &["MacBook Pro Speakers", "inc"]).1,
            "Set MacBook Pro Speakers volume to 52%\n"
        );
        assert_eq!(
            exec(&host(), &["MacBook Pro Speakers", "dec", "junk"]).1,
            "Set MacBook Pro Speakers volume to 48%\n"
        );
    }

    #[test]
    fn unknown_device_exit_codes() {
        let host = host();
        for verb in [&["Nope", "get"][..], &["Nope", "inc"][..], &["Nope", "dec", "3"][..]] {
            assert_eq!(exec(&host, verb), (1, "Device not found: Nope\n".to_string()));
        }
        assert_eq!(
            exec(&host, &["Nope", "set", "10"]),
            (0, "Device not found: Nope\n".to_string())
        );
    }

    #[test]
    fn device_names_are_case_sensitive() {
        assert_eq!(exec(&host(), &["airpods", "get"]).0, 1);
    }

    #[test]
    fn unreadable_volume_fails_get_and_adjust() {
        let host = host();
        assert_eq!(exec(&host, &["HDMI", "get"]), (1, "Failed to get volume for HDMI\n".to_string()));
        assert_eq!(
            exec(&host, &["HDMI", "inc"]),
            (1, "Failed to get current volume for HDMI\n".to_string())
        );
    }

    #[test]
    fn write_failures_exit_zero() {
        let host = host();
        assert_eq!(
            exec(&host, &["HDMI", "set", "10"]),
            (0, "Failed to set volume for HDMI\n".to_string())
        );
        assert_eq!(
            exec(&host, &["Display Audio", "dec"]),
            (0, "Failed to set volume for Display Audio\n".to_string())
        );
        assert_eq!(host.volume_of(46), Some(0.25));
    }

    #[test]
    fn captures_hyphenated_words_as_positionals() {
        let args = Cli::capture(["mac-volume", "Speakers", "dec", "-3"]);
        assert_eq!(args, vec!["Speakers", "dec", "-3"]);
        assert_eq!(
            Command::parse(args.as_slice()),
            Command::Adjust {
                device: "Speakers".into(),
                direction: Direction::Down,
                amount: -3.0,
            }
        );
    }

    #[test]
    fn leading_double_dash_is_a_device_name() {
        let args = Cli::capture(["mac-volume", "--", "get"]);
        assert_eq!(args, vec!["--", "get"]);
        assert_eq!(Command::parse(args.as_slice()), Command::Get { device: "--".into() });
        assert_eq!(
            Cli::capture(["mac-volume", "Speakers", "--", "get"]),
            vec!["Speakers", "--", "get"]
        );
        assert_eq!(Cli::capture(["mac-volume", "--help"]), vec!["--help"]);
    }

    #[test]
    fn empty_command_line_is_help() {
        let args = Cli::capture(["mac-volume"]);
        assert!(args.is_empty());
        assert_eq!(Command::parse(args.as_slice()), Command::Help);
    }

    #[test]
    fn set_confirmation_spells_exponents_in_full() {
        assert_eq!(format_percent(80.0), "80.0");
        assert_eq!(format_percent(33.5), "33.5");
        assert_eq!(format_percent(1e20), "1e+20");
        assert_eq!(format_percent(1e-5), "1e-05");
    }
}
