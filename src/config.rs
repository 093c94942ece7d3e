use std::path::PathBuf;
use std::str::FromStr;

use log::LevelFilter;

use crate::audio::Host;

pub const LOG_LEVEL_VAR: &str = "MAC_VOLUME_LOG";
pub const LOG_FILE_VAR: &str = "MAC_VOLUME_LOG_FILE";
pub const HOST_VAR: &str = "MAC_VOLUME_HOST";

const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Warn;

/// Runtime settings. The positional command line admits no flags, so
/// everything here comes from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL,
            log_file: None,
            host: Host::default_name().to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        Self {
            log_level: var(LOG_LEVEL_VAR)
                .and_then(|level| LevelFilter::from_str(level.trim()).ok())
                .unwrap_or(defaults.log_level),
            log_file: var(LOG_FILE_VAR).map(PathBuf::from),
            host: var(HOST_VAR)
                .map(|host| host.trim().to_lowercase())
                .unwrap_or(defaults.host),
        }
    }
}
