use std::fs::OpenOptions;

use anyhow::{Context, Result};
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};

use crate::config::Config;

/// Stdout belongs to the command output, so records go to stderr or to the
/// configured log file.
fn build_logger(config: &Config) -> Result<Box<dyn SharedLogger>> {
    let log_config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Debug)
        .build();

    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Error opening log file {}", path.display()))?;
            Ok(WriteLogger::new(config.log_level, log_config, file))
        }
        None => Ok(TermLogger::new(
            config.log_level,
            log_config,
            TerminalMode::Stderr,
            ColorChoice::Auto,
        )),
    }
}

pub fn init(config: &Config) -> Result<()> {
    if config.log_level == LevelFilter::Off {
        return Ok(());
    }
    CombinedLogger::init(vec![build_logger(config)?]).context("Error installing logger")
}
