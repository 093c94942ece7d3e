mod audio;
mod cli;
mod config;
mod logging;

use std::io;
use std::process::ExitCode;

use audio::Host;
use cli::{Cli, Command};
use config::Config;
use log::error;

fn main() -> ExitCode {
    let config = Config::from_env();
    if let Err(err) = logging::init(&config) {
        eprintln!("{:#}", err);
    }

    let command = Command::parse(Cli::args().as_slice());
    let host = Host::new(&config.host);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli::run(&host, &command, &mut out) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            error!("Error writing output: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
