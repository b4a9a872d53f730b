use std::{path::PathBuf, process::ExitCode};

use coordspace_core::Settings;

use crate::{error::AppError, host::Host};

mod abs;
mod error;
mod host;
mod logging;
mod scene;

/// `<config_dir>/coordspace/settings.json`, if the platform has a config dir.
fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("coordspace").join("settings.json"))
}

fn run() -> Result<(), AppError> {
    // An explicit path on the command line wins over the per-user file.
    let settings_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(default_settings_path);

    let settings = match &settings_path {
        Some(path) => Settings::load_or_default(path)?,
        None => Settings::default(),
    };

    logging::init(&settings.log)?;
    match &settings_path {
        Some(path) => log::info!("Using settings file {}", path.display()),
        None => log::warn!("No config directory, settings will not be saved"),
    }

    Host::new(settings, settings_path)?.run()
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if log::max_level() >= log::LevelFilter::Error {
                log::error!("{}", e);
            } else {
                eprintln!("error: {}", e);
            }
            ExitCode::FAILURE
        }
    }
}
