//! CLI library for testing purposes

pub mod logging;

use std::path::{Path, PathBuf};

use stringtab::{Config, Error};

/// Loads the configuration file when one was given, otherwise the defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config, Error> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

/// Applies a license directory given on the command line over the
/// configured repository.
pub fn with_license_dir(mut config: Config, license_dir: Option<PathBuf>) -> Config {
    if license_dir.is_some() {
        config.licenses = config.licenses.with_repository(license_dir);
    }
    config
}
