//! Tool configuration, loadable from a TOML file.
//!
//! ```toml
//! [licenses]
//! repository = "licenses"
//! exclude = ["howler", "tween"]
//!
//! [images]
//! extensions = ["png", "jpg", "svg"]
//! prefix = "images/"
//! ```
//!
//! Every field is optional and falls back to the defaults below.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Error;

/// Dependencies whose licenses are never written into the license header.
pub const DEFAULT_LICENSE_EXCLUDES: &[&str] = &[
    "base64-binary",
    "howler",
    "json2",
    "numeric",
    "seedrandom",
    "tween",
    "revealjs",
];

pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "svg"];

pub const DEFAULT_IMAGE_PREFIX: &str = "images/";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub licenses: LicenseConfig,
    pub images: ImageConfig,
}

impl Config {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, Error> {
        toml::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// Loads a configuration file. Relative license repository paths are
    /// resolved against the file's directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&text)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

        if let Some(base) = path.parent() {
            config.licenses.repository = config
                .licenses
                .repository
                .map(|repo| if repo.is_relative() { base.join(repo) } else { repo });
        }
        Ok(config)
    }
}

/// Settings for the license header generator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LicenseConfig {
    /// Directory holding one subdirectory per third-party dependency.
    pub repository: Option<PathBuf>,
    /// Dependency names left out of the header even when used in production.
    pub exclude: Vec<String>,
}

impl Default for LicenseConfig {
    fn default() -> Self {
        Self {
            repository: None,
            exclude: DEFAULT_LICENSE_EXCLUDES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl LicenseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repository(mut self, repository: Option<PathBuf>) -> Self {
        self.repository = repository;
        self
    }

    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }

    /// The configured repository, or a `Config` error when none was given.
    pub fn require_repository(&self) -> Result<&Path, Error> {
        self.repository.as_deref().ok_or_else(|| {
            Error::Config(
                "no license repository given; pass it as an argument or set `licenses.repository`"
                    .to_string(),
            )
        })
    }

    pub fn is_excluded(&self, dependency: &str) -> bool {
        self.exclude.iter().any(|name| name == dependency)
    }
}

/// Settings for the image tag generator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageConfig {
    /// Extensions (without dot) matched case-insensitively.
    pub extensions: Vec<String>,
    /// Prepended to each file name in the `src` attribute.
    pub prefix: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_IMAGE_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            prefix: DEFAULT_IMAGE_PREFIX.to_string(),
        }
    }
}

impl ImageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn is_image(&self, file_name: &str) -> bool {
        Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}
