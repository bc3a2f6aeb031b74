//! Aggregation of third-party license texts into one license header.
//!
//! The license repository holds one directory per dependency:
//!
//! ```text
//! licenses/
//!   easeljs/
//!     package.json   {"license": "MIT", "production": true}
//!     license.txt
//!   qunit/
//!     package.json   {"license": "MIT", "production": false}
//!     license.txt
//! ```
//!
//! Only dependencies shipped in production and not on the exclude list make
//! it into the header.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{config::LicenseConfig, error::Error};

pub const MANIFEST_FILE: &str = "package.json";
pub const LICENSE_FILE: &str = "license.txt";

/// Separates the license sections of the header.
pub const BANNER: &str = "######################################################";

/// One dependency's license as it appears in the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseEntry {
    /// Dependency name, taken from its directory name.
    pub name: String,
    /// License identifier from the manifest, trimmed and upper-cased.
    pub license_type: String,
    /// Raw contents of the dependency's license file.
    pub text: String,
}

/// The manifest fields the header generator reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub license: String,
    pub production: bool,
}

#[derive(Deserialize)]
struct RawManifest {
    license: Option<String>,
    production: Option<bool>,
}

impl Manifest {
    /// Parses manifest JSON. `path` only labels errors.
    pub fn parse(text: &str, path: &Path) -> Result<Self, Error> {
        let raw: RawManifest = serde_json::from_str(text)
            .map_err(|e| Error::manifest_error(path, e.to_string()))?;
        let missing = |field: &str| Error::manifest_error(path, format!("missing field `{field}`"));

        Ok(Manifest {
            license: raw.license.ok_or_else(|| missing("license"))?,
            production: raw.production.ok_or_else(|| missing("production"))?,
        })
    }

    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let text =
            fs::read_to_string(path).map_err(|e| Error::manifest_error(path, e.to_string()))?;
        Self::parse(&text, path)
    }

    pub fn license_type(&self) -> String {
        self.license.trim().to_uppercase()
    }
}

fn dependency_dirs(repository: &Path) -> Result<Vec<(String, PathBuf)>, Error> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(repository)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            dirs.push((name.to_string(), entry.path()));
        }
    }
    dirs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(dirs)
}

/// Reads every dependency in the configured repository, in name order, and
/// returns the ones that belong in the header.
pub fn collect_licenses(config: &LicenseConfig) -> Result<Vec<LicenseEntry>, Error> {
    let repository = config.require_repository()?;

    let mut entries = Vec::new();
    for (name, dir) in dependency_dirs(repository)? {
        let manifest = Manifest::read_from(dir.join(MANIFEST_FILE))?;
        if !manifest.production {
            tracing::debug!(dependency = %name, "skipping dependency not used in production");
            continue;
        }
        if config.is_excluded(&name) {
            tracing::debug!(dependency = %name, "skipping excluded dependency");
            continue;
        }

        let license_type = manifest.license_type();
        let license_path = dir.join(LICENSE_FILE);
        let text = fs::read_to_string(&license_path)
            .map_err(|e| Error::file_read_error(&license_path, e))?;
        tracing::info!(dependency = %name, license = %license_type, "including license");
        entries.push(LicenseEntry {
            text,
            name,
            license_type,
        });
    }
    Ok(entries)
}

/// Concatenates the entries, each introduced by [`BANNER`] and a
/// `<name>: <TYPE>` line. Leading and trailing whitespace is trimmed from the
/// result.
pub fn render_license_header(entries: &[LicenseEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push('\n');
        out.push_str(BANNER);
        out.push('\n');
        out.push_str(&format!("{}: {}\n", entry.name, entry.license_type));
        out.push_str(&entry.text);
        out.push('\n');
    }
    out.trim().to_string()
}

/// Collects and renders the license header for the configured repository.
pub fn generate_license_header(config: &LicenseConfig) -> Result<String, Error> {
    Ok(render_license_header(&collect_licenses(config)?))
}
