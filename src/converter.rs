//! Directory-level conversions between string-table formats.
//!
//! Each function is a fail-fast batch job: matching files are processed in
//! file-name order and the first error aborts the run, leaving whatever was
//! already written in place.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    error::Error,
    formats::{FormatType, JsonFormat, PropertiesFormat, XmlFormat},
    locale::{Locale, json_file_name, properties_file_name},
    traits::TableFormat,
};

const STRINGS_MARKER: &str = "-strings";

/// Lists the regular files directly inside `dir` whose name satisfies
/// `accept`, sorted by file name.
pub(crate) fn list_files<F>(dir: &Path, accept: F) -> Result<Vec<(String, PathBuf)>, Error>
where
    F: Fn(&str) -> bool,
{
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            tracing::debug!(path = %entry.path().display(), "skipping non UTF-8 file name");
            continue;
        };
        if accept(&name) {
            files.push((name, entry.path()));
        }
    }
    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files)
}

/// Converts every `*-strings*.properties` file in `source` into a JSON file in
/// `destination`, named by [`json_file_name`].
///
/// When `key_filter` is given, only keys containing it are written.
/// Returns the paths written.
///
/// # Example
///
/// ```rust,no_run
/// use stringtab::converter::properties_to_json;
/// let written = properties_to_json("localization", "strings", Some("button"))?;
/// println!("wrote {} files", written.len());
/// # Ok::<(), stringtab::Error>(())
/// ```
pub fn properties_to_json<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    destination: Q,
    key_filter: Option<&str>,
) -> Result<Vec<PathBuf>, Error> {
    let destination = destination.as_ref();
    fs::create_dir_all(destination)?;

    let json = JsonFormat::new().with_key_filter(key_filter.map(str::to_string));
    let files = list_files(source.as_ref(), |name| {
        FormatType::Properties.matches_file_name(name) && name.contains(STRINGS_MARKER)
    })?;

    let mut written = Vec::with_capacity(files.len());
    for (name, path) in files {
        let locale = Locale::from_file_name(&name)?;
        if locale.language_identifier().is_none() {
            tracing::warn!(file = %name, locale = %locale, "locale is not a valid language identifier");
        }

        let table = PropertiesFormat::read_from(&path)?;
        let output = destination.join(json_file_name(&name)?);
        json.write_to(&table, &output)?;

        tracing::info!(
            source = %path.display(),
            output = %output.display(),
            entries = table.len(),
            "converted properties to JSON"
        );
        written.push(output);
    }
    Ok(written)
}

/// Converts every `*.xml` string table in `source` into a `.properties` file
/// in `destination`, named by [`properties_file_name`]. Returns the paths
/// written.
pub fn xml_to_properties<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    destination: Q,
) -> Result<Vec<PathBuf>, Error> {
    let destination = destination.as_ref();
    fs::create_dir_all(destination)?;

    let files = list_files(source.as_ref(), |name| FormatType::Xml.matches_file_name(name))?;

    let mut written = Vec::with_capacity(files.len());
    for (name, path) in files {
        let table = XmlFormat::read_from(&path)?;
        let output = destination.join(properties_file_name(&name));
        PropertiesFormat::new()
            .with_header(format!("Converted from {name}"))
            .write_to(&table, &output)?;

        tracing::info!(
            source = %path.display(),
            output = %output.display(),
            entries = table.len(),
            "converted XML to properties"
        );
        written.push(output);
    }
    Ok(written)
}

/// Converts XML string tables straight to module-loader JSON files by running
/// [`xml_to_properties`] into a temporary directory and then
/// [`properties_to_json`] from it.
///
/// The temporary directory is removed when this function returns, whether it
/// succeeds or fails.
pub fn xml_to_i18n<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    destination: Q,
) -> Result<Vec<PathBuf>, Error> {
    xml_to_i18n_in(std::env::temp_dir(), source, destination)
}

/// Like [`xml_to_i18n`], with the temporary directory created inside
/// `staging_parent`.
pub fn xml_to_i18n_in<S, P, Q>(
    staging_parent: S,
    source: P,
    destination: Q,
) -> Result<Vec<PathBuf>, Error>
where
    S: AsRef<Path>,
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let staging = tempfile::Builder::new()
        .prefix("stringtab-")
        .tempdir_in(staging_parent)?;
    tracing::debug!(staging = %staging.path().display(), "created staging directory");

    xml_to_properties(source, staging.path())?;
    let written = properties_to_json(staging.path(), destination, None)?;

    staging.close()?;
    Ok(written)
}
