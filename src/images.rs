//! HTML `<img>` tags for a directory of image assets.

use std::{fs, io::Write, path::Path};

use crate::{config::ImageConfig, error::Error};

/// Builds one `<img src="<prefix><file>"/>` tag per image file directly inside
/// `dir`, in directory-listing order (platform defined, not sorted).
/// Subdirectories are neither descended into nor listed.
///
/// # Example
///
/// ```rust,no_run
/// use stringtab::{config::ImageConfig, images::image_tags};
/// for tag in image_tags("assets/images", &ImageConfig::default())? {
///     println!("{tag}");
/// }
/// # Ok::<(), stringtab::Error>(())
/// ```
pub fn image_tags<P: AsRef<Path>>(dir: P, config: &ImageConfig) -> Result<Vec<String>, Error> {
    let mut tags = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            continue;
        }
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            tracing::debug!(path = %entry.path().display(), "skipping non UTF-8 file name");
            continue;
        };
        if config.is_image(name) {
            tags.push(img_tag(&config.prefix, name));
        }
    }
    Ok(tags)
}

/// Writes the tags from [`image_tags`] to `writer`, one per line.
pub fn write_image_tags<P: AsRef<Path>, W: Write>(
    dir: P,
    config: &ImageConfig,
    mut writer: W,
) -> Result<usize, Error> {
    let tags = image_tags(dir, config)?;
    for tag in &tags {
        writeln!(writer, "{tag}")?;
    }
    writer.flush()?;
    Ok(tags.len())
}

fn img_tag(prefix: &str, file_name: &str) -> String {
    format!("<img src=\"{prefix}{file_name}\"/>")
}
