//! All error types for the stringtab crate.
//!
//! These are returned from all fallible operations (loading, parsing, writing,
//! file-name decoding and orchestration). Every orchestrator aborts on the
//! first error it sees.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    #[error("malformed XML: {0}")]
    MalformedXml(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid file name `{name}`: {message}")]
    Format { name: String, message: String },

    #[error("cannot read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest {}: {message}", path.display())]
    Manifest { path: PathBuf, message: String },

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Creates a new properties parse error at the given (1-based) line.
    pub fn parse_error(line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            message: message.into(),
        }
    }

    /// Creates a new file-name convention error.
    pub fn format_error(name: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Format {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path that could not be read.
    pub fn file_read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a new manifest error for the manifest at `path`.
    pub fn manifest_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Manifest {
            path: path.into(),
            message: message.into(),
        }
    }
}
