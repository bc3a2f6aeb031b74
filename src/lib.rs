#![forbid(unsafe_code)]
//! String-table conversion toolkit for localization build pipelines.
//!
//! Reads Java `.properties` files and legacy XML string tables into one
//! ordered [`StringTable`] model and writes them back out as `.properties` or
//! as the flat JSON consumed by module-loader i18n plugins. Alongside the
//! converters live two small build helpers: an `<img>` tag lister and a
//! third-party license header generator.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use stringtab::{converter, traits::TableFormat, formats::JsonFormat, formats::PropertiesFormat};
//!
//! // Convert a whole localization directory
//! converter::xml_to_i18n("flash/localization", "html5/strings")?;
//!
//! // Or work with a single table
//! let table = PropertiesFormat::read_from("ui-strings_es.properties")?;
//! JsonFormat::new().write_to(&table, "ui-strings_es.json")?;
//! # Ok::<(), stringtab::Error>(())
//! ```
//!
//! # Supported Formats
//!
//! - **`.properties`**: Java properties, read with full escape and
//!   continuation handling, written ASCII-only
//! - **JSON**: flat objects of strings, minimally escaped on output
//! - **XML**: `<string key=".." value=".."/>` elements at any depth

pub mod config;
pub mod converter;
pub mod error;
pub mod formats;
pub mod images;
pub mod licenses;
pub mod locale;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    config::Config,
    converter::{properties_to_json, xml_to_i18n, xml_to_properties},
    error::Error,
    formats::FormatType,
    locale::Locale,
    types::StringTable,
};
