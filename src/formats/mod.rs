//! All supported string-table file formats for stringtab.
//!
//! This module re-exports the format types and provides the [`FormatType`]
//! enum for selecting a format by name or file extension.

pub mod json;
pub mod properties;
pub mod xml;

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

// Reexporting the formats for easier access
pub use json::Format as JsonFormat;
pub use properties::Format as PropertiesFormat;
pub use xml::Format as XmlFormat;

use crate::Error;

/// Represents all supported string-table formats for generic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatType {
    /// Java `.properties`.
    Properties,
    /// Flat JSON object of strings.
    Json,
    /// Legacy XML `<string key=".." value=".."/>` tables.
    Xml,
}

/// Implements [`std::fmt::Display`] for [`FormatType`].
///
/// # Example
/// ```rust
/// use stringtab::formats::FormatType;
/// assert_eq!(FormatType::Properties.to_string(), "properties");
/// assert_eq!(FormatType::Json.to_string(), "json");
/// assert_eq!(FormatType::Xml.to_string(), "xml");
/// ```
impl Display for FormatType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatType::Properties => write!(f, "properties"),
            FormatType::Json => write!(f, "json"),
            FormatType::Xml => write!(f, "xml"),
        }
    }
}

/// Accepts `properties`, `json` and `xml`, case-insensitively.
///
/// # Example
/// ```rust
/// use stringtab::formats::FormatType;
/// use std::str::FromStr;
/// assert_eq!(FormatType::from_str("JSON").unwrap(), FormatType::Json);
/// assert!(FormatType::from_str("yaml").is_err());
/// ```
impl FromStr for FormatType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "properties" => Ok(FormatType::Properties),
            "json" => Ok(FormatType::Json),
            "xml" => Ok(FormatType::Xml),
            other => Err(Error::format_error(other, "unknown string-table format")),
        }
    }
}

impl FormatType {
    /// Returns the file extension for this format, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            FormatType::Properties => "properties",
            FormatType::Json => "json",
            FormatType::Xml => "xml",
        }
    }

    /// Whether `file_name` ends with this format's extension.
    pub fn matches_file_name(&self, file_name: &str) -> bool {
        file_name
            .strip_suffix(self.extension())
            .is_some_and(|stem| stem.ends_with('.'))
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_type_round_trips_through_display() {
        for format in [FormatType::Properties, FormatType::Json, FormatType::Xml] {
            assert_eq!(FormatType::from_str(&format.to_string()).unwrap(), format);
            assert_eq!(format.extension(), format.to_string());
        }
    }

    #[test]
    fn test_format_type_from_str_unknown() {
        let err = FormatType::from_str("csv").unwrap_err();
        assert!(matches!(err, Error::Format { .. }));
    }

    #[test]
    fn test_matches_file_name() {
        assert!(FormatType::Xml.matches_file_name("ui-strings_es.xml"));
        assert!(!FormatType::Xml.matches_file_name("ui-strings_es.xml.bak"));
        assert!(!FormatType::Xml.matches_file_name("notxml"));
        assert!(FormatType::Properties.matches_file_name(".properties"));
    }

}
