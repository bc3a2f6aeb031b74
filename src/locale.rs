//! Locale detection and output naming for localization file names.
//!
//! Source files follow `<name>[-strings]_<locale>.<ext>`; a name without an
//! underscore is the default (English) file. Outputs are named either
//! `<name>-strings_<locale>.json`, with the locale lower-cased and
//! hyphenated, or `<name>.properties`, with `_en` dropped.

use std::fmt::{Display, Formatter};

use unic_langid::LanguageIdentifier;

use crate::error::Error;

/// Locale of files that carry no locale segment.
pub const DEFAULT_LOCALE: &str = "en";

const STRINGS_MARKER: &str = "-strings";

/// A locale token as it appears in a file name, e.g. `es` or `zh_CN`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale(String);

impl Locale {
    pub fn new(token: impl Into<String>) -> Self {
        Locale(token.into())
    }

    /// Derives the locale from a file name.
    ///
    /// The locale is the text between the first `_` and the following `.`.
    /// Names without `_` belong to [`DEFAULT_LOCALE`].
    ///
    /// ```rust
    /// use stringtab::locale::Locale;
    /// assert_eq!(Locale::from_file_name("foo-strings_es.properties")?.as_str(), "es");
    /// assert_eq!(Locale::from_file_name("foo-strings.properties")?.as_str(), "en");
    /// # Ok::<(), stringtab::Error>(())
    /// ```
    pub fn from_file_name(file_name: &str) -> Result<Self, Error> {
        let Some((_, tail)) = file_name.split_once('_') else {
            return Ok(Locale::default());
        };
        match tail.split_once('.') {
            Some(("", _)) => Err(Error::format_error(file_name, "empty locale segment")),
            Some((locale, _)) => Ok(Locale::new(locale)),
            None => Err(Error::format_error(
                file_name,
                "expected `.<extension>` after the locale segment",
            )),
        }
    }

    /// The token exactly as found in the file name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lower-cased with `_` replaced by `-`, e.g. `zh_CN` → `zh-cn`.
    pub fn to_hyphenated(&self) -> String {
        self.0.to_lowercase().replace('_', "-")
    }

    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_LOCALE
    }

    /// Parses the token as a BCP 47 language identifier, if it is one.
    pub fn language_identifier(&self) -> Option<LanguageIdentifier> {
        self.to_hyphenated().parse().ok()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::new(DEFAULT_LOCALE)
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Names the JSON output for a `.properties` source:
/// `<name>-strings_<hyphenated locale>.json`.
///
/// ```rust
/// use stringtab::locale::json_file_name;
/// assert_eq!(json_file_name("energy-skate-park-strings_zh_CN.properties")?, "energy-skate-park-strings_zh-cn.json");
/// assert_eq!(json_file_name("energy-skate-park-strings.properties")?, "energy-skate-park-strings_en.json");
/// # Ok::<(), stringtab::Error>(())
/// ```
pub fn json_file_name(source_name: &str) -> Result<String, Error> {
    let Some(marker) = source_name.find(STRINGS_MARKER) else {
        return Err(Error::format_error(
            source_name,
            format!("expected `{STRINGS_MARKER}` in the file name"),
        ));
    };
    let locale = Locale::from_file_name(source_name)?;
    Ok(format!(
        "{}{STRINGS_MARKER}_{}.json",
        &source_name[..marker],
        locale.to_hyphenated()
    ))
}

/// Names the `.properties` output for an XML source. English sources map to
/// the default, locale-less file.
///
/// ```rust
/// use stringtab::locale::properties_file_name;
/// assert_eq!(properties_file_name("ui-strings_es.xml"), "ui-strings_es.properties");
/// assert_eq!(properties_file_name("ui-strings_en.xml"), "ui-strings.properties");
/// ```
pub fn properties_file_name(source_name: &str) -> String {
    source_name
        .replace(".xml", ".properties")
        .replace("_en.properties", ".properties")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_from_file_name() {
        assert_eq!(
            Locale::from_file_name("foo-strings_es.properties").unwrap(),
            Locale::new("es")
        );
        assert_eq!(
            Locale::from_file_name("foo-strings_zh_CN.properties").unwrap(),
            Locale::new("zh_CN")
        );
    }

    #[test]
    fn test_no_underscore_is_default_locale() {
        let locale = Locale::from_file_name("foo-strings.properties").unwrap();
        assert!(locale.is_default());
        assert_eq!(locale.to_string(), "en");
    }

    #[test]
    fn test_missing_extension_after_locale_is_format_error() {
        let err = Locale::from_file_name("foo-strings_es").unwrap_err();
        assert!(matches!(err, Error::Format { .. }));
    }

    #[test]
    fn test_empty_locale_is_format_error() {
        assert!(Locale::from_file_name("foo-strings_.properties").is_err());
    }

    #[test]
    fn test_hyphenated() {
        assert_eq!(Locale::new("pt_BR").to_hyphenated(), "pt-br");
        assert_eq!(Locale::new("es").to_hyphenated(), "es");
    }

    #[test]
    fn test_language_identifier() {
        let id = Locale::new("zh_CN").language_identifier().unwrap();
        assert_eq!(id.to_string(), "zh-CN");
        assert!(Locale::new("not a locale").language_identifier().is_none());
    }

    #[test]
    fn test_json_file_name() {
        assert_eq!(
            json_file_name("foo-strings_es.properties").unwrap(),
            "foo-strings_es.json"
        );
        assert_eq!(
            json_file_name("foo-strings.properties").unwrap(),
            "foo-strings_en.json"
        );
        assert_eq!(
            json_file_name("foo-strings_pt_BR.properties").unwrap(),
            "foo-strings_pt-br.json"
        );
    }

    #[test]
    fn test_json_file_name_requires_strings_marker() {
        let err = json_file_name("foo_es.properties").unwrap_err();
        assert!(err.to_string().contains("-strings"));
    }

    #[test]
    fn test_properties_file_name() {
        assert_eq!(properties_file_name("foo-strings_fr.xml"), "foo-strings_fr.properties");
        assert_eq!(properties_file_name("foo-strings_en.xml"), "foo-strings.properties");
        assert_eq!(properties_file_name("foo-strings.xml"), "foo-strings.properties");
    }
}
