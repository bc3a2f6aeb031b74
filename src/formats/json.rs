//! Flat JSON objects of strings, as consumed by the module-loader i18n plugin.
//!
//! The writer is intentionally not a general JSON encoder: it escapes only `"`
//! and newline and passes every other character through verbatim. Reading
//! goes through `serde_json` and keeps document order.

use std::io::{BufRead, Write};

use crate::{error::Error, traits::TableFormat, types::StringTable};

const INDENT: &str = "    ";

/// The JSON string-table format, with an optional key-substring filter
/// applied when writing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Format {
    /// Only keys containing this substring are written.
    pub key_filter: Option<String>,
}

impl Format {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key_filter(mut self, key_filter: Option<String>) -> Self {
        self.key_filter = key_filter;
        self
    }
}

impl TableFormat for Format {
    fn from_reader<R: BufRead>(reader: R) -> Result<StringTable, Error> {
        Ok(serde_json::from_reader(reader)?)
    }

    fn to_writer<W: Write>(&self, table: &StringTable, mut writer: W) -> Result<(), Error> {
        writer.write_all(render(table, self.key_filter.as_deref()).as_bytes())?;
        Ok(())
    }
}

/// Escapes `"` as `\"` and newline as `\n`. Nothing else is touched.
pub fn escape(s: &str) -> String {
    s.replace('"', "\\\"").replace('\n', "\\n")
}

/// Renders `table` as a JSON object, one entry per line, without a trailing
/// comma. An empty result renders as `{\n}`.
pub fn render(table: &StringTable, key_filter: Option<&str>) -> String {
    let body = table
        .filtered(key_filter)
        .map(|(key, value)| format!("{INDENT}\"{}\": \"{}\"", escape(key), escape(value)))
        .collect::<Vec<_>>()
        .join(",\n");

    if body.is_empty() {
        "{\n}".to_string()
    } else {
        format!("{{\n{body}\n}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table() {
        assert_eq!(render(&StringTable::new(), None), "{\n}");
    }

    #[test]
    fn test_single_entry_has_no_trailing_comma() {
        let table: StringTable = [("a", "x\"y")].into_iter().collect();
        let out = render(&table, None);
        assert_eq!(out, "{\n    \"a\": \"x\\\"y\"\n}");
        assert!(!out.contains(",\n}"));
    }

    #[test]
    fn test_multiple_entries_in_table_order() {
        let table: StringTable = [("b", "2"), ("a", "1")].into_iter().collect();
        assert_eq!(
            render(&table, None),
            "{\n    \"b\": \"2\",\n    \"a\": \"1\"\n}"
        );
    }

    #[test]
    fn test_newline_escaped_other_characters_verbatim() {
        let table: StringTable = [("k", "line1\nline2\ttab\\slash é")].into_iter().collect();
        assert_eq!(
            render(&table, None),
            "{\n    \"k\": \"line1\\nline2\ttab\\slash é\"\n}"
        );
    }

    #[test]
    fn test_key_filter() {
        let table: StringTable = [("button.label", "OK"), ("title", "Hi")]
            .into_iter()
            .collect();
        assert_eq!(
            render(&table, Some("button")),
            "{\n    \"button.label\": \"OK\"\n}"
        );
    }

    #[test]
    fn test_key_filter_matching_nothing() {
        let table: StringTable = [("title", "Hi")].into_iter().collect();
        assert_eq!(render(&table, Some("button")), "{\n}");
    }

    #[test]
    fn test_writer_uses_configured_filter() {
        let table: StringTable = [("button.ok", "OK"), ("title", "Hi")]
            .into_iter()
            .collect();
        let out = Format::new()
            .with_key_filter(Some("title".to_string()))
            .to_string(&table)
            .unwrap();
        assert_eq!(out, "{\n    \"title\": \"Hi\"\n}");
    }

    #[test]
    fn test_read_back_preserves_order() {
        let table: StringTable = [("z", "last"), ("a", "say \"hi\"\nbye")]
            .into_iter()
            .collect();
        let out = Format::new().to_string(&table).unwrap();
        assert_eq!(Format::from_str(&out).unwrap(), table);
    }

    #[test]
    fn test_read_rejects_non_string_values() {
        assert!(matches!(
            Format::from_str(r#"{"a": 1}"#),
            Err(Error::Json(_))
        ));
    }
}
