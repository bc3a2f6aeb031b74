//! Support for Java `.properties` files.
//!
//! Loading follows `java.util.Properties.load`: logical lines joined by
//! trailing backslashes, `#`/`!` comments, `=`/`:`/whitespace separators and
//! `\uXXXX` escapes. Writing follows `Properties.store`, emitting pure ASCII
//! so the output is readable as both ISO-8859-1 and UTF-8.
//!
//! Input bytes are decoded as UTF-8 (or the encoding named by a BOM), falling
//! back to ISO-8859-1 when they are not valid UTF-8.

use std::{
    borrow::Cow,
    io::{BufRead, Write},
    str::Chars,
};

use encoding_rs::Encoding;

use crate::{error::Error, traits::TableFormat, types::StringTable};

/// The `.properties` format, with an optional comment header for writing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Format {
    /// Comment lines written before the entries, each prefixed with `#`.
    pub header: Option<String>,
}

impl Format {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }
}

impl TableFormat for Format {
    fn from_reader<R: BufRead>(mut reader: R) -> Result<StringTable, Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        parse(&decode(&bytes))
    }

    fn to_writer<W: Write>(&self, table: &StringTable, mut writer: W) -> Result<(), Error> {
        let mut content = String::new();

        if let Some(header) = &self.header {
            write_comment(&mut content, header);
        }

        for (key, value) in table.iter() {
            escape_into(&mut content, key, true);
            content.push('=');
            escape_into(&mut content, value, false);
            content.push('\n');
        }

        writer.write_all(content.as_bytes())?;
        Ok(())
    }
}

fn decode(bytes: &[u8]) -> Cow<'_, str> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return text;
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => encoding_rs::mem::decode_latin1(bytes),
    }
}

/// Parses decoded `.properties` text into a table. Later duplicates win.
pub fn parse(text: &str) -> Result<StringTable, Error> {
    let mut table = StringTable::new();
    for (line_no, line) in logical_lines(text) {
        let (raw_key, raw_value) = split_key_value(&line);
        let key = unescape(raw_key, line_no)?;
        let value = unescape(raw_value, line_no)?;
        table.insert(key, value);
    }
    Ok(table)
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// Splits on `\n`, `\r\n` and `\r`, yielding 1-based line numbers.
fn natural_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut rest = text;
    let mut line_no = 0;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        line_no += 1;
        let (line, next) = match rest.find(['\n', '\r']) {
            Some(i) if rest[i..].starts_with("\r\n") => (&rest[..i], &rest[i + 2..]),
            Some(i) => (&rest[..i], &rest[i + 1..]),
            None => (rest, ""),
        };
        rest = next;
        Some((line_no, line))
    })
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Joins continued lines and drops blanks and comments.
fn logical_lines(text: &str) -> Vec<(usize, String)> {
    let mut out = Vec::new();
    let mut lines = natural_lines(text);

    while let Some((line_no, line)) = lines.next() {
        let mut current = line.trim_start_matches(is_whitespace);
        if current.is_empty() || current.starts_with(['#', '!']) {
            continue;
        }

        let mut logical = String::new();
        loop {
            if !ends_with_continuation(current) {
                logical.push_str(current);
                break;
            }
            logical.push_str(&current[..current.len() - 1]);
            match lines.next() {
                Some((_, next)) => current = next.trim_start_matches(is_whitespace),
                None => break,
            }
        }
        out.push((line_no, logical));
    }
    out
}

/// Returns the still-escaped key and value of one logical line.
fn split_key_value(line: &str) -> (&str, &str) {
    let mut key_end = line.len();
    let mut value_start = line.len();
    let mut has_separator = false;
    let mut preceding_backslash = false;

    for (i, c) in line.char_indices() {
        if !preceding_backslash {
            if c == '=' || c == ':' {
                key_end = i;
                value_start = i + 1;
                has_separator = true;
                break;
            }
            if is_whitespace(c) {
                key_end = i;
                value_start = i + c.len_utf8();
                break;
            }
        }
        preceding_backslash = c == '\\' && !preceding_backslash;
    }

    let rest = &line[value_start..];
    let mut value = "";
    for (i, c) in rest.char_indices() {
        if is_whitespace(c) {
            continue;
        }
        if !has_separator && (c == '=' || c == ':') {
            has_separator = true;
            continue;
        }
        value = &rest[i..];
        break;
    }

    (&line[..key_end], value)
}

fn read_hex4(chars: &mut Chars<'_>) -> Option<u16> {
    let mut unit = 0u16;
    for _ in 0..4 {
        let digit = chars.next()?.to_digit(16)?;
        unit = (unit << 4) | digit as u16;
    }
    Some(unit)
}

fn unescape(raw: &str, line: usize) -> Result<String, Error> {
    let unpaired = || Error::parse_error(line, "unpaired UTF-16 surrogate in \\uxxxx escape");

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    let mut high_surrogate: Option<u16> = None;

    while let Some(c) = chars.next() {
        let decoded = if c == '\\' {
            match chars.next() {
                Some('u') => {
                    let unit = read_hex4(&mut chars)
                        .ok_or_else(|| Error::parse_error(line, "malformed \\uxxxx encoding"))?;
                    match (high_surrogate.take(), unit) {
                        (None, 0xD800..=0xDBFF) => {
                            high_surrogate = Some(unit);
                            continue;
                        }
                        (Some(high), 0xDC00..=0xDFFF) => char::decode_utf16([high, unit])
                            .next()
                            .and_then(Result::ok)
                            .ok_or_else(unpaired)?,
                        (Some(_), _) | (None, 0xDC00..=0xDFFF) => return Err(unpaired()),
                        (None, unit) => char::from_u32(u32::from(unit)).ok_or_else(unpaired)?,
                    }
                }
                Some('t') => '\t',
                Some('n') => '\n',
                Some('r') => '\r',
                Some('f') => '\x0c',
                Some(other) => other,
                None => break,
            }
        } else {
            c
        };

        if high_surrogate.is_some() {
            return Err(unpaired());
        }
        out.push(decoded);
    }

    if high_surrogate.is_some() {
        return Err(unpaired());
    }
    Ok(out)
}

fn push_unicode_escape(out: &mut String, c: char) {
    let mut units = [0u16; 2];
    for unit in c.encode_utf16(&mut units) {
        out.push_str(&format!("\\u{:04X}", unit));
    }
}

/// Escapes `s` the way `Properties.store` does. Keys escape every space,
/// values only a leading one.
fn escape_into(out: &mut String, s: &str, is_key: bool) {
    for (i, c) in s.chars().enumerate() {
        match c {
            ' ' if i == 0 || is_key => out.push_str("\\ "),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            c if !(' '..='~').contains(&c) => push_unicode_escape(out, c),
            c => out.push(c),
        }
    }
}

fn write_comment(out: &mut String, comment: &str) {
    for line in comment.lines() {
        out.push('#');
        for c in line.chars() {
            if c.is_ascii() {
                out.push(c);
            } else {
                push_unicode_escape(out, c);
            }
        }
        out.push('\n');
    }
    if comment.is_empty() {
        out.push_str("#\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn load(text: &str) -> StringTable {
        Format::from_str(text).unwrap()
    }

    #[test]
    fn test_parse_basic_separators() {
        let table = load(indoc! {"
            a=1
            b: 2
            c 3
            d   =   4
            e
        "});
        assert_eq!(table.get("a"), Some("1"));
        assert_eq!(table.get("b"), Some("2"));
        assert_eq!(table.get("c"), Some("3"));
        assert_eq!(table.get("d"), Some("4"));
        assert_eq!(table.get("e"), Some(""));
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let table = load(indoc! {"
            # a comment
            ! another comment

               # indented comment
            key=value
        "});
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("key"), Some("value"));
    }

    #[test]
    fn test_continuation_lines() {
        let table = load("fruits = apple, banana, \\\n    cherry, \\\n    date\nnext=1\n");
        assert_eq!(table.get("fruits"), Some("apple, banana, cherry, date"));
        assert_eq!(table.get("next"), Some("1"));
    }

    #[test]
    fn test_even_backslashes_do_not_continue() {
        let table = load("path=c:\\\\\nnext=1\n");
        assert_eq!(table.get("path"), Some("c:\\"));
        assert_eq!(table.get("next"), Some("1"));
    }

    #[test]
    fn test_hash_inside_continuation_is_value_text() {
        let table = load("a=one \\\n  # not a comment\n");
        assert_eq!(table.get("a"), Some("one # not a comment"));
    }

    #[test]
    fn test_escapes() {
        let table = load("k\\ ey\\=x=tab\\there\\nnew\\u00e9\\q\n");
        assert_eq!(table.get("k ey=x"), Some("tab\there\nnewéq"));
    }

    #[test]
    fn test_surrogate_pair_escape() {
        let table = load("emoji=\\uD83D\\uDE00\n");
        assert_eq!(table.get("emoji"), Some("😀"));
    }

    #[test]
    fn test_malformed_unicode_escape_is_parse_error() {
        let err = Format::from_str("ok=1\nbad=\\u12G4\n").unwrap_err();
        match err {
            Error::Parse { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("malformed"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_lone_surrogate_is_parse_error() {
        assert!(matches!(
            Format::from_str("x=\\uD83D\n"),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let table = load("a=1\nb=2\na=3\n");
        assert_eq!(table.get("a"), Some("3"));
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_crlf_and_cr_line_endings() {
        let table = load("a=1\r\nb=2\rc=3");
        assert_eq!(table.get("a"), Some("1"));
        assert_eq!(table.get("b"), Some("2"));
        assert_eq!(table.get("c"), Some("3"));
    }

    #[test]
    fn test_latin1_fallback() {
        let bytes = b"name=caf\xe9\n";
        let table = Format::from_bytes(bytes).unwrap();
        assert_eq!(table.get("name"), Some("café"));
    }

    #[test]
    fn test_utf8_and_bom() {
        let table = Format::from_bytes("\u{feff}name=café\n".as_bytes()).unwrap();
        assert_eq!(table.get("name"), Some("café"));
    }

    #[test]
    fn test_write_escapes() {
        let table: StringTable = [
            ("a key", " leading and inner space"),
            ("sep=:", "#!\\"),
            ("ctl", "a\tb\nc\rd\x0ce"),
            ("uni", "é😀"),
        ]
        .into_iter()
        .collect();
        let out = Format::new().to_string(&table).unwrap();
        assert_eq!(
            out,
            indoc! {r#"
                a\ key=\ leading and inner space
                sep\=\:=\#\!\\
                ctl=a\tb\nc\rd\fe
                uni=\u00E9\uD83D\uDE00
            "#}
        );
    }

    #[test]
    fn test_write_header() {
        let table: StringTable = [("a", "1")].into_iter().collect();
        let out = Format::new()
            .with_header("Converted from ui-strings.xml\nsecond line")
            .to_string(&table)
            .unwrap();
        assert_eq!(out, "#Converted from ui-strings.xml\n#second line\na=1\n");

        let empty = Format::new().with_header("").to_string(&table).unwrap();
        assert_eq!(empty, "#\na=1\n");
    }

    #[test]
    fn test_round_trip() {
        let table: StringTable = [
            ("simple", "value"),
            ("spaces ", "  padded  "),
            ("symbols", "a=b:c#d!e\\f"),
            ("multi", "line one\nline two"),
            ("unicode", "日本語 ✓"),
            ("", "empty key"),
        ]
        .into_iter()
        .collect();
        let out = Format::new().to_string(&table).unwrap();
        assert_eq!(Format::from_str(&out).unwrap(), table);
    }
}
