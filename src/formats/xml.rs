//! Support for legacy XML string-translation files.
//!
//! Every element named `string`, wherever it is nested, contributes one entry
//! built from its `key` and `value` attributes:
//!
//! ```xml
//! <strings>
//!   <string key="title" value="Energy Skate Park"/>
//!   <group><string key="play" value="Play"/></group>
//! </strings>
//! ```
//!
//! A missing attribute reads as the empty string. When a key repeats, the
//! later element wins.
//!
//! Documents are decoded with the encoding named in their XML declaration
//! (UTF-8 when there is none). Attribute values are normalized the XML 1.0
//! way: literal tabs, line feeds and carriage returns read as spaces, while
//! the character references `&#9;`, `&#10;` and `&#13;` keep them. The writer
//! emits those references, so tables survive a write/read cycle unchanged.
//!
//! General entities declared in an internal DOCTYPE subset
//! (`<!ENTITY app "Skate">`) are expanded in attribute values. External
//! and parameter entities are not loaded.

use std::{
    borrow::Cow,
    collections::HashMap,
    io::{BufRead, Write},
};

use quick_xml::{
    Reader, Writer,
    encoding::Decoder,
    escape::{escape, resolve_predefined_entity, unescape, unescape_with},
    events::{BytesDecl, BytesEnd, BytesStart, Event, attributes::Attribute},
    name::QName,
};

use crate::{error::Error, traits::TableFormat, types::StringTable};

/// The XML string-table format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Format;

impl TableFormat for Format {
    fn from_reader<R: BufRead>(reader: R) -> Result<StringTable, Error> {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut table = StringTable::new();
        let mut depth = 0usize;
        let mut seen_root = false;
        let mut entities = Entities::default();

        loop {
            let decoder = xml_reader.decoder();
            match xml_reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => {
                    enter_element(depth, &mut seen_root)?;
                    depth += 1;
                    collect_string(e, decoder, &entities, &mut table)?;
                }
                Event::Empty(ref e) => {
                    enter_element(depth, &mut seen_root)?;
                    collect_string(e, decoder, &entities, &mut table)?;
                }
                Event::DocType(ref d) => {
                    let doctype = decoder.decode(d).map_err(quick_xml::Error::from)?;
                    entities = Entities::from_doctype(&doctype)?;
                }
                Event::End(_) => depth = depth.saturating_sub(1),
                Event::Text(ref t) if depth == 0 && !t.is_empty() => {
                    return Err(Error::MalformedXml(
                        "text content outside of the root element".to_string(),
                    ));
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if !seen_root {
            return Err(Error::MalformedXml("document has no root element".to_string()));
        }
        if depth > 0 {
            return Err(Error::MalformedXml(format!(
                "unexpected end of document, {depth} element(s) left open"
            )));
        }
        Ok(table)
    }

    fn to_writer<W: Write>(&self, table: &StringTable, writer: W) -> Result<(), Error> {
        let mut xml_writer = Writer::new_with_indent(writer, b' ', 2);

        xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        xml_writer.write_event(Event::Start(BytesStart::new("strings")))?;
        for (key, value) in table.iter() {
            let key = escape_attribute(key);
            let value = escape_attribute(value);
            let mut elem = BytesStart::new("string");
            elem.push_attribute(Attribute {
                key: QName(b"key"),
                value: Cow::Borrowed(key.as_bytes()),
            });
            elem.push_attribute(Attribute {
                key: QName(b"value"),
                value: Cow::Borrowed(value.as_bytes()),
            });
            xml_writer.write_event(Event::Empty(elem))?;
        }
        xml_writer.write_event(Event::End(BytesEnd::new("strings")))?;
        xml_writer.get_mut().write_all(b"\n")?;
        Ok(())
    }
}

fn enter_element(depth: usize, seen_root: &mut bool) -> Result<(), Error> {
    if depth == 0 {
        if *seen_root {
            return Err(Error::MalformedXml("more than one root element".to_string()));
        }
        *seen_root = true;
    }
    Ok(())
}

/// General entities from an internal DOCTYPE subset. The first declaration
/// of a name is binding.
#[derive(Debug, Default)]
struct Entities(HashMap<String, String>);

impl Entities {
    fn from_doctype(doctype: &str) -> Result<Self, Error> {
        let mut entities = HashMap::new();
        let mut rest = doctype;
        while let Some(start) = rest.find("<!ENTITY") {
            rest = rest[start + "<!ENTITY".len()..].trim_start();
            if rest.starts_with('%') {
                continue;
            }
            let name_end = rest
                .find(|c: char| c.is_whitespace() || c == '"' || c == '\'')
                .unwrap_or(rest.len());
            let name = &rest[..name_end];
            rest = rest[name_end..].trim_start();

            let Some(quote) = rest.chars().next().filter(|c| *c == '"' || *c == '\'') else {
                tracing::debug!(entity = %name, "skipping external entity declaration");
                continue;
            };
            let Some(len) = rest[1..].find(quote) else {
                return Err(Error::MalformedXml(format!(
                    "unterminated value for entity `{name}`"
                )));
            };
            let replacement = unescape(&rest[1..1 + len]).map_err(quick_xml::Error::from)?;
            entities
                .entry(name.to_string())
                .or_insert_with(|| replacement.into_owned());
            rest = &rest[1 + len + 1..];
        }
        Ok(Entities(entities))
    }

    fn resolve<'a>(&'a self, name: &str) -> Option<&'a str> {
        resolve_predefined_entity(name).or_else(|| self.0.get(name).map(String::as_str))
    }
}

/// Decodes, normalizes and unescapes one attribute value.
fn attribute_value(raw: &[u8], decoder: Decoder, entities: &Entities) -> Result<String, Error> {
    let text = decoder.decode(raw).map_err(quick_xml::Error::from)?;
    let normalized = normalize_attribute(&text);
    let value = unescape_with(&normalized, |name| entities.resolve(name))
        .map_err(quick_xml::Error::from)?;
    Ok(value.into_owned())
}

/// Maps literal whitespace in a raw attribute value to spaces, counting a
/// `\r\n` pair as one line break.
fn normalize_attribute(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['\t', '\n', '\r']) {
        return Cow::Borrowed(raw);
    }
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                chars.next_if_eq(&'\n');
                out.push(' ');
            }
            '\t' | '\n' => out.push(' '),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Escapes markup characters plus the whitespace that attribute
/// normalization would otherwise turn into spaces.
fn escape_attribute(value: &str) -> String {
    let escaped = escape(value);
    if !escaped.contains(['\t', '\n', '\r']) {
        return escaped.into_owned();
    }
    escaped
        .replace('\t', "&#9;")
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
}

fn collect_string(
    e: &BytesStart,
    decoder: Decoder,
    entities: &Entities,
    table: &mut StringTable,
) -> Result<(), Error> {
    if e.name().as_ref() != b"string" {
        return Ok(());
    }

    let mut key = String::new();
    let mut value = String::new();
    for attr in e.attributes() {
        let attr = attr?;
        match attr.key.as_ref() {
            b"key" => key = attribute_value(&attr.value, decoder, entities)?,
            b"value" => value = attribute_value(&attr.value, decoder, entities)?,
            _ => {}
        }
    }

    if let Some(previous) = table.insert(key.as_str(), value) {
        tracing::warn!(key = %key, previous = %previous, "duplicate string key, keeping the later value");
    }
    Ok(())
}
