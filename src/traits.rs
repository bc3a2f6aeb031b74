//! Traits for format-agnostic reading and writing of string tables.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Cursor, Write},
    path::Path,
};

use crate::{error::Error, types::StringTable};

/// A string-table file format that can be decoded from and encoded to one file.
///
/// # Example
///
/// ```rust,no_run
/// use stringtab::formats::PropertiesFormat;
/// use stringtab::traits::TableFormat;
///
/// let table = PropertiesFormat::read_from("ui-strings_es.properties")?;
/// PropertiesFormat::default().write_to(&table, "copy.properties")?;
/// # Ok::<(), stringtab::Error>(())
/// ```
pub trait TableFormat {
    /// Parse a table from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<StringTable, Error>;

    /// Parse a table from a file path.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<StringTable, Error> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse a table from a string.
    fn from_str(s: &str) -> Result<StringTable, Error> {
        Self::from_reader(Cursor::new(s))
    }

    /// Parse a table from bytes.
    fn from_bytes(bytes: &[u8]) -> Result<StringTable, Error> {
        Self::from_reader(Cursor::new(bytes))
    }

    /// Write a table to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, table: &StringTable, writer: W) -> Result<(), Error>;

    /// Write a table to a file path, creating or truncating it.
    fn write_to<P: AsRef<Path>>(&self, table: &StringTable, path: P) -> Result<(), Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.to_writer(table, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write a table into an in-memory string.
    fn to_string(&self, table: &StringTable) -> Result<String, Error> {
        let mut out = Vec::new();
        self.to_writer(table, &mut out)?;
        String::from_utf8(out).map_err(|e| Error::Io(std::io::Error::other(e)))
    }
}
