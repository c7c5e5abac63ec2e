#![doc = include_str!("../README.md")]

pub mod error;
pub mod options;
pub mod table;
pub mod decode;
pub mod encode;

pub mod articles;
pub mod gacha;
pub mod quiz;
pub mod video;
pub mod vocab;

#[cfg(feature = "json")]
pub mod charge;
#[cfg(feature = "json")]
pub mod songs;

pub use crate::decode::header::{HeaderIndex, HeaderNormalization, Record};
pub use crate::error::{Error, Result};
pub use crate::options::{Delimiter, Options, TrimPolicy};
pub use crate::table::{Row, Table};

use std::io::{Read, Write};

/// Parse CSV text with the default options (comma, trimmed cells).
pub fn parse(text: &str) -> Table {
    crate::decode::parser::parse_table(text, &Options::default())
}

pub fn parse_with(text: &str, options: &Options) -> Table {
    crate::decode::parser::parse_table(text, options)
}

pub fn parse_from_reader<R: Read>(mut reader: R, options: &Options) -> Result<Table> {
    let mut s = String::new();
    reader.read_to_string(&mut s)?;
    Ok(parse_with(&s, options))
}

/// Canonical CSV for a table: fields are quoted only when re-parsing needs it.
pub fn to_csv_string(table: &Table, options: &Options) -> String {
    crate::encode::encode_table(table, options)
}

pub fn to_csv_writer<W: Write>(mut writer: W, table: &Table, options: &Options) -> Result<()> {
    let s = to_csv_string(table, options);
    writer.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(feature = "json")]
pub fn records_to_json(table: &Table, normalization: HeaderNormalization) -> serde_json::Value {
    let records = table.records(normalization);
    serde_json::Value::Array(records.iter().map(|r| r.to_json()).collect())
}
