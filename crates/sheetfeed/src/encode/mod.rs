//! Canonical CSV output

pub mod writer;

use crate::options::Options;
use crate::table::Table;

pub fn encode_table(table: &Table, options: &Options) -> String {
    let mut w = writer::CsvWriter::new(options.delimiter);
    for row in table {
        w.row(row.cells());
    }
    w.into_string()
}
