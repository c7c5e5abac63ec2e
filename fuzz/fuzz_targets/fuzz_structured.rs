#![no_main]
use libfuzzer_sys::{arbitrary, fuzz_target};
use arbitrary::Arbitrary;
use sheetfeed::{Options, Row, Table, parse_with, to_csv_string};

const MAX_ROWS: usize = 32;
const MAX_CELLS: usize = 16;

#[derive(Arbitrary, Debug)]
struct FuzzTable {
    rows: Vec<Vec<String>>,
}

impl FuzzTable {
    /// Cells as the raw parser can produce them: no `\r`, at least one cell per row
    fn to_table(&self) -> Table {
        self.rows
            .iter()
            .take(MAX_ROWS)
            .map(|cells| {
                let mut row: Vec<String> = cells
                    .iter()
                    .take(MAX_CELLS)
                    .map(|c| c.replace('\r', ""))
                    .collect();
                if row.is_empty() {
                    row.push(String::new());
                }
                Row::new(row)
            })
            .collect()
    }
}

fuzz_target!(|input: FuzzTable| {
    let table = input.to_table();
    let opts = Options::raw();
    let encoded = to_csv_string(&table, &opts);
    let parsed = parse_with(&encoded, &opts);
    if parsed != table {
        panic!(
            "structured roundtrip mismatch!\nEncoded: {:?}\nParsed: {:?}",
            encoded, parsed
        );
    }
});
