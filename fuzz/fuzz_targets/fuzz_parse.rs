#![no_main]
use libfuzzer_sys::fuzz_target;
use sheetfeed::{Delimiter, HeaderNormalization, Options, TrimPolicy, parse_with};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    for delimiter in [Delimiter::Comma, Delimiter::Tab] {
        for trim in [TrimPolicy::Cells, TrimPolicy::None] {
            let opts = Options {
                delimiter,
                trim,
                skip_blank_rows: false,
            };
            let table = parse_with(&text, &opts);
            for row in &table {
                assert!(!row.is_empty(), "parsed rows always hold at least one cell");
            }
            // mappers are total over parser output
            let _ = sheetfeed::records_to_json(&table, HeaderNormalization::SnakeKey);
            let _ = sheetfeed::gacha::GachaPool::from_table(&table);
            let _ = sheetfeed::vocab::entries(&table);
        }
    }
});
