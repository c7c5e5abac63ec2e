#![no_main]
use libfuzzer_sys::fuzz_target;
use sheetfeed::{Options, parse_with, to_csv_string};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        for opts in [Options::default(), Options::raw()] {
            let first = parse_with(input, &opts);
            let encoded = to_csv_string(&first, &opts);
            let second = parse_with(&encoded, &opts);
            if first != second {
                panic!(
                    "CSV roundtrip mismatch!\nInput: {:?}\nFirst parse: {:?}\nRe-encoded: {:?}\nSecond parse: {:?}",
                    input, first, encoded, second
                );
            }
        }
    }
});
