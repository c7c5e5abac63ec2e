use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sheetfeed::{Options, Row, Table, TrimPolicy, parse, parse_with, to_csv_string};

const ALPHABET: &[char] = &['a', 'b', 'z', '1', ' ', ',', '"', '\n', '\r', 'é', '字', '\t'];

fn random_text(rng: &mut StdRng, len: usize) -> String {
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
        .collect()
}

fn random_table(rng: &mut StdRng) -> Table {
    let rows = rng.gen_range(0..6);
    (0..rows)
        .map(|_| {
            let cols = rng.gen_range(1..5);
            (0..cols)
                .map(|_| {
                    let len = rng.gen_range(0..6);
                    random_text(rng, len)
                })
                .collect::<Row>()
        })
        .collect()
}

#[test]
fn reparse_of_canonical_output_is_identity() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let len = rng.gen_range(0..40);
        let input = random_text(&mut rng, len);
        for opts in [Options::default(), Options::raw()] {
            let first = parse_with(&input, &opts);
            let csv = to_csv_string(&first, &opts);
            let second = parse_with(&csv, &opts);
            assert_eq!(first, second, "input {:?} csv {:?}", input, csv);
        }
    }
}

#[test]
fn raw_tables_without_cr_survive_encoding() {
    let mut rng = StdRng::seed_from_u64(11);
    let opts = Options {
        trim: TrimPolicy::None,
        ..Options::default()
    };
    for _ in 0..300 {
        let table: Table = random_table(&mut rng)
            .into_rows()
            .into_iter()
            .map(|r| r.into_cells().into_iter().map(|c| c.replace('\r', "")).collect())
            .collect();
        let csv = to_csv_string(&table, &opts);
        assert_eq!(parse_with(&csv, &opts), table, "csv {:?}", csv);
    }
}

#[test]
fn plain_lines_give_one_row_per_line() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..200 {
        let lines: Vec<Vec<String>> = (0..rng.gen_range(1..8))
            .map(|_| {
                (0..rng.gen_range(1..5))
                    .map(|_| format!("c{}", rng.gen_range(0..100)))
                    .collect()
            })
            .collect();
        let text: String = lines.iter().map(|l| format!("{}\n", l.join(","))).collect();
        let t = parse(&text);
        assert_eq!(t.len(), lines.len());
        for (row, line) in t.iter().zip(&lines) {
            assert_eq!(row.cells(), line.as_slice());
        }
    }
}

#[test]
fn quoted_newlines_never_add_rows() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..200 {
        let breaks = rng.gen_range(0..5);
        let body = "x\n".repeat(breaks);
        let text = format!("a,\"{}\",b\nc\n", body);
        let t = parse(&text);
        assert_eq!(t.len(), 2);
        assert_eq!(t.rows()[0].len(), 3);
    }
}

#[test]
fn canonical_output_quotes_only_when_needed() {
    let t = parse("plain,\"needs,quote\",\"has \"\"q\"\"\",\"multi\nline\"\n\"\"\n");
    let csv = to_csv_string(&t, &Options::default());
    assert_eq!(
        csv,
        "plain,\"needs,quote\",\"has \"\"q\"\"\",\"multi\nline\"\n\"\"\n"
    );
}

#[test]
fn empty_table_encodes_to_nothing() {
    assert_eq!(to_csv_string(&Table::default(), &Options::default()), "");
}

#[test]
fn leading_bom_cell_is_quoted() {
    let table: Table = vec![["\u{feff}x"].into_iter().collect::<Row>()].into_iter().collect();
    let opts = Options::raw();
    let csv = to_csv_string(&table, &opts);
    assert_eq!(csv, "\"\u{feff}x\"\n");
    assert_eq!(parse_with(&csv, &opts), table);
}
