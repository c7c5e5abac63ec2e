use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use sheetfeed::{HeaderNormalization, Options};
use std::hint::black_box;

fn make_feed(rows: usize) -> String {
    let mut s = String::from("\u{feff}Item,YT_URL,enabled,Merchant,views\r\n");
    for i in 0..rows {
        s.push_str(&format!(
            "Item {i},https://youtu.be/vid{i},{},\"Shop, {i}\",\"{},000\"\r\n",
            if i % 3 == 0 { "FALSE" } else { "TRUE" },
            i % 97
        ));
    }
    s
}

fn make_quoted(rows: usize) -> String {
    let mut s = String::from("a,b,c\n");
    for i in 0..rows {
        s.push_str(&format!("\"line {i}\nnext\",\"say \"\"hi\"\"\",  {i}  \n"));
    }
    s
}

pub fn parse_benchmarks(c: &mut Criterion) {
    let cases = [
        ("feed_1k", make_feed(1000)),
        ("feed_10k", make_feed(10_000)),
        ("quoted_1k", make_quoted(1000)),
    ];
    let mut group = c.benchmark_group("parse");
    for (name, text) in &cases {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(format!("trimmed::{name}"), |b| {
            b.iter(|| black_box(sheetfeed::parse(black_box(text))))
        });
        group.bench_function(format!("raw::{name}"), |b| {
            b.iter(|| black_box(sheetfeed::parse_with(black_box(text), &Options::raw())))
        });
    }
    group.finish();

    let mut group = c.benchmark_group("records");
    let table = sheetfeed::parse(&make_feed(10_000));
    group.bench_function("gacha_pool::feed_10k", |b| {
        b.iter(|| black_box(sheetfeed::gacha::GachaPool::from_table(&table)))
    });
    group.bench_function("to_json::feed_10k", |b| {
        b.iter(|| black_box(sheetfeed::records_to_json(&table, HeaderNormalization::SnakeKey)))
    });
    group.finish();

    let mut group = c.benchmark_group("encode");
    group.bench_function("canonical::feed_10k", |b| {
        b.iter_batched(
            || table.clone(),
            |t| black_box(sheetfeed::to_csv_string(&t, &Options::default())),
            BatchSize::LargeInput,
        )
    });
    group.finish();
}

criterion_group!(benches, parse_benchmarks);
criterion_main!(benches);
