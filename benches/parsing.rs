use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sdlang::{from_str, to_string, Lexer, StandardZones};

const BASIC_TYPES: &str = include_str!("../tests/fixtures/basic_types.sdl");
const STRUCTURES: &str = include_str!("../tests/fixtures/structures.sdl");

/// A flat document of `rows` tags mixing the common literal kinds.
fn generate_rows(rows: usize) -> String {
    let mut text = String::with_capacity(rows * 96);
    for i in 0..rows {
        text.push_str(&format!(
            "row{} \"name {}\" {} {}L {}.5 2005/12/{:02} 12:30:00 active=true score={}F\n",
            i,
            i,
            i,
            i * 1000,
            i,
            i % 28 + 1,
            i % 100
        ));
    }
    text
}

/// `depth` nested blocks, each with a couple of leaf children.
fn generate_nested(depth: usize) -> String {
    let mut text = String::new();
    for level in 0..depth {
        text.push_str(&format!(
            "{}level{} id={} {{\n",
            "    ".repeat(level),
            level,
            level
        ));
        text.push_str(&format!("{}    leaf \"a\" 1\n", "    ".repeat(level)));
    }
    for level in (0..depth).rev() {
        text.push_str(&format!("{}}}\n", "    ".repeat(level)));
    }
    text
}

fn benchmark_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize_basic_types", |b| {
        b.iter(|| Lexer::new(black_box(BASIC_TYPES), &StandardZones).tokenize())
    });
}

fn benchmark_parse_fixtures(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_fixture");
    group.bench_function("basic_types", |b| b.iter(|| from_str(black_box(BASIC_TYPES))));
    group.bench_function("structures", |b| b.iter(|| from_str(black_box(STRUCTURES))));
    group.finish();
}

fn benchmark_parse_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_rows");
    for size in [10, 100, 1000].iter() {
        let text = generate_rows(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| from_str(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_write_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_rows");
    for size in [10, 100, 1000].iter() {
        let doc = from_str(&generate_rows(*size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| to_string(black_box(doc)))
        });
    }
    group.finish();
}

fn benchmark_nested(c: &mut Criterion) {
    let text = generate_nested(64);
    let doc = from_str(&text).unwrap();

    let mut group = c.benchmark_group("nested");
    group.bench_function("parse", |b| b.iter(|| from_str(black_box(&text))));
    group.bench_function("write", |b| b.iter(|| to_string(black_box(&doc))));
    group.bench_function("descendants", |b| {
        b.iter(|| black_box(&doc).descendants_named("leaf").len())
    });
    group.finish();
}

fn benchmark_roundtrip(c: &mut Criterion) {
    let doc = from_str(STRUCTURES).unwrap();
    c.bench_function("roundtrip_structures", |b| {
        b.iter(|| {
            let text = to_string(black_box(&doc));
            from_str(&text)
        })
    });
}

criterion_group!(
    benches,
    benchmark_tokenize,
    benchmark_parse_fixtures,
    benchmark_parse_rows,
    benchmark_write_rows,
    benchmark_nested,
    benchmark_roundtrip
);
criterion_main!(benches);
