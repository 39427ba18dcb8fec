use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use xmldict::{parse, unparse};

const SIMPLE_XML: &str = "<root><child>text</child></root>";
const MIXED_XML: &str = r#"<root id="1" xmlns:a="http://a.com/">head<item n="1">one</item><a:item>two</a:item><item n="2"/>tail</root>"#;

fn bench_parse(c: &mut Criterion) {
    c.bench_function("xmldict_parse_simple", |b| {
        b.iter(|| parse(black_box(SIMPLE_XML)))
    });
    c.bench_function("xmldict_parse_mixed", |b| {
        b.iter(|| parse(black_box(MIXED_XML)))
    });
}

fn bench_unparse(c: &mut Criterion) {
    let Ok(value) = parse(MIXED_XML) else {
        return;
    };
    c.bench_function("xmldict_unparse_mixed", |b| {
        b.iter(|| unparse(black_box(&value)))
    });
}

criterion_group!(benches, bench_parse, bench_unparse);
criterion_main!(benches);
