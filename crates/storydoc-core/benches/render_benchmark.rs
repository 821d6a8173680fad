//! Benchmarks for StoryDoc rendering, with pulldown-cmark as a baseline
//!
//! Run with: cargo bench -p storydoc-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pulldown_cmark::{Options, Parser as MdParser};
use storydoc_core::{classify, render, stylize, StyleKind, StyleSheet, TextStyle};

/// Sample manuscript
const STORYDOC_SAMPLE: &str = r#"# Title: The Benchmark
## Author: A. Writer
## Year: 2024
-------

## Chapter One

*1*

It was a **dark** and _stormy_ night; the rain fell in torrents,
except at occasional intervals, when it was checked by a violent
gust of wind which swept up the streets.

For it is in London that our __scene__ lies, rattling along the
housetops, and fiercely agitating the _scanty flame_ of the lamps
that struggled against the darkness.

*2*

Unterminated **markers and stray _ underscores pass through
as literal text, as do * lone asterisks.

-------

## Chapter Two

*1*

The end.
"#;

/// Equivalent CommonMark (as close as possible)
const MARKDOWN_SAMPLE: &str = r#"# The Benchmark

*A. Writer*

---

## Chapter One

### 1

It was a **dark** and _stormy_ night; the rain fell in torrents,
except at occasional intervals, when it was checked by a violent
gust of wind which swept up the streets.

For it is in London that our __scene__ lies, rattling along the
housetops, and fiercely agitating the _scanty flame_ of the lamps
that struggled against the darkness.

### 2

Unterminated **markers and stray _ underscores pass through
as literal text, as do * lone asterisks.

---

## Chapter Two

### 1

The end.
"#;

fn styles() -> StyleSheet {
    StyleSheet::from_fn(|kind| match kind {
        StyleKind::Title => TextStyle::new(28.0).unwrap().bold(),
        StyleKind::Author => TextStyle::new(18.0).unwrap().italic(),
        StyleKind::Chapter => TextStyle::new(22.0).unwrap().bold(),
        StyleKind::Section => TextStyle::new(18.0).unwrap().bold(),
        StyleKind::Normal => TextStyle::new(17.0).unwrap(),
    })
}

fn bench_render(c: &mut Criterion) {
    let styles = styles();
    let mut group = c.benchmark_group("render");

    group.throughput(Throughput::Bytes(STORYDOC_SAMPLE.len() as u64));

    group.bench_function("storydoc", |b| {
        b.iter(|| {
            let text = render(black_box(STORYDOC_SAMPLE), &styles);
            black_box(text.len())
        })
    });

    group.bench_function("storydoc_classify", |b| {
        b.iter(|| {
            let events = classify(black_box(STORYDOC_SAMPLE));
            black_box(events.len())
        })
    });

    group.throughput(Throughput::Bytes(MARKDOWN_SAMPLE.len() as u64));

    group.bench_function("markdown_pulldown", |b| {
        b.iter(|| {
            let parser = MdParser::new_ext(black_box(MARKDOWN_SAMPLE), Options::empty());
            let events: Vec<_> = parser.collect();
            black_box(events.len())
        })
    });

    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let styles = styles();
    let mut group = c.benchmark_group("scaling");

    for size in [1, 10, 50, 200].iter() {
        let content: String = STORYDOC_SAMPLE.repeat(*size);

        group.throughput(Throughput::Bytes(content.len() as u64));

        group.bench_with_input(BenchmarkId::new("storydoc", size), &content, |b, content| {
            b.iter(|| {
                let text = render(black_box(content), &styles);
                black_box(text.len())
            })
        });
    }

    group.finish();
}

fn bench_inline(c: &mut Criterion) {
    let mut group = c.benchmark_group("inline");
    let base = TextStyle::new(17.0).unwrap();

    let marked = "Like thee must I GO DOWN. _This is an_ **inline test** _of sorts_, __twice__.";
    let unmarked = "Like thee must I GO DOWN, as men call it, to whom I shall descend again.";
    let unterminated = "** ** ** ** ** _ _ _ _ ** ** ** ** ** _ _ _ _ ** ** ** ** ** _ _ _ _";

    for (name, text) in [
        ("marked", marked),
        ("unmarked", unmarked),
        ("unterminated", unterminated),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let runs = stylize(black_box(text), &base, StyleKind::Normal);
                black_box(runs.len())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render, bench_scaling, bench_inline);
criterion_main!(benches);
