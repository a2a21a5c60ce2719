//! Criterion benchmarks for book resolution, verse selection and search.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use biblia::locate::locate_book;
use biblia::models::{Translation, TranslationBook};
use biblia::registry::{Registry, STANDARD_BOOKS};
use biblia::search::search_verses;
use biblia::selection::VerseSelection;

/// Every registry book with 30 chapters of 30 verses each.
fn full_translation() -> Translation {
    Translation {
        key: "bench".to_string(),
        books: STANDARD_BOOKS
            .iter()
            .map(|&(code, _, name_pt)| TranslationBook {
                code: code.to_string(),
                name: name_pt.to_string(),
                chapters: (1..=30)
                    .map(|c| {
                        (1..=30)
                            .map(|v| format!("{} {}:{} e disse o Senhor", name_pt, c, v))
                            .collect()
                    })
                    .collect(),
            })
            .collect(),
    }
}

fn bench_locate(c: &mut Criterion) {
    let registry = Registry::standard();
    let translation = full_translation();

    let mut group = c.benchmark_group("locate_book");

    // One token per strategy, from the cheapest to the full fallback chain
    let tokens = [
        ("exact_code", "ap"),
        ("exact_name", "Apocalipse"),
        ("cross_reference", "Revelation"),
        ("substring", "apocal"),
        ("miss", "nenhum"),
    ];

    for (label, token) in tokens {
        group.bench_with_input(BenchmarkId::new(label, token), &token, |b, token| {
            b.iter(|| locate_book(&registry, black_box(&translation), black_box(token)))
        });
    }

    group.finish();
}

fn bench_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("verse_selection");

    for expr in ["5", "5,7,9-11", "1-176", "1,3,5,7,9,11,13,15,17,19-40"] {
        group.bench_with_input(BenchmarkId::new("parse", expr), &expr, |b, expr| {
            b.iter(|| VerseSelection::parse(black_box(expr)))
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let translation = full_translation();

    let mut group = c.benchmark_group("search_verses");
    group.sample_size(20);

    // Early hit, hit near the end, and a full scan with no match
    for query in ["senhor", "apocalipse 30:30", "inexistente"] {
        group.bench_with_input(BenchmarkId::new("query", query), &query, |b, query| {
            b.iter(|| search_verses(black_box(&translation), black_box(query), 20))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_locate, bench_selection, bench_search);
criterion_main!(benches);
