//! Benchmarks for title resolution
//!
//! Run with: cargo bench --package resolver
//!
//! Matches queries against a synthetic title list sized like the movie
//! dataset.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use resolver::{DifflibMatcher, SequenceMatcher, TitleMatcher};

const WORDS: [&str; 16] = [
    "The", "Dark", "Knight", "Rises", "Return", "of", "King", "Star", "Wars", "Lost",
    "City", "Night", "Last", "Empire", "Blue", "Ocean",
];

fn synthetic_titles(size: usize) -> Vec<String> {
    (0..size)
        .map(|i| {
            let len = 1 + i % 4;
            (0..len)
                .map(|k| WORDS[(i * 5 + k * 11 + i / 7) % WORDS.len()])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn bench_ratio(c: &mut Criterion) {
    c.bench_function("sequence_ratio", |b| {
        b.iter(|| {
            let matcher = SequenceMatcher::new(
                black_box("The Lord of the Rings: The Return of the King"),
                black_box("Lord of the Rings Return of King"),
            );
            black_box(matcher.ratio())
        })
    });
}

fn bench_close_matches(c: &mut Criterion) {
    let titles = synthetic_titles(4800);
    let matcher = DifflibMatcher::default();

    c.bench_function("close_matches_4800", |b| {
        b.iter(|| {
            let matches = matcher.close_matches(black_box("The Dark Nite"), &titles);
            black_box(matches)
        })
    });
}

criterion_group!(benches, bench_ratio, bench_close_matches);
criterion_main!(benches);
