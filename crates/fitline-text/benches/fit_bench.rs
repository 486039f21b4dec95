//! Benchmarks for word-safe settling and auto-shrink search.
//!
//! Run with: cargo bench -p fitline-text

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use fitline_text::{
    BreakStrategy, CachedOracle, FontSizeBounds, LayoutRequest, MonospaceOracle, RewrapEngine,
    ShrinkSearch, settle,
};
use std::hint::black_box;

// =============================================================================
// Test Data
// =============================================================================

/// Compound names of increasing length.
fn compound_text(words: usize) -> String {
    ["Sodium", "Hydrogen", "Carbonate", "Potassium", "Permanganate", "Dichromate"]
        .iter()
        .cycle()
        .take(words)
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_settle(c: &mut Criterion) {
    let mut group = c.benchmark_group("rewrap/settle");
    for words in [2usize, 8, 32] {
        let text = compound_text(words);
        group.bench_with_input(BenchmarkId::from_parameter(words), &text, |b, text| {
            let mut oracle = MonospaceOracle::new(1.0).strategy(BreakStrategy::Greedy);
            b.iter(|| {
                let mut engine = RewrapEngine::new(black_box(text), 64);
                settle(&mut oracle, &mut engine, 1.0, 14.0, 0)
            });
        });
    }
    group.finish();
}

fn bench_shrink(c: &mut Criterion) {
    let mut group = c.benchmark_group("shrink/find_fitting_font_size");
    let bounds = FontSizeBounds::new(8.0, 24.0).expect("valid bounds");
    let request = LayoutRequest::new(compound_text(6), 160.0, bounds).max_lines(3);

    group.bench_function("uncached", |b| {
        let mut oracle = MonospaceOracle::new(0.6);
        let search = ShrinkSearch::new(1.0);
        b.iter(|| search.find_fitting_font_size(&mut oracle, black_box(&request)));
    });

    group.bench_function("cached", |b| {
        let mut oracle = CachedOracle::new(MonospaceOracle::new(0.6), 1024);
        let search = ShrinkSearch::new(1.0);
        b.iter(|| search.find_fitting_font_size(&mut oracle, black_box(&request)));
    });

    group.finish();
}

criterion_group!(benches, bench_settle, bench_shrink);
criterion_main!(benches);
