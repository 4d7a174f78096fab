//! Benchmarks for the Bloxorz search strategies.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use bloxorz::heuristic::CostTable;
use bloxorz::render::{render, Style};
use bloxorz::{solve, Heuristic, Level, SearchConfig, Strategy};

/// Benchmark every strategy on the sample level.
fn bench_strategies(c: &mut Criterion) {
    let level = Level::sample();
    let mut group = c.benchmark_group("solve_sample");

    for strategy in Strategy::ALL {
        let config = SearchConfig::new(strategy).with_heuristic(Heuristic::Manhattan);
        group.bench_function(strategy.to_string(), |b| {
            b.iter(|| solve(black_box(&level), black_box(&config)))
        });
    }

    group.finish();
}

/// Benchmark building the heuristic table for A*.
fn bench_cost_table(c: &mut Criterion) {
    let level = Level::sample();

    c.bench_function("cost_table_euclidean", |b| {
        b.iter(|| CostTable::build(black_box(level.grid()), level.target(), Heuristic::Euclidean))
    });
}

/// Benchmark drawing the map for progress output.
fn bench_render(c: &mut Criterion) {
    let level = Level::sample();

    c.bench_function("render_ascii", |b| {
        b.iter(|| render(black_box(level.grid()), &level.start(), Style::Ascii))
    });
}

criterion_group!(benches, bench_strategies, bench_cost_table, bench_render);
criterion_main!(benches);
