//! Benchmarks for the engine hot paths.
//!
//! Covers combat resolution, mission evaluation over large maps and a full
//! scripted session through the console driver.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::hint::black_box;
use std::io::Cursor;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use war::config::SessionConfig;
use war::console::{self, Console};
use war::{MissionCatalog, Registry, SeededDice, Territory, bind, evaluate, resolve_attack};

const COLORS: [&str; 4] = ["Red", "Blue", "Green", "Yellow"];

fn make_registry(size: usize) -> Registry {
    Registry::from_territories(
        (0..size)
            .map(|i| {
                let troops = u32::try_from(i % 17).unwrap_or(0);
                Territory::new(format!("T{i}"), COLORS[i % COLORS.len()], troops)
            })
            .collect(),
    )
}

fn bench_resolve_attack(c: &mut Criterion) {
    let mut dice = SeededDice::from_seed(42);
    c.bench_function("resolve_attack", |b| {
        b.iter(|| {
            let mut attacker = Territory::new("Origin", "Red", 1_000);
            let mut defender = Territory::new("Target", "Blue", 10);
            let report = resolve_attack(&mut attacker, &mut defender, &mut dice);
            black_box(report)
        });
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let catalog = MissionCatalog::standard();
    let missions: Vec<_> = catalog
        .templates()
        .iter()
        .map(|template| bind(template, "Blue"))
        .collect();

    let mut group = c.benchmark_group("evaluate_catalog");
    for size in [5, 100, 10_000] {
        let registry = make_registry(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &registry, |b, registry| {
            b.iter(|| {
                missions
                    .iter()
                    .filter(|mission| evaluate(mission, black_box(registry)))
                    .count()
            });
        });
    }
    group.finish();
}

fn bench_scripted_session(c: &mut Criterion) {
    let config = SessionConfig {
        territories: 2,
        ..SessionConfig::default()
    };
    let mut input = String::from("America\nRed\n500\nEurope\nBlue\n500\n");
    input.push_str("2\nAna\nGreen\nBia\nYellow\n2\n");
    for _ in 0..100 {
        input.push_str("America\nEurope\n1\n");
    }
    input.push_str("America\nEurope\n0\n0\n");

    c.bench_function("scripted_session_100_attacks", |b| {
        b.iter(|| {
            let mut console = Console::new(Cursor::new(input.as_bytes()), Vec::new());
            let summary = console::run(&mut console, &config, SeededDice::from_seed(7), Some(7));
            black_box(summary.unwrap())
        });
    });
}

criterion_group!(
    benches,
    bench_resolve_attack,
    bench_evaluate,
    bench_scripted_session
);
criterion_main!(benches);
