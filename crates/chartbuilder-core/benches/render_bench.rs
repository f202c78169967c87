// File: crates/chartbuilder-core/benches/render_bench.rs
// Summary: Raster render throughput for scatter and stacked histogram figures.

use anyhow::Result;
use chartbuilder_core::{Chart, Configure, HistData, Histogram, Scatter, ScatterData};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn scatter_data(n: usize) -> Vec<ScatterData> {
    let points: Vec<(f64, f64)> = (0..n)
        .map(|i| {
            let x = i as f64;
            (x, (x * 0.01).sin() * 10.0 + x * 0.0001)
        })
        .collect();
    vec![ScatterData::new(points).with_label("series").with_marker("o")]
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_rgba");
    for &n in &[1_000usize, 10_000usize] {
        group.bench_function(format!("scatter_{n}"), |b| {
            let data = scatter_data(n);
            let mut chart = Scatter::with_labels("Bench", "x", "y");
            chart.set_size(800, 500);
            b.iter(|| -> Result<()> {
                black_box(chart.render_rgba(&data)?);
                Ok(())
            });
        });
    }
    group.bench_function("histogram_3_panels", |b| {
        let data: Vec<HistData> = (0..3)
            .map(|k| HistData::new((0..5_000).map(|i| (i * (k + 7)) % 250)).with_step(10.0))
            .collect();
        let chart = Histogram::with_labels("Bench", "value", "count");
        b.iter(|| -> Result<()> {
            black_box(chart.render_rgba(&data)?);
            Ok(())
        });
    });
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
