use criterion::{black_box, criterion_group, criterion_main, Criterion};
use traceplot_core::calendar::plan;
use traceplot_core::interval::select;
use traceplot_core::DateWindow;

fn measure(text: &str) -> f32 {
    text.chars().count() as f32 * 8.0
}

fn bench_interval(c: &mut Criterion) {
    let mut group = c.benchmark_group("interval_select");
    for &range in &[7.0f64, 365.0, 12345.0, 1.0e9] {
        group.bench_function(format!("range_{range}"), |b| {
            b.iter(|| select(black_box(range), black_box(10)).unwrap());
        });
    }
    group.finish();
}

fn bench_date_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("date_plan");
    group.bench_function("year", |b| {
        b.iter(|| plan(black_box(DateWindow::Year(2024)), 610.0, &measure).unwrap());
    });
    group.bench_function("month", |b| {
        b.iter(|| plan(black_box(DateWindow::Month { year: 2024, month: 3 }), 610.0, &measure).unwrap());
    });
    group.finish();
}

criterion_group!(benches, bench_interval, bench_date_plan);
criterion_main!(benches);
