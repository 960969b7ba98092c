use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fieldpath_core::{Alliance, CubicCurve, Point};

fn bench_curve(c: &mut Criterion) {
    let curve = CubicCurve::new(
        Point::new(8.0, 8.0),
        Point::new(40.0, 70.0),
        Point::new(90.0, 20.0),
        Point::new(120.0, 100.0),
    );

    c.bench_function("curve_evaluate", |b| {
        b.iter(|| black_box(&curve).evaluate(black_box(0.37)))
    });

    c.bench_function("curve_invert", |b| {
        let target = curve.evaluate(0.61);
        b.iter(|| black_box(&curve).invert(black_box(target)))
    });

    c.bench_function("collision_weight", |b| {
        b.iter(|| {
            black_box(&curve).collision_weight(
                black_box(Alliance::Blue),
                black_box(45.0),
                1.0,
                1.0,
                16.0,
                16.0,
            )
        })
    });
}

criterion_group!(benches, bench_curve);
criterion_main!(benches);
