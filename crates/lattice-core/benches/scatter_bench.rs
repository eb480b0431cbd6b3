// -------------------------------------------------------------------------
// SCPN Lattice Core -- Scatter Benchmark
// Compares the serial reference scatter against the in-process channel
// fabric (one thread per rank) at a few matrix/block/grid shapes.
// -------------------------------------------------------------------------

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array2;
use rand::Rng;
use std::hint::black_box;

use lattice_core::domain::Layout;
use lattice_core::scatter::{scatter_serial, scatter_with_fabric};

fn random_matrix(n: usize) -> Array2<f64> {
    let mut rng = rand::thread_rng();
    Array2::from_shape_fn((n, n), |_| rng.gen::<f64>())
}

fn bench_scatter(c: &mut Criterion) {
    let cases = [
        (256usize, 16usize, 2usize, 2usize),
        (256, 32, 2, 2),
        (512, 32, 2, 4),
    ];

    let mut group = c.benchmark_group("scatter");
    for (n, b, p, q) in cases {
        let global = random_matrix(n);
        let layout = Layout::new(n, b, 0).expect("layout");
        let label = format!("n{n}_b{b}_{p}x{q}");

        group.bench_with_input(
            BenchmarkId::new("serial", &label),
            &global,
            |bench, global| {
                bench.iter(|| {
                    let domains =
                        scatter_serial(black_box(global), layout, p, q).expect("scatter");
                    black_box(domains)
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("fabric", &label),
            &global,
            |bench, global| {
                bench.iter(|| {
                    let domains =
                        scatter_with_fabric(black_box(global), layout, p, q).expect("scatter");
                    black_box(domains)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_scatter);
criterion_main!(benches);
