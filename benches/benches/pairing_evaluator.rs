use ark_std::rand::{rngs::StdRng, SeedableRng};
use benches::random_pairing_cells;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use dac::pairing::{ExecutionMode, PairingEvaluator};

fn pairing_evaluator(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0u64);
    // (rows, columns, pairings per cell)
    let shapes = [(1, 1, 4), (2, 4, 3), (4, 4, 3), (4, 8, 2)];

    for mode in [ExecutionMode::Sequential, ExecutionMode::Parallel] {
        let evaluator = PairingEvaluator::new(mode);
        let mut group = c.benchmark_group(format!("Pairing evaluator {:?}", mode));
        for (rows, cols, per_cell) in shapes {
            let cells = random_pairing_cells(&mut rng, rows, cols, per_cell);
            group.bench_with_input(
                BenchmarkId::from_parameter(format!("{}x{} cells, {} pairings each", rows, cols, per_cell)),
                &cells,
                |b, cells| b.iter(|| evaluator.evaluate(cells.clone()).unwrap()),
            );
        }
        group.finish();
    }
}

criterion_group!(benches, pairing_evaluator);
criterion_main!(benches);
