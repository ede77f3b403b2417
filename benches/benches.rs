use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use cascadeip::generator::random_graph;
use cascadeip::{build_greedy_seed, simulate, SeedVector};

macro_rules! make_benches {
    ($($n:expr,)*) => {
        pub fn bench_greedy(c: &mut Criterion) {
            let mut group = c.benchmark_group("greedy");
            $(
                let graph = random_graph($n, $n as u64).unwrap();
                for m in [1, 2, 3] {
                    let target = ($n as usize / 2).max(1);
                    group.bench_with_input(BenchmarkId::new(format!("n{}", $n), m), &m, |b, &m| b.iter(|| build_greedy_seed(&graph, m, target).unwrap()));
                }
            )*
            group.finish();
        }

        pub fn bench_simulate(c: &mut Criterion) {
            let mut group = c.benchmark_group("simulate");
            $(
                let graph = random_graph($n, $n as u64).unwrap();
                let seeds = SeedVector::from((0..$n).map(|i| i % 10 == 0).collect::<Vec<bool>>());
                group.bench_function(format!("n{}", $n), |b| b.iter(|| simulate(&graph, &seeds, 2).unwrap()));
            )*
            group.finish();
        }

        criterion_group!(benches, bench_greedy, bench_simulate);
        criterion_main!(benches);
    }
}

make_benches! {
    20,
    50,
    100,
}
