use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use fastrand::Rng;
use flocking::{
    core::{SwarmConfig, Topology},
    factories::UniformFactory,
    swarm::Swarm,
    test_functions::Rastrigin,
};

fn pso_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("PSO");
    for n in [2, 5, 10] {
        for topology in [Topology::Global, Topology::Ring] {
            group.bench_with_input(
                BenchmarkId::new(format!("Rastrigin ({topology:?})"), n),
                &n,
                |b, ndim| {
                    let config = SwarmConfig::default()
                        .with_generation_maximum(200)
                        .with_inertia(0.7)
                        .with_local_attraction(1.5)
                        .with_global_attraction(1.5)
                        .with_topology(topology);
                    b.iter_batched(
                        || {
                            let problem = Rastrigin { n: *ndim };
                            let swarm = Swarm::new(
                                config.clone(),
                                UniformFactory::new(vec![(-5.12, 5.12); *ndim]),
                                Rng::with_seed(0),
                            )
                            .unwrap();
                            (problem, swarm)
                        },
                        |(problem, mut swarm)| {
                            let result = swarm.run(&problem, &mut ()).unwrap();
                            black_box(result);
                        },
                        BatchSize::SmallInput,
                    );
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, pso_benchmark);
criterion_main!(benches);
