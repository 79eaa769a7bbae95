use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use universe::{Seed, Universe};

fn bench_ticks(c: &mut Criterion) {
    let mut group = c.benchmark_group("universe_tick");
    // Grid sides can be overridden via LIFE_BENCH_SIDES=64,256
    let sides: Vec<usize> = std::env::var("LIFE_BENCH_SIDES")
        .ok()
        .map(|s| {
            s.split(',')
                .filter_map(|t| t.trim().parse::<usize>().ok())
                .filter(|v| *v > 0)
                .collect::<Vec<_>>()
        })
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| vec![64_usize, 256]);

    for &side in &sides {
        group.bench_function(format!("random_{side}x{side}"), |b| {
            b.iter_batched(
                || Universe::with_seed(side, side, Seed::Random(0xBEEF)).expect("bench universe"),
                |mut universe| {
                    universe.tick();
                    universe
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_ticks);
criterion_main!(benches);
