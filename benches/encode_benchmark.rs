use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fragrs::{select_line, CoefficientMatrix, EncoderConfig, FragmentEncoder, RedundancyIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

/// Fragment size used by the reference FUOTA deployment
const FRAGMENT_SIZE: usize = 226;

fn random_input(len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let mut input = vec![0u8; len];
    rng.fill(&mut input[..]);
    input
}

/// Coefficient line generation across row counts (power of two and not)
fn bench_select_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_line");
    let index = RedundancyIndex::new(1).unwrap();

    for rows in [100usize, 256, 1000, 4096] {
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, &rows| {
            b.iter(|| select_line(black_box(index), black_box(rows)).unwrap());
        });
    }

    group.finish();
}

/// Full matrix, sequential vs parallel
fn bench_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("coefficient_matrix");
    let rows = 1000;
    let redundancy = 200;

    group.bench_function("sequential", |b| {
        b.iter(|| CoefficientMatrix::build(black_box(redundancy), black_box(rows)).unwrap());
    });
    group.bench_function("parallel", |b| {
        b.iter(|| {
            CoefficientMatrix::build_parallel(black_box(redundancy), black_box(rows)).unwrap()
        });
    });

    group.finish();
}

/// End-to-end encoding of firmware-sized images
fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for size in [64 * 1024usize, 256 * 1024] {
        let input = random_input(size);
        let redundancy = size / FRAGMENT_SIZE / 10;
        group.throughput(Throughput::Bytes(size as u64));

        for parallel in [false, true] {
            let encoder = FragmentEncoder::new(
                EncoderConfig::new(FRAGMENT_SIZE, redundancy).with_parallel(parallel),
            )
            .unwrap();
            let label = if parallel { "parallel" } else { "sequential" };
            group.bench_with_input(BenchmarkId::new(label, size), &input, |b, input| {
                b.iter(|| encoder.encode(black_box(input)).unwrap());
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_select_line, bench_matrix, bench_encode);
criterion_main!(benches);
