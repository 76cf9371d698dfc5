use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use cxkeys_core::{generate, verify_by_pubkey, Sha256Hash};
use cxkeys_suite::{validate, validate_parallel};
use cxkeys_testkit::TestFixture;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for n in [1usize, 8, 32] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(generate(b"bench-seed", n)));
        });
    }
    group.finish();
}

fn bench_sign(c: &mut Criterion) {
    let pair = match generate(b"bench-seed", 1) {
        Ok(mut pairs) => pairs.remove(0),
        Err(e) => panic!("bench seed failed: {}", e),
    };
    let digest = Sha256Hash::hash(b"bench-digest");

    c.bench_function("sign", |b| {
        b.iter(|| black_box(pair.sign(&digest)));
    });

    let Ok(sig) = pair.sign(&digest) else {
        panic!("bench signing failed");
    };
    c.bench_function("verify_by_pubkey", |b| {
        b.iter(|| black_box(verify_by_pubkey(&sig, &digest, &pair.public)));
    });
}

fn bench_validate(c: &mut Criterion) {
    let fixture = TestFixture::new(b"bench-seed", 16, 4);
    c.bench_function("validate_sequential", |b| {
        b.iter(|| black_box(validate(&fixture.vector, fixture.input())));
    });
    c.bench_function("validate_parallel", |b| {
        b.iter(|| black_box(validate_parallel(&fixture.vector, fixture.input())));
    });
}

criterion_group!(benches, bench_generate, bench_sign, bench_validate);
criterion_main!(benches);
