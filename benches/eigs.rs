use criterion::{criterion_group, criterion_main, Criterion};
use eigs::{
    c64, eigs,
    linalg::evd::{compute_evd, compute_symmetric_evd, ComputeVectors, EvdParams},
    mat, EigsOptions, Mat,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_symmetric(n: usize, rng: &mut StdRng) -> Mat<f64> {
    let a = Mat::from_fn(n, n, |_, _| rng.gen_range(-1.0..1.0));
    Mat::from_fn(n, n, |i, j| a.read(i, j) + a.read(j, i))
}

/// Upper triangular plus a small lower part, so that the spectrum stays real and well separated.
fn random_general(n: usize, rng: &mut StdRng) -> Mat<f64> {
    Mat::from_fn(n, n, |i, j| {
        if i == j {
            (i + 1) as f64
        } else if i < j {
            rng.gen_range(-1.0..1.0)
        } else {
            0.01 * rng.gen_range(-1.0..1.0)
        }
    })
}

pub fn symmetric(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    for n in [4, 16, 32] {
        let a = random_symmetric(n, &mut rng);
        c.bench_function(&format!("eigs-jacobi-{n}"), |b| {
            b.iter(|| compute_symmetric_evd(&a, 1e-12, ComputeVectors::Yes))
        });
    }
}

pub fn general(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let params = EvdParams {
        seed: Some(0),
        ..Default::default()
    };
    for n in [4, 16, 32] {
        let a = random_general(n, &mut rng);
        c.bench_function(&format!("eigs-shifted-qr-values-{n}"), |b| {
            b.iter(|| compute_evd(&a, 1e-12, ComputeVectors::No, params))
        });
        c.bench_function(&format!("eigs-shifted-qr-vectors-{n}"), |b| {
            b.iter(|| compute_evd(&a, 1e-12, ComputeVectors::Yes, params))
        });

        let a = a.map(|&x| c64::new(x, 0.0));
        c.bench_function(&format!("eigs-shifted-qr-c64-{n}"), |b| {
            b.iter(|| compute_evd(&a, 1e-12, ComputeVectors::Yes, params))
        });
    }
}

pub fn dispatch(c: &mut Criterion) {
    let a = mat![[0.0, 1.0, 0.0], [-1.0, 0.0, 0.0], [0.0, 0.0, 2.0]];
    c.bench_function("eigs-dispatch-promotion-3", |b| {
        b.iter(|| eigs(&a, EigsOptions::default()))
    });
}

criterion_group!(benches, symmetric, general, dispatch);
criterion_main!(benches);
