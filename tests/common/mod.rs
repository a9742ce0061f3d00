//! Shared fixtures for the integration tests: seeded random matrices and
//! small dense helpers written against `linfac::Scalar`.
#![allow(dead_code)]

use linfac::{RealScalar, Scalar};
use num_complex::Complex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Random `m`×`n` column-major matrix with entries in [-1, 1).
pub fn random_real(rng: &mut StdRng, m: usize, n: usize) -> Vec<f64> {
    (0..m * n).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

pub fn random_complex(rng: &mut StdRng, m: usize, n: usize) -> Vec<Complex<f64>> {
    (0..m * n)
        .map(|_| Complex::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
        .collect()
}

/// Add `shift` to the diagonal of the square column-major matrix `a`.
pub fn shift_diagonal<T: Scalar>(n: usize, a: &mut [T], shift: T::Real) {
    for i in 0..n {
        a[i * n + i] += T::from_real(shift);
    }
}

/// `A·B` for column-major `A` (`m`×`k`) and `B` (`k`×`n`).
pub fn matmul<T: Scalar>(m: usize, k: usize, n: usize, a: &[T], b: &[T]) -> Vec<T> {
    let mut c = vec![T::zero(); m * n];
    for j in 0..n {
        for l in 0..k {
            let blj = b[j * k + l];
            for i in 0..m {
                c[j * m + i] += a[l * m + i] * blj;
            }
        }
    }
    c
}

/// `Aᴴ` (`n`×`m`) of the `m`×`n` matrix `a`.
pub fn adjoint<T: Scalar>(m: usize, n: usize, a: &[T]) -> Vec<T> {
    let mut t = vec![T::zero(); m * n];
    for j in 0..n {
        for i in 0..m {
            t[i * n + j] = a[j * m + i].conj();
        }
    }
    t
}

/// Hermitian positive-definite `Bᴴ·B + n·I` from a random square `b`.
pub fn hermitian_pd<T: Scalar>(n: usize, b: &[T]) -> Vec<T> {
    let mut a = matmul(n, n, n, &adjoint(n, n, b), b);
    shift_diagonal(n, &mut a, T::Real::from_f64(n as f64));
    a
}

/// Largest entrywise modulus of `a - b`.
pub fn max_diff<T: Scalar>(a: &[T], b: &[T]) -> T::Real {
    assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(&x, &y)| (x - y).modulus())
        .fold(T::Real::from_f64(0.0), |acc, d| if d > acc { d } else { acc })
}

/// `n`×`n` identity.
pub fn identity<T: Scalar>(n: usize) -> Vec<T> {
    let mut a = vec![T::zero(); n * n];
    for i in 0..n {
        a[i * n + i] = T::one();
    }
    a
}
