//! Integration tests for the Cholesky facade.

mod common;

use common::{adjoint, hermitian_pd, matmul, max_diff, random_complex, random_real, rng};
use linfac::LaError;
use linfac::factor::cholesky;
use num_complex::Complex;

/// The factor is lower triangular with an exactly zero strict upper triangle
/// and reconstructs the input.
#[test]
fn factor_is_clean_and_reconstructs() {
    let mut rng = rng(23);
    let n = 10;
    let b = random_real(&mut rng, n, n);
    let a = hermitian_pd(n, &b);

    let mut l = a.clone();
    cholesky::factor(n, &mut l).unwrap();
    for j in 0..n {
        for i in 0..j {
            assert_eq!(l[j * n + i], 0.0, "L[{i},{j}] must be zero");
        }
    }
    let llt = matmul(n, n, n, &l, &adjoint(n, n, &l));
    assert!(max_diff(&llt, &a) < 1e-11);
}

#[test]
fn complex_hermitian_factor() {
    let mut rng = rng(29);
    let n = 6;
    let b = random_complex(&mut rng, n, n);
    let a = hermitian_pd(n, &b);

    let mut l = a.clone();
    cholesky::factor(n, &mut l).unwrap();
    for i in 0..n {
        assert_eq!(l[i * n + i].im, 0.0, "diagonal of L is real");
        assert!(l[i * n + i].re > 0.0);
    }
    let llh = matmul(n, n, n, &l, &adjoint(n, n, &l));
    assert!(max_diff(&llh, &a) < 1e-11);
}

#[test]
fn solve_and_solve_factored_agree() {
    let mut rng = rng(31);
    let n = 8;
    let nrhs = 3;
    let b = random_complex(&mut rng, n, n);
    let a = hermitian_pd(n, &b);
    let x_true = random_complex(&mut rng, n, nrhs);
    let rhs = matmul(n, n, nrhs, &a, &x_true);

    let a_before = a.clone();
    let mut x = rhs.clone();
    cholesky::solve(n, nrhs, &a, &mut x).unwrap();
    assert_eq!(a, a_before);
    assert!(max_diff(&x, &x_true) < 1e-12);

    let mut l = a.clone();
    cholesky::factor(n, &mut l).unwrap();
    let mut x2 = rhs.clone();
    cholesky::solve_factored(n, nrhs, &l, &mut x2).unwrap();
    assert!(max_diff(&x2, &x_true) < 1e-12);

    // Repeatable against the same factor.
    let mut x3 = rhs.clone();
    cholesky::solve_factored(n, nrhs, &l, &mut x3).unwrap();
    assert_eq!(x2, x3);
}

/// A negative diagonal entry at 0-based `k` fails with status `k + 1`.
#[test]
fn non_positive_definite_reports_leading_minor() {
    for k in 0..4 {
        let n = 4;
        let mut a = vec![0.0f64; n * n];
        for i in 0..n {
            a[i * n + i] = if i == k { -1.0 } else { 2.0 };
        }
        let mut f = a.clone();
        let err = cholesky::factor(n, &mut f).unwrap_err();
        assert_eq!(err, LaError::NotPositiveDefinite(k + 1));
        assert_eq!(err.status(), (k + 1) as i32);

        let mut rhs = vec![1.0; n];
        assert_eq!(cholesky::solve(n, 1, &a, &mut rhs), Err(LaError::NotPositiveDefinite(k + 1)));
        assert_eq!(rhs, vec![1.0; n], "rhs untouched on failure");
    }
}

#[test]
fn single_precision_complex() {
    // [[4, 2i], [-2i, 5]] = L·Lᴴ with L = [[2, 0], [-i, 2]]
    let a = vec![
        Complex::new(4.0f32, 0.0),
        Complex::new(0.0, -2.0),
        Complex::new(0.0, 2.0),
        Complex::new(5.0, 0.0),
    ];
    let mut l = a.clone();
    cholesky::factor(2, &mut l).unwrap();
    assert!((l[0] - Complex::new(2.0, 0.0)).norm() < 1e-6);
    assert!((l[1] - Complex::new(0.0, -1.0)).norm() < 1e-6);
    assert_eq!(l[2], Complex::new(0.0, 0.0));
    assert!((l[3] - Complex::new(2.0, 0.0)).norm() < 1e-6);
}
