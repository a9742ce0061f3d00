//! Integration tests for matrix norms.

mod common;

use approx::assert_abs_diff_eq;
use common::{random_complex, random_real, rng};
use linfac::config::NormKind;
use linfac::factor::matrix_norm;

#[test]
fn norms_match_direct_definitions() {
    let mut rng = rng(83);
    let (m, n) = (9, 6);
    let a = random_real(&mut rng, m, n);
    let mut work = vec![0.0; m];

    let col_sums = (0..n).map(|j| (0..m).map(|i| a[j * m + i].abs()).sum::<f64>());
    let row_sums = (0..m).map(|i| (0..n).map(|j| a[j * m + i].abs()).sum::<f64>());
    let one = col_sums.fold(0.0, f64::max);
    let inf = row_sums.fold(0.0, f64::max);
    let fro = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let max = a.iter().fold(0.0f64, |acc, x| acc.max(x.abs()));

    assert_abs_diff_eq!(matrix_norm(NormKind::One, m, n, &a, &mut work), one, epsilon = 1e-12);
    assert_abs_diff_eq!(matrix_norm(NormKind::Infinity, m, n, &a, &mut work), inf, epsilon = 1e-12);
    assert_abs_diff_eq!(matrix_norm(NormKind::Frobenius, m, n, &a, &mut work), fro, epsilon = 1e-12);
    assert_abs_diff_eq!(matrix_norm(NormKind::MaxAbs, m, n, &a, &mut work), max, epsilon = 0.0);
}

#[test]
fn complex_frobenius_is_root_sum_of_moduli_squared() {
    let mut rng = rng(89);
    let (m, n) = (4, 7);
    let a = random_complex(&mut rng, m, n);
    let fro = a.iter().map(|z| z.norm_sqr()).sum::<f64>().sqrt();
    assert_abs_diff_eq!(matrix_norm(NormKind::Frobenius, m, n, &a, &mut []), fro, epsilon = 1e-12);
}

/// Norms other than the infinity norm accept an empty workspace; the
/// infinity norm without one yields NaN.
#[test]
fn workspace_only_needed_for_infinity() {
    let a = [3.0f32, -4.0];
    assert_eq!(matrix_norm(NormKind::One, 2, 1, &a, &mut []), 7.0);
    assert!(matrix_norm(NormKind::Infinity, 2, 1, &a, &mut []).is_nan());
    let mut work = [0.0f32; 2];
    assert_eq!(matrix_norm(NormKind::Infinity, 2, 1, &a, &mut work), 4.0);
}

#[test]
fn empty_matrix_has_zero_norm() {
    for kind in [NormKind::One, NormKind::Infinity, NormKind::Frobenius, NormKind::MaxAbs] {
        assert_eq!(matrix_norm::<f64>(kind, 0, 3, &[], &mut []), 0.0);
    }
}
