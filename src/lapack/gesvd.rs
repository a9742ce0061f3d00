//! Singular value decomposition (`?gesvd`).
//!
//! `A = U·Σ·Vᴴ` with the singular values in `s` in descending order. Left
//! vectors go to `u` and `Vᴴ` (not `V`) goes to `vt`, as in the reference
//! routine. faer computes the decomposition of a copy of `A` scaled by a
//! power of two, so entries near the overflow or underflow threshold keep
//! full accuracy.

use std::cmp::Ordering;

use crate::config::{NormKind, SvdJob};
use crate::core::{RealScalar, Scalar};
use crate::lapack::blas::required_len;
use crate::lapack::bridge::parallelism;
use crate::lapack::lange;
use dyn_stack::{MemBuffer, MemStack};
use faer::Mat;
use faer::diag::Diag;
use faer::linalg::svd::{ComputeSvdVectors, svd, svd_scratch};
use num_traits::{Float, One, ToPrimitive};

/// Minimal `work` length accepted by [`gesvd`] for an `m`×`n` operand.
pub fn gesvd_work_len<T: Scalar>(m: usize, n: usize) -> usize {
    let (lo, hi) = (m.min(n), m.max(n));
    if T::IS_COMPLEX {
        (2 * lo + hi).max(1)
    } else {
        (3 * lo + hi).max(5 * lo).max(1)
    }
}

/// Minimal `rwork` length accepted by [`gesvd`]; zero for real types.
pub fn gesvd_rwork_len<T: Scalar>(m: usize, n: usize) -> usize {
    if T::IS_COMPLEX { 5 * m.min(n) } else { 0 }
}

fn job_cols(job: SvdJob, full: usize, thin: usize) -> usize {
    match job {
        SvdJob::All => full,
        SvdJob::Thin => thin,
        SvdJob::None => 0,
    }
}

fn faer_job(job: SvdJob) -> ComputeSvdVectors {
    match job {
        SvdJob::All => ComputeSvdVectors::Full,
        SvdJob::Thin => ComputeSvdVectors::Thin,
        SvdJob::None => ComputeSvdVectors::No,
    }
}

// Power of two within a factor of two of `amax`, or `None` when `amax` is
// zero, subnormal or not finite.
fn power_of_two_scale<R: RealScalar>(amax: R) -> Option<R> {
    if !amax.is_normal() {
        return None;
    }
    let e = amax.log2().floor().to_i32()?;
    Some(R::from_f64(2.0).powi(e))
}

/// Compute the SVD of the `m`×`n` matrix `a`.
///
/// # Arguments
/// * `jobu` - All `m` (`All`), the first `min(m, n)` (`Thin`) or no
///   (`None`) columns of `U`.
/// * `jobvt` - The same choice for the rows of `Vᴴ`.
/// * `m`, `n` - Dimensions of `a`.
/// * `a`, `lda` - Operand and its leading dimension; `a` is not modified.
/// * `s` - Receives the `min(m, n)` singular values, largest first.
/// * `u`, `ldu` - Left singular vectors, column by column.
/// * `vt`, `ldvt` - `Vᴴ`, row by row.
/// * `work` - Workspace of at least [`gesvd_work_len`] entries (`lwork`).
/// * `rwork` - Real workspace of at least [`gesvd_rwork_len`] entries.
///
/// # Returns
/// `0`; `min(m, n)` when faer's iteration does not converge, with `s`
/// holding its last estimates; or `-p` for an illegal argument `p` (jobu=1,
/// jobvt=2, m=3, n=4, a=5, lda=6, s=7, u=8, ldu=9, vt=10, ldvt=11, work=12,
/// lwork=13, rwork=14).
#[allow(clippy::too_many_arguments)]
pub fn gesvd<T: Scalar>(
    jobu: SvdJob,
    jobvt: SvdJob,
    m: usize,
    n: usize,
    a: &mut [T],
    lda: usize,
    s: &mut [T::Real],
    u: &mut [T],
    ldu: usize,
    vt: &mut [T],
    ldvt: usize,
    work: &[T],
    rwork: &[T::Real],
) -> i32 {
    let k = m.min(n);
    if lda < m.max(1) {
        return -6;
    }
    if a.len() < required_len(m, n, lda) {
        return -5;
    }
    if s.len() < k {
        return -7;
    }
    let ucols = job_cols(jobu, m, k);
    if ldu < 1 || (ucols > 0 && ldu < m) {
        return -9;
    }
    if u.len() < required_len(m, ucols, ldu) {
        return -8;
    }
    let vtrows = job_cols(jobvt, n, k);
    if ldvt < vtrows.max(1) {
        return -11;
    }
    if vt.len() < required_len(vtrows, n, ldvt) {
        return -10;
    }
    if work.len() < gesvd_work_len::<T>(m, n) {
        return -13;
    }
    if rwork.len() < gesvd_rwork_len::<T>(m, n) {
        return -14;
    }
    if k == 0 {
        return 0;
    }
    log::trace!("{}gesvd: m={} n={} jobu={:?} jobvt={:?}", T::PREFIX, m, n, jobu, jobvt);

    let scale = power_of_two_scale(lange::<T>(NormKind::MaxAbs, m, n, a, lda, &mut []));
    let inv = scale.map_or_else(T::Real::one, |c| T::Real::one() / c);
    let scaled = Mat::from_fn(m, n, |i, j| a[j * lda + i].mul_real(inv).into_faer());

    let par = parallelism();
    let (compute_u, compute_v) = (faer_job(jobu), faer_job(jobvt));
    let mut sigma = Diag::<T::Faer>::zeros(k);
    let mut u_mat = Mat::<T::Faer>::zeros(m, ucols);
    let mut v_mat = Mat::<T::Faer>::zeros(n, vtrows);
    let u_out = if ucols > 0 { Some(u_mat.as_mut()) } else { None };
    let v_out = if vtrows > 0 { Some(v_mat.as_mut()) } else { None };
    let converged = svd(
        scaled.as_ref(),
        sigma.as_mut(),
        u_out,
        v_out,
        par,
        MemStack::new(&mut MemBuffer::new(svd_scratch::<T::Faer>(m, n, compute_u, compute_v, par, Default::default()))),
        Default::default(),
    )
    .is_ok();

    let values: Vec<T::Real> = sigma
        .column_vector()
        .iter()
        .map(|&x| T::from_faer(x).re() * scale.unwrap_or_else(T::Real::one))
        .collect();
    let mut order: Vec<usize> = (0..k).collect();
    order.sort_by(|&x, &y| values[y].partial_cmp(&values[x]).unwrap_or(Ordering::Equal));
    for (dst, &j) in s.iter_mut().zip(&order) {
        *dst = values[j];
    }

    // Columns past min(m, n) span the null space and keep faer's order.
    let source = |c: usize| if c < k { order[c] } else { c };
    for c in 0..ucols {
        for i in 0..m {
            u[c * ldu + i] = T::from_faer(u_mat[(i, source(c))]);
        }
    }
    for r in 0..vtrows {
        for j in 0..n {
            vt[j * ldvt + r] = T::from_faer(v_mat[(j, source(r))]).conj();
        }
    }

    if converged {
        0
    } else {
        log::debug!("{}gesvd: faer did not converge on {}x{}", T::PREFIX, m, n);
        k as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use num_complex::Complex;

    fn reconstruct(m: usize, n: usize, u: &[f64], s: &[f64], vt: &[f64]) -> Vec<f64> {
        let k = m.min(n);
        let mut out = vec![0.0; m * n];
        for j in 0..n {
            for i in 0..m {
                out[j * m + i] = (0..k).map(|l| u[l * m + i] * s[l] * vt[j * n + l]).sum();
            }
        }
        out
    }

    fn run(m: usize, n: usize, a: &[f64]) -> (Vec<f64>, Vec<f64>, Vec<f64>, i32) {
        let mut work_a = a.to_vec();
        let mut s = vec![0.0; m.min(n)];
        let mut u = vec![0.0; m * m];
        let mut vt = vec![0.0; n * n];
        let work = vec![0.0; gesvd_work_len::<f64>(m, n)];
        let info = gesvd(SvdJob::All, SvdJob::All, m, n, &mut work_a, m, &mut s, &mut u, m, &mut vt, n, &work, &[]);
        (s, u, vt, info)
    }

    #[test]
    fn diagonal_values_are_sorted() {
        // diag(1, 3) as a 2x2
        let (s, _, _, info) = run(2, 2, &[1.0, 0.0, 0.0, 3.0]);
        assert_eq!(info, 0);
        assert_abs_diff_eq!(s[0], 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn tall_and_wide_reconstruct() {
        let tall = [1.0, 2.0, 3.0, 4.0, -1.0, 0.5, 2.0, 0.0, 1.0, 1.0, 3.0, -2.0];
        for (m, n) in [(4, 3), (3, 4)] {
            let (s, u, vt, info) = run(m, n, &tall);
            assert_eq!(info, 0);
            assert!(s.windows(2).all(|w| w[0] >= w[1]) && s.iter().all(|&x| x >= 0.0));
            let back = reconstruct(m, n, &u, &s, &vt);
            for (x, y) in back.iter().zip(&tall) {
                assert_abs_diff_eq!(x, y, epsilon = 1e-10);
            }
            // Full U is orthonormal.
            for p in 0..m {
                for q in 0..m {
                    let d: f64 = (0..m).map(|i| u[p * m + i] * u[q * m + i]).sum();
                    assert_abs_diff_eq!(d, if p == q { 1.0 } else { 0.0 }, epsilon = 1e-10);
                }
            }
        }
    }

    #[test]
    fn rank_deficient_completes_u() {
        // Rank one 3x2: both columns equal.
        let (s, u, _, info) = run(3, 2, &[1.0, 1.0, 1.0, 1.0, 1.0, 1.0]);
        assert_eq!(info, 0);
        assert_abs_diff_eq!(s[0], 6.0f64.sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(s[1], 0.0, epsilon = 1e-12);
        for p in 0..3 {
            for q in 0..3 {
                let d: f64 = (0..3).map(|i| u[p * 3 + i] * u[q * 3 + i]).sum();
                assert_abs_diff_eq!(d, if p == q { 1.0 } else { 0.0 }, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn complex_values_only() {
        // Columns of [[1, i], [i, 1]] are orthogonal with norm √2.
        let i = Complex::new(0.0f64, 1.0);
        let one = Complex::new(1.0, 0.0);
        let mut a = vec![one, i, i, one];
        let mut s = vec![0.0; 2];
        let work = vec![Complex::new(0.0, 0.0); gesvd_work_len::<Complex<f64>>(2, 2)];
        let rwork = vec![0.0; gesvd_rwork_len::<Complex<f64>>(2, 2)];
        let info = gesvd(SvdJob::None, SvdJob::None, 2, 2, &mut a, 2, &mut s, &mut [], 1, &mut [], 1, &work, &rwork);
        assert_eq!(info, 0);
        assert_abs_diff_eq!(s[0], 2.0f64.sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(s[1], 2.0f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn scaled_input_keeps_its_values() {
        // [[1, 2], [3, 4]] has singular values 5.4649857..., 0.3659661...
        let expected = [5.464985704219043, 0.36596619062625746];
        for factor in [1e160, 1e-170] {
            let a: Vec<f64> = [1.0, 3.0, 2.0, 4.0].iter().map(|x| x * factor).collect();
            let (s, u, vt, info) = run(2, 2, &a);
            assert_eq!(info, 0);
            for (x, e) in s.iter().zip(expected) {
                assert_abs_diff_eq!(x / factor, e, epsilon = 1e-12);
            }
            let back = reconstruct(2, 2, &u, &s, &vt);
            for (x, y) in back.iter().zip(&a) {
                assert_abs_diff_eq!(x / factor, y / factor, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn scale_is_a_nearby_power_of_two() {
        assert_eq!(power_of_two_scale(3.0f64), Some(2.0));
        assert_eq!(power_of_two_scale(1e-300f64).map(|c| c.log2().fract()), Some(0.0));
        assert_eq!(power_of_two_scale(0.0f32), None);
        assert_eq!(power_of_two_scale(f64::NAN), None);
    }

    #[test]
    fn zero_matrix_has_zero_values() {
        let (s, u, _, info) = run(2, 3, &[0.0; 6]);
        assert_eq!(info, 0);
        assert_eq!(s, [0.0, 0.0]);
        let d: f64 = (0..2).map(|i| u[i] * u[i]).sum();
        assert_abs_diff_eq!(d, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn illegal_arguments() {
        let mut a = vec![0.0f64; 4];
        let mut s = vec![0.0; 2];
        let work = vec![0.0; 1];
        assert_eq!(
            gesvd(SvdJob::None, SvdJob::None, 2, 2, &mut a, 2, &mut s, &mut [], 1, &mut [], 1, &work, &[]),
            -13
        );
        let work = vec![0.0; gesvd_work_len::<f64>(2, 2)];
        assert_eq!(
            gesvd(SvdJob::All, SvdJob::None, 2, 2, &mut a, 2, &mut s, &mut [], 1, &mut [], 1, &work, &[]),
            -9
        );
    }
}
