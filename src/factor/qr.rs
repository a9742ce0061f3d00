//! Householder QR factorization and least-squares solves.
//!
//! `factor` keeps the compact form in `r` (R on and above the diagonal,
//! reflectors below, scalar factors in `tau`) and also expands an explicit
//! `Q`: `m`×`m` when `m <= n`, the thin `m`×`n` factor when `m > n`.
//!
//! The solves compute `x = R⁻¹·(Qᴴ·b)[..n]`, the least-squares solution for
//! `m >= n`. Their output goes to a separate `n`×`nrhs` buffer; `r` and `b`
//! are never modified.

use crate::config::{Diag, Side, Transpose, Uplo};
use crate::core::Scalar;
use crate::error::{LaError, LaResult};
use crate::factor::{ensure_len, ld};
use crate::lapack;

/// Workspace length accepted by every function in this module for an
/// `m`×`n` system with `nrhs` right-hand sides (use `0` for [`factor`]).
pub fn work_len(m: usize, n: usize, nrhs: usize) -> usize {
    let k = m.min(n);
    lapack::geqrf_work_len(n)
        .max(lapack::ungqr_work_len(k))
        .max(lapack::unmqr_work_len(Side::Left, m, nrhs))
}

/// Factor the `m`×`n` matrix `r` in place and expand the explicit `Q` into `q`.
///
/// # Arguments
/// * `m`, `n` - Dimensions of `r`.
/// * `r` - Column-major matrix, overwritten with the compact factors.
/// * `tau` - Receives `min(m, n)` reflector factors.
/// * `q` - Receives the `m`×`min(m, n)` explicit `Q`.
/// * `work` - At least [`work_len`]`(m, n, 0)` entries.
///
/// # Returns
/// `Ok(())`, or [`LaError::InvalidArgument`] for a short buffer.
pub fn factor<T: Scalar>(m: usize, n: usize, r: &mut [T], tau: &mut [T], q: &mut [T], work: &mut [T]) -> LaResult<()> {
    let k = m.min(n);
    ensure_len(q, m * k, 5)?;
    let info = lapack::geqrf(m, n, r, ld(m), tau, work);
    if info != 0 {
        log::debug!("qr::factor: geqrf returned {info}");
        return LaError::check_info(info, LaError::ZeroPivot);
    }
    // Seed q with the reflectors of the first k columns.
    for j in 0..k {
        q[j * m + j + 1..(j + 1) * m].copy_from_slice(&r[j * m + j + 1..(j + 1) * m]);
    }
    LaError::check_info(lapack::ungqr(m, k, k, q, ld(m), tau, work), LaError::ZeroPivot)
}

/// Least-squares solve of `A·X = B` into `x` (`n`×`nrhs`).
///
/// # Arguments
/// * `m`, `n`, `nrhs` - Dimensions of `A` (`m >= n`) and `B`'s column count.
/// * `r` - `A`, column-major; not modified.
/// * `b` - `m`×`nrhs` right-hand sides; not modified.
/// * `x` - Receives the `n`×`nrhs` solution.
/// * `work` - At least [`work_len`]`(m, n, nrhs)` entries.
///
/// # Returns
/// `Ok(())`, or [`LaError::InvalidArgument`] for a short buffer or `m < n`.
/// `x` is left untouched on failure.
#[allow(clippy::too_many_arguments)]
pub fn solve<T: Scalar>(m: usize, n: usize, nrhs: usize, r: &[T], b: &[T], x: &mut [T], work: &mut [T]) -> LaResult<()> {
    ensure_len(x, n * nrhs, 6)?;
    let mut qr = r.to_vec();
    let mut tau = vec![T::zero(); m.min(n)];
    let info = lapack::geqrf(m, n, &mut qr, ld(m), &mut tau, work);
    if info != 0 {
        log::debug!("qr::solve: geqrf returned {info}");
        return LaError::check_info(info, LaError::ZeroPivot);
    }
    apply_and_solve(m, n, nrhs, &qr, &tau, b, x, work)
}

/// Least-squares solve of `A·X = B` into `x` from the compact factors
/// (`r`, `tau`) produced by [`factor`]. Arguments and result are as for
/// [`solve`], with `tau` after `b`.
#[allow(clippy::too_many_arguments)]
pub fn solve_factored<T: Scalar>(
    m: usize,
    n: usize,
    nrhs: usize,
    r: &[T],
    b: &[T],
    tau: &[T],
    x: &mut [T],
    work: &mut [T],
) -> LaResult<()> {
    ensure_len(x, n * nrhs, 7)?;
    apply_and_solve(m, n, nrhs, r, tau, b, x, work)
}

#[allow(clippy::too_many_arguments)]
fn apply_and_solve<T: Scalar>(
    m: usize,
    n: usize,
    nrhs: usize,
    r: &[T],
    tau: &[T],
    b: &[T],
    x: &mut [T],
    work: &mut [T],
) -> LaResult<()> {
    let mut c = b.to_vec();
    let trans = Transpose::adjoint(T::IS_COMPLEX);
    let info = lapack::unmqr(Side::Left, trans, m, nrhs, n, r, ld(m), tau, &mut c, ld(m), work);
    if info != 0 {
        log::debug!("qr: applying Qᴴ returned {info}");
        return LaError::check_info(info, LaError::ZeroPivot);
    }
    // unmqr has checked n <= m and the lengths of r and c.
    lapack::trsm_left(Uplo::Upper, Transpose::No, Diag::NonUnit, n, nrhs, T::one(), r, ld(m), &mut c, ld(m));
    for j in 0..nrhs {
        x[j * n..(j + 1) * n].copy_from_slice(&c[j * m..j * m + n]);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn square_system_is_solved_exactly() {
        // A = [[2, 1], [1, 3]], x = [1, -1] => b = [1, -2]
        let a = vec![2.0f64, 1.0, 1.0, 3.0];
        let b = vec![1.0, -2.0];
        let mut x = vec![0.0; 2];
        let mut work = vec![0.0; work_len(2, 2, 1)];
        solve(2, 2, 1, &a, &b, &mut x, &mut work).unwrap();
        assert_abs_diff_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], -1.0, epsilon = 1e-12);
    }

    #[test]
    fn factored_solve_agrees() {
        let a = vec![1.0f64, 1.0, 1.0, 1.0, 2.0, 3.0];
        let b = vec![1.0, 2.0, 2.0];
        let mut work = vec![0.0; work_len(3, 2, 1)];

        let mut r = a.clone();
        let mut tau = vec![0.0; 2];
        let mut q = vec![0.0; 6];
        factor(3, 2, &mut r, &mut tau, &mut q, &mut work).unwrap();

        let mut x1 = vec![0.0; 2];
        let mut x2 = vec![0.0; 2];
        solve(3, 2, 1, &a, &b, &mut x1, &mut work).unwrap();
        solve_factored(3, 2, 1, &r, &b, &tau, &mut x2, &mut work).unwrap();
        // Fit of y = c0 + c1·t through (1,1), (2,2), (3,2).
        assert_abs_diff_eq!(x1[0], 2.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x1[1], 0.5, epsilon = 1e-12);
        assert_eq!(x1, x2);
    }

    #[test]
    fn wide_solve_is_rejected_without_touching_output() {
        let a = vec![1.0f64; 6];
        let b = vec![1.0; 2];
        let mut x = vec![7.0; 3];
        let mut work = vec![0.0; work_len(2, 3, 1)];
        assert_eq!(solve(2, 3, 1, &a, &b, &mut x, &mut work), Err(LaError::InvalidArgument(5)));
        assert_eq!(x, vec![7.0; 3]);
    }
}
