//! LU factorization with partial pivoting, inversion and solves.
//!
//! `factor` leaves the packed `L\U` factors in place and the 0-based pivots
//! in `pivots`; `invert_factored` and `solve_factored*` reuse them any number
//! of times. `invert` and `solve` do the whole sequence in one call.
//!
//! # Usage
//! ```
//! use linfac::factor::lu;
//!
//! let mut a = vec![4.0f64, 6.0, 3.0, 3.0];
//! let mut pivots = [0usize; 2];
//! lu::factor(2, &mut a, &mut pivots).unwrap();
//! let mut b = vec![10.0, 12.0];
//! lu::solve_factored(2, 1, &a, &pivots, &mut b).unwrap();
//! assert!((b[0] - 1.0).abs() < 1e-12);
//! ```

use crate::config::Transpose;
use crate::core::Scalar;
use crate::error::{LaError, LaResult};
use crate::factor::{ensure_len, ld};
use crate::lapack;
use crate::utils::pivots::{store_zero_based, to_one_based};

/// Factor the `n`×`n` matrix `a` in place as `P·A = L·U`.
///
/// # Arguments
/// * `n` - Order of `a`.
/// * `a` - Column-major matrix, overwritten with the packed `L\U` factors.
/// * `pivots` - Receives `n` 0-based row interchanges.
///
/// # Returns
/// `Ok(())`, or [`LaError::ZeroPivot`] with the 1-based step of the first
/// zero pivot. The factors and `pivots` are still written in that case.
pub fn factor<T: Scalar>(n: usize, a: &mut [T], pivots: &mut [usize]) -> LaResult<()> {
    ensure_len(pivots, n, 3)?;
    let mut ipiv = vec![0i32; n];
    let info = lapack::getrf(n, n, a, ld(n), &mut ipiv);
    if info >= 0 {
        store_zero_based(&ipiv, pivots);
    }
    LaError::check_info(info, LaError::ZeroPivot).inspect_err(|e| log::debug!("lu::factor: {e}"))
}

/// Overwrite `a` with its inverse.
///
/// # Arguments
/// * `n` - Order of `a`.
/// * `a` - Column-major matrix, overwritten with `inv(A)`.
/// * `work` - At least [`lapack::getri_work_len`] entries.
///
/// # Returns
/// `Ok(())`, or [`LaError::ZeroPivot`] when `A` is singular, leaving `a`
/// holding the factors.
pub fn invert<T: Scalar>(n: usize, a: &mut [T], work: &mut [T]) -> LaResult<()> {
    let mut ipiv = vec![0i32; n];
    let info = lapack::getrf(n, n, a, ld(n), &mut ipiv);
    if info != 0 {
        log::debug!("lu::invert: factorization returned {info}");
        return LaError::check_info(info, LaError::ZeroPivot);
    }
    LaError::check_info(lapack::getri(n, a, ld(n), &ipiv, work), LaError::ZeroPivot)
}

/// Overwrite the factors from [`factor`] with the inverse.
///
/// # Arguments
/// * `n` - Order of the factored matrix.
/// * `a` - Packed factors, overwritten with `inv(A)`.
/// * `pivots` - 0-based interchanges from [`factor`]; only read.
/// * `work` - At least [`lapack::getri_work_len`] entries.
///
/// # Returns
/// `Ok(())`, or [`LaError::ZeroPivot`] when `U` has a zero diagonal entry.
pub fn invert_factored<T: Scalar>(n: usize, a: &mut [T], pivots: &[usize], work: &mut [T]) -> LaResult<()> {
    ensure_len(pivots, n, 3)?;
    let ipiv = to_one_based(&pivots[..n], 3)?;
    LaError::check_info(lapack::getri(n, a, ld(n), &ipiv, work), LaError::ZeroPivot)
}

/// Solve `A·X = B` in place in `b` from the factors of [`factor`].
///
/// # Arguments
/// * `n`, `nrhs` - Order of `A` and number of right-hand sides.
/// * `a`, `pivots` - Output of [`factor`].
/// * `b` - `n`×`nrhs` right-hand sides, overwritten with `X`.
///
/// # Returns
/// `Ok(())`, or [`LaError::InvalidArgument`] for a short buffer or an
/// out-of-range pivot.
pub fn solve_factored<T: Scalar>(n: usize, nrhs: usize, a: &[T], pivots: &[usize], b: &mut [T]) -> LaResult<()> {
    solve_factored_with(Transpose::No, n, nrhs, a, pivots, b)
}

/// Solve `op(A)·X = B` in place in `b` from the factors of [`factor`],
/// with `trans` selecting `A`, `Aᵀ` or `Aᴴ`. Otherwise as [`solve_factored`].
pub fn solve_factored_with<T: Scalar>(
    trans: Transpose,
    n: usize,
    nrhs: usize,
    a: &[T],
    pivots: &[usize],
    b: &mut [T],
) -> LaResult<()> {
    ensure_len(pivots, n, 5)?;
    let ipiv = to_one_based(&pivots[..n], 5)?;
    LaError::check_info(lapack::getrs(trans, n, nrhs, a, ld(n), &ipiv, b, ld(n)), LaError::ZeroPivot)
}

/// Solve `A·X = B` in place in `b`.
///
/// # Arguments
/// * `n`, `nrhs` - Order of `A` and number of right-hand sides.
/// * `a` - Column-major matrix; not modified.
/// * `b` - `n`×`nrhs` right-hand sides, overwritten with `X`.
///
/// # Returns
/// `Ok(())`, or [`LaError::ZeroPivot`] when `A` is singular, leaving `b`
/// untouched.
pub fn solve<T: Scalar>(n: usize, nrhs: usize, a: &[T], b: &mut [T]) -> LaResult<()> {
    let mut lu = a.to_vec();
    let mut ipiv = vec![0i32; n];
    let info = lapack::getrf(n, n, &mut lu, ld(n), &mut ipiv);
    if info != 0 {
        log::debug!("lu::solve: factorization returned {info}");
        return LaError::check_info(info, LaError::ZeroPivot);
    }
    LaError::check_info(
        lapack::getrs(Transpose::No, n, nrhs, &lu, ld(n), &ipiv, b, ld(n)),
        LaError::ZeroPivot,
    )
}
