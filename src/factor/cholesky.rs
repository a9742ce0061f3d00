//! Cholesky factorization `A = L·Lᴴ` of Hermitian positive-definite matrices.
//!
//! Only the lower triangle of `A` is read.

use crate::config::Uplo;
use crate::core::Scalar;
use crate::error::{LaError, LaResult};
use crate::factor::ld;
use crate::lapack;

/// Overwrite `a` with `L`, zeroing the strict upper triangle.
///
/// # Arguments
/// * `n` - Order of `a`.
/// * `a` - Column-major matrix; its lower triangle is read.
///
/// # Returns
/// `Ok(())`, or [`LaError::NotPositiveDefinite`] with the order of the first
/// leading minor that is not positive definite. The upper triangle is
/// cleared in that case too.
pub fn factor<T: Scalar>(n: usize, a: &mut [T]) -> LaResult<()> {
    let info = lapack::potrf(Uplo::Lower, n, a, ld(n));
    if info >= 0 {
        for j in 1..n {
            a[j * n..j * n + j].iter_mut().for_each(|x| *x = T::zero());
        }
    }
    LaError::check_info(info, LaError::NotPositiveDefinite).inspect_err(|e| log::debug!("cholesky::factor: {e}"))
}

/// Solve `A·X = B` in place in `b`.
///
/// # Arguments
/// * `n`, `nrhs` - Order of `A` and number of right-hand sides.
/// * `a` - Hermitian positive-definite matrix; not modified.
/// * `b` - `n`×`nrhs` right-hand sides, overwritten with `X`.
///
/// # Returns
/// `Ok(())`, or [`LaError::NotPositiveDefinite`] leaving `b` untouched.
pub fn solve<T: Scalar>(n: usize, nrhs: usize, a: &[T], b: &mut [T]) -> LaResult<()> {
    let mut l = a.to_vec();
    let info = lapack::potrf(Uplo::Lower, n, &mut l, ld(n));
    if info != 0 {
        log::debug!("cholesky::solve: factorization returned {info}");
        return LaError::check_info(info, LaError::NotPositiveDefinite);
    }
    LaError::check_info(lapack::potrs(Uplo::Lower, n, nrhs, &l, ld(n), b, ld(n)), LaError::NotPositiveDefinite)
}

/// Solve `A·X = B` in place in `b` from the factor `l` computed by [`factor`].
///
/// # Returns
/// `Ok(())`, or [`LaError::InvalidArgument`] for a short buffer.
pub fn solve_factored<T: Scalar>(n: usize, nrhs: usize, l: &[T], b: &mut [T]) -> LaResult<()> {
    LaError::check_info(lapack::potrs(Uplo::Lower, n, nrhs, l, ld(n), b, ld(n)), LaError::NotPositiveDefinite)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn factor_zeroes_upper_and_solves() {
        let a = vec![4.0f64, 2.0, 2.0, 3.0];
        let mut l = a.clone();
        factor(2, &mut l).unwrap();
        assert_eq!(l[2], 0.0);

        let mut b1 = vec![8.0, 8.0];
        let mut b2 = b1.clone();
        solve(2, 1, &a, &mut b1).unwrap();
        solve_factored(2, 1, &l, &mut b2).unwrap();
        assert_abs_diff_eq!(b1[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(b1[1], 2.0, epsilon = 1e-12);
        assert_eq!(b1, b2);
    }

    #[test]
    fn negative_diagonal_reports_its_index() {
        let mut a = vec![1.0f64, 0.0, 0.0, 0.0, -2.0, 0.0, 0.0, 0.0, 1.0];
        assert_eq!(factor(3, &mut a), Err(LaError::NotPositiveDefinite(2)));
        let mut b = vec![1.0, 1.0, 1.0];
        let orig = vec![1.0, 0.0, 0.0, 0.0, -2.0, 0.0, 0.0, 0.0, 1.0];
        assert_eq!(solve(3, 1, &orig, &mut b), Err(LaError::NotPositiveDefinite(2)));
        assert_eq!(b, vec![1.0, 1.0, 1.0]);
    }
}
