//! BLAS-level helpers used by the LAPACK kernels.
//!
//! These follow BLAS rather than LAPACK conventions: no status is returned and
//! dimensions are trusted. Every caller in this crate validates the operands
//! through the owning LAPACK routine before reaching here.

use crate::config::{Diag, Transpose, Uplo};
use crate::core::Scalar;
use crate::lapack::bridge::{load, parallelism, store};
use faer::linalg::triangular_solve::{
    solve_lower_triangular_in_place_with_conj, solve_unit_lower_triangular_in_place_with_conj,
    solve_unit_upper_triangular_in_place_with_conj, solve_upper_triangular_in_place_with_conj,
};
use faer::{Conj, Mat};
use num_traits::{Float, One, Zero};

/// Minimum slice length for a `rows`×`cols` column-major operand with
/// leading dimension `ld`.
#[inline]
pub fn required_len(rows: usize, cols: usize, ld: usize) -> usize {
    if rows == 0 || cols == 0 { 0 } else { ld * (cols - 1) + rows }
}

/// Solve `op(A)·X = alpha·B` in place, `A` triangular `m`×`m`, `B` `m`×`n`.
///
/// Only the `uplo` triangle of `A` is read, and its diagonal is skipped for
/// [`Diag::Unit`]. The solve itself runs in faer.
#[allow(clippy::too_many_arguments)]
pub fn trsm_left<T: Scalar>(
    uplo: Uplo,
    trans: Transpose,
    diag: Diag,
    m: usize,
    n: usize,
    alpha: T,
    a: &[T],
    lda: usize,
    b: &mut [T],
    ldb: usize,
) {
    debug_assert!(a.len() >= required_len(m, m, lda));
    debug_assert!(b.len() >= required_len(m, n, ldb));
    if m == 0 || n == 0 {
        return;
    }
    let tri = load(m, m, a, lda);
    let mut rhs = Mat::from_fn(m, n, |i, j| (b[j * ldb + i] * alpha).into_faer());

    // op(A) is stored transposed unless trans is No, which swaps the triangle.
    let (tri, lower) = match trans {
        Transpose::No => (tri.as_ref(), uplo == Uplo::Lower),
        _ => (tri.as_ref().transpose(), uplo == Uplo::Upper),
    };
    let conj = if trans == Transpose::ConjTranspose { Conj::Yes } else { Conj::No };
    let par = parallelism();
    match (lower, diag) {
        (true, Diag::Unit) => solve_unit_lower_triangular_in_place_with_conj(tri, conj, rhs.as_mut(), par),
        (true, Diag::NonUnit) => solve_lower_triangular_in_place_with_conj(tri, conj, rhs.as_mut(), par),
        (false, Diag::Unit) => solve_unit_upper_triangular_in_place_with_conj(tri, conj, rhs.as_mut(), par),
        (false, Diag::NonUnit) => solve_upper_triangular_in_place_with_conj(tri, conj, rhs.as_mut(), par),
    }
    store(&rhs, b, ldb);
}

/// Apply the row interchanges recorded in a 1-based `ipiv` to the `n`
/// columns of `b`. Forward order replays the factorization; backward undoes it.
pub fn laswp<T: Scalar>(n: usize, b: &mut [T], ldb: usize, ipiv: &[i32], forward: bool) {
    let apply = |b: &mut [T], k: usize| {
        let p = (ipiv[k] - 1) as usize;
        if p != k {
            for j in 0..n {
                b.swap(j * ldb + k, j * ldb + p);
            }
        }
    };
    if forward {
        for k in 0..ipiv.len() {
            apply(b, k);
        }
    } else {
        for k in (0..ipiv.len()).rev() {
            apply(b, k);
        }
    }
}

/// Update a scaled sum of squares `(scale, ssq)` with the entries of `x`,
/// keeping `scale² · ssq` equal to the running sum of `|x_i|²`.
pub fn lassq<T: Scalar>(x: &[T], scale: T::Real, ssq: T::Real) -> (T::Real, T::Real) {
    let (mut scale, mut ssq) = (scale, ssq);
    let mut accumulate = |v: T::Real| {
        let v = v.abs();
        if v != T::Real::zero() {
            if scale < v || v.is_nan() {
                let r = scale / v;
                ssq = T::Real::one() + ssq * r * r;
                scale = v;
            } else {
                let r = v / scale;
                ssq += r * r;
            }
        }
    };
    for &xi in x {
        accumulate(xi.re());
        if T::IS_COMPLEX {
            accumulate(xi.im());
        }
    }
    (scale, ssq)
}
