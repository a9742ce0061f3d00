//! Moving column-major LAPACK operands in and out of faer.
//!
//! Operands are copied into owned `faer::Mat`s so that leading dimensions,
//! untouched triangles and padding rows of the caller's slice keep the
//! contents LAPACK promises them.

use crate::core::Scalar;
use faer::{Mat, Par};
use num_traits::Float;

/// Parallelism handed to faer. Without the `rayon` feature faer runs
/// sequentially as well.
pub(crate) fn parallelism() -> Par {
    if cfg!(feature = "rayon") {
        faer::get_global_parallelism()
    } else {
        Par::Seq
    }
}

/// Copy the leading `m`×`n` block of `a` into an owned faer matrix.
pub(crate) fn load<T: Scalar>(m: usize, n: usize, a: &[T], lda: usize) -> Mat<T::Faer> {
    Mat::from_fn(m, n, |i, j| a[j * lda + i].into_faer())
}

/// Write `mat` over the leading block of `a`.
pub(crate) fn store<T: Scalar>(mat: &Mat<T::Faer>, a: &mut [T], lda: usize) {
    for j in 0..mat.ncols() {
        for i in 0..mat.nrows() {
            a[j * lda + i] = T::from_faer(mat[(i, j)]);
        }
    }
}

/// Unit lower trapezoidal copy of the `rows`×`k` reflector block stored below
/// the diagonal of `a`, the basis layout faer's Householder routines take.
pub(crate) fn householder_basis<T: Scalar>(rows: usize, k: usize, a: &[T], lda: usize) -> Mat<T::Faer> {
    Mat::from_fn(rows, k, |i, j| {
        if i > j {
            a[j * lda + i].into_faer()
        } else if i == j {
            T::one().into_faer()
        } else {
            T::zero().into_faer()
        }
    })
}

/// faer stores a reflector as `H = I - v·vᴴ / c`; LAPACK stores
/// `tau = 1 / c`. An identity reflector has `c = ∞` and `tau = 0`.
pub(crate) fn coeff_to_tau<T: Scalar>(c: T::Faer) -> T {
    let c = T::from_faer(c);
    if c.modulus().is_finite() { T::one() / c } else { T::zero() }
}

/// Inverse of [`coeff_to_tau`], as a 1×`k` coefficient row.
pub(crate) fn tau_to_coeffs<T: Scalar>(tau: &[T]) -> Mat<T::Faer> {
    Mat::from_fn(1, tau.len(), |_, j| {
        let t = tau[j];
        let c = if t == T::zero() { T::from_real(T::Real::infinity()) } else { T::one() / t };
        c.into_faer()
    })
}
