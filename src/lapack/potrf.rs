//! Cholesky factorization of Hermitian positive-definite matrices
//! (`?potrf`, `?potrs`).
//!
//! faer factors a copy of the referenced triangle; the other triangle keeps
//! whatever it held on entry.

use crate::config::{Diag, Transpose, Uplo};
use crate::core::Scalar;
use crate::lapack::blas::{required_len, trsm_left};
use crate::lapack::bridge::parallelism;
use dyn_stack::{MemBuffer, MemStack};
use faer::Mat;
use faer::linalg::cholesky::llt::factor::{LltError, cholesky_in_place, cholesky_in_place_scratch};

/// Factor `A = L·Lᴴ` (`Uplo::Lower`) or `A = Uᴴ·U` (`Uplo::Upper`) in place.
///
/// # Arguments
/// * `uplo` - Triangle of `a` that is read and overwritten.
/// * `n` - Order of `A`.
/// * `a`, `lda` - Hermitian operand and its leading dimension.
///
/// # Returns
/// `0`; `k > 0` when the leading minor of order `k` is not positive
/// definite, leaving `a` untouched; or `-p` for an illegal argument `p`
/// (uplo=1, n=2, a=3, lda=4).
pub fn potrf<T: Scalar>(uplo: Uplo, n: usize, a: &mut [T], lda: usize) -> i32 {
    if lda < n.max(1) {
        return -4;
    }
    if a.len() < required_len(n, n, lda) {
        return -3;
    }
    if n == 0 {
        return 0;
    }
    log::trace!("{}potrf: n={} {:?}", T::PREFIX, n, uplo);

    // faer works on the lower triangle; the upper case factors Aᴴ.
    let entry = |i: usize, j: usize| match uplo {
        Uplo::Lower => a[j * lda + i],
        Uplo::Upper => a[i * lda + j].conj(),
    };
    let mut l = Mat::from_fn(n, n, |i, j| if i >= j { entry(i, j).into_faer() } else { T::zero().into_faer() });
    if let Err(index) = llt::<T>(&mut l) {
        return failing_minor::<T>(&entry, index);
    }
    for j in 0..n {
        for i in j..n {
            let x = T::from_faer(l[(i, j)]);
            match uplo {
                Uplo::Lower => a[j * lda + i] = x,
                Uplo::Upper => a[i * lda + j] = x.conj(),
            }
        }
    }
    0
}

fn llt<T: Scalar>(l: &mut Mat<T::Faer>) -> Result<(), usize> {
    let n = l.nrows();
    let par = parallelism();
    let mut mem = MemBuffer::new(cholesky_in_place_scratch::<T::Faer>(n, par, Default::default()));
    match cholesky_in_place(l.as_mut(), Default::default(), par, MemStack::new(&mut mem), Default::default()) {
        Ok(_) => Ok(()),
        Err(LltError::NonPositivePivot { index }) => Err(index),
    }
}

// faer reports the column whose pivot failed. The 1-based order of the
// failing minor is that column plus one, unless the minor of order `index`
// already fails.
fn failing_minor<T: Scalar>(entry: &impl Fn(usize, usize) -> T, index: usize) -> i32 {
    if index > 0 {
        let mut lead = Mat::from_fn(index, index, |i, j| if i >= j { entry(i, j).into_faer() } else { T::zero().into_faer() });
        if llt::<T>(&mut lead).is_err() {
            return index as i32;
        }
    }
    (index + 1) as i32
}

/// Solve `A·X = B` with the factor computed by [`potrf`].
///
/// # Arguments
/// * `uplo` - Triangle holding the factor.
/// * `n`, `nrhs` - Order of `A` and number of right-hand sides.
/// * `a`, `lda` - Factor from [`potrf`] and its leading dimension.
/// * `b`, `ldb` - Right-hand sides, overwritten with the solution.
///
/// # Returns
/// `0`, or `-p` for an illegal argument `p` (uplo=1, n=2, nrhs=3, a=4,
/// lda=5, b=6, ldb=7).
#[allow(clippy::too_many_arguments)]
pub fn potrs<T: Scalar>(
    uplo: Uplo,
    n: usize,
    nrhs: usize,
    a: &[T],
    lda: usize,
    b: &mut [T],
    ldb: usize,
) -> i32 {
    if lda < n.max(1) {
        return -5;
    }
    if a.len() < required_len(n, n, lda) {
        return -4;
    }
    if ldb < n.max(1) {
        return -7;
    }
    if b.len() < required_len(n, nrhs, ldb) {
        return -6;
    }
    if n == 0 || nrhs == 0 {
        return 0;
    }
    let adj = Transpose::ConjTranspose;
    match uplo {
        Uplo::Lower => {
            trsm_left(Uplo::Lower, Transpose::No, Diag::NonUnit, n, nrhs, T::one(), a, lda, b, ldb);
            trsm_left(Uplo::Lower, adj, Diag::NonUnit, n, nrhs, T::one(), a, lda, b, ldb);
        }
        Uplo::Upper => {
            trsm_left(Uplo::Upper, adj, Diag::NonUnit, n, nrhs, T::one(), a, lda, b, ldb);
            trsm_left(Uplo::Upper, Transpose::No, Diag::NonUnit, n, nrhs, T::one(), a, lda, b, ldb);
        }
    }
    0
}
