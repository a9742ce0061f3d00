//! LU factorization with partial pivoting (`?getrf`, `?getrs`, `?getri`).
//!
//! faer computes the factors; these routines present them in the reference
//! LAPACK conventions:
//! - `A` is overwritten with `L` (unit lower, diagonal implicit) and `U`.
//! - `ipiv` is 1-based: row `i` was interchanged with row `ipiv[i]`.
//! - `info > 0` reports the first exactly-zero pivot `U[info-1][info-1]`;
//!   the factorization is still completed.
//! - `info < 0` reports the position of an illegal argument.

use crate::config::{Diag, Transpose, Uplo};
use crate::core::Scalar;
use crate::lapack::blas::{laswp, required_len, trsm_left};
use crate::lapack::bridge::{load, parallelism};
use dyn_stack::{MemBuffer, MemStack};
use faer::linalg::lu::partial_pivoting::factor::{lu_in_place, lu_in_place_scratch};

/// Factor the `m`×`n` matrix `a` as `P·A = L·U`.
///
/// # Arguments
/// * `m`, `n` - Dimensions of `a`.
/// * `a` - Column-major operand, overwritten with `L` and `U`.
/// * `lda` - Leading dimension of `a`, at least `max(1, m)`.
/// * `ipiv` - Receives `min(m, n)` 1-based row interchanges.
///
/// # Returns
/// `0`, the 1-based step of the first zero pivot, or `-p` for an illegal
/// argument `p` (m=1, n=2, a=3, lda=4, ipiv=5).
pub fn getrf<T: Scalar>(m: usize, n: usize, a: &mut [T], lda: usize, ipiv: &mut [i32]) -> i32 {
    if lda < m.max(1) {
        return -4;
    }
    if a.len() < required_len(m, n, lda) {
        return -3;
    }
    let k_max = m.min(n);
    if ipiv.len() < k_max || i32::try_from(m).is_err() {
        return -5;
    }
    if k_max == 0 {
        return 0;
    }
    log::trace!("{}getrf: m={} n={}", T::PREFIX, m, n);

    let par = parallelism();
    let mut lu = load(m, n, a, lda);
    let mut row_perm_fwd = vec![0usize; m];
    let mut row_perm_bwd = vec![0usize; m];
    lu_in_place(
        lu.as_mut(),
        &mut row_perm_fwd,
        &mut row_perm_bwd,
        par,
        MemStack::new(&mut MemBuffer::new(lu_in_place_scratch::<usize, T::Faer>(m, n, par, Default::default()))),
        Default::default(),
    );

    // Row i of faer's factors belongs to input row row_perm_fwd[i]. Rows are
    // written back in the order the interchange sequence leaves them in,
    // which differs from faer's only below row min(m, n).
    let order = interchanges(&row_perm_fwd, &mut ipiv[..k_max]);
    for j in 0..n {
        for (i, &row) in order.iter().enumerate() {
            a[j * lda + i] = T::from_faer(lu[(row_perm_bwd[row], j)]);
        }
    }

    (0..k_max)
        .find(|&k| a[k * lda + k] == T::zero())
        .map_or(0, |k| (k + 1) as i32)
}

// Fill `ipiv` with the 1-based swap sequence that moves input row
// `row_perm_fwd[k]` to position `k`, and return the resulting row order.
fn interchanges(row_perm_fwd: &[usize], ipiv: &mut [i32]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..row_perm_fwd.len()).collect();
    let mut position = order.clone();
    for (k, p) in ipiv.iter_mut().enumerate() {
        let j = position[row_perm_fwd[k]];
        *p = (j + 1) as i32;
        order.swap(k, j);
        position[order[k]] = k;
        position[order[j]] = j;
    }
    order
}

/// Solve `op(A)·X = B` with the factors computed by [`getrf`].
///
/// # Arguments
/// * `trans` - Which of `A`, `Aᵀ` or `Aᴴ` to solve with.
/// * `n`, `nrhs` - Order of `A` and number of right-hand sides.
/// * `a`, `lda` - Packed factors and their leading dimension.
/// * `ipiv` - 1-based interchanges from [`getrf`], each in `1..=n`.
/// * `b`, `ldb` - Right-hand sides, overwritten with the solution.
///
/// # Returns
/// `0`, or `-p` for an illegal argument `p` (trans=1, n=2, nrhs=3, a=4,
/// lda=5, ipiv=6, b=7, ldb=8).
#[allow(clippy::too_many_arguments)]
pub fn getrs<T: Scalar>(
    trans: Transpose,
    n: usize,
    nrhs: usize,
    a: &[T],
    lda: usize,
    ipiv: &[i32],
    b: &mut [T],
    ldb: usize,
) -> i32 {
    if lda < n.max(1) {
        return -5;
    }
    if a.len() < required_len(n, n, lda) {
        return -4;
    }
    if ipiv.len() < n || ipiv[..n].iter().any(|&p| p < 1 || p as usize > n) {
        return -6;
    }
    if ldb < n.max(1) {
        return -8;
    }
    if b.len() < required_len(n, nrhs, ldb) {
        return -7;
    }
    if n == 0 || nrhs == 0 {
        return 0;
    }
    let ipiv = &ipiv[..n];

    match trans {
        Transpose::No => {
            laswp(nrhs, b, ldb, ipiv, true);
            trsm_left(Uplo::Lower, Transpose::No, Diag::Unit, n, nrhs, T::one(), a, lda, b, ldb);
            trsm_left(Uplo::Upper, Transpose::No, Diag::NonUnit, n, nrhs, T::one(), a, lda, b, ldb);
        }
        op => {
            trsm_left(Uplo::Upper, op, Diag::NonUnit, n, nrhs, T::one(), a, lda, b, ldb);
            trsm_left(Uplo::Lower, op, Diag::Unit, n, nrhs, T::one(), a, lda, b, ldb);
            laswp(nrhs, b, ldb, ipiv, false);
        }
    }
    0
}

/// Minimal workspace length accepted by [`getri`].
pub fn getri_work_len(n: usize) -> usize {
    n.max(1)
}

/// Overwrite the factors from [`getrf`] with `inv(A)`.
///
/// # Arguments
/// * `n` - Order of `A`.
/// * `a`, `lda` - Packed factors, overwritten with the inverse.
/// * `ipiv` - 1-based interchanges from [`getrf`].
/// * `work` - Workspace of at least [`getri_work_len`] entries (`lwork`).
///
/// # Returns
/// `0`; `k > 0` when `U[k-1][k-1]` is exactly zero, leaving `a` untouched;
/// or `-p` for an illegal argument `p` (n=1, a=2, lda=3, ipiv=4, work=5,
/// lwork=6).
pub fn getri<T: Scalar>(n: usize, a: &mut [T], lda: usize, ipiv: &[i32], work: &mut [T]) -> i32 {
    if lda < n.max(1) {
        return -3;
    }
    if a.len() < required_len(n, n, lda) {
        return -2;
    }
    if ipiv.len() < n || ipiv[..n].iter().any(|&p| p < 1 || p as usize > n) {
        return -4;
    }
    if work.len() < getri_work_len(n) {
        return -6;
    }
    if n == 0 {
        return 0;
    }
    if let Some(k) = (0..n).find(|&k| a[k * lda + k] == T::zero()) {
        return (k + 1) as i32;
    }

    // inv(A) solves A·X = I.
    let mut inv = vec![T::zero(); n * n];
    for j in 0..n {
        inv[j * n + j] = T::one();
    }
    let info = getrs(Transpose::No, n, n, a, lda, ipiv, &mut inv, n);
    if info != 0 {
        return info;
    }
    for (j, col) in inv.chunks_exact(n).enumerate() {
        a[j * lda..j * lda + n].copy_from_slice(col);
    }
    0
}
