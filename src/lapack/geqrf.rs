//! Householder QR (`?geqrf`, `?ungqr`/`?orgqr`, `?unmqr`/`?ormqr`).
//!
//! The factored matrix holds `R` on and above the diagonal and the reflector
//! vectors `v_i` below it, each with an implicit unit head. `tau[i]` is the
//! scalar factor of `H(i) = I - tau[i]·v_i·v_iᴴ`, and `Q = H(0)·H(1)⋯H(k-1)`.
//! faer factors with block size one, so each of its Householder coefficients
//! maps to one `tau[i]`.

use crate::config::{Side, Transpose};
use crate::core::Scalar;
use crate::lapack::blas::required_len;
use crate::lapack::bridge::{coeff_to_tau, householder_basis, load, parallelism, store, tau_to_coeffs};
use dyn_stack::{MemBuffer, MemStack};
use faer::linalg::householder::{
    apply_block_householder_sequence_on_the_left_in_place_scratch,
    apply_block_householder_sequence_on_the_left_in_place_with_conj,
    apply_block_householder_sequence_transpose_on_the_left_in_place_scratch,
    apply_block_householder_sequence_transpose_on_the_left_in_place_with_conj,
};
use faer::linalg::qr::no_pivoting::factor::{qr_in_place, qr_in_place_scratch};
use faer::{Conj, Mat};

/// Minimal workspace length accepted by [`geqrf`].
pub fn geqrf_work_len(n: usize) -> usize {
    n.max(1)
}

/// Minimal workspace length accepted by [`ungqr`] when generating `n` columns.
pub fn ungqr_work_len(n: usize) -> usize {
    n.max(1)
}

/// Minimal workspace length accepted by [`unmqr`] for an `m`×`n` operand.
pub fn unmqr_work_len(side: Side, m: usize, n: usize) -> usize {
    match side {
        Side::Left => n.max(1),
        Side::Right => m.max(1),
    }
}

/// QR-factor the `m`×`n` matrix `a` in place.
///
/// # Arguments
/// * `m`, `n` - Dimensions of `a`.
/// * `a`, `lda` - Operand, overwritten with `R` and the reflectors.
/// * `tau` - Receives the `min(m, n)` reflector factors.
/// * `work` - Workspace of at least [`geqrf_work_len`] entries (`lwork`).
///
/// # Returns
/// `0`, or `-p` for an illegal argument `p` (m=1, n=2, a=3, lda=4, tau=5,
/// work=6, lwork=7).
pub fn geqrf<T: Scalar>(m: usize, n: usize, a: &mut [T], lda: usize, tau: &mut [T], work: &mut [T]) -> i32 {
    if lda < m.max(1) {
        return -4;
    }
    if a.len() < required_len(m, n, lda) {
        return -3;
    }
    let k = m.min(n);
    if tau.len() < k {
        return -5;
    }
    if work.len() < geqrf_work_len(n) {
        return -7;
    }
    if k == 0 {
        return 0;
    }
    log::trace!("{}geqrf: m={} n={}", T::PREFIX, m, n);

    let par = parallelism();
    let mut qr = load(m, n, a, lda);
    let mut coeffs = Mat::<T::Faer>::zeros(1, k);
    qr_in_place(
        qr.as_mut(),
        coeffs.as_mut(),
        par,
        MemStack::new(&mut MemBuffer::new(qr_in_place_scratch::<T::Faer>(m, n, 1, par, Default::default()))),
        Default::default(),
    );
    store(&qr, a, lda);
    for (i, t) in tau[..k].iter_mut().enumerate() {
        *t = coeff_to_tau::<T>(coeffs[(0, i)]);
    }
    0
}

/// Overwrite the `m`×`n` matrix `a` (holding `k` reflectors from [`geqrf`])
/// with the first `n` columns of `Q`.
///
/// # Arguments
/// * `m`, `n` - Dimensions of the generated block, `n <= m`.
/// * `k` - Number of reflectors, `k <= n`.
/// * `a`, `lda` - Reflectors on entry, `Q` on exit.
/// * `tau` - Reflector factors from [`geqrf`].
/// * `work` - Workspace of at least [`ungqr_work_len`] entries (`lwork`).
///
/// # Returns
/// `0`, or `-p` for an illegal argument `p` (m=1, n=2, k=3, a=4, lda=5,
/// tau=6, work=7, lwork=8).
pub fn ungqr<T: Scalar>(m: usize, n: usize, k: usize, a: &mut [T], lda: usize, tau: &[T], work: &mut [T]) -> i32 {
    if n > m {
        return -2;
    }
    if k > n {
        return -3;
    }
    if lda < m.max(1) {
        return -5;
    }
    if a.len() < required_len(m, n, lda) {
        return -4;
    }
    if tau.len() < k {
        return -6;
    }
    if work.len() < ungqr_work_len(n) {
        return -8;
    }
    if n == 0 {
        return 0;
    }
    log::trace!("{}ungqr: m={} n={} k={}", T::PREFIX, m, n, k);

    let mut q = Mat::<T::Faer>::identity(m, n);
    if k > 0 {
        let basis = householder_basis(m, k, a, lda);
        let coeffs = tau_to_coeffs(&tau[..k]);
        let par = parallelism();
        apply_block_householder_sequence_on_the_left_in_place_with_conj(
            basis.as_ref(),
            coeffs.as_ref(),
            Conj::No,
            q.as_mut(),
            par,
            MemStack::new(&mut MemBuffer::new(apply_block_householder_sequence_on_the_left_in_place_scratch::<
                T::Faer,
            >(m, 1, n))),
        );
    }
    store(&q, a, lda);
    0
}

/// Overwrite the `m`×`n` matrix `c` with `op(Q)·C` (`Side::Left`) or
/// `C·op(Q)` (`Side::Right`), `Q` given by `k` reflectors from [`geqrf`].
///
/// # Arguments
/// * `side` - Whether `Q` multiplies from the left or the right.
/// * `trans` - `No` or the adjoint: `ConjTranspose` for complex types,
///   `Transpose` for real ones.
/// * `m`, `n` - Dimensions of `c`.
/// * `k` - Number of reflectors.
/// * `a`, `lda` - Reflectors from [`geqrf`].
/// * `tau` - Reflector factors from [`geqrf`].
/// * `c`, `ldc` - Operand, overwritten with the product.
/// * `work` - Workspace of at least [`unmqr_work_len`] entries (`lwork`).
///
/// # Returns
/// `0`, or `-p` for an illegal argument `p` (side=1, trans=2, m=3, n=4, k=5,
/// a=6, lda=7, tau=8, c=9, ldc=10, work=11, lwork=12).
#[allow(clippy::too_many_arguments)]
pub fn unmqr<T: Scalar>(
    side: Side,
    trans: Transpose,
    m: usize,
    n: usize,
    k: usize,
    a: &[T],
    lda: usize,
    tau: &[T],
    c: &mut [T],
    ldc: usize,
    work: &mut [T],
) -> i32 {
    let adjoint = match (trans, T::IS_COMPLEX) {
        (Transpose::No, _) => false,
        (Transpose::ConjTranspose, true) | (Transpose::Transpose, false) => true,
        _ => {
            log::warn!("{}unmqr: transpose mode {:?} not defined for this type", T::PREFIX, trans);
            return -2;
        }
    };
    let nq = match side {
        Side::Left => m,
        Side::Right => n,
    };
    if k > nq {
        return -5;
    }
    if lda < nq.max(1) {
        return -7;
    }
    if a.len() < required_len(nq, k, lda) {
        return -6;
    }
    if tau.len() < k {
        return -8;
    }
    if ldc < m.max(1) {
        return -10;
    }
    if c.len() < required_len(m, n, ldc) {
        return -9;
    }
    if work.len() < unmqr_work_len(side, m, n) {
        return -12;
    }
    if m == 0 || n == 0 || k == 0 {
        return 0;
    }
    log::trace!("{}unmqr: {:?} adjoint={} m={} n={} k={}", T::PREFIX, side, adjoint, m, n, k);

    let basis = householder_basis(nq, k, a, lda);
    let coeffs = tau_to_coeffs(&tau[..k]);
    match side {
        Side::Left => {
            let mut prod = load(m, n, c, ldc);
            apply_q_left(&basis, &coeffs, adjoint, &mut prod);
            store(&prod, c, ldc);
        }
        Side::Right => {
            // C·op(Q) = (op(Q)ᴴ·Cᴴ)ᴴ
            let mut prod = Mat::from_fn(n, m, |i, j| c[i * ldc + j].conj().into_faer());
            apply_q_left(&basis, &coeffs, !adjoint, &mut prod);
            for j in 0..n {
                for i in 0..m {
                    c[j * ldc + i] = T::from_faer(prod[(j, i)]).conj();
                }
            }
        }
    }
    0
}

// `mat := Q·mat`, or `Qᴴ·mat` when `adjoint`.
fn apply_q_left<F: faer::traits::ComplexField>(basis: &Mat<F>, coeffs: &Mat<F>, adjoint: bool, mat: &mut Mat<F>) {
    let (rows, cols) = (mat.nrows(), mat.ncols());
    let par = parallelism();
    if adjoint {
        apply_block_householder_sequence_transpose_on_the_left_in_place_with_conj(
            basis.as_ref(),
            coeffs.as_ref(),
            Conj::Yes,
            mat.as_mut(),
            par,
            MemStack::new(&mut MemBuffer::new(
                apply_block_householder_sequence_transpose_on_the_left_in_place_scratch::<F>(rows, 1, cols),
            )),
        );
    } else {
        apply_block_householder_sequence_on_the_left_in_place_with_conj(
            basis.as_ref(),
            coeffs.as_ref(),
            Conj::No,
            mat.as_mut(),
            par,
            MemStack::new(&mut MemBuffer::new(apply_block_householder_sequence_on_the_left_in_place_scratch::<F>(
                rows, 1, cols,
            ))),
        );
    }
}
