//! Singular value decomposition `A = U·diag(S)·Vᴴ`.

use crate::config::SvdJob;
use crate::core::Scalar;
use crate::error::{LaError, LaResult};
use crate::factor::{ensure_len, ld};
use crate::lapack;
use num_traits::Zero;

/// Workspace length accepted by [`factor`].
pub fn work_len<T: Scalar>(_compute_vectors: bool, m: usize, n: usize) -> usize {
    lapack::gesvd_work_len::<T>(m, n)
}

/// Singular value decomposition `A = U·diag(S)·Vᴴ`.
///
/// # Arguments
/// * `compute_vectors` - Whether `u` and `v` are written.
/// * `m`, `n` - Dimensions of `a`.
/// * `a` - Column-major matrix; only read.
/// * `s` - Receives the `min(m, n)` singular values, largest first, in the
///   element type (complex types get a zero imaginary part).
/// * `u` - Receives the full `m`×`m` `U`; may be empty without vectors.
/// * `v` - Receives the full `n`×`n` `Vᴴ`; may be empty without vectors.
/// * `work` - At least [`work_len`] entries.
///
/// # Returns
/// `Ok(())`, or [`LaError::NoConvergence`] with `s` still holding the last
/// estimates.
#[allow(clippy::too_many_arguments)]
pub fn factor<T: Scalar>(
    compute_vectors: bool,
    m: usize,
    n: usize,
    a: &mut [T],
    s: &mut [T],
    u: &mut [T],
    v: &mut [T],
    work: &mut [T],
) -> LaResult<()> {
    let k = m.min(n);
    ensure_len(s, k, 5)?;
    let job = SvdJob::from_flag(compute_vectors);
    let mut s_local = vec![T::Real::zero(); k];
    let rwork = vec![T::Real::zero(); lapack::gesvd_rwork_len::<T>(m, n)];
    let info = lapack::gesvd(job, job, m, n, a, ld(m), &mut s_local, u, ld(m), v, ld(n), work, &rwork);
    if info >= 0 {
        for (dst, &sv) in s.iter_mut().zip(&s_local) {
            *dst = T::from_real(sv);
        }
    }
    LaError::check_info(info, LaError::NoConvergence).inspect_err(|e| log::debug!("svd::factor: {e}"))
}
