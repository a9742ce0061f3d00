//! Matrix norms.

use crate::config::NormKind;
use crate::core::Scalar;
use crate::factor::ld;
use crate::lapack;

/// Norm of the `m`×`n` matrix `a`.
///
/// # Arguments
/// * `norm` - Which norm to compute.
/// * `m`, `n` - Dimensions of `a`.
/// * `a` - Column-major matrix.
/// * `work` - `m` reals for [`NormKind::Infinity`]; the other norms ignore it.
///
/// # Returns
/// The norm. There is no failure status: a short operand or workspace
/// yields NaN.
pub fn matrix_norm<T: Scalar>(norm: NormKind, m: usize, n: usize, a: &[T], work: &mut [T::Real]) -> T::Real {
    lapack::lange(norm, m, n, a, ld(m), work)
}
