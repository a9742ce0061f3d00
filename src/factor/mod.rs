//! Typed facade over the `lapack` kernels.
//!
//! Each function mirrors one entry point of the C surface, generic over the
//! element type. Matrices are square `n`×`n` or `m`×`n` column-major slices
//! whose leading dimension equals their row count. Pivots are 0-based here;
//! the translation to the kernels' 1-based vectors happens in local copies.
//!
//! Failures come back as [`LaError`](crate::error::LaError). Kernel argument
//! errors keep the kernel's argument position. Checks the facade performs on
//! buffers it owns itself (pivots, `q`, QR output, singular values) report
//! the position of that buffer in the facade function's own signature.

pub mod cholesky;
pub mod lu;
pub mod norm;
pub mod qr;
pub mod svd;

pub use norm::matrix_norm;

use crate::error::{LaError, LaResult};

// Leading dimension for an operand with `rows` rows.
#[inline]
pub(crate) fn ld(rows: usize) -> usize {
    rows.max(1)
}

// Reject a caller-owned buffer shorter than `needed`.
#[inline]
pub(crate) fn ensure_len<T>(buf: &[T], needed: usize, position: usize) -> LaResult<()> {
    if buf.len() < needed {
        Err(LaError::InvalidArgument(position))
    } else {
        Ok(())
    }
}
