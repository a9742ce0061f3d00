//! Pivot-vector translation between the 0-based public convention and the
//! 1-based convention of the kernels.
//!
//! Translation always goes into a fresh local vector, so a caller's pivot
//! buffer is never observed half-converted, whatever the outcome of the call.

use crate::error::{LaError, LaResult};

/// 1-based copy of a 0-based pivot vector.
///
/// `position` is the argument position reported if an entry does not fit the
/// kernel's `i32` index type.
pub fn to_one_based(pivots: &[usize], position: usize) -> LaResult<Vec<i32>> {
    pivots
        .iter()
        .map(|&p| {
            p.checked_add(1)
                .and_then(|p| i32::try_from(p).ok())
                .ok_or(LaError::InvalidArgument(position))
        })
        .collect()
}

/// Write a 1-based kernel pivot vector back out as 0-based indices.
pub fn store_zero_based(ipiv: &[i32], pivots: &mut [usize]) {
    for (dst, &p) in pivots.iter_mut().zip(ipiv) {
        // Kernel pivots are always >= 1.
        *dst = (p - 1) as usize;
    }
}
