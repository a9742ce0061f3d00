//! Matrix norms (`?lange`).

use crate::config::NormKind;
use crate::core::Scalar;
use crate::lapack::blas::{lassq, required_len};
use num_traits::{Float, One, Zero};

/// Norm of the `m`×`n` column-major matrix `a`.
///
/// `work` is only touched by [`NormKind::Infinity`], which accumulates row
/// sums there and needs `work.len() >= m`. A NaN entry propagates to the
/// result. Returns NaN when the operand or the workspace is too short, the
/// same answer the C surface gives for an unknown norm character.
pub fn lange<T: Scalar>(
    norm: NormKind,
    m: usize,
    n: usize,
    a: &[T],
    lda: usize,
    work: &mut [T::Real],
) -> T::Real {
    if m == 0 || n == 0 {
        return T::Real::zero();
    }
    if lda < m.max(1) || a.len() < required_len(m, n, lda) {
        log::warn!("{}lange: operand shorter than {}x{} (lda {})", T::PREFIX, m, n, lda);
        return T::Real::nan();
    }
    match norm {
        NormKind::MaxAbs => max_abs(m, n, a, lda),
        NormKind::One => max_col_sum(m, n, a, lda),
        NormKind::Infinity => {
            if work.len() < m {
                log::warn!("{}lange: infinity norm needs a workspace of {} rows", T::PREFIX, m);
                return T::Real::nan();
            }
            let rows = &mut work[..m];
            rows.iter_mut().for_each(|w| *w = T::Real::zero());
            for j in 0..n {
                for (w, x) in rows.iter_mut().zip(&a[j * lda..j * lda + m]) {
                    *w += x.modulus();
                }
            }
            fold_max(rows.iter().copied())
        }
        NormKind::Frobenius => {
            let (mut scale, mut ssq) = (T::Real::zero(), T::Real::one());
            for j in 0..n {
                (scale, ssq) = lassq(&a[j * lda..j * lda + m], scale, ssq);
            }
            scale * ssq.sqrt()
        }
    }
}

// Running maximum that lets a NaN win, as the reference routine does.
fn fold_max<R: Float>(values: impl Iterator<Item = R>) -> R {
    values.fold(R::zero(), |acc, v| if acc < v || v.is_nan() { v } else { acc })
}

#[cfg(feature = "rayon")]
fn max_abs<T: Scalar>(m: usize, n: usize, a: &[T], lda: usize) -> T::Real {
    use rayon::prelude::*;
    a.par_chunks(lda)
        .take(n)
        .map(|col| fold_max(col[..m].iter().map(|x| x.modulus())))
        .reduce(|| T::Real::zero(), |x, y| fold_max([x, y].into_iter()))
}

#[cfg(not(feature = "rayon"))]
fn max_abs<T: Scalar>(m: usize, n: usize, a: &[T], lda: usize) -> T::Real {
    a.chunks(lda)
        .take(n)
        .map(|col| fold_max(col[..m].iter().map(|x| x.modulus())))
        .fold(T::Real::zero(), |x, y| fold_max([x, y].into_iter()))
}

#[cfg(feature = "rayon")]
fn max_col_sum<T: Scalar>(m: usize, n: usize, a: &[T], lda: usize) -> T::Real {
    use rayon::prelude::*;
    a.par_chunks(lda)
        .take(n)
        .map(|col| col[..m].iter().fold(T::Real::zero(), |s, x| s + x.modulus()))
        .reduce(|| T::Real::zero(), |x, y| fold_max([x, y].into_iter()))
}

#[cfg(not(feature = "rayon"))]
fn max_col_sum<T: Scalar>(m: usize, n: usize, a: &[T], lda: usize) -> T::Real {
    a.chunks(lda)
        .take(n)
        .map(|col| col[..m].iter().fold(T::Real::zero(), |s, x| s + x.modulus()))
        .fold(T::Real::zero(), |x, y| fold_max([x, y].into_iter()))
}
