//! Column-major buffers ⇄ `faer::Mat`.
//!
//! The facade works on flat column-major slices. This module moves data
//! between those slices and Faer matrices, so a `faer::Mat<T>` can be fed to
//! any facade function and the result read back as a `Mat` again.

use crate::core::Scalar;
use crate::error::{LaError, LaResult};
use crate::factor::lu;
use faer::Mat;

/// A dense matrix that can be built from, and flattened to, column-major storage.
pub trait DenseMatrix<T>: Sized {
    /// Construct from the first `nrows·ncols` entries of column-major `data`.
    fn from_col_major(nrows: usize, ncols: usize, data: &[T]) -> LaResult<Self>;

    /// Flatten to a column-major vector.
    fn to_col_major(&self) -> Vec<T>;
}

impl<T: Scalar> DenseMatrix<T> for Mat<T> {
    fn from_col_major(nrows: usize, ncols: usize, data: &[T]) -> LaResult<Self> {
        if data.len() < nrows * ncols {
            return Err(LaError::InvalidArgument(3));
        }
        Ok(Mat::from_fn(nrows, ncols, |i, j| data[j * nrows + i]))
    }

    fn to_col_major(&self) -> Vec<T> {
        let (nrows, ncols) = (self.nrows(), self.ncols());
        let mut out = Vec::with_capacity(nrows * ncols);
        for j in 0..ncols {
            out.extend((0..nrows).map(|i| self[(i, j)]));
        }
        out
    }
}

/// Solve `A·X = B` for Faer operands through the LU facade.
///
/// `a` must be square with as many rows as `b`.
pub fn lu_solve<T: Scalar>(a: &Mat<T>, b: &Mat<T>) -> LaResult<Mat<T>> {
    let n = a.nrows();
    if a.ncols() != n {
        return Err(LaError::InvalidArgument(1));
    }
    if b.nrows() != n {
        return Err(LaError::InvalidArgument(2));
    }
    let a_buf = a.to_col_major();
    let mut x = b.to_col_major();
    lu::solve(n, b.ncols(), &a_buf, &mut x)?;
    Mat::from_col_major(n, b.ncols(), &x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn layout_round_trip() {
        let data = [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0];
        let m = Mat::<f64>::from_col_major(2, 3, &data).unwrap();
        assert_eq!(m[(1, 0)], 2.0);
        assert_eq!(m[(0, 2)], 5.0);
        assert_eq!(m.to_col_major(), data.to_vec());
        assert!(Mat::<f64>::from_col_major(3, 3, &data).is_err());
    }

    #[test]
    fn faer_operands_solve() {
        let a = Mat::from_fn(3, 3, |i, j| if i == j { 4.0 } else { 1.0 });
        let x_true = Mat::from_fn(3, 1, |i, _| (i + 1) as f64);
        let b = &a * &x_true;
        let x = lu_solve(&a, &b).unwrap();
        for i in 0..3 {
            assert_abs_diff_eq!(x[(i, 0)], x_true[(i, 0)], epsilon = 1e-12);
        }
    }

    #[test]
    fn shape_mismatch() {
        let a = Mat::<f64>::zeros(2, 3);
        let b = Mat::<f64>::zeros(2, 1);
        assert_eq!(lu_solve(&a, &b).err(), Some(LaError::InvalidArgument(1)));
    }
}
