//! Matrix module: interop between column-major buffers and Faer matrices.

pub mod dense;
pub use dense::{DenseMatrix, lu_solve};
