//! linfac: a flat, C-callable facade over dense LAPACK-style factorizations
//!
//! The crate exposes LU, Cholesky, QR and SVD factorizations and solves, plus
//! matrix norms, for `f32`, `f64`, `Complex<f32>` and `Complex<f64>` elements.
//! Three layers sit on top of each other:
//!
//! - [`lapack`]: kernels in the reference-LAPACK calling convention
//!   (column-major, leading dimensions, 1-based pivots, `info` codes).
//! - [`factor`]: the typed facade, generic over [`Scalar`] and returning
//!   [`LaResult`], with 0-based pivots and caller-owned buffers.
//! - [`ffi`]: `s_`/`d_`/`c_`/`z_` prefixed `extern "C"` entry points that
//!   flatten the result into an integer status.
//!
//! [`matrix::dense`] moves data between column-major buffers and `faer::Mat`.

pub mod config;
pub mod core;
pub mod error;
pub mod factor;
pub mod ffi;
pub mod lapack;
pub mod matrix;
pub mod utils;

// Re-exports for convenience
pub use config::*;
pub use crate::core::*;
pub use error::*;
pub use matrix::DenseMatrix;
