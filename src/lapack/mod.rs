//! Dense kernels in the reference-LAPACK calling convention.
//!
//! The factorizations, triangular solves and SVD run in faer; this layer
//! translates between faer's results and LAPACK's storage conventions
//! (1-based interchange sequences, `tau` reflector factors, `info` codes).
//! Every routine takes column-major operands with an explicit leading
//! dimension and returns the LAPACK `info` code:
//! - `0` on success,
//! - `-p` when argument `p` (1-based, counted in the reference signature) is
//!   illegal, including slices that are too short for the stated dimensions,
//! - `k > 0` for a structural failure at the `k`-th leading component.
//!
//! Workspace lengths play the role of `lwork`; the `*_work_len` helpers are
//! the workspace query. Pivot vectors are 1-based, as in Fortran.
//!
//! # Usage
//! ```
//! use linfac::lapack;
//! use linfac::config::Transpose;
//!
//! // A = [[4, 3], [6, 3]] column-major; solve A x = [10, 12].
//! let mut a = vec![4.0f64, 6.0, 3.0, 3.0];
//! let mut ipiv = [0i32; 2];
//! assert_eq!(lapack::getrf(2, 2, &mut a, 2, &mut ipiv), 0);
//! let mut b = vec![10.0, 12.0];
//! assert_eq!(lapack::getrs(Transpose::No, 2, 1, &a, 2, &ipiv, &mut b, 2), 0);
//! assert!((b[0] - 1.0).abs() < 1e-12 && (b[1] - 2.0).abs() < 1e-12);
//! ```

pub mod blas;
mod bridge;
pub mod geqrf;
pub mod gesvd;
pub mod getrf;
pub mod lange;
pub mod potrf;

pub use blas::trsm_left;
pub use geqrf::{geqrf, geqrf_work_len, ungqr, ungqr_work_len, unmqr, unmqr_work_len};
pub use gesvd::{gesvd, gesvd_rwork_len, gesvd_work_len};
pub use getrf::{getrf, getri, getri_work_len, getrs};
pub use lange::lange;
pub use potrf::{potrf, potrs};
