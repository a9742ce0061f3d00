//! Calling-convention options.

pub mod options;

pub use options::{Diag, NormKind, Side, SvdJob, Transpose, Uplo};
