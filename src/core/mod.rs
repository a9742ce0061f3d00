//! Core element abstractions.

pub mod traits;
pub mod wrappers;

pub use traits::{RealScalar, Scalar};
