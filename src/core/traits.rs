//! Element traits for linfac.
//!
//! The facade is instantiated four times (real/complex, single/double), the
//! same way a LAPACK build exposes `s`, `d`, `c` and `z` routines. Kernels are
//! written once against [`Scalar`]; the real type that norms, singular values
//! and Cholesky diagonals live in is [`Scalar::Real`]. Factorizations run in
//! faer, which sees each element as [`Scalar::Faer`].

use num_traits::{Float, One, Zero};
use std::fmt::Debug;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// A matrix element: `f32`, `f64`, `Complex<f32>` or `Complex<f64>`.
pub trait Scalar:
    Copy
    + Debug
    + PartialEq
    + Send
    + Sync
    + 'static
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
{
    /// Underlying real type.
    type Real: RealScalar;

    /// `true` for complex element types.
    const IS_COMPLEX: bool;

    /// LAPACK type prefix (`s`, `d`, `c`, `z`).
    const PREFIX: char;

    /// The element as faer sees it. Every implementor sets this to `Self`;
    /// the separate name keeps faer's own `Real` out of generic bounds.
    type Faer: faer::traits::ComplexField + Copy;

    fn from_faer(x: Self::Faer) -> Self;
    fn into_faer(self) -> Self::Faer;

    fn from_real(re: Self::Real) -> Self;
    fn re(self) -> Self::Real;
    fn im(self) -> Self::Real;
    fn conj(self) -> Self;

    /// Modulus `|z|`, computed without intermediate overflow.
    fn modulus(self) -> Self::Real;

    /// `|re| + |im|`, the cheap magnitude LAPACK uses for pivot selection.
    fn abs1(self) -> Self::Real;

    /// Multiply by a real factor.
    fn mul_real(self, r: Self::Real) -> Self;

    /// `|z|²`.
    fn modulus_sqr(self) -> Self::Real {
        let (re, im) = (self.re(), self.im());
        re * re + im * im
    }
}

/// A real element: `f32` or `f64`.
pub trait RealScalar: Scalar<Real = Self> + Float {
    fn from_f64(v: f64) -> Self;
}
