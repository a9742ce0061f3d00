//! `Scalar` implementations for the four supported element types.
//!
//! Complex elements are `num_complex::Complex<T>`, which is `#[repr(C)]` and
//! therefore layout-compatible with the `{re, im}` pairs C callers pass in.

use crate::core::traits::{RealScalar, Scalar};
use num_complex::Complex;

macro_rules! impl_real_scalar {
    ($t:ty, $prefix:expr) => {
        impl Scalar for $t {
            type Real = $t;
            const IS_COMPLEX: bool = false;
            const PREFIX: char = $prefix;

            type Faer = $t;

            #[inline]
            fn from_faer(x: Self) -> Self {
                x
            }
            #[inline]
            fn into_faer(self) -> Self {
                self
            }

            #[inline]
            fn from_real(re: $t) -> Self {
                re
            }
            #[inline]
            fn re(self) -> $t {
                self
            }
            #[inline]
            fn im(self) -> $t {
                0.0
            }
            #[inline]
            fn conj(self) -> Self {
                self
            }
            #[inline]
            fn modulus(self) -> $t {
                self.abs()
            }
            #[inline]
            fn abs1(self) -> $t {
                self.abs()
            }
            #[inline]
            fn mul_real(self, r: $t) -> Self {
                self * r
            }
        }

        impl RealScalar for $t {
            #[inline]
            fn from_f64(v: f64) -> Self {
                v as $t
            }
        }
    };
}

macro_rules! impl_complex_scalar {
    ($t:ty, $prefix:expr) => {
        impl Scalar for Complex<$t> {
            type Real = $t;
            const IS_COMPLEX: bool = true;
            const PREFIX: char = $prefix;

            type Faer = Complex<$t>;

            #[inline]
            fn from_faer(x: Self) -> Self {
                x
            }
            #[inline]
            fn into_faer(self) -> Self {
                self
            }

            #[inline]
            fn from_real(re: $t) -> Self {
                Complex::new(re, 0.0)
            }
            #[inline]
            fn re(self) -> $t {
                self.re
            }
            #[inline]
            fn im(self) -> $t {
                self.im
            }
            #[inline]
            fn conj(self) -> Self {
                Complex::new(self.re, -self.im)
            }
            #[inline]
            fn modulus(self) -> $t {
                self.re.hypot(self.im)
            }
            #[inline]
            fn abs1(self) -> $t {
                self.re.abs() + self.im.abs()
            }
            #[inline]
            fn mul_real(self, r: $t) -> Self {
                Complex::new(self.re * r, self.im * r)
            }
        }
    };
}

impl_real_scalar!(f32, 's');
impl_real_scalar!(f64, 'd');
impl_complex_scalar!(f32, 'c');
impl_complex_scalar!(f64, 'z');
