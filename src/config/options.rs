//! Char-coded options of the LAPACK calling convention.
//!
//! The C surface receives norms, transpose modes and job selectors as single
//! ASCII characters. This module provides the typed equivalents used by the
//! kernels and the facade, and the parsing rules (case-insensitive, with the
//! usual LAPACK aliases such as `'1'` for the one-norm and `'E'` for Frobenius).

/// Matrix norm selector (`lange`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormKind {
    /// `'O'` / `'1'`: maximum absolute column sum.
    One,
    /// `'I'`: maximum absolute row sum. Needs a workspace of length `m`.
    Infinity,
    /// `'F'` / `'E'`: square root of the sum of squares.
    Frobenius,
    /// `'M'`: largest absolute value (not a consistent matrix norm).
    MaxAbs,
}

impl NormKind {
    pub fn from_char(c: u8) -> Option<Self> {
        match c.to_ascii_uppercase() {
            b'O' | b'1' => Some(NormKind::One),
            b'I' => Some(NormKind::Infinity),
            b'F' | b'E' => Some(NormKind::Frobenius),
            b'M' => Some(NormKind::MaxAbs),
            _ => None,
        }
    }

    pub fn as_char(self) -> u8 {
        match self {
            NormKind::One => b'O',
            NormKind::Infinity => b'I',
            NormKind::Frobenius => b'F',
            NormKind::MaxAbs => b'M',
        }
    }
}

/// Operation applied to a matrix operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transpose {
    /// `'N'`
    #[default]
    No,
    /// `'T'`
    Transpose,
    /// `'C'`: conjugate transpose. Identical to `Transpose` for real elements.
    ConjTranspose,
}

impl Transpose {
    pub fn from_char(c: u8) -> Option<Self> {
        match c.to_ascii_uppercase() {
            b'N' => Some(Transpose::No),
            b'T' => Some(Transpose::Transpose),
            b'C' => Some(Transpose::ConjTranspose),
            _ => None,
        }
    }

    /// The adjoint mode for an element type: `'C'` for complex, `'T'` for real.
    pub fn adjoint(is_complex: bool) -> Self {
        if is_complex {
            Transpose::ConjTranspose
        } else {
            Transpose::Transpose
        }
    }
}

/// Triangle referenced by symmetric and triangular routines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Uplo {
    Upper,
    Lower,
}

impl Uplo {
    pub fn from_char(c: u8) -> Option<Self> {
        match c.to_ascii_uppercase() {
            b'U' => Some(Uplo::Upper),
            b'L' => Some(Uplo::Lower),
            _ => None,
        }
    }
}

/// Side on which an operator is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Whether a triangular matrix has an implicit unit diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diag {
    NonUnit,
    Unit,
}

/// Which singular vectors `gesvd` computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SvdJob {
    /// `'A'`: all columns of U (or rows of Vᴴ).
    All,
    /// `'S'`: the leading `min(m, n)` columns of U (or rows of Vᴴ).
    Thin,
    /// `'N'`: no vectors.
    None,
}

impl SvdJob {
    pub fn from_char(c: u8) -> Option<Self> {
        match c.to_ascii_uppercase() {
            b'A' => Some(SvdJob::All),
            b'S' => Some(SvdJob::Thin),
            b'N' => Some(SvdJob::None),
            _ => None,
        }
    }

    pub fn from_flag(compute_vectors: bool) -> Self {
        if compute_vectors { SvdJob::All } else { SvdJob::None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn norm_chars_accept_lapack_aliases() {
        assert_eq!(NormKind::from_char(b'1'), Some(NormKind::One));
        assert_eq!(NormKind::from_char(b'o'), Some(NormKind::One));
        assert_eq!(NormKind::from_char(b'e'), Some(NormKind::Frobenius));
        assert_eq!(NormKind::from_char(b'i'), Some(NormKind::Infinity));
        assert_eq!(NormKind::from_char(b'x'), None);
        for kind in [NormKind::One, NormKind::Infinity, NormKind::Frobenius, NormKind::MaxAbs] {
            assert_eq!(NormKind::from_char(kind.as_char()), Some(kind));
        }
    }

    #[test]
    fn adjoint_depends_on_element_kind() {
        assert_eq!(Transpose::adjoint(true), Transpose::ConjTranspose);
        assert_eq!(Transpose::adjoint(false), Transpose::Transpose);
        assert_eq!(Transpose::from_char(b'c'), Some(Transpose::ConjTranspose));
        assert_eq!(SvdJob::from_flag(false), SvdJob::None);
        assert_eq!(Uplo::from_char(b'l'), Some(Uplo::Lower));
    }
}
