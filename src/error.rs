use thiserror::Error;

// Unified error type for linfac.
//
// Every variant maps one-to-one onto the integer status protocol of the
// LAPACK calling convention: invalid arguments are negative, structural
// failures are positive and carry a 1-based index.

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaError {
    #[error("argument {0} had an illegal value")]
    InvalidArgument(usize),
    #[error("zero pivot at step {0}")]
    ZeroPivot(usize),
    #[error("leading minor of order {0} is not positive definite")]
    NotPositiveDefinite(usize),
    #[error("singular value iteration failed to converge ({0} pairs left)")]
    NoConvergence(usize),
}

pub type LaResult<T> = Result<T, LaError>;

impl LaError {
    /// Integer status as seen across the C boundary.
    pub fn status(&self) -> i32 {
        match *self {
            LaError::InvalidArgument(pos) => -(pos as i32),
            LaError::ZeroPivot(k) | LaError::NotPositiveDefinite(k) | LaError::NoConvergence(k) => {
                k as i32
            }
        }
    }

    /// Lift a library `info` value into the tagged form.
    ///
    /// Negative values are always invalid arguments; positive values are
    /// interpreted by `structural`, which names the failure the routine reports.
    pub fn check_info(info: i32, structural: fn(usize) -> LaError) -> LaResult<()> {
        match info {
            0 => Ok(()),
            i if i < 0 => Err(LaError::InvalidArgument(i.unsigned_abs() as usize)),
            i => Err(structural(i as usize)),
        }
    }
}

/// Flatten a typed result into the integer status protocol.
pub fn status_of<T>(result: &LaResult<T>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(e) => e.status(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_check_info() {
        for info in [-7, -1, 0, 1, 4] {
            let r = LaError::check_info(info, LaError::ZeroPivot);
            assert_eq!(status_of(&r), info);
        }
        assert_eq!(
            LaError::check_info(3, LaError::NotPositiveDefinite),
            Err(LaError::NotPositiveDefinite(3))
        );
        assert_eq!(
            LaError::check_info(-2, LaError::NotPositiveDefinite),
            Err(LaError::InvalidArgument(2))
        );
    }
}
