//! C-callable surface.
//!
//! Every operation is exported four times with an element prefix: `s_`
//! (`f32`), `d_` (`f64`), `c_` (`Complex<f32>`) and `z_` (`Complex<f64>`).
//! Complex elements are passed as `{re, im}` pairs, the layout of
//! `num_complex::Complex`. Dimensions and statuses are C `int`s, matrices are
//! column-major with leading dimension equal to their row count, and pivot
//! vectors are 0-based.
//!
//! Statuses follow the kernel convention: `0` success, `k > 0` a structural
//! failure at step `k`, `-p` an illegal argument. Arguments this layer rejects
//! itself (negative dimensions or lengths, null pointers with a non-zero
//! extent, negative pivots) report their position in the exported signature.
//! Nothing here panics across the boundary.
//!
//! # Safety
//! Callers must pass pointers valid for the extents implied by the
//! dimensions (for instance `n·n` elements for an `n`×`n` matrix) and must not
//! alias buffers the call writes to.

use std::ffi::c_char;

use crate::config::NormKind;
use crate::core::Scalar;
use crate::error::{LaError, LaResult, status_of};
use crate::factor::{self, cholesky, lu, qr, svd};
use crate::lapack;
use num_complex::Complex;
use num_traits::Float;

fn dim(v: i32, position: usize) -> LaResult<usize> {
    usize::try_from(v).map_err(|_| LaError::InvalidArgument(position))
}

fn area(rows: usize, cols: usize, position: usize) -> LaResult<usize> {
    rows.checked_mul(cols).ok_or(LaError::InvalidArgument(position))
}

fn size_status(len: LaResult<usize>) -> i32 {
    match len {
        Ok(len) => i32::try_from(len).unwrap_or(i32::MAX),
        Err(e) => e.status(),
    }
}

unsafe fn slice<'a, T>(ptr: *const T, len: usize, position: usize) -> LaResult<&'a [T]> {
    if len == 0 {
        return Ok(&[]);
    }
    if ptr.is_null() {
        return Err(LaError::InvalidArgument(position));
    }
    Ok(unsafe { std::slice::from_raw_parts(ptr, len) })
}

unsafe fn slice_mut<'a, T>(ptr: *mut T, len: usize, position: usize) -> LaResult<&'a mut [T]> {
    if len == 0 {
        return Ok(&mut []);
    }
    if ptr.is_null() {
        return Err(LaError::InvalidArgument(position));
    }
    Ok(unsafe { std::slice::from_raw_parts_mut(ptr, len) })
}

fn read_pivots(ipiv: &[i32], position: usize) -> LaResult<Vec<usize>> {
    ipiv.iter()
        .map(|&p| usize::try_from(p).map_err(|_| LaError::InvalidArgument(position)))
        .collect()
}

unsafe fn matrix_norm<T: Scalar>(norm: c_char, m: i32, n: i32, a: *const T, work: *mut T::Real) -> T::Real {
    let Some(kind) = NormKind::from_char(norm as u8) else {
        log::warn!("{}_matrix_norm: unknown norm {:?}", T::PREFIX, norm as u8 as char);
        return T::Real::nan();
    };
    let operands = (|| {
        let (m, n) = (dim(m, 2)?, dim(n, 3)?);
        let a = unsafe { slice(a, area(m, n, 4)?, 4)? };
        let work_len = if kind == NormKind::Infinity { m } else { 0 };
        let work = unsafe { slice_mut(work, work_len, 5)? };
        Ok::<_, LaError>((m, n, a, work))
    })();
    match operands {
        Ok((m, n, a, work)) => factor::matrix_norm(kind, m, n, a, work),
        Err(e) => {
            log::warn!("{}_matrix_norm: {e}", T::PREFIX);
            T::Real::nan()
        }
    }
}

unsafe fn lu_factor<T: Scalar>(n: i32, a: *mut T, ipiv: *mut i32) -> LaResult<()> {
    let n = dim(n, 1)?;
    let a = unsafe { slice_mut(a, area(n, n, 2)?, 2)? };
    let ipiv = unsafe { slice_mut(ipiv, n, 3)? };
    let mut pivots = vec![0usize; n];
    let result = lu::factor(n, a, &mut pivots);
    if !matches!(result, Err(LaError::InvalidArgument(_))) {
        // Pivots are below n, which came in as an i32.
        for (dst, &p) in ipiv.iter_mut().zip(&pivots) {
            *dst = p as i32;
        }
    }
    result
}

unsafe fn lu_inverse<T: Scalar>(n: i32, a: *mut T, work: *mut T, len: i32) -> LaResult<()> {
    let n = dim(n, 1)?;
    let a = unsafe { slice_mut(a, area(n, n, 2)?, 2)? };
    let work = unsafe { slice_mut(work, dim(len, 4)?, 3)? };
    lu::invert(n, a, work)
}

unsafe fn lu_inverse_factored<T: Scalar>(n: i32, a: *mut T, ipiv: *const i32, work: *mut T, len: i32) -> LaResult<()> {
    let n = dim(n, 1)?;
    let a = unsafe { slice_mut(a, area(n, n, 2)?, 2)? };
    let pivots = read_pivots(unsafe { slice(ipiv, n, 3)? }, 3)?;
    let work = unsafe { slice_mut(work, dim(len, 5)?, 4)? };
    lu::invert_factored(n, a, &pivots, work)
}

unsafe fn lu_solve_factored<T: Scalar>(n: i32, nrhs: i32, a: *const T, ipiv: *const i32, b: *mut T) -> LaResult<()> {
    let (n, nrhs) = (dim(n, 1)?, dim(nrhs, 2)?);
    let a = unsafe { slice(a, area(n, n, 3)?, 3)? };
    let pivots = read_pivots(unsafe { slice(ipiv, n, 4)? }, 4)?;
    let b = unsafe { slice_mut(b, area(n, nrhs, 5)?, 5)? };
    lu::solve_factored(n, nrhs, a, &pivots, b)
}

unsafe fn lu_solve<T: Scalar>(n: i32, nrhs: i32, a: *const T, b: *mut T) -> LaResult<()> {
    let (n, nrhs) = (dim(n, 1)?, dim(nrhs, 2)?);
    let a = unsafe { slice(a, area(n, n, 3)?, 3)? };
    let b = unsafe { slice_mut(b, area(n, nrhs, 4)?, 4)? };
    lu::solve(n, nrhs, a, b)
}

unsafe fn cholesky_factor<T: Scalar>(n: i32, a: *mut T) -> LaResult<()> {
    let n = dim(n, 1)?;
    let a = unsafe { slice_mut(a, area(n, n, 2)?, 2)? };
    cholesky::factor(n, a)
}

unsafe fn cholesky_solve<T: Scalar>(n: i32, nrhs: i32, a: *const T, b: *mut T) -> LaResult<()> {
    let (n, nrhs) = (dim(n, 1)?, dim(nrhs, 2)?);
    let a = unsafe { slice(a, area(n, n, 3)?, 3)? };
    let b = unsafe { slice_mut(b, area(n, nrhs, 4)?, 4)? };
    cholesky::solve(n, nrhs, a, b)
}

unsafe fn cholesky_solve_factored<T: Scalar>(n: i32, nrhs: i32, l: *const T, b: *mut T) -> LaResult<()> {
    let (n, nrhs) = (dim(n, 1)?, dim(nrhs, 2)?);
    let l = unsafe { slice(l, area(n, n, 3)?, 3)? };
    let b = unsafe { slice_mut(b, area(n, nrhs, 4)?, 4)? };
    cholesky::solve_factored(n, nrhs, l, b)
}

#[allow(clippy::too_many_arguments)]
unsafe fn qr_factor<T: Scalar>(m: i32, n: i32, r: *mut T, tau: *mut T, q: *mut T, work: *mut T, len: i32) -> LaResult<()> {
    let (m, n) = (dim(m, 1)?, dim(n, 2)?);
    let k = m.min(n);
    let r = unsafe { slice_mut(r, area(m, n, 3)?, 3)? };
    let tau = unsafe { slice_mut(tau, k, 4)? };
    let q = unsafe { slice_mut(q, area(m, k, 5)?, 5)? };
    let work = unsafe { slice_mut(work, dim(len, 7)?, 6)? };
    qr::factor(m, n, r, tau, q, work)
}

#[allow(clippy::too_many_arguments)]
unsafe fn qr_solve<T: Scalar>(
    m: i32,
    n: i32,
    nrhs: i32,
    r: *const T,
    b: *const T,
    x: *mut T,
    work: *mut T,
    len: i32,
) -> LaResult<()> {
    let (m, n, nrhs) = (dim(m, 1)?, dim(n, 2)?, dim(nrhs, 3)?);
    let r = unsafe { slice(r, area(m, n, 4)?, 4)? };
    let b = unsafe { slice(b, area(m, nrhs, 5)?, 5)? };
    let x = unsafe { slice_mut(x, area(n, nrhs, 6)?, 6)? };
    let work = unsafe { slice_mut(work, dim(len, 8)?, 7)? };
    qr::solve(m, n, nrhs, r, b, x, work)
}

#[allow(clippy::too_many_arguments)]
unsafe fn qr_solve_factored<T: Scalar>(
    m: i32,
    n: i32,
    nrhs: i32,
    r: *const T,
    b: *const T,
    tau: *const T,
    x: *mut T,
    work: *mut T,
    len: i32,
) -> LaResult<()> {
    let (m, n, nrhs) = (dim(m, 1)?, dim(n, 2)?, dim(nrhs, 3)?);
    let r = unsafe { slice(r, area(m, n, 4)?, 4)? };
    let b = unsafe { slice(b, area(m, nrhs, 5)?, 5)? };
    let tau = unsafe { slice(tau, m.min(n), 6)? };
    let x = unsafe { slice_mut(x, area(n, nrhs, 7)?, 7)? };
    let work = unsafe { slice_mut(work, dim(len, 9)?, 8)? };
    qr::solve_factored(m, n, nrhs, r, b, tau, x, work)
}

#[allow(clippy::too_many_arguments)]
unsafe fn svd_factor<T: Scalar>(
    compute_vectors: bool,
    m: i32,
    n: i32,
    a: *mut T,
    s: *mut T,
    u: *mut T,
    v: *mut T,
    work: *mut T,
    len: i32,
) -> LaResult<()> {
    let (m, n) = (dim(m, 2)?, dim(n, 3)?);
    let a = unsafe { slice_mut(a, area(m, n, 4)?, 4)? };
    let s = unsafe { slice_mut(s, m.min(n), 5)? };
    let (ulen, vlen) = if compute_vectors { (area(m, m, 6)?, area(n, n, 7)?) } else { (0, 0) };
    let u = unsafe { slice_mut(u, ulen, 6)? };
    let v = unsafe { slice_mut(v, vlen, 7)? };
    let work = unsafe { slice_mut(work, dim(len, 9)?, 8)? };
    svd::factor(compute_vectors, m, n, a, s, u, v, work)
}

fn lu_inverse_work_size(n: i32) -> i32 {
    size_status(dim(n, 1).map(lapack::getri_work_len))
}

fn qr_work_size(m: i32, n: i32, nrhs: i32) -> i32 {
    size_status((|| -> LaResult<usize> { Ok(qr::work_len(dim(m, 1)?, dim(n, 2)?, dim(nrhs, 3)?)) })())
}

fn svd_work_size<T: Scalar>(compute_vectors: bool, m: i32, n: i32) -> i32 {
    size_status((|| -> LaResult<usize> { Ok(svd::work_len::<T>(compute_vectors, dim(m, 2)?, dim(n, 3)?)) })())
}

macro_rules! export_prefix {
    ($t:ty, $r:ty, {
        $matrix_norm:ident,
        $lu_factor:ident,
        $lu_inverse:ident,
        $lu_inverse_factored:ident,
        $lu_solve_factored:ident,
        $lu_solve:ident,
        $cholesky_factor:ident,
        $cholesky_solve:ident,
        $cholesky_solve_factored:ident,
        $qr_factor:ident,
        $qr_solve:ident,
        $qr_solve_factored:ident,
        $svd_factor:ident,
        $lu_inverse_work_size:ident,
        $qr_work_size:ident,
        $svd_work_size:ident $(,)?
    }) => {
        /// # Safety
        /// See the [module documentation](self).
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $matrix_norm(norm: c_char, m: i32, n: i32, a: *const $t, work: *mut $r) -> $r {
            unsafe { matrix_norm::<$t>(norm, m, n, a, work) }
        }

        /// # Safety
        /// See the [module documentation](self).
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $lu_factor(n: i32, a: *mut $t, ipiv: *mut i32) -> i32 {
            status_of(&unsafe { lu_factor::<$t>(n, a, ipiv) })
        }

        /// # Safety
        /// See the [module documentation](self).
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $lu_inverse(n: i32, a: *mut $t, work: *mut $t, len: i32) -> i32 {
            status_of(&unsafe { lu_inverse::<$t>(n, a, work, len) })
        }

        /// # Safety
        /// See the [module documentation](self).
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $lu_inverse_factored(
            n: i32,
            a: *mut $t,
            ipiv: *const i32,
            work: *mut $t,
            len: i32,
        ) -> i32 {
            status_of(&unsafe { lu_inverse_factored::<$t>(n, a, ipiv, work, len) })
        }

        /// # Safety
        /// See the [module documentation](self).
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $lu_solve_factored(
            n: i32,
            nrhs: i32,
            a: *const $t,
            ipiv: *const i32,
            b: *mut $t,
        ) -> i32 {
            status_of(&unsafe { lu_solve_factored::<$t>(n, nrhs, a, ipiv, b) })
        }

        /// # Safety
        /// See the [module documentation](self).
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $lu_solve(n: i32, nrhs: i32, a: *const $t, b: *mut $t) -> i32 {
            status_of(&unsafe { lu_solve::<$t>(n, nrhs, a, b) })
        }

        /// # Safety
        /// See the [module documentation](self).
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $cholesky_factor(n: i32, a: *mut $t) -> i32 {
            status_of(&unsafe { cholesky_factor::<$t>(n, a) })
        }

        /// # Safety
        /// See the [module documentation](self).
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $cholesky_solve(n: i32, nrhs: i32, a: *const $t, b: *mut $t) -> i32 {
            status_of(&unsafe { cholesky_solve::<$t>(n, nrhs, a, b) })
        }

        /// # Safety
        /// See the [module documentation](self).
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $cholesky_solve_factored(n: i32, nrhs: i32, l: *const $t, b: *mut $t) -> i32 {
            status_of(&unsafe { cholesky_solve_factored::<$t>(n, nrhs, l, b) })
        }

        /// # Safety
        /// See the [module documentation](self).
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $qr_factor(
            m: i32,
            n: i32,
            r: *mut $t,
            tau: *mut $t,
            q: *mut $t,
            work: *mut $t,
            len: i32,
        ) -> i32 {
            status_of(&unsafe { qr_factor::<$t>(m, n, r, tau, q, work, len) })
        }

        /// # Safety
        /// See the [module documentation](self).
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $qr_solve(
            m: i32,
            n: i32,
            nrhs: i32,
            r: *const $t,
            b: *const $t,
            x: *mut $t,
            work: *mut $t,
            len: i32,
        ) -> i32 {
            status_of(&unsafe { qr_solve::<$t>(m, n, nrhs, r, b, x, work, len) })
        }

        /// # Safety
        /// See the [module documentation](self).
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $qr_solve_factored(
            m: i32,
            n: i32,
            nrhs: i32,
            r: *const $t,
            b: *const $t,
            tau: *const $t,
            x: *mut $t,
            work: *mut $t,
            len: i32,
        ) -> i32 {
            status_of(&unsafe { qr_solve_factored::<$t>(m, n, nrhs, r, b, tau, x, work, len) })
        }

        /// # Safety
        /// See the [module documentation](self).
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $svd_factor(
            compute_vectors: bool,
            m: i32,
            n: i32,
            a: *mut $t,
            s: *mut $t,
            u: *mut $t,
            v: *mut $t,
            work: *mut $t,
            len: i32,
        ) -> i32 {
            status_of(&unsafe { svd_factor::<$t>(compute_vectors, m, n, a, s, u, v, work, len) })
        }

        /// Workspace length for the matching `lu_inverse` entry points.
        #[unsafe(no_mangle)]
        pub extern "C" fn $lu_inverse_work_size(n: i32) -> i32 {
            lu_inverse_work_size(n)
        }

        /// Workspace length for the matching `qr_*` entry points.
        #[unsafe(no_mangle)]
        pub extern "C" fn $qr_work_size(m: i32, n: i32, nrhs: i32) -> i32 {
            qr_work_size(m, n, nrhs)
        }

        /// Workspace length for the matching `svd_factor` entry point.
        #[unsafe(no_mangle)]
        pub extern "C" fn $svd_work_size(compute_vectors: bool, m: i32, n: i32) -> i32 {
            svd_work_size::<$t>(compute_vectors, m, n)
        }
    };
}

export_prefix!(f32, f32, {
    s_matrix_norm,
    s_lu_factor,
    s_lu_inverse,
    s_lu_inverse_factored,
    s_lu_solve_factored,
    s_lu_solve,
    s_cholesky_factor,
    s_cholesky_solve,
    s_cholesky_solve_factored,
    s_qr_factor,
    s_qr_solve,
    s_qr_solve_factored,
    s_svd_factor,
    s_lu_inverse_work_size,
    s_qr_work_size,
    s_svd_work_size,
});

export_prefix!(f64, f64, {
    d_matrix_norm,
    d_lu_factor,
    d_lu_inverse,
    d_lu_inverse_factored,
    d_lu_solve_factored,
    d_lu_solve,
    d_cholesky_factor,
    d_cholesky_solve,
    d_cholesky_solve_factored,
    d_qr_factor,
    d_qr_solve,
    d_qr_solve_factored,
    d_svd_factor,
    d_lu_inverse_work_size,
    d_qr_work_size,
    d_svd_work_size,
});

export_prefix!(Complex<f32>, f32, {
    c_matrix_norm,
    c_lu_factor,
    c_lu_inverse,
    c_lu_inverse_factored,
    c_lu_solve_factored,
    c_lu_solve,
    c_cholesky_factor,
    c_cholesky_solve,
    c_cholesky_solve_factored,
    c_qr_factor,
    c_qr_solve,
    c_qr_solve_factored,
    c_svd_factor,
    c_lu_inverse_work_size,
    c_qr_work_size,
    c_svd_work_size,
});

export_prefix!(Complex<f64>, f64, {
    z_matrix_norm,
    z_lu_factor,
    z_lu_inverse,
    z_lu_inverse_factored,
    z_lu_solve_factored,
    z_lu_solve,
    z_cholesky_factor,
    z_cholesky_solve,
    z_cholesky_solve_factored,
    z_qr_factor,
    z_qr_solve,
    z_qr_solve_factored,
    z_svd_factor,
    z_lu_inverse_work_size,
    z_qr_work_size,
    z_svd_work_size,
});
