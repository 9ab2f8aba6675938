//! Direct-sum discrete Fourier transforms over split real/imaginary arrays.
//!
//! Unnormalized: a forward transform followed by an inverse one scales the
//! data by the product of the transformed extents.

use itertools::izip;

use crate::{
    common::Direction,
    reference::strided::{dense_strides, for_each_offset, line_starts, map_lines_reim},
    types::Scalar,
};

/// Twiddle `exp(sign * 2*pi*i * jk / n)`, reduced modulo `n` before scaling.
#[inline(always)]
fn twiddle<T: Scalar>(jk: usize, n: usize, direction: Direction) -> (T, T) {
    let theta: T = (T::PI() + T::PI()) * T::from_len(jk % n) / T::from_len(n);
    let (sin, cos) = theta.sin_cos();
    match direction {
        Direction::Forward => (cos, -sin),
        Direction::Inverse => (cos, sin),
    }
}

pub fn dft_line<T: Scalar>(direction: Direction, re: &[T], im: &[T], out_re: &mut [T], out_im: &mut [T]) {
    let n: usize = re.len();
    for k in 0..n {
        let mut acc_re: T = T::zero();
        let mut acc_im: T = T::zero();
        for (j, (&xr, &xi)) in re.iter().zip(im.iter()).enumerate() {
            let (wr, wi) = twiddle::<T>(j * k, n, direction);
            acc_re = acc_re + xr * wr - xi * wi;
            acc_im = acc_im + xr * wi + xi * wr;
        }
        out_re[k] = acc_re;
        out_im[k] = acc_im;
    }
}

/// Complex-to-complex transform of a dense array along each of `axes`.
pub fn dft_c2c<T: Scalar>(shape: &[usize], axes: &[usize], direction: Direction, re: &mut [T], im: &mut [T]) {
    for &axis in axes {
        map_lines_reim(shape, axis, re, im, |lr, li, or, oi| dft_line(direction, lr, li, or, oi));
    }
}

/// Dense shape of a half spectrum: `e/2 + 1` along `reduced_axis`.
pub fn half_shape(shape: &[usize], reduced_axis: usize) -> Vec<usize> {
    shape
        .iter()
        .enumerate()
        .map(|(axis, &e)| if axis == reduced_axis { e / 2 + 1 } else { e })
        .collect()
}

/// Forward real-to-complex transform; the last of `axes` is halved.
///
/// `src` is dense over `shape`; `re`/`im` are dense over [`half_shape`].
pub fn dft_r2c<T: Scalar>(shape: &[usize], axes: &[usize], src: &[T], re: &mut [T], im: &mut [T]) {
    let mut full_re: Vec<T> = src.to_vec();
    let mut full_im: Vec<T> = vec![T::zero(); src.len()];
    dft_c2c(shape, axes, Direction::Forward, &mut full_re, &mut full_im);

    let reduced: usize = axes[axes.len() - 1];
    let half: Vec<usize> = half_shape(shape, reduced);
    for_each_offset(&half, &dense_strides(shape), |i, off| {
        re[i] = full_re[off];
        im[i] = full_im[off];
    });
}

/// Inverse of one half-spectrum line of logical length `n`.
pub fn c2r_line<T: Scalar>(n: usize, re: &[T], im: &[T], out: &mut [T]) {
    for (j, x) in out.iter_mut().enumerate().take(n) {
        let mut acc: T = T::zero();
        for k in 0..n {
            let (wr, wi) = twiddle::<T>(j * k, n, Direction::Inverse);
            // X[k] = conj(X[n - k]) above the Nyquist bin
            let (xr, xi) = if k <= n / 2 { (re[k], im[k]) } else { (re[n - k], -im[n - k]) };
            acc = acc + xr * wr - xi * wi;
        }
        *x = acc;
    }
}

/// Inverse complex-to-real transform; the last of `axes` is the halved one.
///
/// `re`/`im` are dense over [`half_shape`] and are clobbered; `dst` is dense
/// over `shape`.
pub fn dft_c2r<T: Scalar>(shape: &[usize], axes: &[usize], re: &mut [T], im: &mut [T], dst: &mut [T]) {
    let reduced: usize = axes[axes.len() - 1];
    let half: Vec<usize> = half_shape(shape, reduced);
    dft_c2c(&half, &axes[..axes.len() - 1], Direction::Inverse, re, im);

    let n: usize = shape[reduced];
    let (half_starts, half_step) = line_starts(&half, reduced);
    let (full_starts, full_step) = line_starts(shape, reduced);
    let mut line_re: Vec<T> = vec![T::zero(); half[reduced]];
    let mut line_im: Vec<T> = vec![T::zero(); half[reduced]];
    let mut out: Vec<T> = vec![T::zero(); n];
    for (hs, fs) in half_starts.into_iter().zip(full_starts) {
        for (k, (r, i)) in izip!(line_re.iter_mut(), line_im.iter_mut()).enumerate() {
            *r = re[hs + k * half_step];
            *i = im[hs + k * half_step];
        }
        c2r_line(n, &line_re, &line_im, &mut out);
        for (j, &x) in out.iter().enumerate() {
            dst[fs + j * full_step] = x;
        }
    }
}
