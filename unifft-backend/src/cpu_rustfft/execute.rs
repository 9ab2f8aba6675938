use itertools::izip;
use num_complex::Complex;
use rustfft::{Fft, FftNum};
use unifft_hal::{
    common::Normalization,
    error::{FftError, Result},
    layouts::{Desc, ExecutionParameters, Plan, RawBuffer, TransformDesc, TransformVariant},
    reference::{
        dft::half_shape,
        strided::{dense_strides, for_each_offset, gather, line_starts, scatter},
    },
    types::Scalar,
};

use crate::{
    FftRustFft,
    cpu_rustfft::plan::{AxisFfts, Kernels},
    host::{DftFlavour, scale, single},
};

/// cpu-spst entry point of [`FftRustFft`].
///
/// # Safety
/// Buffers must satisfy the contract checked by the dispatcher.
pub(crate) unsafe fn execute_spst(
    plan: &Plan<FftRustFft>,
    src: &[RawBuffer],
    dst: &[RawBuffer],
    _params: &ExecutionParameters,
) -> Result<()> {
    let (src, dst) = single(src, dst)?;
    match &plan.handle().kernels {
        Kernels::F32(ffts) => unsafe { run(plan.desc(), ffts, src, dst) },
        Kernels::F64(ffts) => unsafe { run(plan.desc(), ffts, src, dst) },
    }
}

/// Runs `fft` over every line along `axis` of a dense array.
fn fft_axis<T: FftNum>(
    fft: &dyn Fft<T>,
    shape: &[usize],
    axis: usize,
    data: &mut [Complex<T>],
    scratch: &mut [Complex<T>],
) {
    let n: usize = shape[axis];
    let (starts, step) = line_starts(shape, axis);
    let mut lines: Vec<Complex<T>> = Vec::with_capacity(starts.len() * n);
    for &start in &starts {
        lines.extend((0..n).map(|j| data[start + j * step]));
    }
    fft.process_with_scratch(&mut lines, scratch);
    for (line, &start) in izip!(lines.chunks_exact(n), &starts) {
        for (j, &x) in line.iter().enumerate() {
            data[start + j * step] = x;
        }
    }
}

unsafe fn run<T: Scalar + FftNum>(desc: &Desc, kernels: &AxisFfts<T>, src: &RawBuffer, dst: &RawBuffer) -> Result<()> {
    let transform: &TransformDesc = desc.transform();
    let TransformVariant::Dft { src_format, dst_format } = transform.variant() else {
        return Err(FftError::Engine("rustfft plan without a DFT variant".into()));
    };
    let flavour: DftFlavour = DftFlavour::of(*src_format, *dst_format)
        .ok_or_else(|| FftError::Engine(format!("no kernel for {src_format:?} to {dst_format:?}")))?;

    let shape: &[usize] = desc.shape();
    let axes: &[usize] = transform.axes();
    let src_strides: &[usize] = desc.dims().src_strides();
    let dst_strides: &[usize] = desc.dims().dst_strides();
    let factor: Option<T> = match transform.normalization() {
        Normalization::None => None,
        _ => Some(transform.norm_factor_as::<T>(shape)),
    };
    let mut scratch: Vec<Complex<T>> = vec![Complex::default(); kernels.scratch_len];
    let len: usize = shape.iter().product();

    match flavour {
        DftFlavour::C2C => {
            let mut data: Vec<Complex<T>> = vec![Complex::default(); len];
            unsafe { gather(src.ptr() as *const Complex<T>, shape, src_strides, &mut data) };
            for (fft, &axis) in izip!(kernels.ffts.iter(), axes.iter()) {
                fft_axis(fft.as_ref(), shape, axis, &mut data, &mut scratch);
            }
            if let Some(f) = factor {
                scale(&mut data, f);
            }
            unsafe { scatter(dst.ptr() as *mut Complex<T>, shape, dst_strides, &data) };
        }
        DftFlavour::R2C => {
            let last: usize = axes.len() - 1;
            let reduced: usize = axes[last];
            let half: Vec<usize> = half_shape(shape, reduced);

            let mut real: Vec<T> = vec![T::default(); len];
            unsafe { gather(src.ptr() as *const T, shape, src_strides, &mut real) };
            let mut full: Vec<Complex<T>> = real.iter().map(|&x| Complex::new(x, T::zero())).collect();
            fft_axis(kernels.ffts[last].as_ref(), shape, reduced, &mut full, &mut scratch);

            let mut spectrum: Vec<Complex<T>> = vec![Complex::default(); half.iter().product()];
            for_each_offset(&half, &dense_strides(shape), |i, off| spectrum[i] = full[off]);
            for (fft, &axis) in izip!(&kernels.ffts[..last], &axes[..last]) {
                fft_axis(fft.as_ref(), &half, axis, &mut spectrum, &mut scratch);
            }
            if let Some(f) = factor {
                scale(&mut spectrum, f);
            }
            unsafe { scatter(dst.ptr() as *mut Complex<T>, &half, dst_strides, &spectrum) };
        }
        DftFlavour::C2R => {
            let last: usize = axes.len() - 1;
            let reduced: usize = axes[last];
            let half: Vec<usize> = half_shape(shape, reduced);

            let mut spectrum: Vec<Complex<T>> = vec![Complex::default(); half.iter().product()];
            unsafe { gather(src.ptr() as *const Complex<T>, &half, src_strides, &mut spectrum) };
            for (fft, &axis) in izip!(&kernels.ffts[..last], &axes[..last]) {
                fft_axis(fft.as_ref(), &half, axis, &mut spectrum, &mut scratch);
            }

            // rebuild the redundant half of each line from conjugate symmetry
            let n: usize = shape[reduced];
            let (half_starts, half_step) = line_starts(&half, reduced);
            let (full_starts, full_step) = line_starts(shape, reduced);
            let mut full: Vec<Complex<T>> = vec![Complex::default(); len];
            for (hs, fs) in izip!(half_starts, full_starts) {
                for k in 0..n {
                    full[fs + k * full_step] = if k <= n / 2 {
                        spectrum[hs + k * half_step]
                    } else {
                        spectrum[hs + (n - k) * half_step].conj()
                    };
                }
            }
            fft_axis(kernels.ffts[last].as_ref(), shape, reduced, &mut full, &mut scratch);

            let mut real: Vec<T> = full.iter().map(|c| c.re).collect();
            if let Some(f) = factor {
                scale(&mut real, f);
            }
            unsafe { scatter(dst.ptr() as *mut T, shape, dst_strides, &real) };
        }
    }
    Ok(())
}
