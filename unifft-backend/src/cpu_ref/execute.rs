use unifft_hal::{
    alloc_aligned_custom,
    common::Normalization,
    error::{FftError, Result},
    layouts::{AlignedBuf, Desc, DftFormat, ExecutionParameters, Plan, RawBuffer, TransformDesc, TransformVariant},
    reference::{
        dft::{dft_c2c, dft_c2r, dft_r2c},
        dht::dht_separable,
        dtt::dtt,
        strided::{gather, gather_interleaved, scatter, scatter_interleaved},
    },
    types::{Precision, Scalar},
};

use crate::{
    FftRef,
    host::{DftFlavour, imag_of, scale, single},
};

/// cpu-spst entry point of [`FftRef`].
///
/// # Safety
/// Buffers must satisfy the contract checked by the dispatcher.
pub(crate) unsafe fn execute_spst(
    plan: &Plan<FftRef>,
    src: &[RawBuffer],
    dst: &[RawBuffer],
    _params: &ExecutionParameters,
) -> Result<()> {
    let (src, dst) = single(src, dst)?;
    let align: usize = plan.handle().alignment;
    match plan.handle().precision {
        Precision::F32 => unsafe { run::<f32>(plan.desc(), align, src, dst) },
        Precision::F64 => unsafe { run::<f64>(plan.desc(), align, src, dst) },
        other => Err(FftError::Engine(format!("reference engine cannot compute in {other}"))),
    }
}

unsafe fn run<T: Scalar>(desc: &Desc, align: usize, src: &RawBuffer, dst: &RawBuffer) -> Result<()> {
    let transform: &TransformDesc = desc.transform();
    let shape: &[usize] = desc.shape();
    let axes: &[usize] = transform.axes();
    let src_strides: &[usize] = desc.dims().src_strides();
    let dst_strides: &[usize] = desc.dims().dst_strides();
    let factor: Option<T> = match transform.normalization() {
        Normalization::None => None,
        _ => Some(transform.norm_factor_as::<T>(shape)),
    };

    match transform.variant() {
        TransformVariant::Dft { src_format, dst_format } => {
            let src_extents: Vec<usize> = transform.src_extents(shape);
            let dst_extents: Vec<usize> = transform.dst_extents(shape);
            let flavour: DftFlavour = DftFlavour::of(*src_format, *dst_format)
                .ok_or_else(|| FftError::Engine(format!("no kernel for {src_format:?} to {dst_format:?}")))?;

            match flavour {
                DftFlavour::C2C => {
                    let (mut re, mut im) = unsafe { load_complex::<T>(src, *src_format, &src_extents, src_strides, align)? };
                    dft_c2c(shape, axes, transform.direction(), &mut re, &mut im);
                    if let Some(f) = factor {
                        scale(&mut re, f);
                        scale(&mut im, f);
                    }
                    unsafe { store_complex(dst, *dst_format, &dst_extents, dst_strides, &re, &im) }
                }
                DftFlavour::R2C => {
                    let input: AlignedBuf<T> = unsafe { load_real::<T>(src, &src_extents, src_strides, align) };
                    let len: usize = dst_extents.iter().product();
                    let mut re: AlignedBuf<T> = alloc_aligned_custom(len, align);
                    let mut im: AlignedBuf<T> = alloc_aligned_custom(len, align);
                    dft_r2c(shape, axes, &input, &mut re, &mut im);
                    if let Some(f) = factor {
                        scale(&mut re, f);
                        scale(&mut im, f);
                    }
                    unsafe { store_complex(dst, *dst_format, &dst_extents, dst_strides, &re, &im) }
                }
                DftFlavour::C2R => {
                    let (mut re, mut im) = unsafe { load_complex::<T>(src, *src_format, &src_extents, src_strides, align)? };
                    let mut out: AlignedBuf<T> = alloc_aligned_custom(dst_extents.iter().product(), align);
                    dft_c2r(shape, axes, &mut re, &mut im, &mut out);
                    if let Some(f) = factor {
                        scale(&mut out, f);
                    }
                    unsafe { store_real(dst, &dst_extents, dst_strides, &out) };
                    Ok(())
                }
            }
        }
        TransformVariant::Dht { .. } => {
            let mut data: AlignedBuf<T> = unsafe { load_real::<T>(src, shape, src_strides, align) };
            dht_separable(shape, axes, &mut data);
            if let Some(f) = factor {
                scale(&mut data, f);
            }
            unsafe { store_real(dst, shape, dst_strides, &data) };
            Ok(())
        }
        TransformVariant::Dtt { types } => {
            let mut data: AlignedBuf<T> = unsafe { load_real::<T>(src, shape, src_strides, align) };
            dtt(shape, axes, types, transform.direction(), &mut data);
            if let Some(f) = factor {
                scale(&mut data, f);
            }
            unsafe { store_real(dst, shape, dst_strides, &data) };
            Ok(())
        }
    }
}

unsafe fn load_real<T: Scalar>(buf: &RawBuffer, extents: &[usize], strides: &[usize], align: usize) -> AlignedBuf<T> {
    let mut data: AlignedBuf<T> = alloc_aligned_custom(extents.iter().product(), align);
    unsafe { gather(buf.ptr() as *const T, extents, strides, &mut data) };
    data
}

unsafe fn load_complex<T: Scalar>(
    buf: &RawBuffer,
    format: DftFormat,
    extents: &[usize],
    strides: &[usize],
    align: usize,
) -> Result<(AlignedBuf<T>, AlignedBuf<T>)> {
    let len: usize = extents.iter().product();
    let mut re: AlignedBuf<T> = alloc_aligned_custom(len, align);
    let mut im: AlignedBuf<T> = alloc_aligned_custom(len, align);
    if format.is_planar() {
        let imag: *mut u8 = imag_of(buf)?;
        unsafe {
            gather(buf.ptr() as *const T, extents, strides, &mut re);
            gather(imag as *const T, extents, strides, &mut im);
        }
    } else {
        unsafe { gather_interleaved(buf.ptr() as *const T, extents, strides, &mut re, &mut im) };
    }
    Ok((re, im))
}

unsafe fn store_real<T: Scalar>(buf: &RawBuffer, extents: &[usize], strides: &[usize], data: &[T]) {
    unsafe { scatter(buf.ptr() as *mut T, extents, strides, data) };
}

unsafe fn store_complex<T: Scalar>(
    buf: &RawBuffer,
    format: DftFormat,
    extents: &[usize],
    strides: &[usize],
    re: &[T],
    im: &[T],
) -> Result<()> {
    if format.is_planar() {
        let imag: *mut u8 = imag_of(buf)?;
        unsafe {
            scatter(buf.ptr() as *mut T, extents, strides, re);
            scatter(imag as *mut T, extents, strides, im);
        }
    } else {
        unsafe { scatter_interleaved(buf.ptr() as *mut T, extents, strides, re, im) };
    }
    Ok(())
}
