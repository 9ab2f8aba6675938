//! Checks and helpers shared by the in-process engines.

use std::ops::Mul;

use unifft_hal::{
    common::ExecutionMode,
    error::{FftError, Result},
    layouts::{Desc, DftFormat, PrecisionTriad, RawBuffer},
    types::Precision,
};

/// Which of the three DFT flavours a format pair describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DftFlavour {
    C2C,
    R2C,
    C2R,
}

impl DftFlavour {
    /// `None` for pairs no in-process engine computes (e.g. full complex to hermitian).
    pub(crate) fn of(src: DftFormat, dst: DftFormat) -> Option<Self> {
        match (src, dst) {
            (DftFormat::Real, d) if d.is_hermitian() => Some(DftFlavour::R2C),
            (s, DftFormat::Real) if s.is_hermitian() => Some(DftFlavour::C2R),
            (s, d) if s.is_complex() && d.is_complex() && !s.is_hermitian() && !d.is_hermitian() => Some(DftFlavour::C2C),
            _ => None,
        }
    }
}

/// Rejects anything but single-target CPU execution in one of `f32`/`f64`,
/// and returns that precision.
pub(crate) fn check_host(desc: &Desc) -> Result<Precision> {
    let mode: ExecutionMode = desc.execution_mode();
    if mode != ExecutionMode::CpuSpst {
        return Err(FftError::unsupported(format!("{mode} execution is not available in-process")));
    }

    let precision: PrecisionTriad = desc.transform().precision();
    if precision.source != precision.execution || precision.destination != precision.execution {
        return Err(FftError::unsupported(format!(
            "buffers in {}/{} with {} execution",
            precision.source, precision.destination, precision.execution
        )));
    }

    match precision.execution {
        Precision::F32 | Precision::F64 => Ok(precision.execution),
        other => Err(FftError::unsupported(format!("{other} execution"))),
    }
}

/// The single source and destination buffer of a cpu-spst call.
pub(crate) fn single<'a>(src: &'a [RawBuffer], dst: &'a [RawBuffer]) -> Result<(&'a RawBuffer, &'a RawBuffer)> {
    match (src, dst) {
        ([s], [d]) => Ok((s, d)),
        _ => Err(FftError::Engine(format!(
            "expected one buffer per side, got {} and {}",
            src.len(),
            dst.len()
        ))),
    }
}

pub(crate) fn imag_of(buf: &RawBuffer) -> Result<*mut u8> {
    buf.imag()
        .ok_or_else(|| FftError::Engine("planar buffer without an imaginary part".into()))
}

pub(crate) fn scale<V, T>(data: &mut [V], factor: T)
where
    V: Copy + Mul<T, Output = V>,
    T: Copy,
{
    data.iter_mut().for_each(|x| *x = *x * factor);
}

#[cfg(test)]
mod tests {
    use unifft_hal::layouts::DftFormat;

    use super::DftFlavour;

    #[test]
    fn flavours() {
        use DftFormat::*;
        assert_eq!(DftFlavour::of(ComplexPlanar, ComplexInterleaved), Some(DftFlavour::C2C));
        assert_eq!(DftFlavour::of(Real, HermitianComplexPlanar), Some(DftFlavour::R2C));
        assert_eq!(DftFlavour::of(HermitianComplexInterleaved, Real), Some(DftFlavour::C2R));
        assert_eq!(DftFlavour::of(Real, ComplexInterleaved), None);
        assert_eq!(DftFlavour::of(ComplexInterleaved, HermitianComplexInterleaved), None);
    }
}
