use std::{
    fmt::{Debug, Formatter},
    sync::Arc,
};

use num_complex::Complex;
use rustfft::{Fft, FftDirection, FftNum, FftPlanner, Length};
use tracing::debug;
use unifft_hal::{
    common::{Direction, ExecutionMode, Placement},
    error::{FftError, Result},
    layouts::{Backend, BackendId, Capabilities, Context, Desc, Plan, TransformDesc, TransformVariant},
    oep::{PlanCapabilitiesImpl, PlanNewImpl, PlanWorkspaceSizeImpl},
    types::Precision,
};

use crate::{
    FftRustFft,
    cpu_rustfft::execute::execute_spst,
    host::{DftFlavour, check_host},
};

/// One planned 1D transform per transform axis, in the descriptor's axis order.
pub(crate) struct AxisFfts<T: FftNum> {
    pub(crate) ffts: Vec<Arc<dyn Fft<T>>>,
    /// Longest in-place scratch any of `ffts` needs.
    pub(crate) scratch_len: usize,
}

impl<T: FftNum> AxisFfts<T> {
    fn new(shape: &[usize], axes: &[usize], direction: FftDirection) -> Self {
        let mut planner: FftPlanner<T> = FftPlanner::new();
        let ffts: Vec<Arc<dyn Fft<T>>> = axes
            .iter()
            .map(|&axis| planner.plan_fft(shape[axis], direction))
            .collect();
        let scratch_len: usize = ffts
            .iter()
            .map(|fft| fft.get_inplace_scratch_len())
            .max()
            .unwrap_or(0);
        Self { ffts, scratch_len }
    }
}

pub(crate) enum Kernels {
    F32(AxisFfts<f32>),
    F64(AxisFfts<f64>),
}

pub struct FftRustFftHandle {
    pub(crate) kernels: Kernels,
}

impl FftRustFftHandle {
    fn scratch_bytes(&self) -> usize {
        match &self.kernels {
            Kernels::F32(k) => k.scratch_len * size_of::<Complex<f32>>(),
            Kernels::F64(k) => k.scratch_len * size_of::<Complex<f64>>(),
        }
    }
}

impl Debug for FftRustFftHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (precision, lens): (&str, Vec<usize>) = match &self.kernels {
            Kernels::F32(k) => ("f32", k.ffts.iter().map(|fft| fft.len()).collect()),
            Kernels::F64(k) => ("f64", k.ffts.iter().map(|fft| fft.len()).collect()),
        };
        f.debug_struct("FftRustFftHandle")
            .field("precision", &precision)
            .field("lens", &lens)
            .finish()
    }
}

impl Backend for FftRustFft {
    type Handle = FftRustFftHandle;

    const ID: BackendId = BackendId::RustFft;
}

/// # Safety
///
/// Only interleaved c2c, r2c and c2r DFTs on cpu-spst are accepted.
/// In-place c2c requires identical source and destination strides; in-place
/// real transforms are refused.
unsafe impl PlanNewImpl<Self> for FftRustFft {
    fn plan_check_impl(_ctx: &Context, desc: &Desc) -> Result<()> {
        check_host(desc)?;

        let TransformVariant::Dft { src_format, dst_format } = desc.transform().variant() else {
            return Err(FftError::unsupported(format!(
                "rustfft computes DFTs only, not {:?}",
                desc.transform().kind()
            )));
        };

        if src_format.is_planar() || dst_format.is_planar() {
            return Err(FftError::unsupported("rustfft needs interleaved complex data"));
        }

        let flavour: DftFlavour = DftFlavour::of(*src_format, *dst_format).ok_or_else(|| {
            FftError::unsupported(format!("{src_format:?} to {dst_format:?} is not a c2c, r2c or c2r pair"))
        })?;

        if desc.placement() == Placement::InPlace {
            match flavour {
                DftFlavour::C2C if !desc.dims().strides_equal() => {
                    return Err(FftError::unsupported("in-place c2c with differing source and destination strides"));
                }
                DftFlavour::R2C | DftFlavour::C2R => {
                    return Err(FftError::unsupported("in-place real transforms"));
                }
                DftFlavour::C2C => {}
            }
        }
        Ok(())
    }

    fn plan_handle_impl(_ctx: &Context, desc: &Desc) -> Result<FftRustFftHandle> {
        let transform: &TransformDesc = desc.transform();
        let flavour: Option<DftFlavour> = match transform.variant() {
            TransformVariant::Dft { src_format, dst_format } => DftFlavour::of(*src_format, *dst_format),
            _ => None,
        };
        let direction: FftDirection = match (flavour, transform.direction()) {
            (Some(DftFlavour::R2C), _) => FftDirection::Forward,
            (Some(DftFlavour::C2R), _) => FftDirection::Inverse,
            (_, Direction::Forward) => FftDirection::Forward,
            (_, Direction::Inverse) => FftDirection::Inverse,
        };

        let shape: &[usize] = desc.shape();
        let axes: &[usize] = transform.axes();
        let kernels: Kernels = match transform.precision().execution {
            Precision::F32 => Kernels::F32(AxisFfts::new(shape, axes, direction)),
            Precision::F64 => Kernels::F64(AxisFfts::new(shape, axes, direction)),
            other => return Err(FftError::unsupported(format!("{other} execution"))),
        };

        let handle: FftRustFftHandle = FftRustFftHandle { kernels };
        debug!(?handle, ?direction, "rustfft plan");
        Ok(handle)
    }
}

unsafe impl PlanCapabilitiesImpl<Self> for FftRustFft {
    fn plan_capabilities_impl(_desc: &Desc) -> Capabilities<Self> {
        Capabilities::new().with(ExecutionMode::CpuSpst, execute_spst)
    }
}

unsafe impl PlanWorkspaceSizeImpl<Self> for FftRustFft {
    fn plan_workspace_size_impl(plan: &Plan<Self>) -> Vec<usize> {
        vec![plan.handle().scratch_bytes()]
    }
}
