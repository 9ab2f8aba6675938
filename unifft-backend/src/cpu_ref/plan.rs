//! Backend identity, plan checks and handle for [`FftRef`](crate::FftRef).

use tracing::debug;
use unifft_hal::{
    DEFAULTALIGN,
    common::{ExecutionMode, Placement},
    error::{FftError, Result},
    layouts::{Backend, BackendId, Capabilities, Context, Desc, Plan, TransformVariant},
    oep::{PlanCapabilitiesImpl, PlanNewImpl, PlanWorkspaceSizeImpl},
    types::Precision,
};

use crate::{
    FftRef,
    cpu_ref::execute::execute_spst,
    host::{DftFlavour, check_host},
};

/// Per-plan state of the reference engine.
#[derive(Debug)]
pub struct FftRefHandle {
    pub(crate) precision: Precision,
    /// Alignment of the dense working arrays.
    pub(crate) alignment: usize,
    pub(crate) scratch_bytes: usize,
}

impl Backend for FftRef {
    type Handle = FftRefHandle;

    const ID: BackendId = BackendId::Reference;
}

/// # Safety
///
/// Accepts only cpu-spst descriptors in `f32`/`f64` whose DFT formats form a
/// c2c, r2c or c2r pair; in-place plans must use the same planar-ness on both
/// sides so that one buffer can stand for both.
unsafe impl PlanNewImpl<Self> for FftRef {
    fn plan_check_impl(_ctx: &Context, desc: &Desc) -> Result<()> {
        check_host(desc)?;

        if let TransformVariant::Dft { src_format, dst_format } = desc.transform().variant() {
            if DftFlavour::of(*src_format, *dst_format).is_none() {
                return Err(FftError::unsupported(format!(
                    "{src_format:?} to {dst_format:?} is not a c2c, r2c or c2r pair"
                )));
            }
            if desc.placement() == Placement::InPlace && src_format.is_planar() != dst_format.is_planar() {
                return Err(FftError::unsupported("in-place transform between planar and interleaved formats"));
            }
        }
        Ok(())
    }

    fn plan_handle_impl(_ctx: &Context, desc: &Desc) -> Result<FftRefHandle> {
        let precision: Precision = desc.transform().precision().execution;
        let alignment: usize = desc
            .target_desc()
            .cpu()
            .map_or(DEFAULTALIGN, |cpu| cpu.alignment);
        // two dense arrays over the full shape
        let scratch_bytes: usize = desc
            .shape()
            .iter()
            .try_fold(2 * precision.size_of(), |acc, &e| acc.checked_mul(e))
            .ok_or_else(|| FftError::unsupported("reference scratch size overflows usize"))?;
        debug!(%precision, alignment, scratch_bytes, "reference plan");
        Ok(FftRefHandle {
            precision,
            alignment,
            scratch_bytes,
        })
    }
}

unsafe impl PlanCapabilitiesImpl<Self> for FftRef {
    fn plan_capabilities_impl(_desc: &Desc) -> Capabilities<Self> {
        Capabilities::new().with(ExecutionMode::CpuSpst, execute_spst)
    }
}

unsafe impl PlanWorkspaceSizeImpl<Self> for FftRef {
    fn plan_workspace_size_impl(plan: &Plan<Self>) -> Vec<usize> {
        vec![plan.handle().scratch_bytes]
    }
}
