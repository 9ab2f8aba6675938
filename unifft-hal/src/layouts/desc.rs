use tracing::debug;

use crate::{
    common::{Distribution, ExecutionMode, Placement, Target},
    error::{FftError, Result},
    layouts::{BackendParameters, Context, DimensionsDesc, TargetDesc, TargetParameters, TransformDesc, TransformParameters, span},
};

use super::dimensions::LAYOUT_OVERFLOW;

/// Immutable aggregate describing a plan: transform, layout, target and distribution.
///
/// Built once by [`Desc::new`]; every field is read-only afterwards. Two
/// descriptors built from identical parameters compare equal and hash
/// identically, which is what the plan cache keys on.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Desc {
    transform: TransformDesc,
    dims: DimensionsDesc,
    target: TargetDesc,
    distribution: Distribution,
    mode: ExecutionMode,
    placement: Placement,
    target_count: usize,
    src_span_bytes: usize,
    dst_span_bytes: usize,
    preserve_source: bool,
    backend: BackendParameters,
}

impl Desc {
    pub fn new(ctx: &Context, transform: &TransformParameters, target: &TargetParameters) -> Result<Self> {
        let mode: ExecutionMode = ExecutionMode::new(target.target(), target.distribution())?;

        let transform_desc: TransformDesc = TransformDesc::new(transform)?;

        let layout = target.memory_layout();
        let mut dims: DimensionsDesc = DimensionsDesc::new(&transform.shape, &layout.src_strides, &layout.dst_strides)?;
        transform_desc.derive_strides(&mut dims, transform.placement)?;

        let overflow = || FftError::invalid(LAYOUT_OVERFLOW);
        let elem_size: usize = transform_desc.src_elem_size().max(transform_desc.dst_elem_size());
        dims.shape()
            .iter()
            .try_fold(elem_size, |acc, &e| acc.checked_mul(e))
            .ok_or_else(overflow)?;
        let src_span_bytes: usize = span(&transform_desc.src_extents(dims.shape()), dims.src_strides())
            .and_then(|n| n.checked_mul(transform_desc.src_elem_size()))
            .ok_or_else(overflow)?;
        let dst_span_bytes: usize = span(&transform_desc.dst_extents(dims.shape()), dims.dst_strides())
            .and_then(|n| n.checked_mul(transform_desc.dst_elem_size()))
            .ok_or_else(overflow)?;

        if target.distribution() == Distribution::Mpst && ctx.process_group().is_none() {
            return Err(FftError::unsupported(
                "multi-process distribution requires a process group in the context",
            ));
        }

        let target_desc: TargetDesc = TargetDesc::new(ctx, target)?;

        let target_count: usize = match (&target_desc, target.distribution()) {
            (TargetDesc::Gpu(gpu), Distribution::Spmt) => gpu.devices.len(),
            _ => 1,
        };

        let backend: BackendParameters = target
            .backend()
            .cloned()
            .unwrap_or_else(|| BackendParameters::default_for(mode));

        debug!(
            kind = ?transform_desc.kind(),
            shape = ?dims.shape(),
            axes = ?transform_desc.axes(),
            %mode,
            placement = %transform.placement,
            target_count,
            "descriptor built"
        );

        Ok(Self {
            transform: transform_desc,
            dims,
            target: target_desc,
            distribution: target.distribution(),
            mode,
            placement: transform.placement,
            target_count,
            src_span_bytes,
            dst_span_bytes,
            preserve_source: target.preserve_source(),
            backend,
        })
    }

    pub fn transform(&self) -> &TransformDesc {
        &self.transform
    }

    pub fn dims(&self) -> &DimensionsDesc {
        &self.dims
    }

    pub fn shape(&self) -> &[usize] {
        self.dims.shape()
    }

    pub fn target_desc(&self) -> &TargetDesc {
        &self.target
    }

    pub fn target(&self) -> Target {
        self.target.target()
    }

    pub fn distribution(&self) -> Distribution {
        self.distribution
    }

    pub fn execution_mode(&self) -> ExecutionMode {
        self.mode
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    pub fn preserve_source(&self) -> bool {
        self.preserve_source
    }

    pub fn backend_parameters(&self) -> &BackendParameters {
        &self.backend
    }

    /// Bytes one source buffer must cover for a single-target layout.
    pub fn src_span_bytes(&self) -> usize {
        self.src_span_bytes
    }

    pub fn dst_span_bytes(&self) -> usize {
        self.dst_span_bytes
    }
}
