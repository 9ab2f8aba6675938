//! Call-time validation and routing of buffers to an engine entry point.
//!
//! Every execute variant funnels into [`execute`], which runs the checks below
//! in order and stops at the first failure:
//!
//! 1. preservation of a read-only source;
//! 2. buffer counts against the plan's target count;
//! 3. placement inferred from buffer identity against the declared placement;
//! 4. element types, for typed calls only;
//! 5. null pointers, planar layout and (typed single-target calls) capacity;
//! 6. execution parameters, defaulted when absent;
//! 7. lookup of the engine entry point for the plan's execution mode.

use tracing::trace;

use crate::{
    common::{Distribution, ExecutionMode, Placement},
    error::{BufferSide, FftError, Result},
    layouts::{Backend, BufferList, Desc, ExecuteFn, ExecutionParameters, Plan},
    types::TypeInfo,
};

/// Runs steps 1 to 6 and returns the parameters the engine will receive.
pub fn validate(
    desc: &Desc,
    src: &BufferList,
    dst: &BufferList,
    params: Option<&ExecutionParameters>,
) -> Result<ExecutionParameters> {
    if src.is_read_only() && !desc.preserve_source() {
        return Err(FftError::PreservationViolated);
    }

    let target_count: usize = desc.target_count();
    for (side, list) in [(BufferSide::Source, src), (BufferSide::Destination, dst)] {
        if list.len() != target_count {
            return Err(FftError::BufferCount {
                side,
                expected: target_count,
                actual: list.len(),
            });
        }
    }

    let inferred: Placement = infer_placement(src, dst);
    if inferred != desc.placement() {
        return Err(FftError::PlacementMismatch {
            declared: desc.placement(),
            inferred,
        });
    }

    check_types(desc, src, dst)?;

    check_buffers(desc, BufferSide::Source, src)?;
    check_buffers(desc, BufferSide::Destination, dst)?;

    let mode: ExecutionMode = desc.execution_mode();
    let params: ExecutionParameters = match params {
        Some(p) if p.mode() != mode => {
            return Err(FftError::ExecutionParamsMismatch {
                expected: mode,
                actual: p.mode(),
            });
        }
        Some(p) => p.clone(),
        None => ExecutionParameters::default_for(mode),
    };

    if desc.target_desc().external_workspace() {
        params.check_workspaces(target_count)?;
    }

    Ok(params)
}

/// Validates and forwards the call to the plan's entry point.
///
/// # Safety
/// Every non-null pointer in `src` and `dst` must address memory laid out as
/// the plan's descriptor states, valid for the duration of the call. Buffers
/// without a known byte length are trusted to be large enough.
pub unsafe fn execute<B: Backend>(
    plan: &Plan<B>,
    src: &BufferList,
    dst: &BufferList,
    params: Option<&ExecutionParameters>,
) -> Result<()> {
    let desc: &Desc = plan.desc();
    let params: ExecutionParameters = validate(desc, src, dst, params)?;

    let mode: ExecutionMode = params.mode();
    let entry: ExecuteFn<B> = plan
        .capabilities()
        .get(mode)
        .ok_or(FftError::BackendUnimplemented(mode))?;

    trace!(backend = %B::ID, %mode, targets = desc.target_count(), "dispatch");
    unsafe { entry(plan, src.buffers(), dst.buffers(), &params) }
}

fn infer_placement(src: &BufferList, dst: &BufferList) -> Placement {
    let identical: bool = src
        .buffers()
        .iter()
        .zip(dst.buffers())
        .all(|(s, d)| s.same_memory(d));
    if identical {
        Placement::InPlace
    } else {
        Placement::OutOfPlace
    }
}

fn check_types(desc: &Desc, src: &BufferList, dst: &BufferList) -> Result<()> {
    let src_type: TypeInfo = desc.transform().src_type();
    let dst_type: TypeInfo = desc.transform().dst_type();
    let in_place: bool = desc.placement() == Placement::InPlace;

    for (side, list, expected) in [
        (BufferSide::Source, src, src_type),
        (BufferSide::Destination, dst, dst_type),
    ] {
        let Some(actual) = list.elem() else {
            continue;
        };
        let accepted: bool = actual == expected || (in_place && (actual == src_type || actual == dst_type));
        if !accepted {
            return Err(FftError::TypeMismatch { side, expected, actual });
        }
    }
    Ok(())
}

fn check_buffers(desc: &Desc, side: BufferSide, list: &BufferList) -> Result<()> {
    let format = match side {
        BufferSide::Source => desc.transform().src_format(),
        BufferSide::Destination => desc.transform().dst_format(),
    };
    let planar: bool = format.is_some_and(|f| f.is_planar());

    // Capacity is only known relative to one target's layout.
    let required: Option<usize> = match (list.elem(), desc.distribution()) {
        (Some(_), Distribution::Spst) => Some(match side {
            BufferSide::Source => desc.src_span_bytes(),
            BufferSide::Destination => desc.dst_span_bytes(),
        }),
        _ => None,
    };

    for (index, buffer) in list.buffers().iter().enumerate() {
        if buffer.is_null() {
            return Err(FftError::NullBuffer { side, index });
        }
        if buffer.is_planar() != planar {
            return Err(FftError::LayoutMismatch { side, index, planar });
        }
        if let (Some(required), Some(actual)) = (required, buffer.bytes()) {
            if actual < required {
                return Err(FftError::BufferTooSmall {
                    side,
                    index,
                    required,
                    actual,
                });
            }
        }
    }
    Ok(())
}
