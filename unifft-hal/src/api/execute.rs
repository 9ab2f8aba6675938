use crate::{
    error::Result,
    layouts::{BufferList, BufferView, ExecutionParameters},
    types::KnownType,
};

/// The canonical call every execute variant reduces to.
pub trait PlanExecuteRaw {
    /// Validates `src`/`dst` against the plan and runs the engine entry point
    /// of the plan's execution mode. `None` parameters select the mode's
    /// defaults.
    ///
    /// # Safety
    /// See [`crate::dispatch::execute`].
    unsafe fn execute_raw(&self, src: &BufferList, dst: &BufferList, params: Option<&ExecutionParameters>) -> Result<()>;
}

/// Typed adapters over [`PlanExecuteRaw`] for single-target plans.
///
/// Typed calls additionally check element precision and complexity, and for
/// single-target plans that every buffer covers the layout span.
pub trait PlanExecute {
    /// Out-of-place execution. The engine may overwrite `src` unless the plan
    /// preserves its source.
    fn execute<S: BufferView, D: BufferView>(&self, src: S, dst: D) -> Result<()>;

    fn execute_with<S: BufferView, D: BufferView>(&self, src: S, dst: D, params: &ExecutionParameters) -> Result<()>;

    /// Out-of-place execution over a read-only source.
    fn execute_preserving<S: KnownType, D: BufferView>(&self, src: &[S], dst: D) -> Result<()>;

    fn execute_inplace<T: BufferView>(&self, buf: T) -> Result<()>;

    /// Typed multi-target call, one pointer per target on each side.
    ///
    /// # Safety
    /// Each pointer must address memory laid out as the plan's descriptor
    /// states for its target; capacities are not checked.
    unsafe fn execute_targets<S: KnownType, D: KnownType>(
        &self,
        src: &[*mut S],
        dst: &[*mut D],
        params: Option<&ExecutionParameters>,
    ) -> Result<()>;
}

/// Untyped pointers; element types are not checked.
pub trait PlanExecuteUnsafe {
    /// # Safety
    /// Each pointer must address memory laid out as the plan's descriptor
    /// states. Only interleaved and real formats can be addressed this way;
    /// planar buffers go through [`PlanExecuteRaw::execute_raw`].
    unsafe fn execute_unsafe(&self, src: &[*mut u8], dst: &[*mut u8], params: Option<&ExecutionParameters>) -> Result<()>;
}
