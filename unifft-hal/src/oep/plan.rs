use crate::{
    error::Result,
    layouts::{Backend, Capabilities, Context, Desc, Plan},
};

/// # THIS TRAIT IS AN OPEN EXTENSION POINT (unsafe)
/// * See `unifft-backend/src/cpu_ref/plan.rs` for a reference implementation.
/// * See [crate::api::PlanNew] for corresponding public API.
/// # Safety [crate::doc::backend_safety] for safety contract.
pub unsafe trait PlanNewImpl<B: Backend> {
    /// Rejects descriptors the engine cannot execute, before any state is built.
    fn plan_check_impl(ctx: &Context, desc: &Desc) -> Result<()>;

    fn plan_handle_impl(ctx: &Context, desc: &Desc) -> Result<B::Handle>;
}

/// # THIS TRAIT IS AN OPEN EXTENSION POINT (unsafe)
/// * See `unifft-backend/src/cpu_ref/execute.rs` for a reference implementation.
/// * See [crate::api::PlanExecuteRaw] for corresponding public API.
/// # Safety [crate::doc::backend_safety] for safety contract.
pub unsafe trait PlanCapabilitiesImpl<B: Backend> {
    fn plan_capabilities_impl(desc: &Desc) -> Capabilities<B>;
}

/// # THIS TRAIT IS AN OPEN EXTENSION POINT (unsafe)
/// * See `unifft-backend/src/cpu_ref/plan.rs` for a reference implementation.
/// * See [crate::api::PlanWorkspaceSize] for corresponding public API.
/// # Safety [crate::doc::backend_safety] for safety contract.
pub unsafe trait PlanWorkspaceSizeImpl<B: Backend> {
    fn plan_workspace_size_impl(plan: &Plan<B>) -> Vec<usize>;
}
