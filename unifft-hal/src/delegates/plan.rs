use std::fmt::Debug;

use tracing::debug;

use crate::{
    api::{AnyPlan, PlanExecuteRaw, PlanInfos, PlanNew, PlanWorkspaceSize},
    common::ExecutionMode,
    dispatch,
    error::Result,
    layouts::{Backend, BackendId, BufferList, Capabilities, Context, Desc, ExecutionParameters, Plan},
    oep::{PlanCapabilitiesImpl, PlanNewImpl, PlanWorkspaceSizeImpl},
};

impl<B> PlanNew<B> for Plan<B>
where
    B: Backend + PlanNewImpl<B> + PlanCapabilitiesImpl<B>,
{
    fn new(ctx: &Context, desc: Desc) -> Result<Self> {
        B::plan_check_impl(ctx, &desc)?;
        let handle: B::Handle = B::plan_handle_impl(ctx, &desc)?;
        let capabilities: Capabilities<B> = B::plan_capabilities_impl(&desc);
        debug!(backend = %B::ID, modes = ?capabilities.modes(), "plan created");
        Ok(Plan::from_parts(desc, handle, capabilities))
    }
}

impl<B> PlanInfos for Plan<B>
where
    B: Backend,
{
    fn desc(&self) -> &Desc {
        Plan::desc(self)
    }

    fn backend(&self) -> BackendId {
        B::ID
    }

    fn execution_modes(&self) -> Vec<ExecutionMode> {
        self.capabilities().modes()
    }
}

impl<B> PlanWorkspaceSize for Plan<B>
where
    B: Backend + PlanWorkspaceSizeImpl<B>,
{
    fn workspace_size(&self) -> Vec<usize> {
        B::plan_workspace_size_impl(self)
    }
}

impl<B> PlanExecuteRaw for Plan<B>
where
    B: Backend,
{
    unsafe fn execute_raw(&self, src: &BufferList, dst: &BufferList, params: Option<&ExecutionParameters>) -> Result<()> {
        unsafe { dispatch::execute(self, src, dst, params) }
    }
}

impl<T> AnyPlan for T where T: PlanInfos + PlanWorkspaceSize + PlanExecuteRaw + Send + Sync + Debug {}
