use std::fmt::Debug;

use crate::{
    common::ExecutionMode,
    error::Result,
    layouts::{Backend, BackendId, Context, Desc},
};

use super::PlanExecuteRaw;

/// Builds a plan for a validated descriptor.
pub trait PlanNew<B: Backend>: Sized {
    fn new(ctx: &Context, desc: Desc) -> Result<Self>;
}

/// Read accessors shared by every plan.
pub trait PlanInfos {
    fn desc(&self) -> &Desc;

    fn backend(&self) -> BackendId;

    /// Execution modes the engine implements for this plan.
    fn execution_modes(&self) -> Vec<ExecutionMode>;
}

/// Workspace bytes the plan needs, one entry per target.
pub trait PlanWorkspaceSize {
    fn workspace_size(&self) -> Vec<usize>;
}

/// Backend-erased plan, as returned by backend selection.
pub trait AnyPlan: PlanInfos + PlanWorkspaceSize + PlanExecuteRaw + Send + Sync + Debug {}
