use std::fmt::{Debug, Formatter};

use utils::Map;

use crate::{
    common::ExecutionMode,
    error::Result,
    layouts::{BackendId, Desc, ExecutionParameters, RawBuffer},
};

/// An FFT engine adapter.
pub trait Backend: Sized + Send + Sync + 'static {
    /// Engine-owned state kept alive for the lifetime of a plan.
    type Handle: Send + Sync + 'static;

    const ID: BackendId;
}

/// Engine entry point for one execution mode.
///
/// # Safety
/// Called only after the dispatcher validated the buffers against the plan:
/// counts equal the target count, pointers are non-null, placement matches and
/// the parameters belong to the plan's mode. The pointed-to memory must cover
/// the plan's layout.
pub type ExecuteFn<B> = unsafe fn(&Plan<B>, &[RawBuffer], &[RawBuffer], &ExecutionParameters) -> Result<()>;

/// Which execution modes an engine implements for a given plan.
pub struct Capabilities<B: Backend> {
    entries: Map<ExecutionMode, ExecuteFn<B>>,
}

impl<B: Backend> Capabilities<B> {
    pub fn new() -> Self {
        Self { entries: Map::new() }
    }

    pub fn with(mut self, mode: ExecutionMode, f: ExecuteFn<B>) -> Self {
        self.entries.insert(mode, f);
        self
    }

    pub fn get(&self, mode: ExecutionMode) -> Option<ExecuteFn<B>> {
        self.entries.get(&mode).copied()
    }

    pub fn supports(&self, mode: ExecutionMode) -> bool {
        self.entries.contains_key(&mode)
    }

    /// Implemented modes in [`ExecutionMode::ALL`] order.
    pub fn modes(&self) -> Vec<ExecutionMode> {
        ExecutionMode::ALL
            .into_iter()
            .filter(|mode| self.supports(*mode))
            .collect()
    }
}

impl<B: Backend> Default for Capabilities<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> Clone for Capabilities<B> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<B: Backend> Debug for Capabilities<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.modes()).finish()
    }
}

/// A validated, immutable descriptor bound to one engine's prepared state.
pub struct Plan<B: Backend> {
    desc: Desc,
    handle: B::Handle,
    capabilities: Capabilities<B>,
}

impl<B: Backend> Plan<B> {
    pub fn from_parts(desc: Desc, handle: B::Handle, capabilities: Capabilities<B>) -> Self {
        Self {
            desc,
            handle,
            capabilities,
        }
    }

    pub fn desc(&self) -> &Desc {
        &self.desc
    }

    pub fn handle(&self) -> &B::Handle {
        &self.handle
    }

    pub fn capabilities(&self) -> &Capabilities<B> {
        &self.capabilities
    }

    pub fn backend(&self) -> BackendId {
        B::ID
    }
}

impl<B: Backend> Debug for Plan<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plan")
            .field("backend", &B::ID)
            .field("desc", &self.desc)
            .field("capabilities", &self.capabilities)
            .finish()
    }
}
