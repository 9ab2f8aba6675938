//! Stand-ins for the external collaborators a [`Context`] holds, and an engine
//! that records which entry point it was routed to.

use std::sync::{Arc, Mutex};

use crate::{
    common::ExecutionMode,
    error::{FftError, Result},
    layouts::{
        Backend, BackendId, Capabilities, Context, DeviceId, Desc, ExecutionParameters, GpuRuntime, Plan, ProcessGroup,
        RawBuffer, StreamHandle,
    },
    oep::{PlanCapabilitiesImpl, PlanNewImpl, PlanWorkspaceSizeImpl},
};

#[derive(Debug)]
pub struct MockGpu {
    pub devices: usize,
    pub current: DeviceId,
}

impl MockGpu {
    pub fn new(devices: usize) -> Self {
        Self { devices, current: 0 }
    }
}

impl GpuRuntime for MockGpu {
    fn name(&self) -> &str {
        "mock"
    }

    fn device_count(&self) -> usize {
        self.devices
    }

    fn current_device(&self) -> DeviceId {
        self.current
    }
}

#[derive(Debug)]
pub struct MockGroup {
    pub rank: usize,
    pub size: usize,
}

impl ProcessGroup for MockGroup {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }
}

/// Context with `devices` mock GPUs and a two-process group.
pub fn mock_context(devices: usize) -> Context {
    Context::new()
        .with_gpu(Arc::new(MockGpu::new(devices)))
        .with_process_group(Arc::new(MockGroup { rank: 0, size: 2 }))
        .with_hardware_concurrency(4)
}

/// One routed call, as seen by [`Recording`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Call {
    pub mode: ExecutionMode,
    pub targets: usize,
    pub stream: Option<StreamHandle>,
    pub workspaces: usize,
}

/// Engine that implements every mode but cpu-mpst and only records its calls.
pub struct Recording;

impl Backend for Recording {
    type Handle = Mutex<Vec<Call>>;

    const ID: BackendId = BackendId::Vkfft;
}

impl Recording {
    pub fn calls(plan: &Plan<Recording>) -> Vec<Call> {
        match plan.handle().lock() {
            Ok(calls) => calls.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

unsafe fn record(plan: &Plan<Recording>, src: &[RawBuffer], _dst: &[RawBuffer], params: &ExecutionParameters) -> Result<()> {
    let mut calls = plan
        .handle()
        .lock()
        .map_err(|_| FftError::Engine("call log poisoned".into()))?;
    calls.push(Call {
        mode: params.mode(),
        targets: src.len(),
        stream: params.stream(),
        workspaces: params.workspaces().len(),
    });
    Ok(())
}

unsafe impl PlanNewImpl<Recording> for Recording {
    fn plan_check_impl(_ctx: &Context, _desc: &Desc) -> Result<()> {
        Ok(())
    }

    fn plan_handle_impl(_ctx: &Context, _desc: &Desc) -> Result<Mutex<Vec<Call>>> {
        Ok(Mutex::new(Vec::new()))
    }
}

unsafe impl PlanCapabilitiesImpl<Recording> for Recording {
    fn plan_capabilities_impl(_desc: &Desc) -> Capabilities<Recording> {
        Capabilities::new()
            .with(ExecutionMode::CpuSpst, record)
            .with(ExecutionMode::GpuSpst, record)
            .with(ExecutionMode::GpuSpmt, record)
            .with(ExecutionMode::GpuMpst, record)
    }
}

unsafe impl PlanWorkspaceSizeImpl<Recording> for Recording {
    fn plan_workspace_size_impl(plan: &Plan<Recording>) -> Vec<usize> {
        vec![0; plan.desc().target_count()]
    }
}

/// Engine whose plans cannot be built, for backend selection tests.
pub struct Refusing;

impl Backend for Refusing {
    type Handle = ();

    const ID: BackendId = BackendId::Clfft;
}

unsafe impl PlanNewImpl<Refusing> for Refusing {
    fn plan_check_impl(_ctx: &Context, _desc: &Desc) -> Result<()> {
        Err(FftError::unsupported("refusing engine never builds plans"))
    }

    fn plan_handle_impl(_ctx: &Context, _desc: &Desc) -> Result<()> {
        Ok(())
    }
}

unsafe impl PlanCapabilitiesImpl<Refusing> for Refusing {
    fn plan_capabilities_impl(_desc: &Desc) -> Capabilities<Refusing> {
        Capabilities::new()
    }
}

unsafe impl PlanWorkspaceSizeImpl<Refusing> for Refusing {
    fn plan_workspace_size_impl(_plan: &Plan<Refusing>) -> Vec<usize> {
        Vec::new()
    }
}
