use std::{fmt::Debug, num::NonZeroUsize, sync::Arc};

use tracing::debug;

/// Device ordinal as understood by the GPU runtime.
pub type DeviceId = i32;

/// The active GPU runtime, as far as descriptor validation needs it.
pub trait GpuRuntime: Send + Sync + Debug {
    fn name(&self) -> &str;

    fn device_count(&self) -> usize;

    fn current_device(&self) -> DeviceId {
        0
    }

    fn is_valid_device(&self, device: DeviceId) -> bool {
        device >= 0 && (device as usize) < self.device_count()
    }
}

/// An already-initialized process group (e.g. a message-passing communicator).
pub trait ProcessGroup: Send + Sync + Debug {
    fn rank(&self) -> usize;

    fn size(&self) -> usize;
}

/// Explicit initialization handle.
///
/// Holds the collaborators every descriptor and plan is validated against.
/// Create one before building plans and keep it alive while they are used;
/// nothing in this crate keeps global initialization state.
#[derive(Clone, Debug)]
pub struct Context {
    gpu: Option<Arc<dyn GpuRuntime>>,
    process_group: Option<Arc<dyn ProcessGroup>>,
    hardware_concurrency: usize,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// CPU-only context sized to the machine's available parallelism.
    pub fn new() -> Self {
        let hardware_concurrency: usize = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        debug!(hardware_concurrency, "context initialized");
        Self {
            gpu: None,
            process_group: None,
            hardware_concurrency,
        }
    }

    pub fn with_gpu(mut self, runtime: Arc<dyn GpuRuntime>) -> Self {
        debug!(runtime = runtime.name(), devices = runtime.device_count(), "gpu runtime attached");
        self.gpu = Some(runtime);
        self
    }

    pub fn with_process_group(mut self, group: Arc<dyn ProcessGroup>) -> Self {
        debug!(rank = group.rank(), size = group.size(), "process group attached");
        self.process_group = Some(group);
        self
    }

    /// Overrides the detected thread count; zero is raised to one.
    pub fn with_hardware_concurrency(mut self, threads: usize) -> Self {
        self.hardware_concurrency = threads.max(1);
        self
    }

    pub fn gpu(&self) -> Option<&Arc<dyn GpuRuntime>> {
        self.gpu.as_ref()
    }

    pub fn process_group(&self) -> Option<&Arc<dyn ProcessGroup>> {
        self.process_group.as_ref()
    }

    pub fn hardware_concurrency(&self) -> usize {
        self.hardware_concurrency
    }
}
