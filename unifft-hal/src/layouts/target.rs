use crate::{
    DEFAULTALIGN,
    common::{Distribution, Target, WorkspacePolicy},
    error::{FftError, Result},
    layouts::{BackendParameters, Context, DeviceId},
};

/// Common CPU buffer alignments in bytes.
pub mod alignments {
    pub const SIMD128: usize = 16;
    pub const SIMD256: usize = 32;
    pub const SIMD512: usize = 64;
    pub const SSE: usize = SIMD128;
    pub const AVX: usize = SIMD256;
    pub const AVX2: usize = SIMD256;
    pub const AVX512: usize = SIMD512;
    pub const NEON: usize = SIMD128;
}

/// Requested thread limit meaning "every available thread".
pub const ALL_THREADS: usize = 0;

/// Most devices a single-process multi-target plan may span.
pub const MAX_DEVICES: usize = 16;

/// Caller-supplied strides; empty lists are derived.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct MemoryLayout {
    pub src_strides: Vec<usize>,
    pub dst_strides: Vec<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CpuParameters {
    pub distribution: Distribution,
    pub memory_layout: MemoryLayout,
    pub preserve_source: bool,
    pub alignment: usize,
    pub thread_limit: usize,
    pub backend: Option<BackendParameters>,
}

impl Default for CpuParameters {
    fn default() -> Self {
        Self {
            distribution: Distribution::Spst,
            memory_layout: MemoryLayout::default(),
            preserve_source: true,
            alignment: DEFAULTALIGN,
            thread_limit: ALL_THREADS,
            backend: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GpuParameters {
    pub distribution: Distribution,
    pub memory_layout: MemoryLayout,
    pub preserve_source: bool,
    /// Empty selects the runtime's current device.
    pub devices: Vec<DeviceId>,
    pub external_workspace: bool,
    pub workspace_policy: WorkspacePolicy,
    pub backend: Option<BackendParameters>,
}

impl Default for GpuParameters {
    fn default() -> Self {
        Self {
            distribution: Distribution::Spst,
            memory_layout: MemoryLayout::default(),
            preserve_source: true,
            devices: Vec::new(),
            external_workspace: false,
            workspace_policy: WorkspacePolicy::Performance,
            backend: None,
        }
    }
}

/// Where and how a plan executes, as the caller supplies it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TargetParameters {
    Cpu(CpuParameters),
    Gpu(GpuParameters),
}

impl Default for TargetParameters {
    fn default() -> Self {
        TargetParameters::Cpu(CpuParameters::default())
    }
}

impl TargetParameters {
    pub fn cpu() -> Self {
        TargetParameters::Cpu(CpuParameters::default())
    }

    pub fn gpu(devices: &[DeviceId]) -> Self {
        TargetParameters::Gpu(GpuParameters {
            devices: devices.to_vec(),
            ..Default::default()
        })
    }

    pub fn target(&self) -> Target {
        match self {
            TargetParameters::Cpu(_) => Target::Cpu,
            TargetParameters::Gpu(_) => Target::Gpu,
        }
    }

    pub fn distribution(&self) -> Distribution {
        match self {
            TargetParameters::Cpu(p) => p.distribution,
            TargetParameters::Gpu(p) => p.distribution,
        }
    }

    pub fn memory_layout(&self) -> &MemoryLayout {
        match self {
            TargetParameters::Cpu(p) => &p.memory_layout,
            TargetParameters::Gpu(p) => &p.memory_layout,
        }
    }

    pub fn preserve_source(&self) -> bool {
        match self {
            TargetParameters::Cpu(p) => p.preserve_source,
            TargetParameters::Gpu(p) => p.preserve_source,
        }
    }

    pub fn backend(&self) -> Option<&BackendParameters> {
        match self {
            TargetParameters::Cpu(p) => p.backend.as_ref(),
            TargetParameters::Gpu(p) => p.backend.as_ref(),
        }
    }

    pub fn distribution_as(mut self, distribution: Distribution) -> Self {
        match &mut self {
            TargetParameters::Cpu(p) => p.distribution = distribution,
            TargetParameters::Gpu(p) => p.distribution = distribution,
        }
        self
    }

    pub fn strides(mut self, src_strides: &[usize], dst_strides: &[usize]) -> Self {
        let layout: MemoryLayout = MemoryLayout {
            src_strides: src_strides.to_vec(),
            dst_strides: dst_strides.to_vec(),
        };
        match &mut self {
            TargetParameters::Cpu(p) => p.memory_layout = layout,
            TargetParameters::Gpu(p) => p.memory_layout = layout,
        }
        self
    }

    pub fn preserving_source(mut self, preserve: bool) -> Self {
        match &mut self {
            TargetParameters::Cpu(p) => p.preserve_source = preserve,
            TargetParameters::Gpu(p) => p.preserve_source = preserve,
        }
        self
    }

    pub fn with_backend(mut self, backend: BackendParameters) -> Self {
        match &mut self {
            TargetParameters::Cpu(p) => p.backend = Some(backend),
            TargetParameters::Gpu(p) => p.backend = Some(backend),
        }
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CpuDesc {
    pub alignment: usize,
    pub thread_limit: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GpuDesc {
    pub devices: Vec<DeviceId>,
    pub external_workspace: bool,
    pub workspace_policy: WorkspacePolicy,
}

/// Validated execution environment.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TargetDesc {
    Cpu(CpuDesc),
    Gpu(GpuDesc),
}

impl TargetDesc {
    pub fn new(ctx: &Context, params: &TargetParameters) -> Result<Self> {
        match params {
            TargetParameters::Cpu(p) => {
                if !p.alignment.is_power_of_two() {
                    return Err(FftError::invalid(format!("alignment {} is not a power of two", p.alignment)));
                }
                let available: usize = ctx.hardware_concurrency();
                let thread_limit: usize = match p.thread_limit {
                    ALL_THREADS => available,
                    requested => requested.min(available),
                };
                Ok(TargetDesc::Cpu(CpuDesc {
                    alignment: p.alignment,
                    thread_limit,
                }))
            }
            TargetParameters::Gpu(p) => {
                let runtime = ctx
                    .gpu()
                    .ok_or_else(|| FftError::unsupported("gpu target requested but the context has no gpu runtime"))?;

                let devices: Vec<DeviceId> = if p.devices.is_empty() {
                    vec![runtime.current_device()]
                } else {
                    p.devices.clone()
                };

                match p.distribution {
                    Distribution::Spmt => {
                        if devices.len() > MAX_DEVICES {
                            return Err(FftError::invalid(format!(
                                "{} devices exceed the limit of {MAX_DEVICES}",
                                devices.len()
                            )));
                        }
                    }
                    Distribution::Spst | Distribution::Mpst => {
                        if devices.len() != 1 {
                            return Err(FftError::invalid(format!(
                                "single-target gpu plan given {} devices",
                                devices.len()
                            )));
                        }
                    }
                }

                for (i, &device) in devices.iter().enumerate() {
                    if !runtime.is_valid_device(device) {
                        return Err(FftError::InvalidDevice(device));
                    }
                    if devices[..i].contains(&device) {
                        return Err(FftError::invalid(format!("device {device} listed twice")));
                    }
                }

                Ok(TargetDesc::Gpu(GpuDesc {
                    devices,
                    external_workspace: p.external_workspace,
                    workspace_policy: p.workspace_policy,
                }))
            }
        }
    }

    pub fn target(&self) -> Target {
        match self {
            TargetDesc::Cpu(_) => Target::Cpu,
            TargetDesc::Gpu(_) => Target::Gpu,
        }
    }

    pub fn cpu(&self) -> Option<&CpuDesc> {
        match self {
            TargetDesc::Cpu(d) => Some(d),
            TargetDesc::Gpu(_) => None,
        }
    }

    pub fn gpu(&self) -> Option<&GpuDesc> {
        match self {
            TargetDesc::Gpu(d) => Some(d),
            TargetDesc::Cpu(_) => None,
        }
    }

    pub fn external_workspace(&self) -> bool {
        self.gpu().is_some_and(|g| g.external_workspace)
    }
}
