use std::fmt::{Display, Formatter};

use crate::error::{FftError, Result};

/// Largest rank a shape or an axis list may have.
pub const MAX_DIM_COUNT: usize = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Forward,
    Inverse,
}

/// Scaling applied to the transform output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Normalization {
    #[default]
    None,
    /// `1/sqrt(n)`
    Orthogonal,
    /// `1/n`
    Unitary,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Placement {
    InPlace,
    #[default]
    OutOfPlace,
}

impl Display for Placement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Placement::InPlace => write!(f, "in-place"),
            Placement::OutOfPlace => write!(f, "out-of-place"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    Cpu,
    Gpu,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Distribution {
    /// Single process, single target.
    #[default]
    Spst,
    /// Single process, multiple targets (several devices).
    Spmt,
    /// Multiple processes, one target each.
    Mpst,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WorkspacePolicy {
    #[default]
    Performance,
    Minimal,
    User,
}

/// The five execution entry points a plan can be routed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExecutionMode {
    CpuSpst,
    CpuMpst,
    GpuSpst,
    GpuSpmt,
    GpuMpst,
}

impl ExecutionMode {
    pub const ALL: [ExecutionMode; 5] = [
        ExecutionMode::CpuSpst,
        ExecutionMode::CpuMpst,
        ExecutionMode::GpuSpst,
        ExecutionMode::GpuSpmt,
        ExecutionMode::GpuMpst,
    ];

    /// Fails for the one pair without an entry point, cpu with several targets.
    pub fn new(target: Target, distribution: Distribution) -> Result<Self> {
        match (target, distribution) {
            (Target::Cpu, Distribution::Spst) => Ok(ExecutionMode::CpuSpst),
            (Target::Cpu, Distribution::Mpst) => Ok(ExecutionMode::CpuMpst),
            (Target::Cpu, Distribution::Spmt) => Err(FftError::unsupported(
                "cpu target does not support the single-process multi-target distribution",
            )),
            (Target::Gpu, Distribution::Spst) => Ok(ExecutionMode::GpuSpst),
            (Target::Gpu, Distribution::Spmt) => Ok(ExecutionMode::GpuSpmt),
            (Target::Gpu, Distribution::Mpst) => Ok(ExecutionMode::GpuMpst),
        }
    }

    pub fn target(self) -> Target {
        match self {
            ExecutionMode::CpuSpst | ExecutionMode::CpuMpst => Target::Cpu,
            ExecutionMode::GpuSpst | ExecutionMode::GpuSpmt | ExecutionMode::GpuMpst => Target::Gpu,
        }
    }

    pub fn distribution(self) -> Distribution {
        match self {
            ExecutionMode::CpuSpst | ExecutionMode::GpuSpst => Distribution::Spst,
            ExecutionMode::GpuSpmt => Distribution::Spmt,
            ExecutionMode::CpuMpst | ExecutionMode::GpuMpst => Distribution::Mpst,
        }
    }
}

impl Display for ExecutionMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s: &str = match self {
            ExecutionMode::CpuSpst => "cpu-spst",
            ExecutionMode::CpuMpst => "cpu-mpst",
            ExecutionMode::GpuSpst => "gpu-spst",
            ExecutionMode::GpuSpmt => "gpu-spmt",
            ExecutionMode::GpuMpst => "gpu-mpst",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::{Distribution, ExecutionMode, Target};

    #[test]
    fn execution_mode_pairs() {
        for mode in ExecutionMode::ALL {
            assert_eq!(ExecutionMode::new(mode.target(), mode.distribution()).unwrap(), mode);
        }
        assert!(ExecutionMode::new(Target::Cpu, Distribution::Spmt).is_err());
    }
}
