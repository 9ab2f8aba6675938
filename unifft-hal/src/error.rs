use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::{
    common::{ExecutionMode, Placement},
    layouts::Feedback,
    types::TypeInfo,
};

/// Which side of a transform a buffer belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BufferSide {
    Source,
    Destination,
}

impl Display for BufferSide {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferSide::Source => write!(f, "source"),
            BufferSide::Destination => write!(f, "destination"),
        }
    }
}

/// Every failure surfaced by descriptor construction, plan creation and execution.
///
/// The variants fall in four groups:
/// - configuration errors, raised while building descriptors or plans;
/// - contract errors, raised by `execute` before any engine is invoked;
/// - [`FftError::BackendUnimplemented`], raised when the engine has no entry
///   point for the plan's (target, distribution) pair;
/// - [`FftError::Engine`], carrying an engine's own failure message verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FftError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid gpu device {0}")]
    InvalidDevice(i32),

    #[error("unsupported configuration: {0}")]
    UnsupportedConfiguration(String),

    #[error("source buffers are read-only but the plan does not preserve its source")]
    PreservationViolated,

    #[error("{side} buffer count {actual} does not match target count {expected}")]
    BufferCount {
        side: BufferSide,
        expected: usize,
        actual: usize,
    },

    #[error("buffers imply {inferred} placement but the plan declares {declared}")]
    PlacementMismatch { declared: Placement, inferred: Placement },

    #[error("{side} buffer holds {actual}, plan expects {expected}")]
    TypeMismatch {
        side: BufferSide,
        expected: TypeInfo,
        actual: TypeInfo,
    },

    #[error("{side} buffer {index} is null")]
    NullBuffer { side: BufferSide, index: usize },

    #[error("{side} buffer {index} {}", layout_message(.planar))]
    LayoutMismatch { side: BufferSide, index: usize, planar: bool },

    #[error("{side} buffer {index} holds {actual} bytes, layout needs {required}")]
    BufferTooSmall {
        side: BufferSide,
        index: usize,
        required: usize,
        actual: usize,
    },

    #[error("execution parameters are for {actual}, plan executes {expected}")]
    ExecutionParamsMismatch { expected: ExecutionMode, actual: ExecutionMode },

    #[error("plan uses an external workspace but none was supplied")]
    MissingWorkspace,

    #[error("backend does not implement {0} execution")]
    BackendUnimplemented(ExecutionMode),

    #[error("engine failure: {0}")]
    Engine(String),

    #[error("failed to create plan{}", format_feedback(.0))]
    PlanCreation(Vec<Feedback>),

    #[error("plan cache: {0}")]
    Cache(String),
}

fn layout_message(planar: &bool) -> &'static str {
    if *planar {
        "lacks the imaginary part a planar format needs"
    } else {
        "is planar but the format is not"
    }
}

fn format_feedback(feedback: &[Feedback]) -> String {
    feedback
        .iter()
        .map(|fb| format!("\n  {}: {}", fb.backend, fb.message))
        .collect()
}

impl FftError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        FftError::InvalidArgument(msg.into())
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        FftError::UnsupportedConfiguration(msg.into())
    }

    /// True for errors raised by `execute` before an engine is reached.
    pub fn is_contract_error(&self) -> bool {
        matches!(
            self,
            FftError::PreservationViolated
                | FftError::BufferCount { .. }
                | FftError::PlacementMismatch { .. }
                | FftError::TypeMismatch { .. }
                | FftError::NullBuffer { .. }
                | FftError::LayoutMismatch { .. }
                | FftError::BufferTooSmall { .. }
                | FftError::ExecutionParamsMismatch { .. }
                | FftError::MissingWorkspace
        )
    }
}

pub type Result<T> = std::result::Result<T, FftError>;
