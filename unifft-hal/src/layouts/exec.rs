use crate::{
    common::ExecutionMode,
    error::{FftError, Result},
};

/// Opaque stream or queue handle of the GPU runtime. `0` is the default stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StreamHandle(pub usize);

/// Per-call parameters, one variant per execution mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExecutionParameters {
    CpuSpst,
    CpuMpst,
    GpuSpst {
        stream: StreamHandle,
        workspace: Option<*mut u8>,
    },
    /// One workspace per device, in the plan's device order.
    GpuSpmt {
        stream: StreamHandle,
        workspaces: Vec<*mut u8>,
    },
    GpuMpst {
        stream: StreamHandle,
        workspace: Option<*mut u8>,
    },
}

impl ExecutionParameters {
    pub fn default_for(mode: ExecutionMode) -> Self {
        match mode {
            ExecutionMode::CpuSpst => ExecutionParameters::CpuSpst,
            ExecutionMode::CpuMpst => ExecutionParameters::CpuMpst,
            ExecutionMode::GpuSpst => ExecutionParameters::GpuSpst {
                stream: StreamHandle::default(),
                workspace: None,
            },
            ExecutionMode::GpuSpmt => ExecutionParameters::GpuSpmt {
                stream: StreamHandle::default(),
                workspaces: Vec::new(),
            },
            ExecutionMode::GpuMpst => ExecutionParameters::GpuMpst {
                stream: StreamHandle::default(),
                workspace: None,
            },
        }
    }

    pub fn mode(&self) -> ExecutionMode {
        match self {
            ExecutionParameters::CpuSpst => ExecutionMode::CpuSpst,
            ExecutionParameters::CpuMpst => ExecutionMode::CpuMpst,
            ExecutionParameters::GpuSpst { .. } => ExecutionMode::GpuSpst,
            ExecutionParameters::GpuSpmt { .. } => ExecutionMode::GpuSpmt,
            ExecutionParameters::GpuMpst { .. } => ExecutionMode::GpuMpst,
        }
    }

    pub fn stream(&self) -> Option<StreamHandle> {
        match self {
            ExecutionParameters::CpuSpst | ExecutionParameters::CpuMpst => None,
            ExecutionParameters::GpuSpst { stream, .. }
            | ExecutionParameters::GpuSpmt { stream, .. }
            | ExecutionParameters::GpuMpst { stream, .. } => Some(*stream),
        }
    }

    /// Workspace pointers carried by these parameters, null ones included.
    pub fn workspaces(&self) -> Vec<*mut u8> {
        match self {
            ExecutionParameters::CpuSpst | ExecutionParameters::CpuMpst => Vec::new(),
            ExecutionParameters::GpuSpst { workspace, .. } | ExecutionParameters::GpuMpst { workspace, .. } => {
                workspace.iter().copied().collect()
            }
            ExecutionParameters::GpuSpmt { workspaces, .. } => workspaces.clone(),
        }
    }

    /// Fails with [`FftError::MissingWorkspace`] unless one non-null
    /// workspace per target is present.
    pub(crate) fn check_workspaces(&self, target_count: usize) -> Result<()> {
        let workspaces: Vec<*mut u8> = self.workspaces();
        let expected: usize = match self {
            ExecutionParameters::GpuSpmt { .. } => target_count,
            _ => 1,
        };
        if workspaces.len() != expected || workspaces.iter().any(|p| p.is_null()) {
            return Err(FftError::MissingWorkspace);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ExecutionParameters, StreamHandle};
    use crate::{common::ExecutionMode, error::FftError};

    #[test]
    fn defaults_match_their_mode() {
        for mode in ExecutionMode::ALL {
            assert_eq!(ExecutionParameters::default_for(mode).mode(), mode);
        }
        assert_eq!(ExecutionParameters::CpuSpst.stream(), None);
    }

    #[test]
    fn workspace_presence() {
        let mut scratch: Vec<u8> = vec![0u8; 64];
        let ws: *mut u8 = scratch.as_mut_ptr();

        assert_eq!(
            ExecutionParameters::default_for(ExecutionMode::GpuSpst).check_workspaces(1),
            Err(FftError::MissingWorkspace)
        );
        let single: ExecutionParameters = ExecutionParameters::GpuSpst {
            stream: StreamHandle(3),
            workspace: Some(ws),
        };
        assert!(single.check_workspaces(1).is_ok());

        let multi: ExecutionParameters = ExecutionParameters::GpuSpmt {
            stream: StreamHandle::default(),
            workspaces: vec![ws, std::ptr::null_mut()],
        };
        assert_eq!(multi.check_workspaces(2), Err(FftError::MissingWorkspace));
        let multi: ExecutionParameters = ExecutionParameters::GpuSpmt {
            stream: StreamHandle::default(),
            workspaces: vec![ws, ws],
        };
        assert!(multi.check_workspaces(2).is_ok());
        assert_eq!(multi.check_workspaces(3), Err(FftError::MissingWorkspace));
    }
}
