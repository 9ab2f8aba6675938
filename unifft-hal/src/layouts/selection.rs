use std::{
    fmt::{Display, Formatter},
    ops::{BitAnd, BitOr, Not},
};

use crate::common::ExecutionMode;

/// Identity of an FFT engine adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum BackendId {
    /// Direct-sum pure-Rust engine.
    Reference,
    /// `rustfft` adapter.
    RustFft,
    Fftw3,
    Mkl,
    Cufft,
    Hipfft,
    Rocfft,
    Vkfft,
    Clfft,
}

impl BackendId {
    pub const ALL: [BackendId; 9] = [
        BackendId::Reference,
        BackendId::RustFft,
        BackendId::Fftw3,
        BackendId::Mkl,
        BackendId::Cufft,
        BackendId::Hipfft,
        BackendId::Rocfft,
        BackendId::Vkfft,
        BackendId::Clfft,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BackendId::Reference => "reference",
            BackendId::RustFft => "rustfft",
            BackendId::Fftw3 => "fftw3",
            BackendId::Mkl => "mkl",
            BackendId::Cufft => "cufft",
            BackendId::Hipfft => "hipfft",
            BackendId::Rocfft => "rocfft",
            BackendId::Vkfft => "vkfft",
            BackendId::Clfft => "clfft",
        }
    }
}

impl Display for BackendId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Set of [`BackendId`]s.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BackendMask(u16);

impl BackendMask {
    pub const EMPTY: BackendMask = BackendMask(0);
    pub const ALL: BackendMask = BackendMask((1 << BackendId::ALL.len()) - 1);

    pub const fn contains(self, id: BackendId) -> bool {
        self.0 & (1 << id as u16) != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in [`BackendId`] declaration order.
    pub fn iter(self) -> impl Iterator<Item = BackendId> {
        BackendId::ALL.into_iter().filter(move |&id| self.contains(id))
    }
}

impl From<BackendId> for BackendMask {
    fn from(id: BackendId) -> Self {
        BackendMask(1 << id as u16)
    }
}

impl<T: Into<BackendMask>> BitOr<T> for BackendMask {
    type Output = BackendMask;

    fn bitor(self, rhs: T) -> BackendMask {
        BackendMask(self.0 | rhs.into().0)
    }
}

impl BitOr<BackendId> for BackendId {
    type Output = BackendMask;

    fn bitor(self, rhs: BackendId) -> BackendMask {
        BackendMask::from(self) | rhs
    }
}

impl<T: Into<BackendMask>> BitAnd<T> for BackendMask {
    type Output = BackendMask;

    fn bitand(self, rhs: T) -> BackendMask {
        BackendMask(self.0 & rhs.into().0)
    }
}

impl Not for BackendMask {
    type Output = BackendMask;

    fn not(self) -> BackendMask {
        BackendMask(!self.0 & BackendMask::ALL.0)
    }
}

impl FromIterator<BackendId> for BackendMask {
    fn from_iter<I: IntoIterator<Item = BackendId>>(iter: I) -> Self {
        iter.into_iter().fold(BackendMask::EMPTY, |mask, id| mask | id)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectStrategy {
    /// First backend, in order, that manages to build the plan.
    #[default]
    First,
    /// Fastest backend; no backend is able to rank itself yet.
    Best,
}

/// Which engines may build a plan, and in what order they are tried.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BackendParameters {
    pub strategy: SelectStrategy,
    pub mask: BackendMask,
    pub order: Vec<BackendId>,
}

impl BackendParameters {
    /// Preferred order for each execution mode.
    pub fn default_for(mode: ExecutionMode) -> Self {
        let order: Vec<BackendId> = match mode {
            ExecutionMode::CpuSpst => vec![BackendId::Mkl, BackendId::Fftw3, BackendId::RustFft, BackendId::Reference],
            ExecutionMode::CpuMpst => vec![BackendId::Mkl, BackendId::Fftw3],
            ExecutionMode::GpuSpst => vec![
                BackendId::Cufft,
                BackendId::Vkfft,
                BackendId::Rocfft,
                BackendId::Hipfft,
                BackendId::Clfft,
            ],
            ExecutionMode::GpuSpmt => vec![BackendId::Cufft, BackendId::Rocfft, BackendId::Hipfft],
            ExecutionMode::GpuMpst => vec![BackendId::Cufft],
        };
        Self {
            strategy: SelectStrategy::First,
            mask: order.iter().copied().collect(),
            order,
        }
    }

    pub fn only(id: BackendId) -> Self {
        Self {
            strategy: SelectStrategy::First,
            mask: id.into(),
            order: vec![id],
        }
    }

    /// Ordered candidates: `order` filtered by `mask`, then the rest of `mask`.
    pub fn candidates(&self) -> Vec<BackendId> {
        let mut remaining: BackendMask = self.mask;
        let mut out: Vec<BackendId> = Vec::new();
        for &id in &self.order {
            if remaining.contains(id) {
                out.push(id);
            }
            remaining = remaining & !BackendMask::from(id);
        }
        out.extend(remaining.iter());
        out
    }
}

/// Outcome of one backend's attempt at building a plan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feedback {
    pub backend: BackendId,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::{BackendId, BackendMask, BackendParameters};

    #[test]
    fn mask_operations() {
        let mask: BackendMask = BackendId::Reference | BackendId::Cufft;
        assert!(mask.contains(BackendId::Cufft));
        assert!(!mask.contains(BackendId::RustFft));
        assert!((!mask).contains(BackendId::RustFft));
        assert!((mask & BackendId::Mkl).is_empty());
        assert_eq!(mask.iter().collect::<Vec<_>>(), vec![BackendId::Reference, BackendId::Cufft]);
        assert_eq!(!BackendMask::ALL, BackendMask::EMPTY);
    }

    #[test]
    fn candidates_follow_order_then_mask() {
        let params: BackendParameters = BackendParameters {
            strategy: Default::default(),
            mask: BackendId::Reference | BackendId::RustFft | BackendId::Vkfft,
            order: vec![BackendId::Vkfft, BackendId::Mkl, BackendId::Vkfft],
        };
        assert_eq!(
            params.candidates(),
            vec![BackendId::Vkfft, BackendId::Reference, BackendId::RustFft]
        );
    }
}
