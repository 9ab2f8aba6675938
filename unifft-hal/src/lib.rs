//! # unifft-hal
//!
//! A trait-based abstraction layer for multidimensional discrete Fourier,
//! Hartley and trigonometric transforms, independent of the engine that
//! computes them.
//!
//! Callers describe a transform once ([`layouts::TransformParameters`]) and
//! where it runs ([`layouts::TargetParameters`]). Validation turns both into an
//! immutable [`layouts::Desc`], from which an engine builds a
//! [`layouts::Plan`]. Executing a plan validates the supplied buffers against
//! the descriptor before any engine code runs, so every engine observes the
//! same call contract.
//!
//! ## Core Concepts
//!
//! **Descriptor:** shape, transformed axes, precision, normalization,
//! placement, strides, target and distribution. Two descriptors built from the
//! same parameters compare equal and hash identically.
//!
//! **Execution mode:** the pair (target, distribution) selects one of five
//! entry points: cpu-spst, cpu-mpst, gpu-spst, gpu-spmt and gpu-mpst. An
//! engine declares which of them it implements through
//! [`layouts::Capabilities`].
//!
//! **Layout types** ([`layouts`]):
//! - [`layouts::TransformDesc`] -- what is transformed (DFT formats, DHT, DTT kinds).
//! - [`layouts::DimensionsDesc`] -- shape and element strides of both sides.
//! - [`layouts::TargetDesc`] -- validated CPU or GPU environment.
//! - [`layouts::BufferList`], [`layouts::RawBuffer`] -- per-call buffer views.
//! - [`layouts::ExecutionParameters`] -- per-call stream and workspace arguments.
//! - [`layouts::AlignedBuf`] -- zero-initialized aligned host memory.
//!
//! ## Architecture
//!
//! 1. **[`api`]** -- Safe, user-facing traits ([`api::PlanNew`], [`api::PlanExecute`]).
//! 2. **[`oep`]** -- Unsafe extension-point traits engine crates implement
//!    ([`oep::PlanNewImpl`], [`oep::PlanCapabilitiesImpl`]).
//! 3. **[`delegates`]** -- Blanket `impl` glue from [`api`] to [`oep`] on
//!    [`layouts::Plan`], routed through [`dispatch`].
//! 4. **[`mod@reference`]** -- Direct-sum transforms used as a correctness oracle.
//!
//! ## Testing and Benchmarking
//!
//! The [`test_suite`] module provides engine-generic test functions, which
//! engine crates instantiate with [`backend_test_suite!`]. The [`bench_suite`]
//! module provides the matching Criterion harnesses.
//!
//! ## Safety Contract
//!
//! All [`oep`] traits are `unsafe` to implement. Implementors must uphold the
//! contract documented in [`doc::backend_safety`].

#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

/// Safe, user-facing traits for building and executing plans.
pub mod api;

/// Criterion-based benchmark harnesses, generic over any engine.
pub mod bench_suite;

/// Small enums shared by descriptors and execution.
pub mod common;

/// Blanket implementations connecting [`api`] traits to [`oep`] traits on
/// [`layouts::Plan`].
pub mod delegates;

/// Call-time validation and routing.
pub mod dispatch;

pub mod error;

/// Descriptors, plans, buffer views and execution parameters.
pub mod layouts;

/// Open Extension Points: `unsafe` traits that engine crates implement.
///
/// See [`doc::backend_safety`] for the safety contract.
pub mod oep;

/// Direct-sum DFT, DHT and DTT used as a correctness oracle.
pub mod reference;

/// Engine-generic test functions, instantiated via [`backend_test_suite!`].
pub mod test_suite;

/// Element precisions and complexities.
pub mod types;

#[cfg(test)]
mod tests;

/// Embedded safety contract documentation for engine implementors.
pub mod doc {
    /// Safety contract that all [`crate::oep`] trait implementations must uphold.
    #[doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/docs/backend_safety_contract.md"))]
    pub mod backend_safety {
        pub const _PLACEHOLDER: () = ();
    }
}

use layouts::AlignedBuf;
use types::KnownType;

/// Default memory alignment in bytes for host buffers.
///
/// Matches the cache-line size of modern x86 processors and the alignment
/// AVX-512 loads prefer.
pub const DEFAULTALIGN: usize = 64;

fn is_aligned_custom<T>(ptr: *const T, align: usize) -> bool {
    (ptr as usize).is_multiple_of(align)
}

/// Returns `true` if `ptr` is aligned to [`DEFAULTALIGN`] bytes.
pub fn is_aligned<T>(ptr: *const T) -> bool {
    is_aligned_custom(ptr, DEFAULTALIGN)
}

/// # Panics
///
/// When the pointer does not satisfy the default alignment.
pub fn assert_alignment<T>(ptr: *const T) {
    assert!(
        is_aligned(ptr),
        "invalid alignment: ensure buffers have been allocated with [alloc_aligned]"
    )
}

/// Allocates `len` zeroed elements aligned to `align` bytes.
///
/// # Panics
///
/// If `align` is not a power of two or is smaller than the alignment of `T`.
pub fn alloc_aligned_custom<T: KnownType>(len: usize, align: usize) -> AlignedBuf<T> {
    let buf: AlignedBuf<T> = AlignedBuf::zeroed(len, align);
    debug_assert!(is_aligned_custom(buf.as_ptr(), align));
    buf
}

/// Allocates `len` zeroed elements aligned to [`DEFAULTALIGN`] bytes.
pub fn alloc_aligned<T: KnownType>(len: usize) -> AlignedBuf<T> {
    alloc_aligned_custom(len, DEFAULTALIGN)
}
