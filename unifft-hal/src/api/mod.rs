//! Safe, user-facing trait definitions.
//!
//! - **plan** -- plan construction, read accessors and workspace queries.
//! - **execute** -- the canonical untyped call and the typed adapters layered on it.
//!
//! Callers program against these traits; engines plug in through the
//! [`oep`](crate::oep) extension points.

mod execute;
mod plan;

pub use execute::*;
pub use plan::*;
