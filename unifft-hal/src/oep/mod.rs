//! Open Extension Points (OEP) for engine crates.
//!
//! Each trait backs a safe trait in [`crate::api`] and carries an `Impl`
//! suffix (e.g. [`crate::api::PlanNew`] is backed by `PlanNewImpl`). All of them
//! are `unsafe` because implementations must uphold the engine safety contract.

mod plan;

pub use plan::*;
