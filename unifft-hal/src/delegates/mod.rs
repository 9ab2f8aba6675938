//! Blanket implementations connecting [`crate::api`] traits to [`crate::oep`]
//! traits on [`crate::layouts::Plan`], and the typed adapters onto the
//! canonical call.

mod execute;
mod plan;
