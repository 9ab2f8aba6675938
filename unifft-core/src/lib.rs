//! Plan construction on top of [`unifft_hal`].
//!
//! [`unifft_hal`] knows how to describe and validate a transform and how to
//! dispatch an execute call to one engine. This crate decides *which* engine:
//!
//! - a [`Registry`] maps each [`BackendId`](unifft_hal::layouts::BackendId) to
//!   a plan factory. [`Registry::default`] holds the in-process engines of
//!   [`unifft_backend`]; other engines register their own factories;
//! - [`make_plan`] builds the [`Desc`](unifft_hal::layouts::Desc), walks the
//!   candidate engines in the order the target's
//!   [`BackendParameters`](unifft_hal::layouts::BackendParameters) request and
//!   returns the first plan that gets built, as a backend-erased
//!   [`AnyPlan`](unifft_hal::api::AnyPlan). When every candidate refuses, the
//!   error carries one [`Feedback`](unifft_hal::layouts::Feedback) entry per
//!   attempt;
//! - a [`PlanCache`] keeps built plans keyed by their descriptor, with
//!   least-recently-used eviction.
//!
//! ```ignore
//! let ctx = Context::new();
//! let transform = TransformParameters::dft(&[64, 64], &[0, 1], DftType::R2C);
//! let plan = make_plan(&ctx, &transform, &TargetParameters::cpu())?;
//! plan.execute(&mut real[..], &mut spectrum[..])?;
//! ```

mod cache;
mod make_plan;
mod registry;

pub use cache::*;
pub use make_plan::*;
pub use registry::*;
