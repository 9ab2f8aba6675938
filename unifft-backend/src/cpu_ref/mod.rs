//! Direct-sum engine built on the HAL's reference kernels.
//!
//! Every transform kind, format and stride layout the descriptors can express
//! on one CPU target is supported, in `f32` and `f64`. Data is gathered into
//! dense aligned working arrays, transformed, scaled and scattered back, so
//! in-place plans need no special handling.

mod execute;
mod plan;


pub use plan::FftRefHandle;

pub struct FftRef {}
