//! Engine backed by `rustfft` planners, one 1D plan per transformed axis.
//!
//! Computes interleaved c2c, r2c and c2r DFTs in `f32` and `f64` on one CPU
//! target. Multidimensional transforms run axis by axis over a dense working
//! copy; real transforms halve the last transform axis first (r2c) or expand
//! it last (c2r).

mod execute;
mod plan;


pub use plan::FftRustFftHandle;

pub struct FftRustFft {}
