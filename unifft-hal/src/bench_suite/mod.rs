//! Criterion-based benchmark harnesses, generic over any engine.
//!
//! Engine crates call these functions to measure their plans over a range of
//! shapes.

pub mod dft;
pub mod trig;
