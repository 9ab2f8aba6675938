//! Deterministic pseudorandom sources and test-signal generators.

pub mod signal;
pub mod source;

pub use signal::{FillSignal, Signal};
pub use source::Source;
