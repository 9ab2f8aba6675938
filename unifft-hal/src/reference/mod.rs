//! Pure-Rust reference transforms over dense row-major working arrays.
//!
//! Direct sums, O(n^2) per line: slow but exact enough to serve as the
//! correctness oracle of the [`crate::test_suite`] and as the kernels of the
//! reference engine. Complex data is kept as split real/imaginary arrays.

pub mod dft;
pub mod dht;
pub mod dtt;
pub mod strided;
