pub mod cpu_ref;
pub mod cpu_rustfft;

mod host;

pub use cpu_ref::FftRef;
pub use cpu_rustfft::FftRustFft;
