use std::fmt::{Debug, Display, Formatter};

use num_complex::Complex;
use num_traits::{Float, FloatConst};
use rug::Float as BigFloat;

use crate::error::FftError;

/// Floating-point formats a transform may be described in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Precision {
    /// Brain floating point, 8-bit significand.
    Bf16,
    /// IEEE 754 binary16.
    F16,
    /// IEEE 754 binary32.
    F32,
    /// IEEE 754 binary64.
    F64,
    /// Double-double, two binary64 values.
    F64F64,
    /// x87 80-bit extended, stored in 16 bytes.
    F80,
    /// IEEE 754 binary128.
    F128,
}

impl Precision {
    pub const ALL: [Precision; 7] = [
        Precision::Bf16,
        Precision::F16,
        Precision::F32,
        Precision::F64,
        Precision::F64F64,
        Precision::F80,
        Precision::F128,
    ];

    /// Storage size of one real value in bytes.
    pub const fn size_of(self) -> usize {
        match self {
            Precision::Bf16 | Precision::F16 => 2,
            Precision::F32 => 4,
            Precision::F64 => 8,
            Precision::F64F64 | Precision::F80 | Precision::F128 => 16,
        }
    }

    /// Significand width in bits, including the implicit leading bit.
    pub const fn mantissa_bits(self) -> u32 {
        match self {
            Precision::Bf16 => 8,
            Precision::F16 => 11,
            Precision::F32 => 24,
            Precision::F64 => 53,
            Precision::F64F64 => 106,
            Precision::F80 => 64,
            Precision::F128 => 113,
        }
    }
}

impl TryFrom<u8> for Precision {
    type Error = FftError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Precision::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| FftError::invalid(format!("unknown precision tag {value}")))
    }
}

impl Display for Precision {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s: &str = match self {
            Precision::Bf16 => "bf16",
            Precision::F16 => "f16",
            Precision::F32 => "f32",
            Precision::F64 => "f64",
            Precision::F64F64 => "f64f64",
            Precision::F80 => "f80",
            Precision::F128 => "f128",
        };
        write!(f, "{s}")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Complexity {
    Real,
    Complex,
}

impl Display for Complexity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Complexity::Real => write!(f, "real"),
            Complexity::Complex => write!(f, "complex"),
        }
    }
}

/// Static element description checked by typed `execute` calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    pub precision: Precision,
    pub complexity: Complexity,
}

impl TypeInfo {
    pub const fn new(precision: Precision, complexity: Complexity) -> Self {
        Self { precision, complexity }
    }
}

impl Display for TypeInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.complexity, self.precision)
    }
}

/// Element types whose precision and complexity are known at compile time.
///
/// # Safety
///
/// Implementors must be plain-old-data:
/// - the all-zero bit pattern is a valid value ([`crate::alloc_aligned`]
///   hands out zeroed buffers of `Self`);
/// - `Self` has the size and alignment of [`KnownType::PRECISION`] for real
///   elements, or of two such scalars laid out `[re, im]` for complex ones.
///   Engines reinterpret typed buffers through these two constants.
pub unsafe trait KnownType: Copy + Send + Sync + 'static {
    const PRECISION: Precision;
    const COMPLEXITY: Complexity;

    fn type_info() -> TypeInfo {
        TypeInfo::new(Self::PRECISION, Self::COMPLEXITY)
    }
}

unsafe impl KnownType for f32 {
    const PRECISION: Precision = Precision::F32;
    const COMPLEXITY: Complexity = Complexity::Real;
}

unsafe impl KnownType for f64 {
    const PRECISION: Precision = Precision::F64;
    const COMPLEXITY: Complexity = Complexity::Real;
}

unsafe impl KnownType for Complex<f32> {
    const PRECISION: Precision = Precision::F32;
    const COMPLEXITY: Complexity = Complexity::Complex;
}

unsafe impl KnownType for Complex<f64> {
    const PRECISION: Precision = Precision::F64;
    const COMPLEXITY: Complexity = Complexity::Complex;
}

/// Real scalar an in-process engine can compute with.
pub trait Scalar: Float + FloatConst + Debug + Default + KnownType {
    /// Rounds a multi-precision value to this format.
    fn from_big(x: &BigFloat) -> Self;

    fn from_len(x: usize) -> Self;
}

impl Scalar for f32 {
    fn from_big(x: &BigFloat) -> Self {
        x.to_f32()
    }

    fn from_len(x: usize) -> Self {
        x as f32
    }
}

impl Scalar for f64 {
    fn from_big(x: &BigFloat) -> Self {
        x.to_f64()
    }

    fn from_len(x: usize) -> Self {
        x as f64
    }
}
