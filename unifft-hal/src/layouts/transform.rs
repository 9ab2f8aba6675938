use rug::{Float, Integer};

use crate::{
    common::{Direction, Normalization, Placement},
    error::{FftError, Result},
    layouts::{DimensionsDesc, validate_axes},
    types::{Complexity, Precision, Scalar, TypeInfo},
};

use super::dimensions::LAYOUT_OVERFLOW;

/// Memory format of one side of a DFT.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DftFormat {
    Real,
    ComplexInterleaved,
    ComplexPlanar,
    /// Half spectrum, `e/2 + 1` values on the reduced axis.
    HermitianComplexInterleaved,
    HermitianComplexPlanar,
}

impl DftFormat {
    pub fn is_complex(self) -> bool {
        !matches!(self, DftFormat::Real)
    }

    pub fn is_hermitian(self) -> bool {
        matches!(self, DftFormat::HermitianComplexInterleaved | DftFormat::HermitianComplexPlanar)
    }

    pub fn is_planar(self) -> bool {
        matches!(self, DftFormat::ComplexPlanar | DftFormat::HermitianComplexPlanar)
    }

    pub fn is_interleaved(self) -> bool {
        matches!(self, DftFormat::ComplexInterleaved | DftFormat::HermitianComplexInterleaved)
    }

    pub fn complexity(self) -> Complexity {
        match self {
            DftFormat::Real => Complexity::Real,
            _ => Complexity::Complex,
        }
    }
}

/// Shorthand for the three common DFT format pairs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DftType {
    C2C,
    R2C,
    C2R,
}

impl DftType {
    pub fn formats(self) -> (DftFormat, DftFormat) {
        match self {
            DftType::C2C => (DftFormat::ComplexInterleaved, DftFormat::ComplexInterleaved),
            DftType::R2C => (DftFormat::Real, DftFormat::HermitianComplexInterleaved),
            DftType::C2R => (DftFormat::HermitianComplexInterleaved, DftFormat::Real),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DhtType {
    /// Hartley transform applied along each axis independently.
    #[default]
    Separable,
}

/// The eight discrete trigonometric transform kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DttType {
    Dct1,
    Dct2,
    Dct3,
    Dct4,
    Dst1,
    Dst2,
    Dst3,
    Dst4,
}

impl DttType {
    pub const ALL: [DttType; 8] = [
        DttType::Dct1,
        DttType::Dct2,
        DttType::Dct3,
        DttType::Dct4,
        DttType::Dst1,
        DttType::Dst2,
        DttType::Dst3,
        DttType::Dst4,
    ];

    /// Kind computed by an inverse-direction plan declared with `self`.
    pub fn inverse(self) -> DttType {
        match self {
            DttType::Dct2 => DttType::Dct3,
            DttType::Dct3 => DttType::Dct2,
            DttType::Dst2 => DttType::Dst3,
            DttType::Dst3 => DttType::Dst2,
            other => other,
        }
    }

    /// Logical length of the axis when the transform is seen as a DFT.
    pub fn logical_extent(self, extent: usize) -> usize {
        match self {
            DttType::Dct1 => 2 * (extent - 1),
            DttType::Dst1 => 2 * (extent + 1),
            _ => 2 * extent,
        }
    }
}

impl TryFrom<u8> for DttType {
    type Error = FftError;

    fn try_from(value: u8) -> Result<Self> {
        DttType::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| FftError::invalid(format!("unknown trigonometric transform type {value}")))
    }
}

/// Precision of the computation and of both buffers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PrecisionTriad {
    pub execution: Precision,
    pub source: Precision,
    pub destination: Precision,
}

impl PrecisionTriad {
    pub const fn uniform(precision: Precision) -> Self {
        Self {
            execution: precision,
            source: precision,
            destination: precision,
        }
    }
}

impl Default for PrecisionTriad {
    fn default() -> Self {
        Self::uniform(Precision::F64)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransformKind {
    Dft,
    Dht,
    Dtt,
}

/// Variant-specific part of a validated transform.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TransformVariant {
    Dft { src_format: DftFormat, dst_format: DftFormat },
    Dht { ty: DhtType },
    /// One type per transform axis, broadcast already applied.
    Dtt { types: Vec<DttType> },
}

impl TransformVariant {
    pub fn kind(&self) -> TransformKind {
        match self {
            TransformVariant::Dft { .. } => TransformKind::Dft,
            TransformVariant::Dht { .. } => TransformKind::Dht,
            TransformVariant::Dtt { .. } => TransformKind::Dtt,
        }
    }
}

/// Variant parameters as the caller supplies them.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TransformKindParameters {
    Dft { src_format: DftFormat, dst_format: DftFormat },
    Dht { ty: DhtType },
    /// Either a single type for every axis or one per axis.
    Dtt { types: Vec<DttType> },
}

/// User-facing description of a transform, validated by [`TransformDesc::new`]
/// and [`crate::layouts::Desc::new`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransformParameters {
    pub direction: Direction,
    pub precision: PrecisionTriad,
    pub shape: Vec<usize>,
    pub axes: Vec<usize>,
    pub normalization: Normalization,
    pub placement: Placement,
    pub kind: TransformKindParameters,
}

impl TransformParameters {
    fn with_kind(shape: &[usize], axes: &[usize], kind: TransformKindParameters) -> Self {
        Self {
            direction: Direction::Forward,
            precision: PrecisionTriad::default(),
            shape: shape.to_vec(),
            axes: axes.to_vec(),
            normalization: Normalization::None,
            placement: Placement::OutOfPlace,
            kind,
        }
    }

    pub fn dft(shape: &[usize], axes: &[usize], ty: DftType) -> Self {
        let (src_format, dst_format) = ty.formats();
        Self::dft_formats(shape, axes, src_format, dst_format)
    }

    pub fn dft_formats(shape: &[usize], axes: &[usize], src_format: DftFormat, dst_format: DftFormat) -> Self {
        Self::with_kind(shape, axes, TransformKindParameters::Dft { src_format, dst_format })
    }

    pub fn dht(shape: &[usize], axes: &[usize]) -> Self {
        Self::with_kind(shape, axes, TransformKindParameters::Dht { ty: DhtType::Separable })
    }

    pub fn dtt(shape: &[usize], axes: &[usize], types: &[DttType]) -> Self {
        Self::with_kind(shape, axes, TransformKindParameters::Dtt { types: types.to_vec() })
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn precision(mut self, precision: PrecisionTriad) -> Self {
        self.precision = precision;
        self
    }

    pub fn normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }
}

/// Validated, immutable description of what is transformed and how.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransformDesc {
    direction: Direction,
    precision: PrecisionTriad,
    axes: Vec<usize>,
    normalization: Normalization,
    variant: TransformVariant,
}

impl TransformDesc {
    pub fn new(params: &TransformParameters) -> Result<Self> {
        validate_axes(&params.axes, params.shape.len())?;

        let variant: TransformVariant = match &params.kind {
            TransformKindParameters::Dft { src_format, dst_format } => {
                if !src_format.is_complex() && !dst_format.is_complex() {
                    return Err(FftError::invalid("a real source requires a complex destination format"));
                }
                TransformVariant::Dft {
                    src_format: *src_format,
                    dst_format: *dst_format,
                }
            }
            TransformKindParameters::Dht { ty } => TransformVariant::Dht { ty: *ty },
            TransformKindParameters::Dtt { types } => {
                let types: Vec<DttType> = match types.len() {
                    1 => vec![types[0]; params.axes.len()],
                    n if n == params.axes.len() => types.clone(),
                    n => {
                        return Err(FftError::invalid(format!(
                            "{n} trigonometric types given for {} axes",
                            params.axes.len()
                        )));
                    }
                };
                for (&axis, ty) in params.axes.iter().zip(types.iter()) {
                    if *ty == DttType::Dct1 && params.shape[axis] < 2 {
                        return Err(FftError::invalid(format!("dct1 along axis {axis} needs an extent of at least 2")));
                    }
                }
                TransformVariant::Dtt { types }
            }
        };

        Ok(Self {
            direction: params.direction,
            precision: params.precision,
            axes: params.axes.clone(),
            normalization: params.normalization,
            variant,
        })
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn precision(&self) -> PrecisionTriad {
        self.precision
    }

    pub fn rank(&self) -> usize {
        self.axes.len()
    }

    pub fn axes(&self) -> &[usize] {
        &self.axes
    }

    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    pub fn variant(&self) -> &TransformVariant {
        &self.variant
    }

    pub fn kind(&self) -> TransformKind {
        self.variant.kind()
    }

    /// Axis along which a real-to-complex transform halves the spectrum.
    pub fn reduced_axis(&self) -> usize {
        self.axes[self.axes.len() - 1]
    }

    pub fn src_format(&self) -> Option<DftFormat> {
        match self.variant {
            TransformVariant::Dft { src_format, .. } => Some(src_format),
            _ => None,
        }
    }

    pub fn dst_format(&self) -> Option<DftFormat> {
        match self.variant {
            TransformVariant::Dft { dst_format, .. } => Some(dst_format),
            _ => None,
        }
    }

    pub fn src_complexity(&self) -> Complexity {
        self.src_format().map_or(Complexity::Real, DftFormat::complexity)
    }

    pub fn dst_complexity(&self) -> Complexity {
        self.dst_format().map_or(Complexity::Real, DftFormat::complexity)
    }

    pub fn src_type(&self) -> TypeInfo {
        TypeInfo::new(self.precision.source, self.src_complexity())
    }

    pub fn dst_type(&self) -> TypeInfo {
        TypeInfo::new(self.precision.destination, self.dst_complexity())
    }

    /// Bytes between two consecutive source elements of unit stride.
    pub fn src_elem_size(&self) -> usize {
        elem_size(self.precision.source, self.src_format())
    }

    pub fn dst_elem_size(&self) -> usize {
        elem_size(self.precision.destination, self.dst_format())
    }

    /// Product over the transform axes of each axis' logical length.
    pub fn logical_size(&self, shape: &[usize]) -> Integer {
        match &self.variant {
            TransformVariant::Dft { .. } | TransformVariant::Dht { .. } => {
                self.axes.iter().map(|&axis| Integer::from(shape[axis])).product()
            }
            TransformVariant::Dtt { types } => self
                .axes
                .iter()
                .zip(types.iter())
                .map(|(&axis, ty)| Integer::from(ty.logical_extent(shape[axis])))
                .product(),
        }
    }

    /// Output scaling, rounded to the execution precision.
    pub fn norm_factor(&self, shape: &[usize]) -> Float {
        let prec: u32 = self.precision.execution.mantissa_bits();
        match self.normalization {
            Normalization::None => Float::with_val(prec, 1),
            Normalization::Orthogonal => Float::with_val(prec, self.logical_size(shape)).sqrt().recip(),
            Normalization::Unitary => Float::with_val(prec, self.logical_size(shape)).recip(),
        }
    }

    pub fn norm_factor_as<T: Scalar>(&self, shape: &[usize]) -> T {
        T::from_big(&self.norm_factor(shape))
    }

    /// Per-axis extents actually stored on the source side.
    pub fn src_extents(&self, shape: &[usize]) -> Vec<usize> {
        self.stored_extents(shape, self.src_format())
    }

    pub fn dst_extents(&self, shape: &[usize]) -> Vec<usize> {
        self.stored_extents(shape, self.dst_format())
    }

    fn stored_extents(&self, shape: &[usize], format: Option<DftFormat>) -> Vec<usize> {
        let reduced: usize = self.reduced_axis();
        shape
            .iter()
            .enumerate()
            .map(|(axis, &e)| match format {
                Some(f) if f.is_hermitian() && axis == reduced => e / 2 + 1,
                _ => e,
            })
            .collect()
    }

    /// Fills the stride lists `dims` left empty, using the packing of each side.
    pub fn derive_strides(&self, dims: &mut DimensionsDesc, placement: Placement) -> Result<()> {
        if !dims.has_src_strides() {
            let strides: Vec<usize> = self.packed_strides(dims.shape(), self.src_format(), placement)?;
            dims.set_src_strides(strides);
        }

        if !dims.has_dst_strides() {
            let strides: Vec<usize> = self.packed_strides(dims.shape(), self.dst_format(), placement)?;
            dims.set_dst_strides(strides);
        }
        Ok(())
    }

    fn packed_strides(&self, shape: &[usize], format: Option<DftFormat>, placement: Placement) -> Result<Vec<usize>> {
        let reduced: usize = self.reduced_axis();
        let strides: Option<Vec<usize>> = match format {
            Some(f) if f.is_hermitian() => {
                row_major_strides(shape, |axis, e| if axis == reduced { e / 2 + 1 } else { e })
            }
            Some(DftFormat::Real) if placement == Placement::InPlace => {
                row_major_strides(shape, |axis, e| if axis == reduced { (e / 2 + 1).saturating_mul(2) } else { e })
            }
            _ => row_major_strides(shape, |_, e| e),
        };
        strides.ok_or_else(|| FftError::invalid(LAYOUT_OVERFLOW))
    }
}

fn elem_size(precision: Precision, format: Option<DftFormat>) -> usize {
    match format {
        Some(f) if f.is_interleaved() => 2 * precision.size_of(),
        _ => precision.size_of(),
    }
}

/// `stride[last] = 1`, `stride[a] = stride[a+1] * contribution(a+1, shape[a+1])`.
///
/// `None` when a stride does not fit in `usize`.
pub fn row_major_strides<F>(shape: &[usize], contribution: F) -> Option<Vec<usize>>
where
    F: Fn(usize, usize) -> usize,
{
    let rank: usize = shape.len();
    let mut strides: Vec<usize> = vec![1; rank];
    for axis in (0..rank.saturating_sub(1)).rev() {
        strides[axis] = strides[axis + 1].checked_mul(contribution(axis + 1, shape[axis + 1]))?;
    }
    Some(strides)
}
