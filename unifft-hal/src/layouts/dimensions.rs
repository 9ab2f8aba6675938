use crate::{
    common::MAX_DIM_COUNT,
    error::{FftError, Result},
};

/// Logical shape plus the element strides of both buffers.
///
/// Strides are counted in elements of the respective side (see
/// [`crate::layouts::TransformDesc::src_elem_size`]). An empty stride list
/// means "not given" until [`crate::layouts::TransformDesc::derive_strides`]
/// fills it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DimensionsDesc {
    shape: Vec<usize>,
    src_strides: Vec<usize>,
    dst_strides: Vec<usize>,
}

impl DimensionsDesc {
    pub fn new(shape: &[usize], src_strides: &[usize], dst_strides: &[usize]) -> Result<Self> {
        let rank: usize = shape.len();

        if rank == 0 {
            return Err(FftError::invalid("shape must not be empty"));
        }

        if rank > MAX_DIM_COUNT {
            return Err(FftError::invalid(format!(
                "shape rank {rank} exceeds the maximum dimension count {MAX_DIM_COUNT}"
            )));
        }

        if let Some(axis) = shape.iter().position(|&e| e == 0) {
            return Err(FftError::invalid(format!("shape extent of axis {axis} is zero")));
        }

        check_strides("source", src_strides, rank)?;
        check_strides("destination", dst_strides, rank)?;

        Ok(Self {
            shape: shape.to_vec(),
            src_strides: src_strides.to_vec(),
            dst_strides: dst_strides.to_vec(),
        })
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn src_strides(&self) -> &[usize] {
        &self.src_strides
    }

    pub fn dst_strides(&self) -> &[usize] {
        &self.dst_strides
    }

    pub fn has_src_strides(&self) -> bool {
        !self.src_strides.is_empty()
    }

    pub fn has_dst_strides(&self) -> bool {
        !self.dst_strides.is_empty()
    }

    pub fn strides_equal(&self) -> bool {
        self.src_strides == self.dst_strides
    }

    pub(crate) fn set_src_strides(&mut self, strides: Vec<usize>) {
        debug_assert_eq!(strides.len(), self.rank());
        self.src_strides = strides;
    }

    pub(crate) fn set_dst_strides(&mut self, strides: Vec<usize>) {
        debug_assert_eq!(strides.len(), self.rank());
        self.dst_strides = strides;
    }
}

fn check_strides(side: &str, strides: &[usize], rank: usize) -> Result<()> {
    if strides.is_empty() {
        return Ok(());
    }

    if strides.len() != rank {
        return Err(FftError::invalid(format!(
            "{side} stride count {} does not match rank {rank}",
            strides.len()
        )));
    }

    if let Some(axis) = strides.iter().position(|&s| s == 0) {
        return Err(FftError::invalid(format!("{side} stride of axis {axis} is zero")));
    }

    Ok(())
}

pub(crate) const LAYOUT_OVERFLOW: &str = "layout size overflows usize";

/// Number of elements between the first and one past the last addressed element.
///
/// `None` when the count does not fit in `usize`.
pub fn span(extents: &[usize], strides: &[usize]) -> Option<usize> {
    extents
        .iter()
        .zip(strides.iter())
        .try_fold(1usize, |acc, (&e, &s)| e.saturating_sub(1).checked_mul(s)?.checked_add(acc))
}

#[cfg(test)]
mod tests {
    use super::{DimensionsDesc, span};

    #[test]
    fn rejects_bad_shapes_and_strides() {
        assert!(DimensionsDesc::new(&[], &[], &[]).is_err());
        assert!(DimensionsDesc::new(&[2, 2, 2, 2, 2], &[], &[]).is_err());
        assert!(DimensionsDesc::new(&[4, 0], &[], &[]).is_err());
        assert!(DimensionsDesc::new(&[4, 4], &[4], &[]).is_err());
        assert!(DimensionsDesc::new(&[4, 4], &[], &[4, 0]).is_err());
    }

    #[test]
    fn equality_is_element_wise() {
        let a: DimensionsDesc = DimensionsDesc::new(&[4, 4], &[4, 1], &[4, 1]).unwrap();
        let b: DimensionsDesc = DimensionsDesc::new(&[4, 4], &[4, 1], &[4, 1]).unwrap();
        let c: DimensionsDesc = DimensionsDesc::new(&[4, 4], &[4, 1], &[8, 1]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.strides_equal());
        assert!(!c.strides_equal());
    }

    #[test]
    fn span_of_padded_rows() {
        assert_eq!(span(&[4, 6], &[8, 1]), Some(30));
        assert_eq!(span(&[3], &[1]), Some(3));
        assert_eq!(span(&[3, 2], &[usize::MAX, 1]), None);
    }
}
