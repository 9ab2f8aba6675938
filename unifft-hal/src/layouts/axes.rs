use crate::{
    common::MAX_DIM_COUNT,
    error::{FftError, Result},
};

/// Checks that `axes` selects distinct, in-bounds dimensions of a shape of rank `shape_rank`.
pub fn validate_axes(axes: &[usize], shape_rank: usize) -> Result<()> {
    if axes.is_empty() {
        return Err(FftError::invalid("axes must not be empty"));
    }

    if axes.len() > shape_rank {
        return Err(FftError::invalid(format!(
            "{} axes given for a shape of rank {shape_rank}",
            axes.len()
        )));
    }

    if axes.len() > MAX_DIM_COUNT {
        return Err(FftError::invalid(format!(
            "{} axes exceed the maximum dimension count {MAX_DIM_COUNT}",
            axes.len()
        )));
    }

    for (i, &axis) in axes.iter().enumerate() {
        if axis >= shape_rank {
            return Err(FftError::invalid(format!("axis {axis} out of bounds for rank {shape_rank}")));
        }

        if axes[..i].contains(&axis) {
            return Err(FftError::invalid(format!("axis {axis} repeats")));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::validate_axes;
    use crate::common::MAX_DIM_COUNT;

    #[test]
    fn rejects_each_failure_kind() {
        assert!(validate_axes(&[], 2).is_err());
        assert!(validate_axes(&[0, 1, 2], 2).is_err());
        assert!(validate_axes(&[2], 2).is_err());
        assert!(validate_axes(&[1, 1], 3).is_err());
        assert!(validate_axes(&[0, 1, 2, 3, 4], 6).is_err());
    }

    #[test]
    fn accepts_unordered_subsets() {
        assert!(validate_axes(&[1], 2).is_ok());
        assert!(validate_axes(&[2, 0], 3).is_ok());
        assert!(validate_axes(&[3, 2, 1, 0], 4).is_ok());
    }

    proptest! {
        #[test]
        fn permutation_prefixes_are_valid(rank in 1usize..=MAX_DIM_COUNT, take in 1usize..=MAX_DIM_COUNT, seed in any::<u64>()) {
            let take: usize = take.min(rank);
            let mut axes: Vec<usize> = (0..rank).collect();
            // Fisher-Yates driven by the seed
            let mut s: u64 = seed;
            for i in (1..rank).rev() {
                s = s.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let j: usize = (s >> 33) as usize % (i + 1);
                axes.swap(i, j);
            }
            axes.truncate(take);
            prop_assert!(validate_axes(&axes, rank).is_ok());
        }

        #[test]
        fn out_of_bounds_axis_is_rejected(rank in 1usize..=MAX_DIM_COUNT, extra in 0usize..8) {
            prop_assert!(validate_axes(&[rank + extra], rank).is_err());
        }

        #[test]
        fn duplicate_axis_is_rejected(rank in 2usize..=MAX_DIM_COUNT, axis in 0usize..MAX_DIM_COUNT) {
            let axis: usize = axis % rank;
            prop_assert!(validate_axes(&[axis, axis], rank).is_err());
        }
    }
}
