//! Moves data between caller memory with arbitrary element strides and dense
//! row-major working arrays, and walks the 1D lines of a dense array.

use itertools::izip;

use crate::layouts::row_major_strides;

/// Row-major strides of a dense array of `shape`.
///
/// # Panics
///
/// When the element count of `shape` overflows `usize`. Shapes taken from a
/// [`Desc`](crate::layouts::Desc) never do.
pub fn dense_strides(shape: &[usize]) -> Vec<usize> {
    row_major_strides(shape, |_, e| e).unwrap_or_else(|| panic!("element count of {shape:?} overflows usize"))
}

/// Calls `f(dense_index, strided_offset)` for every multi-index of `extents`,
/// in row-major order.
pub fn for_each_offset<F>(extents: &[usize], strides: &[usize], mut f: F)
where
    F: FnMut(usize, usize),
{
    debug_assert_eq!(extents.len(), strides.len());
    let total: usize = extents.iter().product();
    if total == 0 {
        return;
    }

    let rank: usize = extents.len();
    let mut index: Vec<usize> = vec![0; rank];
    let mut offset: usize = 0;
    for dense in 0..total {
        f(dense, offset);
        for axis in (0..rank).rev() {
            index[axis] += 1;
            offset += strides[axis];
            if index[axis] < extents[axis] {
                break;
            }
            offset -= strides[axis] * extents[axis];
            index[axis] = 0;
        }
    }
}

/// # Safety
/// `src` must be readable at every offset the extents and strides reach.
pub unsafe fn gather<T: Copy>(src: *const T, extents: &[usize], strides: &[usize], out: &mut [T]) {
    for_each_offset(extents, strides, |i, off| out[i] = unsafe { *src.add(off) });
}

/// Reads interleaved complex elements; strides count complex elements.
///
/// # Safety
/// `src` must be readable at every element the extents and strides reach.
pub unsafe fn gather_interleaved<T: Copy>(src: *const T, extents: &[usize], strides: &[usize], re: &mut [T], im: &mut [T]) {
    for_each_offset(extents, strides, |i, off| unsafe {
        re[i] = *src.add(2 * off);
        im[i] = *src.add(2 * off + 1);
    });
}

/// # Safety
/// `dst` must be writable at every offset the extents and strides reach.
pub unsafe fn scatter<T: Copy>(dst: *mut T, extents: &[usize], strides: &[usize], data: &[T]) {
    for_each_offset(extents, strides, |i, off| unsafe { *dst.add(off) = data[i] });
}

/// # Safety
/// `dst` must be writable at every element the extents and strides reach.
pub unsafe fn scatter_interleaved<T: Copy>(dst: *mut T, extents: &[usize], strides: &[usize], re: &[T], im: &[T]) {
    for_each_offset(extents, strides, |i, off| unsafe {
        *dst.add(2 * off) = re[i];
        *dst.add(2 * off + 1) = im[i];
    });
}

/// Start offsets of every line along `axis` of a dense `shape`, and the
/// distance between consecutive elements of a line.
///
/// Two shapes differing only at `axis` enumerate their lines in the same order.
pub fn line_starts(shape: &[usize], axis: usize) -> (Vec<usize>, usize) {
    let inner: usize = shape[axis + 1..].iter().product();
    let outer: usize = shape[..axis].iter().product();
    let block: usize = shape[axis] * inner;
    let starts: Vec<usize> = (0..outer)
        .flat_map(|o| (0..inner).map(move |i| o * block + i))
        .collect();
    (starts, inner)
}

/// Runs `f(input, output)` on every line along `axis` of a dense real array.
pub fn map_lines<T, F>(shape: &[usize], axis: usize, data: &mut [T], mut f: F)
where
    T: Copy + Default,
    F: FnMut(&[T], &mut [T]),
{
    let n: usize = shape[axis];
    let (starts, step) = line_starts(shape, axis);
    let mut line: Vec<T> = vec![T::default(); n];
    let mut out: Vec<T> = vec![T::default(); n];
    for start in starts {
        for (j, x) in line.iter_mut().enumerate() {
            *x = data[start + j * step];
        }
        f(&line, &mut out);
        for (j, &y) in out.iter().enumerate() {
            data[start + j * step] = y;
        }
    }
}

/// Complex counterpart of [`map_lines`] over split real/imaginary arrays.
pub fn map_lines_reim<T, F>(shape: &[usize], axis: usize, re: &mut [T], im: &mut [T], mut f: F)
where
    T: Copy + Default,
    F: FnMut(&[T], &[T], &mut [T], &mut [T]),
{
    let n: usize = shape[axis];
    let (starts, step) = line_starts(shape, axis);
    let mut line_re: Vec<T> = vec![T::default(); n];
    let mut line_im: Vec<T> = vec![T::default(); n];
    let mut out_re: Vec<T> = vec![T::default(); n];
    let mut out_im: Vec<T> = vec![T::default(); n];
    for start in starts {
        for (j, (r, i)) in line_re.iter_mut().zip(line_im.iter_mut()).enumerate() {
            *r = re[start + j * step];
            *i = im[start + j * step];
        }
        f(&line_re, &line_im, &mut out_re, &mut out_im);
        for (j, (&r, &i)) in izip!(out_re.iter(), out_im.iter()).enumerate() {
            re[start + j * step] = r;
            im[start + j * step] = i;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{dense_strides, for_each_offset, gather, line_starts, map_lines, scatter};

    #[test]
    fn offsets_follow_strides() {
        let mut seen: Vec<(usize, usize)> = Vec::new();
        for_each_offset(&[2, 3], &[8, 2], |i, off| seen.push((i, off)));
        assert_eq!(seen, vec![(0, 0), (1, 2), (2, 4), (3, 8), (4, 10), (5, 12)]);
    }

    #[test]
    fn gather_then_scatter_restores_padding_layout() {
        // (2, 3) stored with a padded row stride of 4
        let src: Vec<f64> = vec![1.0, 2.0, 3.0, -1.0, 4.0, 5.0, 6.0, -1.0];
        let mut dense: Vec<f64> = vec![0.0; 6];
        unsafe { gather(src.as_ptr(), &[2, 3], &[4, 1], &mut dense) };
        assert_eq!(dense, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        let mut dst: Vec<f64> = vec![-1.0; 8];
        unsafe { scatter(dst.as_mut_ptr(), &[2, 3], &[4, 1], &dense) };
        assert_eq!(dst, src);
    }

    #[test]
    fn lines_cover_each_axis() {
        assert_eq!(dense_strides(&[2, 3, 4]), vec![12, 4, 1]);
        let (starts, step) = line_starts(&[2, 3, 4], 1);
        assert_eq!(step, 4);
        assert_eq!(starts, vec![0, 1, 2, 3, 12, 13, 14, 15]);

        let mut data: Vec<u32> = (0..6).collect();
        map_lines(&[2, 3], 0, &mut data, |line, out| {
            out[0] = line[1];
            out[1] = line[0];
        });
        assert_eq!(data, vec![3, 4, 5, 0, 1, 2]);
    }
}
