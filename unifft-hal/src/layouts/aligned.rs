use std::{
    alloc::{Layout, alloc_zeroed, dealloc, handle_alloc_error},
    fmt::{Debug, Formatter},
    ops::{Deref, DerefMut},
    ptr::NonNull,
};

use crate::types::KnownType;

/// Zero-initialized, over-aligned buffer of `T` that frees with the layout it
/// was allocated with.
pub struct AlignedBuf<T: KnownType> {
    ptr: NonNull<T>,
    len: usize,
    layout: Layout,
}

unsafe impl<T: KnownType> Send for AlignedBuf<T> {}
unsafe impl<T: KnownType> Sync for AlignedBuf<T> {}

impl<T: KnownType> AlignedBuf<T> {
    /// # Panics
    /// If `align` is not a power of two or is below `align_of::<T>()`, or if
    /// the padded byte size overflows `usize`.
    pub fn zeroed(len: usize, align: usize) -> Self {
        assert!(align.is_power_of_two(), "alignment must be a power of two but is {align}");
        assert!(
            align >= align_of::<T>(),
            "alignment {align} is below the natural alignment {} of the element",
            align_of::<T>()
        );
        let bytes: usize = match len
            .checked_mul(size_of::<T>())
            .and_then(|bytes| bytes.checked_next_multiple_of(align))
        {
            Some(bytes) => bytes.max(align),
            None => panic!("{len} elements of {} bytes overflow usize", size_of::<T>()),
        };
        let layout: Layout = match Layout::from_size_align(bytes, align) {
            Ok(layout) => layout,
            Err(_) => panic!("invalid layout: {bytes} bytes aligned to {align}"),
        };
        // all-zero is a valid `T` by the `KnownType` contract
        let raw: *mut u8 = unsafe { alloc_zeroed(layout) };
        let Some(ptr) = NonNull::new(raw as *mut T) else {
            handle_alloc_error(layout)
        };
        Self { ptr, len, layout }
    }

    pub fn align(&self) -> usize {
        self.layout.align()
    }
}

impl<T: KnownType> Deref for AlignedBuf<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: KnownType> DerefMut for AlignedBuf<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: KnownType> Drop for AlignedBuf<T> {
    fn drop(&mut self) {
        unsafe { dealloc(self.ptr.as_ptr() as *mut u8, self.layout) }
    }
}

impl<T: KnownType + Debug> Debug for AlignedBuf<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
