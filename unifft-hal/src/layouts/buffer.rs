use std::ptr;

use crate::types::{Complexity, KnownType, Scalar, TypeInfo};

/// Canonical, untyped view of one buffer handed to an engine.
///
/// Interleaved and real data use `ptr` alone; planar complex data carries
/// the imaginary part in `imag`. `bytes`, when known, is the capacity of each
/// part.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawBuffer {
    ptr: *mut u8,
    imag: Option<*mut u8>,
    bytes: Option<usize>,
}

impl RawBuffer {
    pub fn new(ptr: *mut u8) -> Self {
        Self {
            ptr,
            imag: None,
            bytes: None,
        }
    }

    pub fn planar(real: *mut u8, imag: *mut u8) -> Self {
        Self {
            ptr: real,
            imag: Some(imag),
            bytes: None,
        }
    }

    pub fn null() -> Self {
        Self::new(ptr::null_mut())
    }

    pub fn with_bytes(mut self, bytes: usize) -> Self {
        self.bytes = Some(bytes);
        self
    }

    pub fn ptr(&self) -> *mut u8 {
        self.ptr
    }

    pub fn imag(&self) -> Option<*mut u8> {
        self.imag
    }

    pub fn bytes(&self) -> Option<usize> {
        self.bytes
    }

    pub fn is_planar(&self) -> bool {
        self.imag.is_some()
    }

    pub fn is_null(&self) -> bool {
        self.ptr.is_null() || self.imag.is_some_and(|p| p.is_null())
    }

    /// Both views address the same memory (real and imaginary parts alike).
    pub fn same_memory(&self, other: &RawBuffer) -> bool {
        self.ptr == other.ptr && self.imag == other.imag
    }
}

/// One side's buffers plus what the caller declared about them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BufferList {
    buffers: Vec<RawBuffer>,
    read_only: bool,
    elem: Option<TypeInfo>,
}

impl BufferList {
    pub fn new(buffers: Vec<RawBuffer>) -> Self {
        Self {
            buffers,
            read_only: false,
            elem: None,
        }
    }

    pub fn single(buffer: RawBuffer) -> Self {
        Self::new(vec![buffer])
    }

    /// Caller requires the memory to survive the call unchanged.
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Element type known statically at the call site.
    pub fn typed(mut self, elem: TypeInfo) -> Self {
        self.elem = Some(elem);
        self
    }

    pub fn buffers(&self) -> &[RawBuffer] {
        &self.buffers
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn elem(&self) -> Option<TypeInfo> {
        self.elem
    }
}

/// Separate real and imaginary arrays of one complex buffer.
pub struct Planar<'a, T> {
    pub re: &'a mut [T],
    pub im: &'a mut [T],
}

impl<'a, T> Planar<'a, T> {
    pub fn new(re: &'a mut [T], im: &'a mut [T]) -> Self {
        Self { re, im }
    }
}

/// Typed caller buffers that convert to a [`RawBuffer`].
pub trait BufferView {
    fn type_info(&self) -> TypeInfo;

    fn raw(&mut self) -> RawBuffer;
}

impl<T: KnownType> BufferView for &mut [T] {
    fn type_info(&self) -> TypeInfo {
        T::type_info()
    }

    fn raw(&mut self) -> RawBuffer {
        RawBuffer::new(self.as_mut_ptr() as *mut u8).with_bytes(size_of_val::<[T]>(self))
    }
}

impl<T: Scalar> BufferView for Planar<'_, T> {
    fn type_info(&self) -> TypeInfo {
        TypeInfo::new(T::PRECISION, Complexity::Complex)
    }

    fn raw(&mut self) -> RawBuffer {
        let bytes: usize = self.re.len().min(self.im.len()) * size_of::<T>();
        RawBuffer::planar(self.re.as_mut_ptr() as *mut u8, self.im.as_mut_ptr() as *mut u8).with_bytes(bytes)
    }
}

/// View of a read-only typed slice. Engines must not write through it.
pub fn raw_const<T: KnownType>(data: &[T]) -> RawBuffer {
    RawBuffer::new(data.as_ptr() as *mut u8).with_bytes(size_of_val(data))
}

#[cfg(test)]
mod tests {
    use num_complex::Complex;

    use super::{BufferView, Planar, RawBuffer};
    use crate::types::{Complexity, Precision};

    #[test]
    fn identity_covers_both_parts() {
        let mut re: Vec<f32> = vec![0f32; 4];
        let mut im: Vec<f32> = vec![0f32; 4];
        let a: RawBuffer = RawBuffer::planar(re.as_mut_ptr() as *mut u8, im.as_mut_ptr() as *mut u8);
        let b: RawBuffer = RawBuffer::planar(re.as_mut_ptr() as *mut u8, re.as_mut_ptr() as *mut u8);
        assert!(a.same_memory(&a));
        assert!(!a.same_memory(&b));
        assert!(!a.same_memory(&RawBuffer::new(re.as_mut_ptr() as *mut u8)));
    }

    #[test]
    fn null_parts_are_detected() {
        let mut re: Vec<f64> = vec![0f64; 2];
        assert!(RawBuffer::null().is_null());
        assert!(RawBuffer::planar(re.as_mut_ptr() as *mut u8, std::ptr::null_mut()).is_null());
    }

    #[test]
    fn typed_views_report_sizes() {
        let mut data: Vec<Complex<f64>> = vec![Complex::new(0.0, 0.0); 3];
        let mut view: &mut [Complex<f64>] = data.as_mut_slice();
        assert_eq!(view.raw().bytes(), Some(48));
        assert_eq!(view.type_info().complexity, Complexity::Complex);

        let mut re: Vec<f32> = vec![0f32; 5];
        let mut im: Vec<f32> = vec![0f32; 4];
        let mut planar: Planar<'_, f32> = Planar::new(&mut re, &mut im);
        assert_eq!(planar.raw().bytes(), Some(16));
        assert_eq!(planar.type_info().precision, Precision::F32);
    }
}
