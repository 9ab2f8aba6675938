use crate::{
    api::{PlanExecute, PlanExecuteRaw, PlanExecuteUnsafe},
    error::Result,
    layouts::{BufferList, BufferView, ExecutionParameters, RawBuffer, raw_const},
    types::KnownType,
};

fn typed_list<V: BufferView>(mut view: V) -> BufferList {
    let raw: RawBuffer = view.raw();
    BufferList::single(raw).typed(view.type_info())
}

impl<P> PlanExecute for P
where
    P: PlanExecuteRaw + ?Sized,
{
    fn execute<S: BufferView, D: BufferView>(&self, src: S, dst: D) -> Result<()> {
        let src: BufferList = typed_list(src);
        let dst: BufferList = typed_list(dst);
        // Borrowed slices are live and their lengths are checked against the layout.
        unsafe { self.execute_raw(&src, &dst, None) }
    }

    fn execute_with<S: BufferView, D: BufferView>(&self, src: S, dst: D, params: &ExecutionParameters) -> Result<()> {
        let src: BufferList = typed_list(src);
        let dst: BufferList = typed_list(dst);
        unsafe { self.execute_raw(&src, &dst, Some(params)) }
    }

    fn execute_preserving<S: KnownType, D: BufferView>(&self, src: &[S], dst: D) -> Result<()> {
        let src: BufferList = BufferList::single(raw_const(src))
            .typed(S::type_info())
            .read_only();
        let dst: BufferList = typed_list(dst);
        unsafe { self.execute_raw(&src, &dst, None) }
    }

    fn execute_inplace<T: BufferView>(&self, buf: T) -> Result<()> {
        let list: BufferList = typed_list(buf);
        unsafe { self.execute_raw(&list, &list, None) }
    }

    unsafe fn execute_targets<S: KnownType, D: KnownType>(
        &self,
        src: &[*mut S],
        dst: &[*mut D],
        params: Option<&ExecutionParameters>,
    ) -> Result<()> {
        let src: BufferList = BufferList::new(src.iter().map(|&p| RawBuffer::new(p as *mut u8)).collect()).typed(S::type_info());
        let dst: BufferList = BufferList::new(dst.iter().map(|&p| RawBuffer::new(p as *mut u8)).collect()).typed(D::type_info());
        unsafe { self.execute_raw(&src, &dst, params) }
    }
}

impl<P> PlanExecuteUnsafe for P
where
    P: PlanExecuteRaw + ?Sized,
{
    unsafe fn execute_unsafe(&self, src: &[*mut u8], dst: &[*mut u8], params: Option<&ExecutionParameters>) -> Result<()> {
        let src: BufferList = BufferList::new(src.iter().map(|&p| RawBuffer::new(p)).collect());
        let dst: BufferList = BufferList::new(dst.iter().map(|&p| RawBuffer::new(p)).collect());
        unsafe { self.execute_raw(&src, &dst, params) }
    }
}
