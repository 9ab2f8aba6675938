use num_complex::Complex;

use crate::{
    api::{PlanExecute, PlanExecuteUnsafe, PlanInfos, PlanNew, PlanWorkspaceSize},
    common::{Distribution, ExecutionMode, Placement},
    error::{BufferSide, FftError},
    layouts::{
        AlignedBuf, BackendId, Context, Desc, DftType, ExecutionParameters, GpuParameters, Plan, StreamHandle, TargetParameters,
        TransformParameters,
    },
    test_suite::mock::{Call, Recording, Refusing, mock_context},
};

fn recording_plan(ctx: &Context, target: &TargetParameters) -> Plan<Recording> {
    let transform: TransformParameters = TransformParameters::dft(&[16], &[0], DftType::C2C);
    Plan::<Recording>::new(ctx, Desc::new(ctx, &transform, target).unwrap()).unwrap()
}

#[test]
fn routes_to_the_entry_point_of_each_mode() {
    let ctx: Context = mock_context(4);
    let mut src: Vec<Complex<f64>> = vec![Complex::default(); 16];
    let mut dst: Vec<Complex<f64>> = vec![Complex::default(); 16];

    let cases: [(TargetParameters, ExecutionMode); 3] = [
        (TargetParameters::cpu(), ExecutionMode::CpuSpst),
        (TargetParameters::gpu(&[1]), ExecutionMode::GpuSpst),
        (
            TargetParameters::gpu(&[2]).distribution_as(Distribution::Mpst),
            ExecutionMode::GpuMpst,
        ),
    ];

    for (target, mode) in cases {
        let plan: Plan<Recording> = recording_plan(&ctx, &target);
        assert_eq!(plan.backend(), BackendId::Vkfft);
        assert!(plan.execution_modes().contains(&mode));
        plan.execute(&mut src[..], &mut dst[..]).unwrap();
        let calls: Vec<Call> = Recording::calls(&plan);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].mode, mode);
        assert_eq!(calls[0].targets, 1);
    }
}

#[test]
fn multi_target_call_carries_every_buffer() {
    let ctx: Context = mock_context(4);
    let target: TargetParameters = TargetParameters::gpu(&[0, 1, 3]).distribution_as(Distribution::Spmt);
    let plan: Plan<Recording> = recording_plan(&ctx, &target);
    assert_eq!(plan.workspace_size(), vec![0, 0, 0]);

    let mut src: Vec<Vec<Complex<f64>>> = vec![vec![Complex::default(); 16]; 3];
    let mut dst: Vec<Vec<Complex<f64>>> = vec![vec![Complex::default(); 16]; 3];
    let src_ptrs: Vec<*mut Complex<f64>> = src.iter_mut().map(|b| b.as_mut_ptr()).collect();
    let dst_ptrs: Vec<*mut Complex<f64>> = dst.iter_mut().map(|b| b.as_mut_ptr()).collect();

    let params: ExecutionParameters = ExecutionParameters::GpuSpmt {
        stream: StreamHandle(7),
        workspaces: Vec::new(),
    };
    unsafe { plan.execute_targets(&src_ptrs, &dst_ptrs, Some(&params)) }.unwrap();

    assert_eq!(
        Recording::calls(&plan),
        vec![Call {
            mode: ExecutionMode::GpuSpmt,
            targets: 3,
            stream: Some(StreamHandle(7)),
            workspaces: 0,
        }]
    );

    // a single buffer is not enough for three targets
    let err: FftError = plan.execute(&mut src[0][..], &mut dst[0][..]).unwrap_err();
    assert!(matches!(err, FftError::BufferCount { expected: 3, actual: 1, .. }));
    assert_eq!(Recording::calls(&plan).len(), 1);
}

#[test]
fn missing_entry_point_is_reported() {
    let ctx: Context = mock_context(1);
    let plan: Plan<Recording> = recording_plan(&ctx, &TargetParameters::cpu().distribution_as(Distribution::Mpst));
    assert!(!plan.execution_modes().contains(&ExecutionMode::CpuMpst));

    let mut src: Vec<Complex<f64>> = vec![Complex::default(); 16];
    let mut dst: Vec<Complex<f64>> = vec![Complex::default(); 16];
    let err: FftError = plan.execute(&mut src[..], &mut dst[..]).unwrap_err();
    assert_eq!(err, FftError::BackendUnimplemented(ExecutionMode::CpuMpst));
    assert!(!err.is_contract_error());
    assert!(Recording::calls(&plan).is_empty());
}

#[test]
fn contract_failures_never_reach_the_engine() {
    let ctx: Context = mock_context(1);
    let plan: Plan<Recording> = recording_plan(&ctx, &TargetParameters::cpu());
    let mut a: Vec<Complex<f64>> = vec![Complex::default(); 16];
    let pa: *mut u8 = a.as_mut_ptr() as *mut u8;

    assert_eq!(
        unsafe { plan.execute_unsafe(&[pa], &[pa], None) }.unwrap_err(),
        FftError::PlacementMismatch {
            declared: Placement::OutOfPlace,
            inferred: Placement::InPlace,
        }
    );
    assert_eq!(
        unsafe { plan.execute_unsafe(&[pa], &[std::ptr::null_mut()], None) }.unwrap_err(),
        FftError::NullBuffer {
            side: BufferSide::Destination,
            index: 0,
        }
    );
    assert_eq!(
        unsafe { plan.execute_unsafe(&[], &[pa], None) }.unwrap_err(),
        FftError::BufferCount {
            side: BufferSide::Source,
            expected: 1,
            actual: 0,
        }
    );
    assert!(Recording::calls(&plan).is_empty());
}

#[test]
fn external_workspace_must_be_supplied() {
    let ctx: Context = mock_context(2);
    let target: TargetParameters = TargetParameters::Gpu(GpuParameters {
        devices: vec![1],
        external_workspace: true,
        ..Default::default()
    });
    let plan: Plan<Recording> = recording_plan(&ctx, &target);

    let mut src: Vec<Complex<f64>> = vec![Complex::default(); 16];
    let mut dst: Vec<Complex<f64>> = vec![Complex::default(); 16];
    assert_eq!(
        plan.execute(&mut src[..], &mut dst[..]).unwrap_err(),
        FftError::MissingWorkspace
    );

    let null: ExecutionParameters = ExecutionParameters::GpuSpst {
        stream: StreamHandle::default(),
        workspace: Some(std::ptr::null_mut()),
    };
    assert_eq!(
        plan.execute_with(&mut src[..], &mut dst[..], &null).unwrap_err(),
        FftError::MissingWorkspace
    );

    let mut scratch: Vec<u8> = vec![0u8; 256];
    let params: ExecutionParameters = ExecutionParameters::GpuSpst {
        stream: StreamHandle(3),
        workspace: Some(scratch.as_mut_ptr()),
    };
    plan.execute_with(&mut src[..], &mut dst[..], &params).unwrap();
    let calls: Vec<Call> = Recording::calls(&plan);
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].workspaces, 1);
    assert_eq!(calls[0].stream, Some(StreamHandle(3)));
}

#[test]
fn refusing_engine_reports_its_reason() {
    let ctx: Context = mock_context(1);
    let transform: TransformParameters = TransformParameters::dft(&[16], &[0], DftType::C2C);
    let desc: Desc = Desc::new(&ctx, &transform, &TargetParameters::cpu()).unwrap();
    let err: FftError = Plan::<Refusing>::new(&ctx, desc).unwrap_err();
    assert!(matches!(err, FftError::UnsupportedConfiguration(_)));
}

#[test]
fn aligned_buffers_execute_like_slices() {
    let ctx: Context = mock_context(1);
    let plan: Plan<Recording> = recording_plan(&ctx, &TargetParameters::cpu());

    let mut src: AlignedBuf<Complex<f64>> = crate::alloc_aligned(16);
    let mut dst: AlignedBuf<Complex<f64>> = crate::alloc_aligned_custom(16, 128);
    assert!(crate::is_aligned(src.as_ptr()));
    crate::assert_alignment(dst.as_ptr());
    assert_eq!(dst.align(), 128);
    assert!(src.iter().all(|c| *c == Complex::default()));

    plan.execute(&mut src[..], &mut dst[..]).unwrap();
    assert_eq!(Recording::calls(&plan).len(), 1);
}
