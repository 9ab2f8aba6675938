use std::sync::Arc;

use crate::{
    common::{Distribution, ExecutionMode, Placement, Target},
    error::FftError,
    layouts::{
        BackendId, BackendParameters, Context, CpuParameters, Desc, DftType, DttType, GpuParameters, TargetDesc,
        TargetParameters, TransformParameters,
    },
    test_suite::mock::{MockGpu, mock_context},
};

#[test]
fn equal_parameters_give_equal_descriptors() {
    let ctx: Context = mock_context(2);
    let transform: TransformParameters = TransformParameters::dft(&[4, 6], &[0, 1], DftType::R2C);
    let a: Desc = Desc::new(&ctx, &transform, &TargetParameters::cpu()).unwrap();
    let b: Desc = Desc::new(&ctx, &transform, &TargetParameters::cpu()).unwrap();
    assert_eq!(a, b);

    let c: Desc = Desc::new(&ctx, &transform.clone().placement(Placement::InPlace), &TargetParameters::cpu()).unwrap();
    assert_ne!(a, c);
}

#[test]
fn cpu_thread_limit_is_clamped() {
    let ctx: Context = Context::new().with_hardware_concurrency(4);
    let transform: TransformParameters = TransformParameters::dft(&[8], &[0], DftType::C2C);

    let all: Desc = Desc::new(&ctx, &transform, &TargetParameters::cpu()).unwrap();
    assert_eq!(all.target_desc().cpu().unwrap().thread_limit, 4);

    let target: TargetParameters = TargetParameters::Cpu(CpuParameters {
        thread_limit: 16,
        ..Default::default()
    });
    let clamped: Desc = Desc::new(&ctx, &transform, &target).unwrap();
    assert_eq!(clamped.target_desc().cpu().unwrap().thread_limit, 4);
    assert_eq!(clamped.target_desc().cpu().unwrap().alignment, crate::DEFAULTALIGN);

    let odd: TargetParameters = TargetParameters::Cpu(CpuParameters {
        alignment: 48,
        ..Default::default()
    });
    assert!(matches!(
        Desc::new(&ctx, &transform, &odd).unwrap_err(),
        FftError::InvalidArgument(_)
    ));
}

#[test]
fn distribution_pairs() {
    let ctx: Context = mock_context(4);
    let transform: TransformParameters = TransformParameters::dft(&[8], &[0], DftType::C2C);

    let err: FftError = Desc::new(
        &ctx,
        &transform,
        &TargetParameters::cpu().distribution_as(Distribution::Spmt),
    )
    .unwrap_err();
    assert!(matches!(err, FftError::UnsupportedConfiguration(_)));

    let mpst: Desc = Desc::new(&ctx, &transform, &TargetParameters::cpu().distribution_as(Distribution::Mpst)).unwrap();
    assert_eq!(mpst.execution_mode(), ExecutionMode::CpuMpst);
    assert_eq!(mpst.target_count(), 1);

    // no process group
    let lone: Context = Context::new().with_gpu(Arc::new(MockGpu::new(1)));
    let err: FftError = Desc::new(
        &lone,
        &transform,
        &TargetParameters::gpu(&[0]).distribution_as(Distribution::Mpst),
    )
    .unwrap_err();
    assert!(matches!(err, FftError::UnsupportedConfiguration(_)));
}

#[test]
fn every_mode_is_kept_from_construction() {
    let ctx: Context = mock_context(2);
    let transform: TransformParameters = TransformParameters::dft(&[8], &[0], DftType::C2C);
    for mode in ExecutionMode::ALL {
        let target: TargetParameters = match mode.target() {
            Target::Cpu => TargetParameters::cpu(),
            Target::Gpu if mode == ExecutionMode::GpuSpmt => TargetParameters::gpu(&[0, 1]),
            Target::Gpu => TargetParameters::gpu(&[1]),
        };
        let desc: Desc = Desc::new(&ctx, &transform, &target.distribution_as(mode.distribution())).unwrap();
        assert_eq!(desc.execution_mode(), mode);
        assert_eq!(desc.target(), mode.target());
        assert_eq!(desc.distribution(), mode.distribution());
    }
}

#[test]
fn gpu_devices_are_validated() {
    let ctx: Context = mock_context(4);
    let transform: TransformParameters = TransformParameters::dft(&[8], &[0], DftType::C2C);

    let spmt: Desc = Desc::new(
        &ctx,
        &transform,
        &TargetParameters::gpu(&[2, 0, 3]).distribution_as(Distribution::Spmt),
    )
    .unwrap();
    assert_eq!(spmt.target_count(), 3);
    assert_eq!(spmt.execution_mode(), ExecutionMode::GpuSpmt);

    let current: Desc = Desc::new(&ctx, &transform, &TargetParameters::gpu(&[])).unwrap();
    match current.target_desc() {
        TargetDesc::Gpu(gpu) => assert_eq!(gpu.devices, vec![0]),
        TargetDesc::Cpu(_) => panic!("expected a gpu target"),
    }

    assert_eq!(
        Desc::new(&ctx, &transform, &TargetParameters::gpu(&[7])).unwrap_err(),
        FftError::InvalidDevice(7)
    );
    assert!(matches!(
        Desc::new(&ctx, &transform, &TargetParameters::gpu(&[0, 1])).unwrap_err(),
        FftError::InvalidArgument(_)
    ));
    assert!(matches!(
        Desc::new(
            &ctx,
            &transform,
            &TargetParameters::gpu(&[1, 1]).distribution_as(Distribution::Spmt)
        )
        .unwrap_err(),
        FftError::InvalidArgument(_)
    ));
    assert!(matches!(
        Desc::new(&Context::new(), &transform, &TargetParameters::gpu(&[0])).unwrap_err(),
        FftError::UnsupportedConfiguration(_)
    ));

    let external: TargetParameters = TargetParameters::Gpu(GpuParameters {
        external_workspace: true,
        ..Default::default()
    });
    let desc: Desc = Desc::new(&ctx, &transform, &external).unwrap();
    assert!(desc.target_desc().external_workspace());
}

#[test]
fn dct1_needs_two_samples() {
    let ctx: Context = Context::new();
    let target: TargetParameters = TargetParameters::cpu();
    let short: TransformParameters = TransformParameters::dtt(&[1, 4], &[0, 1], &[DttType::Dct1]);
    assert!(matches!(
        Desc::new(&ctx, &short, &target).unwrap_err(),
        FftError::InvalidArgument(_)
    ));
    let other: TransformParameters = TransformParameters::dtt(&[1, 4], &[0, 1], &[DttType::Dct2]);
    assert!(Desc::new(&ctx, &other, &target).is_ok());
}

#[test]
fn backend_defaults_follow_the_mode() {
    let ctx: Context = mock_context(1);
    let transform: TransformParameters = TransformParameters::dft(&[8], &[0], DftType::C2C);

    let cpu: Desc = Desc::new(&ctx, &transform, &TargetParameters::cpu()).unwrap();
    assert_eq!(
        cpu.backend_parameters(),
        &BackendParameters::default_for(ExecutionMode::CpuSpst)
    );

    let pinned: Desc = Desc::new(
        &ctx,
        &transform,
        &TargetParameters::cpu().with_backend(BackendParameters::only(BackendId::Reference)),
    )
    .unwrap();
    assert_eq!(pinned.backend_parameters().candidates(), vec![BackendId::Reference]);
}

#[test]
fn spans_cover_padded_layouts() {
    let ctx: Context = Context::new();
    let transform: TransformParameters =
        TransformParameters::dft(&[4, 6], &[0, 1], DftType::R2C).placement(Placement::InPlace);
    let desc: Desc = Desc::new(&ctx, &transform, &TargetParameters::cpu()).unwrap();
    // f64 real: 1 + 3 * 8 + 5 elements; hermitian interleaved: 4 x 4 complex
    assert_eq!(desc.src_span_bytes(), 30 * 8);
    assert_eq!(desc.dst_span_bytes(), 16 * 16);
}

#[test]
fn layouts_that_overflow_are_rejected() {
    let ctx: Context = Context::new();
    let huge: TransformParameters = TransformParameters::dft(&[1 << 22; 4], &[3], DftType::C2C);
    assert_eq!(
        Desc::new(&ctx, &huge, &TargetParameters::cpu()).unwrap_err(),
        FftError::InvalidArgument("layout size overflows usize".into())
    );

    // element count fits, byte count does not
    let wide: TransformParameters = TransformParameters::dft(&[1 << 30, 1 << 30, 1 << 3], &[2], DftType::C2C);
    assert_eq!(
        Desc::new(&ctx, &wide, &TargetParameters::cpu()).unwrap_err(),
        FftError::InvalidArgument("layout size overflows usize".into())
    );
}
