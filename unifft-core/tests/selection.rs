use std::sync::Arc;

use num_complex::Complex;
use tracing_subscriber::EnvFilter;
use unifft_core::{PlanCache, Registry, make_plan, make_plan_cached, make_plan_with};
use unifft_hal::{
    api::{AnyPlan, PlanExecute, PlanInfos},
    common::ExecutionMode,
    error::FftError,
    layouts::{
        BackendId, BackendParameters, Context, DftType, Feedback, SelectStrategy, TargetParameters, TransformParameters,
    },
    test_suite::mock::{Recording, Refusing, mock_context},
};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn c2c() -> TransformParameters {
    TransformParameters::dft(&[8], &[0], DftType::C2C)
}

#[test]
fn default_registry_prefers_rustfft_on_cpu() {
    init_logging();
    let ctx: Context = Context::new();
    let plan: Arc<dyn AnyPlan> = make_plan(&ctx, &c2c(), &TargetParameters::cpu()).unwrap();
    assert_eq!(plan.backend(), BackendId::RustFft);
    assert_eq!(plan.execution_modes(), vec![ExecutionMode::CpuSpst]);

    let mut src: Vec<Complex<f64>> = vec![Complex::default(); 8];
    src[0] = Complex::new(1.0, 0.0);
    let mut dst: Vec<Complex<f64>> = vec![Complex::default(); 8];
    plan.execute(&mut src[..], &mut dst[..]).unwrap();
    for x in &dst {
        assert!((x.re - 1.0).abs() < 1e-12 && x.im.abs() < 1e-12, "{x}");
    }
}

#[test]
fn trigonometric_transforms_fall_back_to_reference() {
    init_logging();
    let ctx: Context = Context::new();
    let dht: TransformParameters = TransformParameters::dht(&[4, 4], &[0, 1]);
    let plan: Arc<dyn AnyPlan> = make_plan(&ctx, &dht, &TargetParameters::cpu()).unwrap();
    assert_eq!(plan.backend(), BackendId::Reference);
}

#[test]
fn pinned_backend_is_honoured() {
    let ctx: Context = Context::new();
    let target: TargetParameters = TargetParameters::cpu().with_backend(BackendParameters::only(BackendId::Reference));
    let plan: Arc<dyn AnyPlan> = make_plan(&ctx, &c2c(), &target).unwrap();
    assert_eq!(plan.backend(), BackendId::Reference);
}

#[test]
fn every_attempt_is_reported() {
    init_logging();
    let ctx: Context = mock_context(1);
    let registry: Registry = Registry::default().with::<Refusing>();

    let err: FftError = make_plan_with(&registry, &ctx, &c2c(), &TargetParameters::gpu(&[0])).unwrap_err();
    let FftError::PlanCreation(feedback) = err else {
        panic!("expected plan creation failure, got {err:?}");
    };
    let backends: Vec<BackendId> = feedback.iter().map(|fb| fb.backend).collect();
    assert_eq!(
        backends,
        vec![
            BackendId::Cufft,
            BackendId::Vkfft,
            BackendId::Rocfft,
            BackendId::Hipfft,
            BackendId::Clfft
        ]
    );
    assert_eq!(feedback[0].message, "backend is not registered");
    assert!(feedback[4].message.contains("refusing engine never builds plans"));
}

#[test]
fn registered_gpu_engine_is_selected() {
    let ctx: Context = mock_context(2);
    let registry: Registry = Registry::default().with::<Recording>().with::<Refusing>();
    let plan: Arc<dyn AnyPlan> = make_plan_with(&registry, &ctx, &c2c(), &TargetParameters::gpu(&[1])).unwrap();
    assert_eq!(plan.backend(), BackendId::Vkfft);
    assert_eq!(plan.desc().execution_mode(), ExecutionMode::GpuSpst);
    assert_eq!(plan.workspace_size(), vec![0]);
}

#[test]
fn mask_limits_the_candidates() {
    let ctx: Context = Context::new();
    let target: TargetParameters = TargetParameters::cpu().with_backend(BackendParameters {
        strategy: SelectStrategy::First,
        mask: BackendId::Mkl.into(),
        order: vec![BackendId::RustFft, BackendId::Reference],
    });
    assert_eq!(
        make_plan(&ctx, &c2c(), &target).unwrap_err(),
        FftError::PlanCreation(vec![Feedback {
            backend: BackendId::Mkl,
            message: "backend is not registered".into(),
        }])
    );
}

#[test]
fn best_strategy_is_not_available() {
    let ctx: Context = Context::new();
    let mut backend: BackendParameters = BackendParameters::default_for(ExecutionMode::CpuSpst);
    backend.strategy = SelectStrategy::Best;
    let err: FftError = make_plan(&ctx, &c2c(), &TargetParameters::cpu().with_backend(backend)).unwrap_err();
    let FftError::PlanCreation(feedback) = err else {
        panic!("expected plan creation failure, got {err:?}");
    };
    assert_eq!(feedback.len(), 4);
    assert!(feedback.iter().all(|fb| fb.message.contains("best")));
}

#[test]
fn descriptor_errors_are_not_wrapped() {
    let ctx: Context = Context::new();
    let bad: TransformParameters = TransformParameters::dft(&[8], &[1], DftType::C2C);
    assert!(matches!(
        make_plan(&ctx, &bad, &TargetParameters::cpu()).unwrap_err(),
        FftError::InvalidArgument(_)
    ));
}

#[test]
fn cached_plans_are_reused() {
    let ctx: Context = Context::new();
    let registry: Registry = Registry::default();
    let mut cache: PlanCache = PlanCache::new();

    let first: Arc<dyn AnyPlan> =
        make_plan_cached(&mut cache, &registry, &ctx, &c2c(), &TargetParameters::cpu()).unwrap();
    let second: Arc<dyn AnyPlan> =
        make_plan_cached(&mut cache, &registry, &ctx, &c2c(), &TargetParameters::cpu()).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);

    let r2c: TransformParameters = TransformParameters::dft(&[8], &[0], DftType::R2C);
    make_plan_cached(&mut cache, &registry, &ctx, &r2c, &TargetParameters::cpu()).unwrap();
    assert_eq!(cache.len(), 2);
}
