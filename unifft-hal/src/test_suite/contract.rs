//! Execute-time validation, identical for every engine because it runs before
//! any engine code.

use num_complex::Complex;

use crate::{
    api::{PlanExecute, PlanExecuteUnsafe, PlanNew},
    common::{ExecutionMode, Placement},
    error::{BufferSide, FftError},
    layouts::{
        Backend, Context, Desc, DftType, ExecutionParameters, Planar, Plan, TargetParameters, TransformParameters,
    },
    types::{Complexity, Precision, TypeInfo},
};

fn c2c_plan<B: Backend>(ctx: &Context, target: TargetParameters) -> Plan<B>
where
    Plan<B>: PlanNew<B>,
{
    let transform: TransformParameters = TransformParameters::dft(&[8], &[0], DftType::C2C);
    Plan::<B>::new(ctx, Desc::new(ctx, &transform, &target).unwrap()).unwrap()
}

pub fn test_contract_buffer_count<B: Backend>(ctx: &Context)
where
    Plan<B>: PlanNew<B>,
{
    let plan: Plan<B> = c2c_plan(ctx, TargetParameters::cpu());
    let mut a: Vec<Complex<f64>> = vec![Complex::default(); 8];
    let mut b: Vec<Complex<f64>> = vec![Complex::default(); 8];
    let pa: *mut u8 = a.as_mut_ptr() as *mut u8;
    let pb: *mut u8 = b.as_mut_ptr() as *mut u8;

    let err: FftError = unsafe { plan.execute_unsafe(&[pa, pa], &[pb], None) }.unwrap_err();
    assert_eq!(
        err,
        FftError::BufferCount {
            side: BufferSide::Source,
            expected: 1,
            actual: 2
        }
    );

    // the count is checked before null pointers
    let err: FftError = unsafe { plan.execute_unsafe(&[pa], &[], None) }.unwrap_err();
    assert!(matches!(
        err,
        FftError::BufferCount {
            side: BufferSide::Destination,
            ..
        }
    ));
}

pub fn test_contract_placement<B: Backend>(ctx: &Context)
where
    Plan<B>: PlanNew<B>,
{
    let plan: Plan<B> = c2c_plan(ctx, TargetParameters::cpu());
    let mut a: Vec<Complex<f64>> = vec![Complex::default(); 8];
    let pa: *mut u8 = a.as_mut_ptr() as *mut u8;

    let err: FftError = unsafe { plan.execute_unsafe(&[pa], &[pa], None) }.unwrap_err();
    assert_eq!(
        err,
        FftError::PlacementMismatch {
            declared: Placement::OutOfPlace,
            inferred: Placement::InPlace
        }
    );
    assert!(err.is_contract_error());
}

pub fn test_contract_null_destination<B: Backend>(ctx: &Context)
where
    Plan<B>: PlanNew<B>,
{
    let plan: Plan<B> = c2c_plan(ctx, TargetParameters::cpu());
    let mut a: Vec<Complex<f64>> = vec![Complex::default(); 8];
    let pa: *mut u8 = a.as_mut_ptr() as *mut u8;

    let err: FftError = unsafe { plan.execute_unsafe(&[pa], &[std::ptr::null_mut()], None) }.unwrap_err();
    assert_eq!(
        err,
        FftError::NullBuffer {
            side: BufferSide::Destination,
            index: 0
        }
    );
}

pub fn test_contract_types<B: Backend>(ctx: &Context)
where
    Plan<B>: PlanNew<B>,
{
    let plan: Plan<B> = c2c_plan(ctx, TargetParameters::cpu());
    let mut narrow: Vec<Complex<f32>> = vec![Complex::default(); 8];
    let mut real: Vec<f64> = vec![0.0; 16];
    let mut dst: Vec<Complex<f64>> = vec![Complex::default(); 8];

    let err: FftError = plan.execute(&mut narrow[..], &mut dst[..]).unwrap_err();
    assert_eq!(
        err,
        FftError::TypeMismatch {
            side: BufferSide::Source,
            expected: TypeInfo::new(Precision::F64, Complexity::Complex),
            actual: TypeInfo::new(Precision::F32, Complexity::Complex),
        }
    );

    let err: FftError = plan.execute(&mut dst[..], &mut real[..]).unwrap_err();
    assert!(matches!(
        err,
        FftError::TypeMismatch {
            side: BufferSide::Destination,
            ..
        }
    ));

    // planar buffers on an interleaved plan
    let mut re: Vec<f64> = vec![0.0; 8];
    let mut im: Vec<f64> = vec![0.0; 8];
    let err: FftError = plan.execute(Planar::new(&mut re, &mut im), &mut dst[..]).unwrap_err();
    assert_eq!(
        err,
        FftError::LayoutMismatch {
            side: BufferSide::Source,
            index: 0,
            planar: false
        }
    );
}

pub fn test_contract_capacity<B: Backend>(ctx: &Context)
where
    Plan<B>: PlanNew<B>,
{
    let plan: Plan<B> = c2c_plan(ctx, TargetParameters::cpu());
    let src: Vec<Complex<f64>> = vec![Complex::default(); 8];
    let mut short: Vec<Complex<f64>> = vec![Complex::default(); 4];

    let err: FftError = plan.execute_preserving(&src, &mut short[..]).unwrap_err();
    assert_eq!(
        err,
        FftError::BufferTooSmall {
            side: BufferSide::Destination,
            index: 0,
            required: 128,
            actual: 64
        }
    );
}

pub fn test_contract_execution_parameters<B: Backend>(ctx: &Context)
where
    Plan<B>: PlanNew<B>,
{
    let plan: Plan<B> = c2c_plan(ctx, TargetParameters::cpu());
    let mut src: Vec<Complex<f64>> = vec![Complex::default(); 8];
    let mut dst: Vec<Complex<f64>> = vec![Complex::default(); 8];

    let gpu: ExecutionParameters = ExecutionParameters::default_for(ExecutionMode::GpuSpst);
    let err: FftError = plan.execute_with(&mut src[..], &mut dst[..], &gpu).unwrap_err();
    assert_eq!(
        err,
        FftError::ExecutionParamsMismatch {
            expected: ExecutionMode::CpuSpst,
            actual: ExecutionMode::GpuSpst
        }
    );

    plan.execute_with(&mut src[..], &mut dst[..], &ExecutionParameters::CpuSpst)
        .unwrap();
}

pub fn test_contract_preservation<B: Backend>(ctx: &Context)
where
    Plan<B>: PlanNew<B>,
{
    let plan: Plan<B> = c2c_plan(ctx, TargetParameters::cpu().preserving_source(false));
    let src: Vec<Complex<f64>> = vec![Complex::default(); 8];
    let mut dst: Vec<Complex<f64>> = vec![Complex::default(); 8];

    let err: FftError = plan.execute_preserving(&src, &mut dst[..]).unwrap_err();
    assert_eq!(err, FftError::PreservationViolated);

    // a mutable source is fine
    let mut src: Vec<Complex<f64>> = src;
    plan.execute(&mut src[..], &mut dst[..]).unwrap();
}
