use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use num_complex::Complex;
use sampling::Source;

use crate::{
    api::{PlanExecute, PlanNew},
    layouts::{Backend, Context, Desc, DftType, Plan, TargetParameters, TransformParameters},
    test_suite::{random_complex, random_real},
};

fn plan<B: Backend>(ctx: &Context, shape: &[usize], ty: DftType) -> Plan<B>
where
    Plan<B>: PlanNew<B>,
{
    let axes: Vec<usize> = (0..shape.len()).collect();
    let transform: TransformParameters = TransformParameters::dft(shape, &axes, ty);
    let desc: Desc = match Desc::new(ctx, &transform, &TargetParameters::cpu()) {
        Ok(desc) => desc,
        Err(err) => panic!("benchmark descriptor for {shape:?}: {err}"),
    };
    match Plan::<B>::new(ctx, desc) {
        Ok(plan) => plan,
        Err(err) => panic!("benchmark plan for {shape:?}: {err}"),
    }
}

pub fn bench_dft_c2c<B>(c: &mut Criterion, label: &str)
where
    Plan<B>: PlanNew<B>,
    B: Backend,
{
    let group_name: String = format!("dft_c2c::{label}");

    let mut group = c.benchmark_group(group_name);

    fn runner<B>(ctx: &Context, shape: &[usize]) -> impl FnMut()
    where
        Plan<B>: PlanNew<B>,
        B: Backend,
    {
        let plan: Plan<B> = plan(ctx, shape, DftType::C2C);
        let len: usize = shape.iter().product();

        let mut source: Source = Source::new([0u8; 32]);
        let mut src: Vec<Complex<f64>> = random_complex(len, &mut source);
        let mut dst: Vec<Complex<f64>> = vec![Complex::default(); len];

        move || {
            let res = plan.execute(&mut src[..], &mut dst[..]);
            black_box(res).ok();
        }
    }

    let ctx: Context = Context::new();
    for shape in [vec![64], vec![1024], vec![4096], vec![32, 32], vec![16, 16, 16]] {
        let id: BenchmarkId = BenchmarkId::from_parameter(format!("{shape:?}"));
        let mut runner = runner::<B>(&ctx, &shape);
        group.bench_with_input(id, &(), |b, _| b.iter(&mut runner));
    }

    group.finish();
}

pub fn bench_dft_r2c<B>(c: &mut Criterion, label: &str)
where
    Plan<B>: PlanNew<B>,
    B: Backend,
{
    let group_name: String = format!("dft_r2c::{label}");

    let mut group = c.benchmark_group(group_name);

    fn runner<B>(ctx: &Context, shape: &[usize]) -> impl FnMut()
    where
        Plan<B>: PlanNew<B>,
        B: Backend,
    {
        let plan: Plan<B> = plan(ctx, shape, DftType::R2C);
        let len: usize = shape.iter().product();
        let half: usize = len / shape[shape.len() - 1] * (shape[shape.len() - 1] / 2 + 1);

        let mut source: Source = Source::new([0u8; 32]);
        let mut src: Vec<f64> = random_real(len, &mut source);
        let mut dst: Vec<Complex<f64>> = vec![Complex::default(); half];

        move || {
            let res = plan.execute(&mut src[..], &mut dst[..]);
            black_box(res).ok();
        }
    }

    let ctx: Context = Context::new();
    for shape in [vec![64], vec![1024], vec![4096], vec![32, 32]] {
        let id: BenchmarkId = BenchmarkId::from_parameter(format!("{shape:?}"));
        let mut runner = runner::<B>(&ctx, &shape);
        group.bench_with_input(id, &(), |b, _| b.iter(&mut runner));
    }

    group.finish();
}
