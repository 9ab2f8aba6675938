use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use sampling::Source;

use crate::{
    api::{PlanExecute, PlanNew},
    layouts::{Backend, Context, Desc, DttType, Plan, TargetParameters, TransformParameters},
    test_suite::random_real,
};

fn plan<B: Backend>(ctx: &Context, transform: &TransformParameters) -> Plan<B>
where
    Plan<B>: PlanNew<B>,
{
    let desc: Desc = match Desc::new(ctx, transform, &TargetParameters::cpu()) {
        Ok(desc) => desc,
        Err(err) => panic!("benchmark descriptor: {err}"),
    };
    match Plan::<B>::new(ctx, desc) {
        Ok(plan) => plan,
        Err(err) => panic!("benchmark plan: {err}"),
    }
}

fn run<B: Backend>(ctx: &Context, transform: TransformParameters) -> impl FnMut()
where
    Plan<B>: PlanNew<B>,
{
    let plan: Plan<B> = plan(ctx, &transform);
    let len: usize = transform.shape.iter().product();

    let mut source: Source = Source::new([0u8; 32]);
    let mut src: Vec<f64> = random_real(len, &mut source);
    let mut dst: Vec<f64> = vec![0f64; len];

    move || {
        let res = plan.execute(&mut src[..], &mut dst[..]);
        black_box(res).ok();
    }
}

pub fn bench_dht<B>(c: &mut Criterion, label: &str)
where
    Plan<B>: PlanNew<B>,
    B: Backend,
{
    let mut group = c.benchmark_group(format!("dht::{label}"));

    let ctx: Context = Context::new();
    for n in [16, 32, 64] {
        let id: BenchmarkId = BenchmarkId::from_parameter(n);
        let mut runner = run::<B>(&ctx, TransformParameters::dht(&[n, n], &[0, 1]));
        group.bench_with_input(id, &(), |b, _| b.iter(&mut runner));
    }

    group.finish();
}

pub fn bench_dct2<B>(c: &mut Criterion, label: &str)
where
    Plan<B>: PlanNew<B>,
    B: Backend,
{
    let mut group = c.benchmark_group(format!("dct2::{label}"));

    let ctx: Context = Context::new();
    for n in [16, 32, 64] {
        let id: BenchmarkId = BenchmarkId::from_parameter(n);
        let mut runner = run::<B>(&ctx, TransformParameters::dtt(&[n, n], &[0, 1], &[DttType::Dct2]));
        group.bench_with_input(id, &(), |b, _| b.iter(&mut runner));
    }

    group.finish();
}
