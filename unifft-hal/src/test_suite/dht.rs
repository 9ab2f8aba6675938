use sampling::Source;

use crate::{
    api::{PlanExecute, PlanNew},
    common::{Direction, Normalization, Placement},
    layouts::{Backend, Context, Desc, Plan, TargetParameters, TransformParameters},
    reference::dht::dht_separable,
    test_suite::{assert_close, random_real},
};

pub fn test_dht_matches_reference<B: Backend>(ctx: &Context)
where
    Plan<B>: PlanNew<B>,
{
    let mut source: Source = Source::new([0u8; 32]);
    let shape: [usize; 3] = [4, 3, 5];
    let axes: [usize; 2] = [2, 0];
    let transform: TransformParameters = TransformParameters::dht(&shape, &axes);
    let desc: Desc = Desc::new(ctx, &transform, &TargetParameters::cpu()).unwrap();
    let plan: Plan<B> = Plan::<B>::new(ctx, desc).unwrap();

    let src: Vec<f64> = random_real(60, &mut source);
    let mut dst: Vec<f64> = vec![0.0; 60];
    plan.execute_preserving(&src, &mut dst[..]).unwrap();

    let mut want: Vec<f64> = src.clone();
    dht_separable(&shape, &axes, &mut want);
    assert_close(&dst, &want, 1e-9);
}

/// The Hartley transform is its own inverse up to the unitary factor.
pub fn test_dht_inplace_roundtrip<B: Backend>(ctx: &Context)
where
    Plan<B>: PlanNew<B>,
{
    let mut source: Source = Source::new([0u8; 32]);
    let shape: [usize; 2] = [6, 7];
    let forward: TransformParameters = TransformParameters::dht(&shape, &[0, 1]).placement(Placement::InPlace);
    let inverse: TransformParameters = forward
        .clone()
        .direction(Direction::Inverse)
        .normalization(Normalization::Unitary);

    let target: TargetParameters = TargetParameters::cpu();
    let forward: Plan<B> = Plan::<B>::new(ctx, Desc::new(ctx, &forward, &target).unwrap()).unwrap();
    let inverse: Plan<B> = Plan::<B>::new(ctx, Desc::new(ctx, &inverse, &target).unwrap()).unwrap();

    let src: Vec<f64> = random_real(42, &mut source);
    let mut data: Vec<f64> = src.clone();
    forward.execute_inplace(&mut data[..]).unwrap();
    inverse.execute_inplace(&mut data[..]).unwrap();
    assert_close(&data, &src, 1e-10);
}
