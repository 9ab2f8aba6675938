use sampling::Source;

use crate::{
    api::{PlanExecute, PlanNew},
    common::{Direction, Normalization},
    layouts::{Backend, Context, Desc, DttType, Plan, TargetParameters, TransformParameters},
    reference::dtt::dtt,
    test_suite::{assert_close, random_real},
};

pub fn test_dtt_matches_reference<B: Backend>(ctx: &Context)
where
    Plan<B>: PlanNew<B>,
{
    let mut source: Source = Source::new([0u8; 32]);
    let shape: [usize; 2] = [4, 5];
    let axes: [usize; 2] = [0, 1];
    for types in [
        [DttType::Dct2, DttType::Dst4],
        [DttType::Dct1, DttType::Dst1],
        [DttType::Dst3, DttType::Dct3],
    ] {
        let transform: TransformParameters = TransformParameters::dtt(&shape, &axes, &types);
        let desc: Desc = Desc::new(ctx, &transform, &TargetParameters::cpu()).unwrap();
        let plan: Plan<B> = Plan::<B>::new(ctx, desc).unwrap();

        let src: Vec<f64> = random_real(20, &mut source);
        let mut dst: Vec<f64> = vec![0.0; 20];
        plan.execute_preserving(&src, &mut dst[..]).unwrap();

        let mut want: Vec<f64> = src.clone();
        dtt(&shape, &axes, &types, Direction::Forward, &mut want);
        assert_close(&dst, &want, 1e-9);
    }
}

/// Forward, then inverse with unitary scaling, recovers the input for every kind.
pub fn test_dtt_roundtrip_each_kind<B: Backend>(ctx: &Context)
where
    Plan<B>: PlanNew<B>,
{
    let mut source: Source = Source::new([0u8; 32]);
    let shape: [usize; 2] = [3, 6];
    for ty in DttType::ALL {
        // one type broadcast over both axes
        let forward: TransformParameters = TransformParameters::dtt(&shape, &[0, 1], &[ty]);
        let inverse: TransformParameters = forward
            .clone()
            .direction(Direction::Inverse)
            .normalization(Normalization::Unitary);

        let target: TargetParameters = TargetParameters::cpu();
        let forward: Plan<B> = Plan::<B>::new(ctx, Desc::new(ctx, &forward, &target).unwrap()).unwrap();
        let inverse: Plan<B> = Plan::<B>::new(ctx, Desc::new(ctx, &inverse, &target).unwrap()).unwrap();

        let src: Vec<f64> = random_real(18, &mut source);
        let mut mid: Vec<f64> = vec![0.0; 18];
        let mut back: Vec<f64> = vec![0.0; 18];
        forward.execute_preserving(&src, &mut mid[..]).unwrap();
        inverse.execute_preserving(&mid, &mut back[..]).unwrap();
        assert_close(&back, &src, 1e-10);
    }
}
