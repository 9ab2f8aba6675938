use num_complex::Complex;
use sampling::Source;

use crate::{
    api::{PlanExecute, PlanNew, PlanWorkspaceSize},
    common::{Direction, Normalization, Placement},
    layouts::{
        Backend, Context, Desc, DftFormat, DftType, Planar, Plan, PrecisionTriad, TargetParameters, TransformParameters,
    },
    reference::{
        dft::{dft_c2c, dft_r2c, half_shape},
        strided::gather,
    },
    test_suite::{assert_close, assert_complex_close, random_complex, random_real, split},
    types::Precision,
};

fn build<B: Backend>(ctx: &Context, transform: &TransformParameters, target: &TargetParameters) -> Plan<B>
where
    Plan<B>: PlanNew<B>,
{
    let desc: Desc = Desc::new(ctx, transform, target).unwrap();
    Plan::<B>::new(ctx, desc).unwrap()
}

pub fn test_dft_c2c_matches_reference<B: Backend>(ctx: &Context)
where
    Plan<B>: PlanNew<B>,
{
    let mut source: Source = Source::new([0u8; 32]);
    for (shape, axes) in [
        (vec![16], vec![0]),
        (vec![4, 6], vec![0, 1]),
        (vec![3, 5, 2], vec![2, 0]),
        (vec![2, 3, 4, 5], vec![1, 3]),
    ] {
        let len: usize = shape.iter().product();
        let transform: TransformParameters = TransformParameters::dft(&shape, &axes, DftType::C2C);
        let plan: Plan<B> = build(ctx, &transform, &TargetParameters::cpu());

        let src: Vec<Complex<f64>> = random_complex(len, &mut source);
        let mut dst: Vec<Complex<f64>> = vec![Complex::default(); len];
        plan.execute_preserving(&src, &mut dst[..]).unwrap();

        let (mut re, mut im) = split(&src);
        dft_c2c(&shape, &axes, Direction::Forward, &mut re, &mut im);
        assert_complex_close(&dst, &re, &im, 1e-9);
    }
}

pub fn test_dft_c2c_roundtrip_unitary<B: Backend>(ctx: &Context)
where
    Plan<B>: PlanNew<B>,
{
    let mut source: Source = Source::new([0u8; 32]);
    let shape: [usize; 3] = [3, 5, 4];
    let axes: [usize; 2] = [2, 0];
    let len: usize = shape.iter().product();

    let forward: Plan<B> = build(ctx, &TransformParameters::dft(&shape, &axes, DftType::C2C), &TargetParameters::cpu());
    let inverse: Plan<B> = build(
        ctx,
        &TransformParameters::dft(&shape, &axes, DftType::C2C)
            .direction(Direction::Inverse)
            .normalization(Normalization::Unitary),
        &TargetParameters::cpu(),
    );

    let src: Vec<Complex<f64>> = random_complex(len, &mut source);
    let mut spectrum: Vec<Complex<f64>> = vec![Complex::default(); len];
    let mut back: Vec<Complex<f64>> = vec![Complex::default(); len];
    forward.execute_preserving(&src, &mut spectrum[..]).unwrap();
    inverse.execute_preserving(&spectrum, &mut back[..]).unwrap();

    let (re, im) = split(&src);
    assert_complex_close(&back, &re, &im, 1e-10);
}

/// Parseval: an orthogonal forward transform preserves the energy.
pub fn test_dft_orthogonal_preserves_energy<B: Backend>(ctx: &Context)
where
    Plan<B>: PlanNew<B>,
{
    let mut source: Source = Source::new([0u8; 32]);
    let shape: [usize; 2] = [6, 10];
    let len: usize = shape.iter().product();
    let plan: Plan<B> = build(
        ctx,
        &TransformParameters::dft(&shape, &[0, 1], DftType::C2C).normalization(Normalization::Orthogonal),
        &TargetParameters::cpu(),
    );

    let src: Vec<Complex<f64>> = random_complex(len, &mut source);
    let mut dst: Vec<Complex<f64>> = vec![Complex::default(); len];
    plan.execute_preserving(&src, &mut dst[..]).unwrap();

    let energy = |v: &[Complex<f64>]| -> f64 { v.iter().map(|c| c.norm_sqr()).sum() };
    assert!((energy(&src[..]) - energy(&dst[..])).abs() < 1e-9);
}

pub fn test_dft_c2c_inplace<B: Backend>(ctx: &Context)
where
    Plan<B>: PlanNew<B>,
{
    let mut source: Source = Source::new([0u8; 32]);
    let shape: [usize; 2] = [5, 8];
    let len: usize = shape.iter().product();
    let plan: Plan<B> = build(
        ctx,
        &TransformParameters::dft(&shape, &[1, 0], DftType::C2C).placement(Placement::InPlace),
        &TargetParameters::cpu(),
    );

    let mut data: Vec<Complex<f64>> = random_complex(len, &mut source);
    let (mut re, mut im) = split(&data);
    plan.execute_inplace(&mut data[..]).unwrap();

    dft_c2c(&shape, &[1, 0], Direction::Forward, &mut re, &mut im);
    assert_complex_close(&data, &re, &im, 1e-9);
}

pub fn test_dft_c2c_strided<B: Backend>(ctx: &Context)
where
    Plan<B>: PlanNew<B>,
{
    let mut source: Source = Source::new([0u8; 32]);
    let shape: [usize; 2] = [3, 4];
    // padded rows on the source, column-major destination
    let src_strides: [usize; 2] = [5, 1];
    let dst_strides: [usize; 2] = [1, 3];
    let plan: Plan<B> = build(
        ctx,
        &TransformParameters::dft(&shape, &[0, 1], DftType::C2C),
        &TargetParameters::cpu().strides(&src_strides, &dst_strides),
    );

    let src: Vec<Complex<f64>> = random_complex(15, &mut source);
    let mut dst: Vec<Complex<f64>> = vec![Complex::default(); 12];
    plan.execute_preserving(&src, &mut dst[..]).unwrap();

    let mut dense: Vec<Complex<f64>> = vec![Complex::default(); 12];
    unsafe { gather(src.as_ptr(), &shape, &src_strides, &mut dense) };
    let (mut re, mut im) = split(&dense);
    dft_c2c(&shape, &[0, 1], Direction::Forward, &mut re, &mut im);

    for i in 0..3 {
        for j in 0..4 {
            let got: Complex<f64> = dst[i * dst_strides[0] + j * dst_strides[1]];
            assert!((got.re - re[i * 4 + j]).abs() < 1e-9);
            assert!((got.im - im[i * 4 + j]).abs() < 1e-9);
        }
    }
}

pub fn test_dft_r2c_c2r_roundtrip<B: Backend>(ctx: &Context)
where
    Plan<B>: PlanNew<B>,
{
    let mut source: Source = Source::new([0u8; 32]);
    for (shape, axes) in [(vec![9], vec![0]), (vec![4, 6], vec![0, 1]), (vec![3, 4, 5], vec![0, 2])] {
        let len: usize = shape.iter().product();
        let reduced: usize = axes[axes.len() - 1];
        let half_len: usize = half_shape(&shape, reduced).iter().product();

        let r2c: Plan<B> = build(ctx, &TransformParameters::dft(&shape, &axes, DftType::R2C), &TargetParameters::cpu());
        let c2r: Plan<B> = build(
            ctx,
            &TransformParameters::dft(&shape, &axes, DftType::C2R)
                .direction(Direction::Inverse)
                .normalization(Normalization::Unitary),
            &TargetParameters::cpu(),
        );

        let src: Vec<f64> = random_real(len, &mut source);
        let mut spectrum: Vec<Complex<f64>> = vec![Complex::default(); half_len];
        r2c.execute_preserving(&src, &mut spectrum[..]).unwrap();

        let mut re: Vec<f64> = vec![0.0; half_len];
        let mut im: Vec<f64> = vec![0.0; half_len];
        dft_r2c(&shape, &axes, &src, &mut re, &mut im);
        assert_complex_close(&spectrum, &re, &im, 1e-9);

        let mut back: Vec<f64> = vec![0.0; len];
        c2r.execute_preserving(&spectrum, &mut back[..]).unwrap();
        assert_close(&back, &src, 1e-10);
    }
}

/// Real data padded to `2 * (e/2 + 1)` along the reduced axis, transformed in place.
pub fn test_dft_r2c_inplace<B: Backend>(ctx: &Context)
where
    Plan<B>: PlanNew<B>,
{
    let mut source: Source = Source::new([0u8; 32]);
    let shape: [usize; 2] = [4, 6];
    let plan: Plan<B> = build(
        ctx,
        &TransformParameters::dft(&shape, &[0, 1], DftType::R2C).placement(Placement::InPlace),
        &TargetParameters::cpu(),
    );
    assert_eq!(plan.desc().dims().src_strides(), &[8, 1]);
    assert_eq!(plan.desc().dims().dst_strides(), &[4, 1]);

    let src: Vec<f64> = random_real(24, &mut source);
    let mut data: Vec<f64> = vec![0.0; 32];
    for i in 0..4 {
        data[i * 8..i * 8 + 6].copy_from_slice(&src[i * 6..i * 6 + 6]);
    }
    plan.execute_inplace(&mut data[..]).unwrap();

    let mut re: Vec<f64> = vec![0.0; 16];
    let mut im: Vec<f64> = vec![0.0; 16];
    dft_r2c(&shape, &[0, 1], &src, &mut re, &mut im);
    let got_re: Vec<f64> = data.iter().step_by(2).copied().collect();
    let got_im: Vec<f64> = data.iter().skip(1).step_by(2).copied().collect();
    assert_close(&got_re, &re, 1e-9);
    assert_close(&got_im, &im, 1e-9);
}

pub fn test_dft_planar<B: Backend>(ctx: &Context)
where
    Plan<B>: PlanNew<B>,
{
    let mut source: Source = Source::new([0u8; 32]);
    let shape: [usize; 2] = [6, 5];
    let plan: Plan<B> = build(
        ctx,
        &TransformParameters::dft_formats(&shape, &[0, 1], DftFormat::ComplexPlanar, DftFormat::ComplexPlanar),
        &TargetParameters::cpu(),
    );

    let mut src_re: Vec<f64> = random_real(30, &mut source);
    let mut src_im: Vec<f64> = random_real(30, &mut source);
    let (mut re, mut im) = (src_re.clone(), src_im.clone());
    let mut dst_re: Vec<f64> = vec![0.0; 30];
    let mut dst_im: Vec<f64> = vec![0.0; 30];
    plan.execute(
        Planar::new(&mut src_re, &mut src_im),
        Planar::new(&mut dst_re, &mut dst_im),
    )
    .unwrap();

    dft_c2c(&shape, &[0, 1], Direction::Forward, &mut re, &mut im);
    assert_close(&dst_re, &re, 1e-9);
    assert_close(&dst_im, &im, 1e-9);
}

pub fn test_dft_f32<B: Backend>(ctx: &Context)
where
    Plan<B>: PlanNew<B>,
{
    let mut source: Source = Source::new([0u8; 32]);
    let shape: [usize; 1] = [32];
    let plan: Plan<B> = build(
        ctx,
        &TransformParameters::dft(&shape, &[0], DftType::C2C).precision(PrecisionTriad::uniform(Precision::F32)),
        &TargetParameters::cpu(),
    );

    let src: Vec<Complex<f64>> = random_complex(32, &mut source);
    let src_f32: Vec<Complex<f32>> = src.iter().map(|c| Complex::new(c.re as f32, c.im as f32)).collect();
    let mut dst: Vec<Complex<f32>> = vec![Complex::default(); 32];
    plan.execute_preserving(&src_f32, &mut dst[..]).unwrap();

    let (mut re, mut im) = split(&src);
    dft_c2c(&shape, &[0], Direction::Forward, &mut re, &mut im);
    let widened: Vec<Complex<f64>> = dst.iter().map(|c| Complex::new(c.re as f64, c.im as f64)).collect();
    assert_complex_close(&widened, &re, &im, 1e-4);
}

pub fn test_dft_workspace_size<B: Backend>(ctx: &Context)
where
    Plan<B>: PlanNew<B> + PlanWorkspaceSize,
{
    let plan: Plan<B> = build(ctx, &TransformParameters::dft(&[8, 8], &[0, 1], DftType::C2C), &TargetParameters::cpu());
    assert_eq!(plan.workspace_size().len(), plan.desc().target_count());
}
