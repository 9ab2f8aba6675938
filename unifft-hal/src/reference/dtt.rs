//! Direct-sum discrete trigonometric transforms.
//!
//! Unnormalized, with the usual REDFT/RODFT scaling: applying a kind and then
//! [`DttType::inverse`] of it scales each axis by
//! [`DttType::logical_extent`].

use crate::{common::Direction, layouts::DttType, reference::strided::map_lines, types::Scalar};

/// `cos(pi * num / den)`, reduced over one period first.
#[inline(always)]
fn cos_pi<T: Scalar>(num: usize, den: usize) -> T {
    (T::PI() * T::from_len(num % (2 * den)) / T::from_len(den)).cos()
}

#[inline(always)]
fn sin_pi<T: Scalar>(num: usize, den: usize) -> T {
    (T::PI() * T::from_len(num % (2 * den)) / T::from_len(den)).sin()
}

#[inline(always)]
fn alternating<T: Scalar>(k: usize, x: T) -> T {
    if k % 2 == 0 { x } else { -x }
}

pub fn dtt_line<T: Scalar>(ty: DttType, x: &[T], out: &mut [T]) {
    let n: usize = x.len();
    let two: T = T::one() + T::one();
    for (k, y) in out.iter_mut().enumerate() {
        *y = match ty {
            DttType::Dct1 => {
                let inner: T = (1..n - 1).fold(T::zero(), |acc, j| acc + x[j] * cos_pi::<T>(j * k, n - 1));
                x[0] + alternating(k, x[n - 1]) + two * inner
            }
            DttType::Dct2 => two * (0..n).fold(T::zero(), |acc, j| acc + x[j] * cos_pi::<T>((2 * j + 1) * k, 2 * n)),
            DttType::Dct3 => {
                let inner: T = (1..n).fold(T::zero(), |acc, j| acc + x[j] * cos_pi::<T>(j * (2 * k + 1), 2 * n));
                x[0] + two * inner
            }
            DttType::Dct4 => {
                two * (0..n).fold(T::zero(), |acc, j| {
                    acc + x[j] * cos_pi::<T>((2 * j + 1) * (2 * k + 1), 4 * n)
                })
            }
            DttType::Dst1 => two * (0..n).fold(T::zero(), |acc, j| acc + x[j] * sin_pi::<T>((j + 1) * (k + 1), n + 1)),
            DttType::Dst2 => {
                two * (0..n).fold(T::zero(), |acc, j| {
                    acc + x[j] * sin_pi::<T>((2 * j + 1) * (k + 1), 2 * n)
                })
            }
            DttType::Dst3 => {
                let inner: T = (0..n - 1).fold(T::zero(), |acc, j| {
                    acc + x[j] * sin_pi::<T>((j + 1) * (2 * k + 1), 2 * n)
                });
                alternating(k, x[n - 1]) + two * inner
            }
            DttType::Dst4 => {
                two * (0..n).fold(T::zero(), |acc, j| {
                    acc + x[j] * sin_pi::<T>((2 * j + 1) * (2 * k + 1), 4 * n)
                })
            }
        };
    }
}

/// Applies `types[i]` along `axes[i]` of a dense array, or its inverse kind
/// for an inverse-direction transform.
pub fn dtt<T: Scalar>(shape: &[usize], axes: &[usize], types: &[DttType], direction: Direction, data: &mut [T]) {
    for (&axis, &ty) in axes.iter().zip(types.iter()) {
        let ty: DttType = match direction {
            Direction::Forward => ty,
            Direction::Inverse => ty.inverse(),
        };
        map_lines(shape, axis, data, |line, out| dtt_line(ty, line, out));
    }
}

#[cfg(test)]
mod tests {
    use super::{dtt, dtt_line};
    use crate::{common::Direction, layouts::DttType};

    #[test]
    fn every_kind_inverts_up_to_its_logical_extent() {
        let x: Vec<f64> = vec![0.5, -1.25, 2.0, 0.75, -0.3];
        for ty in DttType::ALL {
            let mut y: Vec<f64> = vec![0.0; x.len()];
            let mut z: Vec<f64> = vec![0.0; x.len()];
            dtt_line(ty, &x, &mut y);
            dtt_line(ty.inverse(), &y, &mut z);
            let scale: f64 = ty.logical_extent(x.len()) as f64;
            for (a, b) in x.iter().zip(z.iter()) {
                assert!((a * scale - b).abs() < 1e-9, "{ty:?}: {a} * {scale} != {b}");
            }
        }
    }

    #[test]
    fn dct2_of_constant_is_dc_only() {
        let x: [f64; 4] = [1.0; 4];
        let mut y: [f64; 4] = [0.0; 4];
        dtt_line(DttType::Dct2, &x, &mut y);
        assert!((y[0] - 8.0).abs() < 1e-12);
        assert!(y[1..].iter().all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn inverse_direction_uses_inverse_kind() {
        let shape: [usize; 2] = [3, 4];
        let src: Vec<f64> = (0..12).map(|i| (i as f64).cos()).collect();
        let mut data: Vec<f64> = src.clone();
        let types: [DttType; 2] = [DttType::Dct2, DttType::Dst2];
        dtt(&shape, &[0, 1], &types, Direction::Forward, &mut data);
        dtt(&shape, &[0, 1], &types, Direction::Inverse, &mut data);
        let scale: f64 = (2 * 3 * 2 * 4) as f64;
        for (a, b) in src.iter().zip(data.iter()) {
            assert!((a * scale - b).abs() < 1e-9);
        }
    }
}
