use crate::{reference::strided::map_lines, types::Scalar};

/// `H[k] = sum_j x[j] * cas(2*pi*jk/n)` with `cas = cos + sin`.
pub fn dht_line<T: Scalar>(x: &[T], out: &mut [T]) {
    let n: usize = x.len();
    let two_pi: T = T::PI() + T::PI();
    for (k, h) in out.iter_mut().enumerate() {
        *h = x.iter().enumerate().fold(T::zero(), |acc, (j, &xj)| {
            let theta: T = two_pi * T::from_len((j * k) % n) / T::from_len(n);
            acc + xj * (theta.cos() + theta.sin())
        });
    }
}

/// Separable Hartley transform of a dense array along each of `axes`.
/// Self-inverse up to the product of the transformed extents.
pub fn dht_separable<T: Scalar>(shape: &[usize], axes: &[usize], data: &mut [T]) {
    for &axis in axes {
        map_lines(shape, axis, data, dht_line::<T>);
    }
}

#[cfg(test)]
mod tests {
    use super::{dht_line, dht_separable};

    #[test]
    fn constant_maps_to_dc() {
        let x: [f64; 4] = [1.0; 4];
        let mut out: [f64; 4] = [0.0; 4];
        dht_line(&x, &mut out);
        assert!((out[0] - 4.0).abs() < 1e-12);
        assert!(out[1..].iter().all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn applied_twice_scales_by_size() {
        let shape: [usize; 2] = [4, 3];
        let src: Vec<f64> = (0..12).map(|i| i as f64 - 5.5).collect();
        let mut data: Vec<f64> = src.clone();
        dht_separable(&shape, &[0, 1], &mut data);
        dht_separable(&shape, &[0, 1], &mut data);
        for (a, b) in src.iter().zip(data.iter()) {
            assert!((a * 12.0 - b).abs() < 1e-9);
        }
    }
}
