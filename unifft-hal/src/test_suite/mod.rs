pub mod contract;
pub mod dft;
pub mod dht;
pub mod dtt;
pub mod mock;

use num_complex::Complex;
use sampling::{FillSignal, Signal, Source};

/// Instantiates backend-generic test functions for one engine.
///
/// ```ignore
/// backend_test_suite! {
///     mod dft,
///     backend = FftRef,
///     tests = {
///         c2c_matches_reference => unifft_hal::test_suite::dft::test_dft_c2c_matches_reference,
///     }
/// }
/// ```
#[macro_export]
macro_rules! backend_test_suite {
    (
        mod $modname:ident,
        backend = $backend:ty,
        tests = {
            $( $(#[$attr:meta])* $test_name:ident => $($impl:ident)::+ ),+ $(,)?
        }
    ) => {
        mod $modname {
            use std::sync::LazyLock;

            use unifft_hal::layouts::Context;

            static CONTEXT: LazyLock<Context> = LazyLock::new(Context::new);

            $(
                $(#[$attr])*
                #[test]
                fn $test_name() {
                    $($impl)::+::<$backend>(&CONTEXT);
                }
            )+
        }
    };
}

pub fn random_real(len: usize, source: &mut Source) -> Vec<f64> {
    let signal: Signal = Signal::uniform(-1.0, 1.0).unwrap();
    let mut data: Vec<f64> = vec![0f64; len];
    data.fill_signal(&signal, source);
    data
}

pub fn random_complex(len: usize, source: &mut Source) -> Vec<Complex<f64>> {
    let re: Vec<f64> = random_real(len, source);
    let im: Vec<f64> = random_real(len, source);
    re.into_iter().zip(im).map(|(r, i)| Complex::new(r, i)).collect()
}

pub fn split(data: &[Complex<f64>]) -> (Vec<f64>, Vec<f64>) {
    (data.iter().map(|c| c.re).collect(), data.iter().map(|c| c.im).collect())
}

pub fn assert_close(actual: &[f64], expected: &[f64], tol: f64) {
    assert_eq!(actual.len(), expected.len());
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert!((a - e).abs() <= tol, "index {i}: {a} != {e} (tol {tol})");
    }
}

pub fn assert_complex_close(actual: &[Complex<f64>], re: &[f64], im: &[f64], tol: f64) {
    let (a_re, a_im) = split(actual);
    assert_close(&a_re, re, tol);
    assert_close(&a_im, im, tol);
}
