use criterion::{Criterion, criterion_group, criterion_main};
use unifft_backend::{FftRef, FftRustFft};
use unifft_hal::bench_suite::{
    dft::{bench_dft_c2c, bench_dft_r2c},
    trig::{bench_dct2, bench_dht},
};

fn bench_dft_c2c_rustfft(c: &mut Criterion) {
    bench_dft_c2c::<FftRustFft>(c, "rustfft");
}

fn bench_dft_r2c_rustfft(c: &mut Criterion) {
    bench_dft_r2c::<FftRustFft>(c, "rustfft");
}

fn bench_dht_ref(c: &mut Criterion) {
    bench_dht::<FftRef>(c, "ref");
}

fn bench_dct2_ref(c: &mut Criterion) {
    bench_dct2::<FftRef>(c, "ref");
}

criterion_group!(
    benches,
    bench_dft_c2c_rustfft,
    bench_dft_r2c_rustfft,
    bench_dht_ref,
    bench_dct2_ref
);
criterion_main!(benches);
