use rand_distr::{Distribution, Normal, Uniform};

use crate::source::Source;

/// Distribution used to synthesize transform inputs.
#[derive(Clone, Copy, Debug)]
pub enum Signal {
    Uniform(Uniform<f64>),
    Normal(Normal<f64>),
}

impl Signal {
    /// Uniform on `[min, max)`; `None` when the bounds are not ordered and finite.
    pub fn uniform(min: f64, max: f64) -> Option<Self> {
        Uniform::new(min, max).ok().map(Signal::Uniform)
    }

    /// Gaussian; `None` when `sigma` is negative or not finite.
    pub fn normal(mean: f64, sigma: f64) -> Option<Self> {
        Normal::new(mean, sigma).ok().map(Signal::Normal)
    }

    #[inline]
    pub fn sample(&self, source: &mut Source) -> f64 {
        match self {
            Signal::Uniform(dist) => dist.sample(source),
            Signal::Normal(dist) => dist.sample(source),
        }
    }
}

pub trait FillSignal {
    fn fill_signal(&mut self, signal: &Signal, source: &mut Source);
}

impl FillSignal for [f64] {
    fn fill_signal(&mut self, signal: &Signal, source: &mut Source) {
        self.iter_mut().for_each(|x| *x = signal.sample(source));
    }
}

impl FillSignal for [f32] {
    fn fill_signal(&mut self, signal: &Signal, source: &mut Source) {
        self.iter_mut().for_each(|x| *x = signal.sample(source) as f32);
    }
}
