use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
use rand_core::RngCore;

/// ChaCha8-backed source: the same seed always yields the same stream, so
/// test inputs and bench inputs are reproducible across runs and engines.
pub struct Source {
    rng: ChaCha8Rng,
}

impl Source {
    pub fn new(seed: [u8; 32]) -> Source {
        Source {
            rng: ChaCha8Rng::from_seed(seed),
        }
    }
}

impl RngCore for Source {
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    #[inline(always)]
    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    #[inline(always)]
    fn fill_bytes(&mut self, bytes: &mut [u8]) {
        self.rng.fill_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use rand_core::RngCore;

    use super::Source;

    #[test]
    fn same_seed_same_stream() {
        let mut a: Source = Source::new([7u8; 32]);
        let mut b: Source = Source::new([7u8; 32]);
        for _ in 0..16 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
        let mut other: Source = Source::new([8u8; 32]);
        assert_ne!(a.next_u64(), other.next_u64());
    }
}
