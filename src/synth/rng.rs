use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform draws in `[0, 1)` threaded through every generator.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Always returns the same draw. Used to pin generator output in tests.
#[cfg(test)]
pub struct ConstantRandom(pub f64);

#[cfg(test)]
impl RandomSource for ConstantRandom {
    fn next_f64(&mut self) -> f64 {
        self.0
    }
}

pub fn fresh_seed() -> u64 {
    rand::thread_rng().gen::<u64>()
}

/// Inclusive integer draw in `[lo, hi]`.
pub fn int_between(rng: &mut dyn RandomSource, lo: i64, hi: i64) -> i64 {
    if hi <= lo {
        return lo;
    }
    let span = (hi - lo + 1) as f64;
    let off = (rng.next_f64() * span).floor() as i64;
    lo + off.min(hi - lo)
}

pub fn float_between(rng: &mut dyn RandomSource, lo: f64, hi: f64) -> f64 {
    lo + rng.next_f64() * (hi - lo)
}

pub fn chance(rng: &mut dyn RandomSource, p: f64) -> bool {
    rng.next_f64() < p
}

pub fn pick<'a, T>(rng: &mut dyn RandomSource, items: &'a [T]) -> &'a T {
    let idx = int_between(rng, 0, items.len() as i64 - 1) as usize;
    &items[idx]
}

pub fn random_bytes<const N: usize>(rng: &mut dyn RandomSource) -> [u8; N] {
    let mut out = [0u8; N];
    for b in out.iter_mut() {
        *b = int_between(rng, 0, 255) as u8;
    }
    out
}
