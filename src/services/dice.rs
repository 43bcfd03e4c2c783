use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Shared random source for payment outcomes and bargain cuts.
/// Seed it to make a run reproducible.
#[derive(Debug)]
pub struct Dice {
    rng: Mutex<StdRng>,
}

impl Dice {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn from_seed_opt(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// True with probability `p`. A draw in [0, 1) is compared against `p`,
    /// so `p <= 0.0` never succeeds and `p >= 1.0` always does.
    pub fn chance(&self, p: f64) -> bool {
        let draw: f64 = self.rng.lock().gen();
        draw < p
    }

    /// Uniform draw in `[lo, hi]`.
    pub fn uniform(&self, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            return lo;
        }
        self.rng.lock().gen_range(lo..=hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn certain_and_impossible_chances() {
        let dice = Dice::seeded(7);
        for _ in 0..100 {
            assert!(dice.chance(1.0));
            assert!(!dice.chance(0.0));
        }
    }

    #[test]
    fn uniform_stays_in_bounds() {
        let dice = Dice::seeded(42);
        for _ in 0..1000 {
            let v = dice.uniform(0.005, 0.05);
            assert!((0.005..=0.05).contains(&v));
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let a = Dice::seeded(99);
        let b = Dice::seeded(99);
        for _ in 0..20 {
            assert_eq!(a.uniform(0.0, 1.0), b.uniform(0.0, 1.0));
        }
    }
}
