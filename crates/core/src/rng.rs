use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

#[derive(Debug, Clone)]
pub struct RngState {
    seed: u64,
    rng: StdRng,
}

impl RngState {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed from OS entropy. The chosen seed is kept so a session can be replayed.
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    /// Uniform real in `[0, 100)`.
    pub fn roll_percent(&mut self) -> f64 {
        self.rng.gen::<f64>() * 100.0
    }

    /// Uniform index in `[0, len)`; `None` when `len` is zero.
    pub fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.rng.gen_range(0..len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = RngState::from_seed(7);
        let mut b = RngState::from_seed(7);
        for _ in 0..16 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
        assert_eq!(a.seed(), 7);
    }

    #[test]
    fn rolls_stay_in_range() {
        let mut rng = RngState::from_seed(99);
        for _ in 0..10_000 {
            let roll = rng.roll_percent();
            assert!((0.0..100.0).contains(&roll));
            let idx = rng.pick_index(3).expect("non-empty");
            assert!(idx < 3);
        }
        assert_eq!(rng.pick_index(0), None);
    }
}
