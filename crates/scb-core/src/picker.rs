use std::sync::{Mutex, PoisonError};

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Source of randomness for canned reply selection.
pub trait ReplyPicker: Send + Sync {
    /// Return an index in `0..len`. `len` is never zero.
    fn pick(&self, len: usize) -> usize;
}

/// Uniform selection from the thread-local RNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadRngPicker;

impl ReplyPicker for ThreadRngPicker {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Deterministic selection from a seeded RNG.
#[derive(Debug)]
pub struct SeededPicker {
    rng: Mutex<StdRng>,
}

impl SeededPicker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl ReplyPicker for SeededPicker {
    fn pick(&self, len: usize) -> usize {
        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .gen_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let a = SeededPicker::new(7);
        let b = SeededPicker::new(7);
        let xs: Vec<usize> = (0..20).map(|_| a.pick(8)).collect();
        let ys: Vec<usize> = (0..20).map(|_| b.pick(8)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn picks_stay_in_range() {
        let p = ThreadRngPicker;
        assert!((0..200).all(|_| p.pick(3) < 3));
        assert_eq!(p.pick(1), 0);
    }
}
