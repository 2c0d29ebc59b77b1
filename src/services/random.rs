use rand::{rngs::StdRng, Rng, SeedableRng};

/// Source of the pipeline's random choices
///
/// The engine asks for, in order: the catalog page, the genre-substitution coin
/// flip (only when the personality suggests alternates), the alternate genre
/// (only when the flip succeeds), and finally the pick among the top candidates.
pub trait RandomSource: Send {
    /// Uniform index in `0..upper`. Callers never pass zero.
    fn index(&mut self, upper: usize) -> usize;

    /// Even-odds decision
    fn coin_flip(&mut self) -> bool {
        self.index(2) == 1
    }
}

/// Entropy-seeded source used for live requests
pub struct ThreadRandom {
    rng: StdRng,
}

impl ThreadRandom {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for ThreadRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for ThreadRandom {
    fn index(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper.max(1))
    }
}

/// Replays a fixed sequence of draws, cycling when exhausted
///
/// Each draw is reduced modulo the requested bound, so `vec![0]` always takes
/// the first option: page 1, no genre substitution, the top-ranked candidate.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<usize>,
    cursor: usize,
}

impl SequenceRandom {
    pub fn new(values: Vec<usize>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl RandomSource for SequenceRandom {
    fn index(&mut self, upper: usize) -> usize {
        let upper = upper.max(1);
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value % upper
    }
}
