use crate::constants::SEED_RANGE;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Source of the randomness that gives planned routes their variety
/// (round-trip seeds, base bearings). Injected so searches can be replayed.
pub trait SeedSource: Send {
    /// Next seed in `[0, SEED_RANGE)`.
    fn next_seed(&mut self) -> u32;
}

/// Seeds drawn uniformly from an OS-seeded generator.
pub struct RandomSeeds {
    rng: StdRng,
}

impl RandomSeeds {
    pub fn from_os_rng() -> Self {
        RandomSeeds {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible sequence, handy for the command-line planner.
    pub fn seeded(seed: u64) -> Self {
        RandomSeeds {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl SeedSource for RandomSeeds {
    fn next_seed(&mut self) -> u32 {
        self.rng.random_range(0..SEED_RANGE)
    }
}

/// Replays a fixed list of seeds, repeating the last one once exhausted.
#[derive(Debug, Clone)]
pub struct FixedSeeds {
    seeds: Vec<u32>,
    position: usize,
}

impl FixedSeeds {
    pub fn new(seeds: Vec<u32>) -> Self {
        FixedSeeds { seeds, position: 0 }
    }
}

impl SeedSource for FixedSeeds {
    fn next_seed(&mut self) -> u32 {
        let seed = self
            .seeds
            .get(self.position)
            .or_else(|| self.seeds.last())
            .copied()
            .unwrap_or(0);
        self.position += 1;
        seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_seeds_in_range() {
        let mut seeds = RandomSeeds::seeded(7);
        for _ in 0..1000 {
            assert!(seeds.next_seed() < SEED_RANGE);
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = RandomSeeds::seeded(42);
        let mut b = RandomSeeds::seeded(42);
        let first: Vec<u32> = (0..5).map(|_| a.next_seed()).collect();
        let second: Vec<u32> = (0..5).map(|_| b.next_seed()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_fixed_seeds_replay() {
        let mut seeds = FixedSeeds::new(vec![3, 9]);
        assert_eq!(seeds.next_seed(), 3);
        assert_eq!(seeds.next_seed(), 9);
        assert_eq!(seeds.next_seed(), 9);

        assert_eq!(FixedSeeds::new(vec![]).next_seed(), 0);
    }
}
