//! RNG module - deterministic randomness for spawning and cascades
//!
//! Every random decision the engine makes (the color of a spawned tile, the
//! coin flip between two diagonal sources) goes through [`SimpleRng`], so a
//! seed reproduces a whole game.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits, which have a much longer period than the low bits
    /// of a power-of-two LCG.
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Fair coin flip.
    pub fn coin_flip(&mut self) -> bool {
        self.next_u32() & 0x8000_0000 != 0
    }

    /// Current generator state; feeding it to [`SimpleRng::new`] continues
    /// the same sequence.
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);
        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_next_range_stays_in_bounds_and_covers_it() {
        let mut rng = SimpleRng::new(7);
        let mut seen = [false; 6];
        for _ in 0..1000 {
            let v = rng.next_range(6);
            assert!(v < 6);
            seen[v as usize] = true;
        }
        assert!(seen.iter().all(|s| *s), "every value should appear: {:?}", seen);
    }

    #[test]
    fn test_coin_flip_produces_both_sides() {
        let mut rng = SimpleRng::new(3);
        let heads = (0..200).filter(|_| rng.coin_flip()).count();
        assert!(heads > 50 && heads < 150, "heads = {}", heads);
    }

    #[test]
    fn test_state_resumes_sequence() {
        let mut rng = SimpleRng::new(99);
        rng.next_u32();
        let mut resumed = SimpleRng::new(rng.state());
        assert_eq!(rng.next_u32(), resumed.next_u32());
    }
}
