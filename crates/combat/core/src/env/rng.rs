//! Seeded randomness for combat draws.
//!
//! Every draw is a pure function of a seed, so an encounter replays exactly
//! from its game seed and the sequence of player actions.

/// RNG oracle producing values from explicit seeds.
///
/// Implementations must be deterministic: the same seed yields the same value.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform value in `[0, 1)`.
    fn unit(&self, seed: u64) -> f64 {
        self.next_u32(seed) as f64 / (u32::MAX as f64 + 1.0)
    }

    /// Uniform percentage in `[0, 100)`.
    ///
    /// Hit, crit, flee and effect-chance checks compare this against a
    /// percentage threshold with `<`.
    fn percent(&self, seed: u64) -> f64 {
        self.unit(seed) * 100.0
    }

    /// Uniform value in `[min, max)`.
    fn range_f64(&self, seed: u64, min: f64, max: f64) -> f64 {
        if min >= max {
            return min;
        }
        min + self.unit(seed) * (max - min)
    }
}

/// PCG-XSH-RR generator: 64-bit LCG state, 32-bit permuted output.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Derive the seed for one draw.
///
/// * `game_seed` - fixed at session creation
/// * `nonce` - action sequence number within the session
/// * `actor` - raw id of the acting combatant
/// * `context` - index of the draw within the action (hit, crit, variance, ...)
pub fn compute_seed(game_seed: u64, nonce: u64, actor: u32, context: u32) -> u64 {
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // SplitMix-style avalanche
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
