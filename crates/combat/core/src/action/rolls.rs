use std::collections::VecDeque;

use crate::env::{PcgRng, RngOracle, compute_seed};
use crate::state::CombatantId;

/// Source of the random draws an action consumes.
///
/// The session calls [`begin_action`](RollSource::begin_action) before each
/// action so seeded sources can derive fresh, replayable seeds.
pub trait RollSource {
    fn begin_action(&mut self, _nonce: u64, _actor: CombatantId) {}

    /// Draw in `[0, 100)`.
    fn percent(&mut self) -> f64;

    /// Draw in `[min, max]`.
    fn variance(&mut self, min: f64, max: f64) -> f64;
}

/// Rolls derived from a game seed through an [`RngOracle`].
///
/// Each draw uses `compute_seed(game_seed, nonce, actor, context)` where
/// `context` counts the draws made within the current action.
#[derive(Clone, Debug)]
pub struct SeededRolls<R: RngOracle = PcgRng> {
    rng: R,
    game_seed: u64,
    nonce: u64,
    actor: u32,
    context: u32,
}

impl SeededRolls<PcgRng> {
    pub fn new(game_seed: u64) -> Self {
        Self::with_oracle(PcgRng, game_seed)
    }
}

impl<R: RngOracle> SeededRolls<R> {
    pub fn with_oracle(rng: R, game_seed: u64) -> Self {
        Self {
            rng,
            game_seed,
            nonce: 0,
            actor: 0,
            context: 0,
        }
    }

    pub fn game_seed(&self) -> u64 {
        self.game_seed
    }

    fn next_seed(&mut self) -> u64 {
        let seed = compute_seed(self.game_seed, self.nonce, self.actor, self.context);
        self.context = self.context.wrapping_add(1);
        seed
    }
}

impl<R: RngOracle> RollSource for SeededRolls<R> {
    fn begin_action(&mut self, nonce: u64, actor: CombatantId) {
        self.nonce = nonce;
        self.actor = actor.0;
        self.context = 0;
    }

    fn percent(&mut self) -> f64 {
        let seed = self.next_seed();
        self.rng.percent(seed)
    }

    fn variance(&mut self, min: f64, max: f64) -> f64 {
        let seed = self.next_seed();
        self.rng.range_f64(seed, min, max)
    }
}

/// Pre-scripted rolls for tests and replays.
///
/// Percent draws pop from a queue and fall back to `fallback_percent` (50 by
/// default: hits, no crit) once it runs dry. Variance draws pop from their own
/// queue, clamped to the requested range, and fall back to 1.0.
#[derive(Clone, Debug)]
pub struct ScriptedRolls {
    percents: VecDeque<f64>,
    variances: VecDeque<f64>,
    fallback_percent: f64,
    percents_drawn: usize,
}

impl Default for ScriptedRolls {
    fn default() -> Self {
        Self {
            percents: VecDeque::new(),
            variances: VecDeque::new(),
            fallback_percent: 50.0,
            percents_drawn: 0,
        }
    }
}

impl ScriptedRolls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_percents(mut self, rolls: impl IntoIterator<Item = f64>) -> Self {
        self.percents.extend(rolls);
        self
    }

    pub fn with_variances(mut self, rolls: impl IntoIterator<Item = f64>) -> Self {
        self.variances.extend(rolls);
        self
    }

    pub fn with_fallback_percent(mut self, roll: f64) -> Self {
        self.fallback_percent = roll;
        self
    }

    pub fn push_percent(&mut self, roll: f64) {
        self.percents.push_back(roll);
    }

    /// Number of percent draws made so far.
    pub fn percents_drawn(&self) -> usize {
        self.percents_drawn
    }

    pub fn remaining_percents(&self) -> usize {
        self.percents.len()
    }
}

impl RollSource for ScriptedRolls {
    fn percent(&mut self) -> f64 {
        self.percents_drawn += 1;
        self.percents.pop_front().unwrap_or(self.fallback_percent)
    }

    fn variance(&mut self, min: f64, max: f64) -> f64 {
        let roll = self.variances.pop_front().unwrap_or(1.0);
        if min > max {
            return min;
        }
        roll.clamp(min, max)
    }
}
