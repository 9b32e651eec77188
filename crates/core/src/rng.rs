//! RNG module - deterministic piece generation
//!
//! Two policies feed the lookahead:
//! - **Uniform**: each piece is an independent draw over the seven kinds.
//! - **Seven-bag**: a bag holding one of each kind is shuffled and drained,
//!   then refilled.
//!
//! Both run on a small LCG so a seed fully determines the piece sequence.

use crate::config::Randomizer;
use crate::types::PieceKind;

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
    /// Uses the high bits; the low bits of an LCG cycle with a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Seeded piece source behind the lookahead
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    mode: Randomizer,
    rng: SimpleRng,
    /// Current bag (seven-bag mode only)
    bag: [PieceKind; 7],
    /// Index into current bag
    bag_index: usize,
}

impl PieceGenerator {
    /// Create a generator with the given policy and seed
    pub fn new(mode: Randomizer, seed: u32) -> Self {
        Self {
            mode,
            rng: SimpleRng::new(seed),
            bag: PieceKind::ALL,
            // Forces a shuffle on the first bag draw.
            bag_index: 7,
        }
    }

    /// Draw the next piece
    pub fn draw(&mut self) -> PieceKind {
        match self.mode {
            Randomizer::Uniform => PieceKind::ALL[self.rng.next_range(7) as usize],
            Randomizer::SevenBag => {
                if self.bag_index >= 7 {
                    self.refill_bag();
                }
                let piece = self.bag[self.bag_index];
                self.bag_index += 1;
                piece
            }
        }
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    pub fn mode(&self) -> Randomizer {
        self.mode
    }

    /// Get the current RNG state (for restarting a game with a fresh sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}
