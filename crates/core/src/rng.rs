//! RNG module - 7-bag random piece generation
//!
//! Implements the "7-bag" randomization algorithm used in modern Tetris.
//! Each bag contains one of each piece (I, O, T, S, Z, J, L), shuffled.
//! Draws from the bag until empty, then generates a new bag.
//!
//! The bag is seeded, so the same seed always deals the same pieces.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, BAG_SIZE};

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
    /// Uses the high bits; the low bits of a power-of-two LCG cycle with short periods.
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
}

/// 7-bag piece generator
///
/// The current bag is a stack: refilled with one of each kind and shuffled,
/// then popped until empty.
#[derive(Debug, Clone)]
pub struct PieceBag {
    /// Pieces left in the current bag; the next draw is the last element.
    bag: ArrayVec<PieceKind, BAG_SIZE>,
    /// RNG for shuffling
    rng: SimpleRng,
    seed: u32,
}

impl PieceBag {
    /// Create a new bag with the given seed
    pub fn new(seed: u32) -> Self {
        let mut bag = Self {
            bag: ArrayVec::new(),
            rng: SimpleRng::new(seed),
            seed,
        };
        bag.refill();
        bag
    }

    /// Replace the (empty) bag with a freshly shuffled set of all seven kinds.
    fn refill(&mut self) {
        self.bag.clear();
        self.bag.extend(PieceKind::ALL);
        self.rng.shuffle(&mut self.bag);
    }

    /// Draw the next piece, reshuffling a new bag when the current one is empty.
    pub fn draw(&mut self) -> PieceKind {
        loop {
            if let Some(kind) = self.bag.pop() {
                return kind;
            }
            self.refill();
        }
    }

    /// The piece the next `draw()` will return.
    pub fn peek(&self) -> PieceKind {
        self.clone().draw()
    }

    /// The next `count` pieces, without consuming any of them.
    ///
    /// Runs past the end of the current bag into the bags that would follow,
    /// using a copy of the RNG, so the preview always matches later draws.
    pub fn peek_multiple(&self, count: usize) -> Vec<PieceKind> {
        let mut preview = self.clone();
        (0..count).map(|_| preview.draw()).collect()
    }

    /// Pieces left in the current bag before the next reshuffle.
    pub fn remaining(&self) -> usize {
        self.bag.len()
    }

    /// Seed this bag was created with.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Seed for an independent follow-up bag (used on restart).
    pub fn next_seed(&self) -> u32 {
        self.rng.clone().next_u32()
    }
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new(1)
    }
}
