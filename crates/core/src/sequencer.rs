//! Sequencer module - random piece generation
//!
//! Two policies are available:
//!
//! - **7-bag**: a bag holding one of each piece is shuffled and drawn from the
//!   front until empty, then refilled. Every aligned window of 7 draws is a
//!   permutation of all kinds, and the same kind is never more than 12 draws apart.
//! - **Uniform**: each draw picks one of the 7 kinds with equal probability.
//!
//! Sequencers are seeded so games can be replayed deterministically.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::types::PieceKind;

/// Piece generation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Randomizer {
    #[default]
    #[serde(rename = "7-bag")]
    Bag,
    #[serde(rename = "random")]
    Uniform,
}

impl Randomizer {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "7-bag" | "bag" => Some(Randomizer::Bag),
            "random" | "uniform" => Some(Randomizer::Uniform),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Randomizer::Bag => "7-bag",
            Randomizer::Uniform => "random",
        }
    }
}

/// Stream of upcoming piece kinds
#[derive(Debug, Clone)]
pub struct Sequencer {
    mode: Randomizer,
    /// Pending kinds of the current bag (bag mode only)
    bag: VecDeque<PieceKind>,
    rng: StdRng,
}

impl Sequencer {
    /// Create a sequencer with a fixed seed
    pub fn new(mode: Randomizer, seed: u64) -> Self {
        Self {
            mode,
            bag: VecDeque::with_capacity(PieceKind::ALL.len()),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a sequencer seeded from OS entropy
    pub fn from_entropy(mode: Randomizer) -> Self {
        Self {
            mode,
            bag: VecDeque::with_capacity(PieceKind::ALL.len()),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn mode(&self) -> Randomizer {
        self.mode
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        let mut kinds = PieceKind::ALL;
        kinds.shuffle(&mut self.rng);
        self.bag.extend(kinds);
    }

    fn next_from_bag(&mut self) -> Option<PieceKind> {
        if self.bag.is_empty() {
            self.refill_bag();
        }
        self.bag.pop_front()
    }

    fn next_uniform(&mut self) -> Option<PieceKind> {
        let index = self.rng.gen_range(0..PieceKind::ALL.len());
        PieceKind::from_index(index)
    }

    /// Draw the next piece kind.
    ///
    /// A draw that yields no valid kind falls back to [`PieceKind::FALLBACK`].
    pub fn next_kind(&mut self) -> PieceKind {
        let drawn = match self.mode {
            Randomizer::Bag => self.next_from_bag(),
            Randomizer::Uniform => self.next_uniform(),
        };
        drawn.unwrap_or(PieceKind::FALLBACK)
    }

    /// Discard any partially drawn bag, so the next draw starts a fresh one.
    pub fn reset(&mut self) {
        self.bag.clear();
    }

    /// Kinds still pending in the current bag
    pub fn remaining_in_bag(&self) -> usize {
        self.bag.len()
    }
}
