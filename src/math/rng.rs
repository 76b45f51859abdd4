//! Linear-congruential random streams keyed by seed and purpose
//!
//! Every stochastic decision in a composition draws from a [`SeededStream`].
//! The recurrence, its mask and the output divisor are part of the output
//! contract: an independent verifier must reproduce every draw bit for bit.
//! Streams for different subsystems are decorrelated by adding a fixed
//! [`StreamOffset`] to the seed.

/// Multiplier of the recurrence
pub const LCG_MULTIPLIER: u64 = 1_103_515_245;
/// Increment of the recurrence
pub const LCG_INCREMENT: u64 = 12_345;
/// Mask reducing the state to 31 bits
pub const LCG_MASK: u64 = 0x7fff_ffff;
/// Divisor mapping a 31-bit state onto [0, 1)
pub const LCG_MODULUS: f64 = 2_147_483_648.0;

/// Per-subsystem seed offsets
///
/// The numeric values are frozen. Reassigning any of them changes every
/// downstream composition for every seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StreamOffset {
    /// Anchor and terminus selection
    Folds,
    /// Fold strategy choice and its parameters
    Strategy,
    /// Parallel / perpendicular relationship bias strengths
    Relationship,
    /// Fold count when the caller does not supply one
    FoldCount,
    /// Paper properties
    Paper,
    /// Seeded crease weight range
    WeightRange,
    /// Standard and monochrome palette pathways
    Palette,
    /// Gradient mode trigger, anchor role and shift sizes
    Gradient,
    /// Registration coin flips
    Absorbency,
    /// Cell size and gap solving
    Grid,
    /// Base crease weights
    Weights,
    /// Breathing cycle length and per-slot reduction factors
    Cycle,
}

impl StreamOffset {
    /// Fixed offset added to the seed for this subsystem
    pub const fn value(self) -> i64 {
        match self {
            Self::Folds => 0,
            Self::Strategy => 1111,
            Self::Relationship => 2222,
            Self::FoldCount => 3333,
            Self::Paper => 4444,
            Self::WeightRange => 4545,
            Self::Palette => 5555,
            Self::Gradient => 5757,
            Self::Absorbency => 6666,
            Self::Grid => 7777,
            Self::Weights => 8888,
            Self::Cycle => 9999,
        }
    }
}

/// Deterministic uniform stream over [0, 1)
///
/// State is a single 31-bit integer. A seed of zero behaves as seed one so the
/// stream never starts from the all-zero state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeededStream {
    state: u64,
}

impl SeededStream {
    /// Create a stream from a raw seed
    pub const fn new(seed: i64) -> Self {
        let seed = if seed == 0 { 1 } else { seed };
        // Two's complement reduction keeps the arithmetic equivalent to mod 2^31
        Self {
            state: (seed as u64) & LCG_MASK,
        }
    }

    /// Create the stream reserved for one subsystem
    pub const fn for_purpose(seed: i64, offset: StreamOffset) -> Self {
        Self::new(seed.wrapping_add(offset.value()))
    }

    /// Current 31-bit state
    pub const fn state(&self) -> u32 {
        self.state as u32
    }

    /// Advance the recurrence and return the next value in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT)
            & LCG_MASK;
        self.state as f64 / LCG_MODULUS
    }

    /// Uniform value in [min, max)
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// True with probability `p`
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform index in `0..len`, or zero for an empty range
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        ((self.next_f64() * len as f64).floor() as usize).min(len - 1)
    }

    /// Uniform element of a slice
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = self.index(items.len());
        items.get(index)
    }

    /// Weighted random selection
    ///
    /// Returns an index into `weights` using the cumulative distribution.
    /// Non-positive totals select the first entry without consuming a draw.
    pub fn weighted_index(&mut self, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return 0;
        }

        let mut remaining = self.next_f64() * total;
        for (i, &weight) in weights.iter().enumerate() {
            remaining -= weight;
            if remaining < 0.0 {
                return i;
            }
        }
        weights.len().saturating_sub(1)
    }
}
