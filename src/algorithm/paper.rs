//! Seeded physical character of the sheet
//!
//! Paper properties, the crease weight range, the breathing cycle and the
//! relationship bias are each drawn once per seed from their own stream and
//! stay fixed for the whole simulation.

use serde::{Deserialize, Serialize};

use crate::io::configuration::{
    MAX_CYCLE_LENGTH, MAX_RELATIONSHIP_BIAS, MIN_CYCLE_LENGTH, PARALLEL_WINDOW,
    PERPENDICULAR_WINDOW, REDUCTION_MIN, REDUCTION_SPAN, WEIGHT_FLOOR,
};
use crate::math::geometry::angle_difference;
use crate::math::rng::{SeededStream, StreamOffset};

/// Probability that a seeded sheet has a preferred crease angle
pub const AFFINITY_CHANCE: f64 = 0.4;

/// How the sheet takes creases
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaperProperties {
    /// Probability that a candidate crease registers
    pub absorbency: f64,
    /// Intersections weighing less than this are ignored by aggregation
    pub intersection_threshold: f64,
    /// Preferred crease angle in degrees, in [0, 180)
    pub angle_affinity: Option<f64>,
    /// Maximum weight reduction for creases far from the preferred angle
    pub affinity_strength: f64,
    /// Scales the saturation ceiling of the density field
    pub ceiling_multiplier: f64,
}

impl Default for PaperProperties {
    /// Fully absorbent sheet without grain
    fn default() -> Self {
        Self {
            absorbency: 1.0,
            intersection_threshold: 0.0,
            angle_affinity: None,
            affinity_strength: 0.0,
            ceiling_multiplier: 1.0,
        }
    }
}

impl PaperProperties {
    /// Draw the paper for a seed
    pub fn from_seed(seed: i64) -> Self {
        let mut rng = SeededStream::for_purpose(seed, StreamOffset::Paper);
        let absorbency = rng.range(0.1, 0.9);
        let (angle_affinity, affinity_strength) = if rng.chance(AFFINITY_CHANCE) {
            (Some(rng.range(0.0, 180.0)), rng.range(0.0, 0.8))
        } else {
            (None, 0.0)
        };
        let ceiling_multiplier = rng.range(0.3, 1.7);

        Self {
            absorbency,
            intersection_threshold: 0.0,
            angle_affinity,
            affinity_strength,
            ceiling_multiplier,
        }
    }

    /// Weight multiplier for a crease at `angle` degrees
    ///
    /// Falls off linearly from 1 at the preferred angle to
    /// `1 - affinity_strength` at 90 degrees away from it.
    pub fn affinity_factor(&self, angle: f64) -> f64 {
        self.angle_affinity.map_or(1.0, |preferred| {
            let deviation = angle_difference(angle, preferred);
            1.0 - self.affinity_strength * (deviation / 90.0)
        })
    }
}

/// Uniform range of base crease weights
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightRange {
    /// Lower bound (inclusive)
    pub min: f64,
    /// Upper bound (exclusive)
    pub max: f64,
}

impl Default for WeightRange {
    fn default() -> Self {
        Self { min: 0.3, max: 0.7 }
    }
}

impl WeightRange {
    /// Draw the weight range for a seed
    pub fn from_seed(seed: i64) -> Self {
        let mut rng = SeededStream::for_purpose(seed, StreamOffset::WeightRange);
        let min = rng.range(0.2, 0.5);
        let max = min + rng.range(0.1, 0.5);
        Self { min, max }
    }

    /// Draw one base weight
    pub fn sample(&self, rng: &mut SeededStream) -> f64 {
        rng.range(self.min, self.max)
    }
}

/// Periodic decay of existing crease weights
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BreathingCycle {
    /// Folds per cycle
    pub length: usize,
    /// Reduction factor for creases created in each cycle slot
    pub reductions: Vec<f64>,
}

impl BreathingCycle {
    /// Draw the cycle length and one reduction factor per slot
    pub fn from_seed(seed: i64) -> Self {
        let mut rng = SeededStream::for_purpose(seed, StreamOffset::Cycle);
        let length = MIN_CYCLE_LENGTH + rng.index(MAX_CYCLE_LENGTH - MIN_CYCLE_LENGTH);
        let reductions = (0..length)
            .map(|_| rng.range(REDUCTION_MIN, REDUCTION_MIN + REDUCTION_SPAN))
            .collect();
        Self { length, reductions }
    }

    /// Slot of a fold within its cycle
    pub const fn position(&self, fold_index: usize) -> usize {
        if self.length == 0 {
            0
        } else {
            fold_index % self.length
        }
    }

    /// Whether a fold opens a new cycle after the first
    pub const fn is_boundary(&self, fold_index: usize) -> bool {
        fold_index > 0 && self.position(fold_index) == 0
    }

    /// Reduction factor assigned to a slot
    pub fn reduction(&self, slot: usize) -> f64 {
        self.reductions.get(slot).copied().unwrap_or(1.0)
    }
}

/// Decayed weight at a cycle boundary, never below the floor
pub fn breathe(weight: f64, multiplier: f64) -> f64 {
    (weight * multiplier).max(WEIGHT_FLOOR)
}

/// Preference for terminus candidates aligned with existing creases
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RelationshipBias {
    /// Boost for candidates nearly parallel to an existing crease
    pub parallel: f64,
    /// Boost for candidates nearly perpendicular to an existing crease
    pub perpendicular: f64,
}

impl RelationshipBias {
    /// Draw both bias strengths for a seed
    pub fn from_seed(seed: i64) -> Self {
        let mut rng = SeededStream::for_purpose(seed, StreamOffset::Relationship);
        Self {
            parallel: rng.range(0.0, MAX_RELATIONSHIP_BIAS),
            perpendicular: rng.range(0.0, MAX_RELATIONSHIP_BIAS),
        }
    }

    /// Weight multiplier for a candidate at `angle` given existing crease angles
    pub fn factor(&self, angle: f64, existing: &[f64]) -> f64 {
        let mut parallel = false;
        let mut perpendicular = false;
        for &other in existing {
            let difference = angle_difference(angle, other);
            parallel |= difference < PARALLEL_WINDOW;
            perpendicular |= difference > PERPENDICULAR_WINDOW;
        }

        let mut factor = 1.0;
        if parallel {
            factor *= 1.0 + self.parallel;
        }
        if perpendicular {
            factor *= 1.0 + self.perpendicular;
        }
        factor
    }
}
