//! Fold strategies: the geometric family a composition is folded in

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::math::rng::{SeededStream, StreamOffset};

/// Selection weights in [`StrategyKind::ALL`] order
pub const STRATEGY_WEIGHTS: [f64; 7] = [0.12, 0.12, 0.12, 0.12, 0.10, 0.12, 0.30];

/// Maximum deviation from the base diagonal angle (degrees)
pub const DIAGONAL_JITTER: f64 = 8.0;

/// Geometric family governing anchor and terminus placement
///
/// Chosen once per seed and held for the whole simulation. Positional
/// parameters are fractions of the canvas so the strategy is independent of
/// the solved grid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FoldStrategy {
    /// Straight left-right creases
    Horizontal,
    /// Straight top-bottom creases
    Vertical,
    /// Creases along one diagonal direction
    Diagonal {
        /// Base angle in degrees, 45 or 135
        angle: f64,
        /// Seeded deviation added to the base angle
        jitter: f64,
    },
    /// Creases radiating through a focal point
    Radial {
        /// Focal point as a fraction of the canvas width
        focal_x: f64,
        /// Focal point as a fraction of the canvas height
        focal_y: f64,
    },
    /// Alternating horizontal and vertical creases
    Grid,
    /// Creases gathered around a cluster point
    Clustered {
        /// Cluster point as a fraction of the canvas width
        cluster_x: f64,
        /// Cluster point as a fraction of the canvas height
        cluster_y: f64,
        /// Falloff distance as a fraction of the shorter canvas side
        spread: f64,
    },
    /// Unconstrained folding
    Random,
}

/// Parameterless tag of a [`FoldStrategy`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// See [`FoldStrategy::Horizontal`]
    Horizontal,
    /// See [`FoldStrategy::Vertical`]
    Vertical,
    /// See [`FoldStrategy::Diagonal`]
    Diagonal,
    /// See [`FoldStrategy::Radial`]
    Radial,
    /// See [`FoldStrategy::Grid`]
    Grid,
    /// See [`FoldStrategy::Clustered`]
    Clustered,
    /// See [`FoldStrategy::Random`]
    Random,
}

impl StrategyKind {
    /// Every kind in selection-table order
    pub const ALL: [Self; 7] = [
        Self::Horizontal,
        Self::Vertical,
        Self::Diagonal,
        Self::Radial,
        Self::Grid,
        Self::Clustered,
        Self::Random,
    ];

    /// Lowercase name used in traits and on the command line
    pub const fn name(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
            Self::Diagonal => "diagonal",
            Self::Radial => "radial",
            Self::Grid => "grid",
            Self::Clustered => "clustered",
            Self::Random => "random",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == lowered)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|kind| kind.name()).collect();
                format!("unknown fold strategy '{s}' (expected one of {})", names.join(", "))
            })
    }
}

impl FoldStrategy {
    /// Draw the strategy and its parameters for a seed
    pub fn from_seed(seed: i64) -> Self {
        let mut rng = SeededStream::for_purpose(seed, StreamOffset::Strategy);
        let kind = StrategyKind::ALL
            .get(rng.weighted_index(&STRATEGY_WEIGHTS))
            .copied()
            .unwrap_or(StrategyKind::Random);
        Self::with_parameters(kind, &mut rng)
    }

    /// Force a strategy family while still drawing its parameters from the seed
    pub fn for_kind(seed: i64, kind: StrategyKind) -> Self {
        let mut rng = SeededStream::for_purpose(seed, StreamOffset::Strategy);
        // Burn the family draw so parameters match a naturally drawn strategy
        rng.next_f64();
        Self::with_parameters(kind, &mut rng)
    }

    fn with_parameters(kind: StrategyKind, rng: &mut SeededStream) -> Self {
        match kind {
            StrategyKind::Horizontal => Self::Horizontal,
            StrategyKind::Vertical => Self::Vertical,
            StrategyKind::Diagonal => Self::Diagonal {
                angle: if rng.chance(0.5) { 45.0 } else { 135.0 },
                jitter: rng.range(-DIAGONAL_JITTER, DIAGONAL_JITTER),
            },
            StrategyKind::Radial => Self::Radial {
                focal_x: rng.range(0.2, 0.8),
                focal_y: rng.range(0.2, 0.8),
            },
            StrategyKind::Grid => Self::Grid,
            StrategyKind::Clustered => Self::Clustered {
                cluster_x: rng.range(0.15, 0.85),
                cluster_y: rng.range(0.15, 0.85),
                spread: rng.range(0.1, 0.35),
            },
            StrategyKind::Random => Self::Random,
        }
    }

    /// Parameterless tag of this strategy
    pub const fn kind(&self) -> StrategyKind {
        match self {
            Self::Horizontal => StrategyKind::Horizontal,
            Self::Vertical => StrategyKind::Vertical,
            Self::Diagonal { .. } => StrategyKind::Diagonal,
            Self::Radial { .. } => StrategyKind::Radial,
            Self::Grid => StrategyKind::Grid,
            Self::Clustered { .. } => StrategyKind::Clustered,
            Self::Random => StrategyKind::Random,
        }
    }
}

impl fmt::Display for FoldStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind().name())
    }
}
