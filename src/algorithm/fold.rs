//! Fold simulation: the crease-by-crease state machine
//!
//! Each fold index runs the same sequence: breathing-cycle bookkeeping,
//! periodic refresh of the intersection cache, anchor selection, terminus
//! selection and registration. Registering a crease appends its crossings
//! to the cache straight away. Creases are only ever appended; their weights
//! decay in place when a new breathing cycle starts.

use serde::{Deserialize, Serialize};

use crate::{
    algorithm::{
        anchor::select_anchor,
        intersection::{intersection_points, newest_crossings},
        paper::{BreathingCycle, PaperProperties, RelationshipBias, WeightRange, breathe},
        strategy::FoldStrategy,
        terminus::select_terminus,
    },
    io::configuration::{
        DUPLICATE_TOLERANCE, FOLD_TARGET_MARGIN_RATIO, INTERSECTION_REFRESH_INTERVAL,
        MIN_CREASE_WEIGHT, MIN_LENGTH_RATIO,
    },
    math::{
        geometry::{Canvas, Point, segment_angle},
        rng::{SeededStream, StreamOffset},
    },
};

/// Where a crease starts or ends
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorType {
    /// A point along a canvas edge
    Edge,
    /// A canvas corner
    Corner,
    /// An interior point of an existing crease
    Crease,
    /// A cached crossing of two existing creases
    Intersection,
}

/// One registered fold
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Crease {
    /// Start point
    pub p1: Point,
    /// End point
    pub p2: Point,
    /// Insertion index within the crease list
    pub depth: usize,
    /// Current weight, reduced at breathing-cycle boundaries
    pub weight: f64,
    /// Slot of the creating fold within its breathing cycle
    pub cycle_position: usize,
    /// Factor applied to the weight at each breathing-cycle boundary
    pub reduction_multiplier: f64,
    /// Kind of start point
    pub anchor_type: AnchorType,
    /// Kind of end point
    pub terminus_type: AnchorType,
}

impl Crease {
    /// Undirected angle in degrees, in [0, 180)
    pub fn angle(&self) -> f64 {
        segment_angle(self.p1, self.p2)
    }

    /// Euclidean length
    pub fn length(&self) -> f64 {
        self.p1.distance(self.p2)
    }

    /// Point halfway along the crease
    pub fn midpoint(&self) -> Point {
        self.p1.midpoint(self.p2)
    }

    /// Point at parameter `t` along the crease
    pub fn point_at(&self, t: f64) -> Point {
        self.p1.lerp(self.p2, t)
    }
}

/// Read-only view of the simulation handed to anchor and terminus selection
#[derive(Clone, Copy, Debug)]
pub struct FoldContext<'a> {
    /// Drawing area
    pub canvas: Canvas,
    /// Strategy in force
    pub strategy: &'a FoldStrategy,
    /// Creases registered so far
    pub creases: &'a [Crease],
    /// Cached crease crossings in registration order
    pub intersections: &'a [Point],
    /// Index of the fold being placed
    pub fold_index: usize,
    /// Total folds in this simulation
    pub num_folds: usize,
    /// Alignment preference for termini
    pub bias: RelationshipBias,
}

impl FoldContext<'_> {
    /// Shortest admissible crease for weighted terminus candidates
    pub fn min_length(&self) -> f64 {
        MIN_LENGTH_RATIO * self.canvas.min_side()
    }

    /// Fraction of the simulation already completed
    pub fn progress(&self) -> f64 {
        if self.num_folds == 0 {
            0.0
        } else {
            self.fold_index as f64 / self.num_folds as f64
        }
    }
}

/// Finished simulation
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FoldOutcome {
    /// Registered creases in insertion order
    pub creases: Vec<Crease>,
    /// Margin-clamped midpoint of the first registered crease
    pub first_target: Option<Point>,
    /// Margin-clamped midpoint of the last registered crease
    pub last_target: Option<Point>,
}

/// Crease simulator for one seed
pub struct FoldSimulator {
    canvas: Canvas,
    strategy: FoldStrategy,
    paper: PaperProperties,
    weight_range: WeightRange,
    cycle: BreathingCycle,
    bias: RelationshipBias,
    fold_rng: SeededStream,
    absorbency_rng: SeededStream,
    weight_rng: SeededStream,
    creases: Vec<Crease>,
    known_intersections: Vec<Point>,
    cache_dirty: bool,
}

impl FoldSimulator {
    /// Create a simulator, drawing the breathing cycle and relationship bias
    /// from the seed
    pub fn new(
        seed: i64,
        canvas: Canvas,
        strategy: FoldStrategy,
        paper: PaperProperties,
        weight_range: WeightRange,
    ) -> Self {
        Self {
            canvas,
            strategy,
            paper,
            weight_range,
            cycle: BreathingCycle::from_seed(seed),
            bias: RelationshipBias::from_seed(seed),
            fold_rng: SeededStream::for_purpose(seed, StreamOffset::Folds),
            absorbency_rng: SeededStream::for_purpose(seed, StreamOffset::Absorbency),
            weight_rng: SeededStream::for_purpose(seed, StreamOffset::Weights),
            creases: Vec::new(),
            known_intersections: Vec::new(),
            cache_dirty: false,
        }
    }

    /// Replace the seeded breathing cycle
    #[must_use]
    pub fn with_cycle(mut self, cycle: BreathingCycle) -> Self {
        self.cycle = cycle;
        self
    }

    /// Replace the seeded relationship bias
    #[must_use]
    pub fn with_bias(mut self, bias: RelationshipBias) -> Self {
        self.bias = bias;
        self
    }

    /// Breathing cycle in force
    pub const fn cycle(&self) -> &BreathingCycle {
        &self.cycle
    }

    /// Creases registered so far
    pub fn creases(&self) -> &[Crease] {
        &self.creases
    }

    /// Crossings visible to anchor and terminus selection
    pub fn known_intersections(&self) -> &[Point] {
        &self.known_intersections
    }

    /// Run `num_folds` folds and return the registered creases
    ///
    /// A canvas without positive extents yields no creases.
    pub fn run(mut self, num_folds: usize) -> FoldOutcome {
        if !self.canvas.is_valid() {
            log::debug!(
                "skipping simulation on degenerate canvas {}x{}",
                self.canvas.width,
                self.canvas.height
            );
            return FoldOutcome::default();
        }

        for fold_index in 0..num_folds {
            self.step(fold_index, num_folds);
        }

        let margin = FOLD_TARGET_MARGIN_RATIO * self.canvas.min_side();
        let canvas = self.canvas;
        let first_target = self
            .creases
            .first()
            .map(|crease| canvas.clamp_inset(crease.midpoint(), margin));
        let last_target = self
            .creases
            .last()
            .map(|crease| canvas.clamp_inset(crease.midpoint(), margin));

        log::debug!(
            "{} strategy registered {} of {num_folds} folds (cycle length {})",
            self.strategy,
            self.creases.len(),
            self.cycle.length
        );

        FoldOutcome {
            creases: self.creases,
            first_target,
            last_target,
        }
    }

    /// Place fold `fold_index` of `num_folds`
    ///
    /// Returns whether the candidate was registered as a crease. Callers
    /// driving the simulator by hand must step fold indices in order.
    pub fn step(&mut self, fold_index: usize, num_folds: usize) -> bool {
        let cycle_position = self.cycle.position(fold_index);
        if self.cycle.is_boundary(fold_index) {
            apply_breathing(&mut self.creases);
            log::trace!("fold {fold_index}: breathing cycle boundary");
        }

        if fold_index % INTERSECTION_REFRESH_INTERVAL == 0 && self.cache_dirty {
            self.known_intersections = intersection_points(&self.creases);
            self.cache_dirty = false;
        }

        let context = FoldContext {
            canvas: self.canvas,
            strategy: &self.strategy,
            creases: &self.creases,
            intersections: &self.known_intersections,
            fold_index,
            num_folds,
            bias: self.bias,
        };

        let anchor = select_anchor(&context, &mut self.fold_rng);
        let Some(terminus) = select_terminus(&context, &anchor, &mut self.fold_rng) else {
            log::trace!("fold {fold_index}: degenerate candidate");
            return false;
        };

        if is_duplicate(&self.creases, anchor.point, terminus.point) {
            log::trace!("fold {fold_index}: duplicate candidate");
            return false;
        }

        if !self.absorbency_rng.chance(self.paper.absorbency) {
            log::trace!("fold {fold_index}: not absorbed");
            return false;
        }

        let angle = segment_angle(anchor.point, terminus.point);
        let base_weight = self.weight_range.sample(&mut self.weight_rng);
        let weight = base_weight * self.paper.affinity_factor(angle);
        if weight <= MIN_CREASE_WEIGHT {
            log::trace!("fold {fold_index}: weight {weight:.4} too light");
            return false;
        }

        let depth = self.creases.len();
        self.creases.push(Crease {
            p1: anchor.point,
            p2: terminus.point,
            depth,
            weight,
            cycle_position,
            reduction_multiplier: self.cycle.reduction(cycle_position),
            anchor_type: anchor.kind,
            terminus_type: terminus.kind,
        });
        self.known_intersections.extend(newest_crossings(&self.creases));
        self.cache_dirty = true;

        log::trace!(
            "fold {fold_index}: crease {depth} {:?} -> {:?} weight {weight:.4}",
            anchor.kind,
            terminus.kind
        );
        true
    }
}

/// Decay every crease by its own reduction multiplier, floored
pub fn apply_breathing(creases: &mut [Crease]) {
    for crease in creases {
        crease.weight = breathe(crease.weight, crease.reduction_multiplier);
    }
}

/// Whether a segment repeats an existing crease in either direction
pub fn is_duplicate(creases: &[Crease], p1: Point, p2: Point) -> bool {
    creases.iter().any(|crease| {
        let same = crease.p1.distance(p1) <= DUPLICATE_TOLERANCE
            && crease.p2.distance(p2) <= DUPLICATE_TOLERANCE;
        let reversed = crease.p1.distance(p2) <= DUPLICATE_TOLERANCE
            && crease.p2.distance(p1) <= DUPLICATE_TOLERANCE;
        same || reversed
    })
}
