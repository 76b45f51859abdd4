//! Generation pipeline orchestration
//!
//! `generate` is a pure function of its request: the layout is solved in
//! reference space, creases are simulated inside the solved grid, crossings
//! are aggregated per cell and the palette is derived from the seed and the
//! final crease count.

use serde::{Deserialize, Serialize};

use crate::{
    algorithm::{
        fold::{Crease, FoldSimulator},
        paper::{PaperProperties, WeightRange},
        strategy::FoldStrategy,
    },
    analysis::{density::DensityField, traits::Traits},
    io::{
        configuration::{DEFAULT_SEED, MAX_FOLDS},
        error::{Result, invalid_parameter},
    },
    math::{
        geometry::Point,
        rng::{SeededStream, StreamOffset},
    },
    palette::{Palette, generate_palette},
    spatial::{GridLayout, ReferenceSpace},
};

/// Optional replacements for seeded draws, primarily for testing
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Overrides {
    /// Fold strategy instead of the seeded one
    pub strategy: Option<FoldStrategy>,
    /// Paper properties instead of the seeded ones
    pub paper: Option<PaperProperties>,
    /// Weight range instead of the seeded one
    pub weight_range: Option<WeightRange>,
}

/// Everything a composition is a function of
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Root of every draw
    pub seed: i64,
    /// Fold count, derived from the seed when absent
    pub num_folds: Option<u32>,
    /// Coordinate space the layout is solved in
    pub reference: ReferenceSpace,
    /// Seeded values to replace
    pub overrides: Overrides,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl GenerationRequest {
    /// Request with a seeded fold count in the default reference space
    pub fn new(seed: i64) -> Self {
        Self {
            seed,
            num_folds: None,
            reference: ReferenceSpace::default(),
            overrides: Overrides::default(),
        }
    }

    /// Fix the fold count
    #[must_use]
    pub const fn with_folds(mut self, num_folds: u32) -> Self {
        self.num_folds = Some(num_folds);
        self
    }

    /// Replace the reference space
    #[must_use]
    pub const fn with_reference(mut self, reference: ReferenceSpace) -> Self {
        self.reference = reference;
        self
    }

    /// Replace the seeded strategy
    #[must_use]
    pub const fn with_strategy(mut self, strategy: FoldStrategy) -> Self {
        self.overrides.strategy = Some(strategy);
        self
    }

    /// Replace the seeded paper
    #[must_use]
    pub const fn with_paper(mut self, paper: PaperProperties) -> Self {
        self.overrides.paper = Some(paper);
        self
    }

    /// Replace the seeded weight range
    #[must_use]
    pub const fn with_weight_range(mut self, weight_range: WeightRange) -> Self {
        self.overrides.weight_range = Some(weight_range);
        self
    }

    /// Fold count in force, drawing it from the seed if not fixed
    pub fn fold_count(&self) -> u32 {
        self.num_folds
            .unwrap_or_else(|| derive_fold_count(self.seed))
    }

    /// Check the request before generating
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The fold count exceeds [`MAX_FOLDS`]
    /// - The reference space leaves no drawable area inside its margins
    /// - A weight range override is empty or negative
    /// - A paper override has absorbency outside [0, 1]
    pub fn validate(&self) -> Result<()> {
        if let Some(num_folds) = self.num_folds {
            if num_folds > MAX_FOLDS {
                return Err(invalid_parameter(
                    "num_folds",
                    &num_folds,
                    &format!("must not exceed {MAX_FOLDS}"),
                ));
            }
        }

        if self.reference.inner_width() == 0 {
            return Err(invalid_parameter(
                "reference.width",
                &self.reference.width,
                &format!(
                    "must exceed twice the inset of {}",
                    self.reference.inset()
                ),
            ));
        }
        if self.reference.inner_height() == 0 {
            return Err(invalid_parameter(
                "reference.height",
                &self.reference.height,
                &format!(
                    "must exceed twice the inset of {}",
                    self.reference.inset()
                ),
            ));
        }

        if let Some(range) = self.overrides.weight_range {
            if range.min < 0.0 || range.max < range.min {
                return Err(invalid_parameter(
                    "weight_range",
                    &format!("{}..{}", range.min, range.max),
                    &"must be a non-negative, non-empty range",
                ));
            }
        }

        if let Some(paper) = self.overrides.paper {
            if !(0.0..=1.0).contains(&paper.absorbency) {
                return Err(invalid_parameter(
                    "paper.absorbency",
                    &paper.absorbency,
                    &"must lie in [0, 1]",
                ));
            }
        }

        Ok(())
    }
}

/// Fold count drawn from the reserved stream: `floor(1 + r * 500)`
pub fn derive_fold_count(seed: i64) -> u32 {
    let mut rng = SeededStream::for_purpose(seed, StreamOffset::FoldCount);
    (1.0 + rng.next_f64() * f64::from(MAX_FOLDS)).floor() as u32
}

/// Salient markers at the first and last registered creases
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FoldTargets {
    /// Margin-clamped midpoint of the first crease
    pub first: Option<Point>,
    /// Margin-clamped midpoint of the last crease
    pub last: Option<Point>,
    /// Cell containing `first`
    pub first_cell: Option<(u32, u32)>,
    /// Cell containing `last`
    pub last_cell: Option<(u32, u32)>,
}

/// Finished composition handed to renderers
#[derive(Clone, Debug, PartialEq)]
pub struct Composition {
    /// Seed the composition was generated from
    pub seed: i64,
    /// Folds attempted
    pub num_folds: u32,
    /// Coordinate space the layout was solved in
    pub reference: ReferenceSpace,
    /// Solved grid in reference units
    pub layout: GridLayout,
    /// Strategy in force
    pub strategy: FoldStrategy,
    /// Paper in force
    pub paper: PaperProperties,
    /// Weight range in force
    pub weight_range: WeightRange,
    /// Breathing cycle length
    pub cycle_length: usize,
    /// Registered creases in insertion order
    pub creases: Vec<Crease>,
    /// First and last fold targets
    pub fold_targets: FoldTargets,
    /// Per-cell density
    pub density: DensityField,
    /// Resolved colours
    pub palette: Palette,
}

impl Composition {
    /// Metadata projection
    pub fn traits(&self) -> Traits {
        Traits::from_composition(self)
    }
}

/// Run the full pipeline for one request
///
/// Never fails: degenerate inputs fall back as documented on each stage.
/// Call [`GenerationRequest::validate`] first to reject out-of-range input.
pub fn generate(request: &GenerationRequest) -> Composition {
    let seed = request.seed;
    let num_folds = request.fold_count();

    let layout = GridLayout::solve(seed, &request.reference);
    let strategy = request
        .overrides
        .strategy
        .unwrap_or_else(|| FoldStrategy::from_seed(seed));
    let paper = request
        .overrides
        .paper
        .unwrap_or_else(|| PaperProperties::from_seed(seed));
    let weight_range = request
        .overrides
        .weight_range
        .unwrap_or_else(|| WeightRange::from_seed(seed));

    let simulator = FoldSimulator::new(seed, layout.canvas(), strategy, paper, weight_range);
    let cycle_length = simulator.cycle().length;
    let outcome = simulator.run(num_folds as usize);

    let fold_targets = FoldTargets {
        first: outcome.first_target,
        last: outcome.last_target,
        first_cell: outcome.first_target.map(|point| layout.cell_at(point)),
        last_cell: outcome.last_target.map(|point| layout.cell_at(point)),
    };

    let density = DensityField::aggregate(&outcome.creases, &layout, &paper);
    let palette = generate_palette(seed, outcome.creases.len());

    Composition {
        seed,
        num_folds,
        reference: request.reference,
        layout,
        strategy,
        paper,
        weight_range,
        cycle_length,
        creases: outcome.creases,
        fold_targets,
        density,
        palette,
    }
}
