//! Human-readable metadata projection of a composition

use serde::{Deserialize, Serialize};

use crate::algorithm::{executor::Composition, paper::PaperProperties};

/// Absorbency bucket upper bounds and their labels, in ascending order
pub const ABSORBENCY_LABELS: [(f64, &str); 4] = [
    (0.3, "sized"),
    (0.5, "hard"),
    (0.7, "soft"),
    (f64::INFINITY, "blotting"),
];

/// Affinity strength bucket upper bounds and their labels
pub const GRAIN_LABELS: [(f64, &str); 3] = [
    (0.27, "faint"),
    (0.54, "firm"),
    (f64::INFINITY, "strong"),
];

/// Trait strings and counts describing one composition
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Traits {
    /// Fold strategy name
    pub fold_strategy: String,
    /// Palette label, e.g. `value` or `gradient-clash`
    pub palette: String,
    /// Palette pathway name
    pub palette_strategy: String,
    /// Chance gradient mode had, rounded to three decimals
    pub gradient_probability: f64,
    /// 2 or 3
    pub color_count: u8,
    /// Folds attempted
    pub folds: u32,
    /// Creases registered
    pub creases: usize,
    /// Paper descriptor
    pub paper: String,
    /// Cell size, `WxH`
    pub cell_size: String,
    /// Grid dimensions, `COLSxROWS`
    pub grid: String,
    /// Intersections that reached the density field
    pub intersections: usize,
    /// Cells at density level 1 or above
    pub active_cells: usize,
    /// Cells at density level 3
    pub dense_cells: usize,
    /// Cells above the extreme threshold
    pub peak_cells: usize,
    /// Cells carrying the accent flag
    pub accent_cells: usize,
}

impl Traits {
    /// Project a finished composition
    pub fn from_composition(composition: &Composition) -> Self {
        let density = &composition.density;
        let [_, light, medium, dense] = density.level_histogram();

        Self {
            fold_strategy: composition.strategy.kind().name().to_owned(),
            palette: composition.palette.label(),
            palette_strategy: composition.palette.strategy.name().to_owned(),
            gradient_probability: (composition.palette.gradient_probability * 1000.0).round()
                / 1000.0,
            color_count: composition.palette.color_count,
            folds: composition.num_folds,
            creases: composition.creases.len(),
            paper: paper_descriptor(&composition.paper),
            cell_size: composition.layout.cell_size_label(),
            grid: format!("{}x{}", composition.layout.cols, composition.layout.rows),
            intersections: density.intersection_count,
            active_cells: light + medium + dense,
            dense_cells: dense,
            peak_cells: density.peak_cells(),
            accent_cells: density.accents.iter().filter(|&&accent| accent).count(),
        }
    }
}

/// Bucket label for a value against ascending upper bounds
pub fn bucket_label(value: f64, buckets: &[(f64, &'static str)]) -> &'static str {
    buckets
        .iter()
        .find(|&&(bound, _)| value < bound)
        .or_else(|| buckets.last())
        .map_or("", |&(_, label)| label)
}

/// Descriptor such as `soft open sheet, free grain`
pub fn paper_descriptor(paper: &PaperProperties) -> String {
    let absorbency = bucket_label(paper.absorbency, &ABSORBENCY_LABELS);
    let threshold = if paper.intersection_threshold > 0.0 {
        "selective"
    } else {
        "open"
    };
    let grain = paper.angle_affinity.map_or_else(
        || "free grain".to_owned(),
        |angle| {
            format!(
                "{} grain {angle:.0}°",
                bucket_label(paper.affinity_strength, &GRAIN_LABELS)
            )
        },
    );
    format!("{absorbency} {threshold} sheet, {grain}")
}
