//! Intersection density aggregation with adaptive thresholds
//!
//! Crossings are binned into grid cells, compressed under a soft saturation
//! ceiling, and ranked against percentile thresholds of the composition's own
//! weight distribution.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::{
    algorithm::{fold::Crease, intersection::find_intersections, paper::PaperProperties},
    io::configuration::{
        SATURATION_BLEED, SATURATION_CELL_SHARE, THRESHOLD_PERCENTILES, THRESHOLD_SEPARATION,
    },
    math::statistics::{percentile_index, sort_ascending},
    spatial::GridLayout,
};

/// Percentile cut points over positive cell weights
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Upper bound of level 1 (70th percentile)
    pub light: f64,
    /// Upper bound of level 2 (94th percentile)
    pub medium: f64,
    /// Rank just above the 94th percentile
    pub dense: f64,
    /// 98.5th percentile
    pub extreme: f64,
}

impl Thresholds {
    /// Derive thresholds from cell weights, ignoring zeros
    ///
    /// Each threshold is forced at least [`THRESHOLD_SEPARATION`] above the
    /// previous one. Returns `None` when no weight is positive.
    pub fn from_weights(weights: &[f64]) -> Option<Self> {
        let mut positive: Vec<f64> = weights.iter().copied().filter(|&w| w > 0.0).collect();
        if positive.is_empty() {
            return None;
        }
        sort_ascending(&mut positive);

        let n = positive.len();
        let [p_light, p_medium, p_extreme] = THRESHOLD_PERCENTILES;
        let medium_index = percentile_index(n, p_medium);
        let at = |index: usize| positive.get(index.min(n - 1)).copied().unwrap_or(0.0);

        let light = at(percentile_index(n, p_light));
        let medium = at(medium_index).max(light + THRESHOLD_SEPARATION);
        let dense = at(medium_index + 1).max(medium + THRESHOLD_SEPARATION);
        let extreme = at(percentile_index(n, p_extreme)).max(dense + THRESHOLD_SEPARATION);

        Some(Self {
            light,
            medium,
            dense,
            extreme,
        })
    }

    /// Density level 0-3 of a cell weight
    pub fn level(&self, weight: f64) -> u8 {
        if weight <= 0.0 {
            0
        } else if weight <= self.light {
            1
        } else if weight <= self.medium {
            2
        } else {
            3
        }
    }
}

/// Soft-cap factor for a total weight above the ceiling
///
/// Returns `ratio + (1 - ratio) * 0.3` with `ratio = ceiling / total`, or
/// `None` when the total does not exceed the ceiling.
pub fn saturation_factor(total: f64, ceiling: f64) -> Option<f64> {
    if total <= ceiling || total <= 0.0 {
        return None;
    }
    let ratio = ceiling / total;
    Some(ratio + (1.0 - ratio) * SATURATION_BLEED)
}

/// Saturation ceiling for a grid: `cols * rows * 0.5 * multiplier`
pub fn saturation_ceiling(layout: &GridLayout, ceiling_multiplier: f64) -> f64 {
    f64::from(layout.cols) * f64::from(layout.rows) * SATURATION_CELL_SHARE * ceiling_multiplier
}

/// Per-cell aggregation of crease crossings
///
/// Arrays are indexed `[row, col]`; accessors take `(col, row)`.
#[derive(Clone, Debug, PartialEq)]
pub struct DensityField {
    /// Number of columns
    pub cols: u32,
    /// Number of rows
    pub rows: u32,
    /// Summed intersection weight, after saturation
    pub weights: Array2<f64>,
    /// Largest depth gap among a cell's intersections
    pub max_gaps: Array2<usize>,
    /// Intersections per cell
    pub counts: Array2<u32>,
    /// Density level 0-3
    pub levels: Array2<u8>,
    /// Cells sharing the largest observed gap
    pub accents: Array2<bool>,
    /// Thresholds, absent when no cell carries weight
    pub thresholds: Option<Thresholds>,
    /// Intersections that passed the paper threshold
    pub intersection_count: usize,
    /// Applied saturation factor, if the ceiling was exceeded
    pub saturation: Option<f64>,
}

impl DensityField {
    /// Aggregate the crossings of a finished crease list
    pub fn aggregate(creases: &[Crease], layout: &GridLayout, paper: &PaperProperties) -> Self {
        let shape = (layout.rows as usize, layout.cols as usize);
        let mut weights = Array2::<f64>::zeros(shape);
        let mut max_gaps = Array2::<usize>::zeros(shape);
        let mut counts = Array2::<u32>::zeros(shape);
        let mut intersection_count = 0;

        if layout.cell_count() > 0 {
            for intersection in find_intersections(creases) {
                if intersection.weight < paper.intersection_threshold {
                    continue;
                }
                intersection_count += 1;

                let (col, row) = layout.cell_at(intersection.point);
                let index = [row as usize, col as usize];
                if let Some(weight) = weights.get_mut(index) {
                    *weight += intersection.weight;
                }
                if let Some(gap) = max_gaps.get_mut(index) {
                    *gap = (*gap).max(intersection.gap);
                }
                if let Some(count) = counts.get_mut(index) {
                    *count += 1;
                }
            }
        }

        let ceiling = saturation_ceiling(layout, paper.ceiling_multiplier);
        let saturation = saturation_factor(weights.sum(), ceiling);
        if let Some(factor) = saturation {
            weights.mapv_inplace(|weight| weight * factor);
        }

        let flat: Vec<f64> = weights.iter().copied().collect();
        let thresholds = Thresholds::from_weights(&flat);
        let levels = thresholds.map_or_else(
            || Array2::<u8>::zeros(shape),
            |thresholds| weights.mapv(|weight| thresholds.level(weight)),
        );

        let widest = max_gaps
            .iter()
            .zip(counts.iter())
            .filter(|&(_, &count)| count > 0)
            .map(|(&gap, _)| gap)
            .max()
            .unwrap_or(0);
        let accents = if widest > 0 {
            max_gaps.mapv(|gap| gap == widest)
        } else {
            Array2::from_elem(shape, false)
        };

        log::debug!(
            "{intersection_count} intersections over {}x{} cells (saturation {saturation:?})",
            layout.cols,
            layout.rows
        );

        Self {
            cols: layout.cols,
            rows: layout.rows,
            weights,
            max_gaps,
            counts,
            levels,
            accents,
            thresholds,
            intersection_count,
            saturation,
        }
    }

    /// Weight of a cell
    pub fn weight(&self, col: u32, row: u32) -> f64 {
        self.weights
            .get([row as usize, col as usize])
            .copied()
            .unwrap_or(0.0)
    }

    /// Density level of a cell
    pub fn level(&self, col: u32, row: u32) -> u8 {
        self.levels
            .get([row as usize, col as usize])
            .copied()
            .unwrap_or(0)
    }

    /// Largest depth gap in a cell
    pub fn max_gap(&self, col: u32, row: u32) -> usize {
        self.max_gaps
            .get([row as usize, col as usize])
            .copied()
            .unwrap_or(0)
    }

    /// Intersections in a cell
    pub fn count(&self, col: u32, row: u32) -> u32 {
        self.counts
            .get([row as usize, col as usize])
            .copied()
            .unwrap_or(0)
    }

    /// Whether a cell carries the accent flag
    pub fn is_accent(&self, col: u32, row: u32) -> bool {
        self.accents
            .get([row as usize, col as usize])
            .copied()
            .unwrap_or(false)
    }

    /// Sum of all cell weights
    pub fn total_weight(&self) -> f64 {
        self.weights.sum()
    }

    /// Number of cells at each level 0-3
    pub fn level_histogram(&self) -> [usize; 4] {
        let mut histogram = [0; 4];
        for &level in &self.levels {
            if let Some(slot) = histogram.get_mut(level as usize) {
                *slot += 1;
            }
        }
        histogram
    }

    /// Cells whose weight exceeds the extreme threshold
    pub fn peak_cells(&self) -> usize {
        self.thresholds.map_or(0, |thresholds| {
            self.weights
                .iter()
                .filter(|&&weight| weight > thresholds.extreme)
                .count()
        })
    }
}
