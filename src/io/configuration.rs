//! Generation constants and runtime configuration defaults
//!
//! Every value here feeds a seeded draw or a geometric decision somewhere in
//! the pipeline. Changing any of them changes the output of every seed.

// Reference coordinate space shared by every output resolution
/// Width of the reference space in which layouts are solved
pub const REFERENCE_WIDTH: u32 = 1200;
/// Height of the reference space in which layouts are solved
pub const REFERENCE_HEIGHT: u32 = 1500;
/// Fixed margin between the reference edge and the drawable area
pub const DRAWING_MARGIN: u32 = 60;
/// Additional symmetric padding inside the drawing margin
pub const DEFAULT_PADDING: u32 = 0;

// Cell sizing
/// Smallest admissible cell edge in reference units
pub const CELL_MIN: u32 = 12;
/// Largest admissible cell edge in reference units
pub const CELL_MAX: u32 = 80;
/// Cell edge used when no divisor pair qualifies
pub const DEFAULT_CELL_SIZE: u32 = 24;
/// Advance width of one glyph relative to its font size
pub const CHAR_WIDTH_RATIO: f64 = 0.6;
/// Cell height relative to the font size it hosts
pub const GLYPH_HEIGHT_RATIO: f64 = 1.2;
/// Maximum long-side to short-side ratio of a cell
pub const MAX_ASPECT_RATIO: f64 = 3.0;

/// Cell size bands as (cumulative probability, start quantile, end quantile)
///
/// Bands are very small, small, medium, large, very large over the
/// area-sorted list of admissible cell sizes.
pub const CELL_SIZE_BANDS: [(f64, f64, f64); 5] = [
    (0.03, 0.00, 0.10),
    (0.10, 0.10, 0.25),
    (0.45, 0.25, 0.60),
    (0.95, 0.60, 0.90),
    (1.00, 0.90, 1.00),
];

// Gap and overlap solving
/// Probability that an axis receives spacing or overlap at all
pub const GAP_CHANCE: f64 = 0.35;
/// Gap ratios relative to the cell edge with their selection weights
///
/// Negative ratios overlap neighbouring cells.
pub const GAP_RATIOS: [(f64, f64); 7] = [
    (-0.25, 0.05),
    (-0.15, 0.10),
    (-0.08, 0.15),
    (0.08, 0.25),
    (0.15, 0.20),
    (0.25, 0.15),
    (0.50, 0.10),
];

// Fold simulation
/// Upper bound on the number of folds in one composition
pub const MAX_FOLDS: u32 = 500;
/// Smallest breathing cycle length (inclusive)
pub const MIN_CYCLE_LENGTH: usize = 4;
/// Largest breathing cycle length (exclusive)
pub const MAX_CYCLE_LENGTH: usize = 70;
/// Lower bound of a per-slot reduction factor
pub const REDUCTION_MIN: f64 = 0.001;
/// Width of the per-slot reduction factor range
pub const REDUCTION_SPAN: f64 = 0.25;
/// Weight floor applied when a breathing cycle decays existing creases
pub const WEIGHT_FLOOR: f64 = 0.01;
/// Registered creases must carry strictly more weight than this
pub const MIN_CREASE_WEIGHT: f64 = 0.01;
/// Lowest probability of anchoring on the canvas boundary
pub const BOUNDARY_PROBABILITY_FLOOR: f64 = 0.2;
/// Per-fold decay of the boundary anchor probability
pub const BOUNDARY_PROBABILITY_DECAY: f64 = 0.015;
/// Minimum crease length relative to the shorter canvas side
pub const MIN_LENGTH_RATIO: f64 = 0.15;
/// Folds between refreshes of the cached intersection list
pub const INTERSECTION_REFRESH_INTERVAL: usize = 5;
/// Open parameter interval in which segments are considered to cross
pub const INTERSECTION_T_MIN: f64 = 0.001;
/// Open parameter interval in which segments are considered to cross
pub const INTERSECTION_T_MAX: f64 = 0.999;
/// Endpoint tolerance for rejecting a candidate that repeats a crease
pub const DUPLICATE_TOLERANCE: f64 = 1.0;
/// Angular window below which two creases count as parallel (degrees)
pub const PARALLEL_WINDOW: f64 = 15.0;
/// Angular window above which two creases count as perpendicular (degrees)
pub const PERPENDICULAR_WINDOW: f64 = 75.0;
/// Upper bound of the seeded relationship bias strengths
pub const MAX_RELATIONSHIP_BIAS: f64 = 0.8;
/// Fold target inset relative to the shorter canvas side
pub const FOLD_TARGET_MARGIN_RATIO: f64 = 0.05;

// Density aggregation
/// Share of the cell count that total weight may reach before compression
pub const SATURATION_CELL_SHARE: f64 = 0.5;
/// Fraction of the excess weight that survives the saturation ceiling
pub const SATURATION_BLEED: f64 = 0.3;
/// Percentiles for the light, medium, dense and extreme thresholds
pub const THRESHOLD_PERCENTILES: [f64; 3] = [0.70, 0.94, 0.985];
/// Minimum separation between consecutive thresholds
pub const THRESHOLD_SEPARATION: f64 = 0.01;

// Palette
/// Probability of the monochrome pathway
pub const MONOCHROME_CHANCE: f64 = 0.12;
/// Probability that the accent repeats the mark
pub const ACCENT_REPEATS_MARK_CHANCE: f64 = 0.4;
/// Probability of preferring a hot accent hue when one qualifies
pub const HOT_ACCENT_CHANCE: f64 = 0.6;
/// Minimum luminance distance of an accent from ground and mark
pub const ACCENT_MIN_DISTANCE: f64 = 20.0;
/// Minimum ground-mark luminance distance before the safety fallback fires
pub const SAFE_CONTRAST: f64 = 25.0;
/// Gradient probability for an arbitrarily dense composition
pub const GRADIENT_FLOOR: f64 = 0.08;
/// Gradient probability for a composition without creases
pub const GRADIENT_CEILING: f64 = 0.35;
/// Decay of the gradient probability per crease
pub const GRADIENT_DECAY: f64 = 0.03;
/// Web-safe channel step
pub const WEB_SAFE_STEP: u8 = 51;
/// Minimum luminance distance (0-1 scale) between a shifted colour and the anchor
pub const GRADIENT_MIN_DISTANCE: f64 = 0.2;

// Command-line defaults
/// Seed of a default request, used by benches and documentation examples
pub const DEFAULT_SEED: i64 = 42;
/// Number of consecutive seeds rendered per invocation by default
pub const DEFAULT_BATCH_COUNT: usize = 1;
/// Default preview width in pixels
pub const DEFAULT_OUTPUT_WIDTH: u32 = 600;
/// Default preview height in pixels
pub const DEFAULT_OUTPUT_HEIGHT: u32 = 750;
/// Prefix of every output file name
pub const OUTPUT_PREFIX: &str = "fold_";
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
