//! Grid layout solving in a fixed reference space
//!
//! The cell size is chosen from the divisors of the drawable extent so the
//! grid tiles it exactly before spacing is applied. All randomness is spent
//! in reference units; output resolutions only rescale the solved layout.

use serde::{Deserialize, Serialize};

use crate::io::configuration::{
    CELL_MAX, CELL_MIN, CELL_SIZE_BANDS, CHAR_WIDTH_RATIO, DEFAULT_CELL_SIZE, DEFAULT_PADDING,
    DRAWING_MARGIN, GAP_CHANCE, GAP_RATIOS, GLYPH_HEIGHT_RATIO, MAX_ASPECT_RATIO,
    REFERENCE_HEIGHT, REFERENCE_WIDTH,
};
use crate::math::geometry::{Canvas, Point};
use crate::math::rng::{SeededStream, StreamOffset};

/// Fixed coordinate space in which layouts are solved
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceSpace {
    /// Total width in reference units
    pub width: u32,
    /// Total height in reference units
    pub height: u32,
    /// Drawing margin on every side
    pub margin: u32,
    /// Extra padding inside the margin on every side
    pub padding: u32,
}

impl Default for ReferenceSpace {
    fn default() -> Self {
        Self {
            width: REFERENCE_WIDTH,
            height: REFERENCE_HEIGHT,
            margin: DRAWING_MARGIN,
            padding: DEFAULT_PADDING,
        }
    }
}

impl ReferenceSpace {
    /// Distance from the reference edge to the drawable area
    pub const fn inset(&self) -> u32 {
        self.margin.saturating_add(self.padding)
    }

    /// Drawable width after removing margin and padding on both sides
    pub const fn inner_width(&self) -> u32 {
        self.width.saturating_sub(self.inset().saturating_mul(2))
    }

    /// Drawable height after removing margin and padding on both sides
    pub const fn inner_height(&self) -> u32 {
        self.height.saturating_sub(self.inset().saturating_mul(2))
    }
}

/// Solved cell grid in reference units
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    /// Number of columns
    pub cols: u32,
    /// Number of rows
    pub rows: u32,
    /// Cell width
    pub cell_width: u32,
    /// Cell height
    pub cell_height: u32,
    /// Horizontal spacing between cells; negative values overlap
    pub col_gap: i32,
    /// Vertical spacing between cells; negative values overlap
    pub row_gap: i32,
    /// Distance between the left edges of neighbouring columns
    pub stride_x: u32,
    /// Distance between the top edges of neighbouring rows
    pub stride_y: u32,
    /// Left edge of the first column
    pub offset_x: u32,
    /// Top edge of the first row
    pub offset_y: u32,
}

/// Spacing solution along one axis
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisSolution {
    /// Spacing between neighbouring cells
    pub gap: i32,
    /// Cell edge plus spacing
    pub stride: u32,
    /// Number of cells that fit
    pub count: u32,
    /// Position of the first cell
    pub offset: u32,
}

impl GridLayout {
    /// Solve the layout for a seed
    pub fn solve(seed: i64, reference: &ReferenceSpace) -> Self {
        let mut rng = SeededStream::for_purpose(seed, StreamOffset::Grid);
        let (cell_width, cell_height) =
            choose_cell_size(reference.inner_width(), reference.inner_height(), &mut rng);

        let x = solve_axis(
            reference.inner_width(),
            cell_width,
            reference.inset(),
            &mut rng,
        );
        let y = solve_axis(
            reference.inner_height(),
            cell_height,
            reference.inset(),
            &mut rng,
        );

        let layout = Self {
            cols: x.count,
            rows: y.count,
            cell_width,
            cell_height,
            col_gap: x.gap,
            row_gap: y.gap,
            stride_x: x.stride,
            stride_y: y.stride,
            offset_x: x.offset,
            offset_y: y.offset,
        };

        log::debug!(
            "seed {seed}: {}x{} cells of {}x{} (gaps {}, {})",
            layout.cols,
            layout.rows,
            layout.cell_width,
            layout.cell_height,
            layout.col_gap,
            layout.row_gap
        );

        layout
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> u32 {
        self.cols.saturating_mul(self.rows)
    }

    /// Grid-pixel canvas on which creases are simulated
    ///
    /// Cells are packed edge to edge here; spacing only affects placement
    /// on the output surface.
    pub fn canvas(&self) -> Canvas {
        Canvas::new(
            f64::from(self.cols) * f64::from(self.cell_width),
            f64::from(self.rows) * f64::from(self.cell_height),
        )
    }

    /// Cell containing a grid-pixel point as `(col, row)`
    ///
    /// Points on or beyond the far edges clamp to the last column or row.
    pub fn cell_at(&self, point: Point) -> (u32, u32) {
        let col = (point.x / f64::from(self.cell_width.max(1))).floor().max(0.0) as u32;
        let row = (point.y / f64::from(self.cell_height.max(1))).floor().max(0.0) as u32;
        (
            col.min(self.cols.saturating_sub(1)),
            row.min(self.rows.saturating_sub(1)),
        )
    }

    /// Top-left corner of a cell in reference units
    pub fn cell_origin(&self, col: u32, row: u32) -> (u32, u32) {
        (
            self.offset_x + col * self.stride_x,
            self.offset_y + row * self.stride_y,
        )
    }

    /// Human-readable cell size such as `24x30`
    pub fn cell_size_label(&self) -> String {
        format!("{}x{}", self.cell_width, self.cell_height)
    }

    /// Rescale the layout for an output surface without redrawing randomness
    pub fn scaled(
        &self,
        reference: &ReferenceSpace,
        output_width: u32,
        output_height: u32,
    ) -> ScaledLayout {
        ScaledLayout {
            layout: *self,
            scale_x: f64::from(output_width) / f64::from(reference.width.max(1)),
            scale_y: f64::from(output_height) / f64::from(reference.height.max(1)),
        }
    }
}

/// Layout projected onto an output resolution
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaledLayout {
    /// Layout in reference units
    pub layout: GridLayout,
    /// Output pixels per reference unit horizontally
    pub scale_x: f64,
    /// Output pixels per reference unit vertically
    pub scale_y: f64,
}

/// Output-space rectangle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellRect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl ScaledLayout {
    /// Output rectangle of a cell
    pub fn cell_rect(&self, col: u32, row: u32) -> CellRect {
        let (x, y) = self.layout.cell_origin(col, row);
        CellRect {
            x: f64::from(x) * self.scale_x,
            y: f64::from(y) * self.scale_y,
            width: f64::from(self.layout.cell_width) * self.scale_x,
            height: f64::from(self.layout.cell_height) * self.scale_y,
        }
    }

    /// Map a grid-pixel point onto the output surface
    ///
    /// The point is first placed inside its cell, then the cell is moved to
    /// its spaced position and scaled.
    pub fn project(&self, point: Point) -> Point {
        let (col, row) = self.layout.cell_at(point);
        let rect = self.cell_rect(col, row);
        let local_x = point.x - f64::from(col * self.layout.cell_width);
        let local_y = point.y - f64::from(row * self.layout.cell_height);
        Point::new(
            rect.x + local_x * self.scale_x,
            rect.y + local_y * self.scale_y,
        )
    }
}

/// Divisors of `extent` within the admissible cell range
pub fn cell_divisors(extent: u32) -> Vec<u32> {
    (CELL_MIN..=CELL_MAX.min(extent))
        .filter(|d| extent % d == 0)
        .collect()
}

/// All admissible `(width, height)` pairs sorted by area
///
/// A pair qualifies when its aspect ratio is at most [`MAX_ASPECT_RATIO`] and
/// its width can host one glyph at the font size implied by its height.
pub fn candidate_cell_sizes(inner_width: u32, inner_height: u32) -> Vec<(u32, u32)> {
    let widths = cell_divisors(inner_width);
    let heights = cell_divisors(inner_height);

    let mut pairs = Vec::with_capacity(widths.len() * heights.len());
    for &w in &widths {
        for &h in &heights {
            let long = f64::from(w.max(h));
            let short = f64::from(w.min(h));
            let fits_glyph = f64::from(w) >= f64::from(h) * CHAR_WIDTH_RATIO / GLYPH_HEIGHT_RATIO;
            if long / short <= MAX_ASPECT_RATIO && fits_glyph {
                pairs.push((w, h));
            }
        }
    }

    pairs.sort_by_key(|&(w, h)| (w * h, w, h));
    pairs
}

/// Pick a cell size through the fixed size-band table
pub fn choose_cell_size(
    inner_width: u32,
    inner_height: u32,
    rng: &mut SeededStream,
) -> (u32, u32) {
    let pairs = candidate_cell_sizes(inner_width, inner_height);
    if pairs.is_empty() {
        return (DEFAULT_CELL_SIZE, DEFAULT_CELL_SIZE);
    }

    let band_draw = rng.next_f64();
    let (_, start_q, end_q) = CELL_SIZE_BANDS
        .iter()
        .copied()
        .find(|&(cumulative, _, _)| band_draw < cumulative)
        .unwrap_or((1.0, 0.9, 1.0));

    let n = pairs.len();
    let start = ((start_q * n as f64).floor() as usize).min(n - 1);
    let end = ((end_q * n as f64).ceil() as usize).clamp(start + 1, n);
    let index = start + rng.index(end - start);

    pairs
        .get(index)
        .copied()
        .unwrap_or((DEFAULT_CELL_SIZE, DEFAULT_CELL_SIZE))
}

/// Decide spacing along one axis and fit as many cells as possible
pub fn solve_axis(inner: u32, cell: u32, inset: u32, rng: &mut SeededStream) -> AxisSolution {
    let gap = if rng.chance(GAP_CHANCE) {
        let weights: Vec<f64> = GAP_RATIOS.iter().map(|&(_, weight)| weight).collect();
        let ratio = GAP_RATIOS
            .get(rng.weighted_index(&weights))
            .map_or(0.0, |&(ratio, _)| ratio);
        (f64::from(cell) * ratio).round() as i32
    } else {
        0
    };

    let stride = (cell as i32 + gap).max(1) as u32;
    let count = if inner >= cell {
        (inner - cell) / stride + 1
    } else {
        1
    };
    let used = (count - 1) * stride + cell;
    let leftover = inner.saturating_sub(used);

    AxisSolution {
        gap,
        stride,
        count,
        offset: inset + leftover / 2,
    }
}
