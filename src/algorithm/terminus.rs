//! Terminus selection: where the next crease ends
//!
//! Straight, diagonal and radial strategies compute the end point exactly.
//! Clustered and random compositions weigh a small pool of candidates on the
//! boundary and on existing structure.

use crate::{
    algorithm::{
        anchor::Anchor,
        fold::{AnchorType, Crease, FoldContext},
        strategy::FoldStrategy,
    },
    math::{
        geometry::{Canvas, Corner, Edge, Point, point_segment_distance, segment_angle},
        rng::SeededStream,
    },
};

/// Base weight of the opposite-edge candidate at the first fold
pub const OPPOSITE_EDGE_WEIGHT: f64 = 3.0;
/// Weight every opposite-edge candidate keeps at the last fold
pub const OPPOSITE_EDGE_FLOOR: f64 = 0.5;
/// Weight of each adjacent-edge candidate
pub const ADJACENT_EDGE_WEIGHT: f64 = 1.0;
/// Adjacent-edge boost for corner anchors
pub const CORNER_ADJACENT_BOOST: f64 = 2.0;
/// Weight of the corner candidate
pub const CORNER_TERMINUS_WEIGHT: f64 = 0.5;
/// Number of existing creases sampled as candidates
pub const CREASE_SAMPLES: usize = 3;
/// Growth of crease-candidate weight over the simulation
pub const CREASE_WEIGHT_GROWTH: f64 = 2.5;
/// Growth of intersection-candidate weight over the simulation
pub const INTERSECTION_WEIGHT_GROWTH: f64 = 2.0;
/// Distance below which a boundary point counts as a corner
pub const CORNER_TOLERANCE: f64 = 0.5;

const DEGENERATE_LENGTH: f64 = 1e-9;

/// End point of a candidate crease
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Terminus {
    /// Location
    pub point: Point,
    /// What the terminus sits on
    pub kind: AnchorType,
}

/// Weighted terminus candidate
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// Location
    pub point: Point,
    /// What the candidate sits on
    pub kind: AnchorType,
    /// Selection weight
    pub weight: f64,
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Choose the end point of the next crease
///
/// Returns `None` only for a zero-length segment, which the simulator skips.
pub fn select_terminus(
    context: &FoldContext<'_>,
    anchor: &Anchor,
    rng: &mut SeededStream,
) -> Option<Terminus> {
    let canvas = context.canvas;
    let chosen = match *context.strategy {
        FoldStrategy::Horizontal => Some(straight_terminus(canvas, anchor, Axis::Horizontal)),
        FoldStrategy::Vertical => Some(straight_terminus(canvas, anchor, Axis::Vertical)),
        FoldStrategy::Grid => {
            let axis = if context.fold_index % 2 == 0 {
                Axis::Horizontal
            } else {
                Axis::Vertical
            };
            Some(straight_terminus(canvas, anchor, axis))
        }
        FoldStrategy::Diagonal { angle, jitter } => {
            diagonal_terminus(canvas, anchor, angle + jitter, context.min_length())
        }
        FoldStrategy::Radial { focal_x, focal_y } => {
            let focal = Point::new(focal_x * canvas.width, focal_y * canvas.height);
            radial_terminus(canvas, anchor, focal)
                .or_else(|| weighted_terminus(context, anchor, None, rng))
        }
        FoldStrategy::Clustered {
            cluster_x,
            cluster_y,
            spread,
        } => {
            let focus = Point::new(cluster_x * canvas.width, cluster_y * canvas.height);
            weighted_terminus(context, anchor, Some((focus, spread)), rng)
        }
        FoldStrategy::Random => weighted_terminus(context, anchor, None, rng),
    };

    let terminus = chosen.unwrap_or_else(|| fallback_terminus(canvas, anchor));
    (terminus.point.distance(anchor.point) > DEGENERATE_LENGTH).then_some(terminus)
}

/// Edge the candidate pool treats as "across" from the anchor
pub fn opposite_edge(canvas: Canvas, anchor: &Anchor) -> Edge {
    anchor
        .edge
        .map_or_else(|| canvas.farthest_edge(anchor.point), Edge::opposite)
}

/// Midpoint of the opposite edge
pub fn fallback_terminus(canvas: Canvas, anchor: &Anchor) -> Terminus {
    Terminus {
        point: canvas.edge_midpoint(opposite_edge(canvas, anchor)),
        kind: AnchorType::Edge,
    }
}

/// Classify a boundary point as an edge or a corner
pub fn boundary_kind(canvas: Canvas, point: Point) -> AnchorType {
    if canvas.is_corner(point, CORNER_TOLERANCE) {
        AnchorType::Corner
    } else {
        AnchorType::Edge
    }
}

fn straight_terminus(canvas: Canvas, anchor: &Anchor, axis: Axis) -> Terminus {
    let point = match axis {
        Axis::Horizontal => {
            let to_right = match anchor.edge {
                Some(Edge::Left) => true,
                Some(Edge::Right) => false,
                _ => canvas.width - anchor.point.x >= anchor.point.x,
            };
            Point::new(if to_right { canvas.width } else { 0.0 }, anchor.point.y)
        }
        Axis::Vertical => {
            let to_bottom = match anchor.edge {
                Some(Edge::Top) => true,
                Some(Edge::Bottom) => false,
                _ => canvas.height - anchor.point.y >= anchor.point.y,
            };
            Point::new(anchor.point.x, if to_bottom { canvas.height } else { 0.0 })
        }
    };

    Terminus {
        point,
        kind: boundary_kind(canvas, point),
    }
}

/// Boundary hit of the ray at `angle` degrees from the anchor
///
/// The reverse direction is tried when the forward ray is too short.
pub fn diagonal_terminus(
    canvas: Canvas,
    anchor: &Anchor,
    angle: f64,
    min_length: f64,
) -> Option<Terminus> {
    let radians = angle.to_radians();
    let (dx, dy) = (radians.cos(), radians.sin());

    [(dx, dy), (-dx, -dy)]
        .into_iter()
        .filter_map(|(x, y)| canvas.ray_to_boundary(anchor.point, x, y))
        .find(|point| point.distance(anchor.point) >= min_length)
        .map(|point| Terminus {
            point,
            kind: boundary_kind(canvas, point),
        })
}

/// Boundary hit of the ray from the focal point away from the anchor
///
/// The resulting crease runs from the anchor through the focal point.
pub fn radial_terminus(canvas: Canvas, anchor: &Anchor, focal: Point) -> Option<Terminus> {
    let dx = focal.x - anchor.point.x;
    let dy = focal.y - anchor.point.y;
    if dx.hypot(dy) <= DEGENERATE_LENGTH {
        return None;
    }

    canvas
        .ray_to_boundary(focal, dx, dy)
        .map(|point| Terminus {
            point,
            kind: boundary_kind(canvas, point),
        })
}

/// Build the weighted candidate pool for an anchor
///
/// Candidates shorter than the minimum length are dropped. Weights favour the
/// opposite edge early in the simulation, existing structure later, and are
/// nudged by the relationship bias. A cluster `(focus, spread)` additionally
/// scales each weight by the inverse distance from the candidate segment to
/// the focus.
pub fn terminus_candidates(
    context: &FoldContext<'_>,
    anchor: &Anchor,
    cluster: Option<(Point, f64)>,
    rng: &mut SeededStream,
) -> Vec<Candidate> {
    let canvas = context.canvas;
    let progress = context.progress();
    let opposite = opposite_edge(canvas, anchor);

    let mut candidates = Vec::with_capacity(4 + CREASE_SAMPLES + 1);

    let point = canvas.edge_point(opposite, rng.next_f64());
    candidates.push(Candidate {
        point,
        kind: boundary_kind(canvas, point),
        weight: OPPOSITE_EDGE_WEIGHT * (1.0 - progress) + OPPOSITE_EDGE_FLOOR,
    });

    let adjacent_weight = if anchor.kind == AnchorType::Corner {
        ADJACENT_EDGE_WEIGHT * CORNER_ADJACENT_BOOST
    } else {
        ADJACENT_EDGE_WEIGHT
    };
    for edge in opposite.adjacent() {
        let point = canvas.edge_point(edge, rng.next_f64());
        candidates.push(Candidate {
            point,
            kind: boundary_kind(canvas, point),
            weight: adjacent_weight,
        });
    }

    let corner = rng.pick(&Corner::ALL).copied().unwrap_or(Corner::TopLeft);
    candidates.push(Candidate {
        point: canvas.corner_point(corner),
        kind: AnchorType::Corner,
        weight: CORNER_TERMINUS_WEIGHT,
    });

    if !context.creases.is_empty() {
        for _ in 0..CREASE_SAMPLES {
            if let Some(crease) = rng.pick(context.creases) {
                candidates.push(Candidate {
                    point: crease.point_at(rng.range(0.2, 0.8)),
                    kind: AnchorType::Crease,
                    weight: 0.5 + CREASE_WEIGHT_GROWTH * progress,
                });
            }
        }
    }

    if let Some(&point) = rng.pick(context.intersections) {
        candidates.push(Candidate {
            point,
            kind: AnchorType::Intersection,
            weight: 0.5 + INTERSECTION_WEIGHT_GROWTH * progress,
        });
    }

    let min_length = context.min_length();
    let existing: Vec<f64> = context.creases.iter().map(Crease::angle).collect();
    candidates.retain(|candidate| candidate.point.distance(anchor.point) >= min_length);

    for candidate in &mut candidates {
        let angle = segment_angle(anchor.point, candidate.point);
        candidate.weight *= context.bias.factor(angle, &existing);

        if let Some((focus, spread)) = cluster {
            let falloff = (spread * canvas.min_side()).max(f64::EPSILON);
            let distance = point_segment_distance(focus, anchor.point, candidate.point);
            candidate.weight /= 1.0 + distance / falloff;
        }
    }

    candidates
}

fn weighted_terminus(
    context: &FoldContext<'_>,
    anchor: &Anchor,
    cluster: Option<(Point, f64)>,
    rng: &mut SeededStream,
) -> Option<Terminus> {
    let candidates = terminus_candidates(context, anchor, cluster, rng);
    if candidates.is_empty() {
        return None;
    }

    let weights: Vec<f64> = candidates.iter().map(|candidate| candidate.weight).collect();
    candidates
        .get(rng.weighted_index(&weights))
        .map(|candidate| Terminus {
            point: candidate.point,
            kind: candidate.kind,
        })
}
