//! Anchor selection: where the next crease starts
//!
//! Early folds start on the canvas boundary; as the simulation progresses an
//! increasing share start on existing structure instead. Strategies restrict
//! the eligible edges, and radial or clustered compositions may bypass the
//! schedule entirely.

use crate::{
    algorithm::{
        fold::{AnchorType, FoldContext},
        strategy::FoldStrategy,
    },
    io::configuration::{BOUNDARY_PROBABILITY_DECAY, BOUNDARY_PROBABILITY_FLOOR},
    math::{
        geometry::{Canvas, Corner, Edge, Point},
        rng::SeededStream,
    },
};

/// Probability that a diagonal composition anchors on a corner
pub const DIAGONAL_CORNER_CHANCE: f64 = 0.6;
/// Probability that an unconstrained composition anchors on a corner
pub const CORNER_CHANCE: f64 = 0.15;
/// Probability that a radial composition anchors on an edge regardless of schedule
pub const RADIAL_BOUNDARY_CHANCE: f64 = 0.7;
/// Probability that a clustered composition anchors near its cluster
pub const CLUSTER_ANCHOR_CHANCE: f64 = 0.6;
/// Boundary samples weighed against the cluster point
pub const CLUSTER_SAMPLES: usize = 6;
/// Probability of anchoring on a cached intersection when structure is chosen
pub const INTERSECTION_ANCHOR_CHANCE: f64 = 0.5;

/// Start point of a candidate crease
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    /// Location
    pub point: Point,
    /// What the anchor sits on
    pub kind: AnchorType,
    /// Edge the anchor lies on, for edge anchors
    pub edge: Option<Edge>,
}

/// Probability of a boundary anchor at a fold index
///
/// `max(0.2, 1 - 0.015 f)`
pub fn boundary_probability(fold_index: usize) -> f64 {
    (1.0 - BOUNDARY_PROBABILITY_DECAY * fold_index as f64).max(BOUNDARY_PROBABILITY_FLOOR)
}

/// Choose the start point of the next crease
pub fn select_anchor(context: &FoldContext<'_>, rng: &mut SeededStream) -> Anchor {
    match *context.strategy {
        FoldStrategy::Radial { .. } => {
            if rng.chance(RADIAL_BOUNDARY_CHANCE) {
                return edge_anchor(context.canvas, &Edge::ALL, rng);
            }
        }
        FoldStrategy::Clustered {
            cluster_x,
            cluster_y,
            spread,
        } => {
            if rng.chance(CLUSTER_ANCHOR_CHANCE) {
                let focus = Point::new(
                    cluster_x * context.canvas.width,
                    cluster_y * context.canvas.height,
                );
                return cluster_anchor(context.canvas, focus, spread, rng);
            }
        }
        FoldStrategy::Horizontal
        | FoldStrategy::Vertical
        | FoldStrategy::Diagonal { .. }
        | FoldStrategy::Grid
        | FoldStrategy::Random => {}
    }

    if context.creases.is_empty() || rng.chance(boundary_probability(context.fold_index)) {
        boundary_anchor(context, rng)
    } else {
        structure_anchor(context, rng)
    }
}

/// Anchor on an edge or corner eligible under the strategy
pub fn boundary_anchor(context: &FoldContext<'_>, rng: &mut SeededStream) -> Anchor {
    let canvas = context.canvas;
    match *context.strategy {
        FoldStrategy::Horizontal => edge_anchor(canvas, &[Edge::Left, Edge::Right], rng),
        FoldStrategy::Vertical => edge_anchor(canvas, &[Edge::Top, Edge::Bottom], rng),
        FoldStrategy::Grid => {
            if context.fold_index % 2 == 0 {
                edge_anchor(canvas, &[Edge::Left, Edge::Right], rng)
            } else {
                edge_anchor(canvas, &[Edge::Top, Edge::Bottom], rng)
            }
        }
        FoldStrategy::Diagonal { .. } => {
            if rng.chance(DIAGONAL_CORNER_CHANCE) {
                corner_anchor(canvas, rng)
            } else {
                edge_anchor(canvas, &Edge::ALL, rng)
            }
        }
        FoldStrategy::Radial { .. } | FoldStrategy::Clustered { .. } | FoldStrategy::Random => {
            if rng.chance(CORNER_CHANCE) {
                corner_anchor(canvas, rng)
            } else {
                edge_anchor(canvas, &Edge::ALL, rng)
            }
        }
    }
}

/// Anchor on an existing crease or a cached intersection
///
/// Falls back to the boundary when there is no structure yet.
pub fn structure_anchor(context: &FoldContext<'_>, rng: &mut SeededStream) -> Anchor {
    if !context.intersections.is_empty() && rng.chance(INTERSECTION_ANCHOR_CHANCE) {
        if let Some(&point) = rng.pick(context.intersections) {
            return Anchor {
                point,
                kind: AnchorType::Intersection,
                edge: None,
            };
        }
    }

    match rng.pick(context.creases) {
        Some(crease) => Anchor {
            point: crease.point_at(rng.range(0.2, 0.8)),
            kind: AnchorType::Crease,
            edge: None,
        },
        None => boundary_anchor(context, rng),
    }
}

/// Uniform point on one of the given edges
pub fn edge_anchor(canvas: Canvas, edges: &[Edge], rng: &mut SeededStream) -> Anchor {
    let edge = rng.pick(edges).copied().unwrap_or(Edge::Left);
    Anchor {
        point: canvas.edge_point(edge, rng.next_f64()),
        kind: AnchorType::Edge,
        edge: Some(edge),
    }
}

/// Uniformly chosen corner
pub fn corner_anchor(canvas: Canvas, rng: &mut SeededStream) -> Anchor {
    let corner = rng.pick(&Corner::ALL).copied().unwrap_or(Corner::TopLeft);
    Anchor {
        point: canvas.corner_point(corner),
        kind: AnchorType::Corner,
        edge: None,
    }
}

/// Edge point drawn from several samples, favouring those near `focus`
///
/// Each sample is weighted by `1 / (1 + d / falloff)` where `d` is its
/// distance to the focus and `falloff` is `spread` times the shorter side.
pub fn cluster_anchor(
    canvas: Canvas,
    focus: Point,
    spread: f64,
    rng: &mut SeededStream,
) -> Anchor {
    let falloff = (spread * canvas.min_side()).max(f64::EPSILON);
    let samples: Vec<Anchor> = (0..CLUSTER_SAMPLES)
        .map(|_| edge_anchor(canvas, &Edge::ALL, rng))
        .collect();
    let weights: Vec<f64> = samples
        .iter()
        .map(|sample| 1.0 / (1.0 + sample.point.distance(focus) / falloff))
        .collect();

    let index = rng.weighted_index(&weights);
    samples
        .get(index)
        .copied()
        .unwrap_or_else(|| edge_anchor(canvas, &Edge::ALL, rng))
}
