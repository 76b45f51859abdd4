//! Pairwise crease intersection
//!
//! Brute force over every pair. The crease count is bounded by the fold
//! count, so quadratic work stays small.

use serde::{Deserialize, Serialize};

use crate::{
    algorithm::fold::Crease,
    io::configuration::{INTERSECTION_T_MAX, INTERSECTION_T_MIN},
    math::geometry::{Point, segment_intersection},
};

/// Crossing of two creases
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Intersection {
    /// Location
    pub point: Point,
    /// Indices of the two creases, lower first
    pub creases: (usize, usize),
    /// Absolute depth difference of the two creases
    pub gap: usize,
    /// Sum of the two crease weights
    pub weight: f64,
}

/// Crossing of two creases strictly inside both
///
/// Shared endpoints and T-junctions at an end are not crossings.
pub fn crease_crossing(a: &Crease, b: &Crease) -> Option<Point> {
    segment_intersection(a.p1, a.p2, b.p1, b.p2, INTERSECTION_T_MIN, INTERSECTION_T_MAX)
}

/// Every pairwise crossing with its gap and combined weight
pub fn find_intersections(creases: &[Crease]) -> Vec<Intersection> {
    let mut intersections = Vec::new();
    for (i, a) in creases.iter().enumerate() {
        for (offset, b) in creases.iter().skip(i + 1).enumerate() {
            if let Some(point) = crease_crossing(a, b) {
                intersections.push(Intersection {
                    point,
                    creases: (i, i + 1 + offset),
                    gap: a.depth.abs_diff(b.depth),
                    weight: a.weight + b.weight,
                });
            }
        }
    }
    intersections
}

/// Crossings of the newest crease with every earlier one, earliest first
pub fn newest_crossings(creases: &[Crease]) -> Vec<Point> {
    let Some((newest, earlier)) = creases.split_last() else {
        return Vec::new();
    };
    earlier
        .iter()
        .filter_map(|crease| crease_crossing(crease, newest))
        .collect()
}

/// Crossing locations in registration order, as cached by the simulator
///
/// A crossing is listed when the later of its two creases is added, so
/// appending [`newest_crossings`] after each registration rebuilds this
/// list exactly.
pub fn intersection_points(creases: &[Crease]) -> Vec<Point> {
    (1..=creases.len())
        .filter_map(|end| creases.get(..end))
        .flat_map(newest_crossings)
        .collect()
}
