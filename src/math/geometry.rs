//! Planar geometry for crease simulation
//!
//! Coordinates are in grid-pixel space with the origin at the top-left
//! corner of the canvas and y growing downwards.

use serde::{Deserialize, Serialize};

const PARALLEL_EPSILON: f64 = 1e-10;
const RAY_EPSILON: f64 = 1e-9;

/// Point in grid-pixel space
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Create a point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Point at parameter `t` along the segment from `self` to `other`
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Midpoint between two points
    pub fn midpoint(self, other: Self) -> Self {
        self.lerp(other, 0.5)
    }
}

/// One side of the canvas
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    /// y = 0
    Top,
    /// x = width
    Right,
    /// y = height
    Bottom,
    /// x = 0
    Left,
}

impl Edge {
    /// All edges in clockwise order starting at the top
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// Edge across the canvas
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// The two edges that meet this one at a corner
    pub const fn adjacent(self) -> [Self; 2] {
        match self {
            Self::Top | Self::Bottom => [Self::Left, Self::Right],
            Self::Left | Self::Right => [Self::Top, Self::Bottom],
        }
    }
}

/// One corner of the canvas
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    /// (0, 0)
    TopLeft,
    /// (width, 0)
    TopRight,
    /// (width, height)
    BottomRight,
    /// (0, height)
    BottomLeft,
}

impl Corner {
    /// All corners in clockwise order starting at the top-left
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomRight,
        Self::BottomLeft,
    ];
}

/// Rectangular drawing area in grid-pixel space
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    /// Horizontal extent
    pub width: f64,
    /// Vertical extent
    pub height: f64,
}

impl Canvas {
    /// Create a canvas
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether both extents are strictly positive
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Length of the shorter side
    pub const fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }

    /// Point at fraction `t` along an edge
    pub fn edge_point(&self, edge: Edge, t: f64) -> Point {
        match edge {
            Edge::Top => Point::new(t * self.width, 0.0),
            Edge::Right => Point::new(self.width, t * self.height),
            Edge::Bottom => Point::new(t * self.width, self.height),
            Edge::Left => Point::new(0.0, t * self.height),
        }
    }

    /// Midpoint of an edge
    pub fn edge_midpoint(&self, edge: Edge) -> Point {
        self.edge_point(edge, 0.5)
    }

    /// Location of a corner
    pub const fn corner_point(&self, corner: Corner) -> Point {
        match corner {
            Corner::TopLeft => Point::new(0.0, 0.0),
            Corner::TopRight => Point::new(self.width, 0.0),
            Corner::BottomRight => Point::new(self.width, self.height),
            Corner::BottomLeft => Point::new(0.0, self.height),
        }
    }

    /// Edge with the greatest distance from a point
    ///
    /// Ties resolve in [`Edge::ALL`] order.
    pub fn farthest_edge(&self, point: Point) -> Edge {
        let distances = [
            (Edge::Top, point.y),
            (Edge::Right, self.width - point.x),
            (Edge::Bottom, self.height - point.y),
            (Edge::Left, point.x),
        ];
        let mut best = (Edge::Top, f64::NEG_INFINITY);
        for (edge, distance) in distances {
            if distance > best.1 {
                best = (edge, distance);
            }
        }
        best.0
    }

    /// Whether a point lies within `tolerance` of a corner
    pub fn is_corner(&self, point: Point, tolerance: f64) -> bool {
        Corner::ALL
            .iter()
            .any(|&corner| self.corner_point(corner).distance(point) <= tolerance)
    }

    /// Clamp a point into the canvas inset by `margin` on every side
    pub fn clamp_inset(&self, point: Point, margin: f64) -> Point {
        let max_x = (self.width - margin).max(margin);
        let max_y = (self.height - margin).max(margin);
        Point::new(point.x.clamp(margin, max_x), point.y.clamp(margin, max_y))
    }

    /// First boundary hit of a ray leaving `origin` in direction `(dx, dy)`
    ///
    /// Returns `None` when the ray does not advance before leaving the
    /// canvas, which happens for an origin on an edge pointing outwards.
    pub fn ray_to_boundary(&self, origin: Point, dx: f64, dy: f64) -> Option<Point> {
        let mut t_hit = f64::INFINITY;
        if dx > RAY_EPSILON {
            t_hit = t_hit.min((self.width - origin.x) / dx);
        } else if dx < -RAY_EPSILON {
            t_hit = t_hit.min(-origin.x / dx);
        }
        if dy > RAY_EPSILON {
            t_hit = t_hit.min((self.height - origin.y) / dy);
        } else if dy < -RAY_EPSILON {
            t_hit = t_hit.min(-origin.y / dy);
        }

        if !t_hit.is_finite() || t_hit <= RAY_EPSILON {
            return None;
        }

        Some(Point::new(
            (origin.x + dx * t_hit).clamp(0.0, self.width),
            (origin.y + dy * t_hit).clamp(0.0, self.height),
        ))
    }
}

/// Undirected angle of a segment in degrees, in [0, 180)
pub fn segment_angle(p1: Point, p2: Point) -> f64 {
    let degrees = (p2.y - p1.y).atan2(p2.x - p1.x).to_degrees();
    let folded = degrees.rem_euclid(180.0);
    if folded >= 180.0 { 0.0 } else { folded }
}

/// Smallest angle between two undirected directions, in [0, 90]
pub fn angle_difference(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs().rem_euclid(180.0);
    diff.min(180.0 - diff)
}

/// Crossing of two segments strictly inside both
///
/// Parameters are measured along each segment from its first point; a
/// crossing counts only when both lie in the open interval `(t_min, t_max)`.
/// Parallel and collinear segments never cross.
pub fn segment_intersection(
    a1: Point,
    a2: Point,
    b1: Point,
    b2: Point,
    t_min: f64,
    t_max: f64,
) -> Option<Point> {
    let d1x = a2.x - a1.x;
    let d1y = a2.y - a1.y;
    let d2x = b2.x - b1.x;
    let d2y = b2.y - b1.y;

    let denominator = d1x * d2y - d1y * d2x;
    if denominator.abs() < PARALLEL_EPSILON {
        return None;
    }

    let ox = b1.x - a1.x;
    let oy = b1.y - a1.y;
    let ta = (ox * d2y - oy * d2x) / denominator;
    let tb = (ox * d1y - oy * d1x) / denominator;

    let inside = |t: f64| t > t_min && t < t_max;
    (inside(ta) && inside(tb)).then(|| a1.lerp(a2, ta))
}

/// Shortest distance from a point to a segment
pub fn point_segment_distance(point: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length_sq = dx * dx + dy * dy;
    if length_sq <= 0.0 {
        return point.distance(a);
    }
    let t = (((point.x - a.x) * dx + (point.y - a.y) * dy) / length_sq).clamp(0.0, 1.0);
    point.distance(a.lerp(b, t))
}
