//! Numeric foundations shared by every generative stage

/// Points, edges, canvas boundaries and segment intersection
pub mod geometry;
/// Seeded linear-congruential streams and per-purpose offsets
pub mod rng;
/// Percentiles and decay curves
pub mod statistics;
