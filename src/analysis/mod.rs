//! Post-simulation analysis of the crease set

/// Per-cell intersection density with adaptive thresholds
pub mod density;
/// Metadata projection of a composition
pub mod traits;
