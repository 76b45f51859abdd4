//! Spatial layout of the composition
//!
//! This module contains the grid layout solver:
//! - Reference-space extents, margins and padding
//! - Seeded cell sizing from exact divisors
//! - Gap and overlap placement with centred slack
//! - Rescaling onto arbitrary output resolutions

/// Cell sizing, spacing and scaling
pub mod layout;

pub use layout::{GridLayout, ReferenceSpace};
