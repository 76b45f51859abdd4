//! Seeded paper-fold composition generator
//!
//! A single integer seed determines a grid layout, a set of simulated
//! creases, the density of their crossings per cell and a colour palette.
//! Every draw comes from a documented linear-congruential stream, so any
//! composition can be reproduced bit for bit from its seed.

#![forbid(unsafe_code)]

/// Fold simulation and the generation pipeline
pub mod algorithm;
/// Intersection density and metadata traits
pub mod analysis;
/// Command-line, export and error handling
pub mod io;
/// Random streams, geometry and order statistics
pub mod math;
/// Palette derivation
pub mod palette;
/// Reference-space grid layout
pub mod spatial;

pub use algorithm::executor::{Composition, GenerationRequest, generate};
pub use io::error::{FoldfieldError, Result};
