//! Palette derivation from ground/mark/accent colour theory
//!
//! Every composition resolves to a background, text and accent colour drawn
//! from a fixed 13-entry hardware palette, or derived from it by web-safe
//! shifts in gradient mode.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::palette::{colors::Rgb, gradient::GradientRole, standard::ContrastType};

/// Hardware palette entries, luminance and temperature
pub mod colors;
/// Pathway dispatch
pub mod generator;
/// Gradient mode shifts
pub mod gradient;
/// Standard ground/mark/accent pathway
pub mod standard;

pub use generator::generate_palette;

/// Pathway that produced a palette
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteStrategy {
    /// One key colour on black or white
    Monochrome,
    /// Pure ground/mark/accent triple
    Standard,
    /// One pure role, two shifted
    Gradient,
}

impl PaletteStrategy {
    /// Lower-case name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Monochrome => "monochrome",
            Self::Standard => "standard",
            Self::Gradient => "gradient",
        }
    }
}

impl fmt::Display for PaletteStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolved composition colours
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    /// Ground colour
    pub background: Rgb,
    /// Mark colour
    pub text: Rgb,
    /// Highlight colour
    pub accent: Rgb,
    /// Pathway taken
    pub strategy: PaletteStrategy,
    /// Contrast rule rolled, absent for monochrome
    pub contrast: Option<ContrastType>,
    /// 2 or 3
    pub color_count: u8,
    /// Role kept pure in gradient mode
    pub gradient_anchor: Option<GradientRole>,
    /// Chance gradient mode had for this crease count
    pub gradient_probability: f64,
    /// Whether the safety fallback replaced the rolled colours
    pub safety_fallback: bool,
}

impl Palette {
    /// Strategy label as reported in traits, e.g. `gradient-value`
    pub fn label(&self) -> String {
        match (self.strategy, self.contrast) {
            (PaletteStrategy::Monochrome, _) | (_, None) => self.strategy.name().to_owned(),
            (PaletteStrategy::Standard, Some(contrast)) => contrast.name().to_owned(),
            (PaletteStrategy::Gradient, Some(contrast)) => format!("gradient-{contrast}"),
        }
    }
}
