//! Gradient mode: one pure role, two web-safe shifts
//!
//! Sparse compositions are more likely to take this pathway. The anchored
//! role keeps its hardware colour; the other two roles move by whole
//! web-safe steps towards white or black until they separate from it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    io::configuration::{GRADIENT_CEILING, GRADIENT_DECAY, GRADIENT_FLOOR, GRADIENT_MIN_DISTANCE},
    math::{rng::SeededStream, statistics::exponential_decay},
    palette::{colors::Rgb, standard::StandardPalette},
};

/// Web-safe step counts a shift is drawn from
pub const SHIFT_STEPS: [u8; 3] = [1, 2, 3];

/// Palette role a gradient is anchored on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientRole {
    /// Ground colour stays pure
    Background,
    /// Mark colour stays pure
    Text,
    /// Accent colour stays pure
    Accent,
}

impl GradientRole {
    /// Every role with its selection weight
    pub const WEIGHTED: [(Self, f64); 3] = [
        (Self::Background, 0.50),
        (Self::Text, 0.35),
        (Self::Accent, 0.15),
    ];

    /// Lower-case name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Text => "text",
            Self::Accent => "accent",
        }
    }
}

impl fmt::Display for GradientRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Colours after the gradient shifts, in role order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradientColors {
    /// Background
    pub background: Rgb,
    /// Text
    pub text: Rgb,
    /// Accent
    pub accent: Rgb,
    /// Role kept pure
    pub anchor: GradientRole,
}

/// Chance of gradient mode for a crease count
///
/// `0.08 + 0.27 e^(-0.03 n)`
pub fn gradient_probability(crease_count: usize) -> f64 {
    exponential_decay(
        GRADIENT_FLOOR,
        GRADIENT_CEILING,
        GRADIENT_DECAY,
        crease_count as f64,
    )
}

/// Weighted anchor-role draw
pub fn pick_role(rng: &mut SeededStream) -> GradientRole {
    let weights: Vec<f64> = GradientRole::WEIGHTED
        .iter()
        .map(|&(_, weight)| weight)
        .collect();
    GradientRole::WEIGHTED
        .get(rng.weighted_index(&weights))
        .map_or(GradientRole::Background, |&(role, _)| role)
}

/// Shift `color` away from `anchor`, retrying the opposite way when too close
///
/// Background and text move lighter against a dark anchor and darker against
/// a light one. The accent moves away from the anchor's luminance.
pub fn shift_from_anchor(
    color: Rgb,
    role: GradientRole,
    anchor: Rgb,
    rng: &mut SeededStream,
) -> Rgb {
    let anchor_luminance = anchor.unit_luminance();
    let lighter = match role {
        GradientRole::Accent => color.unit_luminance() >= anchor_luminance,
        GradientRole::Background | GradientRole::Text => anchor_luminance < 0.5,
    };
    let steps = rng.pick(&SHIFT_STEPS).copied().unwrap_or(1);

    let shifted = color.shifted(steps, lighter);
    if (shifted.unit_luminance() - anchor_luminance).abs() >= GRADIENT_MIN_DISTANCE {
        return shifted;
    }

    log::trace!("{role} shift too close to anchor, reversing");
    color.shifted(steps + 1, !lighter)
}

/// Apply gradient mode to a standard triple
pub fn apply_gradient(base: &StandardPalette, rng: &mut SeededStream) -> GradientColors {
    let anchor = pick_role(rng);
    let background = base.ground.rgb();
    let text = base.mark.rgb();
    let accent = base.accent.rgb();

    let pure = match anchor {
        GradientRole::Background => background,
        GradientRole::Text => text,
        GradientRole::Accent => accent,
    };

    let mut derive = |color: Rgb, role: GradientRole| {
        if role == anchor {
            color
        } else {
            shift_from_anchor(color, role, pure, rng)
        }
    };

    GradientColors {
        background: derive(background, GradientRole::Background),
        text: derive(text, GradientRole::Text),
        accent: derive(accent, GradientRole::Accent),
        anchor,
    }
}
