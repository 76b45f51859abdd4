//! Standard pathway: ground, contrast rule, mark, accent and safety check

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    io::configuration::{
        ACCENT_MIN_DISTANCE, ACCENT_REPEATS_MARK_CHANCE, HOT_ACCENT_CHANCE, SAFE_CONTRAST,
    },
    math::rng::SeededStream,
    palette::colors::{CgaColor, Temperature},
};

/// Ground candidates with their selection weights
pub const GROUND_WEIGHTS: [(CgaColor, f64); 8] = [
    (CgaColor::Black, 0.20),
    (CgaColor::White, 0.15),
    (CgaColor::Blue, 0.15),
    (CgaColor::Red, 0.15),
    (CgaColor::Magenta, 0.10),
    (CgaColor::Yellow, 0.10),
    (CgaColor::LightCyan, 0.08),
    (CgaColor::LightGreen, 0.07),
];

/// Ground luminance below which value contrast asks for a light mark
pub const VALUE_SPLIT: f64 = 50.0;
/// Minimum mark luminance on a dark ground under value contrast
pub const LIGHT_MARK_FLOOR: f64 = 60.0;
/// Maximum mark luminance on a light ground under value contrast
pub const DARK_MARK_CEILING: f64 = 40.0;
/// Luminance distance band of a clash
pub const CLASH_BAND: (f64, f64) = (25.0, 55.0);

/// Rule relating the mark to the ground
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContrastType {
    /// Opposite half of the value scale
    Value,
    /// Opposite temperature family
    Temperature,
    /// Fixed complement table
    Complement,
    /// Moderate luminance distance
    Clash,
}

impl ContrastType {
    /// Every type with its selection weight
    pub const WEIGHTED: [(Self, f64); 4] = [
        (Self::Value, 0.40),
        (Self::Temperature, 0.28),
        (Self::Complement, 0.22),
        (Self::Clash, 0.10),
    ];

    /// Lower-case name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::Temperature => "temperature",
            Self::Complement => "complement",
            Self::Clash => "clash",
        }
    }
}

impl fmt::Display for ContrastType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pure ground/mark/accent triple from the hardware palette
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardPalette {
    /// Dominant field colour
    pub ground: CgaColor,
    /// Primary contrasting colour
    pub mark: CgaColor,
    /// Highlight colour, equal to the mark for two-colour results
    pub accent: CgaColor,
    /// Contrast rule rolled for this seed
    pub contrast: ContrastType,
    /// 2 or 3
    pub color_count: u8,
    /// Whether the safety fallback replaced the rolled colours
    pub safety_fallback: bool,
}

/// Run the standard pathway on an already positioned palette stream
pub fn standard_palette(rng: &mut SeededStream) -> StandardPalette {
    let ground = pick_ground(rng);
    let contrast = pick_contrast(rng);
    let mark = pick_mark(ground, contrast, rng);
    let (accent, color_count) = pick_accent(ground, mark, rng);

    if ground.luminance_distance(mark) < SAFE_CONTRAST {
        log::debug!("{ground}/{mark} below safe contrast, using fallback triple");
        return StandardPalette {
            ground: CgaColor::Black,
            mark: CgaColor::White,
            accent: if color_count == 2 {
                CgaColor::White
            } else {
                CgaColor::Yellow
            },
            contrast,
            color_count,
            safety_fallback: true,
        };
    }

    StandardPalette {
        ground,
        mark,
        accent,
        contrast,
        color_count,
        safety_fallback: false,
    }
}

/// Weighted ground draw
pub fn pick_ground(rng: &mut SeededStream) -> CgaColor {
    let weights: Vec<f64> = GROUND_WEIGHTS.iter().map(|&(_, weight)| weight).collect();
    GROUND_WEIGHTS
        .get(rng.weighted_index(&weights))
        .map_or(CgaColor::Black, |&(color, _)| color)
}

/// Weighted contrast-type draw
pub fn pick_contrast(rng: &mut SeededStream) -> ContrastType {
    let weights: Vec<f64> = ContrastType::WEIGHTED
        .iter()
        .map(|&(_, weight)| weight)
        .collect();
    ContrastType::WEIGHTED
        .get(rng.weighted_index(&weights))
        .map_or(ContrastType::Value, |&(contrast, _)| contrast)
}

/// Fixed complements of each ground
pub const fn complements(ground: CgaColor) -> &'static [CgaColor] {
    match ground {
        CgaColor::Black => &[CgaColor::White, CgaColor::Yellow],
        CgaColor::White => &[CgaColor::Black, CgaColor::Blue],
        CgaColor::Blue => &[CgaColor::Yellow, CgaColor::LightRed],
        CgaColor::Red => &[CgaColor::LightCyan, CgaColor::Cyan],
        CgaColor::Magenta => &[CgaColor::LightGreen, CgaColor::Green],
        CgaColor::Yellow => &[CgaColor::Blue, CgaColor::LightBlue],
        CgaColor::LightCyan => &[CgaColor::Red, CgaColor::LightRed],
        CgaColor::LightGreen => &[CgaColor::Magenta, CgaColor::LightMagenta],
        CgaColor::Cyan
        | CgaColor::Green
        | CgaColor::LightBlue
        | CgaColor::LightRed
        | CgaColor::LightMagenta => &[],
    }
}

/// Palette entries admissible as a mark, strongest contrast first
pub fn mark_candidates(ground: CgaColor, contrast: ContrastType) -> Vec<CgaColor> {
    let ground_luminance = ground.luminance();
    let mut candidates: Vec<CgaColor> = CgaColor::ALL
        .into_iter()
        .filter(|&color| color != ground)
        .filter(|&color| match contrast {
            ContrastType::Value => {
                if ground_luminance < VALUE_SPLIT {
                    color.luminance() > LIGHT_MARK_FLOOR
                } else {
                    color.luminance() < DARK_MARK_CEILING
                }
            }
            ContrastType::Temperature => match ground.temperature() {
                Temperature::Warm => color.temperature() == Temperature::Cool,
                Temperature::Cool => color.temperature() == Temperature::Warm,
                Temperature::Neutral => color.temperature() != Temperature::Neutral,
            },
            ContrastType::Complement => complements(ground).contains(&color),
            ContrastType::Clash => {
                let distance = ground.luminance_distance(color);
                (CLASH_BAND.0..=CLASH_BAND.1).contains(&distance)
            }
        })
        .collect();

    // Stable sort keeps table order among equal contrasts
    candidates.sort_by(|a, b| {
        ground
            .luminance_distance(*b)
            .total_cmp(&ground.luminance_distance(*a))
    });
    candidates
}

/// Uniform pick among the mark candidates, black or white when none qualify
pub fn pick_mark(ground: CgaColor, contrast: ContrastType, rng: &mut SeededStream) -> CgaColor {
    let candidates = mark_candidates(ground, contrast);
    rng.pick(&candidates).copied().unwrap_or_else(|| {
        if ground.luminance() < VALUE_SPLIT {
            CgaColor::White
        } else {
            CgaColor::Black
        }
    })
}

/// Accent colour and resulting colour count
pub fn pick_accent(ground: CgaColor, mark: CgaColor, rng: &mut SeededStream) -> (CgaColor, u8) {
    if rng.chance(ACCENT_REPEATS_MARK_CHANCE) {
        return (mark, 2);
    }

    let candidates: Vec<CgaColor> = CgaColor::ALL
        .into_iter()
        .filter(|&color| color != ground && color != mark)
        .filter(|&color| {
            color.luminance_distance(ground) > ACCENT_MIN_DISTANCE
                && color.luminance_distance(mark) > ACCENT_MIN_DISTANCE
        })
        .collect();
    if candidates.is_empty() {
        return (mark, 2);
    }

    let hot: Vec<CgaColor> = candidates
        .iter()
        .copied()
        .filter(|color| color.is_hot())
        .collect();
    let pool = if !hot.is_empty() && rng.chance(HOT_ACCENT_CHANCE) {
        &hot
    } else {
        &candidates
    };

    rng.pick(pool).map_or((mark, 2), |&accent| (accent, 3))
}
