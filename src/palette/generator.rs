//! Pathway dispatch: monochrome, gradient or standard

use crate::{
    io::configuration::MONOCHROME_CHANCE,
    math::rng::{SeededStream, StreamOffset},
    palette::{
        Palette, PaletteStrategy,
        colors::{CgaColor, ValueClass},
        gradient::{apply_gradient, gradient_probability},
        standard::standard_palette,
    },
};

/// Keys eligible for monochrome compositions (the non-neutral entries)
pub const MONOCHROME_KEYS: [CgaColor; 7] = [
    CgaColor::Blue,
    CgaColor::Red,
    CgaColor::Yellow,
    CgaColor::LightCyan,
    CgaColor::Cyan,
    CgaColor::LightBlue,
    CgaColor::LightRed,
];

/// Chance of a black ground behind a dark monochrome key
pub const DARK_KEY_BLACK_CHANCE: f64 = 0.75;
/// Chance of a black ground behind a mid monochrome key
pub const MID_KEY_BLACK_CHANCE: f64 = 0.60;

/// Derive the palette for a seed and its final crease count
///
/// The monochrome roll comes first on the palette stream. Otherwise the
/// gradient roll is taken on its own stream and the standard pathway
/// continues on the palette stream, feeding gradient mode when it fires.
pub fn generate_palette(seed: i64, crease_count: usize) -> Palette {
    let mut rng = SeededStream::for_purpose(seed, StreamOffset::Palette);
    let probability = gradient_probability(crease_count);

    if rng.chance(MONOCHROME_CHANCE) {
        let palette = monochrome_palette(&mut rng, probability);
        log::debug!("palette: monochrome on {}", palette.text);
        return palette;
    }

    let mut gradient_rng = SeededStream::for_purpose(seed, StreamOffset::Gradient);
    let use_gradient = gradient_rng.chance(probability);
    let base = standard_palette(&mut rng);

    let palette = if use_gradient {
        let colors = apply_gradient(&base, &mut gradient_rng);
        Palette {
            background: colors.background,
            text: colors.text,
            accent: colors.accent,
            strategy: PaletteStrategy::Gradient,
            contrast: Some(base.contrast),
            color_count: base.color_count,
            gradient_anchor: Some(colors.anchor),
            gradient_probability: probability,
            safety_fallback: base.safety_fallback,
        }
    } else {
        Palette {
            background: base.ground.rgb(),
            text: base.mark.rgb(),
            accent: base.accent.rgb(),
            strategy: PaletteStrategy::Standard,
            contrast: Some(base.contrast),
            color_count: base.color_count,
            gradient_anchor: None,
            gradient_probability: probability,
            safety_fallback: base.safety_fallback,
        }
    };

    log::debug!(
        "palette: {} {}/{}/{} ({} colours)",
        palette.label(),
        palette.background,
        palette.text,
        palette.accent,
        palette.color_count
    );
    palette
}

/// Single key colour on a black or white ground
pub fn monochrome_palette(rng: &mut SeededStream, gradient_probability: f64) -> Palette {
    let key = rng.pick(&MONOCHROME_KEYS).copied().unwrap_or(CgaColor::Blue);
    let black_ground = match key.value_class() {
        ValueClass::Light => true,
        ValueClass::Dark => rng.chance(DARK_KEY_BLACK_CHANCE),
        ValueClass::Mid => rng.chance(MID_KEY_BLACK_CHANCE),
    };
    let ground = if black_ground {
        CgaColor::Black
    } else {
        CgaColor::White
    };

    Palette {
        background: ground.rgb(),
        text: key.rgb(),
        accent: key.rgb(),
        strategy: PaletteStrategy::Monochrome,
        contrast: None,
        color_count: 2,
        gradient_anchor: None,
        gradient_probability,
        safety_fallback: false,
    }
}
