//! Tests for gradient probability and web-safe shifting

#[cfg(test)]
mod tests {
    use foldfield::math::rng::SeededStream;
    use foldfield::palette::colors::{CgaColor, Rgb};
    use foldfield::palette::gradient::{
        GradientRole, apply_gradient, gradient_probability, pick_role, shift_from_anchor,
    };
    use foldfield::palette::standard::{ContrastType, StandardPalette};

    fn base() -> StandardPalette {
        StandardPalette {
            ground: CgaColor::Blue,
            mark: CgaColor::Yellow,
            accent: CgaColor::LightRed,
            contrast: ContrastType::Complement,
            color_count: 3,
            safety_fallback: false,
        }
    }

    // Tests the probability decays from its ceiling towards its floor
    // Verified by growing the exponent with the crease count
    #[test]
    fn test_gradient_probability() {
        assert!((gradient_probability(0) - 0.35).abs() < 1e-12);
        assert!(gradient_probability(10) < gradient_probability(5));
        assert!(gradient_probability(500) > 0.08);
        assert!(gradient_probability(500) < 0.0801);
    }

    // Tests every anchor role is reachable
    // Verified by dropping the accent weight
    #[test]
    fn test_pick_role_coverage() {
        let roles: Vec<GradientRole> = (0..300)
            .map(|seed| pick_role(&mut SeededStream::new(seed)))
            .collect();
        assert!(roles.contains(&GradientRole::Background));
        assert!(roles.contains(&GradientRole::Text));
        assert!(roles.contains(&GradientRole::Accent));
    }

    // Tests text on a dark anchor shifts lighter onto the web-safe grid
    // Verified by shifting darker against dark anchors
    #[test]
    fn test_shift_lighter_on_dark_anchor() {
        let blue = CgaColor::Blue.rgb();
        for seed in 0..20 {
            let mut rng = SeededStream::new(seed);
            let shifted = shift_from_anchor(blue, GradientRole::Text, Rgb::new(0, 0, 0), &mut rng);
            assert!(shifted.is_web_safe());
            assert!(shifted.luminance() > blue.luminance());
            assert!(shifted.unit_luminance() >= 0.2);
        }
    }

    // Tests a shift landing too close to the anchor reverses direction
    // Verified by returning the first shift unconditionally
    #[test]
    fn test_shift_reverses_when_close() {
        let anchor = CgaColor::Magenta.rgb();
        let mut reversed = 0;
        for seed in 0..30 {
            let mut rng = SeededStream::new(seed);
            let shifted = shift_from_anchor(Rgb::new(0, 0, 0), GradientRole::Text, anchor, &mut rng);
            assert!(shifted.is_web_safe());
            if shifted == Rgb::new(0, 0, 0) {
                reversed += 1;
            } else {
                assert!((shifted.unit_luminance() - anchor.unit_luminance()).abs() >= 0.2);
            }
        }
        assert!(reversed > 0);
    }

    // Tests the anchored role keeps its pure colour
    // Verified by shifting all three roles
    #[test]
    fn test_apply_gradient_keeps_anchor() {
        let base = base();
        for seed in 0..40 {
            let colors = apply_gradient(&base, &mut SeededStream::new(seed));
            let (pure, expected) = match colors.anchor {
                GradientRole::Background => (colors.background, base.ground.rgb()),
                GradientRole::Text => (colors.text, base.mark.rgb()),
                GradientRole::Accent => (colors.accent, base.accent.rgb()),
            };
            assert_eq!(pure, expected);
            for (role, color) in [
                (GradientRole::Background, colors.background),
                (GradientRole::Text, colors.text),
                (GradientRole::Accent, colors.accent),
            ] {
                if role != colors.anchor {
                    assert!(color.is_web_safe());
                }
            }
        }
    }
}
