//! Tests for fold strategy selection and parsing

#[cfg(test)]
mod tests {
    use foldfield::algorithm::strategy::{FoldStrategy, StrategyKind};

    // Tests seeded strategies are reproducible
    // Verified by drawing the family from the fold stream
    #[test]
    fn test_from_seed_deterministic() {
        for seed in 0..100 {
            assert_eq!(FoldStrategy::from_seed(seed), FoldStrategy::from_seed(seed));
        }
    }

    // Tests every family appears across a range of seeds
    // Verified by zeroing the clustered weight
    #[test]
    fn test_all_families_reachable() {
        let kinds: Vec<StrategyKind> = (0..2000)
            .map(|seed| FoldStrategy::from_seed(seed).kind())
            .collect();
        for kind in StrategyKind::ALL {
            assert!(kinds.contains(&kind), "{kind} never drawn");
        }
    }

    // Tests drawn parameters stay inside their ranges
    // Verified by widening the diagonal jitter to 20 degrees
    #[test]
    fn test_parameter_ranges() {
        for seed in 0..500 {
            match FoldStrategy::for_kind(seed, FoldStrategy::from_seed(seed).kind()) {
                FoldStrategy::Diagonal { angle, jitter } => {
                    assert!(angle == 45.0 || angle == 135.0);
                    assert!(jitter.abs() <= 8.0);
                }
                FoldStrategy::Radial { focal_x, focal_y } => {
                    assert!((0.2..0.8).contains(&focal_x));
                    assert!((0.2..0.8).contains(&focal_y));
                }
                FoldStrategy::Clustered {
                    cluster_x,
                    cluster_y,
                    spread,
                } => {
                    assert!((0.15..0.85).contains(&cluster_x));
                    assert!((0.15..0.85).contains(&cluster_y));
                    assert!((0.1..0.35).contains(&spread));
                }
                FoldStrategy::Horizontal
                | FoldStrategy::Vertical
                | FoldStrategy::Grid
                | FoldStrategy::Random => {}
            }
        }
    }

    // Tests forcing the natural family reproduces the natural strategy
    // Verified by not burning the family draw in for_kind
    #[test]
    fn test_for_kind_matches_natural_draw() {
        for seed in 0..200 {
            let natural = FoldStrategy::from_seed(seed);
            assert_eq!(FoldStrategy::for_kind(seed, natural.kind()), natural);
        }
    }

    // Tests names parse back to their kinds case-insensitively
    // Verified by comparing without lowercasing
    #[test]
    fn test_kind_parsing() {
        for kind in StrategyKind::ALL {
            assert_eq!(kind.name().parse::<StrategyKind>(), Ok(kind));
        }
        assert_eq!("Radial".parse::<StrategyKind>(), Ok(StrategyKind::Radial));
        assert!("spiral".parse::<StrategyKind>().is_err());
        assert_eq!(FoldStrategy::Grid.to_string(), "grid");
    }

    // Tests the serialized form carries a lowercase type tag
    // Verified by removing the serde tag attribute
    #[test]
    fn test_serialized_tag() {
        let json = serde_json::to_string(&FoldStrategy::Radial {
            focal_x: 0.5,
            focal_y: 0.25,
        });
        assert!(json.is_ok_and(|text| text.contains("\"type\":\"radial\"")));
    }
}
