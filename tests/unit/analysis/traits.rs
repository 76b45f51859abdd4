//! Tests for the trait projection

#[cfg(test)]
mod tests {
    use foldfield::algorithm::executor::{GenerationRequest, generate};
    use foldfield::algorithm::paper::PaperProperties;
    use foldfield::analysis::traits::{
        ABSORBENCY_LABELS, GRAIN_LABELS, Traits, bucket_label, paper_descriptor,
    };

    // Tests bucket boundaries fall into the upper bucket
    // Verified by using inclusive upper bounds
    #[test]
    fn test_bucket_label() {
        assert_eq!(bucket_label(0.1, &ABSORBENCY_LABELS), "sized");
        assert_eq!(bucket_label(0.3, &ABSORBENCY_LABELS), "hard");
        assert_eq!(bucket_label(0.69, &ABSORBENCY_LABELS), "soft");
        assert_eq!(bucket_label(0.9, &ABSORBENCY_LABELS), "blotting");
        assert_eq!(bucket_label(0.6, &GRAIN_LABELS), "strong");
        assert_eq!(bucket_label(0.5, &[]), "");
    }

    // Tests paper descriptors for plain and grained sheets
    // Verified by omitting the grain angle
    #[test]
    fn test_paper_descriptor() {
        assert_eq!(
            paper_descriptor(&PaperProperties::default()),
            "blotting open sheet, free grain"
        );

        let grained = PaperProperties {
            absorbency: 0.55,
            intersection_threshold: 0.2,
            angle_affinity: Some(30.2),
            affinity_strength: 0.3,
            ceiling_multiplier: 1.0,
        };
        assert_eq!(paper_descriptor(&grained), "soft selective sheet, firm grain 30°");
    }

    // Tests counts agree with the composition they describe
    // Verified by counting level 0 cells as active
    #[test]
    fn test_traits_from_composition() {
        let composition = generate(&GenerationRequest::new(42).with_folds(80));
        let traits = Traits::from_composition(&composition);
        let [_, light, medium, dense] = composition.density.level_histogram();

        assert_eq!(traits.folds, 80);
        assert_eq!(traits.creases, composition.creases.len());
        assert_eq!(traits.active_cells, light + medium + dense);
        assert_eq!(traits.dense_cells, dense);
        assert_eq!(traits.intersections, composition.density.intersection_count);
        assert_eq!(traits.fold_strategy, composition.strategy.kind().name());
        assert_eq!(
            traits.grid,
            format!("{}x{}", composition.layout.cols, composition.layout.rows)
        );
        assert!(traits.color_count == 2 || traits.color_count == 3);
        assert_eq!(traits, composition.traits());
    }

    // Tests the gradient probability is rounded to three decimals
    // Verified by reporting the raw probability
    #[test]
    fn test_traits_rounding() {
        let traits = generate(&GenerationRequest::new(5).with_folds(17)).traits();
        let scaled = traits.gradient_probability * 1000.0;
        assert!((scaled - scaled.round()).abs() < 1e-6);
    }
}
