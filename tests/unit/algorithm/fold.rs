//! Tests for the fold simulator state machine

#[cfg(test)]
mod tests {
    use foldfield::algorithm::fold::{
        AnchorType, Crease, FoldSimulator, apply_breathing, is_duplicate,
    };
    use foldfield::algorithm::intersection::intersection_points;
    use foldfield::algorithm::paper::{BreathingCycle, PaperProperties, WeightRange};
    use foldfield::algorithm::strategy::FoldStrategy;
    use foldfield::math::geometry::{Canvas, Point, angle_difference};

    const FIXED_WEIGHT: WeightRange = WeightRange { min: 0.5, max: 0.5 };

    fn simulator(seed: i64, strategy: FoldStrategy) -> FoldSimulator {
        FoldSimulator::new(
            seed,
            Canvas::new(960.0, 1320.0),
            strategy,
            PaperProperties::default(),
            WeightRange::default(),
        )
    }

    fn custom(
        seed: i64,
        strategy: FoldStrategy,
        paper: PaperProperties,
        weight_range: WeightRange,
    ) -> FoldSimulator {
        FoldSimulator::new(seed, Canvas::new(960.0, 1320.0), strategy, paper, weight_range)
            .with_cycle(BreathingCycle {
                length: 1000,
                reductions: vec![0.5; 1000],
            })
    }

    fn crease(weight: f64, reduction: f64) -> Crease {
        Crease {
            p1: Point::new(0.0, 0.0),
            p2: Point::new(10.0, 0.0),
            depth: 0,
            weight,
            cycle_position: 0,
            reduction_multiplier: reduction,
            anchor_type: AnchorType::Edge,
            terminus_type: AnchorType::Edge,
        }
    }

    // Tests a degenerate canvas yields no creases
    // Verified by removing the canvas validity check
    #[test]
    fn test_degenerate_canvas() {
        let outcome = FoldSimulator::new(
            1,
            Canvas::new(0.0, 100.0),
            FoldStrategy::Random,
            PaperProperties::default(),
            WeightRange::default(),
        )
        .run(50);
        assert!(outcome.creases.is_empty());
        assert!(outcome.first_target.is_none());
    }

    // Tests zero folds produce no creases and no targets
    // Verified by computing targets from the canvas centre
    #[test]
    fn test_zero_folds() {
        let outcome = simulator(42, FoldStrategy::Random).run(0);
        assert!(outcome.creases.is_empty());
        assert!(outcome.first_target.is_none());
        assert!(outcome.last_target.is_none());
    }

    // Tests full absorbency registers creases with sequential depths
    // Verified by assigning the fold index as depth
    #[test]
    fn test_depths_are_insertion_indices() {
        let outcome = simulator(7, FoldStrategy::Random).run(60);
        assert!(!outcome.creases.is_empty());
        assert!(outcome.creases.len() <= 60);
        for (index, crease) in outcome.creases.iter().enumerate() {
            assert_eq!(crease.depth, index);
            assert!(crease.weight >= 0.01);
            assert!(crease.length() > 0.0);
        }
    }

    // Tests straight strategies keep creases axis-aligned
    // Verified by letting horizontal termini use the weighted pool
    #[test]
    fn test_horizontal_creases_are_level() {
        let outcome = simulator(3, FoldStrategy::Horizontal).run(40);
        assert!(!outcome.creases.is_empty());
        for crease in &outcome.creases {
            assert!((crease.p1.y - crease.p2.y).abs() < 1e-9);
        }
    }

    // Tests every crease endpoint stays on the canvas
    // Verified by removing the clamp in ray_to_boundary
    #[test]
    fn test_creases_inside_canvas() {
        let strategies = [
            FoldStrategy::Diagonal {
                angle: 45.0,
                jitter: 3.0,
            },
            FoldStrategy::Radial {
                focal_x: 0.4,
                focal_y: 0.6,
            },
            FoldStrategy::Clustered {
                cluster_x: 0.3,
                cluster_y: 0.3,
                spread: 0.2,
            },
            FoldStrategy::Grid,
            FoldStrategy::Random,
        ];
        for strategy in strategies {
            let outcome = simulator(11, strategy).run(80);
            for crease in &outcome.creases {
                for point in [crease.p1, crease.p2] {
                    assert!((-1e-9..=960.0 + 1e-9).contains(&point.x));
                    assert!((-1e-9..=1320.0 + 1e-9).contains(&point.y));
                }
            }
        }
    }

    // Tests fold targets sit inside the margin
    // Verified by returning raw midpoints
    #[test]
    fn test_fold_targets_clamped() {
        let outcome = simulator(5, FoldStrategy::Vertical).run(20);
        let margin = 0.05 * 960.0;
        for target in [outcome.first_target, outcome.last_target].into_iter().flatten() {
            assert!(target.x >= margin - 1e-9 && target.x <= 960.0 - margin + 1e-9);
            assert!(target.y >= margin - 1e-9 && target.y <= 1320.0 - margin + 1e-9);
        }
    }

    // Tests simulations are reproducible
    // Verified by seeding absorbency from wall-clock time
    #[test]
    fn test_simulation_deterministic() {
        let a = simulator(99, FoldStrategy::Random).run(120);
        let b = simulator(99, FoldStrategy::Random).run(120);
        assert_eq!(a, b);
    }

    // Tests breathing never raises a weight and respects the floor
    // Verified by replacing the floor with zero
    #[test]
    fn test_apply_breathing_monotonic() {
        let mut creases = vec![crease(0.5, 0.2), crease(0.02, 0.001), crease(0.01, 0.1)];
        let before: Vec<f64> = creases.iter().map(|c| c.weight).collect();
        apply_breathing(&mut creases);
        for (crease, old) in creases.iter().zip(before) {
            assert!(crease.weight <= old);
            assert!(crease.weight >= 0.01);
        }
    }

    // Tests cycle boundaries only ever lower registered weights
    // Verified by skipping the boundary breathing step
    #[test]
    fn test_cycle_decay_in_run() {
        let short = BreathingCycle {
            length: 4,
            reductions: vec![0.5; 4],
        };
        let long = BreathingCycle {
            length: 1000,
            reductions: vec![0.5; 1000],
        };
        let decayed = simulator(21, FoldStrategy::Random).with_cycle(short).run(12);
        let steady = simulator(21, FoldStrategy::Random).with_cycle(long).run(12);

        assert_eq!(decayed.creases.len(), steady.creases.len());
        for (a, b) in decayed.creases.iter().zip(&steady.creases) {
            assert_eq!(a.p1, b.p1);
            assert_eq!(a.p2, b.p2);
            assert!(a.weight <= b.weight);
            assert!(a.weight >= 0.01);
        }
    }

    // Tests duplicates are detected in both directions
    // Verified by checking only the forward direction
    #[test]
    fn test_is_duplicate() {
        let creases = vec![crease(0.5, 0.1)];
        assert!(is_duplicate(&creases, Point::new(0.5, 0.0), Point::new(10.0, 0.5)));
        assert!(is_duplicate(&creases, Point::new(10.0, 0.0), Point::new(0.0, 0.0)));
        assert!(!is_duplicate(&creases, Point::new(0.0, 0.0), Point::new(20.0, 0.0)));
    }

    // Tests the crossing cache matches a full recount after every fold
    // Verified by deferring cache updates to the periodic refresh
    #[test]
    fn test_crossing_cache_current_after_each_fold() {
        let mut registered = 0;
        for seed in 1..20 {
            let mut sim = simulator(seed, FoldStrategy::Random);
            for fold_index in 0..60 {
                if sim.step(fold_index, 60) {
                    registered += 1;
                }
                assert_eq!(
                    sim.known_intersections(),
                    intersection_points(sim.creases()).as_slice()
                );
            }
        }
        assert!(registered > 0);
    }

    // Tests a partly absorbent sheet discards a share of candidates
    // Verified by registering every candidate regardless of absorbency
    #[test]
    fn test_absorbency_discards_candidates() {
        let blotting = PaperProperties {
            absorbency: 0.3,
            ..PaperProperties::default()
        };
        let mut registered = 0;
        for seed in 1..11 {
            let mut sim = custom(seed, FoldStrategy::Random, blotting, FIXED_WEIGHT);
            for fold_index in 0..100 {
                if sim.step(fold_index, 100) {
                    registered += 1;
                }
            }
        }
        assert!((150..=450).contains(&registered), "registered {registered} of 1000");

        let sealed = PaperProperties {
            absorbency: 0.0,
            ..PaperProperties::default()
        };
        let outcome = custom(4, FoldStrategy::Random, sealed, FIXED_WEIGHT).run(100);
        assert!(outcome.creases.is_empty());
        assert!(outcome.first_target.is_none());
    }

    // Tests angle affinity scales each registered weight by its deviation
    // Verified by ignoring the affinity factor at registration
    #[test]
    fn test_affinity_lowers_weights() {
        let grained = PaperProperties {
            angle_affinity: Some(0.0),
            affinity_strength: 0.8,
            ..PaperProperties::default()
        };

        let outcome = custom(8, FoldStrategy::Random, grained, FIXED_WEIGHT).run(80);
        assert!(!outcome.creases.is_empty());
        for crease in &outcome.creases {
            let deviation = angle_difference(crease.angle(), 0.0);
            let expected = 0.5 * (1.0 - 0.8 * (deviation / 90.0));
            assert!((crease.weight - expected).abs() < 1e-12);
        }

        let across = custom(8, FoldStrategy::Vertical, grained, FIXED_WEIGHT).run(30);
        assert!(!across.creases.is_empty());
        assert!(across.creases.iter().all(|c| (c.weight - 0.1).abs() < 1e-12));

        let along = custom(8, FoldStrategy::Horizontal, grained, FIXED_WEIGHT).run(30);
        assert!(!along.creases.is_empty());
        assert!(along.creases.iter().all(|c| (c.weight - 0.5).abs() < 1e-12));
    }

    // Tests candidates at or below the minimum weight are discarded
    // Verified by registering weights equal to the minimum
    #[test]
    fn test_light_candidates_rejected() {
        let paper = PaperProperties::default();
        let at_floor = WeightRange { min: 0.01, max: 0.01 };
        assert!(custom(2, FoldStrategy::Random, paper, at_floor).run(50).creases.is_empty());

        let above = WeightRange { min: 0.02, max: 0.02 };
        assert!(!custom(2, FoldStrategy::Random, paper, above).run(50).creases.is_empty());

        let grained = PaperProperties {
            angle_affinity: Some(0.0),
            affinity_strength: 0.8,
            ..PaperProperties::default()
        };
        let faded = WeightRange { min: 0.04, max: 0.04 };
        let vertical = custom(2, FoldStrategy::Vertical, grained, faded).run(50);
        assert!(vertical.creases.is_empty());
    }
}
