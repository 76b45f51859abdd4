//! Tests for cell sizing, axis spacing and output scaling

#[cfg(test)]
mod tests {
    use foldfield::math::geometry::Point;
    use foldfield::math::rng::SeededStream;
    use foldfield::spatial::layout::{
        GridLayout, ReferenceSpace, candidate_cell_sizes, cell_divisors, choose_cell_size,
        solve_axis,
    };

    fn fixed_layout() -> GridLayout {
        GridLayout {
            cols: 4,
            rows: 3,
            cell_width: 20,
            cell_height: 30,
            col_gap: 5,
            row_gap: 0,
            stride_x: 25,
            stride_y: 30,
            offset_x: 100,
            offset_y: 60,
        }
    }

    // Tests default reference space drawable extents
    // Verified by subtracting the margin only once per axis
    #[test]
    fn test_reference_inner_extents() {
        let reference = ReferenceSpace::default();
        assert_eq!(reference.inner_width(), 1080);
        assert_eq!(reference.inner_height(), 1380);

        let padded = ReferenceSpace {
            padding: 20,
            ..ReferenceSpace::default()
        };
        assert_eq!(padded.inset(), 80);
        assert_eq!(padded.inner_width(), 1040);
    }

    // Tests divisors stay inside the admissible cell range
    // Verified by starting the range at 1
    #[test]
    fn test_cell_divisors() {
        assert_eq!(cell_divisors(1380), vec![12, 15, 20, 23, 30, 46, 60, 69]);
        assert!(cell_divisors(11).is_empty());
        assert!(cell_divisors(1080).iter().all(|d| 1080 % d == 0));
    }

    // Tests candidate pairs respect aspect, glyph fit and area order
    // Verified by sorting pairs by width only
    #[test]
    fn test_candidate_cell_sizes() {
        let pairs = candidate_cell_sizes(1080, 1380);
        assert!(!pairs.is_empty());
        for &(w, h) in &pairs {
            assert_eq!(1080 % w, 0);
            assert_eq!(1380 % h, 0);
            let long = f64::from(w.max(h));
            let short = f64::from(w.min(h));
            assert!(long / short <= 3.0);
            assert!(f64::from(w) >= f64::from(h) * 0.5);
        }
        for window in pairs.windows(2) {
            if let [a, b] = window {
                assert!(a.0 * a.1 <= b.0 * b.1);
            }
        }
    }

    // Tests cell size falls back when no divisor qualifies
    // Verified by returning the first candidate of an empty list
    #[test]
    fn test_choose_cell_size_fallback() {
        let mut rng = SeededStream::new(1);
        assert_eq!(choose_cell_size(11, 11, &mut rng), (24, 24));
    }

    // Tests chosen cell sizes always come from the candidate list
    // Verified by letting the quantile end exceed the list length
    #[test]
    fn test_choose_cell_size_is_candidate() {
        let pairs = candidate_cell_sizes(1080, 1380);
        for seed in 0..200 {
            let mut rng = SeededStream::new(seed);
            let chosen = choose_cell_size(1080, 1380, &mut rng);
            assert!(pairs.contains(&chosen));
        }
    }

    // Tests axis solutions fit inside the extent and centre their slack
    // Verified by placing all slack before the first cell
    #[test]
    fn test_solve_axis_fits() {
        for seed in 0..200 {
            let mut rng = SeededStream::new(seed);
            let solution = solve_axis(1080, 24, 60, &mut rng);
            assert!(solution.count >= 1);
            let used = (solution.count - 1) * solution.stride + 24;
            assert!(used <= 1080);
            assert_eq!(solution.offset, 60 + (1080 - used) / 2);
            assert_eq!(solution.stride as i32, 24 + solution.gap);
        }
    }

    // Tests an axis narrower than one cell still holds one cell
    // Verified by removing the single-cell branch
    #[test]
    fn test_solve_axis_narrow() {
        let mut rng = SeededStream::new(9);
        let solution = solve_axis(10, 24, 0, &mut rng);
        assert_eq!(solution.count, 1);
        assert_eq!(solution.offset, 0);
    }

    // Tests solving is deterministic and yields a usable grid
    // Verified by seeding the grid stream from the palette offset
    #[test]
    fn test_solve_deterministic() {
        let reference = ReferenceSpace::default();
        let a = GridLayout::solve(42, &reference);
        let b = GridLayout::solve(42, &reference);
        assert_eq!(a, b);
        assert!(a.cell_count() > 0);
        assert!(a.canvas().is_valid());
    }

    // Tests point binning clamps to the grid
    // Verified by removing the clamp to the last column
    #[test]
    fn test_cell_at() {
        let layout = fixed_layout();
        assert_eq!(layout.cell_at(Point::new(0.0, 0.0)), (0, 0));
        assert_eq!(layout.cell_at(Point::new(45.0, 31.0)), (2, 1));
        assert_eq!(layout.cell_at(Point::new(80.0, 90.0)), (3, 2));
        assert_eq!(layout.cell_at(Point::new(-3.0, 500.0)), (0, 2));
        assert_eq!(layout.cell_size_label(), "20x30");
    }

    // Tests scaled rectangles follow the spaced origin
    // Verified by ignoring the stride in the cell origin
    #[test]
    fn test_scaled_layout() {
        let layout = fixed_layout();
        let reference = ReferenceSpace::default();
        let scaled = layout.scaled(&reference, 600, 750);
        let rect = scaled.cell_rect(1, 2);
        assert!((rect.x - 62.5).abs() < 1e-9);
        assert!((rect.y - 60.0).abs() < 1e-9);
        assert!((rect.width - 10.0).abs() < 1e-9);
        assert!((rect.height - 15.0).abs() < 1e-9);

        let projected = scaled.project(Point::new(30.0, 0.0));
        assert!((projected.x - 67.5).abs() < 1e-9);
        assert!((projected.y - 30.0).abs() < 1e-9);
    }
}
