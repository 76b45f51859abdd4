//! Tests for command-line parsing, seed parsing and batch runs

#[cfg(test)]
mod tests {
    use clap::Parser;
    use foldfield::algorithm::strategy::StrategyKind;
    use foldfield::io::cli::{BatchRunner, BatchSummary, Cli, parse_seed};
    use foldfield::io::configuration::{
        DEFAULT_BATCH_COUNT, DEFAULT_OUTPUT_HEIGHT, DEFAULT_OUTPUT_WIDTH, DEFAULT_PADDING,
    };
    use foldfield::io::error::FoldfieldError;
    use std::path::{Path, PathBuf};

    fn cli_for(output: &Path, extra: &[&str]) -> Cli {
        let mut args = vec![
            "foldfield".to_owned(),
            "--output".to_owned(),
            output.display().to_string(),
            "--quiet".to_owned(),
        ];
        args.extend(extra.iter().map(|arg| (*arg).to_owned()));
        Cli::parse_from(args)
    }

    // Tests defaults when no arguments are given
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["foldfield"]);
        assert!(cli.seed.is_none());
        assert!(cli.folds.is_none());
        assert_eq!(cli.count, DEFAULT_BATCH_COUNT);
        assert_eq!(cli.output, PathBuf::from("output"));
        assert_eq!(cli.width, DEFAULT_OUTPUT_WIDTH);
        assert_eq!(cli.height, DEFAULT_OUTPUT_HEIGHT);
        assert_eq!(cli.padding, DEFAULT_PADDING);
        assert!(cli.strategy.is_none());
        assert!(cli.skip_existing());
        assert!(cli.should_show_progress());
    }

    // Tests parsing with every argument supplied
    // Verified by breaking the strategy parser
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "foldfield",
            "--seed",
            "0x2a",
            "--folds",
            "120",
            "--count",
            "4",
            "--output",
            "renders",
            "-w",
            "300",
            "-H",
            "400",
            "--padding",
            "12",
            "--strategy",
            "radial",
            "--quiet",
            "--no-skip",
        ]);
        assert_eq!(cli.seed.as_deref(), Some("0x2a"));
        assert_eq!(cli.folds, Some(120));
        assert_eq!(cli.count, 4);
        assert_eq!(cli.output, PathBuf::from("renders"));
        assert_eq!((cli.width, cli.height), (300, 400));
        assert_eq!(cli.padding, 12);
        assert_eq!(cli.strategy, Some(StrategyKind::Radial));
        assert!(!cli.skip_existing());
        assert!(!cli.should_show_progress());
    }

    // Tests unknown strategies are rejected by the parser
    // Verified by falling back to random for unknown names
    #[test]
    fn test_cli_rejects_unknown_strategy() {
        assert!(Cli::try_parse_from(["foldfield", "--strategy", "spiral"]).is_err());
    }

    // Tests decimal and hexadecimal seed parsing
    // Verified by parsing hexadecimal as decimal digits
    #[test]
    fn test_parse_seed() {
        assert_eq!(parse_seed("42").ok(), Some(42));
        assert_eq!(parse_seed(" -5 ").ok(), Some(-5));
        assert_eq!(parse_seed("0x10").ok(), Some(16));
        assert_eq!(parse_seed("0XFF").ok(), Some(255));
        assert_eq!(parse_seed("0xffffffffffffffff").ok(), Some(-1));
        assert_eq!(
            parse_seed("0x1_0000_0000_0000_0001".replace('_', "").as_str()).ok(),
            Some(1)
        );
    }

    // Tests malformed seeds produce seed errors
    // Verified by defaulting malformed seeds to zero
    #[test]
    fn test_parse_seed_errors() {
        for input in ["", "   ", "abc", "0x", "0xZZ", "12.5"] {
            assert!(matches!(
                parse_seed(input),
                Err(FoldfieldError::InvalidSeed { .. })
            ));
        }
        let too_wide = format!("0x1{}", "0".repeat(32));
        assert!(parse_seed(&too_wide).is_err());
    }

    // Tests batches cover consecutive seeds with stable file names
    // Verified by starting the batch at seed zero
    #[test]
    fn test_batch_seeds_and_paths() {
        let runner = BatchRunner::new(cli_for(Path::new("out"), &["--seed", "10", "--count", "3"]));
        let runner = runner.unwrap();
        assert_eq!(runner.first_seed(), 10);
        assert_eq!(runner.seeds(), vec![10, 11, 12]);

        let (png, json) = runner.output_paths(-3);
        assert_eq!(png, PathBuf::from("out/fold_-3.png"));
        assert_eq!(json, PathBuf::from("out/fold_-3.json"));
    }

    // Tests command-line options flow into requests
    // Verified by ignoring the padding option
    #[test]
    fn test_request_for() {
        let runner = BatchRunner::new(cli_for(
            Path::new("out"),
            &["--seed", "1", "--folds", "33", "--padding", "10", "--strategy", "grid"],
        ))
        .unwrap();
        let request = runner.request_for(7);
        assert_eq!(request.seed, 7);
        assert_eq!(request.num_folds, Some(33));
        assert_eq!(request.reference.padding, 10);
        assert!(request
            .overrides
            .strategy
            .is_some_and(|strategy| strategy.kind() == StrategyKind::Grid));
    }

    // Tests a batch writes every seed and skips existing output on rerun
    // Verified by ignoring the skip flag
    #[test]
    fn test_batch_run_and_skip() {
        let dir = tempfile::tempdir().unwrap();
        let args = ["--seed", "5", "--folds", "15", "--count", "2", "-w", "60", "-H", "75"];

        let mut runner = BatchRunner::new(cli_for(dir.path(), &args)).unwrap();
        let summary = runner.run().unwrap();
        assert_eq!(
            summary,
            BatchSummary {
                generated: 2,
                skipped: 0
            }
        );
        assert!(dir.path().join("fold_5.png").exists());
        assert!(dir.path().join("fold_6.json").exists());

        let mut rerun = BatchRunner::new(cli_for(dir.path(), &args)).unwrap();
        assert_eq!(rerun.run().unwrap().skipped, 2);

        let mut forced_args = args.to_vec();
        forced_args.push("--no-skip");
        let mut forced = BatchRunner::new(cli_for(dir.path(), &forced_args)).unwrap();
        assert_eq!(forced.run().unwrap().generated, 2);
    }

    // Tests zero output sizes and oversized fold counts are rejected
    // Verified by clamping the output size to one pixel
    #[test]
    fn test_batch_run_rejects_bad_options() {
        let dir = tempfile::tempdir().unwrap();
        let mut runner =
            BatchRunner::new(cli_for(dir.path(), &["--seed", "1", "-w", "0"])).unwrap();
        assert!(matches!(
            runner.run(),
            Err(FoldfieldError::InvalidParameter { .. })
        ));

        let mut runner =
            BatchRunner::new(cli_for(dir.path(), &["--seed", "1", "--folds", "900"])).unwrap();
        assert!(runner.run().is_err());
        assert!(!dir.path().join("fold_1.png").exists());
    }
}
