//! Command-line interface for generating compositions over consecutive seeds

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::{
    algorithm::{
        executor::{GenerationRequest, generate},
        strategy::{FoldStrategy, StrategyKind},
    },
    io::{
        configuration::{
            DEFAULT_BATCH_COUNT, DEFAULT_OUTPUT_HEIGHT, DEFAULT_OUTPUT_WIDTH, DEFAULT_PADDING,
            OUTPUT_PREFIX,
        },
        error::{Result, invalid_parameter, invalid_seed},
        image::export_preview_png,
        metadata::export_metadata_json,
        progress::ProgressManager,
    },
    spatial::ReferenceSpace,
};

#[derive(Parser, Debug)]
#[command(name = "foldfield")]
#[command(
    author,
    version,
    about = "Generate seeded paper-fold compositions as PNG previews and JSON metadata"
)]
/// Command-line arguments for composition generation
pub struct Cli {
    /// Seed as a decimal or 0x-prefixed hexadecimal integer (random if omitted)
    #[arg(short, long)]
    pub seed: Option<String>,

    /// Number of folds to simulate (derived from the seed if omitted)
    #[arg(short, long)]
    pub folds: Option<u32>,

    /// Number of consecutive seeds to generate
    #[arg(short, long, default_value_t = DEFAULT_BATCH_COUNT)]
    pub count: usize,

    /// Output directory
    #[arg(short, long, default_value = "output")]
    pub output: PathBuf,

    /// Preview width in pixels
    #[arg(short = 'w', long, default_value_t = DEFAULT_OUTPUT_WIDTH)]
    pub width: u32,

    /// Preview height in pixels
    #[arg(short = 'H', long, default_value_t = DEFAULT_OUTPUT_HEIGHT)]
    pub height: u32,

    /// Padding inside the drawing margin, in reference units
    #[arg(short, long, default_value_t = DEFAULT_PADDING)]
    pub padding: u32,

    /// Force a fold strategy family
    #[arg(long)]
    pub strategy: Option<StrategyKind>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Regenerate seeds whose output already exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing outputs should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Parse a seed from decimal or `0x` hexadecimal text
///
/// Hexadecimal values up to 128 bits are accepted, keeping their low 64
/// bits reinterpreted as a signed integer so hash digests map onto the seed
/// domain.
///
/// # Errors
///
/// Returns an error if the text is empty, not a number, or too wide
pub fn parse_seed(input: &str) -> Result<i64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid_seed(input, &"empty"));
    }

    let hex = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"));
    match hex {
        Some(digits) => {
            let value = u128::from_str_radix(digits, 16).map_err(|e| invalid_seed(input, &e))?;
            // Truncation to the low 64 bits is the documented mapping
            Ok(value as u64 as i64)
        }
        None => trimmed.parse::<i64>().map_err(|e| invalid_seed(input, &e)),
    }
}

/// Counts reported after a batch
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Seeds written
    pub generated: usize,
    /// Seeds skipped because their output existed
    pub skipped: usize,
}

/// Runs a batch of seeds with progress tracking
pub struct BatchRunner {
    cli: Cli,
    first_seed: i64,
    progress_manager: Option<ProgressManager>,
}

impl BatchRunner {
    /// Resolve the first seed and prepare progress display
    ///
    /// A missing seed is drawn from OS entropy and announced on stderr so the
    /// run can be reproduced.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed text cannot be parsed
    // Allow print so a random seed is never lost
    #[allow(clippy::print_stderr)]
    pub fn new(cli: Cli) -> Result<Self> {
        let first_seed = match cli.seed.as_deref() {
            Some(text) => parse_seed(text)?,
            None => {
                let seed = i64::from(rand::random::<u32>());
                if !cli.quiet {
                    eprintln!("Using random seed {seed}");
                }
                seed
            }
        };
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Ok(Self {
            cli,
            first_seed,
            progress_manager,
        })
    }

    /// First seed of the batch
    pub const fn first_seed(&self) -> i64 {
        self.first_seed
    }

    /// Seeds the batch covers, in order
    pub fn seeds(&self) -> Vec<i64> {
        (0..self.cli.count as i64)
            .map(|offset| self.first_seed.wrapping_add(offset))
            .collect()
    }

    /// Request for one seed under the command-line options
    pub fn request_for(&self, seed: i64) -> GenerationRequest {
        let mut request = GenerationRequest::new(seed).with_reference(ReferenceSpace {
            padding: self.cli.padding,
            ..ReferenceSpace::default()
        });
        if let Some(num_folds) = self.cli.folds {
            request = request.with_folds(num_folds);
        }
        if let Some(kind) = self.cli.strategy {
            request = request.with_strategy(FoldStrategy::for_kind(seed, kind));
        }
        request
    }

    /// PNG and JSON paths for a seed
    pub fn output_paths(&self, seed: i64) -> (PathBuf, PathBuf) {
        let stem = format!("{OUTPUT_PREFIX}{seed}");
        (
            self.cli.output.join(format!("{stem}.png")),
            self.cli.output.join(format!("{stem}.json")),
        )
    }

    /// Generate and write every seed in the batch
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The output size is zero in either dimension
    /// - A request fails validation
    /// - An output file cannot be written
    pub fn run(&mut self) -> Result<BatchSummary> {
        if self.cli.width == 0 || self.cli.height == 0 {
            return Err(invalid_parameter(
                "output size",
                &format!("{}x{}", self.cli.width, self.cli.height),
                &"both dimensions must be positive",
            ));
        }

        let seeds = self.seeds();
        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(seeds.len());
        }

        let mut summary = BatchSummary::default();
        for (index, &seed) in seeds.iter().enumerate() {
            let (png_path, json_path) = self.output_paths(seed);
            if self.cli.skip_existing() && png_path.exists() {
                log::debug!("skipping seed {seed}: {} exists", png_path.display());
                if let Some(ref mut pm) = self.progress_manager {
                    pm.skip_seed(index, seed);
                }
                summary.skipped += 1;
                continue;
            }

            self.process_seed(index, seed, &png_path, &json_path)?;
            summary.generated += 1;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(summary)
    }

    fn process_seed(
        &mut self,
        index: usize,
        seed: i64,
        png_path: &Path,
        json_path: &Path,
    ) -> Result<()> {
        if let Some(ref mut pm) = self.progress_manager {
            pm.start_seed(index, seed);
        }

        let request = self.request_for(seed);
        request.validate()?;
        let composition = generate(&request);
        if let Some(ref mut pm) = self.progress_manager {
            pm.advance(index);
        }

        export_preview_png(&composition, self.cli.width, self.cli.height, png_path)?;
        if let Some(ref mut pm) = self.progress_manager {
            pm.advance(index);
        }

        export_metadata_json(&composition, json_path)?;
        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_seed(index);
        }

        Ok(())
    }
}
