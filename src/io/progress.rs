//! Batch progress display with a rolling window of per-seed bars

use std::sync::LazyLock;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;

/// Stages reported for each seed
pub const STAGES: [&str; 3] = ["generating", "rendering", "writing"];

/// Coordinates progress display for a batch of seeds
///
/// Shows one bar per seed for the most recent seeds and adds a batch bar
/// once the batch outgrows the window.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    seed_bars: Vec<ProgressBar>,
    seed_count: usize,
    /// (`label`, `completed stages`) per seed, in batch order
    seed_states: Vec<(String, usize)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static SEED_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix:>24} [{bar:20.cyan/blue}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Seeds: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create an empty progress display
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            seed_bars: Vec::new(),
            seed_count: 0,
            seed_states: Vec::new(),
        }
    }

    /// Create bars for a batch of `seed_count` seeds
    pub fn initialize(&mut self, seed_count: usize) {
        self.seed_count = seed_count;

        if seed_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(seed_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..seed_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new(STAGES.len() as u64);
            bar.set_style(SEED_STYLE.clone());
            self.seed_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Number of seeds in the batch
    pub const fn seed_count(&self) -> usize {
        self.seed_count
    }

    /// Begin tracking the seed at `index`
    pub fn start_seed(&mut self, index: usize, seed: i64) {
        if index >= self.seed_states.len() {
            self.seed_states.resize(index + 1, (String::new(), 0));
        }
        if let Some(state) = self.seed_states.get_mut(index) {
            *state = (format!("seed {seed}"), 0);
        }
        self.update_bars();
    }

    /// Record that the seed at `index` finished one more stage
    pub fn advance(&mut self, index: usize) {
        if let Some(state) = self.seed_states.get_mut(index) {
            state.1 = (state.1 + 1).min(STAGES.len());
        }
        self.update_bars();
    }

    /// Mark the seed at `index` as written
    pub fn complete_seed(&mut self, index: usize) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        if let Some(state) = self.seed_states.get_mut(index) {
            state.0 = format!("✓ {}", state.0);
            state.1 = STAGES.len();
        }
        self.update_bars();
    }

    /// Mark the seed at `index` as skipped because its output exists
    pub fn skip_seed(&mut self, index: usize, seed: i64) {
        self.start_seed(index, seed);
        if let Some(state) = self.seed_states.get_mut(index) {
            state.0 = format!("- seed {seed} (exists)");
            state.1 = STAGES.len();
        }
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        self.update_bars();
    }

    /// Clear every bar
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All seeds processed");
        }
        let _ = self.multi_progress.clear();
    }

    fn update_bars(&self) {
        let active: Vec<&(String, usize)> = self
            .seed_states
            .iter()
            .filter(|(label, _)| !label.is_empty())
            .collect();

        let start = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start..).unwrap_or(&[]);

        for (bar_index, (label, stage)) in visible.iter().enumerate() {
            if let Some(bar) = self.seed_bars.get(bar_index) {
                bar.set_position(*stage as u64);
                bar.set_prefix(label.clone());
                bar.set_message(STAGES.get(*stage).copied().unwrap_or("done"));
            }
        }

        for bar_index in visible.len()..self.seed_bars.len() {
            if let Some(bar) = self.seed_bars.get(bar_index) {
                bar.set_position(0);
                bar.set_prefix(String::new());
                bar.set_message("");
            }
        }
    }
}
