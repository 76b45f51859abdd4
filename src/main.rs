//! CLI entry point for seeded paper-fold composition generation

use clap::Parser;
use foldfield::io::cli::{BatchRunner, Cli};

fn main() -> foldfield::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut runner = BatchRunner::new(cli)?;
    let summary = runner.run()?;
    log::info!(
        "generated {} composition(s), skipped {}",
        summary.generated,
        summary.skipped
    );
    Ok(())
}
