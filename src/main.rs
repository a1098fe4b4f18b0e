//! Appboot CLI entry point.

use clap::Parser;
use tracing::level_filters::LevelFilter;

use appboot::cli::{handle_error, run, Cli};
use appboot::infrastructure::logging::init_diagnostics;

fn main() {
    if let Err(err) = init_diagnostics(LevelFilter::WARN) {
        eprintln!("Warning: {err:#}");
    }

    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli) {
        handle_error(err, json);
    }
}
