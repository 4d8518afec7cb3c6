//! Caprino Checker - goat/sheep weight estimation CLI
//!
//! Estimates live weight from a chest-girth measurement or from a photo
//! analyzed by a multimodal AI service.

use caprino_checker::cli::Cli;
use caprino_checker::commands;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
