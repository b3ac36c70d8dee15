//! CLI entry point for the edge-matching tile grid generator

use clap::Parser;
use edgetile::io::cli::{Cli, FileProcessor};

fn main() -> edgetile::Result<()> {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
