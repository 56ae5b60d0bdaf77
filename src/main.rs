//! CLI entry point for sample-driven tile map generation

use clap::Parser;
use simpletiled::io::cli::{Cli, Generator};

fn main() -> simpletiled::Result<()> {
    let cli = Cli::parse();
    let mut generator = Generator::new(cli);
    generator.process()
}
