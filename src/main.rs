//! Binary entrypoint for the `floorpro` command.
//!
//! All real work lives in the `cli` module; this file only parses the
//! arguments and forwards to `cli::run`.

use clap::Parser;

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::CliArgs::parse();
    cli::run(args)
}
