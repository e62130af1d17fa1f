mod cli;
mod data;
mod error;
mod pipeline;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Cli::parse();
    let keys = pipeline::run(&args)?;

    println!("Wrote {} with keys: {keys:?}", args.out.display());
    Ok(())
}
