use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use reindeer_maze::CLIArgs;

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    let map = match &args.input_path {
        Some(path) => reindeer_maze::read_map(path).with_context(|| {
            format!("Failed to read map from given file({}).", path.display())
        })?,
        None => reindeer_maze::read_map_from(io::stdin().lock())
            .context("Failed to read map from standard input.")?,
    };

    let min_score = map.min_total_score()?;
    println!(
        "The minimum total score of racing through the map is {}.",
        min_score
    );

    Ok(())
}
