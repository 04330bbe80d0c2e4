//! Command-line front end for the Braille conversion tables.

use anyhow::{Context, Result};
use braille_trie::BrailleTables;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Library events go through tracing's `log` bridge.
    env_logger::Builder::new().filter_level(cli.log_level).init();

    // Unreadable tables are logged by `load_dir` and stay empty.
    let (tables, failures) = BrailleTables::load_dir(&cli.tables);
    if !failures.is_empty() {
        log::warn!(
            "{} of 3 mapping tables could not be loaded from {}",
            failures.len(),
            cli.tables.display()
        );
    }

    let converted = tables
        .convert(cli.target, &cli.text)
        .with_context(|| format!("cannot convert {:?} to {}", cli.text, cli.target))?;
    println!("{converted}");
    Ok(())
}
