// src/bin/cli.rs
use compendium_convert::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::run()
}
