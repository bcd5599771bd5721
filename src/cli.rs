// src/cli.rs
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};

use crate::config::consts::{DEFAULT_LOG_FILE, ENV_DEBUG, ENV_PROGRESS_EVERY, PROGRESS_EVERY};
use crate::config::options::ConvertOptions;
use crate::progress::Progress;
use crate::runner::{Converter, Summary};
use crate::store;

#[derive(Debug, Parser)]
#[command(name = "compendium_convert", version, about = "Normalise, classify and sort compendium entries")]
pub struct Args {
    /// Catalog JSON to read
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Where to write the converted catalog
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Enable diagnostic heuristics and debug logging
    #[arg(long, env = ENV_DEBUG)]
    pub debug: bool,

    /// Report progress every N entries
    #[arg(long, env = ENV_PROGRESS_EVERY, default_value_t = PROGRESS_EVERY)]
    pub progress_every: usize,

    /// Append logs to this file instead of stderr
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = DEFAULT_LOG_FILE)]
    pub log_file: Option<PathBuf>,

    /// Only log warnings; no progress line
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn options(&self) -> ConvertOptions {
        ConvertOptions { debug: self.debug, progress_every: self.progress_every }
    }
}

/// Single-line progress on stderr.
pub struct ConsoleProgress {
    label: String,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self { label: String::new() }
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for ConsoleProgress {
    fn log(&mut self, msg: &str) {
        self.label = s!(msg);
    }

    fn advance(&mut self, done: usize, total: usize) {
        let mut err = io::stderr().lock();
        let _ = write!(err, "\r{} {done}/{total}", self.label);
        let _ = err.flush();
    }

    fn finish(&mut self) {
        eprintln!();
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    crate::log::init(args.debug, args.log_file.as_deref()).wrap_err("cannot open log file")?;

    let mut categories = store::load(&args.input)?;
    let converter = Converter::new(args.options());
    let mut console = ConsoleProgress::new();
    let progress: Option<&mut dyn Progress> = if args.quiet { None } else { Some(&mut console) };
    let summaries = converter.convert_catalog(&mut categories, progress)?;
    store::save(&args.output, &categories)?;

    if !args.quiet {
        print_summary(&summaries);
    }
    Ok(())
}

fn print_summary(summaries: &[Summary]) {
    for s in summaries {
        println!("{}: {} converted, {} ordered, {} warnings", s.category, s.converted, s.ordered, s.warnings);
        for (reason, count) in &s.corrections {
            println!("  {reason}: {count}");
        }
    }
}
