#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use anyhow::Result;
use camino::Utf8PathBuf;
use clap::Parser;
use tracing::{info, Level};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the source comic book archive (.cbz)
    source: Utf8PathBuf,
    /// Path to the pdf document to create (.pdf)
    destination: Utf8PathBuf,
    /// Replace the destination file if it already exists
    #[clap(long, action)]
    overwrite: bool,
    /// Increase log verbosity (-v: info, -vv: debug)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::ERROR,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let report = cbz2pdf_core::convert(&args.source, &args.destination, args.overwrite)?;

    info!(
        "converted {} pages from `{}` to `{}`",
        report.pages, args.source, args.destination
    );

    Ok(())
}
