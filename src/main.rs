use anyhow::Result;
use cifprep::{init_tracing_once, CifAugmenter};
use clap::Parser;
use std::path::PathBuf;

/// Pre-process CIF records for model training.
#[derive(Parser, Debug)]
#[command(name = "cifprep", version, about)]
struct Args {
    /// zstd JSONL file of {"id", "cif"} records to pre-process.
    input: PathBuf,

    /// Destination zstd JSONL file for the augmented CIF texts (conventionally `.jsonl.zst`).
    #[arg(short, long)]
    out: PathBuf,

    /// The CIFs carry oxidation state information; emit oxidation numbers and
    /// oxidation-specific ionic radii.
    #[arg(long)]
    oxi: bool,

    /// Number of decimal places to round floating point numbers to.
    #[arg(long, default_value_t = 4)]
    decimal_places: usize,

    /// Number of workers to use for processing.
    #[arg(long, default_value_t = 4)]
    workers: usize,

    /// Hide the progress bar.
    #[arg(long)]
    no_progress: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing_once();

    let report = CifAugmenter::new()
        .oxidation(args.oxi)
        .decimal_places(args.decimal_places)
        .workers(args.workers)
        .progress(!args.no_progress)
        .augment_file(&args.input, &args.out)?;

    println!("number of CIFs: {}", report.kept());
    Ok(())
}
