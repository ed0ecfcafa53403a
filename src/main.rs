#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::uninlined_format_args)]

mod error;
mod ml;
mod table;

use clap::Parser;
use error::{PclustError, Result};
use ml::features::FeatureMatrix;
use std::path::PathBuf;
use table::PlayerTable;

/// Dataset expected in the working directory when no path is given.
const DEFAULT_DATASET: &str = "epl_player_stats.csv";

/// Cluster football players by per-match performance profile
#[derive(Parser, Debug)]
#[command(name = "pclust")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input CSV file with player statistics
    #[arg(short, long, default_value = DEFAULT_DATASET)]
    csv: PathBuf,

    /// Treat input as TSV instead of CSV
    #[arg(long)]
    tsv: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    if !args.csv.exists() {
        return Err(PclustError::Config(format!(
            "CSV file not found: {}",
            args.csv.display()
        )));
    }

    eprintln!("Loading: {}", args.csv.display());
    let mut table = PlayerTable::from_path(&args.csv, args.tsv)?;
    if table.is_empty() {
        return Err(PclustError::Schema("Input file has no player rows".into()));
    }
    eprintln!("Loaded {} players", table.len());

    table.derive_rates();

    let features = FeatureMatrix::from_table(&table);
    let scaled = features.standardize();

    eprintln!("Running clustering pipeline...");
    let result = ml::pipeline::run_pipeline(&scaled)?;

    print!("{}", ml::output::build_report(&table, &result));

    Ok(())
}
