//! Compare SymNMF and k-means on a point set by silhouette score.
//!
//! ```text
//! analysis <k> <input.csv> [--seed N]
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use symclump::cli;
use symclump::io;
use symclump::metrics::Silhouette;
use symclump::pipeline;

/// Cluster a point set with SymNMF and k-means and print both silhouette scores
#[derive(Parser)]
#[command(name = "analysis", version)]
struct Args {
    /// Number of clusters (1 <= k < number of points)
    k: usize,

    /// Headerless CSV file, one point per row
    input: PathBuf,

    /// Seed for the initial SymNMF factor
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> ExitCode {
    cli::init_logging();
    let args: Args = match cli::parse_args() {
        Ok(args) => args,
        Err(code) => return code,
    };

    let result = io::load_points(&args.input)
        .and_then(|points| pipeline::compare(&points, args.k, args.seed, &Silhouette));

    match result {
        Ok(cmp) => {
            print!("{}", io::format_scores(&cmp));
            ExitCode::SUCCESS
        }
        Err(e) => cli::fail(e),
    }
}
