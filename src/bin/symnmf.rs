//! Print one SymNMF matrix of a point set.
//!
//! ```text
//! symnmf <k> <sym|ddg|norm|symnmf> <input.csv> [--seed N]
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use symclump::cli;
use symclump::io;
use symclump::pipeline::{self, Goal};

/// Compute the similarity, degree, normalized, or factor matrix of a point set
#[derive(Parser)]
#[command(name = "symnmf", version)]
struct Args {
    /// Number of clusters (1 <= k < number of points)
    k: usize,

    /// Matrix to print
    goal: Goal,

    /// Headerless CSV file, one point per row
    input: PathBuf,

    /// Seed for the initial factor of the symnmf goal
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
        .and_then(|points| pipeline::run_goal(args.goal, args.k, &points, args.seed));

    match result {
        Ok(matrix) => {
            print!("{}", io::format_matrix(&matrix));
            ExitCode::SUCCESS
        }
        Err(e) => cli::fail(e),
    }
}
