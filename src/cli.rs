//! Shared plumbing of the `symnmf` and `analysis` binaries.

use std::fmt::Display;
use std::process::ExitCode;

use log::error;

/// The only message a failing run prints.
pub const GENERIC_ERROR: &str = "An Error Has Occurred";

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("warn");
    // don't panic if a logger is already installed
    let _ = env_logger::Builder::from_env(env).try_init();
}

/// Log the detailed failure, print the generic message, and exit non-zero.
pub fn fail(err: impl Display) -> ExitCode {
    error!("{err}");
    println!("{GENERIC_ERROR}");
    ExitCode::FAILURE
}

/// Collapse argument errors like any other failure, but still honour `--help`/`--version`.
pub fn parse_args<T: clap::Parser>() -> Result<T, ExitCode> {
    match T::try_parse() {
        Ok(args) => Ok(args),
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                let _ = e.print();
                Err(ExitCode::SUCCESS)
            }
            _ => Err(fail(e)),
        },
    }
}
