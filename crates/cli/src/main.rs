//! Order workflow driver entry point.

use std::process::ExitCode;

fn main() -> ExitCode {
    let config = cli::Config::from_env();

    match cli::execute(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "order workflow failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
